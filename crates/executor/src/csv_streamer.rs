use csv::{Reader, ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;
use tracing::{error, info};

use super::error::Error;
use super::types::{QueryRequest, QueryStreamer, send_batch};

const SOURCE: &str = "CsvStreamer";

/// One row of a query file. Columns other than `start` and `end` are ignored.
#[derive(Debug, Deserialize)]
struct QueryRow {
    start: i64,
    end: i64,
}

/// Streams queries from a CSV file with `start,end` headers.
///
/// Rows are deserialized one at a time and forwarded as soon as a batch
/// fills, so the file is never held in memory. A row that does not
/// deserialize ends the stream with `CsvError` after the rows before it
/// have been sent.
pub struct CsvStreamer {
    path: PathBuf,
    batch_size: usize,
}

impl CsvStreamer {
    pub fn new(path: PathBuf, batch_size: usize) -> Self {
        CsvStreamer { path, batch_size }
    }

    fn open(&self) -> Result<Reader<File>, Error> {
        let file = File::open(&self.path).inspect_err(|e| {
            error!("Failed to open query file {}: {}", self.path.display(), e);
        })?;

        Ok(ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file))
    }
}

#[async_trait::async_trait]
impl QueryStreamer for CsvStreamer {
    async fn run_stream(self, sender: Sender<Vec<QueryRequest>>) -> Result<(), Error> {
        let mut rdr = self.open()?;
        let mut batch: Vec<QueryRequest> = Vec::with_capacity(self.batch_size);
        let mut queries_sent = 0usize;

        info!("{}: streaming queries from {}", SOURCE, self.path.display());

        for row in rdr.deserialize::<QueryRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    queries_sent += send_batch(&sender, &mut batch, SOURCE).await?;
                    error!("{}: stopping after {} queries: {}", SOURCE, queries_sent, e);
                    return Err(Error::CsvError(e));
                }
            };

            batch.push(QueryRequest::new(row.start, row.end));
            if batch.len() >= self.batch_size {
                queries_sent += send_batch(&sender, &mut batch, SOURCE).await?;
            }
        }
        queries_sent += send_batch(&sender, &mut batch, SOURCE).await?;

        info!("{}: forwarded {} queries.", SOURCE, queries_sent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::sync::mpsc;

    const MOCK_CSV_CONTENT: &str = "\
id,start,end,label
1,0,2,a
2,1,2,b
3,2,0,c
4,0,0,d
";

    const BATCH_SIZE: usize = 3;

    fn write_mock_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    async fn stream(path: PathBuf) -> (Result<(), Error>, Vec<Vec<QueryRequest>>) {
        let streamer = CsvStreamer::new(path, BATCH_SIZE);
        let (tx, mut rx) = mpsc::channel(16);

        let result = streamer.run_stream(tx).await;

        let mut batches = Vec::new();
        while let Some(batch) = rx.recv().await {
            batches.push(batch);
        }
        (result, batches)
    }

    #[tokio::test]
    async fn rows_are_sent_in_batches() {
        let temp_file = write_mock_csv(MOCK_CSV_CONTENT);
        let (result, batches) = stream(temp_file.path().to_path_buf()).await;

        assert!(result.is_ok(), "Streaming failed: {:?}", result.err());
        assert_eq!(
            batches,
            vec![
                vec![
                    QueryRequest::new(0, 2),
                    QueryRequest::new(1, 2),
                    QueryRequest::new(2, 0)
                ],
                vec![QueryRequest::new(0, 0)],
            ]
        );
    }

    #[tokio::test]
    async fn negative_vertex_is_forwarded() {
        let temp_file = write_mock_csv("start,end\n0,-1\n");
        let (result, batches) = stream(temp_file.path().to_path_buf()).await;

        assert!(result.is_ok());
        assert_eq!(batches, vec![vec![QueryRequest::new(0, -1)]]);
    }

    #[tokio::test]
    async fn bad_row_stops_after_earlier_rows() {
        let temp_file = write_mock_csv("start,end\n0,1\n1,x\n2,0\n");
        let (result, batches) = stream(temp_file.path().to_path_buf()).await;

        assert!(matches!(result, Err(Error::CsvError(_))));
        assert_eq!(batches, vec![vec![QueryRequest::new(0, 1)]]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let (result, batches) = stream(PathBuf::from("non_existent_file.csv")).await;

        assert!(batches.is_empty());
        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result.err());
        }
    }
}
