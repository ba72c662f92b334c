use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::mpsc::Sender;
use tracing::{error, info};

use super::error::Error;
use super::types::{QueryRequest, QueryStreamer, send_batch};

const SOURCE: &str = "StdinStreamer";

/// Streams `start end` pairs from a line-oriented reader.
///
/// A pair may be split across lines. Vertex ids are read as signed integers
/// so that a negative id fails only its own query downstream. A token that
/// is not an integer, or a start vertex left without an end at end of input,
/// is a hard input error; queries read before it are still forwarded.
/// Pending queries are flushed at the end of every line so interactive
/// sessions get answers as they type.
pub struct StdinStreamer<R> {
    reader: R,
    batch_size: usize,
}

impl StdinStreamer<BufReader<Stdin>> {
    pub fn stdin(batch_size: usize) -> Self {
        StdinStreamer::new(BufReader::new(tokio::io::stdin()), batch_size)
    }
}

impl<R> StdinStreamer<R>
where
    R: AsyncBufRead + Unpin + Send + Sync + 'static,
{
    pub fn new(reader: R, batch_size: usize) -> Self {
        StdinStreamer { reader, batch_size }
    }
}

#[async_trait::async_trait]
impl<R> QueryStreamer for StdinStreamer<R>
where
    R: AsyncBufRead + Unpin + Send + Sync + 'static,
{
    async fn run_stream(self, sender: Sender<Vec<QueryRequest>>) -> Result<(), Error> {
        let mut lines = self.reader.lines();
        let mut batch: Vec<QueryRequest> = Vec::with_capacity(self.batch_size);
        let mut pending_start: Option<i64> = None;
        let mut total = 0usize;
        let mut line_number = 0usize;

        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            for raw in line.split_whitespace() {
                let Ok(vertex) = raw.parse::<i64>() else {
                    send_batch(&sender, &mut batch, SOURCE).await?;
                    error!(token = raw, line = line_number, "Malformed query input.");
                    return Err(Error::MalformedQuery(format!(
                        "expected a vertex id on line {}, found '{}'",
                        line_number, raw
                    )));
                };

                match pending_start.take() {
                    None => pending_start = Some(vertex),
                    Some(start) => {
                        batch.push(QueryRequest::new(start, vertex));
                        if batch.len() >= self.batch_size {
                            total += send_batch(&sender, &mut batch, SOURCE).await?;
                        }
                    }
                }
            }
            total += send_batch(&sender, &mut batch, SOURCE).await?;
        }

        if let Some(start) = pending_start {
            return Err(Error::MalformedQuery(format!(
                "query starting at vertex {} has no end vertex",
                start
            )));
        }

        info!("{}: forwarded {} queries.", SOURCE, total);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn collect(
        input: &'static str,
        batch_size: usize,
    ) -> (Result<(), Error>, Vec<Vec<QueryRequest>>) {
        let streamer = StdinStreamer::new(BufReader::new(input.as_bytes()), batch_size);
        let (tx, mut rx) = mpsc::channel(64);

        let result = streamer.run_stream(tx).await;

        let mut batches = Vec::new();
        while let Some(batch) = rx.recv().await {
            batches.push(batch);
        }
        (result, batches)
    }

    #[tokio::test]
    async fn reads_one_query_per_line() {
        let (result, batches) = collect("0 2\n1 2\n", 10).await;
        let queries: Vec<QueryRequest> = batches.into_iter().flatten().collect();

        assert!(result.is_ok());
        assert_eq!(queries, vec![QueryRequest::new(0, 2), QueryRequest::new(1, 2)]);
    }

    #[tokio::test]
    async fn pairs_may_span_lines() {
        let (result, batches) = collect("0\n2 3\n4\n", 10).await;
        let queries: Vec<QueryRequest> = batches.into_iter().flatten().collect();

        assert!(result.is_ok());
        assert_eq!(queries, vec![QueryRequest::new(0, 2), QueryRequest::new(3, 4)]);
    }

    #[tokio::test]
    async fn negative_vertex_does_not_stop_the_stream() {
        let (result, batches) = collect("0 2\n-1 2\n1 2\n", 10).await;
        let queries: Vec<QueryRequest> = batches.into_iter().flatten().collect();

        assert!(result.is_ok());
        assert_eq!(
            queries,
            vec![
                QueryRequest::new(0, 2),
                QueryRequest::new(-1, 2),
                QueryRequest::new(1, 2)
            ]
        );
    }

    #[tokio::test]
    async fn non_integer_token_is_an_error() {
        let (result, batches) = collect("0 1\n2 x\n3 4\n", 10).await;
        let queries: Vec<QueryRequest> = batches.into_iter().flatten().collect();

        // Queries before the bad token are still forwarded.
        assert_eq!(queries, vec![QueryRequest::new(0, 1)]);
        match result {
            Err(Error::MalformedQuery(message)) => {
                assert!(message.contains("line 2"));
                assert!(message.contains("'x'"));
            }
            other => panic!("Expected MalformedQuery, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn batches_respect_batch_size() {
        let (_, batches) = collect("0 1 1 2 2 3\n", 2).await;

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1], vec![QueryRequest::new(2, 3)]);
    }

    #[tokio::test]
    async fn dangling_vertex_is_an_error() {
        let (result, batches) = collect("0 1 5", 10).await;
        let queries: Vec<QueryRequest> = batches.into_iter().flatten().collect();

        assert_eq!(queries, vec![QueryRequest::new(0, 1)]);
        assert!(matches!(result, Err(Error::MalformedQuery(_))));
    }
}
