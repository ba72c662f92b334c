use std::io::Write;
use tokio::sync::mpsc::Receiver;
use tracing::{info, warn};

use super::config::OutputConfig;
use super::error::Error;
use super::types::QueryOutcome;

/// Counts of each outcome kind written so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub found: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Renders query outcomes, one line per query.
///
/// - path found: vertices space-separated, e.g. `0 1 2`
/// - no path: the configured message
/// - rejected query: `error: <reason>`; later queries are still answered
pub struct ResultWriter<W: Write> {
    out: W,
    output: OutputConfig,
    receiver: Receiver<Vec<QueryOutcome>>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W, output: OutputConfig, receiver: Receiver<Vec<QueryOutcome>>) -> Self {
        Self {
            out,
            output,
            receiver,
        }
    }

    /// Writes outcome batches until the runner closes the channel.
    ///
    /// Output is flushed after each batch.
    pub async fn process_outcomes(mut self) -> Result<WriteSummary, Error> {
        info!("Writer ready.");
        let mut summary = WriteSummary::default();

        while let Some(outcomes) = self.receiver.recv().await {
            for outcome in &outcomes {
                self.write_outcome(outcome, &mut summary)?;
            }
            self.out.flush()?;
        }

        info!(
            found = summary.found,
            missing = summary.missing,
            failed = summary.failed,
            "Receiver closed, shutting down writer."
        );
        Ok(summary)
    }

    fn write_outcome(
        &mut self,
        outcome: &QueryOutcome,
        summary: &mut WriteSummary,
    ) -> Result<(), Error> {
        match &outcome.result {
            Ok(Some(path)) => {
                summary.found += 1;
                if self.output.print_distance {
                    writeln!(self.out, "{} (distance {})", path, path.distance)?;
                } else {
                    writeln!(self.out, "{}", path)?;
                }
            }
            Ok(None) => {
                summary.missing += 1;
                writeln!(self.out, "{}", self.output.no_path_message)?;
            }
            Err(e) => {
                summary.failed += 1;
                warn!(
                    start = outcome.query.start,
                    end = outcome.query.end,
                    "Query rejected: {}",
                    e
                );
                writeln!(self.out, "error: {}", e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error as PathError;
    use crate::types::QueryRequest;
    use common::types::PeriodicPath;
    use tokio::sync::mpsc;

    fn output_config(print_distance: bool) -> OutputConfig {
        OutputConfig {
            print_distance,
            no_path_message: "No path found".to_string(),
        }
    }

    fn sample_outcomes() -> Vec<QueryOutcome> {
        vec![
            QueryOutcome {
                query: QueryRequest::new(0, 2),
                result: Ok(Some(PeriodicPath {
                    vertices: vec![0, 1, 2],
                    distance: 3,
                })),
            },
            QueryOutcome {
                query: QueryRequest::new(2, 0),
                result: Ok(None),
            },
            QueryOutcome {
                query: QueryRequest::new(-3, 0),
                result: Err(PathError::InvalidQuery {
                    vertex: -3,
                    num_vertices: 3,
                }),
            },
        ]
    }

    async fn render(print_distance: bool) -> (String, WriteSummary) {
        let (tx, rx) = mpsc::channel(2);
        tx.send(sample_outcomes()).await.unwrap();
        drop(tx);

        let mut buffer = Vec::new();
        let writer = ResultWriter::new(&mut buffer, output_config(print_distance), rx);
        let summary = writer.process_outcomes().await.unwrap();

        (String::from_utf8(buffer).unwrap(), summary)
    }

    #[tokio::test]
    async fn renders_one_line_per_outcome() {
        let (text, summary) = render(false).await;

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0 1 2");
        assert_eq!(lines[1], "No path found");
        assert!(lines[2].starts_with("error: "));
        assert_eq!(lines.len(), 3);

        assert_eq!(
            summary,
            WriteSummary {
                found: 1,
                missing: 1,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn distance_suffix_when_enabled() {
        let (text, _) = render(true).await;
        assert_eq!(text.lines().next(), Some("0 1 2 (distance 3)"));
    }
}
