use std::path::PathBuf;
use tokio::sync::mpsc::Sender;
use tracing::warn;

use super::error::Error;
use common::{
    error::Error as PathError,
    types::{PeriodicPath, Query},
};

/// A trait defining the contract for any source that generates and streams
/// queries into the main processing pipeline.
///
/// This decouples the Producer task from the concrete input (standard input,
/// a CSV file, or simulated load).
///
/// The trait bounds (`Send`, `Sync`, `'static`) let implementations run on
/// the multi-threaded Tokio runtime.
#[async_trait::async_trait]
pub trait QueryStreamer: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<Vec<QueryRequest>>) -> Result<(), Error>;
}

/// A query as read from input, before its endpoints are checked against the graph.
///
/// Endpoints are signed so a negative id is a per-query failure rather than
/// a parse error that ends the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    pub start: i64,
    pub end: i64,
}

impl QueryRequest {
    pub fn new(start: i64, end: i64) -> Self {
        QueryRequest { start, end }
    }

    /// Converts to a solver query. Negative endpoints are rejected with
    /// `InvalidQuery`; the upper bound is left to the solver.
    pub fn resolve(&self, num_vertices: usize) -> Result<Query, PathError> {
        let endpoint = |vertex: i64| {
            usize::try_from(vertex).map_err(|_| PathError::InvalidQuery {
                vertex,
                num_vertices,
            })
        };
        Ok(Query::new(endpoint(self.start)?, endpoint(self.end)?))
    }
}

/// Result of one query, kept next to the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub query: QueryRequest,
    pub result: Result<Option<PeriodicPath>, PathError>,
}

/// Where queries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    STDIN,
    CSV(PathBuf),
    SIM,
}

pub type JoinHandleResult = tokio::task::JoinHandle<Result<(), Error>>;

/// Sends the pending batch, leaving `batch` empty. Returns how many queries went out.
pub async fn send_batch(
    sender: &Sender<Vec<QueryRequest>>,
    batch: &mut Vec<QueryRequest>,
    source: &str,
) -> Result<usize, Error> {
    if batch.is_empty() {
        return Ok(0);
    }
    let size = batch.len();
    sender.send(std::mem::take(batch)).await.map_err(|e| {
        warn!("{}: receiver dropped during send: {}", source, e);
        Error::ChannelSendFailed
    })?;
    Ok(size)
}
