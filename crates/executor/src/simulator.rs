use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{QueryRequest, QueryStreamer};

/// Produces random queries for load testing.
///
/// Endpoints are drawn uniformly from `0..total_vertices` with a seeded
/// generator, so a run is reproducible for a given seed.
pub struct SimulatorStreamer {
    pub total_vertices: usize, // vertices in the loaded graph
    pub batch_size: usize,     // number of queries per batch
    pub query_count: usize,    // total queries to emit
    pub seed: u64,
}

impl SimulatorStreamer {
    pub fn new(config: &SimulatorConfig, total_vertices: usize, batch_size: usize) -> Self {
        SimulatorStreamer {
            total_vertices,
            batch_size,
            query_count: config.query_count,
            seed: config.seed,
        }
    }
}

#[async_trait]
impl QueryStreamer for SimulatorStreamer {
    /// Sends `query_count` random queries in batches of `batch_size`.
    ///
    /// Backpressure is handled by awaiting on `sender.send()`. Exits with an
    /// error if the receiver is dropped.
    async fn run_stream(self, sender: Sender<Vec<QueryRequest>>) -> Result<(), Error> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let vertex_range = 0..i64::try_from(self.total_vertices).unwrap_or(i64::MAX);
        let mut remaining = self.query_count;

        while remaining > 0 {
            let size = remaining.min(self.batch_size);

            let queries: Vec<QueryRequest> = (0..size)
                .map(|_| {
                    let start = rng.random_range(vertex_range.clone());
                    let end = rng.random_range(vertex_range.clone());
                    QueryRequest::new(start, end)
                })
                .collect();

            if sender.send(queries).await.is_err() {
                warn!("Simulator shutting down: Runner receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
            remaining -= size;
        }

        info!("Simulator sent {} queries.", self.query_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn simulator(query_count: usize, batch_size: usize, seed: u64) -> SimulatorStreamer {
        let config = SimulatorConfig { query_count, seed };
        SimulatorStreamer::new(&config, 10, batch_size)
    }

    async fn drain(sim: SimulatorStreamer) -> Vec<Vec<QueryRequest>> {
        let (tx, mut rx) = mpsc::channel(100);
        sim.run_stream(tx).await.expect("simulation failed");

        let mut batches = Vec::new();
        while let Some(batch) = rx.recv().await {
            batches.push(batch);
        }
        batches
    }

    #[test]
    fn test_simulator_creation() {
        let sim = simulator(25, 5, 7);
        assert_eq!(sim.total_vertices, 10);
        assert_eq!(sim.batch_size, 5);
        assert_eq!(sim.query_count, 25);
    }

    #[tokio::test]
    async fn test_batches_cover_query_count() {
        let batches = drain(simulator(12, 5, 1)).await;

        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[tokio::test]
    async fn test_vertices_in_bounds() {
        let batches = drain(simulator(200, 50, 3)).await;

        for q in batches.into_iter().flatten() {
            assert!(q.start < 10, "start vertex out of bounds");
            assert!(q.end < 10, "end vertex out of bounds");
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_queries() {
        let first = drain(simulator(30, 7, 99)).await;
        let second = drain(simulator(30, 7, 99)).await;
        assert_eq!(first, second);
    }
}
