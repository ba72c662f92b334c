use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

use super::{
    error::Error,
    types::{QueryOutcome, QueryRequest},
};
use periodic_path_core::{PeriodicGraph, traits::PathSolver};

/// Answers query batches against a shared, read-only graph.
///
/// The graph is never mutated after loading, so queries share it through an
/// `Arc` without locking. Each query owns its own distance table and queue.
pub struct QueryRunner<S> {
    solver: Arc<S>,
    graph: Arc<PeriodicGraph>,
    receiver: Receiver<Vec<QueryRequest>>,
    sender: Sender<Vec<QueryOutcome>>,
}

impl<S> QueryRunner<S>
where
    S: PathSolver + Send + Sync + 'static,
{
    pub fn new(
        graph: Arc<PeriodicGraph>,
        solver: S,
        receiver: Receiver<Vec<QueryRequest>>,
        sender: Sender<Vec<QueryOutcome>>,
    ) -> Self {
        QueryRunner {
            solver: Arc::new(solver),
            graph,
            receiver,
            sender,
        }
    }

    /// Consumes batches until the query channel closes.
    ///
    /// Outcomes are forwarded in the order the queries arrived.
    pub async fn run_queries(mut self) -> Result<(), Error> {
        info!("Query runner ready.");
        let mut answered = 0usize;

        while let Some(batch) = self.receiver.recv().await {
            let outcomes = self.answer_batch(batch).await?;
            answered += outcomes.len();

            if self.sender.send(outcomes).await.is_err() {
                warn!("Query runner shutting down: Writer receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        info!("Query stream closed after {} queries.", answered);
        Ok(())
    }

    /// Runs every query of the batch on the blocking pool concurrently.
    ///
    /// A request with a negative endpoint fails on its own with `InvalidQuery`.
    async fn answer_batch(&self, batch: Vec<QueryRequest>) -> Result<Vec<QueryOutcome>, Error> {
        debug!("Answering batch of {} queries.", batch.len());

        let handles: Vec<_> = batch
            .into_iter()
            .map(|query| {
                let graph = Arc::clone(&self.graph);
                let solver = Arc::clone(&self.solver);
                tokio::task::spawn_blocking(move || QueryOutcome {
                    query,
                    result: query.resolve(graph.num_vertices()).and_then(|resolved| {
                        solver.find_shortest_path(&graph, resolved.start, resolved.end)
                    }),
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await?);
        }
        Ok(outcomes)
    }
}
