use super::graph::PeriodicGraph;
use common::{
    error::Error,
    types::{PeriodicPath, Query},
};

/// Trait for solvers answering shortest path queries on a periodic graph.
pub trait PathSolver {
    /// Finds the cheapest walk from `start` to `end`.
    ///
    /// Returns `Ok(Some(path))` if `end` is reachable,
    /// `Ok(None)` if the search space is exhausted first, or
    /// `Err(Error::InvalidQuery)` if an endpoint is outside the graph.
    fn find_shortest_path(
        &self,
        graph: &PeriodicGraph,
        start: usize,
        end: usize,
    ) -> Result<Option<PeriodicPath>, Error>;

    /// Answers each query independently; a failing query does not abort the rest.
    fn find_all(
        &self,
        graph: &PeriodicGraph,
        queries: &[Query],
    ) -> Vec<Result<Option<PeriodicPath>, Error>> {
        queries
            .iter()
            .map(|q| self.find_shortest_path(graph, q.start, q.end))
            .collect()
    }
}
