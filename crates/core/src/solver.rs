use super::distance::DistanceTable;
use super::graph::PeriodicGraph;
use super::queue::{Prioritized, PriorityQueue};
use super::traits::PathSolver;
use common::{error::Error, types::PeriodicPath};
use tracing::{debug, trace};

/// Node of the time-expanded search space.
///
/// `step` is the raw hop count, so `path.len() == step + 1` always holds;
/// only `step % period` matters for weight lookup and the distance table.
#[derive(Debug, Clone)]
struct SearchState {
    vertex: usize,
    step: usize,
    distance: u64,
    path: Vec<usize>,
}

impl SearchState {
    fn initial(start: usize) -> Self {
        Self {
            vertex: start,
            step: 0,
            distance: 0,
            path: vec![start],
        }
    }

    /// The state reached by taking one more hop to `target`.
    fn extend(&self, target: usize, distance: u64) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(target);

        Self {
            vertex: target,
            step: self.step + 1,
            distance,
            path,
        }
    }

    fn into_path(self) -> PeriodicPath {
        PeriodicPath {
            vertices: self.path,
            distance: self.distance,
        }
    }
}

impl Prioritized for SearchState {
    fn priority(&self) -> u64 {
        self.distance
    }
}

/// Dijkstra's algorithm over `(vertex, step mod period)` states.
///
/// A plain per-vertex Dijkstra is wrong for periodic weights: the cheapest
/// way to continue from a vertex depends on the phase it was reached in, so
/// a detour that arrives later (or loops back) can beat the first arrival.
/// Expanding the state space by phase restores the greedy-choice property.
///
/// Stale queue entries are skipped on extraction rather than removed, and
/// the first extracted state at `end` is optimal because all weights are
/// non-negative.
pub struct TimeExpandedDijkstra;

impl TimeExpandedDijkstra {
    fn check_vertex(graph: &PeriodicGraph, vertex: usize) -> Result<(), Error> {
        if graph.contains(vertex) {
            Ok(())
        } else {
            Err(Error::InvalidQuery {
                vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                num_vertices: graph.num_vertices(),
            })
        }
    }
}

impl PathSolver for TimeExpandedDijkstra {
    /// Finds the cheapest walk, of any length, from `start` to `end`.
    ///
    /// # Complexity
    /// O(E · P · log(V · P)) time; the queue may hold one entry per improving
    /// relaxation.
    fn find_shortest_path(
        &self,
        graph: &PeriodicGraph,
        start: usize,
        end: usize,
    ) -> Result<Option<PeriodicPath>, Error> {
        Self::check_vertex(graph, start)?;
        Self::check_vertex(graph, end)?;

        let period = graph.period();
        let mut distances = DistanceTable::new(graph.num_vertices(), period);
        let mut queue = PriorityQueue::with_capacity(graph.num_vertices() * period);

        distances.relax(start, 0, 0);
        queue.insert(SearchState::initial(start));

        let mut expanded = 0usize;
        let mut discarded = 0usize;

        while let Some(current) = queue.extract_min() {
            if !distances.is_current(current.vertex, current.step, current.distance) {
                trace!(
                    vertex = current.vertex,
                    step = current.step,
                    distance = current.distance,
                    "discarding stale state"
                );
                discarded += 1;
                continue;
            }

            if current.vertex == end {
                debug!(
                    start,
                    end,
                    distance = current.distance,
                    hops = current.step,
                    expanded,
                    discarded,
                    "path found"
                );
                return Ok(Some(current.into_path()));
            }

            expanded += 1;
            let next_step = current.step + 1;

            for edge in graph.neighbors(current.vertex) {
                let cost = u64::from(edge.weights.weight_at(current.step));
                let candidate = current.distance.saturating_add(cost);

                if distances.relax(edge.target, next_step, candidate) {
                    queue.insert(current.extend(edge.target, candidate));
                }
            }
        }

        debug!(start, end, expanded, discarded, "search space exhausted, no path");
        Ok(None)
    }
}
