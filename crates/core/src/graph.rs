use common::error::{EdgeRejection, Error};
use common::types::{EdgeRecord, WeightCycle};

/// Outgoing edge stored in its source vertex's adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub target: usize,
    pub weights: WeightCycle,
}

/// Directed graph whose edge costs repeat with a graph-wide period.
///
/// Each vertex owns a growable list of outgoing edges:
/// - `adjacency[u]` -> edges leaving `u`, in insertion order
/// - every edge's `weights` has exactly `period` entries
///
/// Multi-edges between the same pair of vertices are allowed. The graph is
/// built incrementally and only read during searches, so it can be shared
/// behind an `Arc` by concurrent queries.
#[derive(Debug, Clone)]
pub struct PeriodicGraph {
    num_vertices: usize,
    period: usize,
    num_edges: usize,
    adjacency: Vec<Vec<Edge>>,
}

impl PeriodicGraph {
    /// Creates an empty graph with vertices `0..num_vertices`.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `num_vertices` or `period` is zero.
    pub fn new(num_vertices: usize, period: usize) -> Result<Self, Error> {
        if num_vertices == 0 || period == 0 {
            return Err(Error::InvalidConfig {
                num_vertices,
                period,
            });
        }

        Ok(Self {
            num_vertices,
            period,
            num_edges: 0,
            adjacency: vec![Vec::new(); num_vertices],
        })
    }

    /// Builds a graph from `(source, target, weights)` records.
    ///
    /// Stops at the first rejected record; no partial graph is returned.
    pub fn from_edges(
        num_vertices: usize,
        period: usize,
        edges: impl IntoIterator<Item = EdgeRecord>,
    ) -> Result<Self, Error> {
        let mut graph = Self::new(num_vertices, period)?;
        for (source, target, weights) in edges {
            graph.add_edge(source, target, weights)?;
        }
        Ok(graph)
    }

    /// Appends a directed edge `source -> target`.
    ///
    /// # Errors
    /// Returns `Error::InvalidEdge` if either endpoint is out of range or
    /// `weights` does not have exactly `period` entries. A rejected insertion
    /// leaves the graph untouched.
    pub fn add_edge(
        &mut self,
        source: usize,
        target: usize,
        weights: impl Into<WeightCycle>,
    ) -> Result<(), Error> {
        if source >= self.num_vertices {
            return Err(Error::InvalidEdge(EdgeRejection::SourceOutOfRange(source)));
        }
        if target >= self.num_vertices {
            return Err(Error::InvalidEdge(EdgeRejection::TargetOutOfRange(target)));
        }

        let weights = weights.into();
        if weights.len() != self.period {
            return Err(Error::InvalidEdge(EdgeRejection::PeriodMismatch {
                expected: self.period,
                actual: weights.len(),
            }));
        }

        self.adjacency[source].push(Edge { target, weights });
        self.num_edges += 1;
        Ok(())
    }

    /// Outgoing edges of `vertex`; empty for a vertex outside the graph.
    pub fn neighbors(&self, vertex: usize) -> std::slice::Iter<'_, Edge> {
        self.adjacency
            .get(vertex)
            .map(|edges| edges.iter())
            .unwrap_or_default()
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn contains(&self, vertex: usize) -> bool {
        vertex < self.num_vertices
    }

    /// Prices an explicit walk, charging hop `i` at phase `i % period`.
    ///
    /// When several parallel edges connect a hop, the cheapest one at that
    /// phase is used. Returns `None` if some hop has no edge.
    pub fn walk_cost(&self, walk: &[usize]) -> Option<u64> {
        walk.windows(2)
            .enumerate()
            .try_fold(0u64, |total, (step, hop)| {
                let cost = self
                    .neighbors(hop[0])
                    .filter(|edge| edge.target == hop[1])
                    .map(|edge| edge.weights.weight_at(step))
                    .min()?;
                Some(total.saturating_add(u64::from(cost)))
            })
    }
}
