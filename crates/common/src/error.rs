use thiserror::Error;

/// Reason an edge insertion was refused by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EdgeRejection {
    /// The source vertex is not in `0..num_vertices`.
    #[error("source vertex {0} is out of range")]
    SourceOutOfRange(usize),

    /// The target vertex is not in `0..num_vertices`.
    #[error("target vertex {0} is out of range")]
    TargetOutOfRange(usize),

    /// The weight cycle does not have exactly `period` entries.
    #[error("weight cycle has {actual} entries but the graph period is {expected}")]
    PeriodMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Graph construction parameters are unusable (zero vertices or zero period).
    #[error("Invalid graph configuration: {num_vertices} vertices, period {period}.")]
    InvalidConfig { num_vertices: usize, period: usize },

    /// A single edge insertion was rejected; the graph itself stays usable.
    #[error("Edge rejected: {0}.")]
    InvalidEdge(EdgeRejection),

    /// A query endpoint lies outside the graph. Signed, so that negative ids
    /// read from input are reported the same way as ids past the end.
    #[error("Query vertex {vertex} is out of bounds for a graph of {num_vertices} vertices.")]
    InvalidQuery { vertex: i64, num_vertices: usize },
}
