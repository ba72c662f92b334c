pub mod distance;
pub mod graph;
pub mod queue;
pub mod solver;
pub mod traits;

pub use graph::{Edge, PeriodicGraph};
pub use solver::TimeExpandedDijkstra;
pub use traits::PathSolver;
