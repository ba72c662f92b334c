use std::fmt;

/// Fixed-length cycle of per-phase traversal costs attached to one edge.
///
/// The length of the cycle is the graph period `P`. When an edge is taken
/// after `step` earlier hops, the cost charged is `weights[step % P]`.
///
/// Example:
/// ```text
/// weights = [1, 5], P = 2
/// step 0 -> 1, step 1 -> 5, step 2 -> 1, ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightCycle {
    weights: Box<[u32]>,
}

impl WeightCycle {
    pub fn new(weights: impl Into<Box<[u32]>>) -> Self {
        WeightCycle {
            weights: weights.into(),
        }
    }

    /// Number of phases in the cycle.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cost of traversing the edge when departing after `step` hops.
    ///
    /// # Panics
    /// Panics on an empty cycle; the graph never stores one.
    pub fn weight_at(&self, step: usize) -> u32 {
        self.weights[step % self.weights.len()]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.weights
    }
}

impl From<Vec<u32>> for WeightCycle {
    fn from(weights: Vec<u32>) -> Self {
        WeightCycle::new(weights)
    }
}

/// Shortest walk found by a solver.
///
/// Fields:
/// - `vertices`: the walk from start to end, both inclusive. Vertices may repeat
///   when waiting out an expensive phase is cheaper than going direct.
/// - `distance`: total cost, summing `weights[step % P]` over every hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicPath {
    pub vertices: Vec<usize>,
    pub distance: u64,
}

impl PeriodicPath {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<usize> {
        self.vertices.first().copied()
    }

    pub fn end(&self) -> Option<usize> {
        self.vertices.last().copied()
    }
}

/// Renders the vertex sequence space-separated, e.g. `0 1 2`.
impl fmt::Display for PeriodicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.vertices.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for v in iter {
                write!(f, " {}", v)?;
            }
        }
        Ok(())
    }
}

/// A single (start, end) shortest path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub start: usize,
    pub end: usize,
}

impl Query {
    pub fn new(start: usize, end: usize) -> Self {
        Query { start, end }
    }
}

/// Type alias for a raw edge record: (source, target, weight cycle)
pub type EdgeRecord = (usize, usize, Vec<u32>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_cycle_wraps_by_period() {
        let cycle = WeightCycle::from(vec![1, 5, 7]);
        assert_eq!(cycle.len(), 3);
        assert_eq!(cycle.weight_at(0), 1);
        assert_eq!(cycle.weight_at(2), 7);
        assert_eq!(cycle.weight_at(3), 1);
        assert_eq!(cycle.weight_at(10), 5);
    }

    #[test]
    fn path_display_is_space_separated() {
        let path = PeriodicPath {
            vertices: vec![0, 1, 2],
            distance: 3,
        };
        assert_eq!(path.to_string(), "0 1 2");
        assert_eq!(path.hops(), 2);
        assert_eq!(path.start(), Some(0));
        assert_eq!(path.end(), Some(2));
    }

    #[test]
    fn trivial_path_has_no_hops() {
        let path = PeriodicPath {
            vertices: vec![4],
            distance: 0,
        };
        assert_eq!(path.to_string(), "4");
        assert_eq!(path.hops(), 0);
    }
}
