/// Sentinel for a state that has not been reached yet.
pub const UNREACHED: u64 = u64::MAX;

/// Best known distance per time-expanded state `(vertex, step mod period)`.
///
/// Stored flat, row-major by vertex: cell `vertex * period + phase`.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    period: usize,
    cells: Vec<u64>,
}

impl DistanceTable {
    pub fn new(num_vertices: usize, period: usize) -> Self {
        Self {
            period,
            cells: vec![UNREACHED; num_vertices * period],
        }
    }

    fn index(&self, vertex: usize, step: usize) -> usize {
        vertex * self.period + step % self.period
    }

    /// Distance recorded for `vertex` at the phase of `step`.
    pub fn get(&self, vertex: usize, step: usize) -> u64 {
        self.cells[self.index(vertex, step)]
    }

    /// Records `candidate` if it strictly improves the cell. Returns whether it did.
    pub fn relax(&mut self, vertex: usize, step: usize, candidate: u64) -> bool {
        let idx = self.index(vertex, step);
        if candidate < self.cells[idx] {
            self.cells[idx] = candidate;
            true
        } else {
            false
        }
    }

    /// False once a shorter distance has been recorded for the cell.
    pub fn is_current(&self, vertex: usize, step: usize, distance: u64) -> bool {
        self.get(vertex, step) == distance
    }
}
