//! Binary min-heap used as the search frontier.
//!
//! The queue has no decrease-key. When a shorter distance to a state is
//! found, the solver inserts a fresh entry and leaves the old one in place;
//! stale entries are dropped when they surface (lazy deletion).

/// Items that can be ordered by the queue.
pub trait Prioritized {
    /// Smaller values are extracted first.
    fn priority(&self) -> u64;
}

#[derive(Debug)]
struct Entry<T> {
    priority: u64,
    sequence: u64,
    item: T,
}

impl<T> Entry<T> {
    /// Ties on priority are broken by insertion order, so extraction order
    /// is fully determined by the sequence of inserts.
    fn precedes(&self, other: &Self) -> bool {
        (self.priority, self.sequence) < (other.priority, other.sequence)
    }
}

/// Min-heap keyed on `(priority, insertion sequence)`.
///
/// Invariant: for every non-root index `i`, the entry at `(i - 1) / 2`
/// precedes or equals the entry at `i`.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    entries: Vec<Entry<T>>,
    next_sequence: u64,
}

impl<T: Prioritized> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Inserts `item`, doubling the backing storage when it is full.
    pub fn insert(&mut self, item: T) {
        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(1);
            self.entries.reserve_exact(additional);
        }

        let entry = Entry {
            priority: item.priority(),
            sequence: self.next_sequence,
            item,
        };
        self.next_sequence += 1;

        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes the item with the smallest priority, or `None` if empty.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }

        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min.item)
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|entry| &entry.item)
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.entries[node].precedes(&self.entries[parent]) {
                self.entries.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.entries[right].precedes(&self.entries[left]) {
                smallest = right;
            }

            if self.entries[smallest].precedes(&self.entries[node]) {
                self.entries.swap(node, smallest);
                node = smallest;
            } else {
                break;
            }
        }
    }

    #[cfg(test)]
    fn is_heap_ordered(&self) -> bool {
        (1..self.entries.len()).all(|i| !self.entries[i].precedes(&self.entries[(i - 1) / 2]))
    }
}

impl<T: Prioritized> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Job(u64, &'static str);

    impl Prioritized for Job {
        fn priority(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn extract_min_returns_ascending_priorities() {
        let mut queue = PriorityQueue::new();
        for p in [7, 3, 9, 1, 4, 1, 8] {
            queue.insert(Job(p, ""));
            assert!(queue.is_heap_ordered());
        }

        let mut popped = Vec::new();
        while let Some(job) = queue.extract_min() {
            assert!(queue.is_heap_ordered());
            popped.push(job.0);
        }
        assert_eq!(popped, vec![1, 1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn empty_queue_signals_none() {
        let mut queue: PriorityQueue<Job> = PriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn ties_come_out_in_insertion_order() {
        let mut queue = PriorityQueue::new();
        queue.insert(Job(2, "first"));
        queue.insert(Job(2, "second"));
        queue.insert(Job(1, "winner"));
        queue.insert(Job(2, "third"));

        let order: Vec<&str> = std::iter::from_fn(|| queue.extract_min())
            .map(|job| job.1)
            .collect();
        assert_eq!(order, vec!["winner", "first", "second", "third"]);
    }

    #[test]
    fn storage_grows_by_doubling() {
        let mut queue = PriorityQueue::with_capacity(2);
        assert!(queue.capacity() >= 2);

        for p in 0..3 {
            queue.insert(Job(p, ""));
        }
        assert!(queue.capacity() >= 4);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn zero_capacity_queue_accepts_inserts() {
        let mut queue = PriorityQueue::with_capacity(0);
        queue.insert(Job(5, "only"));
        assert_eq!(queue.peek(), Some(&Job(5, "only")));
        assert_eq!(queue.extract_min(), Some(Job(5, "only")));
        assert!(queue.is_empty());
    }
}
