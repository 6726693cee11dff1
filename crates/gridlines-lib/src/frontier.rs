use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::position::Position;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A discovered cell waiting to be expanded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub(crate) position: Position,
    /// gScore at insertion time, used to recognise stale entries.
    pub(crate) cost: FloatOrd,
    pub(crate) estimate: FloatOrd,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by (fScore, insertion order).
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set of an A* search. A cell may be present several times; callers
/// discard entries whose cost no longer matches the best known gScore.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, position: Position, cost: f64, estimate: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            position,
            cost: FloatOrd(cost),
            estimate: FloatOrd(estimate),
            sequence,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_estimate_first() {
        let mut frontier = Frontier::new();
        frontier.push(Position::new(0, 0), 0.0, 9.0);
        frontier.push(Position::new(1, 0), 1.0, 3.5);
        frontier.push(Position::new(2, 0), 2.0, 7.0);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.position.x)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn ties_break_in_insertion_order() {
        let mut frontier = Frontier::new();
        for x in 0..5 {
            frontier.push(Position::new(x, 0), 0.0, 4.0);
        }

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.position.x)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn keeps_duplicate_cells() {
        let mut frontier = Frontier::new();
        frontier.push(Position::new(3, 3), 5.0, 10.0);
        frontier.push(Position::new(3, 3), 4.0, 9.0);
        assert_eq!(frontier.len(), 2);

        let first = frontier.pop().expect("entry");
        assert_eq!(first.cost.0, 4.0);
    }
}
