//! Max-priority storage for regions, keyed by error.
//!
//! The adaptive driver only needs three things from its region store:
//! insert a region, take out the region with the largest error, and walk
//! every region once at the end. [`RegionQueue`] captures that contract.
//!
//! Two implementations are provided:
//! - [`RegionHeap`]: an array-backed binary max-heap
//! - `BinaryHeap<ByError>`: the standard library heap over an error-ordered
//!   wrapper
//!
//! Ties between equal errors are broken arbitrarily by both.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::region::Region;

/// A max-priority collection of regions ordered by `error`.
pub trait RegionQueue {
    /// Inserts a region in O(log n).
    fn push(&mut self, region: Region);

    /// Removes and returns the region with the largest error in O(log n).
    fn pop_max(&mut self) -> Option<Region>;

    /// Returns the region with the largest error without removing it.
    fn peek_max(&self) -> Option<&Region>;

    /// Number of stored regions.
    fn len(&self) -> usize;

    /// Returns true if no region is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every stored region once, in unspecified order.
    fn iter(&self) -> impl Iterator<Item = &Region>;
}

/// Binary max-heap of regions.
///
/// Node `i` has children `2i + 1` and `2i + 2` and parent `(i - 1) / 2`.
#[derive(Clone, Debug, Default)]
pub struct RegionHeap {
    nodes: Vec<Region>,
}

impl RegionHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for `capacity` regions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Consumes the heap, returning its regions in heap order.
    pub fn into_vec(self) -> Vec<Region> {
        self.nodes
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.nodes[idx].error <= self.nodes[parent].error {
                break;
            }
            self.nodes.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut largest = idx;

            if left < n && self.nodes[left].error > self.nodes[largest].error {
                largest = left;
            }
            if right < n && self.nodes[right].error > self.nodes[largest].error {
                largest = right;
            }
            if largest == idx {
                break;
            }
            self.nodes.swap(idx, largest);
            idx = largest;
        }
    }
}

impl RegionQueue for RegionHeap {
    fn push(&mut self, region: Region) {
        self.nodes.push(region);
        self.sift_up(self.nodes.len() - 1);
    }

    fn pop_max(&mut self) -> Option<Region> {
        if self.nodes.is_empty() {
            return None;
        }
        let top = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn peek_max(&self) -> Option<&Region> {
        self.nodes.first()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Region> {
        self.nodes.iter()
    }
}

impl FromIterator<Region> for RegionHeap {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);
        for region in iter {
            heap.push(region);
        }
        heap
    }
}

/// Region wrapper ordered by error, for use with [`BinaryHeap`].
///
/// `f64::total_cmp` keeps the order total even when an error is NaN.
#[derive(Clone, Copy, Debug)]
pub struct ByError(pub Region);

impl PartialEq for ByError {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByError {}

impl PartialOrd for ByError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByError {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.error.total_cmp(&other.0.error)
    }
}

impl RegionQueue for BinaryHeap<ByError> {
    fn push(&mut self, region: Region) {
        BinaryHeap::push(self, ByError(region));
    }

    fn pop_max(&mut self) -> Option<Region> {
        self.pop().map(|ByError(region)| region)
    }

    fn peek_max(&self) -> Option<&Region> {
        self.peek().map(|entry| &entry.0)
    }

    fn len(&self) -> usize {
        BinaryHeap::len(self)
    }

    fn iter(&self) -> impl Iterator<Item = &Region> {
        BinaryHeap::iter(self).map(|entry| &entry.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(error: f64) -> Region {
        Region {
            a: 0.0,
            b: 1.0,
            integral: error * 10.0,
            error,
        }
    }

    fn drain<Q: RegionQueue>(queue: &mut Q) -> Vec<f64> {
        let mut errors = Vec::new();
        while let Some(r) = queue.pop_max() {
            errors.push(r.error);
        }
        errors
    }

    #[test]
    fn test_heap_pops_in_descending_order() {
        let errors = [0.3, 5.0, 1.0, 0.0, 7.5, 2.2, 2.2, 0.9];
        let mut heap: RegionHeap = errors.iter().map(|&e| region(e)).collect();
        assert_eq!(heap.len(), errors.len());

        let popped = drain(&mut heap);
        assert_eq!(popped, vec![7.5, 5.0, 2.2, 2.2, 1.0, 0.9, 0.3, 0.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_heap_peek_matches_pop() {
        let mut heap = RegionHeap::new();
        assert!(heap.peek_max().is_none());
        assert!(heap.pop_max().is_none());

        heap.push(region(1.0));
        heap.push(region(4.0));
        heap.push(region(2.0));
        assert_eq!(heap.peek_max().map(|r| r.error), Some(4.0));
        assert_eq!(heap.pop_max().map(|r| r.error), Some(4.0));
        assert_eq!(heap.peek_max().map(|r| r.error), Some(2.0));
    }

    #[test]
    fn test_heap_interleaved_push_pop() {
        let mut heap = RegionHeap::new();
        heap.push(region(3.0));
        heap.push(region(1.0));
        assert_eq!(heap.pop_max().map(|r| r.error), Some(3.0));
        heap.push(region(2.0));
        heap.push(region(0.5));
        heap.push(region(6.0));
        assert_eq!(drain(&mut heap), vec![6.0, 2.0, 1.0, 0.5]);
    }

    #[test]
    fn test_iter_visits_every_region() {
        let heap: RegionHeap = (0..10).map(|i| region(f64::from(i))).collect();
        let total: f64 = heap.iter().map(|r| r.error).sum();
        assert_eq!(total, 45.0);
        assert_eq!(heap.into_vec().len(), 10);
    }

    #[test]
    fn test_binary_heap_agrees_with_region_heap() {
        let errors = [0.25, 9.0, 3.0, 3.5, 0.125, 8.0];
        let mut ours: RegionHeap = errors.iter().map(|&e| region(e)).collect();
        let mut std_heap: BinaryHeap<ByError> = BinaryHeap::new();
        for &e in &errors {
            RegionQueue::push(&mut std_heap, region(e));
        }

        assert_eq!(RegionQueue::len(&std_heap), errors.len());
        assert_eq!(drain(&mut ours), drain(&mut std_heap));
    }
}
