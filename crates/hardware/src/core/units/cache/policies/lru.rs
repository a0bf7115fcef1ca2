//! True Least Recently Used (LRU) replacement policy.
//!
//! Evicts the line in a set that has gone longest without an access. Each set
//! carries a usage stack of way indices: position 0 is the most recently used
//! way, the last position the least recently used. The stack is always a
//! permutation of `0..ways`, which is exactly the per-line rank view (a way's
//! rank is its stack position) read off in rank order.
//!
//! A set that has never been touched holds the initial stack `[0, 1, ..., W-1]`,
//! so cold fills consume ways from the highest index down and an invalid way
//! is always chosen before any valid line is evicted.
//!
//! # Performance
//!
//! - `update()`: O(W) where W is the associativity.
//! - `get_victim()`: O(1).

use super::ReplacementPolicy;

/// LRU policy state.
#[derive(Debug)]
pub struct LruPolicy {
    /// One usage stack per set; front is MRU, back is LRU.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        let mut usage = Vec::with_capacity(sets);
        for _ in 0..sets {
            usage.push((0..ways).collect());
        }
        Self { usage }
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Promotes the accessed way to the MRU position.
    ///
    /// Ways that were more recent than the accessed one shift back one
    /// position; ways that were already older keep their order.
    fn update(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        stack.retain(|&w| w != way);
        stack.insert(0, way);
    }

    /// Returns the way at the bottom of the usage stack.
    fn get_victim(&mut self, set: usize) -> usize {
        let stack = &self.usage[set];
        stack[stack.len() - 1]
    }
}
