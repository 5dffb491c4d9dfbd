//! Weighted Sampling
//!
//! Cumulative-weight table over distinct candidates. Sampling is a
//! single uniform draw over the total weight followed by a binary
//! search, which is distribution-identical to expanding each candidate
//! into `weight` duplicate entries and picking one uniformly.

use rand::Rng;

/// A cumulative-weight table built once per selection.
#[derive(Debug, Clone, Default)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    cumulative: Vec<u64>,
    total: u64,
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cumulative: Vec::new(),
            total: 0,
        }
    }

    /// Adds a candidate. Zero-weight candidates are unselectable and
    /// are not stored.
    pub fn push(&mut self, item: T, weight: u32) {
        if weight == 0 {
            return;
        }
        self.total += u64::from(weight);
        self.items.push(item);
        self.cumulative.push(self.total);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Draws one candidate with probability proportional to its
    /// weight; `None` iff the table is empty. Consumes exactly one
    /// value from the RNG stream.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        let roll = rng.gen_range(0..self.total);
        let idx = self.cumulative.partition_point(|&c| c <= roll);
        self.items.get(idx)
    }
}
