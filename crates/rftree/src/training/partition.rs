//! Sample partitioning for tree induction.
//!
//! Manages instance indices per pending node, enabling k-way partitioning
//! when applying splits. Uses a single contiguous buffer with one range per
//! node to avoid per-node allocations.
//!
//! ```text
//! Initial (all instances at the root):
//!   indices: [0, 1, 2, 3, 4, 5, 6, 7]      root = 0..8
//!
//! After a 3-way split of the root (child slots 0, 1, 2 per instance:
//! 2 0 1 0 2 1 0 2):
//!   indices: [1, 3, 6, 2, 5, 0, 4, 7]      children = 0..3, 3..5, 5..8
//! ```
//!
//! Partitioning is stable, so instances keep their relative order inside
//! every child. After induction the buffer lists every instance exactly once,
//! grouped leaf by leaf.

use crate::data::TrainingData;
use crate::repr::SplitRule;

/// Manages instance indices during tree induction.
#[derive(Debug, Clone)]
pub struct SamplePartitioner {
    /// Instance indices, partitioned in place.
    indices: Box<[u32]>,
    /// Child slot per instance of the range being partitioned.
    slots: Vec<usize>,
    /// Reordering buffer.
    scratch: Vec<u32>,
}

impl SamplePartitioner {
    /// Create a partitioner holding instances `0..n_samples` in order.
    pub fn new(n_samples: usize) -> Self {
        Self {
            indices: (0..n_samples as u32).collect(),
            slots: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Instance indices of a range.
    #[inline]
    pub fn samples(&self, begin: u32, count: u32) -> &[u32] {
        let begin = begin as usize;
        &self.indices[begin..begin + count as usize]
    }

    /// The whole buffer.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Consume the partitioner and return its buffer.
    pub fn into_indices(self) -> Box<[u32]> {
        self.indices
    }

    /// Partition a range into `K` consecutive child ranges according to `split`.
    ///
    /// # Returns
    /// `(begin, count)` of every child range, in child-slot order. Ranges may
    /// be empty; together they cover the input range exactly.
    pub fn partition<const K: usize, S, D>(
        &mut self,
        begin: u32,
        count: u32,
        split: &S,
        data: &D,
    ) -> [(u32, u32); K]
    where
        S: SplitRule,
        D: TrainingData + ?Sized,
    {
        let start = begin as usize;
        let end = start + count as usize;
        let feature = split.feature();

        let mut counts = [0u32; K];
        self.slots.clear();
        for &sample in &self.indices[start..end] {
            let slot = split.child_for(data.feature_value(sample as usize, feature));
            debug_assert!(slot < K, "split routed to child slot {slot} of {K}");
            counts[slot] += 1;
            self.slots.push(slot);
        }

        let mut offsets = [0u32; K];
        let mut ranges = [(0u32, 0u32); K];
        let mut acc = 0u32;
        for k in 0..K {
            offsets[k] = acc;
            ranges[k] = (begin + acc, counts[k]);
            acc += counts[k];
        }

        self.scratch.clear();
        self.scratch.resize(count as usize, 0);
        for (&sample, &slot) in self.indices[start..end].iter().zip(&self.slots) {
            self.scratch[offsets[slot] as usize] = sample;
            offsets[slot] += 1;
        }
        self.indices[start..end].copy_from_slice(&self.scratch);

        ranges
    }
}
