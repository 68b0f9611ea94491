//! Split strategies.
//!
//! A [`SplitStrategy`] chooses the split predicate of a node from the node's
//! instances and a sampled feature subset. The induction engine then routes
//! every instance through the predicate to build the `K` child partitions,
//! so strategies never move instances themselves.
//!
//! Two strategies are provided:
//! - [`GreedySplitter`]: best k-way cut of each candidate feature by squared error
//! - [`RandomSplitter`]: uniformly random thresholds on one candidate feature
//!
//! The strategy is fixed when the grower is constructed:
//!
//! ```
//! use rftree::{RandomSplitter, TreeGrower, TreeParams};
//!
//! let grower = TreeGrower::<3, _>::new(TreeParams::default(), RandomSplitter);
//! ```

mod greedy;
mod random;

pub use greedy::GreedySplitter;
pub use random::RandomSplitter;

use rand::Rng;

use crate::data::TrainingData;
use crate::repr::SplitRule;

/// Inputs of one split search.
#[derive(Debug, Clone, Copy)]
pub struct SplitContext<'a> {
    /// Instances of the node being split.
    pub samples: &'a [u32],
    /// Candidate features, in sampling order.
    pub features: &'a [u32],
    /// Minimum instances per child for the split to be kept.
    pub min_samples_in_leaf: usize,
}

/// Strategy for choosing the split predicate of a node.
///
/// `K` is the branching factor of the tree being grown.
pub trait SplitStrategy<const K: usize> {
    /// Predicate stored in internal nodes.
    type Split: SplitRule;

    /// Find a split for the node described by `ctx`.
    ///
    /// Returns `None` if no candidate feature admits a `K`-way split; the
    /// node then becomes a leaf.
    fn find_split<D, R>(
        &mut self,
        data: &D,
        ctx: &SplitContext<'_>,
        rng: &mut R,
    ) -> Option<Self::Split>
    where
        D: TrainingData + ?Sized,
        R: Rng + ?Sized;
}
