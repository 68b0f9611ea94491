//! Tree induction.
//!
//! - [`TreeGrower`] / [`fit`]: breadth-first induction engine
//! - [`TreeParams`]: induction limits, validated by [`ConfigError`]
//! - [`SplitStrategy`]: pluggable split search, with [`GreedySplitter`] and
//!   [`RandomSplitter`]
//!
//! The remaining modules hold the engine's internal bookkeeping: the pending
//! node queue, the shared instance-index buffer and feature subsampling.

mod grower;
mod params;
pub mod partition;
pub mod pending;
pub mod sampling;
pub mod split;

pub use grower::{GrowError, GrowStats, TreeGrower, fit};
pub use params::{ConfigError, TreeParams};
pub use split::{GreedySplitter, RandomSplitter, SplitContext, SplitStrategy};

// Split predicates live with the tree representation
pub use crate::repr::{SplitRule, ThresholdSplit};
