//! rftree: randomized k-ary regression trees for Rust.
//!
//! Grows single regression trees with a fixed branching factor `K`, the
//! building block of random-forest surrogate models.
//!
//! # Key Types
//!
//! - [`TreeGrower`] / [`TreeParams`] - Tree induction and its limits
//! - [`GreedySplitter`] / [`RandomSplitter`] - Split strategies
//! - [`Tree`] - Finalized tree (node array plus retained leaf samples)
//! - [`Predictor`] - Single-vector and batch prediction
//! - [`Dataset`] - Dense training data
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use rftree::{Dataset, GreedySplitter, Parallelism, Predictor, TreeGrower, TreeParams};
//!
//! let features = vec![0.0, 0.0, 1.0, 0.0, 2.0, 1.0, 3.0, 1.0];
//! let targets = vec![1.0, 1.0, 5.0, 5.0];
//! let dataset = Dataset::from_vec(features, 4, 2, targets).unwrap();
//!
//! let params = TreeParams::builder().max_features(1).build().unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let tree = TreeGrower::<2, _>::new(params, GreedySplitter::new())
//!     .grow(&dataset, &mut rng)
//!     .unwrap();
//!
//! let predictions = Predictor::new(&tree)
//!     .predict(&dataset, Parallelism::Sequential)
//!     .unwrap();
//! assert_eq!(predictions.len(), 4);
//! ```

pub mod data;
pub mod inference;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{DataAccessor, Dataset, DatasetError, SampleAccessor, TrainingData};
pub use inference::{PredictError, Predictor};
pub use repr::{LeafStats, Node, NodeId, NodeKind, Tree, TreeValidationError};
pub use training::{
    ConfigError, GreedySplitter, GrowError, GrowStats, RandomSplitter, SplitRule,
    SplitStrategy, ThresholdSplit, TreeGrower, TreeParams, fit,
};
pub use utils::Parallelism;
