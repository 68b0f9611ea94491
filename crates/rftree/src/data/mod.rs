//! Data access for training and prediction.
//!
//! - [`accessor`]: traits over single samples, feature-only datasets and training data
//! - [`dataset`]: dense in-memory [`Dataset`]

pub mod accessor;
pub mod dataset;

pub use accessor::{DataAccessor, SampleAccessor, TrainingData};
pub use dataset::{Dataset, DatasetError};
