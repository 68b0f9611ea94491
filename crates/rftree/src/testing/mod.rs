//! Test utilities: deterministic synthetic data for tests and benchmarks.

pub mod data;

pub use data::{random_dense_f32, synthetic_dataset, synthetic_regression_targets_linear};
