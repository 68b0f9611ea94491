//! Prediction with finalized trees.
//!
//! [`Predictor`] routes feature vectors from the root to a leaf and returns
//! the leaf's response statistics, one vector at a time or for a whole
//! dataset.

mod predictor;

pub use predictor::{PredictError, Predictor};
