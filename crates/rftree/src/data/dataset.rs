//! Dense in-memory dataset.
//!
//! [`Dataset`] owns a sample-major feature matrix (`[n_samples, n_features]`)
//! and one response per sample. It implements both [`TrainingData`] (for
//! growing trees) and [`DataAccessor`] (for prediction).

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::accessor::{DataAccessor, TrainingData};

/// Errors that can occur when constructing a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// Flat feature buffer does not match the requested shape.
    #[error("feature buffer has {got} values, expected {n_samples} x {n_features}")]
    ShapeMismatch {
        n_samples: usize,
        n_features: usize,
        got: usize,
    },

    /// Number of targets differs from the number of samples.
    #[error("targets length {got} does not match number of samples {expected}")]
    TargetsLenMismatch { expected: usize, got: usize },

    /// Dataset has no samples.
    #[error("dataset has no samples")]
    Empty,
}

/// Dense training data: sample-major features plus responses.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f32>,
    targets: Array1<f32>,
}

impl Dataset {
    /// Create a dataset from a `[n_samples, n_features]` matrix and targets.
    pub fn new(features: Array2<f32>, targets: Array1<f32>) -> Result<Self, DatasetError> {
        if features.nrows() == 0 {
            return Err(DatasetError::Empty);
        }
        if targets.len() != features.nrows() {
            return Err(DatasetError::TargetsLenMismatch {
                expected: features.nrows(),
                got: targets.len(),
            });
        }
        Ok(Self { features, targets })
    }

    /// Create a dataset from a flat row-major feature buffer.
    pub fn from_vec(
        features: Vec<f32>,
        n_samples: usize,
        n_features: usize,
        targets: Vec<f32>,
    ) -> Result<Self, DatasetError> {
        let got = features.len();
        let features = Array2::from_shape_vec((n_samples, n_features), features).map_err(|_| {
            DatasetError::ShapeMismatch {
                n_samples,
                n_features,
                got,
            }
        })?;
        Self::new(features, Array1::from(targets))
    }

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features per sample.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Sample-major feature matrix.
    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    /// Response values.
    #[inline]
    pub fn targets(&self) -> ArrayView1<'_, f32> {
        self.targets.view()
    }
}

impl TrainingData for Dataset {
    #[inline]
    fn n_features(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    #[inline]
    fn response(&self, sample: usize) -> f32 {
        self.targets[sample]
    }

    #[inline]
    fn feature_value(&self, sample: usize, feature: usize) -> f32 {
        self.features[[sample, feature]]
    }
}

impl DataAccessor for Dataset {
    type Sample<'a> = ArrayView1<'a, f32>;

    #[inline]
    fn sample(&self, index: usize) -> Self::Sample<'_> {
        self.features.row(index)
    }

    #[inline]
    fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleAccessor;

    #[test]
    fn from_vec_is_row_major() {
        let ds = Dataset::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2, vec![0.0, 1.0, 2.0])
            .unwrap();
        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.feature_value(1, 0), 3.0);
        assert_eq!(ds.feature_value(2, 1), 6.0);
        assert_eq!(ds.response(2), 2.0);
        assert_eq!(ds.sample(0).feature(1), 2.0);
    }

    #[test]
    fn rejects_bad_shape() {
        let err = Dataset::from_vec(vec![1.0, 2.0, 3.0], 2, 2, vec![0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::ShapeMismatch {
                n_samples: 2,
                n_features: 2,
                got: 3
            }
        );
    }

    #[test]
    fn rejects_target_mismatch() {
        let err = Dataset::from_vec(vec![1.0, 2.0], 2, 1, vec![0.0]).unwrap_err();
        assert_eq!(err, DatasetError::TargetsLenMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn rejects_empty() {
        let err = Dataset::from_vec(vec![], 0, 3, vec![]).unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }
}
