//! How the grower and the predictor see data.
//!
//! - [`SampleAccessor`]: one feature vector
//! - [`DataAccessor`]: a batch of feature vectors, no responses
//! - [`TrainingData`]: features plus one response per instance
//!
//! Prediction only needs [`DataAccessor`], so responses are never required
//! at inference time.
//!
//! ```
//! use rftree::data::SampleAccessor;
//!
//! let features: &[f32] = &[0.5, 1.5, 3.0];
//! assert_eq!(features.feature(2), 3.0);
//! assert_eq!(features.n_features(), 3);
//! ```

use ndarray::{ArrayView1, ArrayView2};

// =============================================================================
// SampleAccessor Trait
// =============================================================================

/// A single feature vector, as routed through a tree.
///
/// Plain `[f32]` slices and arrays implement it, so callers can predict
/// without building a dataset.
pub trait SampleAccessor {
    /// Value of feature `index`.
    fn feature(&self, index: usize) -> f32;

    /// Length of the vector.
    fn n_features(&self) -> usize;
}

impl SampleAccessor for [f32] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

// Enables &[0.5f32, 1.0] syntax
impl<const N: usize> SampleAccessor for [f32; N] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        N
    }
}

impl<T: SampleAccessor + ?Sized> SampleAccessor for &T {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        (**self).feature(index)
    }

    #[inline]
    fn n_features(&self) -> usize {
        (**self).n_features()
    }
}

// May be contiguous or strided
impl SampleAccessor for ArrayView1<'_, f32> {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

// =============================================================================
// DataAccessor Trait
// =============================================================================

/// A batch of feature vectors.
///
/// Implemented for sample-major `ArrayView2<f32>` (`[n_samples, n_features]`)
/// and for [`Dataset`](super::Dataset). Responses, if the type has any, are
/// not visible through this trait.
pub trait DataAccessor {
    /// View of one instance.
    type Sample<'a>: SampleAccessor
    where
        Self: 'a;

    /// Instance `index`, in input order.
    fn sample(&self, index: usize) -> Self::Sample<'_>;

    fn n_samples(&self) -> usize;

    fn n_features(&self) -> usize;
}

impl DataAccessor for ArrayView2<'_, f32> {
    type Sample<'a>
        = ArrayView1<'a, f32>
    where
        Self: 'a;

    #[inline]
    fn sample(&self, index: usize) -> Self::Sample<'_> {
        self.row(index)
    }

    #[inline]
    fn n_samples(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.ncols()
    }
}

// =============================================================================
// TrainingData Trait
// =============================================================================

/// Read-only training data: features plus one scalar response per instance.
///
/// Must stay unchanged for the duration of one `grow` call.
pub trait TrainingData {
    /// Number of features per instance.
    fn n_features(&self) -> usize;

    /// Number of instances.
    fn n_samples(&self) -> usize;

    /// Response value of an instance.
    fn response(&self, sample: usize) -> f32;

    /// Value of one feature of one instance.
    fn feature_value(&self, sample: usize, feature: usize) -> f32;
}
