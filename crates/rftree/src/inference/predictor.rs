//! Single-vector and batch prediction.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use rftree::{
//!     Dataset, Parallelism, Predictor, RandomSplitter, ThresholdSplit, Tree, TreeParams, fit,
//! };
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0];
//! let y = vec![0.0, 0.0, 4.0, 4.0];
//! let dataset = Dataset::from_vec(x, 4, 1, y).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
//! let tree: Tree<ThresholdSplit, 2> =
//!     fit(&dataset, TreeParams::default(), RandomSplitter, &mut rng).unwrap();
//!
//! let predictor = Predictor::new(&tree);
//! let single = predictor.predict_row(&[1.0f32]).unwrap();
//! let batch = predictor.predict(&dataset, Parallelism::Parallel).unwrap();
//! assert_eq!(batch[1], single);
//! ```
//!
//! Batch prediction has no state shared between instances. With
//! [`Parallelism::Parallel`] instances are spread over the current rayon
//! pool; the output order is always the input order.

use ndarray::{Array1, ArrayViewMut1};

use crate::Parallelism;
use crate::data::{DataAccessor, SampleAccessor};
use crate::repr::{LeafStats, NodeId, SplitRule, Tree};

/// Errors from checked prediction entry points. The tree is never modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// Input has a different number of features than the training data.
    #[error("expected {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// Output buffer length differs from the number of instances.
    #[error("output has length {got}, expected {expected}")]
    OutputLenMismatch { expected: usize, got: usize },
}

/// Read-only predictor over a finalized [`Tree`].
///
/// Cheap to create and `Sync`; any number of predictors may share a tree.
#[derive(Debug)]
pub struct Predictor<'t, S, const K: usize> {
    tree: &'t Tree<S, K>,
}

impl<S, const K: usize> Clone for Predictor<'_, S, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, const K: usize> Copy for Predictor<'_, S, K> {}

impl<'t, S: SplitRule, const K: usize> Predictor<'t, S, K> {
    /// Create a predictor for `tree`.
    #[inline]
    pub fn new(tree: &'t Tree<S, K>) -> Self {
        Self { tree }
    }

    /// The underlying tree.
    #[inline]
    pub fn tree(&self) -> &'t Tree<S, K> {
        self.tree
    }

    #[inline]
    fn check_features(&self, got: usize) -> Result<(), PredictError> {
        let expected = self.tree.n_features();
        if got != expected {
            return Err(PredictError::FeatureCountMismatch { expected, got });
        }
        Ok(())
    }

    #[inline]
    fn leaf_of<A: SampleAccessor + ?Sized>(&self, sample: &A) -> &'t LeafStats {
        let leaf = self.tree.traverse_to_leaf(sample);
        match self.tree.leaf_stats(leaf) {
            Some(stats) => stats,
            None => unreachable!("traversal ended at internal node {leaf}"),
        }
    }

    /// Leaf reached by one feature vector.
    pub fn predict_leaf<A: SampleAccessor + ?Sized>(
        &self,
        sample: &A,
    ) -> Result<NodeId, PredictError> {
        self.check_features(sample.n_features())?;
        Ok(self.tree.traverse_to_leaf(sample))
    }

    /// Predicted response (leaf mean) for one feature vector.
    pub fn predict_row<A: SampleAccessor + ?Sized>(
        &self,
        sample: &A,
    ) -> Result<f32, PredictError> {
        self.check_features(sample.n_features())?;
        Ok(self.leaf_of(sample).mean)
    }

    /// Leaf mean and population variance for one feature vector.
    pub fn predict_mean_var_row<A: SampleAccessor + ?Sized>(
        &self,
        sample: &A,
    ) -> Result<(f32, f32), PredictError> {
        self.check_features(sample.n_features())?;
        let stats = self.leaf_of(sample);
        Ok((stats.mean, stats.variance))
    }

    /// Predict every instance of `data`, in input order.
    ///
    /// Responses carried by `data`, if any, are ignored.
    pub fn predict<D>(
        &self,
        data: &D,
        parallelism: Parallelism,
    ) -> Result<Array1<f32>, PredictError>
    where
        D: DataAccessor + Sync + ?Sized,
    {
        let mut output = Array1::zeros(data.n_samples());
        self.predict_into(data, parallelism, output.view_mut())?;
        Ok(output)
    }

    /// Predict every instance of `data` into `output`.
    ///
    /// `output` is left untouched on error.
    pub fn predict_into<D>(
        &self,
        data: &D,
        parallelism: Parallelism,
        mut output: ArrayViewMut1<'_, f32>,
    ) -> Result<(), PredictError>
    where
        D: DataAccessor + Sync + ?Sized,
    {
        self.check_features(data.n_features())?;
        let n_samples = data.n_samples();
        if output.len() != n_samples {
            return Err(PredictError::OutputLenMismatch {
                expected: n_samples,
                got: output.len(),
            });
        }

        let values =
            parallelism.maybe_par_map(0..n_samples, |i| self.leaf_of(&data.sample(i)).mean);
        for (out, value) in output.iter_mut().zip(values) {
            *out = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{Node, ThresholdSplit};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn leaf(depth: u32, begin: u32, mean: f32, variance: f32) -> Node<ThresholdSplit, 3> {
        Node::leaf(
            depth,
            LeafStats {
                mean,
                variance,
                n_samples: 1,
                samples_begin: begin,
            },
        )
    }

    /// Root splits feature 1 at [0, 10]; the middle child splits feature 0 at [0.5, 1.5].
    fn ternary_tree() -> Tree<ThresholdSplit, 3> {
        let nodes = vec![
            Node::internal(0, ThresholdSplit::new(1, vec![0.0, 10.0]), [1, 2, 3]),
            leaf(1, 0, -1.0, 0.0),
            Node::internal(1, ThresholdSplit::new(0, vec![0.5, 1.5]), [4, 5, 6]),
            leaf(1, 1, 100.0, 2.0),
            leaf(2, 2, 1.0, 0.5),
            leaf(2, 3, 2.0, 0.25),
            leaf(2, 4, 3.0, 0.0),
        ];
        Tree::new(nodes, vec![0, 1, 2, 3, 4].into_boxed_slice(), 2)
    }

    #[test]
    fn predict_row_follows_splits() {
        let tree = ternary_tree();
        let predictor = Predictor::new(&tree);

        assert_abs_diff_eq!(predictor.predict_row(&[0.0f32, -5.0]).unwrap(), -1.0);
        assert_abs_diff_eq!(predictor.predict_row(&[0.0f32, 50.0]).unwrap(), 100.0);
        assert_abs_diff_eq!(predictor.predict_row(&[0.0f32, 5.0]).unwrap(), 1.0);
        assert_abs_diff_eq!(predictor.predict_row(&[1.0f32, 5.0]).unwrap(), 2.0);
        assert_abs_diff_eq!(predictor.predict_row(&[7.0f32, 5.0]).unwrap(), 3.0);
    }

    #[test]
    fn predict_leaf_and_variance() {
        let tree = ternary_tree();
        let predictor = Predictor::new(&tree);

        assert_eq!(predictor.predict_leaf(&[1.0f32, 5.0]).unwrap(), 5);
        let (mean, var) = predictor.predict_mean_var_row(&[1.0f32, 5.0]).unwrap();
        assert_abs_diff_eq!(mean, 2.0);
        assert_abs_diff_eq!(var, 0.25);
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        let tree = ternary_tree();
        let predictor = Predictor::new(&tree);

        assert_eq!(
            predictor.predict_row(&[1.0f32]),
            Err(PredictError::FeatureCountMismatch {
                expected: 2,
                got: 1
            })
        );
        let wide = array![[1.0f32, 2.0, 3.0]];
        assert!(matches!(
            predictor.predict(&wide.view(), Parallelism::Sequential),
            Err(PredictError::FeatureCountMismatch { .. })
        ));
    }

    #[test]
    fn batch_matches_single_in_order() {
        let tree = ternary_tree();
        let predictor = Predictor::new(&tree);
        let data = array![[0.0f32, -5.0], [7.0, 5.0], [0.0, 50.0], [1.0, 5.0]];

        let seq = predictor.predict(&data.view(), Parallelism::Sequential).unwrap();
        let par = predictor.predict(&data.view(), Parallelism::Parallel).unwrap();

        assert_eq!(seq, array![-1.0, 3.0, 100.0, 2.0]);
        assert_eq!(seq, par);
        for (row, &value) in data.rows().into_iter().zip(seq.iter()) {
            assert_eq!(predictor.predict_row(&row).unwrap(), value);
        }
    }

    #[test]
    fn predict_into_checks_output_length() {
        let tree = ternary_tree();
        let predictor = Predictor::new(&tree);
        let data = array![[0.0f32, -5.0], [7.0, 5.0]];

        let mut short = Array1::from_elem(1, 9.0f32);
        assert_eq!(
            predictor.predict_into(&data.view(), Parallelism::Sequential, short.view_mut()),
            Err(PredictError::OutputLenMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(short[0], 9.0);

        let mut output = Array1::zeros(2);
        predictor
            .predict_into(&data.view(), Parallelism::Sequential, output.view_mut())
            .unwrap();
        assert_eq!(output, array![-1.0, 3.0]);
    }

    #[test]
    fn single_leaf_tree_predicts_constant() {
        let tree: Tree<ThresholdSplit, 3> =
            Tree::new(vec![leaf(0, 0, 4.5, 1.0)], vec![0].into_boxed_slice(), 2);
        let predictor = Predictor::new(&tree);
        assert_abs_diff_eq!(predictor.predict_row(&[123.0f32, -9.0]).unwrap(), 4.5);
    }
}
