//! Split predicates stored in internal nodes.

use crate::data::SampleAccessor;

/// A split predicate: routes a sample to one of the `K` children of a node.
///
/// The predicate looks at a single feature. Training partitions instances
/// through [`child_for`](Self::child_for) and prediction routes through
/// [`route`](Self::route), so both always agree.
pub trait SplitRule: Clone + std::fmt::Debug + Send + Sync {
    /// Feature index the predicate tests.
    fn feature(&self) -> usize;

    /// Child slot (`0..K`) for a feature value.
    fn child_for(&self, value: f32) -> usize;

    /// Child slot for a whole sample.
    #[inline]
    fn route<A: SampleAccessor + ?Sized>(&self, sample: &A) -> usize {
        self.child_for(sample.feature(self.feature()))
    }
}

/// Numeric k-way split on one feature.
///
/// Holds `K - 1` ascending thresholds. A value goes to child `i`, where `i`
/// is the number of thresholds `<= value`:
///
/// ```text
/// value <  t[0]          -> child 0
/// t[0] <= value < t[1]   -> child 1
/// ...
/// t[K-2] <= value        -> child K-1
/// ```
///
/// `NaN` compares false against every threshold and lands in child 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSplit {
    feature: u32,
    thresholds: Box<[f32]>,
}

impl ThresholdSplit {
    /// Create a split from a feature index and ascending thresholds.
    pub fn new(feature: u32, thresholds: Vec<f32>) -> Self {
        debug_assert!(
            thresholds.windows(2).all(|w| w[0] <= w[1]),
            "thresholds must be ascending"
        );
        Self {
            feature,
            thresholds: thresholds.into_boxed_slice(),
        }
    }

    /// The thresholds, ascending.
    #[inline]
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
}

impl SplitRule for ThresholdSplit {
    #[inline]
    fn feature(&self) -> usize {
        self.feature as usize
    }

    #[inline]
    fn child_for(&self, value: f32) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_threshold_count() {
        let split = ThresholdSplit::new(1, vec![1.0, 2.0]);
        assert_eq!(split.child_for(0.5), 0);
        assert_eq!(split.child_for(1.0), 1);
        assert_eq!(split.child_for(1.5), 1);
        assert_eq!(split.child_for(2.0), 2);
        assert_eq!(split.child_for(100.0), 2);
    }

    #[test]
    fn nan_goes_to_first_child() {
        let split = ThresholdSplit::new(0, vec![0.0]);
        assert_eq!(split.child_for(f32::NAN), 0);
    }

    #[test]
    fn route_reads_the_split_feature() {
        let split = ThresholdSplit::new(1, vec![0.0]);
        assert_eq!(split.route(&[5.0f32, -1.0]), 0);
        assert_eq!(split.route(&[-5.0f32, 1.0]), 1);
    }
}
