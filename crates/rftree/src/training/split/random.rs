//! Fully randomized k-way splits.
//!
//! Takes the first candidate feature whose finite values are not all equal
//! and draws `K - 1` thresholds uniformly between the smallest and largest
//! finite value. Infinite values still route to the outer children. The
//! candidate order is already a random permutation, so no further feature
//! choice is made. Thresholds may leave a child empty; the engine's leaf
//! size check then turns the node into a leaf.

use rand::Rng;

use crate::data::TrainingData;
use crate::repr::ThresholdSplit;

use super::{SplitContext, SplitStrategy};

/// Randomized split strategy. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSplitter;

/// `(min, max)` of the finite values of a feature over `samples`.
fn value_range<D: TrainingData + ?Sized>(
    data: &D,
    samples: &[u32],
    feature: usize,
) -> (f32, f32) {
    samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
            let v = data.feature_value(s as usize, feature);
            if v.is_finite() { (lo.min(v), hi.max(v)) } else { (lo, hi) }
        })
}

impl<const K: usize> SplitStrategy<K> for RandomSplitter {
    type Split = ThresholdSplit;

    fn find_split<D, R>(
        &mut self,
        data: &D,
        ctx: &SplitContext<'_>,
        rng: &mut R,
    ) -> Option<ThresholdSplit>
    where
        D: TrainingData + ?Sized,
        R: Rng + ?Sized,
    {
        if K < 2 {
            return None;
        }

        for &feature in ctx.features {
            let (lo, hi) = value_range(data, ctx.samples, feature as usize);
            if !(lo < hi) {
                continue;
            }
            let (lo, hi) = (lo as f64, hi as f64);
            let mut thresholds: Vec<f32> = (0..K - 1)
                .map(|_| {
                    let u: f64 = rng.gen_range(0.0..1.0);
                    // may round up to `hi`
                    (lo + u * (hi - lo)) as f32
                })
                .collect();
            thresholds.sort_by(f32::total_cmp);
            return Some(ThresholdSplit::new(feature, thresholds));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::repr::SplitRule;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn find<const K: usize>(
        ds: &Dataset,
        features: &[u32],
        seed: u64,
    ) -> Option<ThresholdSplit> {
        let samples: Vec<u32> = (0..ds.n_samples() as u32).collect();
        let ctx = SplitContext {
            samples: &samples,
            features,
            min_samples_in_leaf: 1,
        };
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        SplitStrategy::<K>::find_split(&mut RandomSplitter, ds, &ctx, &mut rng)
    }

    #[test]
    fn thresholds_lie_within_value_range() {
        let ds = Dataset::from_vec(vec![2.0, 3.0, 7.0, 5.0], 4, 1, vec![0.0; 4]).unwrap();
        for seed in 0..50 {
            let split = find::<4>(&ds, &[0], seed).unwrap();
            assert_eq!(split.thresholds().len(), 3);
            assert!(split.thresholds().windows(2).all(|w| w[0] <= w[1]));
            assert!(split.thresholds().iter().all(|&t| (2.0..=7.0).contains(&t)));
        }
    }

    #[test]
    fn skips_constant_features() {
        // feature 0 constant, feature 1 varies
        let ds =
            Dataset::from_vec(vec![1.0, 0.0, 1.0, 4.0, 1.0, 8.0], 3, 2, vec![0.0; 3]).unwrap();
        let split = find::<2>(&ds, &[0, 1], 3).unwrap();
        assert_eq!(split.feature(), 1);
    }

    #[test]
    fn all_constant_has_no_split() {
        let ds = Dataset::from_vec(vec![1.0, 2.0, 1.0, 2.0], 2, 2, vec![0.0, 1.0]).unwrap();
        assert!(find::<2>(&ds, &[0, 1], 0).is_none());
    }

    #[test]
    fn same_seed_same_split() {
        let ds = Dataset::from_vec(vec![0.0, 1.0, 2.0, 3.0], 4, 1, vec![0.0; 4]).unwrap();
        assert_eq!(find::<3>(&ds, &[0], 11), find::<3>(&ds, &[0], 11));
    }

    #[test]
    fn minimum_value_goes_to_first_child() {
        let ds = Dataset::from_vec(vec![-1.0, 0.5, 1.0], 3, 1, vec![0.0; 3]).unwrap();
        for seed in 0..20 {
            let split = find::<2>(&ds, &[0], seed).unwrap();
            assert_eq!(split.child_for(-1.0), 0);
        }
    }

    #[test]
    fn infinite_values_do_not_poison_thresholds() {
        let ds = Dataset::from_vec(
            vec![f32::NEG_INFINITY, 0.0, 1.0, 2.0, f32::INFINITY],
            5,
            1,
            vec![0.0; 5],
        )
        .unwrap();
        for seed in 0..50 {
            let split = find::<3>(&ds, &[0], seed).unwrap();
            let t = split.thresholds();
            assert!(t.iter().all(|v| (0.0..=2.0).contains(v)), "{t:?}");
            assert_eq!(split.child_for(f32::NEG_INFINITY), 0);
            assert_eq!(split.child_for(f32::INFINITY), 2);
        }
    }

    #[test]
    fn single_finite_value_is_constant() {
        // only one finite value besides the infinities
        let ds = Dataset::from_vec(
            vec![f32::NEG_INFINITY, 1.0, f32::INFINITY, 1.0],
            4,
            1,
            vec![0.0; 4],
        )
        .unwrap();
        assert!(find::<2>(&ds, &[0], 0).is_none());
    }
}
