//! Feature subsampling for split candidates.
//!
//! Every split attempt considers a uniform random subset of `max_features`
//! features, drawn without replacement by shuffling the full feature index
//! sequence and taking a prefix.

use rand::Rng;
use rand::seq::SliceRandom;

/// Draws feature subsets for split candidates.
///
/// The permutation is kept between draws and reshuffled in place, so the
/// sequence of subsets is fully determined by the RNG stream.
#[derive(Debug, Clone)]
pub struct FeatureSampler {
    features: Vec<u32>,
    n_sampled: usize,
}

impl FeatureSampler {
    /// Create a sampler over `0..n_features` drawing `max_features` per call.
    ///
    /// `max_features` is clamped to `n_features`.
    pub fn new(n_features: usize, max_features: usize) -> Self {
        Self {
            features: (0..n_features as u32).collect(),
            n_sampled: max_features.min(n_features),
        }
    }

    /// Number of features returned per draw.
    #[inline]
    pub fn n_sampled(&self) -> usize {
        self.n_sampled
    }

    /// Draw a new subset. Order is the shuffle order, not sorted.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[u32] {
        self.features.shuffle(rng);
        &self.features[..self.n_sampled]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn subset_has_requested_size_and_no_duplicates() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut sampler = FeatureSampler::new(10, 4);
        for _ in 0..20 {
            let mut subset = sampler.sample(&mut rng).to_vec();
            assert_eq!(subset.len(), 4);
            subset.sort_unstable();
            subset.dedup();
            assert_eq!(subset.len(), 4);
            assert!(subset.iter().all(|&f| f < 10));
        }
    }

    #[test]
    fn max_features_is_clamped() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut sampler = FeatureSampler::new(3, 8);
        assert_eq!(sampler.n_sampled(), 3);
        assert_eq!(sampler.sample(&mut rng).len(), 3);
    }

    #[test]
    fn same_seed_same_subsets() {
        let mut a = FeatureSampler::new(10, 3);
        let mut b = FeatureSampler::new(10, 3);
        let mut rng_a = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut rng_b = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..5 {
            assert_eq!(a.sample(&mut rng_a), b.sample(&mut rng_b));
        }
    }

    #[test]
    fn all_features_get_drawn() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut sampler = FeatureSampler::new(5, 1);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[sampler.sample(&mut rng)[0] as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
