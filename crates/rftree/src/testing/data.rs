use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::Dataset;

/// `rows * cols` uniform values in `[lo, hi)`, sample-major.
pub fn random_dense_f32(rows: usize, cols: usize, seed: u64, lo: f32, hi: f32) -> Vec<f32> {
    assert!(hi > lo, "empty range [{lo}, {hi})");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    std::iter::repeat_with(|| rng.gen_range(lo..hi))
        .take(rows * cols)
        .collect()
}

/// Responses `bias + w . x` with uniform noise in `[-noise, noise]`.
///
/// Weights are drawn from `[-1, 1)` and the bias from `[-0.25, 0.25)`.
/// Returns `(responses, weights, bias)`.
pub fn synthetic_regression_targets_linear(
    features: &[f32],
    rows: usize,
    cols: usize,
    seed: u64,
    noise: f32,
) -> (Vec<f32>, Vec<f32>, f32) {
    assert_eq!(features.len(), rows * cols);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let weights: Vec<f32> = std::iter::repeat_with(|| rng.gen_range(-1.0..1.0))
        .take(cols)
        .collect();
    let bias = rng.gen_range(-0.25..0.25);

    let mut responses = Vec::with_capacity(rows);
    for row in 0..rows {
        let x = &features[row * cols..(row + 1) * cols];
        let mut y = bias;
        for (xi, wi) in x.iter().zip(&weights) {
            y += xi * wi;
        }
        if noise > 0.0 {
            y += rng.gen_range(-noise..=noise);
        }
        responses.push(y);
    }
    (responses, weights, bias)
}

/// Features in `[-1, 1)` with noisy linear responses.
///
/// # Panics
///
/// Panics if `rows == 0`.
pub fn synthetic_dataset(rows: usize, cols: usize, seed: u64, noise: f32) -> Dataset {
    let features = random_dense_f32(rows, cols, seed, -1.0, 1.0);
    let (targets, _, _) =
        synthetic_regression_targets_linear(&features, rows, cols, seed ^ 0x5eed, noise);
    Dataset::from_vec(features, rows, cols, targets).expect("synthetic data has a valid shape")
}
