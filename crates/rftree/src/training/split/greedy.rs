//! Greedy k-way split search.
//!
//! For every candidate feature the node's instances are sorted by value and
//! `K - 1` cuts are placed one at a time. Each step takes the cut, across
//! all current segments, with the largest reduction of the sum of squared
//! errors (SSE):
//!
//! ```text
//! gain(a, i, b) = SSE(a..b) - SSE(a..i) - SSE(i..b)
//! SSE(a..b)     = Σy² - (Σy)² / n
//! ```
//!
//! Cuts are only placed between distinct feature values and only where both
//! sides keep at least `min_samples_in_leaf` instances. The feature with
//! the largest total gain wins.
//!
//! `NaN` values sort before every number, since [`ThresholdSplit`] routes
//! them to child 0.
//!
//! # Complexity
//!
//! O(n_candidates × (n log n + K × n)) per node.

use std::cmp::Ordering;

use rand::Rng;

use crate::data::TrainingData;
use crate::repr::ThresholdSplit;

use super::{SplitContext, SplitStrategy};

/// Greedy best-of-subset split strategy.
///
/// Holds scratch buffers that are reused across nodes.
#[derive(Debug, Clone, Default)]
pub struct GreedySplitter {
    /// `(feature value, response)` sorted by value.
    pairs: Vec<(f32, f64)>,
    /// Prefix sums of `(y, y²)`, one longer than `pairs`.
    prefix: Vec<(f64, f64)>,
    /// Cut positions of the feature being evaluated, ascending.
    cuts: Vec<usize>,
}

impl GreedySplitter {
    /// Create a splitter with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn sse(&self, begin: usize, end: usize) -> f64 {
        let (s_hi, s2_hi) = self.prefix[end];
        let (s_lo, s2_lo) = self.prefix[begin];
        let sum = s_hi - s_lo;
        let sum_sq = s2_hi - s2_lo;
        sum_sq - sum * sum / (end - begin) as f64
    }

    /// Best cut of one segment `[begin, end)`, as `(gain, position)`.
    fn best_cut_in(&self, begin: usize, end: usize, min_leaf: usize) -> Option<(f64, usize)> {
        if (end - begin) / 2 < min_leaf {
            return None;
        }
        let parent = self.sse(begin, end);
        let mut best: Option<(f64, usize)> = None;
        for i in (begin + min_leaf)..=(end - min_leaf) {
            if !(self.pairs[i - 1].0 < self.pairs[i].0) {
                continue;
            }
            let gain = parent - self.sse(begin, i) - self.sse(i, end);
            if best.is_none_or(|(g, _)| gain > g) {
                best = Some((gain, i));
            }
        }
        best
    }

    /// Place `n_cuts` cuts on `feature`. Returns the total gain and thresholds.
    fn cut_feature<D: TrainingData + ?Sized>(
        &mut self,
        data: &D,
        samples: &[u32],
        feature: usize,
        n_cuts: usize,
        min_leaf: usize,
    ) -> Option<(f64, Vec<f32>)> {
        self.pairs.clear();
        self.pairs.extend(samples.iter().map(|&s| {
            (
                data.feature_value(s as usize, feature),
                data.response(s as usize) as f64,
            )
        }));
        self.pairs.sort_by(|a, b| nan_first(a.0, b.0));

        self.prefix.clear();
        self.prefix.push((0.0, 0.0));
        let mut acc = (0.0f64, 0.0f64);
        for &(_, y) in &self.pairs {
            acc.0 += y;
            acc.1 += y * y;
            self.prefix.push(acc);
        }

        self.cuts.clear();
        let n = self.pairs.len();
        let mut total_gain = 0.0;
        for _ in 0..n_cuts {
            let mut best: Option<(f64, usize)> = None;
            let mut seg_begin = 0;
            for seg_end in self.cuts.iter().copied().chain(std::iter::once(n)) {
                if let Some((gain, pos)) = self.best_cut_in(seg_begin, seg_end, min_leaf) {
                    if best.is_none_or(|(g, _)| gain > g) {
                        best = Some((gain, pos));
                    }
                }
                seg_begin = seg_end;
            }
            let (gain, pos) = best?;
            let at = self.cuts.partition_point(|&c| c < pos);
            self.cuts.insert(at, pos);
            total_gain += gain;
        }

        let thresholds = self
            .cuts
            .iter()
            .map(|&i| midpoint(self.pairs[i - 1].0, self.pairs[i].0))
            .collect();
        Some((total_gain, thresholds))
    }
}

/// Numeric order with every `NaN` first, matching how splits route them.
#[inline]
fn nan_first(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

/// Threshold separating `lo < hi`: their midpoint, or `hi` when the midpoint
/// is not strictly above `lo` in `f32`.
#[inline]
fn midpoint(lo: f32, hi: f32) -> f32 {
    let mid = lo + (hi - lo) * 0.5;
    if mid > lo && mid <= hi { mid } else { hi }
}

impl<const K: usize> SplitStrategy<K> for GreedySplitter {
    type Split = ThresholdSplit;

    fn find_split<D, R>(
        &mut self,
        data: &D,
        ctx: &SplitContext<'_>,
        _rng: &mut R,
    ) -> Option<ThresholdSplit>
    where
        D: TrainingData + ?Sized,
        R: Rng + ?Sized,
    {
        if K < 2 {
            return None;
        }
        let min_leaf = ctx.min_samples_in_leaf.max(1);

        let mut best: Option<(f64, u32, Vec<f32>)> = None;
        for &feature in ctx.features {
            let Some((gain, thresholds)) =
                self.cut_feature(data, ctx.samples, feature as usize, K - 1, min_leaf)
            else {
                continue;
            };
            if best.as_ref().is_none_or(|(g, _, _)| gain > *g) {
                best = Some((gain, feature, thresholds));
            }
        }

        best.map(|(_, feature, thresholds)| ThresholdSplit::new(feature, thresholds))
    }
}
