//! Parallelism switch for read-only work on finalized trees.

use rayon::prelude::*;

// =============================================================================
// Parallelism
// =============================================================================

/// Whether batch work may be spread over the current rayon pool.
///
/// Induction ignores this flag and always runs on the calling thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Apply `f` to every item and collect the results in input order.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, items: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        match self {
            Self::Sequential => items.into_iter().map(f).collect(),
            Self::Parallel => items.into_par_iter().map(f).collect(),
        }
    }
}
