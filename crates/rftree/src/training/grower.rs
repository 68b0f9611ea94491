//! Tree grower: breadth-first induction of one k-ary regression tree.
//!
//! Pending nodes are consumed from a FIFO queue. Each one is either
//! finalized as a leaf or split into `K` children, which are reserved as
//! consecutive slots at the end of the node array and enqueued together.
//!
//! # Split transaction
//!
//! A split is committed before its children are checked:
//!
//! ```text
//! 1. checkpoint   (node array length, queue length)
//! 2. partition    node's instance range into K child ranges
//! 3. commit       internal node + K reserved child slots + K pending children
//! 4. check        every new child holds >= min_samples_in_leaf instances
//! 5. on failure   truncate queue and array to the checkpoint, node becomes a leaf
//! ```
//!
//! After a rollback the node array and queue are exactly as they were
//! before the attempt; only the order of the node's own instances inside
//! its range may differ.

use rand::Rng;
use tracing::{debug, trace};

use crate::data::TrainingData;
use crate::repr::{LeafStats, MutableTree, Tree};

use super::params::TreeParams;
use super::partition::SamplePartitioner;
use super::pending::{PendingNode, PendingQueue};
use super::sampling::FeatureSampler;
use super::split::{SplitContext, SplitStrategy};

// =============================================================================
// Errors and statistics
// =============================================================================

/// Errors that can occur when growing a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowError {
    /// The dataset has no instances, so there is nothing to put in the root.
    #[error("cannot grow a tree from an empty dataset")]
    EmptyDataset,

    /// Instance indices are stored as `u32`.
    #[error("dataset has {n_samples} instances, at most {max} are supported", max = u32::MAX)]
    TooManySamples { n_samples: usize },
}

/// Summary of the last grown tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowStats {
    /// Nodes in the tree.
    pub n_nodes: usize,
    /// Leaves in the tree.
    pub n_leaves: usize,
    /// Splits that were kept.
    pub n_splits: usize,
    /// Splits undone because a child was too small.
    pub n_rollbacks: usize,
    /// Leaves forced by the node budget.
    pub n_budget_leaves: usize,
    /// Deepest node.
    pub max_depth: u32,
}

/// Why a pending node was finalized as a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeafReason {
    MaxDepth,
    TooFewSamples,
    NodeBudget,
    Pure,
    NoSplit,
    ChildTooSmall,
}

// =============================================================================
// Growth state
// =============================================================================

/// Mutable state of one `grow` call.
struct GrowthState<S, const K: usize> {
    tree: MutableTree<S, K>,
    queue: PendingQueue,
    partitioner: SamplePartitioner,
    sampler: FeatureSampler,
}

impl<S, const K: usize> GrowthState<S, K> {
    fn new(n_samples: usize, n_features: usize, params: &TreeParams) -> Self {
        let capacity = n_samples.saturating_mul(2).min(params.max_num_nodes);
        Self {
            tree: MutableTree::with_capacity(capacity),
            queue: PendingQueue::new(),
            partitioner: SamplePartitioner::new(n_samples),
            sampler: FeatureSampler::new(n_features, params.max_features),
        }
    }
}

/// Whether every response is within `epsilon` of the first one.
///
/// Empty and single-instance sets are pure.
fn is_pure<D: TrainingData + ?Sized>(data: &D, samples: &[u32], epsilon: f32) -> bool {
    let Some((&first, rest)) = samples.split_first() else {
        return true;
    };
    let first = data.response(first as usize);
    rest.iter()
        .all(|&s| (data.response(s as usize) - first).abs() <= epsilon)
}

// =============================================================================
// TreeGrower
// =============================================================================

/// Grows k-ary regression trees.
///
/// `K` is the branching factor; `St` the split strategy, fixed at
/// construction. Induction is sequential and fully determined by the data,
/// the parameters and the random number stream passed to [`grow`](Self::grow).
#[derive(Debug, Clone)]
pub struct TreeGrower<const K: usize, St: SplitStrategy<K>> {
    params: TreeParams,
    strategy: St,
    stats: GrowStats,
}

impl<const K: usize, St: SplitStrategy<K>> TreeGrower<K, St> {
    /// Create a grower.
    pub fn new(params: TreeParams, strategy: St) -> Self {
        Self {
            params,
            strategy,
            stats: GrowStats::default(),
        }
    }

    /// Induction limits.
    #[inline]
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Statistics of the last grown tree.
    #[inline]
    pub fn stats(&self) -> &GrowStats {
        &self.stats
    }

    /// Grow a tree over all instances of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError::EmptyDataset`] if `data` has no instances and
    /// [`GrowError::TooManySamples`] if instance indices do not fit `u32`.
    pub fn grow<D, R>(&mut self, data: &D, rng: &mut R) -> Result<Tree<St::Split, K>, GrowError>
    where
        D: TrainingData + ?Sized,
        R: Rng + ?Sized,
    {
        let n_samples = data.n_samples();
        if n_samples == 0 {
            return Err(GrowError::EmptyDataset);
        }
        if u32::try_from(n_samples).is_err() {
            return Err(GrowError::TooManySamples { n_samples });
        }
        let n_features = data.n_features();

        self.stats = GrowStats::default();
        let mut state = GrowthState::new(n_samples, n_features, &self.params);
        let root = state.tree.init_root();
        state.queue.push(PendingNode::root(root, n_samples as u32));

        while let Some(pending) = state.queue.pop_front() {
            if let Some(reason) = self.leaf_reason(data, &state, &pending) {
                self.finalize_leaf(data, &mut state, &pending, reason);
                continue;
            }

            let ctx = SplitContext {
                samples: state.partitioner.samples(pending.begin, pending.count),
                features: state.sampler.sample(rng),
                min_samples_in_leaf: self.params.min_samples_in_leaf,
            };
            match self.strategy.find_split(data, &ctx, rng) {
                Some(split) => self.apply_split(data, &mut state, &pending, split),
                None => self.finalize_leaf(data, &mut state, &pending, LeafReason::NoSplit),
            }
        }

        let tree = state
            .tree
            .freeze(state.partitioner.into_indices(), n_features);
        self.stats.n_nodes = tree.n_nodes();

        debug!(
            n_samples,
            n_nodes = self.stats.n_nodes,
            n_leaves = self.stats.n_leaves,
            n_splits = self.stats.n_splits,
            n_rollbacks = self.stats.n_rollbacks,
            n_budget_leaves = self.stats.n_budget_leaves,
            max_depth = self.stats.max_depth,
            "grew tree"
        );

        Ok(tree)
    }

    /// First failing split condition, cheapest first. `None` if the node
    /// should be split.
    fn leaf_reason<D: TrainingData + ?Sized>(
        &self,
        data: &D,
        state: &GrowthState<St::Split, K>,
        pending: &PendingNode,
    ) -> Option<LeafReason> {
        let params = &self.params;
        if pending.depth >= params.max_depth {
            return Some(LeafReason::MaxDepth);
        }
        if pending.n_samples() < params.min_samples_to_split {
            return Some(LeafReason::TooFewSamples);
        }
        if !params.has_room_for(state.tree.n_nodes(), K) {
            return Some(LeafReason::NodeBudget);
        }
        let samples = state.partitioner.samples(pending.begin, pending.count);
        if is_pure(data, samples, params.epsilon_purity) {
            return Some(LeafReason::Pure);
        }
        None
    }

    /// Commit `split` at `pending`, then undo it if a child is too small.
    fn apply_split<D: TrainingData + ?Sized>(
        &mut self,
        data: &D,
        state: &mut GrowthState<St::Split, K>,
        pending: &PendingNode,
        split: St::Split,
    ) {
        let queue_mark = state.queue.len();
        let checkpoint = state.tree.checkpoint();

        let ranges = state
            .partitioner
            .partition::<K, _, _>(pending.begin, pending.count, &split, data);
        let children = state.tree.reserve_children();
        state
            .tree
            .make_internal(pending.node, pending.depth, split, children);
        for (&child, (begin, count)) in children.iter().zip(ranges) {
            state.queue.push(PendingNode {
                node: child,
                parent: Some(pending.node),
                depth: pending.depth + 1,
                begin,
                count,
            });
        }

        let min_leaf = self.params.min_samples_in_leaf;
        if state.queue.newest(K).any(|child| child.n_samples() < min_leaf) {
            state.queue.truncate(queue_mark);
            state.tree.rollback(checkpoint, pending.node);
            self.stats.n_rollbacks += 1;
            debug!(
                node = pending.node,
                depth = pending.depth,
                child_sizes = ?ranges.map(|(_, count)| count),
                min_samples_in_leaf = min_leaf,
                "rolled back split"
            );
            self.finalize_leaf(data, state, pending, LeafReason::ChildTooSmall);
            return;
        }

        self.stats.n_splits += 1;
        trace!(
            node = pending.node,
            depth = pending.depth,
            first_child = children[0],
            "split node"
        );
    }

    fn finalize_leaf<D: TrainingData + ?Sized>(
        &mut self,
        data: &D,
        state: &mut GrowthState<St::Split, K>,
        pending: &PendingNode,
        reason: LeafReason,
    ) {
        let samples = state.partitioner.samples(pending.begin, pending.count);
        let stats = LeafStats::from_samples(data, samples, pending.begin);
        state.tree.make_leaf(pending.node, pending.depth, stats);

        self.stats.n_leaves += 1;
        self.stats.max_depth = self.stats.max_depth.max(pending.depth);
        if reason == LeafReason::NodeBudget {
            self.stats.n_budget_leaves += 1;
        }
        trace!(
            node = pending.node,
            parent = ?pending.parent,
            depth = pending.depth,
            n_samples = pending.count,
            mean = stats.mean,
            ?reason,
            "leaf"
        );
    }
}

/// Grow one tree with a fresh [`TreeGrower`].
///
/// `K` is usually inferred from the annotated result type.
pub fn fit<const K: usize, D, St, R>(
    data: &D,
    params: TreeParams,
    strategy: St,
    rng: &mut R,
) -> Result<Tree<St::Split, K>, GrowError>
where
    D: TrainingData + ?Sized,
    St: SplitStrategy<K>,
    R: Rng + ?Sized,
{
    TreeGrower::<K, St>::new(params, strategy).grow(data, rng)
}
