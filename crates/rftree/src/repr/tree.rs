//! Finalized tree representation and structural validation.
//!
//! This module provides:
//! - [`Tree`]: Immutable node array produced by induction
//! - [`TreeValidationError`]: what [`Tree::validate`] can report
//!
//! For the growable tree used during induction, see
//! [`super::mutable_tree::MutableTree`].

use crate::data::SampleAccessor;

use super::NodeId;
use super::node::{LeafStats, Node, NodeKind};
use super::split::SplitRule;

// =============================================================================
// TreeValidationError
// =============================================================================

/// Structural defects found by [`Tree::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,

    /// The root is not at depth 0.
    #[error("root has depth {depth}, expected 0")]
    RootDepth { depth: u32 },

    /// Child id past the end of the node array.
    #[error("node {node} references child {child}, but tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        child: NodeId,
        n_nodes: usize,
    },

    /// A child index does not come after its parent.
    #[error("node {node} references child {child} that does not come after it")]
    ChildBeforeParent { node: NodeId, child: NodeId },

    /// A node was reached by more than one path.
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },

    /// Slot not reachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },

    /// A child's depth is not its parent's depth plus one.
    #[error("node {node} has depth {got}, expected {expected}")]
    DepthMismatch {
        node: NodeId,
        expected: u32,
        got: u32,
    },

    /// Leaf sample ranges overlap, leave gaps, or exceed the sample buffer.
    #[error("samples of leaf {node} do not tile the sample buffer")]
    LeafSamplesNotTiled { node: NodeId },

    /// The retained sample buffer lists an instance more than once.
    #[error("sample {sample} is assigned to more than one leaf")]
    DuplicateSample { sample: u32 },
}

// =============================================================================
// Tree
// =============================================================================

/// A finalized k-ary regression tree.
///
/// Nodes live in a contiguous array in breadth-first allocation order; the
/// root is always index 0 and every child index is larger than its parent's.
/// The training instances of each leaf are retained in one shared buffer.
///
/// Once built the tree is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Tree<S, const K: usize> {
    nodes: Box<[Node<S, K>]>,
    sample_indices: Box<[u32]>,
    n_features: usize,
    n_leaves: u32,
    max_depth: u32,
}

impl<S, const K: usize> Tree<S, K> {
    /// Create a tree from finalized nodes (used by `MutableTree::freeze`).
    pub(crate) fn new(
        nodes: Vec<Node<S, K>>,
        sample_indices: Box<[u32]>,
        n_features: usize,
    ) -> Self {
        let n_leaves = nodes.iter().filter(|n| n.is_leaf()).count() as u32;
        let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        Self {
            nodes: nodes.into_boxed_slice(),
            sample_indices,
            n_features,
            n_leaves,
            max_depth,
        }
    }

    /// Root id. The root is always slot 0.
    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Get a node by ID.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<S, K> {
        &self.nodes[id as usize]
    }

    /// Get all nodes.
    #[inline]
    pub fn nodes(&self) -> &[Node<S, K>] {
        &self.nodes
    }

    /// Length of the node array.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    #[inline]
    pub fn n_leaves(&self) -> u32 {
        self.n_leaves
    }

    /// Depth of the deepest node.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of features the tree was trained on.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Whether `node` is a leaf.
    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id as usize].is_leaf()
    }

    /// Child indices of an internal node, `None` for leaves.
    #[inline]
    pub fn children(&self, id: NodeId) -> Option<&[NodeId; K]> {
        self.nodes[id as usize].children()
    }

    /// Statistics of a leaf, `None` for internal nodes.
    #[inline]
    pub fn leaf_stats(&self, id: NodeId) -> Option<&LeafStats> {
        self.nodes[id as usize].leaf_stats()
    }

    /// Training instances routed to a leaf, `None` for internal nodes.
    pub fn leaf_samples(&self, id: NodeId) -> Option<&[u32]> {
        self.leaf_stats(id).map(|stats| {
            let begin = stats.samples_begin as usize;
            &self.sample_indices[begin..begin + stats.n_samples as usize]
        })
    }

    /// The retained sample buffer, ordered leaf by leaf.
    #[inline]
    pub fn sample_indices(&self) -> &[u32] {
        &self.sample_indices
    }

    /// Leaves in slot order, with their statistics.
    pub fn iter_leaves(&self) -> impl Iterator<Item = (NodeId, &LeafStats)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.leaf_stats().map(|s| (i as NodeId, s)))
    }

    /// Validate the tree structure.
    ///
    /// Checks that the node array forms a k-ary tree rooted at 0 (every node
    /// reached exactly once, children after parents, depths consistent) and
    /// that leaf sample ranges partition the retained sample buffer.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.nodes.len();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        if self.nodes[0].depth != 0 {
            return Err(TreeValidationError::RootDepth {
                depth: self.nodes[0].depth,
            });
        }

        let mut visited = vec![false; n_nodes];
        visited[0] = true;
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(node) = stack.pop() {
            let parent = &self.nodes[node as usize];
            let Some(children) = parent.children() else {
                continue;
            };
            for &child in children {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        child,
                        n_nodes,
                    });
                }
                if child <= node {
                    return Err(TreeValidationError::ChildBeforeParent { node, child });
                }
                if visited[child as usize] {
                    return Err(TreeValidationError::DuplicateVisit { node: child });
                }
                let got = self.nodes[child as usize].depth;
                if got != parent.depth + 1 {
                    return Err(TreeValidationError::DepthMismatch {
                        node: child,
                        expected: parent.depth + 1,
                        got,
                    });
                }
                visited[child as usize] = true;
                stack.push(child);
            }
        }

        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(TreeValidationError::UnreachableNode {
                node: node as NodeId,
            });
        }

        self.validate_leaf_samples()
    }

    fn validate_leaf_samples(&self) -> Result<(), TreeValidationError> {
        let mut ranges: Vec<(NodeId, usize, usize)> = self
            .iter_leaves()
            .map(|(id, s)| (id, s.samples_begin as usize, s.n_samples as usize))
            .collect();
        ranges.sort_unstable_by_key(|&(_, begin, _)| begin);

        let mut cursor = 0usize;
        for &(node, begin, len) in &ranges {
            if begin != cursor || begin + len > self.sample_indices.len() {
                return Err(TreeValidationError::LeafSamplesNotTiled { node });
            }
            cursor = begin + len;
        }
        if cursor != self.sample_indices.len() {
            let node = ranges.last().map_or(0, |&(node, _, _)| node);
            return Err(TreeValidationError::LeafSamplesNotTiled { node });
        }

        let max_sample = self.sample_indices.iter().copied().max().unwrap_or(0) as usize;
        let mut seen = vec![false; max_sample + 1];
        for &sample in self.sample_indices.iter() {
            if std::mem::replace(&mut seen[sample as usize], true) {
                return Err(TreeValidationError::DuplicateSample { sample });
            }
        }

        Ok(())
    }
}

impl<S: SplitRule, const K: usize> Tree<S, K> {
    /// Route `sample` from the root to a leaf.
    ///
    /// The sample must have at least as many features as the tree was
    /// trained on; use [`Predictor`](crate::inference::Predictor) for a
    /// checked entry point.
    #[inline]
    pub fn traverse_to_leaf<A: SampleAccessor + ?Sized>(&self, sample: &A) -> NodeId {
        self.traverse_to_leaf_from(self.root(), sample)
    }

    /// Route `sample` down from `start_node` to a leaf.
    #[inline]
    pub fn traverse_to_leaf_from<A: SampleAccessor + ?Sized>(
        &self,
        start_node: NodeId,
        sample: &A,
    ) -> NodeId {
        let mut node = start_node;
        while let NodeKind::Internal { split, children } = &self.nodes[node as usize].kind {
            let slot = split.route(sample);
            debug_assert!(slot < K, "split routed to child slot {slot} of {K}");
            node = children[slot];
        }
        node
    }
}
