//! Tree node types.

use crate::data::TrainingData;

use super::NodeId;

/// Response statistics of the instances routed to a leaf.
///
/// `samples_begin` / `n_samples` locate the leaf's instances inside the
/// owning tree's retained sample-index buffer (see [`Tree::leaf_samples`]).
///
/// [`Tree::leaf_samples`]: super::Tree::leaf_samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafStats {
    /// Mean response. This is what the tree predicts.
    pub mean: f32,
    /// Population variance of the responses.
    pub variance: f32,
    /// Number of training instances in the leaf.
    pub n_samples: u32,
    /// Offset of the leaf's first instance in the retained sample buffer.
    pub samples_begin: u32,
}

impl LeafStats {
    /// Compute statistics over `samples`, accumulating in `f64`.
    ///
    /// An empty sample set yields `NaN` mean and variance.
    pub fn from_samples<D: TrainingData + ?Sized>(
        data: &D,
        samples: &[u32],
        samples_begin: u32,
    ) -> Self {
        let n = samples.len();
        let (mean, variance) = if n == 0 {
            (f64::NAN, f64::NAN)
        } else {
            let sum: f64 = samples
                .iter()
                .map(|&s| data.response(s as usize) as f64)
                .sum();
            let mean = sum / n as f64;
            let sq_dev: f64 = samples
                .iter()
                .map(|&s| {
                    let d = data.response(s as usize) as f64 - mean;
                    d * d
                })
                .sum();
            (mean, sq_dev / n as f64)
        };

        Self {
            mean: mean as f32,
            variance: variance as f32,
            n_samples: n as u32,
            samples_begin,
        }
    }
}

/// Node payload: either an internal split or a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<S, const K: usize> {
    /// Split node routing each sample to one of exactly `K` children.
    Internal {
        /// Split predicate chosen by the split strategy.
        split: S,
        /// Child node indices, in predicate order.
        children: [NodeId; K],
    },
    /// Terminal node.
    Leaf(LeafStats),
}

/// A finalized tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<S, const K: usize> {
    /// Distance from the root (root = 0).
    pub depth: u32,
    /// Internal or leaf payload.
    pub kind: NodeKind<S, K>,
}

impl<S, const K: usize> Node<S, K> {
    /// Create a leaf node.
    #[inline]
    pub fn leaf(depth: u32, stats: LeafStats) -> Self {
        Self {
            depth,
            kind: NodeKind::Leaf(stats),
        }
    }

    /// Create an internal node.
    #[inline]
    pub fn internal(depth: u32, split: S, children: [NodeId; K]) -> Self {
        Self {
            depth,
            kind: NodeKind::Internal { split, children },
        }
    }

    /// Whether this is a leaf node.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Leaf statistics, `None` for internal nodes.
    #[inline]
    pub fn leaf_stats(&self) -> Option<&LeafStats> {
        match &self.kind {
            NodeKind::Leaf(stats) => Some(stats),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Split predicate, `None` for leaves.
    #[inline]
    pub fn split(&self) -> Option<&S> {
        match &self.kind {
            NodeKind::Internal { split, .. } => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Child indices, `None` for leaves.
    #[inline]
    pub fn children(&self) -> Option<&[NodeId; K]> {
        match &self.kind {
            NodeKind::Internal { children, .. } => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }
}
