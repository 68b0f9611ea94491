//! Growable node array used during induction.
//!
//! [`MutableTree`] is an append-only array of node slots addressed by
//! [`NodeId`]. A slot is reserved (empty) until the induction engine
//! finalizes it as a leaf or an internal node. Children of a split are
//! reserved as `K` consecutive slots at the end of the array, which makes
//! undoing a split a matter of truncating back to a [`Checkpoint`].

use super::NodeId;
use super::node::{LeafStats, Node};
use super::tree::Tree;

/// Length of the node array at some point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    n_nodes: usize,
}

/// Node array under construction.
#[derive(Debug, Clone)]
pub struct MutableTree<S, const K: usize> {
    slots: Vec<Option<Node<S, K>>>,
}

impl<S, const K: usize> Default for MutableTree<S, K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<S, const K: usize> MutableTree<S, K> {
    /// Create an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Reset to a single reserved root slot and return its id.
    pub fn init_root(&mut self) -> NodeId {
        self.slots.clear();
        self.slots.push(None);
        0
    }

    /// Number of slots, reserved or finalized.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.slots.len()
    }

    /// Reserve `K` consecutive slots at the end of the array.
    pub fn reserve_children(&mut self) -> [NodeId; K] {
        let first = self.slots.len();
        self.slots.resize_with(first + K, || None);
        std::array::from_fn(|i| (first + i) as NodeId)
    }

    /// Finalize a slot as a leaf.
    ///
    /// `id` must come from [`init_root`](Self::init_root) or
    /// [`reserve_children`](Self::reserve_children), so the slot exists.
    pub fn make_leaf(&mut self, id: NodeId, depth: u32, stats: LeafStats) {
        self.slots[id as usize] = Some(Node::leaf(depth, stats));
    }

    /// Finalize a reserved slot as an internal node.
    pub fn make_internal(&mut self, id: NodeId, depth: u32, split: S, children: [NodeId; K]) {
        self.slots[id as usize] = Some(Node::internal(depth, split, children));
    }

    /// Record the current array length.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            n_nodes: self.slots.len(),
        }
    }

    /// Undo a split of `node` made after `checkpoint`.
    ///
    /// Drops every slot reserved since the checkpoint and returns `node` to
    /// the reserved state.
    pub fn rollback(&mut self, checkpoint: Checkpoint, node: NodeId) {
        debug_assert!((node as usize) < checkpoint.n_nodes);
        self.slots.truncate(checkpoint.n_nodes);
        self.slots[node as usize] = None;
    }

    /// Convert into an immutable [`Tree`].
    ///
    /// # Panics
    ///
    /// Panics if any slot is still reserved; induction finalizes every slot
    /// before its queue runs empty.
    pub fn freeze(self, sample_indices: Box<[u32]>, n_features: usize) -> Tree<S, K> {
        let nodes: Vec<Node<S, K>> = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| {
                slot.unwrap_or_else(|| panic!("node {id} was never finalized"))
            })
            .collect();
        Tree::new(nodes, sample_indices, n_features)
    }
}
