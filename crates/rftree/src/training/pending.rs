//! Pending nodes and the FIFO work queue of induction.
//!
//! A [`PendingNode`] describes a node slot that has been reserved in the
//! node array but not yet finalized. Its instances are a contiguous range
//! of the [`SamplePartitioner`](super::partition::SamplePartitioner) buffer.
//!
//! The queue is strictly first-in first-out: the children of one split are
//! enqueued together and every parent is finalized before its grandchildren.

use std::collections::VecDeque;

use crate::repr::NodeId;

/// A node awaiting its leaf-or-split decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNode {
    /// Slot in the node array this descriptor finalizes.
    pub node: NodeId,
    /// Parent slot, `None` for the root.
    pub parent: Option<NodeId>,
    /// Depth of the node (root = 0).
    pub depth: u32,
    /// Start of the node's instances in the partition buffer.
    pub begin: u32,
    /// Number of instances.
    pub count: u32,
}

impl PendingNode {
    /// Descriptor for the root holding all `n_samples` instances.
    #[inline]
    pub fn root(node: NodeId, n_samples: u32) -> Self {
        Self {
            node,
            parent: None,
            depth: 0,
            begin: 0,
            count: n_samples,
        }
    }

    /// Number of instances as `usize`.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.count as usize
    }
}

/// FIFO queue of pending nodes.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    queue: VecDeque<PendingNode>,
}

impl PendingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue at the back.
    #[inline]
    pub fn push(&mut self, pending: PendingNode) {
        self.queue.push_back(pending);
    }

    /// Dequeue the oldest descriptor.
    #[inline]
    pub fn pop_front(&mut self) -> Option<PendingNode> {
        self.queue.pop_front()
    }

    /// Number of queued descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The `n` most recently enqueued descriptors, oldest first.
    pub fn newest(&self, n: usize) -> impl Iterator<Item = &PendingNode> {
        self.queue.range(self.queue.len().saturating_sub(n)..)
    }

    /// Drop every descriptor enqueued after the queue had `len` entries.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.queue.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(node: NodeId) -> PendingNode {
        PendingNode {
            node,
            parent: Some(0),
            depth: 1,
            begin: node,
            count: 1,
        }
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = PendingQueue::new();
        queue.push(pending(1));
        queue.push(pending(2));
        queue.push(pending(3));
        assert_eq!(queue.pop_front().map(|p| p.node), Some(1));
        assert_eq!(queue.pop_front().map(|p| p.node), Some(2));
        assert_eq!(queue.pop_front().map(|p| p.node), Some(3));
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn newest_and_truncate() {
        let mut queue = PendingQueue::new();
        queue.push(pending(1));
        let mark = queue.len();
        queue.push(pending(2));
        queue.push(pending(3));

        let newest: Vec<NodeId> = queue.newest(2).map(|p| p.node).collect();
        assert_eq!(newest, vec![2, 3]);

        queue.truncate(mark);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_front().map(|p| p.node), Some(1));
        assert!(queue.is_empty());
    }

    #[test]
    fn root_covers_all_samples() {
        let root = PendingNode::root(0, 10);
        assert_eq!(root.parent, None);
        assert_eq!(root.depth, 0);
        assert_eq!(root.n_samples(), 10);
    }
}
