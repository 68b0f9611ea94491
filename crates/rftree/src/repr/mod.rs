//! Canonical k-ary tree representations.

/// Canonical node identifier.
///
/// Internally this is just an index into the tree's node array.
pub type NodeId = u32;

pub mod mutable_tree;
pub mod node;
pub mod split;
pub mod tree;

pub use mutable_tree::{Checkpoint, MutableTree};
pub use node::{LeafStats, Node, NodeKind};
pub use split::{SplitRule, ThresholdSplit};
pub use tree::{Tree, TreeValidationError};
