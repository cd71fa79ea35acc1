//! Tree node definition
//!
//! One record per node, up to two exclusively owned children.

use crate::model::Vehicle;

/// Owned link to a subtree
pub(super) type Link = Option<Box<Node>>;

/// A node in the plate index
///
/// Ownership is strictly hierarchical: each child is owned by exactly one
/// parent, and the tree owns the whole reachable graph through the root.
#[derive(Debug)]
pub(super) struct Node {
    /// The record stored at this node
    pub record: Vehicle,

    /// Subtree holding plates strictly less than this node's
    pub left: Link,

    /// Subtree holding plates strictly greater than this node's
    pub right: Link,
}

impl Node {
    /// Create a new leaf node holding the given record
    pub fn new(record: Vehicle) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}
