//! Plate Index Module
//!
//! In-memory ordered index over vehicle records.
//!
//! ## Responsibilities
//! - Insert/search/update/delete keyed by license plate
//! - Deterministic inorder/preorder/postorder traversals
//! - Reject duplicate plates without mutating the tree
//!
//! ## Data Structure Choice
//! A plain binary search tree with exclusively owned boxed links:
//! - Plate ordering is plain string comparison
//! - No rebalancing: height is a function of insertion order only,
//!   so worst-case O(n) operations on sorted insertion sequences
//! - Traversals use explicit stacks rather than recursion, bounding
//!   call depth regardless of tree shape

mod node;
mod tree;

pub use tree::PlateIndex;

/// Traversal orders produced by the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Left subtree, node, right subtree — ascending plate order
    Inorder,

    /// Node, left subtree, right subtree
    Preorder,

    /// Left subtree, right subtree, node
    Postorder,
}
