//! Plate index implementation
//!
//! Binary search tree keyed on license plate.
//!
//! Insert, search, and update descend iteratively from the root. Delete
//! walks by taking ownership of each link it passes through, which keeps
//! the three removal cases (leaf, one child, two children) as plain moves
//! between boxes. Traversals keep an explicit stack of borrowed nodes.

use std::cmp::Ordering;

use crate::model::Vehicle;

use super::node::{Link, Node};
use super::Traversal;

/// Ordered index over vehicle records, keyed by plate
///
/// Invariants:
/// - For every node, all plates in the left subtree compare less than the
///   node's plate, all plates in the right subtree compare greater.
/// - No two nodes hold equal plates.
/// - No balance invariant: height depends on insertion order alone.
#[derive(Debug, Default)]
pub struct PlateIndex {
    root: Link,
    len: usize,
}

impl PlateIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no records
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a record keyed by its plate.
    ///
    /// Returns `true` on success. Returns `false` without mutating the tree
    /// if a record with the same plate is already present.
    pub fn insert(&mut self, record: Vehicle) -> bool {
        let mut link = &mut self.root;
        loop {
            match link {
                None => {
                    *link = Some(Box::new(Node::new(record)));
                    self.len += 1;
                    return true;
                }
                Some(node) => match record.plate.cmp(&node.record.plate) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Greater => link = &mut node.right,
                    Ordering::Equal => return false,
                },
            }
        }
    }

    /// Look up a record by plate. No mutation, no side effects.
    pub fn search(&self, plate: &str) -> Option<&Vehicle> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match plate.cmp(node.record.plate.as_str()) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            }
        }
        None
    }

    /// Replace the payload fields of the record stored under `plate`.
    ///
    /// Only brand, color, model, and price are overwritten; the stored plate
    /// is never touched (there is no key-change code path in the index — the
    /// caller rejects mismatched plates before getting here). Tree shape is
    /// unchanged. Returns `false` if the plate is absent.
    pub fn update(&mut self, plate: &str, payload: &Vehicle) -> bool {
        let mut link = &mut self.root;
        loop {
            match link {
                None => return false,
                Some(node) => match plate.cmp(node.record.plate.as_str()) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Greater => link = &mut node.right,
                    Ordering::Equal => {
                        node.record.brand = payload.brand.clone();
                        node.record.color = payload.color.clone();
                        node.record.model = payload.model.clone();
                        node.record.price = payload.price;
                        return true;
                    }
                },
            }
        }
    }

    /// Remove the record stored under `plate`.
    ///
    /// Returns `false` if the plate is absent. On success exactly one node
    /// is detached from the tree:
    /// - leaf: the node itself is dropped
    /// - one child: the child is spliced into the node's slot
    /// - two children: the in-order successor's record (leftmost of the
    ///   right subtree) moves into the node, and the successor's original
    ///   node — which never has a left child — is removed instead
    pub fn delete(&mut self, plate: &str) -> bool {
        let (root, deleted) = Self::remove(self.root.take(), plate);
        self.root = root;
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    /// All records in ascending plate order. Alias for [`inorder`](Self::inorder).
    pub fn get_all(&self) -> Vec<Vehicle> {
        self.inorder()
    }

    /// Materialize a traversal in the requested order
    pub fn traverse(&self, order: Traversal) -> Vec<Vehicle> {
        match order {
            Traversal::Inorder => self.inorder(),
            Traversal::Preorder => self.preorder(),
            Traversal::Postorder => self.postorder(),
        }
    }

    /// Left subtree, node, right subtree: records in ascending plate order
    pub fn inorder(&self) -> Vec<Vehicle> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut cur = self.root.as_deref();
        loop {
            while let Some(node) = cur {
                stack.push(node);
                cur = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(node.record.clone());
                    cur = node.right.as_deref();
                }
                None => break,
            }
        }
        out
    }

    /// Node, left subtree, right subtree
    pub fn preorder(&self) -> Vec<Vehicle> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            out.push(node.record.clone());
            // Right first so the left subtree pops first
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
        out
    }

    /// Left subtree, right subtree, node
    pub fn postorder(&self) -> Vec<Vehicle> {
        // Reverse-preorder (node, right, left) collected onto a second
        // stack, unwound to yield left, right, node.
        let mut stack: Vec<&Node> = Vec::new();
        let mut visited: Vec<&Node> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            visited.push(node);
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
        }
        let mut out = Vec::with_capacity(visited.len());
        while let Some(node) = visited.pop() {
            out.push(node.record.clone());
        }
        out
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Remove `plate` from the subtree rooted at `link`.
    ///
    /// Returns the subtree with the node removed, and whether a node was
    /// actually removed. Depth of the walk is bounded by tree height.
    fn remove(link: Link, plate: &str) -> (Link, bool) {
        match link {
            None => (None, false),
            Some(mut node) => match plate.cmp(node.record.plate.as_str()) {
                Ordering::Less => {
                    let (left, deleted) = Self::remove(node.left.take(), plate);
                    node.left = left;
                    (Some(node), deleted)
                }
                Ordering::Greater => {
                    let (right, deleted) = Self::remove(node.right.take(), plate);
                    node.right = right;
                    (Some(node), deleted)
                }
                Ordering::Equal => (Self::detach(node), true),
            },
        }
    }

    /// Detach a matched node, returning whatever takes its place
    fn detach(mut node: Box<Node>) -> Link {
        match (node.left.take(), node.right.take()) {
            // Leaf: nothing takes its place
            (None, None) => None,

            // One child: splice it into the slot
            (Some(left), None) => Some(left),
            (None, Some(right)) => Some(right),

            // Two children: promote the in-order successor's record, then
            // remove the successor node from the right subtree. The successor
            // has no left child by construction, so its removal is a leaf or
            // one-child case — never this one.
            (Some(left), Some(right)) => {
                let (rest, successor) = Self::take_min(right);
                node.record = successor;
                node.left = Some(left);
                node.right = rest;
                Some(node)
            }
        }
    }

    /// Detach the minimum node of a subtree and return its record
    fn take_min(mut node: Box<Node>) -> (Link, Vehicle) {
        match node.left.take() {
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(node), min)
            }
            None => (node.right.take(), node.record),
        }
    }
}
