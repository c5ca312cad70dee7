//! Augmented interval tree backed by a node arena.
//!
//! Nodes live in a `Vec` owned by the tree and refer to their children by
//! index, so the tree has a single owner and no reference cycles. Items are
//! ordered by `start`; an item whose start equals a node's start goes to the
//! right, so ties keep insertion order. Every node's item carries `max_end`,
//! the largest `end` in its subtree, which lets [`IntervalTree::overlaps`]
//! skip whole subtrees.
//!
//! # Balance
//!
//! The tree never rebalances. Its shape is a function of insertion order
//! alone: inserting in ascending `start` order yields a right-leaning chain
//! of height `n`, and every operation on it costs O(n). All walks are
//! iterative, so a degenerate chain costs time but cannot overflow the stack.

use std::fmt;

use super::item::IntervalItem;

/// Handle to a node in an [`IntervalTree`]. Valid until the tree is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Order in which [`IntervalTree::traverse`] visits items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseOrder {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, node, right subtree: ascending by start.
    Inorder,
    /// Left subtree, right subtree, then node.
    Postorder,
}

/// Shape of a position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// No node at this position.
    Empty,
    /// A node without children.
    Leaf,
    /// A node with at least one child.
    Internal,
}

#[derive(Debug, Clone)]
struct Node<T, V> {
    item: IntervalItem<T, V>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced binary search tree of [`IntervalItem`]s keyed by start.
#[derive(Debug, Clone)]
pub struct IntervalTree<T, V> {
    nodes: Vec<Node<T, V>>,
    root: Option<usize>,
}

impl<T, V> Default for IntervalTree<T, V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T: Ord + Clone, V> IntervalTree<T, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node. Outstanding [`NodeId`]s become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Insert `item`, returning the id of its new leaf.
    ///
    /// Every node on the path from the root has its `max_end` raised to cover
    /// `item.end`. The item's own `max_end` is reset to its `end`.
    pub fn insert(&mut self, mut item: IntervalItem<T, V>) -> NodeId {
        item.reset_max_end();
        let id = self.nodes.len();

        if let Some(mut cursor) = self.root {
            loop {
                let node = &mut self.nodes[cursor];
                if item.end > node.item.max_end {
                    node.item.max_end = item.end.clone();
                }
                let slot = if item.start < node.item.start {
                    &mut node.left
                } else {
                    &mut node.right
                };
                if let Some(next) = *slot {
                    cursor = next;
                } else {
                    *slot = Some(id);
                    break;
                }
            }
        } else {
            self.root = Some(id);
        }

        self.nodes.push(Node {
            item,
            left: None,
            right: None,
        });
        NodeId(id)
    }

    /// Every stored item overlapping `query` (half-open).
    ///
    /// The query's value type is irrelevant; a probe built with
    /// [`IntervalItem::probe`] is the usual argument.
    pub fn overlaps<Q>(&self, query: &IntervalItem<T, Q>) -> Vec<&IntervalItem<T, V>> {
        self.overlapping(&query.start, &query.end)
    }

    /// Every stored item with `item.start < end && item.end > start`.
    ///
    /// A left subtree is entered only if its `max_end` reaches `start`; a
    /// right subtree only if the node itself starts no later than `end`,
    /// since everything to the right starts at or after the node.
    pub fn overlapping(&self, start: &T, end: &T) -> Vec<&IntervalItem<T, V>> {
        let mut hits = Vec::new();
        let mut stack: Vec<usize> = self.root.into_iter().collect();

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.item.start < *end && node.item.end > *start {
                hits.push(&node.item);
            }
            if let Some(right) = node.right {
                if node.item.start <= *end {
                    stack.push(right);
                }
            }
            if let Some(left) = node.left {
                if self.nodes[left].item.max_end >= *start {
                    stack.push(left);
                }
            }
        }
        hits
    }

    /// Visit every item exactly once in `order`.
    pub fn traverse(&self, order: TraverseOrder, mut visit: impl FnMut(&IntervalItem<T, V>)) {
        match order {
            TraverseOrder::Preorder => {
                let mut stack: Vec<usize> = self.root.into_iter().collect();
                while let Some(idx) = stack.pop() {
                    let node = &self.nodes[idx];
                    visit(&node.item);
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
            TraverseOrder::Inorder => {
                for idx in self.inorder() {
                    visit(&self.nodes[idx].item);
                }
            }
            TraverseOrder::Postorder => {
                // Reverse of a node-right-left preorder.
                let mut stack: Vec<usize> = self.root.into_iter().collect();
                let mut reversed = Vec::with_capacity(self.nodes.len());
                while let Some(idx) = stack.pop() {
                    reversed.push(idx);
                    let node = &self.nodes[idx];
                    stack.extend(node.left);
                    stack.extend(node.right);
                }
                for idx in reversed.into_iter().rev() {
                    visit(&self.nodes[idx].item);
                }
            }
        }
    }

    /// All items ascending by start, ties in insertion order.
    pub fn to_sorted_vec(&self) -> Vec<&IntervalItem<T, V>> {
        self.inorder().map(|idx| &self.nodes[idx].item).collect()
    }

    fn inorder(&self) -> Inorder<'_, T, V> {
        Inorder {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IntervalItem<T, V>> {
        self.nodes.iter().map(|node| &node.item)
    }

    pub fn get(&self, id: NodeId) -> Option<&IntervalItem<T, V>> {
        self.nodes.get(id.0).map(|node| &node.item)
    }

    /// Classify the node at `id`; unknown ids are [`NodeShape::Empty`].
    pub fn shape(&self, id: NodeId) -> NodeShape {
        match self.nodes.get(id.0) {
            None => NodeShape::Empty,
            Some(node) if node.left.is_none() && node.right.is_none() => NodeShape::Leaf,
            Some(_) => NodeShape::Internal,
        }
    }

    /// Shape of the root position.
    pub fn root_shape(&self) -> NodeShape {
        self.root.map_or(NodeShape::Empty, |idx| self.shape(NodeId(idx)))
    }

    /// Largest `end` stored in the tree.
    pub fn root_max_end(&self) -> Option<&T> {
        self.root.map(|idx| &self.nodes[idx].item.max_end)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        tallest
    }
}

/// Arena indices in ascending start order.
struct Inorder<'a, T, V> {
    nodes: &'a [Node<T, V>],
    stack: Vec<usize>,
    cursor: Option<usize>,
}

impl<T, V> Iterator for Inorder<'_, T, V> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(idx) = self.cursor {
            self.stack.push(idx);
            self.cursor = self.nodes[idx].left;
        }
        let idx = self.stack.pop()?;
        self.cursor = self.nodes[idx].right;
        Some(idx)
    }
}

impl<T: Ord + Clone, V> FromIterator<IntervalItem<T, V>> for IntervalTree<T, V> {
    fn from_iter<I: IntoIterator<Item = IntervalItem<T, V>>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Clone, V> Extend<IntervalItem<T, V>> for IntervalTree<T, V> {
    fn extend<I: IntoIterator<Item = IntervalItem<T, V>>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord + Clone + fmt::Display, V> fmt::Display for IntervalTree<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        for item in self.to_sorted_vec() {
            write!(f, "[ {item}]")?;
        }
        Ok(())
    }
}
