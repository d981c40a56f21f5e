//! Lazy tree traversals.
//!
//! [`Traverse`] walks the tree with an explicit stack, so no traversal
//! recurses or collects the tree up front. Stack depth is bounded by the tree
//! height. Iterators are cheap to clone, and a clone restarts from the clone
//! point.

use std::fmt;
use std::iter::FusedIterator;

use super::RedBlackTree;
use super::arena::{Arena, NodeId};

/// The order in which [`RedBlackTree::traverse`] visits nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree (ascending key order).
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// A lazy iterator over the entries of a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::traverse`] and [`RedBlackTree::iter`].
pub struct Traverse<'a, K, V> {
    arena: &'a Arena<K, V>,
    order: TraversalOrder,
    /// Pending nodes; the flag records whether the node's children have
    /// already been scheduled.
    stack: Vec<(NodeId, bool)>,
    remaining: usize,
}

impl<'a, K, V> Traverse<'a, K, V> {
    pub(super) fn new(
        arena: &'a Arena<K, V>,
        root: NodeId,
        length: usize,
        order: TraversalOrder,
    ) -> Self {
        let mut stack = Vec::new();
        if !root.is_nil() {
            stack.push((root, false));
        }
        Self {
            arena,
            order,
            stack,
            remaining: length,
        }
    }

    /// The order this iterator visits nodes in.
    pub const fn order(&self) -> TraversalOrder {
        self.order
    }

    fn schedule(&mut self, id: NodeId) {
        if !id.is_nil() {
            self.stack.push((id, false));
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                return Some(id);
            }
            let node = &self.arena[id];
            let (left, right) = (node.left, node.right);
            match self.order {
                TraversalOrder::PreOrder => {
                    self.schedule(right);
                    self.schedule(left);
                    return Some(id);
                }
                TraversalOrder::InOrder => {
                    self.schedule(right);
                    self.stack.push((id, true));
                    self.schedule(left);
                }
                TraversalOrder::PostOrder => {
                    self.stack.push((id, true));
                    self.schedule(right);
                    self.schedule(left);
                }
            }
        }
        None
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next_id()?;
        self.remaining = self.remaining.saturating_sub(1);
        self.arena.entry(id).map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Traverse<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}

impl<K, V> Clone for Traverse<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Traverse<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Traverse")
            .field("order", &self.order)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// An owning iterator over the entries of a [`RedBlackTree`] in key order.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for RedBlackTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let order: Vec<NodeId> = {
            let mut ids = Traverse::new(&self.arena, self.root, self.length, TraversalOrder::InOrder);
            std::iter::from_fn(|| ids.next_id()).collect()
        };
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|id| self.arena.take_entry(id))
            .collect();
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Traverse<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
