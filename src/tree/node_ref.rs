//! Read-only views of individual nodes.

use std::fmt;

use super::arena::{Arena, Color, NodeId};

/// A read-only view of one node of a [`RedBlackTree`](super::RedBlackTree).
///
/// Returned by [`search`](super::RedBlackTree::search) and
/// [`root`](super::RedBlackTree::root). A `NodeRef` never refers to the
/// sentinel: every link accessor returns `None` where the tree has no node.
///
/// # Examples
///
/// ```rust
/// use rbarena::{Color, RedBlackTree};
///
/// let tree: RedBlackTree<i32, &str> = [(2, "two"), (1, "one"), (3, "three")]
///     .into_iter()
///     .collect();
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.left().map(|node| *node.value()), Some("one"));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, K, V> {
    arena: &'a Arena<K, V>,
    id: NodeId,
    key: &'a K,
    value: &'a V,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    /// Returns `None` for the sentinel and for vacated slots.
    pub(super) fn new(arena: &'a Arena<K, V>, id: NodeId) -> Option<Self> {
        arena.entry(id).map(|(key, value)| Self {
            arena,
            id,
            key,
            value,
        })
    }

    /// The node's key.
    pub const fn key(&self) -> &'a K {
        self.key
    }

    /// The node's value.
    pub const fn value(&self) -> &'a V {
        self.value
    }

    /// The node's handle.
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The node's color.
    pub fn color(&self) -> Color {
        self.arena[self.id].color
    }

    /// Returns `true` if the node is red.
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    /// Returns `true` if the node is black.
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        Self::new(self.arena, self.arena[self.id].left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        Self::new(self.arena, self.arena[self.id].right)
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.arena, self.arena[self.id].parent)
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("id", &self.id.index())
            .field("key", self.key)
            .field("value", self.value)
            .field("color", &self.color())
            .finish()
    }
}
