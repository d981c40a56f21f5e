//! Node storage for the red-black engine.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Slot 0 is the
//! sentinel: it is black, its links point to itself, and it never carries an
//! entry. Every "missing" child or parent is spelled [`NodeId::NIL`], so the
//! rotation and fixup code never branches on `Option`.
//!
//! Deleted nodes are vacated and their slots pushed onto a free list; the next
//! allocation reuses a vacated slot before growing the vector.

use std::ops::{Index, IndexMut};

use super::rotation::Direction;

/// Stable handle to a node inside a tree's arena.
///
/// A `NodeId` stays attached to the same entry for as long as that entry is
/// in the tree. Once the entry is deleted its slot may be recycled by a later
/// insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel slot.
    pub(super) const NIL: Self = Self(0);

    /// Returns the arena slot index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(super) const fn is_nil(self) -> bool {
        self.0 == Self::NIL.0
    }
}

/// The color of a red-black tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Its children must both be black.
    Red,
    /// A black node. Counts towards the black-height of every path through it.
    Black,
}

#[derive(Clone, Debug)]
pub(super) struct Node<K, V> {
    /// `None` for the sentinel and for vacated slots.
    pub(super) entry: Option<(K, V)>,
    pub(super) color: Color,
    pub(super) parent: NodeId,
    pub(super) left: NodeId,
    pub(super) right: NodeId,
}

impl<K, V> Node<K, V> {
    const fn sentinel() -> Self {
        Self {
            entry: None,
            color: Color::Black,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    #[inline]
    pub(super) const fn child(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(super) const fn set_child(&mut self, direction: Direction, child: NodeId) {
        match direction {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    #[inline]
    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(super) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

#[derive(Clone, Debug)]
pub(super) struct Arena<K, V> {
    slots: Vec<Node<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(super) fn new() -> Self {
        Self {
            slots: vec![Node::sentinel()],
            free: Vec::new(),
        }
    }

    /// Stores a new red leaf under `parent` and returns its handle.
    pub(super) fn allocate(&mut self, key: K, value: V, parent: NodeId) -> NodeId {
        let node = Node {
            entry: Some((key, value)),
            color: Color::Red,
            parent,
            left: NodeId::NIL,
            right: NodeId::NIL,
        };

        if let Some(id) = self.free.pop() {
            tracing::trace!(slot = id.index(), "reusing vacated arena slot");
            self.slots[id.0] = node;
            id
        } else {
            self.slots.push(node);
            NodeId(self.slots.len() - 1)
        }
    }

    /// Vacates `id`, handing back its entry and recycling the slot.
    pub(super) fn release(&mut self, id: NodeId) -> Option<(K, V)> {
        if id.is_nil() {
            return None;
        }
        let node = &mut self.slots[id.0];
        let entry = node.entry.take();
        *node = Node::sentinel();
        if entry.is_some() {
            self.free.push(id);
        }
        entry
    }

    /// Drops every node except the sentinel.
    pub(super) fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Node::sentinel();
        self.free.clear();
    }

    #[inline]
    pub(super) fn entry(&self, id: NodeId) -> Option<&(K, V)> {
        self.slots[id.0].entry.as_ref()
    }

    #[inline]
    pub(super) fn entry_mut(&mut self, id: NodeId) -> Option<&mut (K, V)> {
        self.slots[id.0].entry.as_mut()
    }

    #[inline]
    pub(super) fn key(&self, id: NodeId) -> Option<&K> {
        self.entry(id).map(|(key, _)| key)
    }

    /// Number of slots, sentinel included.
    #[inline]
    pub(super) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Moves the entry out of `id` without touching links or the free list.
    pub(super) fn take_entry(&mut self, id: NodeId) -> Option<(K, V)> {
        self.slots[id.0].entry.take()
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.slots[id.0]
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.slots[id.0]
    }
}
