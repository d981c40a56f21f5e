//! Rotation primitives.
//!
//! Rotations are the only operations that restructure parent/child links.
//! Every fixup case in [`insert`](super::insert) and [`delete`](super::delete)
//! is a bounded sequence of these plus color flips.

use super::RedBlackTree;
use super::arena::NodeId;

/// A side of a node, or the direction of a rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The left child, or a left rotation (right child moves up).
    Left,
    /// The right child, or a right rotation (left child moves up).
    Right,
}

impl Direction {
    /// Returns the mirror image of this direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    /// Pivots `node` down towards `direction`, lifting its child on the
    /// opposite side into its place.
    ///
    /// The in-order sequence is unchanged. The child being lifted must not be
    /// the sentinel.
    pub(super) fn rotate(&mut self, node: NodeId, direction: Direction) {
        let pivot = self.arena[node].child(direction.opposite());
        debug_assert!(!pivot.is_nil(), "rotation pivot must not be the sentinel");

        let inner = self.arena[pivot].child(direction);
        self.arena[node].set_child(direction.opposite(), inner);
        if !inner.is_nil() {
            self.arena[inner].parent = node;
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, node, pivot);

        self.arena[pivot].set_child(direction, node);
        self.arena[node].parent = pivot;
    }

    /// Puts the subtree rooted at `replacement` where `target` hangs.
    ///
    /// `replacement.parent` is written even when `replacement` is the
    /// sentinel; deletion fixup relies on it to walk up from an empty slot.
    pub(super) fn transplant(&mut self, target: NodeId, replacement: NodeId) {
        let parent = self.arena[target].parent;
        self.replace_child(parent, target, replacement);
        self.arena[replacement].parent = parent;
    }

    /// Which side of its parent `node` hangs on.
    #[inline]
    pub(super) fn side_of(&self, node: NodeId) -> Direction {
        let parent = self.arena[node].parent;
        if self.arena[parent].left == node {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.arena[parent].left == old {
            self.arena[parent].left = new;
        } else {
            self.arena[parent].right = new;
        }
    }
}
