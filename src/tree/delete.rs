//! Deletion and the deletion-fixup state machine.

use tracing::trace;

use super::arena::{Color, NodeId};
use super::rotation::Direction;
use super::{Probe, RedBlackTree};
use crate::comparator::Comparator;

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    /// Removes a key from the tree, returning the stored key and value.
    ///
    /// Returns `None`, leaving the tree untouched, when the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.delete(&1), Some((1, "one")));
    /// assert_eq!(tree.delete(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let Probe::Found(target) = self.probe(key) else {
            return None;
        };

        let left = self.arena[target].left;
        let right = self.arena[target].right;
        let mut removed_color = self.arena[target].color;
        let fixup_start;

        if left.is_nil() {
            fixup_start = right;
            self.transplant(target, right);
        } else if right.is_nil() {
            fixup_start = left;
            self.transplant(target, left);
        } else {
            let successor = self.minimum(right);
            removed_color = self.arena[successor].color;
            fixup_start = self.arena[successor].right;

            if self.arena[successor].parent == target {
                self.arena[fixup_start].parent = successor;
            } else {
                self.transplant(successor, fixup_start);
                self.arena[successor].right = right;
                self.arena[right].parent = successor;
            }

            self.transplant(target, successor);
            self.arena[successor].left = left;
            self.arena[left].parent = successor;
            self.arena[successor].color = self.arena[target].color;
        }

        if removed_color == Color::Black {
            self.delete_fixup(fixup_start);
        }
        self.arena[NodeId::NIL].parent = NodeId::NIL;

        self.length -= 1;
        self.arena.release(target)
    }

    /// Removes a key from the tree, returning its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert("answer", 42);
    /// assert_eq!(tree.remove(&"answer"), Some(42));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.delete(key).map(|(_, value)| value)
    }

    /// Restores the red-black invariants after a black node left the path
    /// through `node`.
    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.arena[node].is_black() {
            let parent = self.arena[node].parent;
            let side = if self.arena[parent].left == node {
                Direction::Left
            } else {
                Direction::Right
            };
            let mut sibling = self.sibling(parent, side);

            if self.arena[sibling].is_red() {
                trace!(node = node.index(), "delete fixup: red sibling, rotating parent");
                self.arena[sibling].color = Color::Black;
                self.arena[parent].color = Color::Red;
                self.rotate(parent, side);
                sibling = self.sibling(parent, side);
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(side.opposite());

            if self.arena[near].is_black() && self.arena[far].is_black() {
                trace!(node = node.index(), "delete fixup: black nephews, moving up");
                self.arena[sibling].color = Color::Red;
                node = parent;
                continue;
            }

            if self.arena[far].is_black() {
                trace!(node = node.index(), "delete fixup: red near nephew, rotating sibling");
                self.arena[near].color = Color::Black;
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self.sibling(parent, side);
            }

            trace!(node = node.index(), "delete fixup: red far nephew, rotating parent");
            let far = self.arena[sibling].child(side.opposite());
            self.arena[sibling].color = self.arena[parent].color;
            self.arena[parent].color = Color::Black;
            self.arena[far].color = Color::Black;
            self.rotate(parent, side);
            node = self.root;
        }

        self.arena[node].color = Color::Black;
    }

    /// The child of `parent` opposite `side`.
    ///
    /// # Panics
    ///
    /// Panics if that child is the sentinel. On a tree whose black-heights
    /// were uniform before the deletion the sibling of a black-deficient node
    /// always has a black-height of at least one, so reaching the sentinel
    /// means the tree was already corrupted.
    fn sibling(&self, parent: NodeId, side: Direction) -> NodeId {
        let sibling = self.arena[parent].child(side.opposite());
        assert!(
            !sibling.is_nil(),
            "deletion fixup found no sibling under node {}: black-height was already broken",
            parent.index()
        );
        sibling
    }
}
