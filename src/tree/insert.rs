//! Insertion and the insertion-fixup state machine.

use tracing::trace;

use super::arena::{Color, NodeId};
use super::{Probe, RedBlackTree};
use crate::comparator::Comparator;

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    /// Inserts a key-value pair into the tree.
    ///
    /// If the key is already present (equal under the comparator), its value
    /// is replaced in place and the previous value is returned. The stored key,
    /// the tree's shape and its size are left untouched in that case.
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
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.insert(1, "one"), None);
    /// assert_eq!(tree.insert(1, "uno"), Some("one"));
    /// assert_eq!(tree.get(&1), Some(&"uno"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.probe(&key) {
            Probe::Found(id) => self
                .arena
                .entry_mut(id)
                .map(|(_, slot)| std::mem::replace(slot, value)),
            Probe::Vacant { parent, direction } => {
                let id = self.arena.allocate(key, value, parent);
                if parent.is_nil() {
                    self.root = id;
                } else {
                    self.arena[parent].set_child(direction, id);
                }
                self.length += 1;
                self.insert_fixup(id);
                None
            }
        }
    }

    /// Restores the red-black invariants after `node` was linked in red.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while self.arena[self.arena[node].parent].is_red() {
            // A red parent is never the root, so the grandparent is a real node.
            let parent = self.arena[node].parent;
            let grandparent = self.arena[parent].parent;
            let side = self.side_of(parent);
            let uncle = self.arena[grandparent].child(side.opposite());

            if self.arena[uncle].is_red() {
                trace!(node = node.index(), "insert fixup: red uncle, recoloring");
                self.arena[parent].color = Color::Black;
                self.arena[uncle].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            if node == self.arena[parent].child(side.opposite()) {
                trace!(node = node.index(), "insert fixup: inner child, rotating parent");
                node = parent;
                self.rotate(node, side);
            }

            trace!(node = node.index(), "insert fixup: outer child, rotating grandparent");
            let parent = self.arena[node].parent;
            let grandparent = self.arena[parent].parent;
            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.arena[root].color = Color::Black;
    }
}
