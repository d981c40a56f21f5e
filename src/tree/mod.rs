//! Arena-backed red-black tree.
//!
//! This module provides [`RedBlackTree`], a mutable ordered map whose keys are
//! ordered by a pluggable [`Comparator`].
//!
//! # Overview
//!
//! - O(log N) search
//! - O(log N) insert
//! - O(log N) delete
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! Nodes live in an arena and link to each other by [`NodeId`]. Slot 0 is a
//! black sentinel standing in for every missing child and for the root's
//! parent. After every public operation:
//!
//! 1. The root is black
//! 2. No red node has a red child
//! 3. Every path from a node to a descendant sentinel crosses the same number
//!    of black nodes
//! 4. In-order keys strictly increase under the comparator
//!
//! These invariants keep the height at most `2 * log2(N + 1)`.
//!
//! # Examples
//!
//! ```rust
//! use rbarena::{RedBlackTree, TraversalOrder};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [5, 3, 8, 1, 4] {
//!     tree.insert(key, key * 100);
//! }
//!
//! assert_eq!(tree.search(&4).map(|node| *node.value()), Some(400));
//! assert_eq!(tree.delete(&3), Some((3, 300)));
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &4, &5, &8]);
//!
//! let pre_order: Vec<i32> = tree
//!     .traverse(TraversalOrder::PreOrder)
//!     .map(|(key, _)| *key)
//!     .collect();
//! assert_eq!(pre_order.len(), 4);
//! assert!(tree.is_valid());
//! ```

mod arena;
mod delete;
mod insert;
mod invariant;
mod node_ref;
mod printer;
mod rotation;
mod traverse;

pub use arena::{Color, NodeId};
pub use invariant::{InvariantReport, InvariantViolation};
pub use node_ref::NodeRef;
pub use printer::TreePrinter;
pub use rotation::Direction;
pub use traverse::{IntoIter, TraversalOrder, Traverse};

use std::cmp::Ordering;
use std::fmt;

use crate::comparator::{Comparator, NaturalOrder};
use arena::Arena;

/// A mutable ordered map based on a red-black tree.
///
/// Keys are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`]. Inserting a key that is already present replaces its
/// value in place.
///
/// # Time Complexity
///
/// | Operation          | Complexity |
/// |--------------------|------------|
/// | `new`              | O(1)       |
/// | `search` / `get`   | O(log N)   |
/// | `insert`           | O(log N)   |
/// | `delete`           | O(log N)   |
/// | `min` / `max`      | O(log N)   |
/// | `check_invariants` | O(N)       |
/// | `len`              | O(1)       |
///
/// # Examples
///
/// ```rust
/// use rbarena::RedBlackTree;
/// use rbarena::comparator::ReverseOrder;
///
/// let mut tree = RedBlackTree::with_comparator(ReverseOrder);
/// tree.insert(1, "one");
/// tree.insert(3, "three");
/// tree.insert(2, "two");
///
/// let keys: Vec<&i32> = tree.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K, V, C = NaturalOrder> {
    arena: Arena<K, V>,
    root: NodeId,
    length: usize,
    comparator: C,
}

/// Where a key lives, or where it would be linked.
enum Probe {
    Found(NodeId),
    Vacant { parent: NodeId, direction: Direction },
}

impl<K, V> RedBlackTree<K, V, NaturalOrder> {
    /// Creates an empty tree ordered by the keys' [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, String> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    /// use rbarena::comparator;
    ///
    /// let mut tree = RedBlackTree::with_comparator(comparator::by(|left: &String, right: &String| {
    ///     left.len().cmp(&right.len())
    /// }));
    /// tree.insert("ccc".to_string(), 3);
    /// tree.insert("a".to_string(), 1);
    /// assert_eq!(tree.min(), Some((&"a".to_string(), &1)));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: NodeId::NIL,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator ordering this tree.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        NodeRef::new(&self.arena, self.root)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, ()> = (0..7).map(|key| (key, ())).collect();
    /// assert!(tree.height() <= 4);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level = vec![self.root];
        while level.iter().any(|id| !id.is_nil()) {
            height += 1;
            level = level
                .into_iter()
                .filter(|id| !id.is_nil())
                .flat_map(|id| [self.arena[id].left, self.arena[id].right])
                .collect();
        }
        height
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.length, "clearing tree");
        self.arena.clear();
        self.root = NodeId::NIL;
        self.length = 0;
    }

    /// Returns the entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.extreme(Direction::Left)
    }

    /// Returns the entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.extreme(Direction::Right)
    }

    fn extreme(&self, direction: Direction) -> Option<(&K, &V)> {
        if self.root.is_nil() {
            return None;
        }
        let mut current = self.root;
        while !self.arena[current].child(direction).is_nil() {
            current = self.arena[current].child(direction);
        }
        self.arena.entry(current).map(|(key, value)| (key, value))
    }

    /// The leftmost node of the subtree rooted at `id`.
    fn minimum(&self, mut id: NodeId) -> NodeId {
        while !self.arena[id].left.is_nil() {
            id = self.arena[id].left;
        }
        id
    }

    /// Returns a lazy iterator over the entries in the given order.
    ///
    /// The iterator borrows the tree, never allocates more than the tree's
    /// height in stack entries, and can be restarted by cloning it or by
    /// calling `traverse` again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::{RedBlackTree, TraversalOrder};
    ///
    /// let tree: RedBlackTree<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let post_order: Vec<i32> = tree
    ///     .traverse(TraversalOrder::PostOrder)
    ///     .map(|(key, _)| *key)
    ///     .collect();
    /// assert_eq!(post_order, vec![1, 3, 2]);
    /// ```
    pub fn traverse(&self, order: TraversalOrder) -> Traverse<'_, K, V> {
        Traverse::new(&self.arena, self.root, self.length, order)
    }

    /// Returns an iterator over the entries in ascending key order.
    pub fn iter(&self) -> Traverse<'_, K, V> {
        self.traverse(TraversalOrder::InOrder)
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    fn probe(&self, key: &K) -> Probe {
        let mut parent = NodeId::NIL;
        let mut direction = Direction::Left;
        let mut current = self.root;
        while let Some(node_key) = self.arena.key(current) {
            direction = match self.comparator.compare(key, node_key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return Probe::Found(current),
            };
            parent = current;
            current = self.arena[current].child(direction);
        }
        Probe::Vacant { parent, direction }
    }

    /// Finds the node holding `key`.
    ///
    /// Returns `None` when the key is absent.
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
    /// tree.insert(42, "answer");
    ///
    /// let node = tree.search(&42).unwrap();
    /// assert_eq!(node.value(), &"answer");
    /// assert!(tree.search(&7).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        match self.probe(key) {
            Probe::Found(id) => NodeRef::new(&self.arena, id),
            Probe::Vacant { .. } => None,
        }
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.search(key).map(|node| (node.key(), node.value()))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert("hits", 1);
    /// if let Some(hits) = tree.get_mut(&"hits") {
    ///     *hits += 1;
    /// }
    /// assert_eq!(tree.get(&"hits"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(id) => self.arena.entry_mut(id).map(|(_, value)| value),
            Probe::Vacant { .. } => None,
        }
    }

    /// Returns `true` if the tree holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for RedBlackTree<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RedBlackTree<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RedBlackTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RedBlackTree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RedBlackTree<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RedBlackTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for RedBlackTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for RedBlackTree<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct RedBlackTreeVisitor<K, V, C> {
    marker: std::marker::PhantomData<fn() -> RedBlackTree<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for RedBlackTreeVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = RedBlackTree<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Later duplicates overwrite earlier ones, as with `insert`.
        let mut tree = RedBlackTree::default();
        while let Some((key, value)) = access.next_entry()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for RedBlackTree<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
