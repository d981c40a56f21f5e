//! Invariant checker.
//!
//! A diagnostic for test harnesses: it walks the whole tree and never mutates
//! or repairs it.

use std::cmp::Ordering;
use std::fmt;

use super::RedBlackTree;
use super::arena::NodeId;
use crate::comparator::Comparator;

/// A broken red-black or search-tree invariant.
///
/// Offending keys are carried in their `Debug` rendering, so a violation
/// outlives the tree it was found in.
///
/// # Examples
///
/// ```rust
/// use rbarena::tree::InvariantViolation;
///
/// let violation = InvariantViolation::RedRoot;
/// assert_eq!(format!("{violation}"), "the root is red");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The sentinel was recolored red.
    SentinelNotBlack,
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedRedViolation {
        /// Key of the red parent.
        key: String,
    },
    /// The two subtrees of a node have different black-heights.
    BlackHeightMismatch {
        /// Key of the node whose subtrees disagree.
        key: String,
        /// Black nodes on each path through the left subtree.
        left: usize,
        /// Black nodes on each path through the right subtree.
        right: usize,
    },
    /// In-order keys are not strictly increasing under the comparator.
    OrderViolation {
        /// Key that is not greater than its in-order predecessor.
        key: String,
    },
    /// A child's parent link does not point back at its parent.
    BrokenParentLink {
        /// Key of the child.
        key: String,
    },
    /// The number of reachable nodes disagrees with the recorded size.
    SizeMismatch {
        /// The size the tree records.
        expected: usize,
        /// The number of nodes reached from the root.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SentinelNotBlack => write!(formatter, "the sentinel is not black"),
            Self::RedRoot => write!(formatter, "the root is red"),
            Self::RedRedViolation { key } => {
                write!(formatter, "red node {key} has a red child")
            }
            Self::BlackHeightMismatch { key, left, right } => write!(
                formatter,
                "node {key} has black-height {left} on the left and {right} on the right"
            ),
            Self::OrderViolation { key } => {
                write!(formatter, "node {key} is out of order")
            }
            Self::BrokenParentLink { key } => {
                write!(formatter, "node {key} does not link back to its parent")
            }
            Self::SizeMismatch { expected, actual } => write!(
                formatter,
                "tree records {expected} entries but {actual} are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Shape statistics of a tree that passed [`RedBlackTree::check_invariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantReport {
    /// Black nodes on every path from the root (exclusive) to the sentinel
    /// (inclusive). Zero for an empty tree.
    pub black_height: usize,
    /// Nodes on the longest root-to-leaf path. Zero for an empty tree.
    pub height: usize,
    /// Number of entries.
    pub len: usize,
}

struct Walk<'a, K> {
    previous: Option<&'a K>,
    visited: usize,
    budget: usize,
}

impl<K: fmt::Debug, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    /// Verifies every red-black and search-tree invariant.
    ///
    /// Checks that the root and the sentinel are black, that no red node has a
    /// red child, that black-heights agree on both sides of every node, that
    /// in-order keys strictly increase under the comparator, that parent links
    /// mirror child links, and that the recorded size matches the reachable
    /// node count.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, ()> = (1..=8).map(|key| (key, ())).collect();
    /// let report = tree.check_invariants().unwrap();
    /// assert_eq!(report.len, 8);
    /// assert!(report.height <= 2 * 4);
    /// ```
    pub fn check_invariants(&self) -> Result<InvariantReport, InvariantViolation> {
        if self.arena[NodeId::NIL].is_red() {
            return Err(InvariantViolation::SentinelNotBlack);
        }
        if self.arena[self.root].is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.root.is_nil() && !self.arena[self.root].parent.is_nil() {
            return Err(InvariantViolation::BrokenParentLink {
                key: self.describe(self.root),
            });
        }

        let mut walk = Walk {
            previous: None,
            visited: 0,
            budget: self.arena.slot_count(),
        };
        let (black_height, height) = self.check_subtree(self.root, &mut walk)?;

        if walk.visited != self.length {
            return Err(InvariantViolation::SizeMismatch {
                expected: self.length,
                actual: walk.visited,
            });
        }

        Ok(InvariantReport {
            black_height,
            height,
            len: self.length,
        })
    }

    /// Returns `true` if [`check_invariants`](Self::check_invariants) passes.
    pub fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }

    fn describe(&self, id: NodeId) -> String {
        self.arena
            .key(id)
            .map_or_else(String::new, |key| format!("{key:?}"))
    }

    /// Returns `(black_height, height)` of the subtree at `id`, counting black
    /// nodes from `id` inclusive down to the sentinel exclusive. For a black
    /// root that equals the root's black-height with the sentinel counted.
    fn check_subtree<'a>(
        &'a self,
        id: NodeId,
        walk: &mut Walk<'a, K>,
    ) -> Result<(usize, usize), InvariantViolation> {
        let Some((key, _)) = self.arena.entry(id) else {
            return Ok((0, 0));
        };

        walk.visited += 1;
        if walk.visited > walk.budget {
            // More visits than slots: the links form a cycle.
            return Err(InvariantViolation::SizeMismatch {
                expected: self.length,
                actual: walk.visited,
            });
        }

        let node = &self.arena[id];
        for child in [node.left, node.right] {
            if child.is_nil() {
                continue;
            }
            if self.arena[child].parent != id {
                return Err(InvariantViolation::BrokenParentLink {
                    key: self.describe(child),
                });
            }
            if node.is_red() && self.arena[child].is_red() {
                return Err(InvariantViolation::RedRedViolation {
                    key: format!("{key:?}"),
                });
            }
        }

        let (left_black, left_height) = self.check_subtree(node.left, walk)?;

        if let Some(previous) = walk.previous
            && self.comparator.compare(previous, key) != Ordering::Less
        {
            return Err(InvariantViolation::OrderViolation {
                key: format!("{key:?}"),
            });
        }
        walk.previous = Some(key);

        let (right_black, right_height) = self.check_subtree(node.right, walk)?;

        if left_black != right_black {
            return Err(InvariantViolation::BlackHeightMismatch {
                key: format!("{key:?}"),
                left: left_black,
                right: right_black,
            });
        }

        Ok((
            left_black + usize::from(node.is_black()),
            left_height.max(right_height) + 1,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::FnComparator;
    use crate::tree::arena::Color;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> RedBlackTree<i32, i32> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        let tree: RedBlackTree<i32, i32> = RedBlackTree::new();
        assert_eq!(
            tree.check_invariants(),
            Ok(InvariantReport {
                black_height: 0,
                height: 0,
                len: 0
            })
        );
    }

    #[rstest]
    fn test_single_node_report() {
        let tree = tree_of(&[1]);
        assert_eq!(
            tree.check_invariants(),
            Ok(InvariantReport {
                black_height: 1,
                height: 1,
                len: 1
            })
        );
    }

    #[rstest]
    fn test_perfect_tree_report() {
        let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let report = tree.check_invariants().unwrap();
        assert_eq!(report.height, 3);
        assert_eq!(report.black_height, 2);
        assert_eq!(report.len, 7);
    }

    #[rstest]
    fn test_detects_red_root() {
        let mut tree = tree_of(&[1, 2]);
        let root = tree.root;
        tree.arena[root].color = Color::Red;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
        assert!(!tree.is_valid());
    }

    #[rstest]
    fn test_detects_red_red() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        // 3 is black with a red right child 4.
        let three = tree.search(&3).unwrap().id();
        tree.arena[three].color = Color::Red;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRedViolation {
                key: "3".to_string()
            })
        );
    }

    #[rstest]
    fn test_violation_names_key_with_debug() {
        let mut tree: RedBlackTree<&str, ()> =
            ["b", "a", "c", "d"].into_iter().map(|key| (key, ())).collect();
        // c is black with a red right child d.
        let c = tree.search(&"c").unwrap().id();
        tree.arena[c].color = Color::Red;
        let violation = tree.check_invariants().unwrap_err();
        assert_eq!(
            violation,
            InvariantViolation::RedRedViolation {
                key: "\"c\"".to_string()
            }
        );
        assert_eq!(violation.to_string(), "red node \"c\" has a red child");
    }

    #[rstest]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = tree.search(&1).unwrap().id();
        tree.arena[one].color = Color::Black;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeightMismatch {
                key: "2".to_string(),
                left: 1,
                right: 0
            })
        );
    }

    #[rstest]
    fn test_detects_broken_parent_link() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = tree.search(&1).unwrap().id();
        let three = tree.search(&3).unwrap().id();
        tree.arena[one].parent = three;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BrokenParentLink {
                key: "1".to_string()
            })
        );
    }

    #[rstest]
    fn test_detects_size_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        tree.length = 4;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[rstest]
    fn test_detects_out_of_order_keys() {
        let mut tree = RedBlackTree::with_comparator(FnComparator::new(
            |left: &i32, right: &i32| left.cmp(right),
        ));
        for key in [2, 1, 3] {
            tree.insert(key, ());
        }
        // Swap the keys of the two leaves behind the engine's back.
        let one = tree.search(&1).unwrap().id();
        let three = tree.search(&3).unwrap().id();
        let left = tree.arena.take_entry(one);
        let right = tree.arena.take_entry(three);
        tree.arena[one].entry = right;
        tree.arena[three].entry = left;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::OrderViolation {
                key: "2".to_string()
            })
        );
    }

    #[rstest]
    #[case(InvariantViolation::SentinelNotBlack, "the sentinel is not black")]
    #[case(
        InvariantViolation::RedRedViolation { key: "3".to_string() },
        "red node 3 has a red child"
    )]
    #[case(
        InvariantViolation::BlackHeightMismatch { key: "1".to_string(), left: 2, right: 1 },
        "node 1 has black-height 2 on the left and 1 on the right"
    )]
    #[case(
        InvariantViolation::OrderViolation { key: "\"b\"".to_string() },
        "node \"b\" is out of order"
    )]
    #[case(
        InvariantViolation::BrokenParentLink { key: "7".to_string() },
        "node 7 does not link back to its parent"
    )]
    #[case(
        InvariantViolation::SizeMismatch { expected: 4, actual: 3 },
        "tree records 4 entries but 3 are reachable"
    )]
    fn test_violation_display(#[case] violation: InvariantViolation, #[case] expected: &str) {
        assert_eq!(violation.to_string(), expected);
    }
}
