//! # rbarena
//!
//! An in-memory ordered map built on an arena-backed red-black tree, keyed by
//! a pluggable comparator.
//!
//! ## Overview
//!
//! - **Tree**: [`RedBlackTree`] with O(log N) search, insert and delete, a
//!   sentinel-based engine that stores nodes in an arena and links them by
//!   index, and an invariant checker for test harnesses
//! - **Comparators**: [`comparator::NaturalOrder`], [`comparator::ReverseOrder`]
//!   and closure-backed [`comparator::FnComparator`]
//! - **Traversal**: lazy, restartable pre-, in- and post-order iterators
//! - **Printer**: [`TreePrinter`] renders a tree as box-drawing text
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RedBlackTree`] (as a map)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use rbarena::prelude::*;
//!
//! let mut tree = RedBlackTree::new();
//! for key in 1..=8 {
//!     tree.insert(key, key.to_string());
//! }
//!
//! assert_eq!(tree.get(&2), Some(&"2".to_string()));
//! assert!(tree.check_invariants().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use rbarena::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::{Comparator, FnComparator, NaturalOrder, ReverseOrder};
    pub use crate::tree::{
        Color, InvariantReport, InvariantViolation, NodeRef, RedBlackTree, TraversalOrder,
        TreePrinter,
    };
}

pub mod comparator;
pub mod tree;

pub use tree::{Color, NodeId, NodeRef, RedBlackTree, TraversalOrder, TreePrinter};
