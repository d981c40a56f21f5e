//! Pluggable key orderings.
//!
//! A [`RedBlackTree`](crate::tree::RedBlackTree) never calls `Ord` directly.
//! Every key comparison goes through the [`Comparator`] the tree was built
//! with, so the same engine can order keys naturally, in reverse, or by any
//! caller-supplied rule.
//!
//! # Contract
//!
//! A comparator must define a strict total order over the keys it is used
//! with: it must be consistent (the same two keys always compare the same
//! way), antisymmetric and transitive. The tree does not detect a broken
//! comparator. Any misplacement that results is the caller's contract breach;
//! [`RedBlackTree::check_invariants`](crate::tree::RedBlackTree::check_invariants)
//! may report it as an ordering violation.
//!
//! # Examples
//!
//! ```rust
//! use rbarena::comparator::{self, Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
//!
//! let by_length = comparator::by(|left: &&str, right: &&str| left.len().cmp(&right.len()));
//! assert_eq!(by_length.compare(&"ab", &"c"), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A total order over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys, returning how `left` orders relative to `right`.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

impl<K: ?Sized, C: Comparator<K> + ?Sized> Comparator<K> for &C {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (**self).compare(left, right)
    }
}

/// Orders keys by their [`Ord`] implementation (ascending).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation (descending).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        right.cmp(left)
    }
}

/// Adapts a closure `Fn(&K, &K) -> Ordering` into a [`Comparator`].
///
/// # Examples
///
/// ```rust
/// use rbarena::comparator::{Comparator, FnComparator};
/// use std::cmp::Ordering;
///
/// let case_insensitive = FnComparator::new(|left: &String, right: &String| {
///     left.to_lowercase().cmp(&right.to_lowercase())
/// });
/// assert_eq!(
///     case_insensitive.compare(&"Apple".to_string(), &"apple".to_string()),
///     Ordering::Equal
/// );
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    function: F,
}

impl<F> FnComparator<F> {
    /// Wraps `function` as a comparator.
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<K: ?Sized, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.function)(left, right)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("FnComparator")
    }
}

/// Shorthand for [`FnComparator::new`].
pub const fn by<F>(function: F) -> FnComparator<F> {
    FnComparator::new(function)
}
