//! Human-readable tree rendering.
//!
//! The printer sits outside the engine: it only reads nodes through
//! [`NodeRef`] and never sees fixup state.

use std::fmt::Display;

use super::RedBlackTree;
use super::node_ref::NodeRef;

const DEFAULT_MAX_LENGTH: usize = 20;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const PIPE_PADDING: &str = "│  ";
const BLANK_PADDING: &str = "   ";
const NIL_MARKER: &str = "·";

/// Renders trees and nodes as text.
///
/// # Examples
///
/// ```rust
/// use rbarena::{RedBlackTree, TreePrinter};
///
/// let tree: RedBlackTree<i32, i32> = [(10, 10), (5, 5), (15, 15)].into_iter().collect();
/// assert_eq!(TreePrinter::new().render(&tree), "10\n├──5\n└──15");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreePrinter {
    max_length: usize,
}

impl TreePrinter {
    /// Creates a printer that cuts node fields to 20 characters in
    /// [`details`](Self::details).
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Sets how many characters of each field [`details`](Self::details) keeps.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Renders the tree in pre-order, one value per line, with box-drawing
    /// branches. An empty tree renders as the empty string.
    pub fn render<K, V: Display, C>(&self, tree: &RedBlackTree<K, V, C>) -> String {
        let Some(root) = tree.root() else {
            return String::new();
        };

        let mut output = root.value().to_string();
        let right = root.right();
        let left_pointer = if right.is_some() { BRANCH } else { LAST_BRANCH };
        Self::render_child(&mut output, "", left_pointer, root.left(), right.is_some());
        Self::render_child(&mut output, "", LAST_BRANCH, right, false);
        output
    }

    fn render_child<K, V: Display>(
        output: &mut String,
        padding: &str,
        pointer: &str,
        node: Option<NodeRef<'_, K, V>>,
        has_right_sibling: bool,
    ) {
        let Some(node) = node else {
            return;
        };

        output.push('\n');
        output.push_str(padding);
        output.push_str(pointer);
        output.push_str(&node.value().to_string());

        let child_padding = format!(
            "{padding}{}",
            if has_right_sibling {
                PIPE_PADDING
            } else {
                BLANK_PADDING
            }
        );
        let right = node.right();
        let left_pointer = if right.is_some() { BRANCH } else { LAST_BRANCH };
        Self::render_child(
            output,
            &child_padding,
            left_pointer,
            node.left(),
            right.is_some(),
        );
        Self::render_child(output, &child_padding, LAST_BRANCH, right, false);
    }

    /// Compact one-node summary: `(left key:value right)` for a black node,
    /// `<left key:value right>` for a red one, with `·` for a missing child.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbarena::{RedBlackTree, TreePrinter};
    ///
    /// let tree: RedBlackTree<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
    /// let printer = TreePrinter::new();
    /// assert_eq!(printer.details(tree.root().unwrap()), "(1 2:two ·)");
    /// assert_eq!(printer.details(tree.search(&1).unwrap()), "<· 1:one ·>");
    /// ```
    pub fn details<K: Display, V: Display>(&self, node: NodeRef<'_, K, V>) -> String {
        let (open, close) = if node.is_black() { ('(', ')') } else { ('<', '>') };
        let child = |child: Option<NodeRef<K, V>>| {
            child.map_or_else(|| NIL_MARKER.to_string(), |child| self.cut(child.key()))
        };
        format!(
            "{open}{} {}:{} {}{close}",
            child(node.left()),
            self.cut(node.key()),
            self.cut(node.value()),
            child(node.right()),
        )
    }

    fn cut(&self, field: &impl Display) -> String {
        field.to_string().chars().take(self.max_length).collect()
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}
