use core::fmt;

use super::AvlTree;
use crate::Handle;

const INDENT: &str = "    ";

/// Renders a subtree sideways, for debugging.
///
/// The right subtree is printed above its parent and the left subtree below,
/// each level indented by four spaces, so the output reads as the tree
/// rotated a quarter turn counter-clockwise. Every node line has the form
/// `--> V: {key}, H: {height}, S: {size}`.
///
/// This `struct` is created by the [`printer`] method on [`AvlTree`]. The
/// tree's [`Display`](fmt::Display) implementation prints from the root.
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let tree = AvlTree::from([2, 1, 3]);
/// assert_eq!(
///     tree.to_string(),
///     "    --> V: 3, H: 1, S: 1\n--> V: 2, H: 2, S: 3\n    --> V: 1, H: 1, S: 1\n"
/// );
/// ```
///
/// [`printer`]: AvlTree::printer
#[derive(Clone, Copy)]
pub struct TreePrinter<'a> {
    tree: &'a AvlTree,
    node: Option<Handle>,
}

impl AvlTree {
    /// Returns a [`TreePrinter`] for the subtree at `node`.
    pub fn printer(&self, node: Option<Handle>) -> TreePrinter<'_> {
        TreePrinter { tree: self, node }
    }
}

impl TreePrinter<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: Option<Handle>, depth: usize) -> fmt::Result {
        let Some(node) = node else {
            return Ok(());
        };

        self.write_node(f, self.tree.right(node), depth + 1)?;
        for _ in 0..depth {
            f.write_str(INDENT)?;
        }
        writeln!(
            f,
            "--> V: {}, H: {}, S: {}",
            self.tree.key(node),
            self.tree.height(Some(node)),
            self.tree.size(Some(node))
        )?;
        self.write_node(f, self.tree.left(node), depth + 1)
    }
}

impl fmt::Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.node, 0)
    }
}

impl fmt::Debug for TreePrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.printer(self.root()), f)
    }
}
