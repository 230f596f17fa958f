//! The [`AvlTree`] collection and its iterators.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawAvlTree};

mod capacity;
mod order_statistic;
mod printer;

pub use printer::TreePrinter;

/// An ordered set of `i64` keys based on an AVL tree with subtree sizes.
///
/// Keys are inserted one at a time; a key that is already present is
/// ignored. Insertion keeps every node's left and right subtree heights
/// within one of each other, so the tree height, and with it the cost of
/// [`insert`](AvlTree::insert), [`find`](AvlTree::find),
/// [`select`](AvlTree::select) and [`rank`](AvlTree::rank), is O(log n).
///
/// Nodes are addressed by [`Handle`]. A handle returned by this tree stays
/// valid until [`clear`](AvlTree::clear); rotations change which nodes a
/// handle's node is linked to, never its key.
///
/// Cloning a tree produces an independent snapshot in which every handle of
/// the original addresses the same key.
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(3);
/// tree.insert(1);
/// tree.insert(2);
/// tree.insert(2);
///
/// assert_eq!(tree.len(), 3);
/// assert!(tree.contains(2));
/// assert!(tree.iter().eq([1, 2, 3]));
/// ```
///
/// A tree with a known list of keys can be initialized from an array:
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let tree = AvlTree::from([10, 20, 30]);
/// assert_eq!(tree.get_by_rank(2), Some(20));
/// ```
#[derive(Clone)]
pub struct AvlTree {
    raw: RawAvlTree,
}

/// An iterator over the handles of an [`AvlTree`], in ascending key order.
///
/// This `struct` is created by the [`handles`] method on [`AvlTree`].
///
/// [`handles`]: AvlTree::handles
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Handles<'a> {
    tree: &'a RawAvlTree,
    // Nodes whose left subtree is done and which have not been yielded yet.
    stack: Vec<Handle>,
    remaining: usize,
}

/// An iterator over the keys of an [`AvlTree`], in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let tree = AvlTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`iter`]: AvlTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    inner: Handles<'a>,
}

impl AvlTree {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.root(), None);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree {
            raw: RawAvlTree::new(),
        }
    }

    /// Makes a tree holding the single seed `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::with_root(10);
    /// let root = tree.root().unwrap();
    /// assert_eq!(tree.key(root), 10);
    /// assert_eq!(tree.height(Some(root)), 1);
    /// assert_eq!(tree.size(Some(root)), 1);
    /// ```
    #[must_use]
    pub fn with_root(key: i64) -> Self {
        let mut tree = AvlTree::new();
        tree.insert(key);
        tree
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key, invalidating all handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        log::debug!("clearing tree of {} keys", self.len());
        self.raw.clear();
    }

    /// Returns the root node, or `None` for an empty tree.
    #[must_use]
    pub const fn root(&self) -> Option<Handle> {
        self.raw.root()
    }

    /// Inserts `key` and returns the (possibly new) root.
    ///
    /// Inserting a key that is already present leaves the tree unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most two rotations.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes a
    /// [`Handle`] can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(10);
    /// tree.insert(20);
    /// let root = tree.insert(30);
    ///
    /// // The ascending chain was rotated around 20.
    /// assert_eq!(tree.key(root), 20);
    /// assert_eq!(tree.root(), Some(root));
    /// ```
    pub fn insert(&mut self, key: i64) -> Handle {
        self.raw.insert_at(None, key)
    }

    /// Inserts `key` below `root` and returns the new root.
    ///
    /// This is the threaded calling convention: pass the root returned by the
    /// previous call (or `None` to start from the tree's own root) and keep
    /// the returned one for the next call.
    ///
    /// # Panics
    ///
    /// Panics if `root` is `Some` but is not the current root of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// let mut root = None;
    /// for key in [5, 4, 3, 2, 1] {
    ///     root = Some(tree.insert_at(root, key));
    /// }
    /// assert_eq!(root, tree.root());
    /// assert_eq!(tree.size(root), 5);
    /// ```
    pub fn insert_at(&mut self, root: Option<Handle>, key: i64) -> Handle {
        self.raw.insert_at(root, key)
    }

    /// Returns the node holding `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3]);
    /// let node = tree.find(2).unwrap();
    /// assert_eq!(tree.key(node), 2);
    /// assert!(tree.find(4).is_none());
    /// ```
    #[must_use]
    pub fn find(&self, key: i64) -> Option<Handle> {
        self.raw.find(key)
    }

    /// Returns `true` if the tree holds `key`.
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<i64> {
        self.root().map(|root| self.key(self.raw.leftmost(root)))
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.root().map(|root| self.key(self.raw.rightmost(root)))
    }

    /// Returns the key stored at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn key(&self, node: Handle) -> i64 {
        self.raw.node(node).key()
    }

    /// Returns the left child of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn left(&self, node: Handle) -> Option<Handle> {
        self.raw.node(node).left()
    }

    /// Returns the right child of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn right(&self, node: Handle) -> Option<Handle> {
        self.raw.node(node).right()
    }

    /// Returns the parent of `node`, `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn parent(&self, node: Handle) -> Option<Handle> {
        self.raw.node(node).parent()
    }

    /// Returns the height of the subtree at `node`: 1 for a leaf, 0 for `None`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn height(&self, node: Option<Handle>) -> usize {
        self.raw.height(node)
    }

    /// Returns the number of keys in the subtree at `node`, 0 for `None`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    #[must_use]
    pub fn size(&self, node: Option<Handle>) -> usize {
        self.raw.size(node)
    }

    /// Returns the balance factor `height(left) - height(right)` of `node`,
    /// 0 for `None`. Always in `-1..=1` between operations.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not address a node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([2, 1]);
    /// assert_eq!(tree.balance(tree.root()), 1);
    /// assert_eq!(tree.balance(None), 0);
    /// ```
    #[must_use]
    pub fn balance(&self, node: Option<Handle>) -> isize {
        self.raw.balance(node)
    }

    /// Gets an iterator over the keys, in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.handles(),
        }
    }

    /// Gets an iterator over the node handles, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([30, 10, 20]);
    /// let ranks: Vec<usize> = tree.handles().map(|node| tree.rank(node)).collect();
    /// assert_eq!(ranks, [1, 2, 3]);
    /// ```
    pub fn handles(&self) -> Handles<'_> {
        let mut handles = Handles {
            tree: &self.raw,
            stack: Vec::with_capacity(self.height(self.root())),
            remaining: self.len(),
        };
        handles.push_left_spine(self.root());
        handles
    }
}

impl Handles<'_> {
    fn push_left_spine(&mut self, mut node: Option<Handle>) {
        while let Some(handle) = node {
            self.stack.push(handle);
            node = self.tree.node(handle).left();
        }
    }
}

impl Iterator for Handles<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.stack.pop()?;
        self.push_left_spine(self.tree.node(handle).right());
        self.remaining -= 1;
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Handles<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for Handles<'_> {}

impl fmt::Debug for Handles<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let handle = self.inner.next()?;
        Some(self.inner.tree.node(handle).key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl PartialEq for AvlTree {
    /// Trees are equal when they hold the same keys, whatever their shape.
    fn eq(&self, other: &AvlTree) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for AvlTree {}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl FromIterator<i64> for AvlTree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i64> for AvlTree {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> Extend<&'a i64> for AvlTree {
    fn extend<I: IntoIterator<Item = &'a i64>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}

impl<const N: usize> From<[i64; N]> for AvlTree {
    fn from(arr: [i64; N]) -> Self {
        arr.into_iter().collect()
    }
}
