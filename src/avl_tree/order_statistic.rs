use super::AvlTree;
use crate::Handle;

impl AvlTree {
    /// Returns the node whose key is the `i`-th smallest in the subtree at
    /// `node`.
    ///
    /// `i` is one-based. Returns `None` when `node` is `None` or `i` is
    /// outside `1..=size(node)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
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
    /// let tree = AvlTree::from([20, 10, 30, 5, 15, 25, 35]);
    ///
    /// let node = tree.select(tree.root(), 1).unwrap();
    /// assert_eq!(tree.key(node), 5);
    ///
    /// assert!(tree.select(tree.root(), 0).is_none());
    /// assert!(tree.select(tree.root(), 8).is_none());
    ///
    /// // Positions are relative to the subtree that is passed in.
    /// let right = tree.right(tree.root().unwrap());
    /// assert_eq!(tree.key(tree.select(right, 1).unwrap()), 25);
    /// ```
    #[must_use]
    pub fn select(&self, node: Option<Handle>, i: usize) -> Option<Handle> {
        self.raw.select(node, i)
    }

    /// Returns the one-based position of `node`'s key among all keys of the
    /// tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
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
    /// let tree = AvlTree::from([20, 10, 30, 5, 15, 25, 35]);
    /// let node = tree.find(20).unwrap();
    /// assert_eq!(tree.rank(node), 4);
    /// ```
    #[must_use]
    pub fn rank(&self, node: Handle) -> usize {
        self.raw.rank(node)
    }

    /// Returns the `i`-th smallest key of the tree, one-based.
    ///
    /// Returns `None` if `i` is outside `1..=len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// assert_eq!(tree.get_by_rank(1), Some(1));
    /// assert_eq!(tree.get_by_rank(3), Some(3));
    /// assert_eq!(tree.get_by_rank(4), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, i: usize) -> Option<i64> {
        self.select(self.root(), i).map(|node| self.key(node))
    }

    /// Returns the one-based position of `key`, or `None` if the key is not
    /// present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20]);
    /// assert_eq!(tree.rank_of(10), Some(1));
    /// assert_eq!(tree.rank_of(15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: i64) -> Option<usize> {
        self.find(key).map(|node| self.rank(node))
    }
}
