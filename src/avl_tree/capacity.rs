use super::AvlTree;
use crate::raw::RawAvlTree;

impl AvlTree {
    /// Creates an empty tree with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        log::debug!("allocating tree with capacity {capacity}");
        AvlTree {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1]);
    /// tree.reserve(10);
    /// assert!(tree.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
