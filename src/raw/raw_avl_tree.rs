use core::cmp::{Ordering, max};

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The AVL engine backing `AvlTree`.
///
/// All nodes live in one arena and link to each other by [`Handle`]. The
/// arena owns every node; `left`/`right` express the tree shape and `parent`
/// is a plain back-index, so dropping the tree is dropping a `Vec`.
#[derive(Clone)]
pub(crate) struct RawAvlTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl RawAvlTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// Nodes are never removed, so this is the arena length.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns true if `handle` addresses a node of this tree.
    pub(crate) fn contains_handle(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    /// Height of the subtree at `node`, 0 for an absent subtree.
    #[inline]
    pub(crate) fn height(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.node(h).height())
    }

    /// Size of the subtree at `node`, 0 for an absent subtree.
    #[inline]
    pub(crate) fn size(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.node(h).size())
    }

    /// Returns `height(left) - height(right)`, 0 for an absent node.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn balance(&self, node: Option<Handle>) -> isize {
        node.map_or(0, |h| {
            let node = self.node(h);
            self.height(node.left()) as isize - self.height(node.right()) as isize
        })
    }

    /// Re-derives `height` and `size` of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.node(handle);
        let (left, right) = (node.left(), node.right());
        let height = 1 + max(self.height(left), self.height(right));
        let size = 1 + self.size(left) + self.size(right);

        let node = self.node_mut(handle);
        node.set_height(height);
        node.set_size(size);
    }

    /// Finds the node holding `key`.
    pub(crate) fn find(&self, key: i64) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns the leftmost node below `node`.
    pub(crate) fn leftmost(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.node(node).left() {
            node = left;
        }
        node
    }

    /// Returns the rightmost node below `node`.
    pub(crate) fn rightmost(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.node(node).right() {
            node = right;
        }
        node
    }
}

impl RawAvlTree {
    /// Inserts `key` starting from `subtree`, or from the current root when
    /// `subtree` is `None`, and returns the new root.
    ///
    /// `subtree` exists for callers that thread the root returned by the
    /// previous insertion through each call. It must be that root.
    pub(crate) fn insert_at(&mut self, subtree: Option<Handle>, key: i64) -> Handle {
        if let Some(handle) = subtree {
            assert!(
                self.contains_handle(handle) && self.root == Some(handle),
                "`RawAvlTree::insert_at()` - `subtree` is not the root of this tree!"
            );
        }

        let root = self.insert_node(self.root, key);
        debug_assert!(self.node(root).parent().is_none(), "new root must not have a parent");
        self.root = Some(root);
        root
    }

    /// Recursive insertion into the subtree at `node`. Returns the root of the
    /// rebalanced subtree; the caller relinks it.
    fn insert_node(&mut self, node: Option<Handle>, key: i64) -> Handle {
        let Some(node) = node else {
            return self.nodes.alloc(Node::new(key));
        };

        let (current_key, left, right) = {
            let current = self.node(node);
            (current.key(), current.left(), current.right())
        };
        match key.cmp(&current_key) {
            Ordering::Less => {
                let left = self.insert_node(left, key);
                self.node_mut(node).set_left(Some(left));
                self.node_mut(left).set_parent(Some(node));
            }
            Ordering::Greater => {
                let right = self.insert_node(right, key);
                self.node_mut(node).set_right(Some(right));
                self.node_mut(right).set_parent(Some(node));
            }
            Ordering::Equal => {
                log::trace!("insert: key {key} already present at {node:?}, ignoring");
                return node;
            }
        }

        self.update(node);
        let balance = self.balance(Some(node));

        if balance > 1 {
            let left = self.node(node).left().expect("`RawAvlTree::insert()` - left-heavy node has no left child");
            if key < self.node(left).key() {
                return self.rotate_right(node);
            }
            let left = self.rotate_left(left);
            self.node_mut(node).set_left(Some(left));
            return self.rotate_right(node);
        }

        if balance < -1 {
            let right =
                self.node(node).right().expect("`RawAvlTree::insert()` - right-heavy node has no right child");
            if key > self.node(right).key() {
                return self.rotate_left(node);
            }
            let right = self.rotate_right(right);
            self.node_mut(node).set_right(Some(right));
            return self.rotate_left(node);
        }

        node
    }

    /// Rotates `x` down to the left under its right child `y`; returns `y`.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   A   y     =>     x   C
    ///      / \          / \
    ///     T2  C        A   T2
    /// ```
    ///
    /// `y` inherits `x`'s parent link. The parent's child slot is left to the
    /// caller, which receives `y` as the new subtree root.
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.node(x).right().expect("`RawAvlTree::rotate_left()` - `x` has no right child");
        let t2 = self.node(y).left();
        let parent = self.node(x).parent();

        self.node_mut(y).set_left(Some(x));
        self.node_mut(x).set_right(t2);

        self.node_mut(y).set_parent(parent);
        self.node_mut(x).set_parent(Some(y));
        if let Some(t2) = t2 {
            self.node_mut(t2).set_parent(Some(x));
        }

        // `x` is now below `y`, so it goes first.
        self.update(x);
        self.update(y);

        log::trace!("rotate_left: {x:?} -> {y:?}");
        y
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left): rotates `y` down to
    /// the right under its left child `x`; returns `x`.
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.node(y).left().expect("`RawAvlTree::rotate_right()` - `y` has no left child");
        let t2 = self.node(x).right();
        let parent = self.node(y).parent();

        self.node_mut(x).set_right(Some(y));
        self.node_mut(y).set_left(t2);

        self.node_mut(x).set_parent(parent);
        self.node_mut(y).set_parent(Some(x));
        if let Some(t2) = t2 {
            self.node_mut(t2).set_parent(Some(y));
        }

        self.update(y);
        self.update(x);

        log::trace!("rotate_right: {y:?} -> {x:?}");
        x
    }
}

impl RawAvlTree {
    /// Returns the node with 1-based inorder rank `i` within the subtree at `node`.
    ///
    /// `i == 0` and `i > size(node)` fall off a leaf and yield `None`.
    pub(crate) fn select(&self, node: Option<Handle>, i: usize) -> Option<Handle> {
        let mut current = node;
        let mut i = i;

        while let Some(handle) = current {
            let node = self.node(handle);
            let rank = self.size(node.left()) + 1;
            current = match i.cmp(&rank) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    i -= rank;
                    node.right()
                }
            };
        }
        None
    }

    /// Returns the 1-based inorder rank of `x` within the whole tree.
    ///
    /// Walks parent links up to the root, adding the left part of every
    /// ancestor that `x` lies to the right of.
    pub(crate) fn rank(&self, x: Handle) -> usize {
        assert!(self.contains_handle(x), "`RawAvlTree::rank()` - `x` is invalid!");

        let mut rank = self.size(self.node(x).left()) + 1;
        let mut current = x;

        while let Some(parent) = self.node(current).parent() {
            let parent_node = self.node(parent);
            if parent_node.right() == Some(current) {
                rank += self.size(parent_node.left()) + 1;
            } else {
                debug_assert_eq!(parent_node.left(), Some(current), "parent link without child link");
            }
            current = parent;
        }

        assert!(self.root == Some(current), "`RawAvlTree::rank()` - `x` is not reachable from the root!");
        rank
    }
}
