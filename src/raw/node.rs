use super::handle::Handle;

/// One stored key and its local tree structure.
///
/// Nodes are passive records: setters store what they are given and
/// `RawAvlTree` alone keeps the links, heights and sizes consistent.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: i64,
    left: Option<Handle>,
    right: Option<Handle>,
    // Non-owning back-link, only followed upward by `rank`.
    parent: Option<Handle>,
    // Height of the subtree rooted here, a leaf is 1.
    height: u8,
    // Number of nodes in the subtree rooted here, including this one.
    size: u32,
}

impl Node {
    /// Creates a detached leaf.
    pub(crate) const fn new(key: i64) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent: None,
            height: 1,
            size: 1,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size as usize
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Sets the subtree height.
    ///
    /// AVL height is at most ~1.44 log2(n), far below `u8::MAX` for any
    /// arena-addressable node count.
    pub(crate) fn set_height(&mut self, height: usize) {
        debug_assert!(height <= u8::MAX as usize, "`Node::set_height()` - `height` overflows");
        #[allow(clippy::cast_possible_truncation)]
        {
            self.height = height as u8;
        }
    }

    /// Sets the subtree size. Sizes are bounded by the arena, i.e. by `Handle::MAX`.
    pub(crate) fn set_size(&mut self, size: usize) {
        debug_assert!(size <= Handle::MAX, "`Node::set_size()` - `size` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        {
            self.size = size as u32;
        }
    }
}
