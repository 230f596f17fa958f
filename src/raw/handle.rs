use core::fmt;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A stable reference to a node of an [`AvlTree`](crate::AvlTree).
///
/// Handles are returned by [`insert`](crate::AvlTree::insert),
/// [`select`](crate::AvlTree::select) and [`find`](crate::AvlTree::find), and
/// stay valid for the lifetime of the tree that produced them: nodes are never
/// removed, and rotations relink nodes without moving them.
///
/// A handle is only meaningful for the tree it came from (or a clone of it).
/// Passing it to a different tree either panics or addresses an unrelated node.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is non-zero and fits in `RawHandle` by the assertion above.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.to_index())
    }
}
