use alloc::vec::Vec;

use super::handle::Handle;

/// Append-only slot storage addressed by [`Handle`].
///
/// Trees never remove individual nodes, so there is no free list: a handle is
/// valid from `alloc` until the next `clear`.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(Handle::MAX)),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional.min(Handle::MAX - self.slots.len()));
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // Strict less-than: after the push the arena holds at most `Handle::MAX` elements,
        // so the new index is at most `Handle::MAX - 1`.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    /// Returns true if `handle` addresses an allocated slot.
    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        handle.to_index() < self.slots.len()
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots.get(handle.to_index()).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots.get_mut(handle.to_index()).expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
