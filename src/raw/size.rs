use super::handle::{Handle, RawHandle};

/// The number of real nodes in a subtree, stored at handle width.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(RawHandle);

impl Size {
    /// A tree can hold one node per valid handle index.
    pub(crate) const MAX: usize = Handle::MAX + 1;
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(size as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn of_children(left: usize, right: usize) -> Self {
        Self::from_usize(left + right + 1)
    }

    #[inline]
    pub(crate) fn increment(&mut self) {
        debug_assert!(self.to_usize() < Self::MAX, "`Size::increment()` - overflow!");
        self.0 += 1;
    }

    #[inline]
    pub(crate) fn decrement(&mut self) {
        debug_assert!(self.0 > 0, "`Size::decrement()` - underflow!");
        self.0 -= 1;
    }
}
