#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// A stable index into the node arena.
///
/// The all-ones bit pattern is reserved for [`Handle::NIL`], the tree-wide sentinel.
/// Every absent child, and the parent of the root, is `NIL` rather than an `Option`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(RawHandle);

impl Handle {
    /// The largest index a live node may occupy.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// The sentinel: black, size zero, owns no key or value.
    pub(crate) const NIL: Self = Self(RawHandle::MAX);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        Self(index as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        debug_assert!(!self.is_nil(), "`Handle::to_index()` - the sentinel has no index!");
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0 == RawHandle::MAX
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Handle, RawHandle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn nil_is_distinct_from_every_index() {
        assert!(Handle::NIL.is_nil());
        assert!(!Handle::from_index(0).is_nil());
        assert!(!Handle::from_index(Handle::MAX).is_nil());
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            prop_assert!(!handle.is_nil());
            prop_assert_eq!(handle.to_index(), index);
        }
    }
}
