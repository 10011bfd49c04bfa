use core::fmt;

/// Errors reported by [`OSRBTreeMap`](crate::OSRBTreeMap) operations that can be
/// misused by the caller.
///
/// Looking up a key that is not present is not an error; those operations return
/// `Option`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// A 1-based rank outside `1..=len` was passed to
    /// [`select`](crate::OSRBTreeMap::select).
    RankOutOfRange {
        /// The rank that was requested.
        rank: usize,
        /// The number of entries in the map at the time.
        len: usize,
    },
    /// [`try_insert`](crate::OSRBTreeMap::try_insert) was given a key that is already
    /// present.
    DuplicateKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RankOutOfRange { rank, len } => {
                write!(f, "rank {rank} is out of range for a map of {len} entries (expected 1..={len})")
            }
            Error::DuplicateKey => write!(f, "key is already present in the map"),
        }
    }
}

impl core::error::Error for Error {}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(
            Error::RankOutOfRange { rank: 0, len: 3 }.to_string(),
            "rank 0 is out of range for a map of 3 entries (expected 1..=3)"
        );
        assert_eq!(Error::DuplicateKey.to_string(), "key is already present in the map");
    }
}
