/// A zero-based rank into the sorted order of a map.
///
/// Used to index an [`OSRBTreeMap`](crate::OSRBTreeMap) by position. The 1-based
/// [`rank`](crate::OSRBTreeMap::rank) and [`select`](crate::OSRBTreeMap::select)
/// methods are the counting-from-one counterparts.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
