use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OSRBTreeMap;
use crate::Rank;
use crate::error::{Error, Result};

impl<K, V> OSRBTreeMap<K, V> {
    /// Returns the 1-based position of `key` in ascending key order, or `0` if the key is
    /// not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([("a", 1), ("c", 3), ("b", 2)]);
    /// assert_eq!(map.rank("a"), 1);
    /// assert_eq!(map.rank("c"), 3);
    /// assert_eq!(map.rank("z"), 0);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search_node(key).map_or(0, |handle| self.raw.rank_node(handle))
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the key is not
    /// present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key)?;
        Some(self.raw.rank_node(handle) - 1)
    }

    /// Returns the key at 1-based position `rank` in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] unless `1 <= rank <= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([("a", 1), ("c", 3), ("b", 2)]);
    /// assert_eq!(map.select(2), Ok(&"b"));
    /// assert_eq!(map.select(0), Err(Error::RankOutOfRange { rank: 0, len: 3 }));
    /// assert_eq!(map.select(4), Err(Error::RankOutOfRange { rank: 4, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K> {
        self.select_entry(rank).map(|(key, _)| key)
    }

    /// Returns the entry at 1-based position `rank` in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] unless `1 <= rank <= self.len()`.
    pub fn select_entry(&self, rank: usize) -> Result<(&K, &V)> {
        let handle = self.raw.select_node(rank).ok_or(Error::RankOutOfRange { rank, len: self.len() })?;
        let node = self.raw.node(handle);
        Ok((node.key(), node.value()))
    }

    /// Returns the key-value pair at zero-based position `rank` in sorted order, or `None`
    /// if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let handle = self.raw.select_node(rank.checked_add(1)?)?;
        let node = self.raw.node(handle);
        Some((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at zero-based position `rank`.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(10, "a"), (5, "b")]);
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select_node(rank.checked_add(1)?)?;
        Some(self.raw.node_mut(handle).key_value_mut())
    }
}

/// Indexes into the map by zero-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl<K, V> Index<Rank> for OSRBTreeMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

/// Mutably indexes into the map by zero-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
/// assert_eq!(map.get("b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for OSRBTreeMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
