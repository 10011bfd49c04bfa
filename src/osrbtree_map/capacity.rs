use super::OSRBTreeMap;
use crate::raw::RawOSRBTreeMap;

impl<K, V> OSRBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node
    /// arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by removals are reused, so capacity never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::with_capacity(4);
    /// map.insert(1, ());
    /// map.remove(&1);
    /// assert!(map.capacity() >= 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
