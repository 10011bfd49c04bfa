use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::raw::{Direction, Handle, RawOSRBTreeMap, SearchResult};

mod capacity;
mod order_statistic;
mod traversal;

pub use crate::Rank;
pub use traversal::{DisplayKeys, Postorder, Preorder, TraversalOrder};

/// An ordered map based on an order-statistic [red-black tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
///
/// Every node additionally records how many entries live in its subtree. That makes the
/// positional queries [`rank`], [`select`], [`get_by_rank`] and [`rank_of`] run in
/// O(log n), alongside the usual lookup, insertion and removal.
///
/// Iterators obtained from [`OSRBTreeMap::iter`], [`OSRBTreeMap::keys`],
/// [`OSRBTreeMap::values`] or [`OSRBTreeMap::into_iter`] produce their items in key order.
/// [`OSRBTreeMap::preorder`] and [`OSRBTreeMap::postorder`] expose the tree's shape and are
/// mostly useful for diagnostics.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `OSRBTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Duplicate keys
///
/// Keys are unique. [`insert`] on a present key replaces the value and hands back the old
/// one without touching the tree's structure; [`try_insert`] refuses with
/// [`Error::DuplicateKey`] instead.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// let mut standings = OSRBTreeMap::new();
/// standings.insert(2_812, "Kasparov");
/// standings.insert(2_851, "Carlsen");
/// standings.insert(2_785, "Anand");
///
/// // Keys are kept sorted, and positions are cheap to query.
/// assert_eq!(standings.rank(&2_785), 1);
/// assert_eq!(standings.select(3), Ok(&2_851));
/// assert_eq!(standings.predecessor(&2_851), Some(&2_812));
///
/// // The highest rating and its holder.
/// assert_eq!(standings.last_key_value(), Some((&2_851, &"Carlsen")));
///
/// for (rating, player) in &standings {
///     println!("{player}: {rating}");
/// }
/// ```
///
/// An `OSRBTreeMap` with a known list of items can be initialized from an array:
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// let solar_distance = OSRBTreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.rank("Mars"), 2);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`rank`]: OSRBTreeMap::rank
/// [`select`]: OSRBTreeMap::select
/// [`get_by_rank`]: OSRBTreeMap::get_by_rank
/// [`rank_of`]: OSRBTreeMap::rank_of
/// [`insert`]: OSRBTreeMap::insert
/// [`try_insert`]: OSRBTreeMap::try_insert
pub struct OSRBTreeMap<K, V> {
    raw: RawOSRBTreeMap<K, V>,
}

/// An iterator over the entries of an `OSRBTreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`OSRBTreeMap`]. It can be cloned to
/// restart from its current position.
///
/// [`iter`]: OSRBTreeMap::iter
pub struct Iter<'a, K, V> {
    tree: &'a RawOSRBTreeMap<K, V>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

/// An iterator over the keys of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`OSRBTreeMap`].
///
/// [`keys`]: OSRBTreeMap::keys
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`OSRBTreeMap`].
///
/// [`values`]: OSRBTreeMap::values
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the entries of an `OSRBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`OSRBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> OSRBTreeMap<K, V> {
    /// Makes a new, empty `OSRBTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> OSRBTreeMap<K, V> {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::new(),
        }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key)?;
        Some(self.raw.node(handle).value())
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let node = self.raw.node(self.raw.search_node(key)?);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search_node(key).is_some()
    }

    /// Returns the first key-value pair in the map. The key in this pair is the minimum
    /// key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.end_entry(Direction::Left)
    }

    /// Returns the last key-value pair in the map. The key in this pair is the maximum
    /// key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.end_entry(Direction::Right)
    }

    fn end_entry(&self, direction: Direction) -> Option<(&K, &V)> {
        let handle = self.raw.extreme(self.raw.root(), direction);
        if handle.is_nil() {
            return None;
        }
        let node = self.raw.node(handle);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the first element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.pop_end(Direction::Left)
    }

    /// Removes and returns the last element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_last(), Some((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.pop_end(Direction::Right)
    }

    fn pop_end(&mut self, direction: Direction) -> Option<(K, V)> {
        let handle = self.raw.extreme(self.raw.root(), direction);
        (!handle.is_nil()).then(|| self.raw.remove_node(handle))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated and the tree is not restructured, so
    /// ranks are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Inserts a key-value pair only if the key is absent, returning a mutable reference
    /// to the inserted value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key is already present. The map is left
    /// unchanged and the rejected pair is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.try_insert(37, "a"), Ok(&mut "a"));
    /// assert_eq!(map.try_insert(37, "b"), Err(Error::DuplicateKey));
    /// assert_eq!(map[&37], "a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V>
    where
        K: Ord,
    {
        match self.raw.search_position(&key) {
            SearchResult::Found(_) => Err(Error::DuplicateKey),
            SearchResult::Vacant { parent, direction } => {
                let handle = self.raw.attach(parent, direction, key, value);
                Ok(self.raw.node_mut(handle).value_mut())
            }
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// `Some` means the key was present and has been removed; `None` means the map
    /// was not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Returns the smallest key greater than `key`, provided `key` itself is in the map.
    ///
    /// Returns `None` if `key` is absent or is the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.successor(&10), Some(&20));
    /// assert_eq!(map.successor(&30), None);
    /// assert_eq!(map.successor(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn successor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.neighbour(key, Direction::Right)
    }

    /// Returns the largest key smaller than `key`, provided `key` itself is in the map.
    ///
    /// Returns `None` if `key` is absent or is the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.predecessor(&30), Some(&20));
    /// assert_eq!(map.predecessor(&10), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.neighbour(key, Direction::Left)
    }

    fn neighbour<Q>(&self, key: &Q, direction: Direction) -> Option<&K>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key)?;
        let next = self.raw.step(handle, direction);
        (!next.is_nil()).then(|| self.raw.node(next).key())
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let raw = &self.raw;
        Iter {
            tree: raw,
            front: raw.extreme(raw.root(), Direction::Left),
            back: raw.extreme(raw.root(), Direction::Right),
            remaining: raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.values().copied().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// The red-black invariants bound this by `2 * log2(len + 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..1_000).map(|k| (k, ())).collect();
    /// assert!(map.height() <= 2 * 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Checks every structural invariant of the tree: key order, red-black coloring,
    /// uniform black-height, subtree sizes and parent links.
    ///
    /// Intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics if an invariant is broken. That can only happen through a bug in this crate
    /// or a key whose ordering changed while it was stored.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn assert_invariants(&self)
    where
        K: Ord,
    {
        if let Err(violation) = self.raw.validate() {
            log::error!("invariant check failed on a map of {} entries: {violation}", self.len());
            panic!("OSRBTreeMap invariant violated: {violation}");
        }
    }
}

/// Deep-copies the map: every node is rebuilt with its own key and value, and the copy
/// gets its own sentinel. O(n).
impl<K: Clone, V: Clone> Clone for OSRBTreeMap<K, V> {
    fn clone(&self) -> Self {
        OSRBTreeMap {
            raw: self.raw.duplicate(),
        }
    }
}

impl<K: Hash, V: Hash> Hash for OSRBTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OSRBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for OSRBTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for OSRBTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for OSRBTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OSRBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OSRBTreeMap<K, V> {
    fn default() -> Self {
        OSRBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OSRBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OSRBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OSRBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for OSRBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OSRBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for OSRBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for OSRBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSRBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let tree = self.tree;
        let node = tree.node(self.front);
        self.front = tree.step(self.front, Direction::Right);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let tree = self.tree;
        let node = tree.node(self.back);
        self.back = tree.step(self.back, Direction::Left);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_meets_in_the_middle() {
        let map: OSRBTreeMap<u8, u8> = (0..6).map(|k| (k, k)).collect();
        let mut iter = map.keys();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 4);
        let rest: Vec<_> = iter.copied().collect();
        assert_eq!(rest, [1, 2, 3, 4]);
    }

    #[test]
    fn try_insert_leaves_existing_value() {
        let mut map = OSRBTreeMap::new();
        *map.try_insert("k", 1).expect("vacant") += 1;
        assert_eq!(map.try_insert("k", 10), Err(Error::DuplicateKey));
        assert_eq!(map.get("k"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn neighbours_of_missing_key_are_none() {
        let map = OSRBTreeMap::from([(1, ()), (3, ())]);
        assert_eq!(map.successor(&2), None);
        assert_eq!(map.predecessor(&2), None);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_missing_key_panics() {
        let map: OSRBTreeMap<u8, u8> = OSRBTreeMap::new();
        let _ = map[&1];
    }

    #[test]
    fn debug_formats_as_map() {
        let map = OSRBTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(alloc::format!("{map:?}"), "{1: 'a', 2: 'b'}");
    }
}
