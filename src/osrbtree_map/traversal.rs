use core::fmt;
use core::iter::FusedIterator;

use super::OSRBTreeMap;
use crate::raw::{Handle, RawOSRBTreeMap};

/// The order in which [`OSRBTreeMap::display_keys`] visits the tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Ascending key order.
    #[default]
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

/// An iterator over the entries of an `OSRBTreeMap` in preorder (node before children).
///
/// This `struct` is created by the [`preorder`] method on [`OSRBTreeMap`].
///
/// [`preorder`]: OSRBTreeMap::preorder
pub struct Preorder<'a, K, V> {
    tree: &'a RawOSRBTreeMap<K, V>,
    next: Handle,
}

/// An iterator over the entries of an `OSRBTreeMap` in postorder (children before node).
///
/// This `struct` is created by the [`postorder`] method on [`OSRBTreeMap`].
///
/// [`postorder`]: OSRBTreeMap::postorder
pub struct Postorder<'a, K, V> {
    tree: &'a RawOSRBTreeMap<K, V>,
    next: Handle,
}

/// Formats the keys of a map separated by single spaces.
///
/// This `struct` is created by [`OSRBTreeMap::display_keys`] and
/// [`OSRBTreeMap::display_smallest`]. Nothing is rendered until it is formatted.
pub struct DisplayKeys<'a, K, V> {
    map: &'a OSRBTreeMap<K, V>,
    order: TraversalOrder,
    limit: usize,
}

impl<K, V> OSRBTreeMap<K, V> {
    /// Gets an iterator that visits every entry in preorder: each node before its left
    /// subtree, and the left subtree before the right one.
    ///
    /// The sequence depends on the tree's current shape, not just its contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u8, ()> = (1..=3).map(|k| (k, ())).collect();
    /// let keys: Vec<u8> = map.preorder().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder {
            tree: &self.raw,
            next: self.raw.root(),
        }
    }

    /// Gets an iterator that visits every entry in postorder: both subtrees before the
    /// node itself. The root comes last.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u8, ()> = (1..=3).map(|k| (k, ())).collect();
    /// let keys: Vec<u8> = map.postorder().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 2]);
    /// ```
    pub fn postorder(&self) -> Postorder<'_, K, V> {
        Postorder {
            tree: &self.raw,
            next: self.raw.postorder_first(),
        }
    }

    /// Returns a value that formats every key in the given order, separated by spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTreeMap, TraversalOrder};
    ///
    /// let map: OSRBTreeMap<char, ()> = "ABCDEFGHIK".chars().map(|k| (k, ())).collect();
    /// assert_eq!(map.display_keys(TraversalOrder::Inorder).to_string(), "A B C D E F G H I K");
    /// assert_eq!(map.display_keys(TraversalOrder::Preorder).to_string(), "D B A C F E H G I K");
    /// assert_eq!(map.display_keys(TraversalOrder::Postorder).to_string(), "A C B E G K I H F D");
    /// ```
    pub fn display_keys(&self, order: TraversalOrder) -> DisplayKeys<'_, K, V> {
        DisplayKeys {
            map: self,
            order,
            limit: usize::MAX,
        }
    }

    /// Returns a value that formats the `k` smallest keys in ascending order, separated by
    /// spaces. All keys are shown if the map holds fewer than `k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([('C', 8), ('A', 10), ('B', 9), ('D', 7)]);
    /// assert_eq!(map.display_smallest(3).to_string(), "A B C");
    /// assert_eq!(map.display_smallest(0).to_string(), "");
    /// ```
    pub fn display_smallest(&self, k: usize) -> DisplayKeys<'_, K, V> {
        DisplayKeys {
            map: self,
            order: TraversalOrder::Inorder,
            limit: k,
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_nil() {
            return None;
        }

        let tree = self.tree;
        let node = tree.node(self.next);
        self.next = tree.preorder_next(self.next);
        Some((node.key(), node.value()))
    }
}

impl<K, V> FusedIterator for Preorder<'_, K, V> {}

impl<K, V> Clone for Preorder<'_, K, V> {
    fn clone(&self) -> Self {
        Preorder {
            tree: self.tree,
            next: self.next,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Preorder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Postorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_nil() {
            return None;
        }

        let tree = self.tree;
        let node = tree.node(self.next);
        self.next = tree.postorder_next(self.next);
        Some((node.key(), node.value()))
    }
}

impl<K, V> FusedIterator for Postorder<'_, K, V> {}

impl<K, V> Clone for Postorder<'_, K, V> {
    fn clone(&self) -> Self {
        Postorder {
            tree: self.tree,
            next: self.next,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Postorder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

fn write_spaced<'a, K: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    keys: impl Iterator<Item = &'a K>,
) -> fmt::Result {
    for (index, key) in keys.enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{key}")?;
    }
    Ok(())
}

impl<K: fmt::Display, V> fmt::Display for DisplayKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.map;
        match self.order {
            TraversalOrder::Preorder => write_spaced(f, map.preorder().map(|(k, _)| k).take(self.limit)),
            TraversalOrder::Inorder => write_spaced(f, map.keys().take(self.limit)),
            TraversalOrder::Postorder => write_spaced(f, map.postorder().map(|(k, _)| k).take(self.limit)),
        }
    }
}

impl<K: fmt::Display, V> fmt::Debug for DisplayKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayKeys({:?}, \"{self}\")", self.order)
    }
}
