use core::borrow::Borrow;
use core::mem;

use alloc::vec::Vec;
use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::navigate::SearchResult;
use super::node::{Color, Direction, Node, Sentinel};
use super::size::Size;

/// The red-black engine backing `OSRBTreeMap`.
///
/// This type is the only place links, colors and subtree sizes are written. Read-only
/// descent lives in `navigate`, invariant checking in `validate`.
pub(crate) struct RawOSRBTreeMap<K, V> {
    /// Arena storing all real nodes.
    pub(super) nodes: Arena<Node<K, V>>,
    /// The tree-wide nil node addressed by `Handle::NIL`.
    pub(super) sentinel: Sentinel,
    /// Handle to the root node, `NIL` when the tree is empty.
    pub(super) root: Handle,
}

impl<K, V> RawOSRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            sentinel: Sentinel::new(),
            root: Handle::NIL,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            sentinel: Sentinel::new(),
            root: Handle::NIL,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    // ─── Link accessors ─────────────────────────────────────────────────────
    //
    // Reads resolve `NIL` through the sentinel so callers never branch on absence.

    #[inline]
    pub(crate) fn child(&self, handle: Handle, direction: Direction) -> Handle {
        if handle.is_nil() {
            Handle::NIL
        } else {
            self.nodes.get(handle).child(direction)
        }
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Handle {
        self.child(handle, Direction::Left)
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Handle {
        self.child(handle, Direction::Right)
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Handle {
        if handle.is_nil() {
            self.sentinel.parent
        } else {
            self.nodes.get(handle).parent
        }
    }

    #[inline]
    pub(crate) fn color(&self, handle: Handle) -> Color {
        if handle.is_nil() {
            Color::Black
        } else {
            self.nodes.get(handle).color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, handle: Handle) -> bool {
        self.color(handle) == Color::Red
    }

    /// Number of real nodes under `handle`; zero for the sentinel.
    #[inline]
    pub(crate) fn size(&self, handle: Handle) -> usize {
        if handle.is_nil() {
            0
        } else {
            self.nodes.get(handle).size.to_usize()
        }
    }

    /// The side of its parent `handle` hangs from.
    #[inline]
    fn direction_from_parent(&self, handle: Handle) -> Direction {
        if handle == self.left(self.parent(handle)) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    #[inline]
    fn set_child(&mut self, handle: Handle, direction: Direction, child: Handle) {
        self.nodes.get_mut(handle).set_child(direction, child);
    }

    #[inline]
    fn set_parent(&mut self, handle: Handle, parent: Handle) {
        if handle.is_nil() {
            self.sentinel.parent = parent;
        } else {
            self.nodes.get_mut(handle).parent = parent;
        }
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        if handle.is_nil() {
            debug_assert_eq!(color, Color::Black, "the sentinel must stay black");
        } else {
            self.nodes.get_mut(handle).color = color;
        }
    }

    fn update_size(&mut self, handle: Handle) {
        let size = Size::of_children(self.size(self.left(handle)), self.size(self.right(handle)));
        self.nodes.get_mut(handle).size = size;
    }

    /// Adjusts the size of every node from `from` up to, but not including, `until`.
    fn shrink_path(&mut self, from: Handle, until: Handle) {
        let mut current = from;
        while current != until {
            let node = self.nodes.get_mut(current);
            node.size.decrement();
            current = node.parent;
        }
    }

    // ─── Structural primitives ──────────────────────────────────────────────

    /// Points `parent`'s link that currently holds `old` at `new`, or the root if
    /// `parent` is the sentinel.
    fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_nil() {
            self.root = new;
        } else if old == self.left(parent) {
            self.set_child(parent, Direction::Left, new);
        } else {
            self.set_child(parent, Direction::Right, new);
        }
    }

    /// Puts the subtree `replacement` (possibly `NIL`) where `target` hangs.
    ///
    /// The replacement's parent is written even when it is the sentinel; delete-fixup
    /// reads it back.
    fn transplant(&mut self, target: Handle, replacement: Handle) {
        let parent = self.parent(target);
        self.replace_child(parent, target, replacement);
        self.set_parent(replacement, parent);
    }

    /// Rotates `pivot` down toward `direction`; its child on the opposite side rises
    /// into its place.
    ///
    /// Subtree sizes are repaired on every rotation: the risen node inherits the
    /// pivot's old size and the pivot is recomputed from its new children.
    fn rotate(&mut self, pivot: Handle, direction: Direction) {
        let risen = self.child(pivot, direction.opposite());
        debug_assert!(!risen.is_nil(), "rotate: pivot {pivot:?} has no child to lift");

        let inner = self.child(risen, direction);
        self.set_child(pivot, direction.opposite(), inner);
        if !inner.is_nil() {
            self.set_parent(inner, pivot);
        }

        let parent = self.parent(pivot);
        self.set_parent(risen, parent);
        self.replace_child(parent, pivot, risen);

        self.set_child(risen, direction, pivot);
        self.set_parent(pivot, risen);

        let pivot_size = self.nodes.get(pivot).size;
        self.nodes.get_mut(risen).size = pivot_size;
        self.update_size(pivot);
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Links a new red leaf at a vacant position reported by `search_position` and
    /// rebalances. Returns the new node's handle.
    pub(crate) fn attach(&mut self, parent: Handle, direction: Direction, key: K, value: V) -> Handle {
        let node = self.nodes.alloc(Node::new_leaf(key, value, parent));
        if parent.is_nil() {
            self.root = node;
        } else {
            self.set_child(parent, direction, node);
        }

        let mut ancestor = parent;
        while !ancestor.is_nil() {
            let entry = self.nodes.get_mut(ancestor);
            entry.size.increment();
            ancestor = entry.parent;
        }

        self.insert_fixup(node);
        trace!("attached node {node:?}; tree now holds {} entries", self.len());
        node
    }

    fn insert_fixup(&mut self, inserted: Handle) {
        let mut node = inserted;
        while self.is_red(self.parent(node)) {
            // A red parent is never the root, so the grandparent is real.
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            let side = self.direction_from_parent(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                // Triangle: straighten into a line.
                node = parent;
                self.rotate(node, side);
            }

            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Unlinks `target` from the tree, rebalances and returns its entry.
    ///
    /// A node with two children is replaced by its in-order predecessor.
    pub(crate) fn remove_node(&mut self, target: Handle) -> (K, V) {
        let parent = self.parent(target);
        self.shrink_path(parent, Handle::NIL);

        let left = self.left(target);
        let right = self.right(target);
        let (deficient, removed_color) = if left.is_nil() {
            self.transplant(target, right);
            (right, self.color(target))
        } else if right.is_nil() {
            self.transplant(target, left);
            (left, self.color(target))
        } else {
            let predecessor = self.extreme(left, Direction::Right);
            let removed_color = self.color(predecessor);
            let deficient = self.left(predecessor);

            if self.parent(predecessor) == target {
                self.set_parent(deficient, predecessor);
            } else {
                let old_parent = self.parent(predecessor);
                self.shrink_path(old_parent, target);
                self.transplant(predecessor, deficient);
                self.set_child(predecessor, Direction::Left, left);
                self.set_parent(left, predecessor);
            }

            self.transplant(target, predecessor);
            self.set_child(predecessor, Direction::Right, right);
            self.set_parent(right, predecessor);
            let color = self.color(target);
            self.set_color(predecessor, color);
            self.update_size(predecessor);
            (deficient, removed_color)
        };

        let needs_fixup = removed_color == Color::Black;
        if needs_fixup {
            self.delete_fixup(deficient);
        }
        self.sentinel.parent = Handle::NIL;

        trace!("removed node {target:?}; delete-fixup ran: {needs_fixup}; {} entries remain", self.len() - 1);
        self.nodes.take(target).into_entry()
    }

    /// Restores black-height after a black node left the position now held by `node`.
    fn delete_fixup(&mut self, deficient: Handle) {
        let mut node = deficient;
        while node != self.root && !self.is_red(node) {
            let parent = self.parent(node);
            let side = self.direction_from_parent(node);
            let far = side.opposite();
            let mut sibling = self.child(parent, far);

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, far);
            }
            debug_assert!(!sibling.is_nil(), "delete-fixup: black-height deficit with no sibling");

            if !self.is_red(self.child(sibling, side)) && !self.is_red(self.child(sibling, far)) {
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if !self.is_red(self.child(sibling, far)) {
                let near_nephew = self.child(sibling, side);
                self.set_color(near_nephew, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.child(parent, far);
            }

            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far_nephew = self.child(sibling, far);
            self.set_color(far_nephew, Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }
        self.set_color(node, Color::Black);
    }

    // ─── Whole-tree operations ──────────────────────────────────────────────

    /// Clears all elements from the tree, releasing nodes post-order.
    pub(crate) fn clear(&mut self) {
        let root = mem::replace(&mut self.root, Handle::NIL);
        let released = self.cascade(root);
        debug_assert!(self.nodes.is_empty(), "clear: nodes left behind after cascade");
        self.nodes.clear();
        self.sentinel = Sentinel::new();
        debug!("cleared tree; released {released} nodes");
    }

    /// Frees the subtree at `handle`, stopping at sentinel boundaries. Returns the number
    /// of nodes freed.
    fn cascade(&mut self, handle: Handle) -> usize {
        if handle.is_nil() {
            return 0;
        }
        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left, node.right)
        };
        let released = self.cascade(left) + self.cascade(right);
        self.nodes.free(handle);
        released + 1
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut current = self.extreme(self.root, Direction::Left);
        // `current` is always the minimum of what is left: it has no left child and
        // hangs on its parent's left, so its right subtree takes its place.
        while !current.is_nil() {
            let (parent, right) = {
                let node = self.nodes.get(current);
                (node.parent, node.right)
            };
            if parent.is_nil() {
                self.root = right;
            } else {
                self.set_child(parent, Direction::Left, right);
            }
            if !right.is_nil() {
                self.set_parent(right, parent);
            }

            entries.push(self.nodes.take(current).into_entry());
            current = if right.is_nil() { parent } else { self.extreme(right, Direction::Left) };
        }

        self.nodes.clear();
        self.root = Handle::NIL;
        self.sentinel = Sentinel::new();
        debug!("drained {} entries", entries.len());
        entries
    }
}

impl<K: Ord, V> RawOSRBTreeMap<K, V> {
    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present; the structure is then unchanged.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search_position(&key) {
            SearchResult::Found(handle) => Some(mem::replace(self.nodes.get_mut(handle).value_mut(), value)),
            SearchResult::Vacant { parent, direction } => {
                self.attach(parent, direction, key, value);
                None
            }
        }
    }

    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search_node(key)?;
        Some(self.remove_node(handle))
    }
}

impl<K: Clone, V: Clone> RawOSRBTreeMap<K, V> {
    /// Structural deep copy into a fresh arena with its own sentinel.
    ///
    /// Colors and sizes are carried over node by node, so the copy has the same shape.
    pub(crate) fn duplicate(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        copy.root = copy.copy_subtree(self, self.root, Handle::NIL);
        debug!("duplicated tree of {} entries", copy.len());
        copy
    }

    fn copy_subtree(&mut self, source: &Self, from: Handle, parent: Handle) -> Handle {
        if from.is_nil() {
            return Handle::NIL;
        }

        let original = source.nodes.get(from);
        let handle = self.nodes.alloc(Node {
            key: original.key.clone(),
            value: original.value.clone(),
            left: Handle::NIL,
            right: Handle::NIL,
            parent,
            color: original.color,
            size: original.size,
        });
        let left = self.copy_subtree(source, original.left, handle);
        let right = self.copy_subtree(source, original.right, handle);

        let node = self.nodes.get_mut(handle);
        node.left = left;
        node.right = right;
        handle
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn build(keys: &[u32]) -> RawOSRBTreeMap<u32, u32> {
        let mut tree = RawOSRBTreeMap::new();
        for &key in keys {
            tree.insert(key, key * 10);
        }
        tree
    }

    fn preorder(tree: &RawOSRBTreeMap<u32, u32>) -> Vec<u32> {
        let mut keys = Vec::new();
        let mut current = tree.root;
        while !current.is_nil() {
            keys.push(*tree.node(current).key());
            current = tree.preorder_next(current);
        }
        keys
    }

    #[test]
    fn ascending_inserts_rebalance() {
        let tree = build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(preorder(&tree), [4, 2, 1, 3, 6, 5, 8, 7, 9, 10]);
        assert_eq!(tree.size(tree.root), 10);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn rotation_carries_subtree_sizes() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let root = tree.root;
        let risen = tree.right(root);
        tree.rotate(root, Direction::Left);

        assert_eq!(tree.root, risen);
        assert_eq!(tree.size(risen), 5);
        assert_eq!(tree.size(root), 3);
        assert_eq!(tree.parent(root), risen);
        assert_eq!(*tree.node(tree.right(root)).key(), 3);
    }

    #[test]
    fn remove_two_children_splices_predecessor() {
        let mut tree = build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(tree.remove_entry(&4), Some((4, 40)));
        assert_eq!(preorder(&tree), [6, 3, 2, 1, 5, 8, 7, 9, 10]);
        assert!(tree.validate().is_ok());

        assert_eq!(tree.remove_entry(&8), Some((8, 80)));
        assert_eq!(preorder(&tree), [6, 3, 2, 1, 5, 9, 7, 10]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn removing_deep_node_keeps_ancestor_sizes() {
        let mut tree = build(&(0..64).collect::<Vec<_>>());
        // Interior keys below the root take the predecessor sub-path.
        for key in [40, 20, 50, 10, 33] {
            assert!(tree.remove_entry(&key).is_some());
            assert!(tree.validate().is_ok(), "after removing {key}");
        }
        assert_eq!(tree.len(), 59);
    }

    #[test]
    fn insert_existing_key_replaces_value_only() {
        let mut tree = build(&[3, 1, 2]);
        let before = preorder(&tree);
        assert_eq!(tree.insert(2, 99), Some(20));
        assert_eq!(preorder(&tree), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn sentinel_parent_is_reset_after_removal() {
        let mut tree = build(&[1, 2, 3]);
        tree.remove_entry(&1);
        assert!(tree.sentinel.parent.is_nil());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn clear_releases_every_node() {
        let mut tree = build(&(0..100).collect::<Vec<_>>());
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root.is_nil());
        tree.insert(5, 50);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn drain_yields_sorted_entries() {
        let mut tree = build(&[5, 3, 8, 1]);
        assert_eq!(tree.drain_to_vec(), [(1, 10), (3, 30), (5, 50), (8, 80)]);
        assert!(tree.is_empty());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn drain_after_removals_visits_right_subtrees() {
        let mut tree = build(&(0..200).rev().collect::<Vec<_>>());
        for key in (0..200).step_by(3) {
            tree.remove_entry(&key);
        }
        let expected: Vec<(u32, u32)> = (0..200).filter(|k| k % 3 != 0).map(|k| (k, k * 10)).collect();

        assert_eq!(tree.drain_to_vec(), expected);
        assert!(tree.root.is_nil());
        tree.insert(7, 70);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn duplicate_is_independent() {
        let source = build(&(0..32).collect::<Vec<_>>());
        let mut copy = source.duplicate();
        assert_eq!(preorder(&copy), preorder(&source));
        assert!(copy.validate().is_ok());

        for key in 0..32 {
            copy.remove_entry(&key);
        }
        assert!(copy.is_empty());
        assert_eq!(source.len(), 32);
        assert!(source.validate().is_ok());
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_mutation(operations in prop::collection::vec((any::<bool>(), 0..128_u32), 0..512)) {
            let mut tree = RawOSRBTreeMap::new();
            let mut model = alloc::collections::BTreeSet::new();

            for (insert, key) in operations {
                if insert {
                    prop_assert_eq!(tree.insert(key, key).is_none(), model.insert(key));
                } else {
                    prop_assert_eq!(tree.remove_entry(&key).is_some(), model.remove(&key));
                }
                prop_assert_eq!(tree.validate(), Ok(()));
                prop_assert_eq!(tree.len(), model.len());
            }
        }
    }
}
