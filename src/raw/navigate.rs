use core::borrow::Borrow;
use core::cmp::Ordering;

use super::handle::Handle;
use super::node::Direction;
use super::raw_osrbtree_map::RawOSRBTreeMap;

/// Result of searching for a key from the root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key was found at the given node.
    Found(Handle),
    /// Key was not found; a new node would hang from `parent` on `direction`.
    /// `parent` is `NIL` for an empty tree.
    Vacant { parent: Handle, direction: Direction },
}

impl<K, V> RawOSRBTreeMap<K, V> {
    #[inline]
    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) fn search_position<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = Handle::NIL;
        let mut direction = Direction::Left;
        let mut current = self.root;

        while !current.is_nil() {
            let node = self.nodes.get(current);
            direction = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return SearchResult::Found(current),
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
            };
            parent = current;
            current = node.child(direction);
        }

        SearchResult::Vacant { parent, direction }
    }

    pub(crate) fn search_node<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search_position(key) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant { .. } => None,
        }
    }

    /// The outermost node of the subtree at `from` toward `direction`
    /// (`Left` = minimum, `Right` = maximum). `NIL` for an empty subtree.
    pub(crate) fn extreme(&self, from: Handle, direction: Direction) -> Handle {
        let mut current = from;
        loop {
            let next = self.child(current, direction);
            if next.is_nil() {
                return current;
            }
            current = next;
        }
    }

    /// The in-order neighbour of `handle` toward `direction`
    /// (`Right` = successor, `Left` = predecessor). `NIL` if there is none.
    pub(crate) fn step(&self, handle: Handle, direction: Direction) -> Handle {
        let child = self.child(handle, direction);
        if !child.is_nil() {
            return self.extreme(child, direction.opposite());
        }

        let mut current = handle;
        let mut parent = self.parent(current);
        while !parent.is_nil() && current == self.child(parent, direction) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// The node holding the `rank`-th smallest key, 1-based.
    pub(crate) fn select_node(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut current = self.root;
        let mut remaining = rank;
        loop {
            let left = self.left(current);
            let here = self.size(left) + 1;
            match remaining.cmp(&here) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = left,
                Ordering::Greater => {
                    remaining -= here;
                    current = self.right(current);
                }
            }
            debug_assert!(
                !current.is_nil(),
                "select_node: size invariant violated - rank {rank} not found (len {})",
                self.len()
            );
        }
    }

    /// 1-based position of `handle` in key order.
    pub(crate) fn rank_node(&self, handle: Handle) -> usize {
        let mut rank = self.size(self.left(handle)) + 1;
        let mut current = handle;
        while current != self.root {
            let parent = self.parent(current);
            if current == self.right(parent) {
                rank += self.size(self.left(parent)) + 1;
            }
            current = parent;
        }
        rank
    }

    // ─── Structural traversal ───────────────────────────────────────────────

    /// The node visited after `handle` in preorder, or `NIL`.
    pub(crate) fn preorder_next(&self, handle: Handle) -> Handle {
        for direction in [Direction::Left, Direction::Right] {
            let child = self.child(handle, direction);
            if !child.is_nil() {
                return child;
            }
        }

        let mut current = handle;
        let mut parent = self.parent(current);
        while !parent.is_nil() {
            let sibling = self.right(parent);
            if current == self.left(parent) && !sibling.is_nil() {
                return sibling;
            }
            current = parent;
            parent = self.parent(parent);
        }
        Handle::NIL
    }

    /// The first node visited in postorder, or `NIL` for an empty tree.
    pub(crate) fn postorder_first(&self) -> Handle {
        if self.root.is_nil() {
            Handle::NIL
        } else {
            self.first_leaf_below(self.root)
        }
    }

    /// The node visited after `handle` in postorder, or `NIL`.
    pub(crate) fn postorder_next(&self, handle: Handle) -> Handle {
        let parent = self.parent(handle);
        if parent.is_nil() {
            return Handle::NIL;
        }

        let sibling = self.right(parent);
        if handle == self.left(parent) && !sibling.is_nil() {
            self.first_leaf_below(sibling)
        } else {
            parent
        }
    }

    fn first_leaf_below(&self, from: Handle) -> Handle {
        let mut current = from;
        loop {
            let left = self.left(current);
            let right = self.right(current);
            current = match (left.is_nil(), right.is_nil()) {
                (false, _) => left,
                (true, false) => right,
                (true, true) => return current,
            };
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, handle: Handle) -> usize {
        if handle.is_nil() {
            0
        } else {
            1 + self.subtree_height(self.left(handle)).max(self.subtree_height(self.right(handle)))
        }
    }
}
