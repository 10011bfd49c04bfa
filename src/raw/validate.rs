use core::fmt;

use super::handle::Handle;
use super::node::Color;
use super::raw_osrbtree_map::RawOSRBTreeMap;

/// A broken structural invariant. Seeing one means the tree code has a bug.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Violation {
    RedRoot,
    /// A red node with a red child.
    RedRed(Handle),
    /// Left and right black-heights differ below this node.
    BlackHeight(Handle),
    /// Stored subtree size differs from `left + right + 1`.
    Size(Handle),
    /// Child's parent link does not point back.
    ParentLink(Handle),
    /// Key is outside the bounds set by its ancestors.
    Order(Handle),
    /// Root size disagrees with the number of live nodes.
    Count { root_size: usize, nodes: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RedRoot => write!(f, "root is red"),
            Violation::RedRed(h) => write!(f, "red node {h:?} has a red child"),
            Violation::BlackHeight(h) => write!(f, "unequal black-heights below {h:?}"),
            Violation::Size(h) => write!(f, "subtree size of {h:?} is inconsistent"),
            Violation::ParentLink(h) => write!(f, "parent link of {h:?} is inconsistent"),
            Violation::Order(h) => write!(f, "key of {h:?} is out of order"),
            Violation::Count { root_size, nodes } => {
                write!(f, "root size {root_size} does not match {nodes} live nodes")
            }
        }
    }
}

impl<K: Ord, V> RawOSRBTreeMap<K, V> {
    /// Checks order, coloring, black-height, size and parent-link invariants.
    ///
    /// O(n); recursion depth is the tree height.
    pub(crate) fn validate(&self) -> Result<(), Violation> {
        if self.is_red(self.root) {
            return Err(Violation::RedRoot);
        }
        if !self.root.is_nil() && !self.node(self.root).parent.is_nil() {
            return Err(Violation::ParentLink(self.root));
        }
        self.check_subtree(self.root, None, None)?;

        let root_size = self.size(self.root);
        if root_size != self.len() {
            return Err(Violation::Count {
                root_size,
                nodes: self.len(),
            });
        }
        Ok(())
    }

    /// Returns the black-height of the subtree at `handle`, counting the sentinel.
    fn check_subtree(&self, handle: Handle, lower: Option<&K>, upper: Option<&K>) -> Result<usize, Violation> {
        if handle.is_nil() {
            return Ok(1);
        }

        let node = self.node(handle);
        if lower.is_some_and(|bound| node.key <= *bound) || upper.is_some_and(|bound| node.key >= *bound) {
            return Err(Violation::Order(handle));
        }

        for child in [node.left, node.right] {
            if !child.is_nil() && self.node(child).parent != handle {
                return Err(Violation::ParentLink(child));
            }
            if node.color == Color::Red && self.is_red(child) {
                return Err(Violation::RedRed(handle));
            }
        }

        let left = self.check_subtree(node.left, lower, Some(&node.key))?;
        let right = self.check_subtree(node.right, Some(&node.key), upper)?;
        if node.size.to_usize() != self.size(node.left) + self.size(node.right) + 1 {
            return Err(Violation::Size(handle));
        }
        if left != right {
            return Err(Violation::BlackHeight(handle));
        }

        Ok(left + usize::from(node.color == Color::Black))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::node::Direction;
    use super::super::size::Size;
    use super::*;

    fn sample() -> RawOSRBTreeMap<u32, ()> {
        let mut tree = RawOSRBTreeMap::new();
        for key in 0..16 {
            tree.insert(key, ());
        }
        tree
    }

    #[test]
    fn valid_tree_passes() {
        assert_eq!(sample().validate(), Ok(()));
        assert_eq!(RawOSRBTreeMap::<u32, ()>::new().validate(), Ok(()));
    }

    #[test]
    fn detects_red_root() {
        let mut tree = sample();
        let root = tree.root();
        tree.node_mut(root).color = Color::Red;
        assert_eq!(tree.validate(), Err(Violation::RedRoot));
    }

    #[test]
    fn detects_stale_size() {
        let mut tree = sample();
        let first = tree.extreme(tree.root(), Direction::Left);
        tree.node_mut(first).size = Size::from_usize(5);
        assert_eq!(tree.validate(), Err(Violation::Size(first)));
    }

    #[test]
    fn detects_out_of_order_key() {
        let mut tree = sample();
        let first = tree.extreme(tree.root(), Direction::Left);
        tree.node_mut(first).key = 1_000;
        assert_eq!(tree.validate(), Err(Violation::Order(first)));
    }

    #[test]
    fn display_names_the_problem() {
        let message = alloc::format!("{}", Violation::Count { root_size: 3, nodes: 4 });
        assert_eq!(message, "root size 3 does not match 4 live nodes");
    }
}
