use super::handle::Handle;
use super::size::Size;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A real (non-sentinel) tree vertex.
///
/// Links that do not lead to a real node hold [`Handle::NIL`]. Only the tree mutates
/// links, colors and sizes; the node itself just stores them.
pub(crate) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Handle,
    pub(super) right: Handle,
    pub(super) parent: Handle,
    pub(super) color: Color,
    // Number of real nodes in the subtree rooted here, including this one.
    pub(super) size: Size,
}

impl<K, V> Node<K, V> {
    /// A freshly inserted leaf: red, size one, both children `NIL`.
    pub(crate) const fn new_leaf(key: K, value: V, parent: Handle) -> Self {
        Self {
            key,
            value,
            left: Handle::NIL,
            right: Handle::NIL,
            parent,
            color: Color::Red,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// The key stays shared: mutating it would break ordering.
    #[inline]
    pub(crate) fn key_value_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub(crate) const fn child(&self, direction: Direction) -> Handle {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, direction: Direction, child: Handle) {
        match direction {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// The single per-tree sentinel.
///
/// Its color (black), size (zero) and children (itself) never change. Its parent link is
/// scratch space written by transplant so delete-fixup can climb from a `NIL` position.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sentinel {
    pub(super) parent: Handle,
}

impl Sentinel {
    pub(crate) const fn new() -> Self {
        Self { parent: Handle::NIL }
    }
}
