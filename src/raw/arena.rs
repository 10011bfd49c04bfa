use alloc::vec::Vec;

use super::handle::Handle;

enum Slot<T> {
    Occupied(T),
    // Vacant slots form a singly linked free list terminated by `Handle::NIL`.
    Vacant { next_free: Handle },
}

/// Slot storage addressed by [`Handle`]s that stay valid until freed.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Handle,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: Handle::NIL,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: Handle::NIL,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if self.free_head.is_nil() {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.len += 1;
            self.slots.push(Slot::Occupied(element));
            return Handle::from_index(self.slots.len() - 1);
        }

        let handle = self.free_head;
        let slot = &mut self.slots[handle.to_index()];
        match *slot {
            Slot::Vacant { next_free } => self.free_head = next_free,
            Slot::Occupied(_) => unreachable!("`Arena::alloc()` - free list points at an occupied slot!"),
        }
        *slot = Slot::Occupied(element);
        self.len += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(&mut self.slots[handle.to_index()], vacant) {
            Slot::Occupied(element) => {
                self.free_head = handle;
                self.len -= 1;
                element
            }
            Slot::Vacant { .. } => panic!("`Arena::take()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Handle::NIL;
        self.len = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn freed_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let _c = arena.alloc('c');
        arena.free(a);
        arena.free(b);
        assert_eq!(arena.alloc('x'), b);
        assert_eq!(arena.alloc('y'), a);
        assert_eq!(arena.len(), 3);
        assert_eq!(*arena.get(a), 'y');
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_free_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(7_u8);
        arena.free(handle);
        let _ = arena.get(handle);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `handle` is invalid!")]
    fn double_free_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(7_u8);
        arena.free(handle);
        arena.free(handle);
    }

    proptest! {
        #[test]
        fn arena_matches_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(model.iter().all(|&(h, _)| h != handle));
                        model.push((handle, value));
                    }
                    Operation::Overwrite(which, value) if !model.is_empty() => {
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) if !model.is_empty() => {
                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                    Operation::Overwrite(..) | Operation::Take(_) => {}
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Overwrite(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
