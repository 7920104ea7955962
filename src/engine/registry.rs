//! Element Registry - Ownership of element indices.
//!
//! An element index is owned by the registry from `allocate_index` until
//! `release_index`. Releasing an element releases its subtree first, then
//! runs the element's destroy callbacks (most recent first), then wipes its
//! array slots and returns the index to the free pool.
//!
//! Widgets mount children under the index on top of the parent stack, so
//! the tree shape is recorded as elements are created.
//!
//! # Thread exit
//!
//! Destroy callbacks capture signals. A form still mounted when its thread
//! exits is leaked, not dropped: the signal runtime's own thread-locals may
//! already be gone by then. Unmount forms before their thread ends.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::mem::ManuallyDrop;

use super::arrays;

type DestroyCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Registry {
    allocated: BTreeSet<usize>,
    free: Vec<usize>,
    next: usize,
    parents: Vec<usize>,
    on_destroy: HashMap<usize, Vec<DestroyCallback>>,
}

thread_local! {
    static REGISTRY: ManuallyDrop<RefCell<Registry>> =
        ManuallyDrop::new(RefCell::new(Registry::default()));
}

/// Borrow the registry for one short edit. Never call out while borrowed.
fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    REGISTRY.with(|reg| f(&mut reg.borrow_mut()))
}

// =============================================================================
// Parent Stack
// =============================================================================

/// Element new elements are mounted under (None at the root).
pub fn get_current_parent_index() -> Option<usize> {
    with_registry(|reg| reg.parents.last().copied())
}

pub fn push_parent_context(index: usize) {
    with_registry(|reg| reg.parents.push(index));
}

pub fn pop_parent_context() {
    with_registry(|reg| {
        reg.parents.pop();
    });
}

/// Run `f` with `parent` as the current parent, restoring afterwards.
pub fn with_parent<R>(parent: Option<usize>, f: impl FnOnce() -> R) -> R {
    if let Some(parent) = parent {
        push_parent_context(parent);
    }
    let result = f();
    if parent.is_some() {
        pop_parent_context();
    }
    result
}

// =============================================================================
// Allocation
// =============================================================================

/// Take an index for a new element, reusing a released one when possible.
///
/// Every allocation gets a fresh creation sequence, so a reused index can be
/// told apart from the element that held it before.
pub fn allocate_index() -> usize {
    let index = with_registry(|reg| {
        let index = reg.free.pop().unwrap_or_else(|| {
            reg.next += 1;
            reg.next - 1
        });
        reg.allocated.insert(index);
        index
    });

    arrays::ensure_all_capacity(index);
    arrays::core::stamp_sequence(index);
    index
}

/// Release an element and everything mounted below it.
///
/// Releasing an index that is not allocated does nothing, so cleanups may
/// race with an ancestor's release.
pub fn release_index(index: usize) {
    let owned = with_registry(|reg| reg.allocated.contains(&index));
    if !owned {
        return;
    }

    let children: Vec<usize> = get_allocated_indices()
        .into_iter()
        .filter(|&child| arrays::core::get_parent_index(child) == Some(index))
        .collect();
    for child in children {
        release_index(child);
    }

    // Unowned before the callbacks run: a callback that releases this index
    // again finds nothing to do. Array slots stay readable until they finish.
    let callbacks = with_registry(|reg| {
        reg.allocated.remove(&index);
        reg.on_destroy.remove(&index).unwrap_or_default()
    });
    for callback in callbacks.into_iter().rev() {
        callback();
    }

    arrays::clear_all_at_index(index);
    let drained = with_registry(|reg| {
        reg.free.push(index);
        reg.allocated.is_empty()
    });

    if drained {
        arrays::reset_all_arrays();
        with_registry(|reg| {
            reg.free.clear();
            reg.next = 0;
        });
    }
}

/// Run `callback` when the element at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    with_registry(|reg| {
        reg.on_destroy
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

// =============================================================================
// Queries
// =============================================================================

/// All allocated indices, ascending.
pub fn get_allocated_indices() -> Vec<usize> {
    with_registry(|reg| reg.allocated.iter().copied().collect())
}

pub fn is_allocated(index: usize) -> bool {
    with_registry(|reg| reg.allocated.contains(&index))
}

pub fn get_allocated_count() -> usize {
    with_registry(|reg| reg.allocated.len())
}

/// Drop every element without running destroy callbacks (for testing).
pub fn reset_registry() {
    let stale = with_registry(std::mem::take);
    drop(stale);
    arrays::reset_all_arrays();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_allocate_index() {
        reset_registry();

        let ids: Vec<usize> = (0..3).map(|_| allocate_index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(is_allocated(2));
        assert!(!is_allocated(3));
        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_released_index_is_reused_with_newer_sequence() {
        reset_registry();

        let first = allocate_index();
        let second = allocate_index();
        release_index(first);
        assert!(!is_allocated(first));

        let before = arrays::core::get_sequence(second);
        let reused = allocate_index();
        assert_eq!(reused, first);
        assert!(arrays::core::get_sequence(reused) > before);
    }

    #[test]
    fn test_release_takes_the_subtree() {
        reset_registry();

        let parent = allocate_index();
        let child = allocate_index();
        let grandchild = allocate_index();
        let other = allocate_index();
        arrays::core::set_parent_index(child, Some(parent));
        arrays::core::set_parent_index(grandchild, Some(child));

        release_index(parent);
        assert!(!is_allocated(child));
        assert!(!is_allocated(grandchild));
        assert!(is_allocated(other));
    }

    #[test]
    fn test_release_twice_frees_once() {
        reset_registry();

        let idx = allocate_index();
        let _keep = allocate_index();
        release_index(idx);
        release_index(idx);
        assert_eq!(get_allocated_count(), 1);
        // One free slot, so the next two allocations differ.
        assert_ne!(allocate_index(), allocate_index());
    }

    #[test]
    fn test_callback_releasing_its_own_element() {
        reset_registry();

        let idx = allocate_index();
        let _keep = allocate_index();
        on_destroy(idx, move || release_index(idx));
        release_index(idx);

        assert!(!is_allocated(idx));
        assert_ne!(allocate_index(), allocate_index());
    }

    #[test]
    fn test_parent_context() {
        reset_registry();

        assert_eq!(get_current_parent_index(), None);
        push_parent_context(5);
        let inner = with_parent(Some(10), get_current_parent_index);
        assert_eq!(inner, Some(10));
        assert_eq!(get_current_parent_index(), Some(5));
        pop_parent_context();
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_destroy_callbacks_run_newest_first() {
        reset_registry();

        let order = Rc::new(RefCell::new(Vec::new()));
        let idx = allocate_index();
        for tag in ["first", "second"] {
            let order = order.clone();
            on_destroy(idx, move || order.borrow_mut().push(tag));
        }

        release_index(idx);
        assert_eq!(*order.borrow(), vec!["second", "first"]);
    }

    #[test]
    fn test_reset_skips_callbacks() {
        reset_registry();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();
        let idx = allocate_index();
        on_destroy(idx, move || called_clone.set(true));

        reset_registry();
        assert!(!called.get());
        assert_eq!(get_allocated_count(), 0);
    }
}
