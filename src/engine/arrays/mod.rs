//! Parallel Arrays - Element state by index.
//!
//! Every mounted element is an index. Its state lives in columns, one per
//! property, all indexed the same way:
//!
//! - **core**: kind, parent, order, creation sequence, flags
//! - **content**: text, classes, attributes
//!
//! Widgets write through the setters (directly or from an effect bound to a
//! signal). The renderer and tree queries read the columns.

pub mod content;
pub mod core;

use std::cell::RefCell;
use std::thread::LocalKey;

use self::content as content_arrays;
use self::core as core_arrays;

/// Column storage: one value per element index.
pub(crate) type Column<T> = RefCell<Vec<T>>;

/// Write `value` at `index`, growing the column with defaults.
pub(crate) fn write<T: Default>(column: &'static LocalKey<Column<T>>, index: usize, value: T) {
    column.with(|col| {
        let mut col = col.borrow_mut();
        if col.len() <= index {
            col.resize_with(index + 1, T::default);
        }
        col[index] = value;
    });
}

/// Read the value at `index`, default when never written.
pub(crate) fn read<T: Default + Clone>(column: &'static LocalKey<Column<T>>, index: usize) -> T {
    column.with(|col| col.borrow().get(index).cloned().unwrap_or_default())
}

/// Edit the value at `index` in place.
pub(crate) fn modify<T: Default>(
    column: &'static LocalKey<Column<T>>,
    index: usize,
    edit: impl FnOnce(&mut T),
) {
    column.with(|col| {
        let mut col = col.borrow_mut();
        if col.len() <= index {
            col.resize_with(index + 1, T::default);
        }
        edit(&mut col[index]);
    });
}

/// Reset the value at `index` to its default.
pub(crate) fn clear<T: Default>(column: &'static LocalKey<Column<T>>, index: usize) {
    column.with(|col| {
        if let Some(slot) = col.borrow_mut().get_mut(index) {
            *slot = T::default();
        }
    });
}

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    content_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    content_arrays::clear_at_index(index);
}

/// Drop all array storage.
///
/// Called automatically when the last element is released.
pub fn reset_all_arrays() {
    core_arrays::reset();
    content_arrays::reset();
}
