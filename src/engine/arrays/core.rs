//! Core Arrays - Element kind, tree position and flags.

use std::cell::{Cell, RefCell};

use super::{clear, modify, read, write, Column};
use crate::types::{ElementFlags, ElementKind};

thread_local! {
    /// What each element is.
    static ELEMENT_KIND: Column<ElementKind> = RefCell::new(Vec::new());

    /// Parent element (None at the root).
    static PARENT_INDEX: Column<Option<usize>> = RefCell::new(Vec::new());

    /// Display order among siblings (lower first).
    static ORDER: Column<i32> = RefCell::new(Vec::new());

    /// Creation sequence, tie-break for equal order. Survives index reuse.
    static SEQUENCE: Column<u64> = RefCell::new(Vec::new());

    /// Boolean state.
    static FLAGS: Column<ElementFlags> = RefCell::new(Vec::new());

    static NEXT_SEQUENCE: Cell<u64> = const { Cell::new(0) };
}

pub fn ensure_capacity(index: usize) {
    modify(&ELEMENT_KIND, index, |_| {});
    modify(&PARENT_INDEX, index, |_| {});
    modify(&ORDER, index, |_| {});
    modify(&SEQUENCE, index, |_| {});
    modify(&FLAGS, index, |_| {});
}

pub fn clear_at_index(index: usize) {
    clear(&ELEMENT_KIND, index);
    clear(&PARENT_INDEX, index);
    clear(&ORDER, index);
    clear(&SEQUENCE, index);
    clear(&FLAGS, index);
}

pub fn reset() {
    ELEMENT_KIND.with(|col| col.borrow_mut().clear());
    PARENT_INDEX.with(|col| col.borrow_mut().clear());
    ORDER.with(|col| col.borrow_mut().clear());
    SEQUENCE.with(|col| col.borrow_mut().clear());
    FLAGS.with(|col| col.borrow_mut().clear());
}

// =============================================================================
// Accessors
// =============================================================================

pub fn set_element_kind(index: usize, kind: ElementKind) {
    write(&ELEMENT_KIND, index, kind);
}

pub fn get_element_kind(index: usize) -> ElementKind {
    read(&ELEMENT_KIND, index)
}

pub fn set_parent_index(index: usize, parent: Option<usize>) {
    write(&PARENT_INDEX, index, parent);
}

pub fn get_parent_index(index: usize) -> Option<usize> {
    read(&PARENT_INDEX, index)
}

pub fn set_order(index: usize, order: i32) {
    write(&ORDER, index, order);
}

pub fn get_order(index: usize) -> i32 {
    read(&ORDER, index)
}

/// Stamp the next creation sequence number on `index`.
pub fn stamp_sequence(index: usize) {
    let seq = NEXT_SEQUENCE.with(|next| {
        let seq = next.get();
        next.set(seq + 1);
        seq
    });
    write(&SEQUENCE, index, seq);
}

pub fn get_sequence(index: usize) -> u64 {
    read(&SEQUENCE, index)
}

pub fn set_flags(index: usize, flags: ElementFlags) {
    write(&FLAGS, index, flags);
}

pub fn get_flags(index: usize) -> ElementFlags {
    read(&FLAGS, index)
}

/// Turn one flag on or off, leaving the others.
pub fn set_flag(index: usize, flag: ElementFlags, on: bool) {
    modify(&FLAGS, index, |flags| flags.set(flag, on));
}
