//! Content Arrays - Text, classes and attributes.
//!
//! Classes are ordered and deduplicated. Attributes carry string data read
//! by event handlers, e.g. `data-drag-index` on draggable list rows.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{clear, modify, read, write, Column};

thread_local! {
    static TEXT: Column<String> = RefCell::new(Vec::new());

    static CLASSES: Column<Vec<String>> = RefCell::new(Vec::new());

    static ATTRS: Column<BTreeMap<String, String>> = RefCell::new(Vec::new());
}

pub fn ensure_capacity(index: usize) {
    modify(&TEXT, index, |_| {});
    modify(&CLASSES, index, |_| {});
    modify(&ATTRS, index, |_| {});
}

pub fn clear_at_index(index: usize) {
    clear(&TEXT, index);
    clear(&CLASSES, index);
    clear(&ATTRS, index);
}

pub fn reset() {
    TEXT.with(|col| col.borrow_mut().clear());
    CLASSES.with(|col| col.borrow_mut().clear());
    ATTRS.with(|col| col.borrow_mut().clear());
}

// =============================================================================
// Text
// =============================================================================

pub fn set_text(index: usize, text: String) {
    write(&TEXT, index, text);
}

pub fn get_text(index: usize) -> String {
    read(&TEXT, index)
}

// =============================================================================
// Classes
// =============================================================================

pub fn add_class(index: usize, class: &str) {
    modify(&CLASSES, index, |classes| {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    });
}

pub fn remove_class(index: usize, class: &str) {
    modify(&CLASSES, index, |classes| classes.retain(|c| c != class));
}

pub fn toggle_class(index: usize, class: &str, on: bool) {
    if on {
        add_class(index, class);
    } else {
        remove_class(index, class);
    }
}

pub fn has_class(index: usize, class: &str) -> bool {
    CLASSES.with(|col| {
        col.borrow()
            .get(index)
            .is_some_and(|classes| classes.iter().any(|c| c == class))
    })
}

pub fn get_classes(index: usize) -> Vec<String> {
    read(&CLASSES, index)
}

// =============================================================================
// Attributes
// =============================================================================

pub fn set_attr(index: usize, name: &str, value: String) {
    modify(&ATTRS, index, |attrs| {
        attrs.insert(name.to_string(), value);
    });
}

pub fn get_attr(index: usize, name: &str) -> Option<String> {
    ATTRS.with(|col| col.borrow().get(index).and_then(|attrs| attrs.get(name).cloned()))
}

pub fn remove_attr(index: usize, name: &str) {
    modify(&ATTRS, index, |attrs| {
        attrs.remove(name);
    });
}
