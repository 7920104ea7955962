//! Element Events - Click and input handler registry.
//!
//! Handlers are registered per element index and removed by the returned
//! cleanup (elements register it as a destroy callback). Dispatch clones the
//! handler out of the registry before calling it, so a handler may unmount
//! its own element.
//!
//! # Example
//!
//! ```ignore
//! use spark_formlib::state::events;
//!
//! let cleanup = events::on_element(index, ElementHandlers {
//!     on_click: Some(Rc::new(|| println!("clicked"))),
//!     ..Default::default()
//! });
//!
//! events::click(index);
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::mem::ManuallyDrop;
use std::rc::Rc;

use crate::engine::arrays::core;
use crate::types::ElementFlags;

/// Click callback.
pub type ClickCallback = Rc<dyn Fn()>;

/// Text input callback, receives the full new text.
pub type InputCallback = Rc<dyn Fn(&str)>;

/// Handlers for one element.
#[derive(Default, Clone)]
pub struct ElementHandlers {
    pub on_click: Option<ClickCallback>,
    pub on_input: Option<InputCallback>,
}

thread_local! {
    // Leaked at thread exit: handlers capture signals.
    static REGISTRY: ManuallyDrop<RefCell<HashMap<usize, ElementHandlers>>> =
        ManuallyDrop::new(RefCell::new(HashMap::new()));
}

// =============================================================================
// Registration
// =============================================================================

/// Register handlers for an element. Returns cleanup function.
pub fn on_element(index: usize, handlers: ElementHandlers) -> impl FnOnce() {
    REGISTRY.with(|reg| {
        reg.borrow_mut().insert(index, handlers);
    });

    move || cleanup_index(index)
}

/// Remove all handlers of an element.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().remove(&index);
    });
}

fn handlers(index: usize) -> Option<ElementHandlers> {
    if core::get_flags(index).contains(ElementFlags::DISABLED) {
        return None;
    }
    REGISTRY.with(|reg| reg.borrow().get(&index).cloned())
}

// =============================================================================
// Dispatch
// =============================================================================

/// Click an element. Returns true if a handler ran.
pub fn click(index: usize) -> bool {
    let Some(on_click) = handlers(index).and_then(|h| h.on_click) else {
        return false;
    };
    on_click();
    true
}

/// Deliver new text to an input element. Returns true if a handler ran.
pub fn input(index: usize, text: &str) -> bool {
    let Some(on_input) = handlers(index).and_then(|h| h.on_input) else {
        return false;
    };
    on_input(text);
    true
}

/// Reset event state (for testing)
pub fn reset_events() {
    REGISTRY.with(|reg| reg.borrow_mut().clear());
}
