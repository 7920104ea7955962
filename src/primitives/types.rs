//! Primitive types - Props, handles and cleanup.
//!
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::state::events::{ClickCallback, InputCallback};
use crate::types::{ElementFlags, ElementKind};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

/// Child render function. Runs with the new element as parent context; the
/// returned cleanup runs when the element is destroyed.
pub type Children = Box<dyn FnOnce() -> Cleanup>;

/// Cleanup that does nothing.
pub fn noop_cleanup() -> Cleanup {
    Box::new(|| {})
}

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// When bound to an element the reactive connection is preserved: the
/// element updates whenever the signal or the getter's dependencies change.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Build a getter prop from a closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }

    pub fn is_static(&self) -> bool {
        matches!(self, PropValue::Static(_))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Element Props
// =============================================================================

/// Properties for the element primitive.
///
/// # Example
///
/// ```ignore
/// use spark_formlib::primitives::{element, ElementProps, PropValue};
///
/// let handle = element(ElementProps {
///     kind: ElementKind::Label,
///     classes: vec!["Formlib-RowFieldLabel".into()],
///     text: Some("Title".into()),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct ElementProps {
    pub kind: ElementKind,

    // =========================================================================
    // Content
    // =========================================================================

    /// Static classes.
    pub classes: Vec<String>,

    /// Classes present while their condition holds.
    pub class_when: Vec<(String, PropValue<bool>)>,

    /// Text content.
    pub text: Option<PropValue<String>>,

    /// Attributes (e.g. `id`, `for`, `data-drag-index`).
    pub attrs: Vec<(String, PropValue<String>)>,

    // =========================================================================
    // State
    // =========================================================================

    /// Display order among siblings.
    pub order: Option<PropValue<i32>>,

    pub flags: ElementFlags,

    /// Checked state (checkboxes).
    pub checked: Option<PropValue<bool>>,

    // =========================================================================
    // Event Callbacks
    // =========================================================================

    pub on_click: Option<ClickCallback>,

    pub on_input: Option<InputCallback>,

    // =========================================================================
    // Children
    // =========================================================================

    pub children: Option<Children>,
}

impl ElementProps {
    /// Props of a given kind with static classes.
    pub fn new(kind: ElementKind, classes: &[&str]) -> Self {
        Self {
            kind,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<PropValue<String>>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<PropValue<String>>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn class_when(mut self, class: &str, on: impl Into<PropValue<bool>>) -> Self {
        self.class_when.push((class.to_string(), on.into()));
        self
    }

    pub fn order(mut self, order: impl Into<PropValue<i32>>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn checked(mut self, checked: impl Into<PropValue<bool>>) -> Self {
        self.checked = Some(checked.into());
        self
    }

    pub fn on_click(mut self, on_click: ClickCallback) -> Self {
        self.on_click = Some(on_click);
        self
    }

    pub fn on_input(mut self, on_input: InputCallback) -> Self {
        self.on_input = Some(on_input);
        self
    }

    pub fn children(mut self, children: impl FnOnce() -> Cleanup + 'static) -> Self {
        self.children = Some(Box::new(children));
        self
    }
}

// =============================================================================
// Element Handle
// =============================================================================

/// A mounted element: its index and the cleanup that unmounts it.
pub struct ElementHandle {
    pub index: usize,
    cleanup: Cleanup,
}

impl ElementHandle {
    pub(crate) fn new(index: usize, cleanup: Cleanup) -> Self {
        Self { index, cleanup }
    }

    /// Unmount the element and everything below it.
    pub fn unmount(self) {
        (self.cleanup)()
    }
}

impl From<ElementHandle> for Cleanup {
    fn from(handle: ElementHandle) -> Self {
        handle.cleanup
    }
}
