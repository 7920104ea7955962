//! Adapter registry - which widget renders which field.
//!
//! Widgets are trait objects registered per (target, capability). A target
//! is either a concrete [`FieldKind`] or [`AdapterTarget::AnyField`], the
//! fallback for kinds without their own widget.
//!
//! ```ignore
//! let mut registry = AdapterRegistry::with_defaults();
//! registry.register_input(AdapterTarget::Kind(FieldKind::Date), Rc::new(my_date_picker));
//!
//! let input = registry.lookup_input(FieldKind::Date)?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::context::FormContext;
use crate::error::FormError;
use crate::primitives::{Cleanup, Children};
use crate::schema::{ErrorLens, Field, FieldKind, ValueLens};
use crate::widgets;

/// What a registered widget is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Wraps an input with label, help and errors.
    FormRow,
    /// Edits the value.
    InputField,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::FormRow => write!(f, "form row"),
            Capability::InputField => write!(f, "input field"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterTarget {
    Kind(FieldKind),
    AnyField,
}

// =============================================================================
// Props
// =============================================================================

/// Change notification: receives the field's new value.
pub type ChangeCallback = Rc<dyn Fn(&Value)>;

/// Props of a row widget.
pub struct RowProps {
    pub field: Rc<Field>,
    pub value: ValueLens,
    pub errors: ErrorLens,
    pub ctx: FormContext,
    /// The input rendered inside the row.
    pub children: Option<Children>,
}

/// Props of an input widget.
#[derive(Clone)]
pub struct InputProps {
    pub field: Rc<Field>,
    pub value: ValueLens,
    pub errors: ErrorLens,
    pub ctx: FormContext,
    pub on_change: Option<ChangeCallback>,
}

impl InputProps {
    /// Write `value` through the lens and notify.
    pub fn commit(&self, value: Value) {
        self.value.set(value);
        self.notify();
    }

    /// Notify with the current value.
    pub fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(&self.value.get());
        }
    }
}

// =============================================================================
// Widget Traits
// =============================================================================

pub trait RowWidget {
    fn render(&self, props: RowProps) -> Cleanup;
}

pub trait InputWidget {
    fn render(&self, props: InputProps) -> Cleanup;
}

impl<F: Fn(RowProps) -> Cleanup> RowWidget for F {
    fn render(&self, props: RowProps) -> Cleanup {
        self(props)
    }
}

impl<F: Fn(InputProps) -> Cleanup> InputWidget for F {
    fn render(&self, props: InputProps) -> Cleanup {
        self(props)
    }
}

/// A registered widget.
#[derive(Clone)]
pub enum Adapter {
    Row(Rc<dyn RowWidget>),
    Input(Rc<dyn InputWidget>),
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adapter::Row(_) => write!(f, "Adapter::Row"),
            Adapter::Input(_) => write!(f, "Adapter::Input"),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<(AdapterTarget, Capability), Adapter>,
}

impl AdapterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in rows and inputs.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_row(AdapterTarget::AnyField, Rc::new(widgets::row));
        registry.register_row(AdapterTarget::Kind(FieldKind::Object), Rc::new(widgets::object_row));
        registry.register_row(AdapterTarget::Kind(FieldKind::List), Rc::new(widgets::list_row));
        registry.register_row(AdapterTarget::Kind(FieldKind::Bool), Rc::new(widgets::checkbox_row));

        registry.register_input(AdapterTarget::AnyField, Rc::new(widgets::text_input));
        registry.register_input(AdapterTarget::Kind(FieldKind::Bool), Rc::new(widgets::checkbox_input));
        registry.register_input(AdapterTarget::Kind(FieldKind::Object), Rc::new(widgets::object_field));
        registry.register_input(AdapterTarget::Kind(FieldKind::List), Rc::new(widgets::list_field));
        registry
    }

    pub fn register_row(&mut self, target: AdapterTarget, widget: Rc<dyn RowWidget>) {
        self.adapters.insert((target, Capability::FormRow), Adapter::Row(widget));
    }

    pub fn register_input(&mut self, target: AdapterTarget, widget: Rc<dyn InputWidget>) {
        self.adapters.insert((target, Capability::InputField), Adapter::Input(widget));
    }

    /// Exact kind first, then the any-field adapter.
    pub fn lookup(&self, kind: FieldKind, capability: Capability) -> Result<Adapter, FormError> {
        self.adapters
            .get(&(AdapterTarget::Kind(kind), capability))
            .or_else(|| self.adapters.get(&(AdapterTarget::AnyField, capability)))
            .cloned()
            .ok_or(FormError::AdapterNotFound { kind, capability })
    }

    pub fn lookup_row(&self, kind: FieldKind) -> Result<Rc<dyn RowWidget>, FormError> {
        match self.lookup(kind, Capability::FormRow)? {
            Adapter::Row(widget) => Ok(widget),
            Adapter::Input(_) => Err(FormError::AdapterNotFound {
                kind,
                capability: Capability::FormRow,
            }),
        }
    }

    pub fn lookup_input(&self, kind: FieldKind) -> Result<Rc<dyn InputWidget>, FormError> {
        match self.lookup(kind, Capability::InputField)? {
            Adapter::Input(widget) => Ok(widget),
            Adapter::Row(_) => Err(FormError::AdapterNotFound {
                kind,
                capability: Capability::InputField,
            }),
        }
    }
}
