//! # spark-formlib
//!
//! Reactive form rows and editable list fields.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Elements are indices into parallel arrays, not objects. Widgets are render
//! functions that mount elements under the current parent and bind their
//! properties to the form value through lenses. A write through a lens
//! re-runs only the effects that read the changed part of the value.
//!
//! ```text
//! Schema + Signal<Value> → form() → AdapterRegistry lookup → row + input widgets → element arrays
//! ```
//!
//! List fields keep a synthetic key per item so rows follow their values
//! across deletes, drag reorders and external replacement of the list.
//!
//! ## Modules
//!
//! - [`adapter`] - widget registry keyed by field kind and capability
//! - [`context`] - per-form services (translator, animator, options)
//! - [`engine`] - element registry, parallel arrays, tree queries
//! - [`form`] - root mount
//! - [`identity`] - list item identity tracking
//! - [`primitives`] - `element`, `show`, `each`
//! - [`renderer`] - text rendering of the element tree
//! - [`schema`] - field definitions, lenses, validation errors
//! - [`state`] - element events, drag and drop, animation hooks
//! - [`widgets`] - rows, inputs, the list field

pub mod adapter;
pub mod context;
pub mod engine;
pub mod error;
pub mod form;
pub mod i18n;
pub mod identity;
pub mod options;
pub mod primitives;
pub mod renderer;
pub mod schema;
pub mod state;
pub mod types;
pub mod widgets;

// Re-export commonly used items
pub use types::*;

pub use adapter::{
    Adapter, AdapterRegistry, AdapterTarget, Capability, ChangeCallback, InputProps, InputWidget,
    RowProps, RowWidget,
};

pub use context::FormContext;

pub use engine::{get_allocated_count, reset_registry, tree};

pub use error::FormError;

pub use form::{form, FormProps};

pub use i18n::{i18n, Catalog, I18nText, NoTranslation, Translator};

pub use identity::{splice_move, ListIdentityTracker};

pub use options::FormOptions;

pub use primitives::{each, element, show, Cleanup, ElementHandle, ElementProps, PropValue};

pub use renderer::TextRenderer;

pub use schema::{
    ErrorLens, ErrorMessage, Field, FieldKind, FieldPath, InvariantError, ValidationError,
    ValueLens,
};

pub use state::animate::{Animator, ClassAnimator, NoAnimation, RecordingAnimator};
pub use state::drag::{drag_and_drop, DragEvent};
pub use state::events::{click, input};
