//! Schema model consumed by the widgets.
//!
//! - [`field`] - field definitions (type, label, help, child lookup)
//! - [`lens`] - paths and lenses into the form value and error trees
//! - [`validation`] - validation error shapes and invariant matching

pub mod field;
pub mod lens;
pub mod validation;

pub use field::{Field, FieldKind, NamedField};
pub use lens::{ErrorLens, FieldPath, PathSegment, Step, ValueLens};
pub use validation::{
    match_invariant_error, ErrorMessage, InvariantError, ValidationError,
    MULTIPLE_INVARIANT_LABEL, MULTIPLE_INVARIANT_MESSAGE,
};
