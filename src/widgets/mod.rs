//! Widgets - Rows, inputs and the list field.
//!
//! Every widget is a render function: it takes props, mounts elements under
//! the current parent and returns the cleanup that unmounts them.
//!
//! - [`row`], [`object_row`], [`list_row`], [`checkbox_row`] - row frames
//! - [`text_input`], [`checkbox_input`], [`object_field`] - inputs
//! - [`list_field`] - editable list with stable row identity
//! - [`label`], [`help_msg`], [`error_msg`], [`placeholder`] - row parts

pub mod common;
pub mod input;
pub mod list_field;
pub mod row;

pub use common::{error_msg, help_msg, help_text, label, placeholder};
pub use input::{checkbox_input, object_field, render_field, text_input};
pub use list_field::{list_field, list_field_row, ListItem};
pub use row::{checkbox_row, list_row, object_row, row};
