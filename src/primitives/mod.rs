//! Primitives - Element building blocks and control flow.
//!
//! - [`element`] - one node of the element tree
//! - [`show`] - conditional branch
//! - [`each`] - keyed list
//!
//! # Reactivity
//!
//! Props can be static values, signals, or getters. Pass signals and getters
//! as they are; reading `.get()` before building the props freezes the value.
//!
//! ```ignore
//! // stays connected
//! ElementProps::new(ElementKind::Text, &[]).text(message_signal.clone());
//!
//! // frozen at creation
//! ElementProps::new(ElementKind::Text, &[]).text(message_signal.get());
//! ```

mod control_flow;
mod element;
mod types;

pub use control_flow::{each, show};
pub use element::element;
pub use types::*;
