//! Interaction state: element events, drag and drop, animation hooks.

pub mod animate;
pub mod drag;
pub mod events;
