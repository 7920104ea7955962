//! Element Engine - Registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: index ownership, parent context, destroy callbacks
//! - Arrays: parallel columns of element state
//! - Tree: ordered traversal of the element tree
//!
//! # Architecture
//!
//! Elements are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Container (parent=None, classes=[Formlib-Form])
//! Index 1: Container (parent=0, classes=[Formlib-Row], attrs={id: title__Row})
//! Index 2: Label     (parent=1, text="Title")
//! ```

mod registry;
pub mod arrays;
pub mod tree;

pub use registry::*;
