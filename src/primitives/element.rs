//! Element Primitive - The one building block every widget is made of.
//!
//! An element is an index into the parallel arrays. Creating one:
//! 1. Allocates an index and links it to the current parent
//! 2. Writes static props, binds reactive props through effects
//! 3. Registers click/input handlers
//! 4. Renders children with itself as the parent context
//!
//! Everything set up here is torn down through destroy callbacks, so
//! releasing an ancestor unmounts the element completely.
//!
//! # Example
//!
//! ```ignore
//! use spark_formlib::primitives::{element, ElementProps};
//!
//! let has_error = signal(false);
//! let row = element(
//!     ElementProps::new(ElementKind::Container, &["Formlib-Row"])
//!         .class_when("Formlib-Row--hasError", has_error.clone())
//!         .children(|| label(&ctx, "Title").into()),
//! );
//!
//! has_error.set(true); // class appears
//! row.unmount();
//! ```

use spark_signals::effect;

use crate::engine::arrays::{content, core};
use crate::engine::{allocate_index, get_current_parent_index, is_allocated, on_destroy, release_index, with_parent};
use crate::state::events::{self, ElementHandlers};
use crate::types::ElementFlags;
use super::types::{Cleanup, ElementHandle, ElementProps, PropValue};

/// Bind a prop to an array column. Static values are written once; signals
/// and getters keep the column updated until the element is destroyed.
fn bind<T: Clone + PartialEq + 'static>(index: usize, prop: PropValue<T>, write: impl Fn(usize, T) + 'static) {
    match prop {
        PropValue::Static(value) => write(index, value),
        reactive => {
            let stop = effect(move || write(index, reactive.get()));
            on_destroy(index, stop);
        }
    }
}

/// Create an element.
pub fn element(props: ElementProps) -> ElementHandle {
    let index = allocate_index();
    let sequence = core::get_sequence(index);

    core::set_element_kind(index, props.kind);
    core::set_parent_index(index, get_current_parent_index());
    core::set_flags(index, props.flags);

    for class in &props.classes {
        content::add_class(index, class);
    }
    for (class, on) in props.class_when {
        bind(index, on, move |i, on| content::toggle_class(i, &class, on));
    }
    if let Some(text) = props.text {
        bind(index, text, content::set_text);
    }
    for (name, value) in props.attrs {
        bind(index, value, move |i, v| content::set_attr(i, &name, v));
    }
    if let Some(order) = props.order {
        bind(index, order, core::set_order);
    }
    if let Some(checked) = props.checked {
        bind(index, checked, |i, on| core::set_flag(i, ElementFlags::CHECKED, on));
    }

    if props.on_click.is_some() || props.on_input.is_some() {
        let cleanup = events::on_element(
            index,
            ElementHandlers {
                on_click: props.on_click,
                on_input: props.on_input,
            },
        );
        on_destroy(index, cleanup);
    }

    if let Some(children) = props.children {
        let cleanup = with_parent(Some(index), children);
        on_destroy(index, cleanup);
    }

    // A released index can be handed out again; only release our own element.
    let cleanup: Cleanup = Box::new(move || {
        if is_allocated(index) && core::get_sequence(index) == sequence {
            release_index(index);
        }
    });
    ElementHandle::new(index, cleanup)
}
