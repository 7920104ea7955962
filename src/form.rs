//! Form - Mounts a whole object schema.
//!
//! ```ignore
//! let schema = Field::from_json(SCHEMA)?;
//! let value = signal(json!({ "title": "Draft", "tags": ["a"] }));
//! let errors = signal(None);
//! let ctx = FormContext::new(AdapterRegistry::with_defaults());
//!
//! let cleanup = form(FormProps::new(schema, value.clone(), errors.clone(), ctx));
//! // ...
//! cleanup();
//! ```
//!
//! Call the cleanup before the mounting thread exits. A form still mounted
//! at thread exit is leaked rather than torn down.

use std::rc::Rc;

use serde_json::Value;
use spark_signals::Signal;

use crate::adapter::{ChangeCallback, InputProps};
use crate::context::FormContext;
use crate::primitives::{element, noop_cleanup, Cleanup, ElementProps};
use crate::schema::{ErrorLens, Field, ValidationError, ValueLens};
use crate::types::ElementKind;

pub const FORM_CLASS: &str = "Formlib-Form";

pub struct FormProps {
    pub schema: Rc<Field>,
    pub value: Signal<Value>,
    pub errors: Signal<Option<ValidationError>>,
    pub ctx: FormContext,
    pub on_change: Option<ChangeCallback>,
}

impl FormProps {
    pub fn new(
        schema: Field,
        value: Signal<Value>,
        errors: Signal<Option<ValidationError>>,
        ctx: FormContext,
    ) -> Self {
        Self {
            schema: Rc::new(schema),
            value,
            errors,
            ctx,
            on_change: None,
        }
    }

    pub fn on_change(mut self, on_change: ChangeCallback) -> Self {
        self.on_change = Some(on_change);
        self
    }
}

/// Render the root schema. Rows added after this returns animate in.
pub fn form(props: FormProps) -> Cleanup {
    let FormProps {
        schema,
        value,
        errors,
        ctx,
        on_change,
    } = props;

    let input_ctx = ctx.clone();
    let handle = element(ElementProps::new(ElementKind::Container, &[FORM_CLASS]).children(move || {
        let input = match input_ctx.registry.lookup_input(schema.kind) {
            Ok(input) => input,
            Err(err) => {
                log::warn!("form: {}", err);
                return noop_cleanup();
            }
        };
        input.render(InputProps {
            field: schema,
            value: ValueLens::new(value),
            errors: ErrorLens::new(errors),
            ctx: input_ctx,
            on_change,
        })
    }));

    ctx.mark_mounted(true);
    log::debug!("form: mounted at element {}", handle.index);

    let cleanup: Cleanup = handle.into();
    Box::new(move || {
        ctx.mark_mounted(false);
        cleanup();
    })
}
