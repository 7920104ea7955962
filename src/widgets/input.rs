//! Input widgets: text, checkbox, nested object.

use std::rc::Rc;

use serde_json::{Number, Value};

use crate::adapter::{ChangeCallback, InputProps, RowProps};
use crate::context::FormContext;
use crate::primitives::{element, noop_cleanup, Cleanup, ElementProps, PropValue};
use crate::schema::{ErrorLens, Field, FieldKind, ValueLens};
use crate::types::ElementKind;
use super::row::join;

pub const TEXT_INPUT_CLASS: &str = "Formlib-TextInput";
pub const PLACEHOLDER_CLASS: &str = "Formlib-TextInput--placeholder";
pub const CHECKBOX_CLASS: &str = "Formlib-Checkbox";
pub const OBJECT_FIELD_CLASS: &str = "Formlib-ObjectField";

/// Text shown for a value.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Value written for typed text. Numeric kinds store a number when the
/// text parses; empty text clears the value.
pub fn text_to_value(kind: FieldKind, text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    let number = match kind {
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(Number::from),
        FieldKind::Decimal => trimmed.parse::<f64>().ok().and_then(Number::from_f64),
        _ => None,
    };
    match number {
        Some(n) => Value::Number(n),
        None => Value::String(text.to_string()),
    }
}

/// Single-line text input.
pub fn text_input(props: InputProps) -> Cleanup {
    let placeholder = props
        .field
        .placeholder
        .as_ref()
        .map(|text| props.ctx.render(text, None))
        .unwrap_or_default();

    let shown = props.value.clone();
    let empty = props.value.clone();
    let id = props.value.clone();
    let kind = props.field.kind;
    let commit = props.clone();

    element(
        ElementProps::new(ElementKind::Input, &[TEXT_INPUT_CLASS])
            .attr("id", PropValue::getter(move || id.namespace().join(".")))
            .text(PropValue::getter(move || {
                let text = value_to_text(&shown.get());
                if text.is_empty() { placeholder.clone() } else { text }
            }))
            .class_when(PLACEHOLDER_CLASS, PropValue::getter(move || value_to_text(&empty.get()).is_empty()))
            .on_input(Rc::new(move |text: &str| commit.commit(text_to_value(kind, text)))),
    )
    .into()
}

/// Boolean toggle. A click flips the value.
pub fn checkbox_input(props: InputProps) -> Cleanup {
    let checked = props.value.clone();
    let id = props.value.clone();
    let toggle = props.clone();

    element(
        ElementProps::new(ElementKind::Checkbox, &[CHECKBOX_CLASS])
            .attr("id", PropValue::getter(move || id.namespace().join(".")))
            .checked(PropValue::getter(move || checked.get().as_bool().unwrap_or(false)))
            .on_click(Rc::new(move || {
                let current = toggle.value.get().as_bool().unwrap_or(false);
                toggle.commit(Value::Bool(!current));
            })),
    )
    .into()
}

/// Nested object: one row per child field, in declaration order.
pub fn object_field(props: InputProps) -> Cleanup {
    let InputProps {
        field,
        value,
        errors,
        ctx,
        on_change,
    } = props;

    element(
        ElementProps::new(ElementKind::Container, &[OBJECT_FIELD_CLASS]).children(move || {
            let notify: Option<ChangeCallback> = on_change.map(|on_change| {
                let parent = value.clone();
                Rc::new(move |_: &Value| on_change(&parent.get())) as ChangeCallback
            });

            let parts = field
                .fields
                .iter()
                .map(|child| {
                    render_field(
                        &ctx,
                        Rc::new(child.field.clone()),
                        value.key(&child.name),
                        errors.key(&child.name),
                        notify.clone(),
                    )
                })
                .collect();
            join(parts)
        }),
    )
    .into()
}

/// Row widget wrapping input widget, both looked up for the field's kind.
///
/// A missing adapter is logged and renders nothing.
pub fn render_field(
    ctx: &FormContext,
    field: Rc<Field>,
    value: ValueLens,
    errors: ErrorLens,
    on_change: Option<ChangeCallback>,
) -> Cleanup {
    let kind = field.kind;
    let (row, input) = match (ctx.registry.lookup_row(kind), ctx.registry.lookup_input(kind)) {
        (Ok(row), Ok(input)) => (row, input),
        (Err(err), _) | (_, Err(err)) => {
            log::warn!("{} ({})", err, value.namespace().join("."));
            return noop_cleanup();
        }
    };

    let input_props = InputProps {
        field: field.clone(),
        value: value.clone(),
        errors: errors.clone(),
        ctx: ctx.clone(),
        on_change,
    };
    row.render(RowProps {
        field,
        value,
        errors,
        ctx: ctx.clone(),
        children: Some(Box::new(move || input.render(input_props))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterRegistry;
    use crate::engine::arrays::{content, core};
    use crate::engine::{reset_registry, tree};
    use crate::state::events;
    use crate::types::ElementFlags;
    use serde_json::json;
    use spark_signals::{signal, Signal};
    use std::cell::RefCell;

    fn setup() {
        reset_registry();
        events::reset_events();
    }

    fn input_props(root: &Signal<Value>, field: Field, name: &str) -> InputProps {
        InputProps {
            field: Rc::new(field),
            value: ValueLens::new(root.clone()).key(name),
            errors: ErrorLens::new(signal(None)),
            ctx: FormContext::new(AdapterRegistry::with_defaults()),
            on_change: None,
        }
    }

    #[test]
    fn test_text_to_value_by_kind() {
        assert_eq!(text_to_value(FieldKind::Integer, "42"), json!(42));
        assert_eq!(text_to_value(FieldKind::Integer, "4.2"), json!("4.2"));
        assert_eq!(text_to_value(FieldKind::Decimal, "4.5"), json!(4.5));
        assert_eq!(text_to_value(FieldKind::Text, "42"), json!("42"));
        assert_eq!(text_to_value(FieldKind::Text, "  "), Value::Null);
    }

    #[test]
    fn test_text_input_shows_and_writes() {
        setup();

        let root = signal(json!({ "age": 7 }));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let mut props = input_props(&root, Field::new(FieldKind::Integer), "age");
        props.on_change = Some(Rc::new(move |v: &Value| seen_clone.borrow_mut().push(v.clone())));

        let cleanup = text_input(props);
        let input = tree::roots()[0];
        assert_eq!(content::get_text(input), "7");
        assert_eq!(content::get_attr(input, "id").as_deref(), Some("age"));

        assert!(events::input(input, "12"));
        assert_eq!(root.get(), json!({ "age": 12 }));
        assert_eq!(content::get_text(input), "12");
        assert_eq!(*seen.borrow(), vec![json!(12)]);
        cleanup();
    }

    #[test]
    fn test_text_input_placeholder() {
        setup();

        let root = signal(json!({}));
        let field = Field::new(FieldKind::Text).with_placeholder("Untitled");
        let cleanup = text_input(input_props(&root, field, "title"));
        let input = tree::roots()[0];

        assert_eq!(content::get_text(input), "Untitled");
        assert!(content::has_class(input, PLACEHOLDER_CLASS));

        events::input(input, "Draft");
        assert_eq!(content::get_text(input), "Draft");
        assert!(!content::has_class(input, PLACEHOLDER_CLASS));
        cleanup();
    }

    #[test]
    fn test_checkbox_toggles() {
        setup();

        let root = signal(json!({ "published": false }));
        let cleanup = checkbox_input(input_props(&root, Field::new(FieldKind::Bool), "published"));
        let checkbox = tree::roots()[0];
        assert!(!core::get_flags(checkbox).contains(ElementFlags::CHECKED));

        events::click(checkbox);
        assert_eq!(root.get(), json!({ "published": true }));
        assert!(core::get_flags(checkbox).contains(ElementFlags::CHECKED));
        cleanup();
    }

    #[test]
    fn test_object_field_renders_children_in_order() {
        setup();

        let root = signal(json!({ "address": { "street": "Main St", "city": "Lund" } }));
        let field = Field::new(FieldKind::Object)
            .with_field("street", Field::new(FieldKind::Text).with_label("Street"))
            .with_field("city", Field::new(FieldKind::Text).with_label("City"));
        let cleanup = object_field(input_props(&root, field, "address"));

        let object = tree::roots()[0];
        let inputs: Vec<String> = tree::find_by_class(object, TEXT_INPUT_CLASS)
            .into_iter()
            .map(content::get_text)
            .collect();
        assert_eq!(inputs, vec!["Main St", "Lund"]);
        assert!(tree::find_by_attr_id(object, "address.city__Row").is_some());
        cleanup();
    }

    #[test]
    fn test_missing_adapter_renders_nothing() {
        setup();

        let ctx = FormContext::new(AdapterRegistry::new());
        let cleanup = render_field(
            &ctx,
            Rc::new(Field::new(FieldKind::Text)),
            ValueLens::new(signal(json!({}))).key("title"),
            ErrorLens::new(signal(None)),
            None,
        );
        assert!(tree::roots().is_empty());
        cleanup();
    }
}
