//! Form rows: the frame around an input.
//!
//! A row shows the field's label, the input itself (inside the field
//! container), the field's own validation error, an invariant error
//! addressed to the field, and help text. Kinds differ only in classes and
//! slot order.

use crate::adapter::RowProps;
use crate::primitives::{element, noop_cleanup, Cleanup, ElementProps, PropValue};
use crate::types::ElementKind;
use super::common::{error_msg, help_msg, label};

pub const ROW_CLASS: &str = "Formlib-Row";
pub const ROW_ERROR_CLASS: &str = "Formlib-Row--hasError";
pub const ROW_ANIMATION: &str = "Formlib-Row--Animation";
pub const FIELD_CONTAINER_CLASS: &str = "Formlib-RowFieldContainer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Plain,
    Object,
    List,
    Checkbox,
}

impl RowKind {
    fn class(self) -> Option<&'static str> {
        match self {
            RowKind::Plain => None,
            RowKind::Object => Some("Formlib-ObjectRow"),
            RowKind::List => Some("Formlib-ListRow"),
            RowKind::Checkbox => Some("Formlib-CheckboxRow"),
        }
    }

    fn has_row_id(self) -> bool {
        matches!(self, RowKind::Plain | RowKind::Checkbox)
    }
}

/// Display slot of each row part.
#[derive(Clone, Copy)]
struct Slots {
    label: i32,
    container: i32,
    error: i32,
    invariant: i32,
    help: i32,
}

impl RowKind {
    fn slots(self) -> Slots {
        match self {
            RowKind::Plain => Slots { label: 1, container: 2, error: 3, invariant: 4, help: 5 },
            RowKind::Object | RowKind::List => Slots { label: 1, error: 2, invariant: 3, help: 4, container: 5 },
            // Label lives inside the container.
            RowKind::Checkbox => Slots { label: 0, container: 1, error: 2, invariant: 3, help: 4 },
        }
    }
}

/// Generic field row.
pub fn row(props: RowProps) -> Cleanup {
    render_row(props, RowKind::Plain)
}

/// Row around a nested object.
pub fn object_row(props: RowProps) -> Cleanup {
    render_row(props, RowKind::Object)
}

/// Row around a list field.
pub fn list_row(props: RowProps) -> Cleanup {
    render_row(props, RowKind::List)
}

/// Row around a checkbox; the label sits next to the box.
pub fn checkbox_row(props: RowProps) -> Cleanup {
    render_row(props, RowKind::Checkbox)
}

fn render_row(props: RowProps, kind: RowKind) -> Cleanup {
    let RowProps {
        field,
        value,
        errors,
        ctx,
        children,
    } = props;
    let slots = kind.slots();

    let namespace_lens = value.clone();
    let field_id: PropValue<String> = PropValue::getter(move || namespace_lens.namespace().join("."));

    let mut classes = vec![ROW_CLASS];
    classes.extend(kind.class());

    let has_error = errors.clone();
    let mut container = ElementProps::new(ElementKind::Container, &classes)
        .class_when(ROW_ERROR_CLASS, PropValue::getter(move || has_error.get().is_some()));
    if kind.has_row_id() {
        let id_lens = value.clone();
        container = container.attr("id", PropValue::getter(move || format!("{}__Row", id_lens.namespace().join("."))));
    }

    let row_ctx = ctx.clone();
    let container = container.children(move || {
        let ctx = row_ctx;
        let mut parts: Vec<Cleanup> = Vec::new();

        if kind != RowKind::Checkbox {
            if let Some(text) = field.label.as_ref() {
                parts.push(label(&ctx, text, field_id.clone(), slots.label).into());
            }
        }

        let label_ctx = ctx.clone();
        let label_field = field.clone();
        let label_id = field_id.clone();
        let inner = element(
            ElementProps::new(ElementKind::Container, &[FIELD_CONTAINER_CLASS])
                .order(slots.container)
                .children(move || {
                    let mut inner: Vec<Cleanup> = Vec::new();
                    if kind == RowKind::Checkbox {
                        if let Some(text) = label_field.label.as_ref() {
                            inner.push(label(&label_ctx, text, label_id, slots.label).into());
                        }
                    }
                    if let Some(children) = children {
                        inner.push(children());
                    }
                    join(inner)
                }),
        );
        parts.push(inner.into());

        let own_error = errors.clone();
        parts.push(error_msg(&ctx, move || own_error.message(), slots.error));
        let invariant = errors;
        parts.push(error_msg(&ctx, move || invariant.invariant(), slots.invariant));

        if let Some(help) = help_msg(&ctx, field.help.as_ref(), field.required, field_id, slots.help) {
            parts.push(help.into());
        }

        join(parts)
    });

    let handle = element(container);
    ctx.animate(handle.index, ROW_ANIMATION, false);
    handle.into()
}

/// Run several cleanups as one, last first.
pub(crate) fn join(mut parts: Vec<Cleanup>) -> Cleanup {
    if parts.is_empty() {
        return noop_cleanup();
    }
    Box::new(move || {
        while let Some(part) = parts.pop() {
            part();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterRegistry;
    use crate::widgets::common::{HELP_CLASS, LABEL_CLASS};
    use crate::context::FormContext;
    use crate::engine::arrays::content;
    use crate::engine::{reset_registry, tree};
    use crate::i18n::I18nText;
    use crate::schema::{ErrorLens, Field, FieldKind, ValidationError, ValueLens};
    use crate::state::animate::RecordingAnimator;
    use serde_json::json;
    use spark_signals::{signal, Signal};
    use std::rc::Rc;

    struct Fixture {
        ctx: FormContext,
        value: ValueLens,
        errors: Signal<Option<ValidationError>>,
        recorder: Rc<RecordingAnimator>,
    }

    fn fixture() -> Fixture {
        reset_registry();
        let recorder = Rc::new(RecordingAnimator::new());
        Fixture {
            ctx: FormContext::new(AdapterRegistry::new()).with_animator(recorder.clone()),
            value: ValueLens::new(signal(json!({ "title": "" }))).key("title"),
            errors: signal(None),
            recorder,
        }
    }

    fn props(fx: &Fixture, field: Field) -> RowProps {
        RowProps {
            field: Rc::new(field),
            value: fx.value.clone(),
            errors: ErrorLens::new(fx.errors.clone()).key("title"),
            ctx: fx.ctx.clone(),
            children: None,
        }
    }

    fn classes_in_order(root: usize) -> Vec<String> {
        tree::children(root)
            .into_iter()
            .map(|i| content::get_classes(i).join(" "))
            .collect()
    }

    #[test]
    fn test_row_renders_slots_in_order() {
        let fx = fixture();
        let field = Field::new(FieldKind::Text).with_label("Title").with_help("Shown on the card").required();
        let cleanup = row(props(&fx, field));

        let root = tree::roots()[0];
        assert_eq!(content::get_attr(root, "id").as_deref(), Some("title__Row"));
        assert_eq!(
            classes_in_order(root),
            vec![LABEL_CLASS, FIELD_CONTAINER_CLASS, HELP_CLASS]
        );

        let help = tree::find_first_by_class(root, HELP_CLASS).unwrap();
        assert_eq!(content::get_text(help), "Shown on the card (required)");
        cleanup();
    }

    #[test]
    fn test_row_without_label_or_help() {
        let fx = fixture();
        let cleanup = row(props(&fx, Field::new(FieldKind::Text)));
        let root = tree::roots()[0];
        assert_eq!(classes_in_order(root), vec![FIELD_CONTAINER_CLASS]);
        cleanup();
    }

    #[test]
    fn test_error_slots_between_container_and_help() {
        let fx = fixture();
        let field = Field::new(FieldKind::Text).with_label("Title").with_help("Help");
        let cleanup = row(props(&fx, field));
        let root = tree::roots()[0];
        assert!(!content::has_class(root, ROW_ERROR_CLASS));

        fx.errors.set(Some(
            ValidationError::new("Form has errors")
                .with_field_error("title", ValidationError::new("Too short"))
                .with_invariant(&["title"], "Title must differ from subtitle"),
        ));

        let order: Vec<String> = tree::children(root).into_iter().map(content::get_text).collect();
        assert_eq!(
            order,
            vec!["Title", "", "Too short", "Title must differ from subtitle", "Help"]
        );
        assert!(content::has_class(root, ROW_ERROR_CLASS));
        cleanup();
    }

    #[test]
    fn test_own_error_text_updates_while_shown() {
        let fx = fixture();
        let cleanup = row(props(&fx, Field::new(FieldKind::Text).with_label("Title")));
        let root = tree::roots()[0];
        let own_error = |message: &str| {
            Some(ValidationError::new("Form has errors").with_field_error("title", ValidationError::new(message)))
        };

        fx.errors.set(own_error("Too short"));
        let block = tree::find_first_by_class(root, crate::widgets::common::ERROR_CLASS).unwrap();
        fx.errors.set(own_error("Too long"));

        let blocks = tree::find_by_class(root, crate::widgets::common::ERROR_CLASS);
        assert_eq!(blocks, vec![block]);
        assert_eq!(content::get_text(block), "Too long");

        fx.errors.set(None);
        assert!(tree::find_by_class(root, crate::widgets::common::ERROR_CLASS).is_empty());
        cleanup();
    }

    #[test]
    fn test_object_row_puts_container_last() {
        let fx = fixture();
        let field = Field::new(FieldKind::Object).with_label("Address").with_help("Where we ship");
        let cleanup = object_row(props(&fx, field));
        let root = tree::roots()[0];

        assert!(content::has_class(root, "Formlib-ObjectRow"));
        assert_eq!(content::get_attr(root, "id"), None);
        let last = *tree::children(root).last().unwrap();
        assert!(content::has_class(last, FIELD_CONTAINER_CLASS));
        cleanup();
    }

    #[test]
    fn test_checkbox_row_label_inside_container() {
        let fx = fixture();
        let field = Field::new(FieldKind::Bool).with_label(I18nText::from("Published"));
        let cleanup = checkbox_row(props(&fx, field));
        let root = tree::roots()[0];

        let children = tree::children(root);
        assert_eq!(children.len(), 1);
        let label = tree::children(children[0])[0];
        assert_eq!(content::get_text(label), "Published");
        assert_eq!(content::get_attr(root, "id").as_deref(), Some("title__Row"));
        cleanup();
    }

    #[test]
    fn test_row_animates_mount_only_when_form_mounted() {
        let fx = fixture();
        let first = row(props(&fx, Field::new(FieldKind::Text)));
        assert_eq!(fx.recorder.mounts(ROW_ANIMATION), 0);

        fx.ctx.mark_mounted(true);
        let second = row(props(&fx, Field::new(FieldKind::Text)));
        assert_eq!(fx.recorder.mounts(ROW_ANIMATION), 1);

        first();
        second();
        assert_eq!(fx.recorder.unmounts(ROW_ANIMATION), 2);
    }

    #[test]
    fn test_children_render_in_field_container() {
        let fx = fixture();
        let mut props = props(&fx, Field::new(FieldKind::Text));
        props.children = Some(Box::new(|| {
            element(ElementProps::new(ElementKind::Input, &["custom-input"])).into()
        }));
        let cleanup = row(props);

        let root = tree::roots()[0];
        let custom = tree::find_first_by_class(root, "custom-input").unwrap();
        let container = tree::find_first_by_class(root, FIELD_CONTAINER_CLASS).unwrap();
        assert_eq!(crate::engine::arrays::core::get_parent_index(custom), Some(container));
        cleanup();
    }
}
