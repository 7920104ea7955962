//! Shared row parts: label, help text, error message, placeholder.

use std::rc::Rc;

use crate::context::FormContext;
use crate::i18n::{i18n, I18nText, REQUIRED_DEFAULT, REQUIRED_LABEL};
use crate::primitives::{element, show, Cleanup, ElementHandle, ElementProps, PropValue};
use crate::schema::ErrorMessage;
use crate::types::ElementKind;

pub const LABEL_CLASS: &str = "Formlib-RowFieldLabel";
pub const HELP_CLASS: &str = "Formlib-RowFieldHelpMsg";
pub const ERROR_CLASS: &str = "Formlib-RowFieldErrorMsg";
pub const ERROR_ANIMATION: &str = "Formlib-ErrorMsg--Animation";

/// Field label.
pub fn label(ctx: &FormContext, text: &I18nText, for_id: PropValue<String>, order: i32) -> ElementHandle {
    element(
        ElementProps::new(ElementKind::Label, &[LABEL_CLASS])
            .text(ctx.render(text, None))
            .attr("for", for_id)
            .order(order),
    )
}

/// Help text followed by the required marker, joined by a space.
///
/// Returns `None` when there is nothing to show.
pub fn help_text(ctx: &FormContext, text: Option<&I18nText>, required: bool) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        parts.push(ctx.render(text, None));
    }
    if required {
        parts.push(ctx.render(&i18n(REQUIRED_LABEL, REQUIRED_DEFAULT), Some(REQUIRED_DEFAULT)));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

pub fn help_msg(
    ctx: &FormContext,
    text: Option<&I18nText>,
    required: bool,
    for_id: PropValue<String>,
    order: i32,
) -> Option<ElementHandle> {
    let text = help_text(ctx, text, required)?;
    Some(element(
        ElementProps::new(ElementKind::Help, &[HELP_CLASS])
            .text(text)
            .attr("for", for_id)
            .order(order),
    ))
}

/// Error block, mounted while `message` returns a message.
///
/// Always animated. Carries `Formlib-RowFieldErrorMsg--submitted` once the
/// form has been submitted.
pub fn error_msg(
    ctx: &FormContext,
    message: impl Fn() -> Option<ErrorMessage> + 'static,
    order: i32,
) -> Cleanup {
    let message = Rc::new(message);
    let present = message.clone();
    let ctx = ctx.clone();

    show(
        move || present().is_some(),
        move || {
            let message = message.clone();
            let text_ctx = ctx.clone();
            let submitted = ctx.submitted.clone();
            let handle = element(
                ElementProps::new(ElementKind::Error, &[ERROR_CLASS])
                    .text(PropValue::getter(move || {
                        message()
                            .map(|m| text_ctx.render_error(&m))
                            .unwrap_or_default()
                    }))
                    .class_when(&format!("{}--submitted", ERROR_CLASS), submitted)
                    .order(order),
            );
            ctx.animate(handle.index, ERROR_ANIMATION, true);
            handle
        },
        None::<fn() -> Cleanup>,
    )
}

/// Placeholder shown by an empty list.
pub fn placeholder(ctx: &FormContext, text: &I18nText) -> ElementHandle {
    let text = ctx.render(text, None);
    element(
        ElementProps::new(ElementKind::Container, &["Formlib-ListFieldPlaceholderContainer"]).children(
            move || {
                element(ElementProps::new(ElementKind::Container, &["Formlib-ListFieldPlaceholder"]).children(
                    move || {
                        element(
                            ElementProps::new(ElementKind::Text, &["Formlib-ListFieldPlaceholderText"])
                                .text(text),
                        )
                        .into()
                    },
                ))
                .into()
            },
        ),
    )
}
