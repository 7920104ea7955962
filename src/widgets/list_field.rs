//! List Field - Editable list of rows with add, delete and drag reorder.
//!
//! The widget owns a [`ListIdentityTracker`]. Every structural edit is
//! applied to the tracker and to the value in the same step, and the value
//! is written back through the lens. Values replaced from outside are
//! reconciled before rows are keyed, so the key sequence always matches
//! the value sequence when [`each`] sees it.
//!
//! Rows are keyed by [`ItemKey`]: a reordered row keeps its element and only
//! its position-dependent props (`data-drag-index`, order, namespace) update.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::adapter::{ChangeCallback, InputProps};
use crate::context::FormContext;
use crate::error::FormError;
use crate::identity::{sequence_len, splice_move, ListIdentityTracker};
use crate::primitives::{each, element, show, Cleanup, ElementHandle, ElementProps, PropValue};
use crate::schema::{ErrorLens, Field, ValueLens};
use crate::state::drag::{self, DropCallback, DRAG_INDEX_ATTR};
use crate::types::{ElementKind, ItemKey};
use super::common::placeholder;
use super::input::render_field;
use super::row::join;

pub const LIST_FIELD_CLASS: &str = "Formlib-ListField";
pub const DRAG_CONTAINER_CLASS: &str = "Formlib-DragContainer";
pub const LIST_ROW_CLASS: &str = "Formlib-ListFieldRow";
pub const DRAG_ITEM_CLASS: &str = "Formlib-DragItem";
pub const LIST_ROW_ANIMATION: &str = "Formlib-ListFieldRow--Animation";
pub const DELETE_BUTTON_CLASS: &str = "Formlib-ListFieldRowDeleteBtn";
pub const ACTION_BAR_CLASS: &str = "Formlib-ListFieldActionBar";
pub const ADD_BUTTON_CLASS: &str = "Formlib-ListFieldAddBtn";

/// Attribute exposing a row's identity key.
pub const KEY_ATTR: &str = "data-key";

/// One rendered row: identity plus current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    pub key: ItemKey,
    pub index: usize,
}

// =============================================================================
// List State
// =============================================================================

/// Structural edits of one list, applied to keys and values together.
struct ListState {
    props: InputProps,
    tracker: RefCell<ListIdentityTracker>,
}

impl ListState {
    fn new(props: InputProps) -> Self {
        let tracker = ListIdentityTracker::from_value(&props.value.get());
        Self {
            props,
            tracker: RefCell::new(tracker),
        }
    }

    /// Current rows. Reconciles first, so this also absorbs replacements
    /// made outside the widget.
    fn items(&self) -> Vec<ListItem> {
        let value = self.props.value.get();
        let mut tracker = self.tracker.borrow_mut();
        tracker.reconcile_value(&value);
        tracker
            .keys()
            .iter()
            .enumerate()
            .map(|(index, &key)| ListItem { key, index })
            .collect()
    }

    fn values(&self) -> Vec<Value> {
        match self.props.value.get() {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }

    fn add(&self) {
        let mut values = self.values();
        values.push(Value::Null);
        // Key first: the write below re-renders the rows synchronously.
        self.tracker.borrow_mut().append();
        self.props.commit(Value::Array(values));
    }

    fn delete(&self, index: usize) -> Result<(), FormError> {
        let mut values = self.values();
        if index >= values.len() {
            return Err(FormError::IndexOutOfRange {
                operation: "delete",
                index,
                len: values.len(),
            });
        }
        self.tracker.borrow_mut().delete(index)?;
        values.remove(index);
        self.props.commit(Value::Array(values));
        Ok(())
    }

    fn move_item(&self, source: usize, target: usize) -> Result<(), FormError> {
        let mut values = self.values();
        splice_move(&mut values, source, target)?;
        self.tracker.borrow_mut().move_item(source, target)?;
        self.props.commit(Value::Array(values));
        Ok(())
    }

    fn is_empty(&self) -> bool {
        sequence_len(&self.props.value.get()).unwrap_or(0) == 0
    }
}

// =============================================================================
// List Field Row
// =============================================================================

/// Draggable wrapper around one list item.
///
/// Always animated. `drag_index` keeps `data-drag-index` current.
pub fn list_field_row(
    ctx: &FormContext,
    drag_index: PropValue<usize>,
    key: Option<ItemKey>,
    on_drop: Option<DropCallback>,
    children: impl FnOnce() -> Cleanup + 'static,
) -> ElementHandle {
    let position = drag_index.clone();
    let order = drag_index.clone();
    let mut props = ElementProps::new(ElementKind::Container, &[LIST_ROW_CLASS, DRAG_ITEM_CLASS])
        .attr(DRAG_INDEX_ATTR, PropValue::getter(move || position.get().to_string()))
        .order(PropValue::getter(move || order.get() as i32 + 1))
        .children(children);
    if let Some(key) = key {
        props = props.attr(KEY_ATTR, key.to_string());
    }

    let handle = element(props);
    if let Some(on_drop) = on_drop {
        let unbind = drag::bind(handle.index, on_drop);
        crate::engine::on_destroy(handle.index, unbind);
    }
    ctx.animate(handle.index, LIST_ROW_ANIMATION, true);
    handle
}

// =============================================================================
// List Field Widget
// =============================================================================

/// List input: placeholder when empty, one row per item, add button.
pub fn list_field(props: InputProps) -> Cleanup {
    let ctx = props.ctx.clone();
    let field = props.field.clone();
    let item_field = Rc::new(field.item_field());
    let list_value = props.value.clone();
    let list_errors = props.errors.clone();
    let id_lens = props.value.clone();
    let state = Rc::new(ListState::new(props));

    let container = ElementProps::new(ElementKind::Container, &[LIST_FIELD_CLASS, DRAG_CONTAINER_CLASS])
        .attr("id", PropValue::getter(move || id_lens.namespace().join(".")));

    element(container.children(move || {
        let mut parts: Vec<Cleanup> = Vec::new();

        if let Some(text) = field.placeholder.clone() {
            let empty_state = state.clone();
            let placeholder_ctx = ctx.clone();
            parts.push(show(
                move || empty_state.is_empty(),
                move || {
                    let ctx = placeholder_ctx.clone();
                    let text = text.clone();
                    list_field_row(&placeholder_ctx, PropValue::Static(0), None, None, move || {
                        placeholder(&ctx, &text).into()
                    })
                },
                None::<fn() -> Cleanup>,
            ));
        }

        let items_state = state.clone();
        let row_state = state.clone();
        let row_ctx = ctx.clone();
        parts.push(each(
            move || items_state.items(),
            move |item: Rc<dyn Fn() -> ListItem>, key: ItemKey| {
                render_item(&row_ctx, &row_state, &item_field, &list_value, &list_errors, item, key)
            },
            |item: &ListItem| item.key,
        ));

        let add_state = state.clone();
        let bar_ctx = ctx.clone();
        parts.push(
            element(
                ElementProps::new(ElementKind::Container, &[ACTION_BAR_CLASS])
                    .order(i32::MAX)
                    .children(move || {
                        element(
                            ElementProps::new(ElementKind::Button, &[ADD_BUTTON_CLASS])
                                .text(bar_ctx.render(&bar_ctx.options.add_row_label, None))
                                .on_click(Rc::new(move || add_state.add())),
                        )
                        .into()
                    }),
            )
            .into(),
        );

        join(parts)
    }))
    .into()
}

fn render_item(
    ctx: &FormContext,
    state: &Rc<ListState>,
    item_field: &Rc<Field>,
    list_value: &ValueLens,
    list_errors: &ErrorLens,
    item: Rc<dyn Fn() -> ListItem>,
    key: ItemKey,
) -> ElementHandle {
    let index_reader = item.clone();
    let index: Rc<dyn Fn() -> usize> = Rc::new(move || index_reader().index);

    let drop_state = state.clone();
    let on_drop: DropCallback = Rc::new(move |source, target| {
        if let Err(err) = drop_state.move_item(source, target) {
            log::warn!("list field: drop ignored: {}", err);
        }
    });

    let notify_state = state.clone();
    let on_change: ChangeCallback = Rc::new(move |_: &Value| notify_state.props.notify());

    let row_ctx = ctx.clone();
    let field = item_field.clone();
    let value = list_value.item(index.clone());
    let errors = list_errors.item(index.clone());
    let delete_state = state.clone();
    let delete_index = index.clone();
    let drag_index = index.clone();

    list_field_row(ctx, PropValue::getter(move || drag_index()), Some(key), Some(on_drop), move || {
        let field_part = render_field(&row_ctx, field, value, errors, Some(on_change));
        let delete = element(
            ElementProps::new(ElementKind::Button, &[DELETE_BUTTON_CLASS])
                .text(row_ctx.render(&row_ctx.options.delete_row_label, None))
                .order(i32::MAX)
                .on_click(Rc::new(move || {
                    if let Err(err) = delete_state.delete(delete_index()) {
                        log::warn!("list field: delete ignored: {}", err);
                    }
                })),
        );
        join(vec![field_part, delete.into()])
    })
}
