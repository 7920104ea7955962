//! Drag and Drop - Row reordering within a drag container.
//!
//! Draggable rows carry their current position in the `data-drag-index`
//! attribute. A drag session remembers the source element; on drop the
//! source and target positions are read back from the attributes and handed
//! to the drop callback bound on the target row.
//!
//! # Events
//!
//! - `Start` - begin a session on the source row
//! - `Enter` / `Over` / `Leave` - hover feedback on candidate targets
//! - `Drop` - call the target's drop callback with (source, target)
//! - `End` - finish the session, clear all feedback
//!
//! Rows only accept drops from rows of the same container.

use std::cell::RefCell;
use std::collections::HashMap;
use std::mem::ManuallyDrop;
use std::rc::Rc;

use crate::engine::arrays::{content, core};
use crate::types::ElementFlags;

/// Attribute holding a row's current position.
pub const DRAG_INDEX_ATTR: &str = "data-drag-index";

/// Class while a row is being dragged.
pub const DRAGGING_CLASS: &str = "Formlib-DragItem--dragging";

/// Class while a dragged row hovers over a row.
pub const OVER_CLASS: &str = "Formlib-DragItem--over";

/// Drop callback: (source position, target position).
pub type DropCallback = Rc<dyn Fn(usize, usize)>;

bitflags::bitflags! {
    /// Visual drag state of one row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DragFlags: u8 {
        const NONE = 0;
        const DRAGGING = 1 << 0;
        const OVER = 1 << 1;
    }
}

/// Drag event kinds delivered to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Start,
    Enter,
    Over,
    Leave,
    End,
    Drop,
}

#[derive(Default)]
struct DragRegistry {
    drop_handlers: HashMap<usize, DropCallback>,
    flags: HashMap<usize, DragFlags>,
    source: Option<usize>,
}

thread_local! {
    // Leaked at thread exit: drop callbacks capture signals.
    static REGISTRY: ManuallyDrop<RefCell<DragRegistry>> =
        ManuallyDrop::new(RefCell::new(DragRegistry::default()));
}

// =============================================================================
// Registration
// =============================================================================

/// Make `index` a draggable row. Returns cleanup function.
pub fn bind(index: usize, on_drop: DropCallback) -> impl FnOnce() {
    core::set_flag(index, ElementFlags::DRAGGABLE, true);
    REGISTRY.with(|reg| {
        reg.borrow_mut().drop_handlers.insert(index, on_drop);
    });

    move || cleanup_index(index)
}

/// Forget a row. Ends the session if it was the source.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.drop_handlers.remove(&index);
        reg.flags.remove(&index);
        if reg.source == Some(index) {
            reg.source = None;
        }
    });
}

// =============================================================================
// State
// =============================================================================

/// Element being dragged, if any.
pub fn drag_source() -> Option<usize> {
    REGISTRY.with(|reg| reg.borrow().source)
}

pub fn drag_flags(index: usize) -> DragFlags {
    REGISTRY.with(|reg| reg.borrow().flags.get(&index).copied().unwrap_or_default())
}

fn set_flags(index: usize, flag: DragFlags, on: bool) {
    let flags = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let flags = reg.flags.entry(index).or_default();
        flags.set(flag, on);
        *flags
    });
    content::toggle_class(index, DRAGGING_CLASS, flags.contains(DragFlags::DRAGGING));
    content::toggle_class(index, OVER_CLASS, flags.contains(DragFlags::OVER));
}

fn is_bound(index: usize) -> bool {
    REGISTRY.with(|reg| reg.borrow().drop_handlers.contains_key(&index))
}

fn drag_index(index: usize) -> Option<usize> {
    content::get_attr(index, DRAG_INDEX_ATTR)?.parse().ok()
}

/// A drop from the current source onto `target` would be accepted.
fn accepts(target: usize) -> bool {
    let Some(source) = drag_source() else {
        return false;
    };
    is_bound(target) && core::get_parent_index(source) == core::get_parent_index(target)
}

// =============================================================================
// Handlers
// =============================================================================

pub fn handle_drag_start(index: usize) -> bool {
    if !is_bound(index) {
        return false;
    }
    REGISTRY.with(|reg| reg.borrow_mut().source = Some(index));
    set_flags(index, DragFlags::DRAGGING, true);
    true
}

pub fn handle_drag_enter(index: usize) -> bool {
    if !accepts(index) || drag_source() == Some(index) {
        return false;
    }
    set_flags(index, DragFlags::OVER, true);
    true
}

/// Returns true when a drop here would be accepted.
pub fn handle_drag_over(index: usize) -> bool {
    accepts(index)
}

pub fn handle_drag_leave(index: usize) -> bool {
    if !is_bound(index) {
        return false;
    }
    set_flags(index, DragFlags::OVER, false);
    true
}

pub fn handle_drag_end(_index: usize) -> bool {
    let touched: Vec<usize> = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.source = None;
        reg.flags.drain().map(|(index, _)| index).collect()
    });
    for index in touched {
        content::remove_class(index, DRAGGING_CLASS);
        content::remove_class(index, OVER_CLASS);
    }
    true
}

/// Drop the current source onto `index`. Returns true if the drop callback ran.
pub fn handle_drop(index: usize) -> bool {
    let Some(source) = drag_source() else {
        return false;
    };
    if !accepts(index) {
        log::debug!("drag: drop of {} onto {} ignored (different container)", source, index);
        return false;
    }
    let (Some(source_pos), Some(target_pos)) = (drag_index(source), drag_index(index)) else {
        log::warn!("drag: rows {} / {} have no {}", source, index, DRAG_INDEX_ATTR);
        return false;
    };
    let on_drop = REGISTRY.with(|reg| reg.borrow().drop_handlers.get(&index).cloned());
    // Session ends before the callback, which may re-render the rows.
    handle_drag_end(index);
    match on_drop {
        Some(on_drop) => {
            on_drop(source_pos, target_pos);
            true
        }
        None => false,
    }
}

/// Deliver a drag event to a row.
pub fn dispatch(index: usize, event: DragEvent) -> bool {
    match event {
        DragEvent::Start => handle_drag_start(index),
        DragEvent::Enter => handle_drag_enter(index),
        DragEvent::Over => handle_drag_over(index),
        DragEvent::Leave => handle_drag_leave(index),
        DragEvent::End => handle_drag_end(index),
        DragEvent::Drop => handle_drop(index),
    }
}

/// Full gesture: start on `source`, enter and drop on `target`, end.
pub fn drag_and_drop(source: usize, target: usize) -> bool {
    if !handle_drag_start(source) {
        return false;
    }
    handle_drag_enter(target);
    let dropped = handle_drag_over(target) && handle_drop(target);
    handle_drag_end(source);
    dropped
}

/// Reset drag state (for testing)
pub fn reset_drag_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = DragRegistry::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};
    use std::cell::Cell;

    fn row(parent: usize, position: usize, seen: Rc<Cell<Option<(usize, usize)>>>) -> usize {
        let index = allocate_index();
        core::set_parent_index(index, Some(parent));
        content::set_attr(index, DRAG_INDEX_ATTR, position.to_string());
        let _ = bind(index, Rc::new(move |s, t| seen.set(Some((s, t)))));
        index
    }

    #[test]
    fn test_drop_reports_positions() {
        reset_registry();
        reset_drag_state();

        let seen = Rc::new(Cell::new(None));
        let list = allocate_index();
        let first = row(list, 0, seen.clone());
        let _second = row(list, 1, seen.clone());
        let third = row(list, 2, seen.clone());

        assert!(drag_and_drop(first, third));
        assert_eq!(seen.get(), Some((0, 2)));
        assert_eq!(drag_source(), None);
        assert!(!content::has_class(third, OVER_CLASS));
    }

    #[test]
    fn test_feedback_classes() {
        reset_registry();
        reset_drag_state();

        let seen = Rc::new(Cell::new(None));
        let list = allocate_index();
        let a = row(list, 0, seen.clone());
        let b = row(list, 1, seen.clone());

        assert!(dispatch(a, DragEvent::Start));
        assert!(content::has_class(a, DRAGGING_CLASS));
        assert!(dispatch(b, DragEvent::Enter));
        assert_eq!(drag_flags(b), DragFlags::OVER);
        assert!(content::has_class(b, OVER_CLASS));
        dispatch(b, DragEvent::Leave);
        assert!(!content::has_class(b, OVER_CLASS));
        dispatch(a, DragEvent::End);
        assert!(!content::has_class(a, DRAGGING_CLASS));
    }

    #[test]
    fn test_drop_across_containers_ignored() {
        reset_registry();
        reset_drag_state();

        let seen = Rc::new(Cell::new(None));
        let list_a = allocate_index();
        let list_b = allocate_index();
        let a = row(list_a, 0, seen.clone());
        let b = row(list_b, 0, seen.clone());

        assert!(!drag_and_drop(a, b));
        assert_eq!(seen.get(), None);
    }

    #[test]
    fn test_unbound_element_cannot_start() {
        reset_registry();
        reset_drag_state();

        let plain = allocate_index();
        assert!(!handle_drag_start(plain));
        assert!(!handle_drop(plain));
    }
}
