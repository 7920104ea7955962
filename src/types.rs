//! Core types shared across the element tree and the widgets.

use std::fmt;

// =============================================================================
// Item Key
// =============================================================================

/// Synthetic identity of a list row.
///
/// Allocated from a monotonically increasing counter and never reused
/// within one list widget, so a key follows its logical row across
/// deletes and reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub u64);

impl ItemKey {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Element Kind
// =============================================================================

/// What an element represents. Drives how the renderer draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ElementKind {
    /// Plain grouping element with no visual of its own.
    #[default]
    Container = 0,
    /// Field label.
    Label = 1,
    /// Help text under a field.
    Help = 2,
    /// Validation error message.
    Error = 3,
    /// Single-line text input.
    Input = 4,
    /// Boolean toggle.
    Checkbox = 5,
    /// Clickable action.
    Button = 6,
    /// Free text (placeholders, captions).
    Text = 7,
}

impl ElementKind {
    /// Kinds that render their own text content.
    pub fn is_textual(self) -> bool {
        !matches!(self, ElementKind::Container)
    }
}

// =============================================================================
// Element Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Boolean element state packed for cheap comparison.
    ///
    /// Combine with bitwise OR: `ElementFlags::DRAGGABLE | ElementFlags::DISABLED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const NONE = 0;
        /// Element participates in drag-and-drop.
        const DRAGGABLE = 1 << 0;
        /// Checkbox is checked.
        const CHECKED = 1 << 1;
        /// Element ignores click and input events.
        const DISABLED = 1 << 2;
    }
}
