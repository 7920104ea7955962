//! List Identity Tracker - Stable row keys for editable lists.
//!
//! A list field's values are owned by the form, but the element for each row
//! must survive deletes and reorders. The tracker keeps one synthetic
//! [`ItemKey`] per value position and mirrors every structural edit the list
//! widget makes to the values.
//!
//! # Operations
//!
//! - [`append`](ListIdentityTracker::append) - new row at the end
//! - [`delete`](ListIdentityTracker::delete) - row removed at an index
//! - [`move_item`](ListIdentityTracker::move_item) - drag reorder (splice out, splice in)
//! - [`reconcile`](ListIdentityTracker::reconcile) - owner replaced the values wholesale
//!
//! Keys come from a counter that only grows, so a key is never handed to a
//! different row. External replacement cannot be matched by identity and is
//! reconciled positionally: trailing keys are dropped or fresh keys appended.
//!
//! # Example
//!
//! ```
//! use spark_formlib::identity::ListIdentityTracker;
//! use serde_json::json;
//!
//! let mut tracker = ListIdentityTracker::from_value(&json!(["a", "b", "c"]));
//! let first = tracker.keys()[0];
//!
//! tracker.move_item(0, 2).unwrap();
//! assert_eq!(tracker.keys()[1], first);
//!
//! tracker.reconcile_value(&json!(null));
//! assert!(tracker.is_empty());
//! ```

use serde_json::Value;

use crate::error::FormError;
use crate::types::ItemKey;

/// Move the element at `source` to `target` with splice semantics.
///
/// Removes at `source`, then inserts at `target`, decremented by one when
/// `source < target` to account for the removal shift. Used for both the
/// key sequence and the value sequence so they always agree.
pub fn splice_move<T>(items: &mut Vec<T>, source: usize, target: usize) -> Result<(), FormError> {
    let len = items.len();
    if source >= len {
        return Err(FormError::IndexOutOfRange {
            operation: "move source",
            index: source,
            len,
        });
    }
    if target >= len {
        return Err(FormError::IndexOutOfRange {
            operation: "move target",
            index: target,
            len,
        });
    }

    let item = items.remove(source);
    let target = if source < target { target - 1 } else { target };
    items.insert(target, item);
    Ok(())
}

/// Length of a list value, or `None` when the value is not a sequence.
pub fn sequence_len(value: &Value) -> Option<usize> {
    value.as_array().map(Vec::len)
}

/// Order-preserving position -> key mapping for one list widget.
#[derive(Debug, Clone, Default)]
pub struct ListIdentityTracker {
    keys: Vec<ItemKey>,
    next_key: u64,
}

impl ListIdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one fresh key per existing element.
    pub fn with_len(len: usize) -> Self {
        let mut tracker = Self::new();
        for _ in 0..len {
            tracker.append();
        }
        tracker
    }

    /// Seed from a list value. Anything that is not an array starts empty.
    pub fn from_value(value: &Value) -> Self {
        Self::with_len(sequence_len(value).unwrap_or(0))
    }

    pub fn keys(&self) -> &[ItemKey] {
        &self.keys
    }

    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.keys.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn allocate(&mut self) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Append a fresh key for a value pushed at the end.
    pub fn append(&mut self) -> ItemKey {
        let key = self.allocate();
        self.keys.push(key);
        log::trace!("list identity: append {} (len {})", key, self.keys.len());
        key
    }

    /// Remove the key of the row deleted at `index`.
    pub fn delete(&mut self, index: usize) -> Result<ItemKey, FormError> {
        if index >= self.keys.len() {
            return Err(FormError::IndexOutOfRange {
                operation: "delete",
                index,
                len: self.keys.len(),
            });
        }
        let key = self.keys.remove(index);
        log::trace!("list identity: delete {} at {}", key, index);
        Ok(key)
    }

    /// Mirror a drag reorder from `source` to `target`.
    pub fn move_item(&mut self, source: usize, target: usize) -> Result<(), FormError> {
        splice_move(&mut self.keys, source, target)?;
        log::trace!("list identity: move {} -> {}", source, target);
        Ok(())
    }

    /// Bring the key count in line with a replacement sequence.
    ///
    /// `None` means the new value is not a sequence and empties the keys.
    pub fn reconcile(&mut self, new_len: Option<usize>) {
        let new_len = new_len.unwrap_or(0);
        if new_len < self.keys.len() {
            log::trace!("list identity: truncate {} -> {}", self.keys.len(), new_len);
            self.keys.truncate(new_len);
            return;
        }
        while self.keys.len() < new_len {
            self.append();
        }
    }

    /// [`reconcile`](Self::reconcile) against a JSON list value.
    pub fn reconcile_value(&mut self, value: &Value) {
        self.reconcile(sequence_len(value));
    }
}
