//! Property-based tests for list item identity.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use serde_json::json;
use spark_formlib::identity::{splice_move, ListIdentityTracker};
use spark_formlib::ItemKey;

// =============================================================================
// Test helpers
// =============================================================================

/// A structural edit the list widget can make.
#[derive(Clone, Debug)]
enum ListOp {
    Append,
    Delete { pos_pct: f64 },
    Move { source_pct: f64, target_pct: f64 },
}

fn arbitrary_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        Just(ListOp::Append),
        (0.0..1.0f64).prop_map(|pos_pct| ListOp::Delete { pos_pct }),
        (0.0..1.0f64, 0.0..1.0f64)
            .prop_map(|(source_pct, target_pct)| ListOp::Move { source_pct, target_pct }),
    ]
}

fn position(pct: f64, len: usize) -> usize {
    ((pct * len as f64) as usize).min(len - 1)
}

/// Values paired with a tracker, edited the way the list widget edits them.
struct Model {
    values: Vec<u64>,
    tracker: ListIdentityTracker,
    next_value: u64,
    born_with: HashMap<ItemKey, u64>,
}

impl Model {
    fn new(len: usize) -> Self {
        let tracker = ListIdentityTracker::with_len(len);
        let values: Vec<u64> = (0..len as u64).collect();
        let born_with = tracker.keys().iter().copied().zip(values.iter().copied()).collect();
        Self {
            values,
            tracker,
            next_value: len as u64,
            born_with,
        }
    }

    fn apply(&mut self, op: &ListOp) {
        let len = self.values.len();
        match op {
            ListOp::Append => {
                let key = self.tracker.append();
                self.values.push(self.next_value);
                self.born_with.insert(key, self.next_value);
                self.next_value += 1;
            }
            ListOp::Delete { pos_pct } => {
                if len == 0 {
                    return;
                }
                let index = position(*pos_pct, len);
                self.tracker.delete(index).unwrap();
                self.values.remove(index);
            }
            ListOp::Move { source_pct, target_pct } => {
                if len == 0 {
                    return;
                }
                let source = position(*source_pct, len);
                let target = position(*target_pct, len);
                self.tracker.move_item(source, target).unwrap();
                splice_move(&mut self.values, source, target).unwrap();
            }
        }
    }
}

// =============================================================================
// Structural edits
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Keys and values stay the same length and keys stay unique.
    #[test]
    fn keys_track_length_and_stay_unique(
        initial in 0usize..8,
        ops in prop::collection::vec(arbitrary_list_op(), 0..60),
    ) {
        let mut model = Model::new(initial);
        for op in &ops {
            model.apply(op);
            prop_assert_eq!(model.tracker.len(), model.values.len());
            let unique: HashSet<ItemKey> = model.tracker.keys().iter().copied().collect();
            prop_assert_eq!(unique.len(), model.tracker.len());
        }
    }

    /// Every key still sits next to the value it was created for.
    #[test]
    fn keys_follow_their_values(
        initial in 0usize..8,
        ops in prop::collection::vec(arbitrary_list_op(), 0..60),
    ) {
        let mut model = Model::new(initial);
        for op in &ops {
            model.apply(op);
        }
        for (key, value) in model.tracker.keys().iter().zip(model.values.iter()) {
            prop_assert_eq!(model.born_with.get(key), Some(value));
        }
    }

    /// Append followed by deleting the last row restores the keys.
    #[test]
    fn append_then_delete_last_restores(initial in 0usize..10) {
        let mut tracker = ListIdentityTracker::with_len(initial);
        let before = tracker.keys().to_vec();
        tracker.append();
        tracker.delete(initial).unwrap();
        prop_assert_eq!(tracker.keys(), before.as_slice());
    }

    /// Moving a row onto itself changes nothing.
    #[test]
    fn move_onto_self_is_noop(len in 1usize..10, pct in 0.0..1.0f64) {
        let mut tracker = ListIdentityTracker::with_len(len);
        let before = tracker.keys().to_vec();
        let index = position(pct, len);
        tracker.move_item(index, index).unwrap();
        prop_assert_eq!(tracker.keys(), before.as_slice());
    }

    /// Growing reconciliation keeps existing keys and adds fresh ones.
    #[test]
    fn reconcile_grow_adds_fresh_keys(initial in 0usize..6, extra in 1usize..6) {
        let mut tracker = ListIdentityTracker::with_len(initial);
        tracker.append();
        tracker.delete(initial).unwrap();
        let before = tracker.keys().to_vec();

        tracker.reconcile(Some(initial + extra));
        prop_assert_eq!(&tracker.keys()[..initial], before.as_slice());
        let old: HashSet<ItemKey> = before.iter().copied().collect();
        for key in &tracker.keys()[initial..] {
            prop_assert!(!old.contains(key));
        }
        // The key freed by the delete above is never handed out again.
        prop_assert!(!tracker.keys().contains(&ItemKey(initial as u64)));
    }
}

// =============================================================================
// Literal cases
// =============================================================================

fn raw(tracker: &ListIdentityTracker) -> Vec<u64> {
    tracker.keys().iter().map(|key| key.value()).collect()
}

#[test]
fn move_forward_lands_before_target() {
    let mut tracker = ListIdentityTracker::with_len(4);
    tracker.move_item(0, 2).unwrap();
    assert_eq!(raw(&tracker), vec![1, 0, 2, 3]);
}

#[test]
fn move_backward_lands_at_target() {
    let mut tracker = ListIdentityTracker::with_len(4);
    tracker.move_item(3, 1).unwrap();
    assert_eq!(raw(&tracker), vec![0, 3, 1, 2]);
}

#[test]
fn reconcile_with_non_list_empties() {
    let mut tracker = ListIdentityTracker::from_value(&json!(["a", "b"]));
    tracker.reconcile_value(&json!({ "not": "a list" }));
    assert!(tracker.is_empty());

    tracker.reconcile_value(&json!(["x"]));
    assert_eq!(raw(&tracker), vec![2]);
}
