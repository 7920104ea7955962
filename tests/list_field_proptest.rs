//! Random add/delete/drop sequences driven through a mounted list field.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{json, Value};
use spark_formlib::engine::arrays::content;
use spark_formlib::identity::splice_move;
use spark_formlib::state::drag::{self, DRAG_INDEX_ATTR};
use spark_formlib::state::events;
use spark_formlib::widgets::input::TEXT_INPUT_CLASS;
use spark_formlib::widgets::list_field::{
    ADD_BUTTON_CLASS, DELETE_BUTTON_CLASS, KEY_ATTR, LIST_ROW_CLASS,
};
use spark_formlib::{
    form, get_allocated_count, reset_registry, tree, AdapterRegistry, Field, FormContext, FormProps,
};
use spark_signals::signal;

const SCHEMA: &str = r#"{
    "type": "object",
    "fields": [
        { "name": "tags", "type": "list", "label": "Tags",
          "valueType": { "type": "text" } }
    ]
}"#;

#[derive(Clone, Debug)]
enum RowOp {
    Add,
    Delete { pos_pct: f64 },
    Drop { source_pct: f64, target_pct: f64 },
}

fn arbitrary_row_op() -> impl Strategy<Value = RowOp> {
    prop_oneof![
        Just(RowOp::Add),
        (0.0..1.0f64).prop_map(|pos_pct| RowOp::Delete { pos_pct }),
        (0.0..1.0f64, 0.0..1.0f64)
            .prop_map(|(source_pct, target_pct)| RowOp::Drop { source_pct, target_pct }),
    ]
}

fn position(pct: f64, len: usize) -> usize {
    ((pct * len as f64) as usize).min(len - 1)
}

fn rows() -> Vec<usize> {
    tree::find_by_class(tree::roots()[0], LIST_ROW_CLASS)
}

fn row_attrs(name: &str) -> Vec<String> {
    rows()
        .into_iter()
        .filter_map(|row| content::get_attr(row, name))
        .collect()
}

fn row_texts() -> Vec<String> {
    rows()
        .into_iter()
        .filter_map(|row| tree::find_first_by_class(row, TEXT_INPUT_CLASS))
        .map(content::get_text)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Rendered rows always match the value, with unique keys and
    /// drag indices equal to their position.
    #[test]
    fn rows_follow_the_value(
        initial in 0usize..5,
        ops in prop::collection::vec(arbitrary_row_op(), 0..24),
    ) {
        reset_registry();
        events::reset_events();
        drag::reset_drag_state();

        let mut model: Vec<String> = (0..initial).map(|i| format!("v{}", i)).collect();
        let value = signal(json!({ "tags": model.clone() }));
        let ctx = FormContext::new(AdapterRegistry::with_defaults());
        let schema = Field::from_json(SCHEMA).unwrap();
        let cleanup = form(FormProps::new(schema, value.clone(), signal(None), ctx));
        let mut next = initial;

        for op in &ops {
            let len = model.len();
            match op {
                RowOp::Add => {
                    let add = tree::find_first_by_class(tree::roots()[0], ADD_BUTTON_CLASS).unwrap();
                    prop_assert!(events::click(add));
                    let last = *rows().last().unwrap();
                    let input = tree::find_first_by_class(last, TEXT_INPUT_CLASS).unwrap();
                    let text = format!("v{}", next);
                    next += 1;
                    prop_assert!(events::input(input, &text));
                    model.push(text);
                }
                RowOp::Delete { pos_pct } => {
                    if len == 0 {
                        continue;
                    }
                    let index = position(*pos_pct, len);
                    let delete = tree::find_first_by_class(rows()[index], DELETE_BUTTON_CLASS).unwrap();
                    prop_assert!(events::click(delete));
                    model.remove(index);
                }
                RowOp::Drop { source_pct, target_pct } => {
                    if len == 0 {
                        continue;
                    }
                    let source = position(*source_pct, len);
                    let target = position(*target_pct, len);
                    let current = rows();
                    drag::drag_and_drop(current[source], current[target]);
                    splice_move(&mut model, source, target).unwrap();
                }
            }

            let expected: Vec<Value> = model.iter().map(|text| json!(text)).collect();
            prop_assert_eq!(&value.get()["tags"], &Value::Array(expected));
            prop_assert_eq!(row_texts(), model.clone());

            let keys = row_attrs(KEY_ATTR);
            let unique: HashSet<&String> = keys.iter().collect();
            prop_assert_eq!(keys.len(), model.len());
            prop_assert_eq!(unique.len(), keys.len());

            let positions: Vec<String> = (0..model.len()).map(|i| i.to_string()).collect();
            prop_assert_eq!(row_attrs(DRAG_INDEX_ATTR), positions);
        }

        cleanup();
        prop_assert_eq!(get_allocated_count(), 0);
    }
}
