//! List field walkthrough: mount a form, add a row, drag it to the top.
//!
//! Run with `RUST_LOG=debug` to see mount and identity logging.

use serde_json::json;
use spark_formlib::state::{drag, events};
use spark_formlib::widgets::list_field::{ADD_BUTTON_CLASS, LIST_ROW_CLASS};
use spark_formlib::{form, tree, AdapterRegistry, Field, FormContext, FormProps, TextRenderer};
use spark_signals::signal;

const SCHEMA: &str = r#"{
    "type": "object",
    "fields": [
        { "name": "title", "type": "text", "label": "Title", "required": true },
        { "name": "published", "type": "bool", "label": "Published" },
        { "name": "tags", "type": "list", "label": "Tags",
          "help": "Drag rows to reorder",
          "placeholder": "No tags yet",
          "valueType": { "type": "text", "placeholder": "tag" } }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let schema = Field::from_json(SCHEMA)?;
    let value = signal(json!({ "title": "Release notes", "published": false, "tags": ["rust", "tui"] }));
    let ctx = FormContext::new(AdapterRegistry::with_defaults());
    let cleanup = form(FormProps::new(schema, value.clone(), signal(None), ctx));

    let renderer = TextRenderer::styled();
    let mut stdout = std::io::stdout();
    let root = tree::roots()[0];

    println!("-- mounted");
    renderer.write(&mut stdout, root)?;

    if let Some(add) = tree::find_first_by_class(root, ADD_BUTTON_CLASS) {
        events::click(add);
    }
    let rows = tree::find_by_class(root, LIST_ROW_CLASS);
    if let [first, .., last] = rows.as_slice() {
        drag::drag_and_drop(*last, *first);
    }

    println!("-- after add and drag");
    renderer.write(&mut stdout, root)?;
    println!("value: {}", value.get());

    cleanup();
    Ok(())
}
