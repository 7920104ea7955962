//! Field definitions.
//!
//! A form is described by a tree of [`Field`]s, usually loaded from JSON:
//!
//! ```json
//! {
//!   "type": "object",
//!   "fields": [
//!     { "name": "title", "type": "text", "label": "Title", "required": true },
//!     { "name": "tags", "type": "list", "label": "Tags",
//!       "placeholder": "No tags yet",
//!       "valueType": { "type": "text" } }
//!   ]
//! }
//! ```
//!
//! Widgets only read fields; nothing here is mutated after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::i18n::I18nText;

/// Declared value type of a field. Selects the widgets that render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Integer,
    Decimal,
    Date,
    Bool,
    Object,
    List,
}

impl FieldKind {
    /// Kinds whose text input should be parsed as a number.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Email => "email",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::Bool => "bool",
            FieldKind::Object => "object",
            FieldKind::List => "list",
        };
        write!(f, "{}", name)
    }
}

/// One schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default)]
    pub label: Option<I18nText>,

    #[serde(default)]
    pub help: Option<I18nText>,

    /// Shown by inputs without a value, and by empty lists.
    #[serde(default)]
    pub placeholder: Option<I18nText>,

    #[serde(default)]
    pub required: bool,

    /// Item field of a list.
    #[serde(default)]
    pub value_type: Option<Box<Field>>,

    /// Child fields of an object, in display order.
    #[serde(default)]
    pub fields: Vec<NamedField>,
}

/// Child field entry of an object field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    #[serde(flatten)]
    pub field: Field,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            help: None,
            placeholder: None,
            required: false,
            value_type: None,
            fields: Vec::new(),
        }
    }

    /// Parse a field tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::json("field schema", e))
    }

    pub fn with_label(mut self, label: impl Into<I18nText>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<I18nText>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<I18nText>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// List field with the given item field.
    pub fn list_of(item: Field) -> Self {
        let mut field = Self::new(FieldKind::List);
        field.value_type = Some(Box::new(item));
        field
    }

    /// Append a child field (object fields).
    pub fn with_field(mut self, name: &str, field: Field) -> Self {
        self.fields.push(NamedField {
            name: name.to_string(),
            field,
        });
        self
    }

    /// Look up a child field by name.
    pub fn child(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.field)
    }

    /// Item field of a list. Lists without one edit plain text items.
    pub fn item_field(&self) -> Field {
        match &self.value_type {
            Some(item) => (**item).clone(),
            None => Field::new(FieldKind::Text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_schema() {
        let field = Field::from_json(
            r#"{
                "type": "object",
                "fields": [
                    { "name": "title", "type": "text", "label": "Title", "required": true },
                    { "name": "tags", "type": "list", "valueType": { "type": "integer" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(field.kind, FieldKind::Object);
        let title = field.child("title").unwrap();
        assert!(title.required);
        assert_eq!(title.label, Some(I18nText::from("Title")));

        let tags = field.child("tags").unwrap();
        assert_eq!(tags.item_field().kind, FieldKind::Integer);
        assert!(field.child("missing").is_none());
    }

    #[test]
    fn test_builder_matches_json() {
        let built = Field::new(FieldKind::Object)
            .with_field("done", Field::new(FieldKind::Bool).with_label("Done"));
        let parsed = Field::from_json(
            r#"{ "type": "object", "fields": [ { "name": "done", "type": "bool", "label": "Done" } ] }"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_list_without_value_type_defaults_to_text() {
        let list = Field::new(FieldKind::List);
        assert_eq!(list.item_field().kind, FieldKind::Text);
    }

    #[test]
    fn test_unknown_kind_is_error() {
        assert!(Field::from_json(r#"{ "type": "colour" }"#).is_err());
    }
}
