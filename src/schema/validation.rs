//! Validation error shapes and invariant error matching.
//!
//! Errors come from an external validator as a tree mirroring the value:
//! `fieldErrors` holds child errors by field name (or list position), and
//! `invariantErrors` holds cross-field failures addressed by dotted path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;

/// Message shown when several invariant errors point at one field.
pub const MULTIPLE_INVARIANT_MESSAGE: &str = "There are several form value errors here";

/// I18n label of [`MULTIPLE_INVARIANT_MESSAGE`].
pub const MULTIPLE_INVARIANT_LABEL: &str = "spark-formlib--multiple_invariant_errors";

/// Validation failure for one field, with the failures below it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub i18n_label: Option<String>,

    /// Child errors by field name or list position.
    #[serde(default)]
    pub field_errors: BTreeMap<String, ValidationError>,

    /// Opaque errors reported by the server for this field.
    #[serde(default)]
    pub server_errors: Option<Value>,

    #[serde(default)]
    pub invariant_errors: Vec<InvariantError>,
}

/// Cross-field constraint failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvariantError {
    /// Dotted paths of the fields involved.
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub i18n_label: Option<String>,
}

/// What an error block shows: an i18n label with its default message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
    pub i18n_label: Option<String>,
}

impl From<&ValidationError> for ErrorMessage {
    fn from(err: &ValidationError) -> Self {
        Self {
            message: err.message.clone(),
            i18n_label: err.i18n_label.clone(),
        }
    }
}

impl From<&InvariantError> for ErrorMessage {
    fn from(err: &InvariantError) -> Self {
        Self {
            message: err.message.clone(),
            i18n_label: err.i18n_label.clone(),
        }
    }
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Default::default()
        }
    }

    /// Parse an error tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::json("validation error", e))
    }

    pub fn with_field_error(mut self, name: &str, error: ValidationError) -> Self {
        self.field_errors.insert(name.to_string(), error);
        self
    }

    pub fn with_invariant(mut self, fields: &[&str], message: &str) -> Self {
        self.invariant_errors.push(InvariantError {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            message: message.to_string(),
            i18n_label: None,
        });
        self
    }

    pub fn field_error(&self, name: &str) -> Option<&ValidationError> {
        self.field_errors.get(name)
    }
}

/// Pick the invariant error addressed to `namespace`.
///
/// Matches errors whose `fields` contain the dotted namespace exactly.
/// Identical errors count once. One match is returned as is; several
/// collapse into one synthesized message.
pub fn match_invariant_error<'a>(
    errors: impl IntoIterator<Item = &'a InvariantError>,
    namespace: &[String],
) -> Option<ErrorMessage> {
    let dotted = namespace.join(".");
    let mut matches: Vec<&InvariantError> = Vec::new();
    for err in errors {
        if err.fields.iter().any(|f| *f == dotted) && !matches.contains(&err) {
            matches.push(err);
        }
    }

    match matches.as_slice() {
        [] => None,
        [only] => Some((*only).into()),
        _ => Some(ErrorMessage {
            message: MULTIPLE_INVARIANT_MESSAGE.to_string(),
            i18n_label: Some(MULTIPLE_INVARIANT_LABEL.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(path: &str) -> Vec<String> {
        path.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_parse_error_tree() {
        let err = ValidationError::from_json(
            r#"{
                "message": "Form has errors",
                "fieldErrors": { "title": { "message": "Required", "i18nLabel": "required" } },
                "invariantErrors": [ { "fields": ["start", "end"], "message": "Start after end" } ]
            }"#,
        )
        .unwrap();

        let title = err.field_error("title").unwrap();
        assert_eq!(title.message, "Required");
        assert_eq!(title.i18n_label.as_deref(), Some("required"));
        assert_eq!(err.invariant_errors[0].fields, vec!["start", "end"]);
    }

    #[test]
    fn test_single_invariant_match() {
        let err = ValidationError::new("").with_invariant(&["period.start"], "Bad period");
        let matched = match_invariant_error(&err.invariant_errors, &ns("period.start")).unwrap();
        assert_eq!(matched.message, "Bad period");
    }

    #[test]
    fn test_no_match_on_prefix() {
        let err = ValidationError::new("").with_invariant(&["period.start"], "Bad period");
        assert!(match_invariant_error(&err.invariant_errors, &ns("period")).is_none());
    }

    #[test]
    fn test_multiple_matches_merge() {
        let err = ValidationError::new("")
            .with_invariant(&["a", "b"], "first")
            .with_invariant(&["b"], "second");
        let matched = match_invariant_error(&err.invariant_errors, &ns("b")).unwrap();
        assert_eq!(matched.message, MULTIPLE_INVARIANT_MESSAGE);
        assert_eq!(matched.i18n_label.as_deref(), Some(MULTIPLE_INVARIANT_LABEL));

        let only_a = match_invariant_error(&err.invariant_errors, &ns("a")).unwrap();
        assert_eq!(only_a.message, "first");
    }

    #[test]
    fn test_identical_matches_count_once() {
        let err = ValidationError::new("")
            .with_invariant(&["b"], "same")
            .with_invariant(&["b"], "same");
        let matched = match_invariant_error(&err.invariant_errors, &ns("b")).unwrap();
        assert_eq!(matched.message, "same");
    }
}
