use std::fmt;

use crate::adapter::Capability;
use crate::schema::FieldKind;

#[derive(Debug)]
pub enum FormError {
    /// A list operation addressed a position outside the current rows
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    /// No widget is registered for the field kind, not even an any-field fallback
    AdapterNotFound { kind: FieldKind, capability: Capability },

    /// JSON parsing failed (schema, options, validation errors, catalog)
    Json { context: String, source: serde_json::Error },
}

impl FormError {
    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        FormError::Json {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::IndexOutOfRange {
                operation,
                index,
                len,
            } => {
                write!(f, "{} index {} out of range for {} rows", operation, index, len)
            }
            FormError::AdapterNotFound { kind, capability } => {
                write!(f, "No {} adapter registered for {} fields", capability, kind)
            }
            FormError::Json { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
