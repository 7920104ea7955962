//! Internationalized strings.
//!
//! Schema labels, help texts and error messages are either plain text or an
//! i18n label with a default. [`render_string`] resolves them for a language
//! through a [`Translator`], falling back to the default and then to the
//! caller's fallback.
//!
//! # Example
//!
//! ```
//! use spark_formlib::i18n::{i18n, render_string, Catalog};
//!
//! let catalog = Catalog::from_json(r#"{ "sv": { "greeting": "Hej" } }"#).unwrap();
//! let text = i18n("greeting", "Hello");
//!
//! assert_eq!(render_string(&catalog, &text, Some("sv"), None), "Hej");
//! assert_eq!(render_string(&catalog, &text, Some("en"), None), "Hello");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Label used for the required marker in help text.
pub const REQUIRED_LABEL: &str = "isomorphic-schema--field_required";

/// Default text for the required marker.
pub const REQUIRED_DEFAULT: &str = "(required)";

// =============================================================================
// I18n Text
// =============================================================================

/// Text that may be translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum I18nText {
    /// Shown as is.
    Plain(String),
    /// Looked up by label, `message` used when no translation exists.
    Label {
        #[serde(rename = "i18nLabel")]
        label: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl I18nText {
    pub fn is_empty(&self) -> bool {
        match self {
            I18nText::Plain(text) => text.is_empty(),
            I18nText::Label { label, .. } => label.is_empty(),
        }
    }
}

impl From<&str> for I18nText {
    fn from(text: &str) -> Self {
        I18nText::Plain(text.to_string())
    }
}

impl From<String> for I18nText {
    fn from(text: String) -> Self {
        I18nText::Plain(text)
    }
}

impl fmt::Display for I18nText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I18nText::Plain(text) => write!(f, "{}", text),
            I18nText::Label {
                message: Some(message),
                ..
            } => write!(f, "{}", message),
            I18nText::Label { label, .. } => write!(f, "{}", label),
        }
    }
}

/// Build a translatable text with a default.
pub fn i18n(label: &str, default: &str) -> I18nText {
    I18nText::Label {
        label: label.to_string(),
        message: Some(default.to_string()),
    }
}

// =============================================================================
// Translator
// =============================================================================

/// Language lookup used by every widget that shows text.
pub trait Translator {
    /// Translation of `label` for `lang`, if any.
    fn translate(&self, label: &str, lang: Option<&str>) -> Option<String>;
}

/// Translator that knows no languages. Defaults are always used.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, _label: &str, _lang: Option<&str>) -> Option<String> {
        None
    }
}

/// In-memory translations: language -> label -> text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    languages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `{ "<lang>": { "<label>": "<text>" } }`.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::json("translation catalog", e))
    }

    pub fn insert(&mut self, lang: &str, label: &str, text: &str) {
        self.languages
            .entry(lang.to_string())
            .or_default()
            .insert(label.to_string(), text.to_string());
    }
}

impl Translator for Catalog {
    fn translate(&self, label: &str, lang: Option<&str>) -> Option<String> {
        self.languages.get(lang?)?.get(label).cloned()
    }
}

/// Resolve `text` for `lang`.
///
/// Order: translation, the text's own default, `fallback`, the raw label.
pub fn render_string(
    translator: &dyn Translator,
    text: &I18nText,
    lang: Option<&str>,
    fallback: Option<&str>,
) -> String {
    match text {
        I18nText::Plain(text) => text.clone(),
        I18nText::Label { label, message } => translator
            .translate(label, lang)
            .or_else(|| message.clone())
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| label.clone()),
    }
}
