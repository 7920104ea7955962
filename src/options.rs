//! Form options.
//!
//! Loaded from JSON; every key is optional.
//!
//! ```
//! use spark_formlib::options::FormOptions;
//!
//! let options = FormOptions::from_json(r#"{ "lang": "sv", "animate": false }"#).unwrap();
//! assert_eq!(options.lang.as_deref(), Some("sv"));
//! assert!(!options.animate);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::i18n::{i18n, I18nText};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Language passed to the translator.
    pub lang: Option<String>,

    /// Call animation hooks at all.
    pub animate: bool,

    /// Text of the list "add" button.
    pub add_row_label: I18nText,

    /// Text of the per-row "remove" button.
    pub delete_row_label: I18nText,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            lang: None,
            animate: true,
            add_row_label: i18n("spark-formlib--list_add", "Add"),
            delete_row_label: i18n("spark-formlib--list_remove", "Remove"),
        }
    }
}

impl FormOptions {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::json("form options", e))
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = Some(lang.to_string());
        self
    }
}
