//! Message sinks.
//!
//! A [`Note`] collects the messages of failed rules. Chains only ever append
//! to it; the caller reads it once every chain of a validation pass is done.
//!
//! - [`FlatNote`]: a single ordered list, owner ignored
//! - [`FieldNote`]: messages grouped per field, fields in first-failure order
//! - [`SharedNote`]: a cloneable, mutex-guarded field sink for several threads
//!
//! Formatting (placeholders, field-name normalization, positional arguments)
//! lives in [`format`] and is configured through [`NoteConfig`].

pub mod field;
pub mod flat;
pub mod format;
pub mod shared;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use field::FieldNote;
pub use flat::FlatNote;
pub use shared::SharedNote;

// ============================================================================
// NOTE TRAIT
// ============================================================================

/// Destination for validation messages.
///
/// Implementors only need [`add_message`](Note::add_message),
/// [`messages`](Note::messages) and [`config`](Note::config); the formatting
/// hooks read the config by default.
pub trait Note {
    /// Appends `message` for `owner`. Never overwrites earlier messages.
    fn add_message(&mut self, owner: Option<&str>, message: String);

    /// Snapshot of everything recorded so far.
    fn messages(&self) -> Messages;

    /// Formatting configuration of this sink.
    fn config(&self) -> &NoteConfig;

    /// Whether field names are normalized before substitution.
    fn should_convert_field_name(&self) -> bool {
        self.convert_field_name().is_some()
    }

    /// Placeholder token replaced by the field name, e.g. `"{field}"`.
    fn convert_field_name(&self) -> Option<&str> {
        self.config().convert_field_name.as_deref()
    }

    /// Templates keyed by rule name, used when a rule has no message.
    fn custom_error_messages(&self) -> Option<&HashMap<String, String>> {
        self.config().custom_error_messages.as_ref()
    }

    /// Returns `true` if nothing was recorded.
    fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Formatting options shared by every sink.
///
/// ```rust,ignore
/// let config = NoteConfig::new()
///     .with_field_placeholder("{field}")
///     .with_custom_message("required", "{field} cannot be empty");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    /// Placeholder token; its presence turns field-name conversion on.
    pub convert_field_name: Option<String>,
    /// Templates keyed by rule name.
    pub custom_error_messages: Option<HashMap<String, String>>,
}

impl NoteConfig {
    /// Config with no placeholder and no custom messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placeholder token and enables field-name conversion.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field_placeholder(mut self, token: impl Into<String>) -> Self {
        self.convert_field_name = Some(token.into());
        self
    }

    /// Adds one custom template for `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom_message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.custom_error_messages
            .get_or_insert_with(HashMap::new)
            .insert(rule.into(), template.into());
        self
    }

    /// Adds several custom templates.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom_messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let custom = self.custom_error_messages.get_or_insert_with(HashMap::new);
        for (rule, template) in messages {
            custom.insert(rule.into(), template.into());
        }
        self
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Messages as read back from a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Messages {
    /// Insertion-ordered list from a [`FlatNote`].
    Flat(Vec<String>),
    /// Per-field lists from a [`FieldNote`] or [`SharedNote`].
    Fields(IndexMap<String, Vec<String>>),
}

impl Messages {
    /// Total number of messages.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(list) => list.len(),
            Self::Fields(fields) => fields.values().map(Vec::len).sum(),
        }
    }

    /// Returns `true` if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every message in recording order for flat sinks, field order otherwise.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Flat(list) => Box::new(list.iter().map(String::as_str)),
            Self::Fields(fields) => {
                Box::new(fields.values().flat_map(|list| list.iter().map(String::as_str)))
            }
        }
    }

    /// Messages of one field; `None` for flat messages or unknown fields.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        match self {
            Self::Flat(_) => None,
            Self::Fields(fields) => fields.get(name).map(Vec::as_slice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NoteConfig::new()
            .with_field_placeholder("{f}")
            .with_custom_message("required", "{f} needed")
            .with_custom_messages([("email", "bad email")]);

        assert_eq!(config.convert_field_name.as_deref(), Some("{f}"));
        let custom = config.custom_error_messages.as_ref().map(HashMap::len);
        assert_eq!(custom, Some(2));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: NoteConfig = serde_json::from_str(r#"{"convert_field_name":"{field}"}"#)
            .expect("valid config");
        assert_eq!(config.convert_field_name.as_deref(), Some("{field}"));
        assert!(config.custom_error_messages.is_none());
    }

    #[test]
    fn messages_len_and_iter() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), vec!["1".to_string(), "2".to_string()]);
        fields.insert("b".to_string(), vec!["3".to_string()]);
        let messages = Messages::Fields(fields);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(messages.field("b"), Some(&["3".to_string()][..]));

        let flat = Messages::Flat(vec!["x".into()]);
        assert_eq!(flat.field("x"), None);
        assert_eq!(serde_json::to_string(&flat).expect("serializes"), r#"["x"]"#);
    }
}
