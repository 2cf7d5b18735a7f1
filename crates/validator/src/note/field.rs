//! Field-scoped message sink.

use indexmap::IndexMap;

use super::{Messages, Note, NoteConfig};

/// Key used for messages recorded by chains without a field name.
pub const UNNAMED_KEY: &str = "";

/// Sink grouping messages by field.
///
/// Fields appear in the order of their first failure; each field keeps its
/// own messages in recording order.
///
/// ```rust,ignore
/// let mut note = FieldNote::with_placeholder("{field}");
/// NoteAllValidator::valid(Some(String::new()), "user_name", &mut note)
///     .required_with("{field} is required");
/// assert_eq!(note.field("user_name"), Some(&["User name is required".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNote {
    fields: IndexMap<String, Vec<String>>,
    config: NoteConfig,
}

impl FieldNote {
    /// Empty sink with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sink with the given formatting config.
    pub fn with_config(config: NoteConfig) -> Self {
        Self {
            fields: IndexMap::new(),
            config,
        }
    }

    /// Empty sink that normalizes field names into `token`.
    pub fn with_placeholder(token: impl Into<String>) -> Self {
        Self::with_config(NoteConfig::new().with_field_placeholder(token))
    }

    pub(crate) fn from_parts(fields: IndexMap<String, Vec<String>>, config: NoteConfig) -> Self {
        Self { fields, config }
    }

    /// Messages of `name`, if it failed at least once.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// All fields with their messages.
    pub fn fields(&self) -> &IndexMap<String, Vec<String>> {
        &self.fields
    }

    /// Total number of messages across fields.
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Renders `{ field: [messages] }` as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(field, messages)| (field.clone(), serde_json::Value::from(messages.clone())))
                .collect(),
        )
    }

    /// Consumes the sink, returning the field map.
    pub fn into_fields(self) -> IndexMap<String, Vec<String>> {
        self.fields
    }
}

impl Note for FieldNote {
    fn add_message(&mut self, owner: Option<&str>, message: String) {
        self.fields
            .entry(owner.unwrap_or(UNNAMED_KEY).to_owned())
            .or_default()
            .push(message);
    }

    fn messages(&self) -> Messages {
        Messages::Fields(self.fields.clone())
    }

    fn config(&self) -> &NoteConfig {
        &self.config
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_by_field_in_first_failure_order() {
        let mut note = FieldNote::new();
        note.add_message(Some("b"), "b1".into());
        note.add_message(Some("a"), "a1".into());
        note.add_message(Some("b"), "b2".into());

        let keys: Vec<&str> = note.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(note.field("b"), Some(&["b1".to_string(), "b2".to_string()][..]));
        assert_eq!(note.len(), 3);
    }

    #[test]
    fn unnamed_owner_uses_empty_key() {
        let mut note = FieldNote::new();
        note.add_message(None, "oops".into());
        assert_eq!(note.field(UNNAMED_KEY), Some(&["oops".to_string()][..]));
    }

    #[test]
    fn renders_json() {
        let mut note = FieldNote::with_placeholder("{field}");
        note.add_message(Some("age"), "Age is required".into());
        assert!(note.should_convert_field_name());
        assert_eq!(
            note.to_json(),
            serde_json::json!({ "age": ["Age is required"] })
        );
    }
}
