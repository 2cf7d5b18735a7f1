//! Flat message list.

use super::{Messages, Note, NoteConfig};

/// Sink that keeps every message in one insertion-ordered list.
///
/// The owner passed to [`Note::add_message`] is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatNote {
    messages: Vec<String>,
    config: NoteConfig,
}

impl FlatNote {
    /// Empty sink with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sink with the given formatting config.
    pub fn with_config(config: NoteConfig) -> Self {
        Self {
            messages: Vec::new(),
            config,
        }
    }

    /// Recorded messages in order.
    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Consumes the sink, returning its messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl Note for FlatNote {
    fn add_message(&mut self, _owner: Option<&str>, message: String) {
        self.messages.push(message);
    }

    fn messages(&self) -> Messages {
        Messages::Flat(self.messages.clone())
    }

    fn config(&self) -> &NoteConfig {
        &self.config
    }

    fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
