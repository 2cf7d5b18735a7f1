//! Thread-safe field sink.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::field::UNNAMED_KEY;
use super::{FieldNote, Messages, Note, NoteConfig};

/// Cloneable handle to a field sink guarded by a mutex.
///
/// Every thread validating part of a record takes its own clone and passes it
/// to its chains as `&mut`. Appends are serialized by the lock; the caller
/// calls [`snapshot`](Self::snapshot) after joining the workers.
///
/// Message order within one field follows lock acquisition order.
#[derive(Debug, Clone, Default)]
pub struct SharedNote {
    fields: Arc<Mutex<IndexMap<String, Vec<String>>>>,
    config: Arc<NoteConfig>,
}

impl SharedNote {
    /// Empty sink with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sink with the given formatting config.
    pub fn with_config(config: NoteConfig) -> Self {
        Self {
            fields: Arc::default(),
            config: Arc::new(config),
        }
    }

    /// Copies the current contents into a plain [`FieldNote`].
    pub fn snapshot(&self) -> FieldNote {
        FieldNote::from_parts(self.fields.lock().clone(), NoteConfig::clone(&self.config))
    }

    /// Total number of messages across fields.
    pub fn len(&self) -> usize {
        self.fields.lock().values().map(Vec::len).sum()
    }
}

impl Note for SharedNote {
    fn add_message(&mut self, owner: Option<&str>, message: String) {
        tracing::trace!(owner = owner.unwrap_or(UNNAMED_KEY), "shared note append");
        self.fields
            .lock()
            .entry(owner.unwrap_or(UNNAMED_KEY).to_owned())
            .or_default()
            .push(message);
    }

    fn messages(&self) -> Messages {
        Messages::Fields(self.fields.lock().clone())
    }

    fn config(&self) -> &NoteConfig {
        &self.config
    }

    fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }
}
