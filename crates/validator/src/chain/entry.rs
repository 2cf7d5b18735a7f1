//! Entry points that build a chain in Note-First or Note-All mode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Chain, PreCondition};
use crate::note::Note;

/// How a chain reacts to an ordinary failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Stop at the first failure of any kind.
    #[default]
    NoteFirst,
    /// Record every ordinary failure; only fatal rules stop the chain.
    NoteAll,
}

impl Mode {
    /// Returns `true` for [`Mode::NoteFirst`].
    pub fn fail_on_first(self) -> bool {
        matches!(self, Self::NoteFirst)
    }

    /// Starts a chain over `value` for `field`, recording into `note`.
    pub fn valid<'n, T>(
        self,
        value: Option<T>,
        field: impl Into<String>,
        note: &'n mut dyn Note,
    ) -> PreCondition<'n, T> {
        PreCondition::new(Chain::new(Some(field.into()), value, Some(note), self.fail_on_first()))
    }

    /// Starts a chain without a field name.
    pub fn valid_unnamed<'n, T>(self, value: Option<T>, note: &'n mut dyn Note) -> PreCondition<'n, T> {
        PreCondition::new(Chain::new(None, value, Some(note), self.fail_on_first()))
    }

    /// Starts a chain without a sink; its first failure stops it.
    pub fn valid_detached<T>(self, value: Option<T>) -> PreCondition<'static, T> {
        PreCondition::new(Chain::new(None, value, None, self.fail_on_first()))
    }

    /// Starts a chain over `input[field]`; an absent key is a missing value.
    pub fn valid_from_map<'n>(
        self,
        input: &HashMap<String, String>,
        field: &str,
        note: &'n mut dyn Note,
    ) -> PreCondition<'n, String> {
        self.valid(input.get(field).cloned(), field, note)
    }
}

macro_rules! mode_entry {
    ($(#[$meta:meta])* $name:ident => $mode:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// The mode this entry point builds.
            pub const MODE: Mode = $mode;

            /// See [`Mode::valid`].
            pub fn valid<'n, T>(
                value: Option<T>,
                field: impl Into<String>,
                note: &'n mut dyn Note,
            ) -> PreCondition<'n, T> {
                Self::MODE.valid(value, field, note)
            }

            /// See [`Mode::valid_unnamed`].
            pub fn valid_unnamed<'n, T>(value: Option<T>, note: &'n mut dyn Note) -> PreCondition<'n, T> {
                Self::MODE.valid_unnamed(value, note)
            }

            /// See [`Mode::valid_detached`].
            pub fn valid_detached<T>(value: Option<T>) -> PreCondition<'static, T> {
                Self::MODE.valid_detached(value)
            }

            /// See [`Mode::valid_from_map`].
            pub fn valid_from_map<'n>(
                input: &HashMap<String, String>,
                field: &str,
                note: &'n mut dyn Note,
            ) -> PreCondition<'n, String> {
                Self::MODE.valid_from_map(input, field, note)
            }
        }
    };
}

mode_entry! {
    /// Builds chains that stop at the first failure.
    ///
    /// ```rust,ignore
    /// let mut note = FieldNote::new();
    /// NoteFirstValidator::valid(Some("15abc".to_string()), "age", &mut note)
    ///     .required()
    ///     .is_integer()
    ///     .min(18);
    /// assert_eq!(note.len(), 1);
    /// ```
    NoteFirstValidator => Mode::NoteFirst
}

mode_entry! {
    /// Builds chains that record every ordinary failure.
    NoteAllValidator => Mode::NoteAll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{FieldNote, FlatNote};

    #[test]
    fn modes_set_fail_on_first() {
        assert!(Mode::NoteFirst.fail_on_first());
        assert!(!Mode::NoteAll.fail_on_first());
        assert_eq!(Mode::default(), NoteFirstValidator::MODE);
    }

    #[test]
    fn mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Mode::NoteAll).expect("serializes"), r#""note_all""#);
        let mode: Mode = serde_json::from_str(r#""note_first""#).expect("deserializes");
        assert_eq!(mode, Mode::NoteFirst);
    }

    #[test]
    fn from_map_treats_missing_key_as_null() {
        let input = HashMap::from([("name".to_string(), "bob".to_string())]);
        let mut note = FieldNote::new();
        drop(NoteAllValidator::valid_from_map(&input, "name", &mut note).required());
        drop(NoteAllValidator::valid_from_map(&input, "email", &mut note).required());

        assert!(note.field("name").is_none());
        assert_eq!(note.field("email").map(<[String]>::len), Some(1));
    }

    #[test]
    fn unnamed_chain_records_without_owner() {
        let mut note = FlatNote::new();
        let chain = NoteFirstValidator::valid_unnamed(Some(3), &mut note)
            .must_not_be_null()
            .must(|v| *v > 5, "too small");
        assert_eq!(chain.field_name(), None);
        drop(chain);
        assert_eq!(note.as_slice(), ["too small"]);
    }

    #[test]
    fn detached_entry_has_no_sink() {
        let chain = NoteAllValidator::valid_detached(Some(1)).must_not_be_null();
        assert!(chain.is_detached());
    }
}
