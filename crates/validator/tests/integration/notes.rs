//! Integration test: sinks and message formatting

use std::thread;

use fieldnote_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("user_name", "User name is required")]
#[case("id", "ID is required")]
#[case("user_id", "User ID is required")]
#[case("firstName", "First name is required")]
#[case("accountID", "Account ID is required")]
fn field_names_are_normalized(#[case] field: &str, #[case] expected: &str) {
    let mut note = FlatNote::with_config(NoteConfig::new().with_field_placeholder("{field}"));
    drop(NoteFirstValidator::valid(None::<String>, field, &mut note).required_with("{field} is required"));
    assert_eq!(note.as_slice(), [expected]);
}

#[test]
fn custom_messages_by_rule_name() {
    let config = NoteConfig::new()
        .with_field_placeholder(":field")
        .with_custom_messages([
            ("required", ":field cannot be empty"),
            ("length", ":field needs %s to %s characters"),
        ]);
    let mut note = FieldNote::with_config(config);
    drop(NoteFirstValidator::valid(Some(String::new()), "postCode", &mut note).required());
    drop(
        NoteFirstValidator::valid(Some("1".to_string()), "houseNumber", &mut note)
            .required()
            .length(2, 5),
    );
    assert_eq!(
        note.to_json(),
        serde_json::json!({
            "postCode": ["Post code cannot be empty"],
            "houseNumber": ["House number needs 2 to 5 characters"],
        })
    );
}

#[test]
fn explicit_message_beats_custom_message() {
    let config = NoteConfig::new().with_custom_message("email", "custom");
    let mut note = FlatNote::with_config(config);
    drop(
        NoteFirstValidator::valid(Some("x".to_string()), "mail", &mut note)
            .required()
            .must_rule(|s| s.contains('@'), Some("explicit"), "email"),
    );
    assert_eq!(note.as_slice(), ["explicit"]);
}

#[test]
fn note_config_from_json() {
    let config: NoteConfig = serde_json::from_str(
        r#"{ "convert_field_name": "{field}", "custom_error_messages": { "email": "{field} looks wrong" } }"#,
    )
    .expect("config");
    let mut note = FlatNote::with_config(config);
    drop(NoteFirstValidator::valid(Some("x".to_string()), "work_email", &mut note).required().email());
    assert_eq!(note.as_slice(), ["Work email looks wrong"]);
}

#[test]
fn messages_serialize_by_shape() {
    let mut flat = FlatNote::new();
    let mut fields = FieldNote::new();
    drop(NoteFirstValidator::valid(None::<String>, "a", &mut flat).required());
    drop(NoteFirstValidator::valid(None::<String>, "a", &mut fields).required());

    assert_eq!(
        serde_json::to_value(flat.messages()).expect("serializes"),
        serde_json::json!(["a is required"])
    );
    assert_eq!(
        serde_json::to_value(fields.messages()).expect("serializes"),
        serde_json::json!({ "a": ["a is required"] })
    );
}

#[test]
fn unnamed_values_use_empty_key() {
    let mut note = FieldNote::new();
    drop(NoteAllValidator::valid_unnamed(Some("abc".to_string()), &mut note).required().digit());
    assert_eq!(note.field(""), Some(&["Value must contain only digits".to_string()][..]));
}

#[test]
fn shared_note_collects_from_threads() {
    let note = SharedNote::with_config(NoteConfig::new().with_field_placeholder("{field}"));
    let validator = Validator::<String>::parse("required, isInteger").expect("parses");

    thread::scope(|scope| {
        for worker in 0..4 {
            let mut note = note.clone();
            let validator = &validator;
            scope.spawn(move || {
                for item in 0..25 {
                    let field = format!("row_{worker}");
                    drop(validator.check(Some(format!("x{item}")), &field, &mut note));
                }
            });
        }
    });

    let snapshot = note.snapshot();
    assert_eq!(snapshot.len(), 100);
    assert_eq!(snapshot.fields().len(), 4);
    assert_eq!(
        snapshot.field("row_2").map(|messages| messages[0].as_str()),
        Some("Row 2 must be an integer")
    );
}

/// A sink that keeps only the first message per owner.
#[derive(Default)]
struct FirstOnly {
    seen: Vec<(String, String)>,
    config: NoteConfig,
}

impl Note for FirstOnly {
    fn add_message(&mut self, owner: Option<&str>, message: String) {
        let owner = owner.unwrap_or_default().to_owned();
        if !self.seen.iter().any(|(o, _)| *o == owner) {
            self.seen.push((owner, message));
        }
    }

    fn messages(&self) -> Messages {
        Messages::Flat(self.seen.iter().map(|(_, m)| m.clone()).collect())
    }

    fn config(&self) -> &NoteConfig {
        &self.config
    }
}

/// A sink that substitutes the placeholder but keeps field names as given.
#[derive(Default)]
struct RawNames {
    messages: Vec<String>,
    config: NoteConfig,
}

impl Note for RawNames {
    fn add_message(&mut self, _owner: Option<&str>, message: String) {
        self.messages.push(message);
    }

    fn messages(&self) -> Messages {
        Messages::Flat(self.messages.clone())
    }

    fn config(&self) -> &NoteConfig {
        &self.config
    }

    fn should_convert_field_name(&self) -> bool {
        false
    }
}

#[test]
fn sink_decides_field_name_conversion() {
    let mut note = RawNames {
        config: NoteConfig::new().with_field_placeholder("{field}"),
        ..RawNames::default()
    };
    drop(NoteFirstValidator::valid(None::<String>, "user_name", &mut note).required_with("{field} is required"));
    drop(NoteFirstValidator::valid(Some("x".to_string()), "user_email", &mut note).required().email());
    assert_eq!(
        note.messages,
        ["user_name is required", "user_email must be a valid email address"]
    );
}

#[test]
fn custom_sink_implementation() {
    let mut note = FirstOnly::default();
    drop(
        NoteAllValidator::valid(Some("!".to_string()), "tag", &mut note)
            .required()
            .alpha_num()
            .min_length(3),
    );
    assert_eq!(note.messages().len(), 1);
    assert!(!note.is_empty());
}
