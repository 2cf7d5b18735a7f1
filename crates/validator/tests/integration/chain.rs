//! Integration test: chain semantics through the entry points

use fieldnote_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn text(value: Option<&str>) -> Option<String> {
    value.map(str::to_owned)
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn optional_without_rules_records_nothing(#[case] value: Option<&str>) {
    let mut note = FieldNote::new();
    drop(NoteFirstValidator::valid(text(value), "nickname", &mut note).optional());
    drop(NoteAllValidator::valid(text(value), "nickname", &mut note).optional());
    assert!(note.is_empty());
}

#[test]
fn optional_null_skips_rules() {
    let mut note = FieldNote::new();
    drop(NoteAllValidator::valid(None::<String>, "nickname", &mut note).optional().email());
    assert!(note.is_empty());
}

#[rstest]
#[case(None, 1)]
#[case(Some(""), 1)]
#[case(Some("   "), 1)]
#[case(Some("bob"), 0)]
#[case(Some(" bob "), 0)]
fn must_not_be_blank(#[case] value: Option<&str>, #[case] messages: usize) {
    let mut note = FlatNote::new();
    drop(NoteAllValidator::valid(text(value), "name", &mut note).must_not_be_blank());
    assert_eq!(note.len(), messages);
}

#[rstest]
#[case(None, 1)]
#[case(Some(""), 1)]
#[case(Some("\t"), 1)]
#[case(Some("x"), 0)]
fn required(#[case] value: Option<&str>, #[case] messages: usize) {
    let mut note = FlatNote::new();
    drop(NoteFirstValidator::valid(text(value), "name", &mut note).required());
    assert_eq!(note.len(), messages);
}

#[test]
fn note_first_records_one_failure() {
    let mut note = FieldNote::new();
    drop(
        NoteFirstValidator::valid(Some("15abc".to_string()), "age", &mut note)
            .required()
            .is_integer()
            .min(18),
    );
    assert_eq!(note.field("age"), Some(&["age must be an integer".to_string()][..]));
}

#[test]
fn note_all_records_every_ordinary_failure() {
    let mut note = FieldNote::new();
    drop(
        NoteAllValidator::valid(Some("15abc".to_string()), "age", &mut note)
            .required()
            .is_integer()
            .min(18),
    );
    assert_eq!(
        note.field("age"),
        Some(
            &[
                "age must be an integer".to_string(),
                "age must be at least 18".to_string()
            ][..]
        )
    );
}

#[test]
fn fatal_rule_stops_note_all() {
    let mut note = FlatNote::new();
    let chain = NoteAllValidator::valid(Some("abc".to_string()), "code", &mut note)
        .required()
        .must_fatally(|s| s.len() > 5, "code is too short")
        .must(|_| false, "never recorded");
    assert!(chain.is_stopped());
    drop(chain);
    assert_eq!(note.as_slice(), ["code is too short"]);
}

#[test]
fn failed_precondition_stops_note_all() {
    let mut note = FlatNote::new();
    drop(
        NoteAllValidator::valid(None::<String>, "code", &mut note)
            .required()
            .digit()
            .length(2, 4),
    );
    assert_eq!(note.as_slice(), ["code is required"]);
}

#[test]
fn placeholder_message_uses_normalized_field_name() {
    let mut note = FieldNote::with_placeholder("{field}");
    drop(
        NoteFirstValidator::valid(None::<String>, "user_name", &mut note)
            .required_with("{field} is required"),
    );
    assert_eq!(
        note.field("user_name"),
        Some(&["User name is required".to_string()][..])
    );
}

#[test]
fn convert_then_typed_rules() {
    let mut note = FieldNote::new();
    let chain = NoteAllValidator::valid(Some("42".to_string()), "age", &mut note)
        .required()
        .must_convert(|s| s.parse::<i64>(), "age must be a number")
        .min(18)
        .between(18, 40);
    assert_eq!(chain.value(), Some(&42));
    assert_eq!(chain.failures(), ["age must be between 18 and 40"]);
}

#[test]
fn convert_failure_stops_note_all() {
    let mut note = FlatNote::new();
    let chain = NoteAllValidator::valid(Some("forty".to_string()), "age", &mut note)
        .required()
        .must_convert(|s| s.parse::<i64>(), "age must be a number")
        .min(18);
    assert!(chain.is_stopped());
    drop(chain);
    assert_eq!(note.as_slice(), ["age must be a number"]);
}

#[test]
fn validate_when_skips_whole_chain() {
    let mut note = FlatNote::new();
    let chain = NoteAllValidator::valid(None::<String>, "vat", &mut note)
        .validate_when(false)
        .required()
        .alpha_num();
    assert!(chain.is_ignored());
    drop(chain);
    assert!(note.as_slice().is_empty());
}

#[test]
fn when_adds_conditional_rules() {
    let country = "DE";
    let mut note = FlatNote::new();
    drop(
        NoteAllValidator::valid(Some("1234".to_string()), "zip", &mut note)
            .required()
            .when(country == "DE", [then(|s: &String| s.len() == 5, "German zip codes have 5 digits")])
            .when(country == "US", [then(|_: &String| false, "unused")]),
    );
    assert_eq!(note.as_slice(), ["German zip codes have 5 digits"]);
}

#[test]
fn detached_chain_returns_outcome() {
    let outcome = NoteAllValidator::valid_detached(Some("not-an-email".to_string()))
        .required()
        .email()
        .min_length(100)
        .finish();
    assert_eq!(outcome, Validated::Invalid(vec!["Value must be a valid email address".to_string()]));

    let error = NoteFirstValidator::valid_detached(None::<String>)
        .required()
        .into_result()
        .unwrap_err();
    assert_eq!(error.to_string(), "Validation error: Value is required");
}

#[test]
fn sequential_chains_share_a_sink() {
    let mut note = FieldNote::new();
    drop(
        NoteAllValidator::valid(Some("x".to_string()), "password", &mut note)
            .required()
            .password_simple(),
    );
    drop(NoteAllValidator::valid(Some(3_i32), "age", &mut note).must_not_be_null().min(18));
    drop(NoteAllValidator::valid(Some("ok".to_string()), "name", &mut note).required());

    let fields: Vec<_> = note.fields().keys().map(String::as_str).collect();
    assert_eq!(fields, ["password", "age"]);
    assert_eq!(note.len(), 2);
}
