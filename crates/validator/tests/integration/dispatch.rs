//! Integration test: validators built from rule text

use std::collections::HashMap;

use fieldnote_validator::dispatch::ArgKind;
use fieldnote_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn parsed_rules_keep_declaration_order() {
    let specs = parse_rules("required, isInteger, length;2;12");
    let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["required", "isInteger", "length"]);
    assert_eq!(specs[2].args.as_slice(), [RuleArg::int(2), RuleArg::int(12)]);
}

#[test]
fn length_within_bounds_records_only_integer_failure() {
    let validator = Validator::<String>::parse("required, isInteger, length;2;12").expect("parses");
    for all in [false, true] {
        let mut note = FlatNote::new();
        let value = Some("abcdefghijk".to_string());
        drop(if all {
            validator.check_all(value, "code", &mut note)
        } else {
            validator.check(value, "code", &mut note)
        });
        assert_eq!(note.as_slice(), ["code must be an integer"]);
    }
}

#[test]
fn note_all_order_follows_rule_text() {
    let validator = Validator::<String>::parse("required, maxLength;2, digit, hasLetter").expect("parses");
    let mut note = FlatNote::new();
    drop(validator.check_all(Some("a-b".to_string()), "code", &mut note));
    assert_eq!(
        note.as_slice(),
        ["code must be at most 2 characters long", "code must contain only digits"]
    );
}

#[rstest]
#[case("inArray;1;2;3", "2", true)]
#[case("inArray;1;2;3", "4", false)]
#[case("inArray;red;green", "green", true)]
#[case("notInArray;admin;root", "root", false)]
#[case("separateBy;,;1;2", "a,b", true)]
#[case("separateBy;,;1;2", "a,b,c", false)]
#[case("separateByInArray;,;red;blue;end", "red,blue", true)]
#[case("separateByInArray;,;red;blue;end", "red,end", false)]
#[case("min;2.5", "2.6", true)]
#[case("max;10", "11", false)]
#[case("passwordSimple;4;8", "abc12", true)]
#[case("regex;[a-z]+\\d", "abc1", true)]
fn special_shapes(#[case] rules: &str, #[case] value: &str, #[case] valid: bool) {
    let validator = Validator::<String>::parse(&format!("required, {rules}")).expect("parses");
    assert!(validator.unresolved().is_empty(), "{rules} should resolve");
    assert_eq!(validator.check_detached(Some(value.to_string())).is_valid(), valid);
}

#[rstest]
#[case("startWith;007", "007abc", None)]
#[case("startWith;007", "7abc", Some("Value must start with 007"))]
#[case("endWith;.50", "x.50", None)]
#[case("endWith;.50", "x0.5", Some("Value must end with .50"))]
#[case("hasChar;1.0", "v1.0", None)]
#[case("inArray;a;07", "07", None)]
#[case("inArray;a;07", "7", Some("Value must be one of the allowed values"))]
fn text_rules_use_arguments_as_written(#[case] rules: &str, #[case] value: &str, #[case] failure: Option<&str>) {
    let validator = Validator::<String>::parse(&format!("required, {rules}")).expect("parses");
    assert_eq!(validator.rules()[0].spec().descriptor(), rules);
    let outcome = validator.check_detached(Some(value.to_string()));
    assert_eq!(outcome.messages().first().map(String::as_str), failure);
}

#[cfg(feature = "network")]
#[rstest]
#[case("url", "https://example.com/a", true)]
#[case("url", "ftp://example.com", false)]
#[case("url;ftp", "ftp://example.com", true)]
fn url_shapes(#[case] rules: &str, #[case] value: &str, #[case] valid: bool) {
    let validator = Validator::<String>::parse(rules).expect("parses");
    assert_eq!(validator.check_detached(Some(value.to_string())).is_valid(), valid);
}

#[cfg(feature = "temporal")]
#[test]
fn temporal_rules_from_text() {
    let validator =
        Validator::<String>::parse("required, dateFormat, dateAfter;2024-01-01, dateBefore;2025-01-01")
            .expect("parses");
    assert!(validator.check_detached(Some("2024-06-15".into())).is_valid());
    assert_eq!(
        validator.check_detached(Some("2023-06-15".into())).messages(),
        ["Value must be after 2024-01-01"]
    );
}

#[cfg(feature = "temporal")]
#[test]
fn date_time_precision_rules_from_text() {
    let validator = Validator::<String>::parse(
        "required, dateTimeAfterMonth;2024-01-31 23:59:59, dateTimeEqWeek;2024-02-05 08:00:00, \
         dateTimeBeforeYear;2025-01-01 00:00:00",
    )
    .expect("parses");
    assert!(validator.unresolved().is_empty());
    assert!(validator.check_detached(Some("2024-02-11 18:00:00".into())).is_valid());

    let mut note = FlatNote::new();
    drop(validator.check_all(Some("2024-01-31 00:00:00".into()), "start", &mut note));
    assert_eq!(
        note.as_slice(),
        [
            "start must be in a month after 2024-01-31 23:59:59",
            "start must be in the same week as 2024-02-05 08:00:00",
        ]
    );
}

#[test]
fn unknown_rules_are_skipped_or_rejected() {
    let validator = Validator::<String>::parse("required, shout, email").expect("parses");
    assert_eq!(
        validator.unresolved(),
        [DispatchError::UnknownRule { name: "shout".into() }]
    );
    let mut note = FlatNote::new();
    drop(validator.check(Some("nope".into()), "email", &mut note));
    assert_eq!(note.as_slice(), ["email must be a valid email address"]);

    let config = ValidatorConfig::new().with_unresolved(UnresolvedRules::Reject);
    let err = Validator::<String>::from_config("required, length;x;y", &config).unwrap_err();
    assert_eq!(
        err,
        RuleError::Dispatch(DispatchError::SignatureMismatch {
            name: "length".into(),
            args: vec![ArgKind::Str, ArgKind::Str],
        })
    );
}

#[test]
fn config_from_json() {
    let config: ValidatorConfig =
        serde_json::from_str(r#"{ "rule_delimiter": " | ", "arg_delimiter": ":" }"#).expect("config");
    let validator = Validator::<String>::from_config("requiredLoose | minLength:3", &config).expect("parses");
    assert_eq!(validator.precondition(), Precondition::RequiredLoose);
    assert!(validator.check_detached(Some("abcd".into())).is_valid());
}

#[test]
fn custom_registry_for_own_type() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Celsius(f64);

    let mut registry = RuleRegistry::<Celsius>::new();
    registry.register("above", Signature::Fixed(&[ArgKind::Double]), |chain, args| {
        let min = args.double(0);
        chain.must_rule(move |c| c.0 > min, None, &format!("min;{min}"))
    });

    let validator = Validator::with_registry(&registry, parse_rules("above;4"), UnresolvedRules::Reject)
        .expect("resolves");
    let chain = NoteAllValidator::valid_detached(Some(Celsius(3.5))).must_not_be_null();
    let outcome = validator.apply_rules(chain).finish();
    assert_eq!(outcome.messages(), ["Value must be at least 4"]);
}

#[test]
fn map_input_uses_field_names() {
    let validator = Validator::<String>::parse("required, alphaNum, length;3;16").expect("parses");
    let input = HashMap::from([
        ("login".to_string(), "ab".to_string()),
        ("nick".to_string(), "good_name".to_string()),
    ]);
    let mut note = FieldNote::new();
    for field in ["login", "nick", "email"] {
        drop(validator.check_all_map(&input, field, &mut note));
    }
    assert_eq!(
        note.to_json(),
        serde_json::json!({
            "login": ["login must be between 3 and 16 characters long"],
            "nick": ["nick must contain only letters and digits"],
            "email": ["email is required"],
        })
    );
}

#[test]
fn integer_validators() {
    let validator = Validator::<i32>::parse("required, min;1, max;5, notInArray;3").expect("parses");
    let mut note = FlatNote::new();
    drop(validator.check_all(Some(3), "rating", &mut note));
    drop(validator.check_all(Some(9), "rating", &mut note));
    assert_eq!(
        note.as_slice(),
        [
            "rating must not be one of the disallowed values",
            "rating must be at most 5",
        ]
    );
}
