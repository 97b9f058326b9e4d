//! Unit tests for error classification and display formatting.

use rstest::rstest;
use serde_json::{Value, json};

use super::{StrataError, ValueKind};
use crate::schema::FieldViolation;

#[rstest]
#[case(json!({"a": 1}), ValueKind::Mapping)]
#[case(json!([1, 2]), ValueKind::Sequence)]
#[case(json!("text"), ValueKind::String)]
#[case(json!(7), ValueKind::Number)]
#[case(json!(true), ValueKind::Boolean)]
#[case(Value::Null, ValueKind::Null)]
fn classifies_document_values(#[case] value: Value, #[case] expected: ValueKind) {
    assert_eq!(ValueKind::of(&value), expected);
}

#[rstest]
fn unresolved_property_names_the_reference_and_source() {
    let err = StrataError::unresolved_property(
        "DB_HOST",
        vec![String::from("DB_PORT")],
        "${DB_HOST}",
    );
    let rendered = err.to_string();
    assert!(rendered.contains("DB_HOST"), "missing name: {rendered}");
    assert!(rendered.contains("${DB_HOST}"), "missing source: {rendered}");
}

#[rstest]
fn document_parse_names_the_logical_name_and_source() {
    let cause: Box<dyn std::error::Error + Send + Sync> =
        Box::new(std::io::Error::other("bad syntax"));
    let err = StrataError::document_parse(
        "app-configuration.yaml",
        "conf.d/app-configuration.yaml",
        cause,
    );
    let rendered = err.to_string();
    assert!(rendered.contains("app-configuration.yaml"), "{rendered}");
    assert!(rendered.contains("conf.d/"), "{rendered}");
    assert!(rendered.contains("bad syntax"), "{rendered}");
}

#[rstest]
fn merge_mismatch_renders_both_kinds_and_the_path() {
    let err = StrataError::MergeTypeMismatch {
        path: String::from("web/hosts"),
        existing: ValueKind::Sequence,
        incoming: ValueKind::String,
    };
    assert_eq!(
        err.to_string(),
        "cannot merge string into sequence at 'web/hosts'",
    );
}

#[rstest]
fn configuration_invalid_lists_every_violation() {
    let err = StrataError::configuration_invalid(
        json!({"web": {"port": "positive-integer"}}),
        json!({"web": {"port": "no"}}),
        vec![
            FieldViolation {
                path: String::from("web/port"),
                expected: String::from("positive integer"),
                found: Some(json!("no")),
            },
            FieldViolation {
                path: String::from("db/host"),
                expected: String::from("string"),
                found: None,
            },
        ],
    );
    let rendered = err.to_string();
    assert!(rendered.contains("'web/port': expected positive integer"), "{rendered}");
    assert!(rendered.contains("'db/host': expected string"), "{rendered}");
    assert!(rendered.contains("absent"), "{rendered}");
}
