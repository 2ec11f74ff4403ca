//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by runtime parse diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.

use omittable::json::parse::{self, ParseFailureCategory};
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_numeric_errors() {
    let syntax_err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let number_err = parse::from_slice::<Value>(br#"{"n":18446744073709551616}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&number_err),
        ParseFailureCategory::NumericRange
    );
}

#[test]
fn category_mapping_handles_utf8_and_depth_errors() {
    let utf8_err = parse::from_slice::<Value>(&[0xff, b'{', b'}']).unwrap_err();
    assert_eq!(
        parse::categorize_error(&utf8_err),
        ParseFailureCategory::Utf8
    );

    assert_eq!(
        parse::categorize_message("recursion limit exceeded while parsing"),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn category_mapping_handles_shape_messages() {
    assert_eq!(
        parse::categorize_message("invalid type: string \"3\", expected u64"),
        ParseFailureCategory::Shape
    );
    assert_eq!(
        parse::categorize_message("missing field `count`"),
        ParseFailureCategory::Shape
    );
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_slice::<Value>(br#"{"n":18446744073709551616}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: numeric-range"));
    assert!(hint.contains("context: test.context"));

    let err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "stdin");
    assert_eq!(hint, "parse category: syntax; context: stdin");
}

#[test]
fn labels_are_stable() {
    let cases = [
        (ParseFailureCategory::Syntax, "syntax"),
        (ParseFailureCategory::Shape, "shape"),
        (ParseFailureCategory::NumericRange, "numeric-range"),
        (ParseFailureCategory::Utf8, "utf8"),
        (ParseFailureCategory::DepthLimit, "depth-limit"),
        (ParseFailureCategory::Unknown, "unknown"),
    ];
    for (category, label) in cases {
        assert_eq!(category.label(), label);
    }
}

#[test]
fn unknown_category_fallback_is_stable() {
    assert_eq!(
        parse::categorize_message("opaque parser issue"),
        ParseFailureCategory::Unknown
    );
}
