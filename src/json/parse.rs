//! Purpose: Provide the runtime JSON decode entrypoints and failure categories.
//! Exports: `from_str`, `from_slice`, `ParseFailureCategory`, `categorize_error`,
//! `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes simd-json usage details.
//! Invariants: Input buffers are copied once to satisfy simd-json mutable-slice API.
//! Invariants: Hints name the category and caller context, never the payload.
//! Notes: Error mapping to crate errors is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, simd_json::Error> {
    from_slice(input.as_bytes())
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, simd_json::Error> {
    let mut bytes = input.to_vec();
    simd_json::serde::from_slice(&mut bytes)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    /// Well-formed JSON whose shape does not fit the requested type.
    Shape,
    NumericRange,
    Utf8,
    DepthLimit,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Shape => "shape",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub fn categorize_error(err: &simd_json::Error) -> ParseFailureCategory {
    categorize_message(&err.to_string())
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let message = message.to_ascii_lowercase();

    // Order matters: serde shape errors also contain "expected".
    if contains_any(&message, &["utf8", "utf-8"]) {
        ParseFailureCategory::Utf8
    } else if contains_any(&message, &["recursion", "depth"]) {
        ParseFailureCategory::DepthLimit
    } else if contains_any(
        &message,
        &[
            "invalid type",
            "invalid value",
            "invalid length",
            "missing field",
            "unknown field",
        ],
    ) {
        ParseFailureCategory::Shape
    } else if contains_any(&message, &["number", "overflow", "out of range"]) {
        ParseFailureCategory::NumericRange
    } else if contains_any(
        &message,
        &["eof", "expected", "unexpected", "syntax", "trailing", "character"],
    ) {
        ParseFailureCategory::Syntax
    } else {
        ParseFailureCategory::Unknown
    }
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| message.contains(needle))
}

pub fn hint_for_error(err: &simd_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}
