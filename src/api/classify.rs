//! Purpose: Report the three-state status of fields in a decoded JSON object.
//! Exports: `FieldStatus`, `ExpectedType`, `classify_fields`, `check_field`, `classification_json`.
//! Role: Shared contract for the CLI `classify`/`check` commands and API users.
//! Invariants: Requested names keep their order; unrequested keys are never reported.
//! Invariants: With no names requested every key is reported (never as absent).

use crate::core::codec::decode_field;
use crate::core::error::Error;
use crate::core::omittable::{Omittable, OmittableState};
use serde_json::{Map, Value, json};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldStatus {
    pub name: String,
    pub state: OmittableState,
}

pub fn classify_fields(
    object: &Map<String, Value>,
    names: &[String],
) -> Result<Vec<FieldStatus>, Error> {
    let owned_keys: Vec<String>;
    let names = if names.is_empty() {
        owned_keys = object.keys().cloned().collect();
        owned_keys.as_slice()
    } else {
        names
    };

    let mut statuses = Vec::with_capacity(names.len());
    for name in names {
        let value: Omittable<Value> = decode_field(object, name)?;
        statuses.push(FieldStatus {
            name: name.clone(),
            state: value.state(),
        });
    }
    Ok(statuses)
}

/// Payload types the `check` path can decode a present field as.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpectedType {
    String,
    Integer,
    Number,
    Bool,
    Array,
    Object,
}

impl ExpectedType {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "string" => Some(ExpectedType::String),
            "integer" | "int" => Some(ExpectedType::Integer),
            "number" => Some(ExpectedType::Number),
            "bool" | "boolean" => Some(ExpectedType::Bool),
            "array" => Some(ExpectedType::Array),
            "object" => Some(ExpectedType::Object),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Integer => "integer",
            ExpectedType::Number => "number",
            ExpectedType::Bool => "bool",
            ExpectedType::Array => "array",
            ExpectedType::Object => "object",
        }
    }
}

/// Decodes `name` as `expected`; a present value of the wrong type is a Decode error.
pub fn check_field(
    object: &Map<String, Value>,
    name: &str,
    expected: ExpectedType,
) -> Result<FieldStatus, Error> {
    let state = match expected {
        ExpectedType::String => decode_field::<String, _>(object, name).map(|v| v.state()),
        ExpectedType::Integer => decode_field::<i64, _>(object, name).map(|v| v.state()),
        ExpectedType::Number => decode_field::<f64, _>(object, name).map(|v| v.state()),
        ExpectedType::Bool => decode_field::<bool, _>(object, name).map(|v| v.state()),
        ExpectedType::Array => decode_field::<Vec<Value>, _>(object, name).map(|v| v.state()),
        ExpectedType::Object => {
            decode_field::<Map<String, Value>, _>(object, name).map(|v| v.state())
        }
    }
    .map_err(|err| {
        if err.hint().is_some() {
            return err;
        }
        let hint = format!("Expected `{name}` to be {} or null.", expected.label());
        err.with_hint(hint)
    })?;

    Ok(FieldStatus {
        name: name.to_string(),
        state,
    })
}

pub fn classification_json(statuses: &[FieldStatus]) -> Value {
    let mut fields = Map::new();
    for status in statuses {
        fields.insert(status.name.clone(), json!(status.state.label()));
    }
    json!({ "fields": Value::Object(fields) })
}

#[cfg(test)]
mod tests {
    use super::{ExpectedType, FieldStatus, check_field, classification_json, classify_fields};
    use crate::core::error::ErrorKind;
    use crate::core::omittable::OmittableState;
    use serde_json::{Value, json};

    #[test]
    fn classify_requested_names() {
        let value = json!({"name": "x", "nullable": null});
        let object = value.as_object().expect("object");
        let names = vec![
            "nullable".to_string(),
            "count".to_string(),
            "name".to_string(),
        ];

        let statuses = classify_fields(object, &names).expect("classify");
        let states: Vec<OmittableState> = statuses.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                OmittableState::Null,
                OmittableState::Absent,
                OmittableState::Present
            ]
        );
    }

    #[test]
    fn classify_all_keys_when_none_requested() {
        let value = json!({"a": 1, "b": null});
        let statuses = classify_fields(value.as_object().expect("object"), &[]).expect("classify");
        assert_eq!(statuses.len(), 2);
        assert!(statuses.iter().all(|s| s.state != OmittableState::Absent));
    }

    #[test]
    fn check_field_decodes_typed_payloads() {
        let value = json!({"count": 3, "ratio": 2, "label": null});
        let object = value.as_object().expect("object");

        let count = check_field(object, "count", ExpectedType::Integer).expect("count");
        assert_eq!(count.state, OmittableState::Present);
        let ratio = check_field(object, "ratio", ExpectedType::Number).expect("ratio");
        assert_eq!(ratio.state, OmittableState::Present);
        let label = check_field(object, "label", ExpectedType::String).expect("label");
        assert_eq!(label.state, OmittableState::Null);
        let missing = check_field(object, "other", ExpectedType::Bool).expect("other");
        assert_eq!(missing.state, OmittableState::Absent);
    }

    #[test]
    fn check_field_rejects_mismatch() {
        let value = json!({"count": "three"});
        let err = check_field(value.as_object().expect("object"), "count", ExpectedType::Integer)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.hint(), Some("Expected `count` to be integer or null."));
    }

    #[test]
    fn expected_type_parse_accepts_aliases() {
        assert_eq!(ExpectedType::parse("int"), Some(ExpectedType::Integer));
        assert_eq!(ExpectedType::parse("boolean"), Some(ExpectedType::Bool));
        assert_eq!(ExpectedType::parse("float"), None);
    }

    #[test]
    fn classification_json_shape() {
        let statuses = vec![FieldStatus {
            name: "count".to_string(),
            state: OmittableState::Absent,
        }];
        let value: Value = classification_json(&statuses);
        assert_eq!(value, json!({"fields": {"count": "absent"}}));
    }
}
