// Three-state changes applied to JSON objects.
// A patch key that is missing leaves the target alone, `null` deletes, anything else replaces.
// Nested objects merge recursively; a non-object patch replaces the target outright.
use crate::core::codec::decode_field;
use crate::core::error::Error;
use crate::core::omittable::Omittable;
use serde_json::{Map, Value};

pub fn apply_field(object: &mut Map<String, Value>, name: &str, change: Omittable<Value>) {
    match change {
        Omittable::Absent => {}
        Omittable::Null | Omittable::Present(Value::Null) => {
            object.remove(name);
        }
        Omittable::Present(value) => {
            object.insert(name.to_string(), value);
        }
    }
}

pub fn merge_patch(target: &mut Value, patch: &Value) -> Result<(), Error> {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return Ok(());
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_map) = target else {
        return Ok(());
    };

    for name in patch_map.keys() {
        let change: Omittable<Value> = decode_field(patch_map, name)?;
        match change {
            Omittable::Present(nested @ Value::Object(_)) => {
                let slot = target_map.entry(name.clone()).or_insert(Value::Null);
                merge_patch(slot, &nested)?;
            }
            other => apply_field(target_map, name, other),
        }
    }
    Ok(())
}
