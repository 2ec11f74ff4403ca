//! Purpose: Concrete field writers/readers for the serde and JSON object models.
//! Exports: `MapFieldWriter`; `FieldWriter`/`FieldReader` impls for `serde_json::Map`.
//! Role: Plugs the codec adapter into serde_json trees and streaming `SerializeMap`s.
//! Invariants: JSON object errors carry the field name and the serde_json cause.
//! Invariants: Reading never clones the stored token; it is deserialized by reference.

use crate::core::codec::{FieldPresence, FieldReader, FieldWriter};
use crate::core::error::{Error, ErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde_json::{Map, Value};

impl FieldWriter for Map<String, Value> {
    type Error = Error;

    fn write_value<T>(&mut self, name: &str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        let encoded = serde_json::to_value(value).map_err(|err| {
            Error::new(ErrorKind::Encode)
                .with_message("failed to encode field value")
                .with_field(name)
                .with_source(err)
        })?;
        self.insert(name.to_string(), encoded);
        Ok(())
    }

    fn write_null(&mut self, name: &str) -> Result<(), Error> {
        self.insert(name.to_string(), Value::Null);
        Ok(())
    }
}

impl FieldReader for Map<String, Value> {
    type Error = Error;

    fn presence(&self, name: &str) -> FieldPresence {
        match self.get(name) {
            None => FieldPresence::Missing,
            Some(Value::Null) => FieldPresence::Null,
            Some(_) => FieldPresence::Value,
        }
    }

    fn read_value<T>(&self, name: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let token = self.get(name).ok_or_else(|| {
            Error::new(ErrorKind::Internal)
                .with_message("field value requested for a missing field")
                .with_field(name)
        })?;
        T::deserialize(token).map_err(|err| {
            tracing::debug!(field = name, error = %err, "field value failed to decode");
            Error::new(ErrorKind::Decode)
                .with_message("field value does not match the expected type")
                .with_field(name)
                .with_source(err)
        })
    }
}

/// Lets hand-written `Serialize` impls route omittable fields through
/// `encode_field` while streaming into a `SerializeMap`.
pub struct MapFieldWriter<'a, M> {
    map: &'a mut M,
}

impl<'a, M> MapFieldWriter<'a, M>
where
    M: SerializeMap,
{
    pub fn new(map: &'a mut M) -> Self {
        Self { map }
    }
}

impl<M> FieldWriter for MapFieldWriter<'_, M>
where
    M: SerializeMap,
{
    type Error = M::Error;

    fn write_value<T>(&mut self, name: &str, value: &T) -> Result<(), M::Error>
    where
        T: ?Sized + Serialize,
    {
        self.map.serialize_entry(name, value)
    }

    fn write_null(&mut self, name: &str) -> Result<(), M::Error> {
        self.map.serialize_entry(name, &())
    }
}
