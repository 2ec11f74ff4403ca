//! Purpose: Translate between `Omittable<T>` and a host object's named fields.
//! Exports: `FieldWriter`, `FieldReader`, `FieldPresence`, `encode_field`,
//! `decode_field`, `serialize_struct_field`.
//! Role: The codec adapter; payload work is delegated to `T`'s serde impls.
//! Invariants: Absent never triggers a writer call; a missing field decodes to Absent.
//! Invariants: Payload errors propagate unchanged; no state is substituted on failure.

use crate::core::omittable::Omittable;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;

/// What a reader finds under a field name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    Missing,
    Null,
    Value,
}

/// Emits named fields into an object being encoded.
pub trait FieldWriter {
    type Error;

    fn write_value<T>(&mut self, name: &str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize;

    fn write_null(&mut self, name: &str) -> Result<(), Self::Error>;
}

/// Inspects named fields of an object being decoded.
pub trait FieldReader {
    type Error;

    fn presence(&self, name: &str) -> FieldPresence;

    /// Decodes the token stored under `name`. Only called for `FieldPresence::Value`.
    fn read_value<T>(&self, name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned;
}

/// Writes `value` under `name`: nothing for Absent, a null for Null, and the
/// payload for Present. A Present payload that encodes to null is
/// indistinguishable from Null once written.
pub fn encode_field<T, W>(value: &Omittable<T>, name: &str, writer: &mut W) -> Result<(), W::Error>
where
    T: Serialize,
    W: FieldWriter,
{
    tracing::trace!(field = name, state = value.state().label(), "encode omittable field");
    match value {
        Omittable::Absent => Ok(()),
        Omittable::Null => writer.write_null(name),
        Omittable::Present(inner) => writer.write_value(name, inner),
    }
}

pub fn decode_field<T, R>(reader: &R, name: &str) -> Result<Omittable<T>, R::Error>
where
    T: DeserializeOwned,
    R: FieldReader,
{
    let decoded = match reader.presence(name) {
        FieldPresence::Missing => Omittable::Absent,
        FieldPresence::Null => Omittable::Null,
        FieldPresence::Value => Omittable::Present(reader.read_value(name)?),
    };
    tracing::trace!(field = name, state = decoded.state().label(), "decode omittable field");
    Ok(decoded)
}

/// Writes one struct field from a hand-written `Serialize` impl, skipping it
/// entirely when the value is Absent.
pub fn serialize_struct_field<S, T>(
    state: &mut S,
    name: &'static str,
    value: &Omittable<T>,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: Serialize,
{
    match value {
        Omittable::Absent => state.skip_field(name),
        Omittable::Null => state.serialize_field(name, &Option::<&T>::None),
        Omittable::Present(inner) => state.serialize_field(name, inner),
    }
}
