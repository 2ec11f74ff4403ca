// serde glue for `Omittable<T>`; payload encoding is delegated to `T`.
// Missing keys only become Absent through `#[serde(default)]`: serde hands a
// missing field to `deserialize_option` as none, which reads as Null here.
use crate::core::omittable::Omittable;
use serde::de::{Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T> Serialize for Omittable<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Omittable::Present(value) => serializer.serialize_some(value),
            // A value cannot remove itself from its parent; field-level skipping
            // handles Absent, anything reaching here is written like Null.
            Omittable::Null | Omittable::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Omittable<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OmittableVisitor(PhantomData))
    }
}

struct OmittableVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for OmittableVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Omittable<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a value")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Omittable::Null)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Omittable::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Omittable::Present)
    }
}
