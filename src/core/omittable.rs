//! Purpose: Define the three-state `Omittable<T>` container.
//! Exports: `Omittable`, `OmittableState`.
//! Role: Value type shared by the serde impls, the field codec, and patch helpers.
//! Invariants: Exactly one of Absent/Null/Present holds; `Default` is Absent.
//! Invariants: Absent and Null never collapse into each other in any conversion.

/// An optional value that also remembers whether it was omitted.
///
/// `Absent` means the field is not there at all, `Null` means it is there and
/// explicitly `null`, and `Present` carries a value.
///
/// A payload that itself encodes to `null` (`Present(Value::Null)`,
/// `Present(None)` for an `Option` payload) is written exactly like `Null` and
/// reads back as `Null`; the wire has no fourth state to tell them apart.
///
/// Flattening (`#[serde(flatten)]`) is supported for serialization only: a
/// Present value contributes its fields, Absent and Null contribute none.
/// Decoding a flattened `Omittable` is rejected by serde.
///
/// Register a struct field explicitly so a missing key decodes to `Absent` and an
/// absent value is left out of the output:
///
/// ```
/// use omittable::api::Omittable;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Patch {
///     #[serde(default, skip_serializing_if = "Omittable::is_absent")]
///     count: Omittable<u32>,
/// }
///
/// let patch: Patch = serde_json::from_str("{}").unwrap();
/// assert!(patch.count.is_absent());
/// assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Omittable<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OmittableState {
    Absent,
    Null,
    Present,
}

impl OmittableState {
    pub fn label(self) -> &'static str {
        match self {
            OmittableState::Absent => "absent",
            OmittableState::Null => "null",
            OmittableState::Present => "present",
        }
    }
}

impl<T> Omittable<T> {
    /// Builds a defined value from a nullable one: `None` becomes `Null`.
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Omittable::Present(value),
            None => Omittable::Null,
        }
    }

    pub fn state(&self) -> OmittableState {
        match self {
            Omittable::Absent => OmittableState::Absent,
            Omittable::Null => OmittableState::Null,
            Omittable::Present(_) => OmittableState::Present,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Omittable::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Omittable::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Omittable::Present(_))
    }

    /// True for Null and Present, i.e. whenever the field would be written.
    pub fn is_defined(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_ref(&self) -> Omittable<&T> {
        match self {
            Omittable::Absent => Omittable::Absent,
            Omittable::Null => Omittable::Null,
            Omittable::Present(value) => Omittable::Present(value),
        }
    }

    pub fn as_mut(&mut self) -> Omittable<&mut T> {
        match self {
            Omittable::Absent => Omittable::Absent,
            Omittable::Null => Omittable::Null,
            Omittable::Present(value) => Omittable::Present(value),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Omittable::Present(value) => Some(value),
            Omittable::Absent | Omittable::Null => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Omittable::Present(value) => Some(value),
            Omittable::Absent | Omittable::Null => None,
        }
    }

    /// `None` for Absent, `Some(None)` for Null, `Some(Some(v))` for Present.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Omittable::Absent => None,
            Omittable::Null => Some(None),
            Omittable::Present(value) => Some(Some(value)),
        }
    }

    pub fn map<U, F>(self, f: F) -> Omittable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Omittable::Absent => Omittable::Absent,
            Omittable::Null => Omittable::Null,
            Omittable::Present(value) => Omittable::Present(f(value)),
        }
    }

    /// Returns `self` unless it is Absent, in which case `other` is returned.
    pub fn or(self, other: Omittable<T>) -> Omittable<T> {
        match self {
            Omittable::Absent => other,
            defined => defined,
        }
    }

    /// Applies this value as a change: Absent keeps `current`, Null clears it,
    /// Present replaces it.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Omittable::Absent => current,
            Omittable::Null => None,
            Omittable::Present(value) => Some(value),
        }
    }

    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Omittable::Absent => {}
            Omittable::Null => *target = None,
            Omittable::Present(value) => *target = Some(value),
        }
    }
}

impl<T> From<Option<Option<T>>> for Omittable<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Omittable::Absent,
            Some(inner) => Omittable::from_nullable(inner),
        }
    }
}

impl<T> From<Omittable<T>> for Option<Option<T>> {
    fn from(value: Omittable<T>) -> Self {
        value.into_nullable()
    }
}

#[cfg(test)]
mod tests {
    use super::{Omittable, OmittableState};

    #[test]
    fn default_is_absent() {
        let value: Omittable<u8> = Omittable::default();
        assert!(value.is_absent());
        assert!(!value.is_defined());
    }

    #[test]
    fn nested_option_conversions_keep_three_states() {
        assert_eq!(Omittable::<u8>::from(None), Omittable::Absent);
        assert_eq!(Omittable::<u8>::from(Some(None)), Omittable::Null);
        assert_eq!(Omittable::from(Some(Some(7u8))), Omittable::Present(7));

        let back: Option<Option<u8>> = Omittable::Null.into();
        assert_eq!(back, Some(None));
        assert_eq!(Omittable::<u8>::Absent.into_nullable(), None);
    }

    #[test]
    fn from_nullable_never_yields_absent() {
        assert_eq!(Omittable::<u8>::from_nullable(None), Omittable::Null);
        assert_eq!(Omittable::from_nullable(Some(1u8)), Omittable::Present(1));
    }

    #[test]
    fn state_labels() {
        assert_eq!(Omittable::<u8>::Absent.state(), OmittableState::Absent);
        assert_eq!(Omittable::<u8>::Null.state().label(), "null");
        assert_eq!(Omittable::Present(1u8).state().label(), "present");
    }

    #[test]
    fn map_and_or_preserve_state() {
        assert_eq!(Omittable::Present(2).map(|v| v * 10), Omittable::Present(20));
        assert_eq!(Omittable::<i32>::Null.map(|v| v * 10), Omittable::Null);
        assert_eq!(
            Omittable::<i32>::Absent.or(Omittable::Null),
            Omittable::Null
        );
        assert_eq!(
            Omittable::Null.or(Omittable::Present(3)),
            Omittable::Null
        );
    }

    #[test]
    fn as_mut_updates_in_place() {
        let mut value = Omittable::Present(String::from("a"));
        if let Omittable::Present(inner) = value.as_mut() {
            inner.push('b');
        }
        assert_eq!(value.value().map(String::as_str), Some("ab"));
    }

    #[test]
    fn apply_to_follows_patch_semantics() {
        let mut target = Some(5);
        Omittable::Absent.apply_to(&mut target);
        assert_eq!(target, Some(5));
        Omittable::Present(9).apply_to(&mut target);
        assert_eq!(target, Some(9));
        Omittable::Null.apply_to(&mut target);
        assert_eq!(target, None);

        assert_eq!(Omittable::Absent.resolve(Some(1)), Some(1));
        assert_eq!(Omittable::<i32>::Null.resolve(Some(1)), None);
        assert_eq!(Omittable::Present(2).resolve(None), Some(2));
    }
}
