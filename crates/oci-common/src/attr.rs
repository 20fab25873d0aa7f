//! Tri-state storage for model attributes.
//!
//! The wire format distinguishes a key that was never sent from a key sent
//! as `null`, so model fields cannot be plain `Option`s.

use serde_json::Value;

use crate::error::Result;
use crate::wire::{FieldContext, WireValue};

/// A model attribute: never assigned, explicitly null, or holding a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attr<T> {
    /// Never assigned; omitted when serialized.
    Unset,
    /// Explicitly assigned null; serialized as `null`.
    Null,
    /// Assigned a value.
    Set(T),
}

impl<T> Default for Attr<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Attr<T> {
    /// Returns true if a value is present.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Returns true if the attribute was explicitly assigned null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the attribute was never assigned.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Borrow the value, if present.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Mutably borrow the value, if present.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Take the value out, collapsing `Unset` and `Null` to `None`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Build from an option, mapping `None` to an explicit null.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Set)
    }

    /// Assign a value.
    pub fn set(&mut self, value: impl Into<T>) {
        *self = Self::Set(value.into());
    }

    /// Assign an explicit null.
    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    /// Map the contained value, preserving `Unset`/`Null`.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Attr<U> {
        match self {
            Self::Unset => Attr::Unset,
            Self::Null => Attr::Null,
            Self::Set(value) => Attr::Set(f(value)),
        }
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: WireValue> Attr<T> {
    /// Coerce an incoming wire value; `None` and JSON `null` both mean an
    /// explicit null.
    ///
    /// # Errors
    ///
    /// Propagates coercion failures from the field's [`WireValue`] impl.
    pub fn from_wire(value: Option<Value>, ctx: &FieldContext) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::Null),
            Some(value) => T::from_wire(value, ctx).map(Self::Set),
        }
    }

    /// Convert to the wire representation, preserving `Unset`/`Null`.
    #[must_use]
    pub fn to_wire(&self) -> Attr<Value> {
        match self {
            Self::Unset => Attr::Unset,
            Self::Null => Attr::Null,
            Self::Set(value) => Attr::Set(value.to_wire()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enum_guard::EnumPolicy;
    use serde_json::json;

    const CTX: FieldContext = FieldContext {
        model: "Test",
        field: "name",
        policy: EnumPolicy::Strict,
    };

    #[test]
    fn default_is_unset() {
        let attr: Attr<String> = Attr::default();
        assert!(attr.is_unset());
        assert!(attr.get().is_none());
    }

    #[test]
    fn from_option_maps_none_to_null() {
        assert_eq!(Attr::<u8>::from_option(None), Attr::Null);
        assert_eq!(Attr::from_option(Some(3u8)), Attr::Set(3));
    }

    #[test]
    fn set_and_null() {
        let mut attr: Attr<String> = Attr::Unset;
        attr.set("bucket1");
        assert_eq!(attr.get().map(String::as_str), Some("bucket1"));
        attr.set_null();
        assert!(attr.is_null());
        assert_eq!(attr.into_option(), None);
    }

    #[test]
    fn from_wire_null_is_explicit_null() {
        let attr = Attr::<String>::from_wire(Some(Value::Null), &CTX).unwrap();
        assert!(attr.is_null());
        let attr = Attr::<String>::from_wire(None, &CTX).unwrap();
        assert!(attr.is_null());
    }

    #[test]
    fn to_wire_preserves_state() {
        assert_eq!(Attr::<String>::Unset.to_wire(), Attr::Unset);
        assert_eq!(Attr::<String>::Null.to_wire(), Attr::Null);
        assert_eq!(
            Attr::Set("x".to_string()).to_wire(),
            Attr::Set(json!("x"))
        );
    }

    #[test]
    fn map_keeps_null() {
        let attr: Attr<u32> = Attr::Null;
        assert_eq!(attr.map(|v| v + 1), Attr::Null);
        assert_eq!(Attr::Set(1u32).map(|v| v + 1), Attr::Set(2));
    }
}
