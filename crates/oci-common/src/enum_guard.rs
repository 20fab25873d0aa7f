//! Strict and tolerant enum validation.
//!
//! Request payloads built by the caller use the strict policy so typos fail
//! before anything is sent. Response payloads use the tolerant policy so a
//! value added on the server side degrades to the `Unknown` variant instead
//! of breaking an older client.

use tracing::warn;

use crate::error::{Error, Result};

/// Sentinel string reported by the `Unknown` variant of every enum.
pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";

/// How a field reacts to a value outside its allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumPolicy {
    /// Reject with [`Error::InvalidEnumValue`].
    #[default]
    Strict,
    /// Substitute the `Unknown` variant and log a warning.
    Tolerant,
}

/// A closed set of wire strings plus an `Unknown` fallback.
pub trait WireEnum: Sized {
    /// Enum type name, used when no field name is available.
    const TYPE_NAME: &'static str;

    /// Allowed wire values.
    const VARIANTS: &'static [&'static str];

    /// Map a wire value to a known variant.
    fn from_known(raw: &str) -> Option<Self>;

    /// Wrap a value this SDK version does not know.
    fn unknown(raw: String) -> Self;

    /// Wire value; for `Unknown` this is the raw value as received.
    fn as_wire(&self) -> &str;

    /// Returns true for the `Unknown` variant.
    fn is_unknown(&self) -> bool;
}

/// Applies an [`EnumPolicy`] to incoming values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumGuard;

impl EnumGuard {
    /// Admit `raw` into enum `E` for `field` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`] when the value is outside the
    /// allowed set and the policy is strict.
    pub fn admit<E: WireEnum>(field: &str, raw: &str, policy: EnumPolicy) -> Result<E> {
        if let Some(value) = E::from_known(raw) {
            return Ok(value);
        }
        match policy {
            EnumPolicy::Strict => Err(Self::rejection(field, raw, E::VARIANTS)),
            EnumPolicy::Tolerant => {
                warn!(
                    field,
                    value = raw,
                    enum_type = E::TYPE_NAME,
                    "Unknown enum value received, substituting {UNKNOWN_ENUM_VALUE}"
                );
                Ok(E::unknown(raw.to_string()))
            }
        }
    }

    /// Check a raw value against an allowed set under the strict policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`] when `raw` is not in `allowed`.
    pub fn check(field: &str, raw: &str, allowed: &[&str]) -> Result<()> {
        if allowed.contains(&raw) {
            Ok(())
        } else {
            Err(Self::rejection(field, raw, allowed))
        }
    }

    fn rejection(field: &str, raw: &str, allowed: &[&str]) -> Error {
        Error::InvalidEnumValue {
            field: field.to_string(),
            value: raw.to_string(),
            allowed: allowed.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

/// Declare a wire enum with an `Unknown(String)` fallback variant.
///
/// The generated type implements [`WireEnum`], [`WireValue`](crate::wire::WireValue),
/// `Display` (the sentinel for unknown values), strict `FromStr`, and serde
/// `Serialize`/`Deserialize` (tolerant).
#[macro_export]
macro_rules! oci_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Value not known to this SDK version; holds the raw wire value.
            Unknown(::std::string::String),
        }

        impl $name {
            /// Wire value, or the unknown sentinel for unrecognised values.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown(_) => $crate::enum_guard::UNKNOWN_ENUM_VALUE,
                }
            }
        }

        impl $crate::enum_guard::WireEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [&'static str] = &[$($wire),+];

            fn from_known(raw: &str) -> ::core::option::Option<Self> {
                match raw {
                    $($wire => ::core::option::Option::Some(Self::$variant),)+
                    _ => ::core::option::Option::None,
                }
            }

            fn unknown(raw: ::std::string::String) -> Self {
                Self::Unknown(raw)
            }

            fn as_wire(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::enum_guard::EnumGuard::admit::<Self>(
                    stringify!($name),
                    s,
                    $crate::enum_guard::EnumPolicy::Strict,
                )
            }
        }

        impl $crate::wire::WireValue for $name {
            fn kind() -> $crate::wire::FieldKind {
                $crate::wire::FieldKind::Enum {
                    name: stringify!($name),
                    values: <Self as $crate::enum_guard::WireEnum>::VARIANTS,
                }
            }

            fn from_wire(
                value: $crate::__private::serde_json::Value,
                ctx: &$crate::wire::FieldContext,
            ) -> $crate::Result<Self> {
                match value {
                    $crate::__private::serde_json::Value::String(raw) => {
                        $crate::enum_guard::EnumGuard::admit::<Self>(ctx.field, &raw, ctx.policy)
                    }
                    other => ::core::result::Result::Err(
                        ctx.malformed(format!("expected enum string, got {other}")),
                    ),
                }
            }

            fn to_wire(&self) -> $crate::__private::serde_json::Value {
                $crate::__private::serde_json::Value::String(
                    <Self as $crate::enum_guard::WireEnum>::as_wire(self).to_string(),
                )
            }

            fn validate(&self, ctx: &$crate::wire::FieldContext) -> $crate::Result<()> {
                match self {
                    Self::Unknown(raw) if ctx.policy == $crate::enum_guard::EnumPolicy::Strict => {
                        $crate::enum_guard::EnumGuard::check(
                            ctx.field,
                            raw,
                            <Self as $crate::enum_guard::WireEnum>::VARIANTS,
                        )
                    }
                    _ => ::core::result::Result::Ok(()),
                }
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(<Self as $crate::enum_guard::WireEnum>::as_wire(self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                ::core::result::Result::Ok(
                    <Self as $crate::enum_guard::WireEnum>::from_known(&raw)
                        .unwrap_or(Self::Unknown(raw)),
                )
            }
        }
    };
}
