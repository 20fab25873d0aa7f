//! Wire-value coercion and the per-field schema.
//!
//! Every type that can appear in a model field implements [`WireValue`],
//! which converts between a JSON value and the typed field. Models and enums
//! get their impls from the [`oci_model!`](crate::oci_model) and
//! [`oci_enum!`](crate::oci_enum) macros; this module covers primitives,
//! collections and tag values.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::enum_guard::EnumPolicy;
use crate::error::{Error, Result};

/// Declared semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean flag.
    Boolean,
    /// RFC 3339 timestamp.
    Timestamp,
    /// Arbitrary JSON, passed through untouched.
    Any,
    /// Defined tag value (string or nested map).
    Tag,
    /// Closed set of string values.
    Enum {
        /// Enum type name.
        name: &'static str,
        /// Allowed wire values.
        values: &'static [&'static str],
    },
    /// Nested model.
    Model(&'static str),
    /// Array of the inner kind.
    Array(Box<FieldKind>),
    /// String-keyed map of the inner kind.
    Map(Box<FieldKind>),
}

impl FieldKind {
    /// Allowed values if this kind is an enum, or an array/map of enums.
    #[must_use]
    pub fn enum_values(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Enum { values, .. } => Some(values),
            Self::Array(inner) | Self::Map(inner) => inner.enum_values(),
            _ => None,
        }
    }
}

/// One entry of a model's schema table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key on the network boundary.
    pub wire_name: &'static str,
    /// Rust field name.
    pub local_name: &'static str,
    /// Declared type.
    pub kind: fn() -> FieldKind,
    /// Enum policy; ignored for non-enum kinds.
    pub policy: EnumPolicy,
    /// Wire value applied when neither spelling of the key is supplied.
    pub default: Option<fn() -> Value>,
}

impl FieldSpec {
    /// Returns true if `key` is either spelling of this field.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.wire_name == key || self.local_name == key
    }

    /// Coercion context for this field on the given model.
    #[must_use]
    pub const fn context(&self, model: &'static str) -> FieldContext {
        FieldContext {
            model,
            field: self.local_name,
            policy: self.policy,
        }
    }
}

/// Where a value is being coerced, for error messages and enum policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext {
    /// Model type name.
    pub model: &'static str,
    /// Local field name.
    pub field: &'static str,
    /// Enum policy of the field.
    pub policy: EnumPolicy,
}

impl FieldContext {
    /// Build a shape-mismatch error for this field.
    #[must_use]
    pub fn malformed(&self, message: impl Into<String>) -> Error {
        Error::MalformedAttribute {
            model: self.model.to_string(),
            field: self.field.to_string(),
            message: message.into(),
        }
    }
}

/// Conversion between a JSON value and a typed field.
pub trait WireValue: Sized {
    /// Declared semantic type.
    fn kind() -> FieldKind;

    /// Coerce a non-null wire value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAttribute`] on shape mismatch, or
    /// [`Error::InvalidEnumValue`] for strict enum fields.
    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self>;

    /// Produce the wire representation.
    fn to_wire(&self) -> Value;

    /// True when `null` is a value of this type rather than an absence.
    /// Map entries whose value is `null` are kept only for such types.
    fn holds_null() -> bool {
        false
    }

    /// Reject values a strict field must not hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`] for unknown values in strict enum
    /// fields, including inside collections and nested models.
    fn validate(&self, _ctx: &FieldContext) -> Result<()> {
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl WireValue for String {
    fn kind() -> FieldKind {
        FieldKind::String
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ctx.malformed(format!("expected string, got {}", type_name(&other)))),
        }
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireValue for i64 {
    fn kind() -> FieldKind {
        FieldKind::Integer
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| ctx.malformed(format!("expected integer, got {}", type_name(&value))))
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireValue for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| ctx.malformed(format!("expected number, got {}", type_name(&value))))
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireValue for bool {
    fn kind() -> FieldKind {
        FieldKind::Boolean
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| ctx.malformed(format!("expected boolean, got {}", type_name(&value))))
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl WireValue for DateTime<Utc> {
    fn kind() -> FieldKind {
        FieldKind::Timestamp
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        let Value::String(raw) = value else {
            return Err(ctx.malformed(format!(
                "expected RFC 3339 timestamp, got {}",
                type_name(&value)
            )));
        };
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|err| ctx.malformed(format!("invalid timestamp `{raw}`: {err}")))
    }

    fn to_wire(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl WireValue for Value {
    fn kind() -> FieldKind {
        FieldKind::Any
    }

    fn from_wire(value: Value, _ctx: &FieldContext) -> Result<Self> {
        Ok(value)
    }

    fn holds_null() -> bool {
        true
    }

    fn to_wire(&self) -> Value {
        self.clone()
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Array(Box::new(T::kind()))
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(ctx.malformed(format!("expected array, got {}", type_name(&value))));
        };
        items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| T::from_wire(item, ctx))
            .collect()
    }

    fn to_wire(&self) -> Value {
        Value::Array(
            self.iter()
                .map(WireValue::to_wire)
                .filter(|item| !item.is_null())
                .collect(),
        )
    }

    fn validate(&self, ctx: &FieldContext) -> Result<()> {
        self.iter().try_for_each(|item| item.validate(ctx))
    }
}

impl<T: WireValue> WireValue for BTreeMap<String, T> {
    fn kind() -> FieldKind {
        FieldKind::Map(Box::new(T::kind()))
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(ctx.malformed(format!("expected object, got {}", type_name(&value))));
        };
        entries
            .into_iter()
            .filter(|(_, item)| T::holds_null() || !item.is_null())
            .map(|(key, item)| T::from_wire(item, ctx).map(|item| (key, item)))
            .collect()
    }

    fn to_wire(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, item)| (key.clone(), item.to_wire()))
                .collect::<Map<String, Value>>(),
        )
    }

    fn validate(&self, ctx: &FieldContext) -> Result<()> {
        self.values().try_for_each(|item| item.validate(ctx))
    }
}

/// Value stored under a defined-tag key: a string, or a nested map of the
/// same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Plain string value.
    Text(String),
    /// Nested map of tag values.
    Map(BTreeMap<String, TagValue>),
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl WireValue for TagValue {
    fn kind() -> FieldKind {
        FieldKind::Tag
    }

    fn from_wire(value: Value, ctx: &FieldContext) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Text(s)),
            // Numeric and boolean tag values arrive from older tag namespaces.
            Value::Bool(b) => Ok(Self::Text(b.to_string())),
            Value::Number(n) => Ok(Self::Text(n.to_string())),
            Value::Object(_) => BTreeMap::<String, TagValue>::from_wire(value, ctx).map(Self::Map),
            other => Err(ctx.malformed(format!(
                "expected tag string or map, got {}",
                type_name(&other)
            ))),
        }
    }

    fn to_wire(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Map(map) => map.to_wire(),
        }
    }
}

/// Freeform tags: simple string key/value pairs.
pub type FreeformTags = BTreeMap<String, String>;

/// Defined tags: namespace to key to value.
pub type DefinedTags = BTreeMap<String, BTreeMap<String, TagValue>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CTX: FieldContext = FieldContext {
        model: "Test",
        field: "value",
        policy: EnumPolicy::Strict,
    };

    #[test]
    fn primitive_kinds() {
        assert_eq!(String::kind(), FieldKind::String);
        assert_eq!(i64::kind(), FieldKind::Integer);
        assert_eq!(
            Vec::<BTreeMap<String, bool>>::kind(),
            FieldKind::Array(Box::new(FieldKind::Map(Box::new(FieldKind::Boolean))))
        );
    }

    #[test]
    fn string_rejects_numbers() {
        let err = String::from_wire(json!(42), &CTX).unwrap_err();
        assert!(matches!(err, Error::MalformedAttribute { ref field, .. } if field == "value"));
    }

    #[test]
    fn integer_and_float() {
        assert_eq!(i64::from_wire(json!(7), &CTX).unwrap(), 7);
        assert!(i64::from_wire(json!(7.5), &CTX).is_err());
        assert!((f64::from_wire(json!(7), &CTX).unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timestamp_round_trips() {
        let ts = DateTime::<Utc>::from_wire(json!("2024-03-01T10:15:30.250Z"), &CTX).unwrap();
        assert_eq!(ts.to_wire(), json!("2024-03-01T10:15:30.250Z"));

        let ts = DateTime::<Utc>::from_wire(json!("2024-03-01T10:15:30Z"), &CTX).unwrap();
        assert_eq!(ts.to_wire(), json!("2024-03-01T10:15:30Z"));

        assert!(DateTime::<Utc>::from_wire(json!("yesterday"), &CTX).is_err());
    }

    #[test]
    fn arrays_drop_null_elements() {
        let values = Vec::<String>::from_wire(json!(["a", null, "b"]), &CTX).unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);

        let raw = vec![json!(1), Value::Null, json!(2)];
        assert_eq!(raw.to_wire(), json!([1, 2]));
    }

    #[test]
    fn maps_copy_primitives() {
        let tags = FreeformTags::from_wire(json!({"env": "prod", "team": "db"}), &CTX).unwrap();
        assert_eq!(tags.get("env").map(String::as_str), Some("prod"));
        assert_eq!(tags.to_wire(), json!({"env": "prod", "team": "db"}));
    }

    #[test]
    fn untyped_maps_keep_null_entries() {
        let wire = json!({"shape": {"value": "VM.Standard.E4.Flex"}, "subnetId": null});
        let config = BTreeMap::<String, Value>::from_wire(wire.clone(), &CTX).unwrap();
        assert_eq!(config.get("subnetId"), Some(&Value::Null));
        assert_eq!(config.to_wire(), wire);
    }

    #[test]
    fn typed_maps_skip_null_entries() {
        let metadata =
            BTreeMap::<String, String>::from_wire(json!({"owner": "ops", "expiry": null}), &CTX)
                .unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.to_wire(), json!({"owner": "ops"}));
    }

    #[test]
    fn defined_tags_accept_nested_values() {
        let wire = json!({"Operations": {"CostCenter": "42", "Owner": {"name": "ops"}}});
        let tags = DefinedTags::from_wire(wire.clone(), &CTX).unwrap();
        assert_eq!(
            tags["Operations"]["CostCenter"],
            TagValue::Text("42".to_string())
        );
        assert!(matches!(tags["Operations"]["Owner"], TagValue::Map(_)));
        assert_eq!(tags.to_wire(), wire);
    }

    #[test]
    fn field_spec_matches_both_spellings() {
        let spec = FieldSpec {
            wire_name: "compartmentId",
            local_name: "compartment_id",
            kind: String::kind,
            policy: EnumPolicy::Strict,
            default: None,
        };
        assert!(spec.matches("compartmentId"));
        assert!(spec.matches("compartment_id"));
        assert!(!spec.matches("CompartmentId"));
        assert_eq!(spec.context("Bucket").field, "compartment_id");
    }
}
