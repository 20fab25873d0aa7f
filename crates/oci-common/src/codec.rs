//! Attribute codec: hydrate models from wire maps and dehydrate them back.
//!
//! Models are declared with [`oci_model!`](crate::oci_model), which emits the
//! struct, its schema table and a [`Model`] impl. The functions here walk the
//! schema generically, so every model gets the same key mapping, null
//! handling, default application and enum policy.

use serde_json::{Map, Value};
use tracing::warn;

use crate::attr::Attr;
use crate::error::{Error, Result};
use crate::wire::FieldSpec;

/// A schema-described model.
pub trait Model: Default + Sized {
    /// Type name used in errors and logs.
    const TYPE_NAME: &'static str;

    /// Ordered field table.
    fn schema() -> &'static [FieldSpec];

    /// Store a wire value into the field described by `spec`. `None` and
    /// JSON `null` both assign an explicit null. On error the field keeps
    /// its previous state.
    ///
    /// # Errors
    ///
    /// Propagates coercion and enum-policy failures.
    fn assign(&mut self, spec: &FieldSpec, value: Option<Value>) -> Result<()>;

    /// Read the field described by `spec` in wire form.
    fn read(&self, spec: &FieldSpec) -> Attr<Value>;

    /// Check every strict enum field, including nested ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`] naming the first offending field.
    fn validate(&self) -> Result<()>;

    /// Look up a field by local or wire name.
    #[must_use]
    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::schema().iter().find(|spec| spec.matches(name))
    }

    /// Guarded setter: assign a field by local or wire name, applying the
    /// field's enum policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an unknown field name, or the
    /// coercion error for a value of the wrong shape or outside a strict
    /// enum's allowed set.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let spec = Self::field(name).ok_or_else(|| {
            Error::InvalidRequest(format!("{} has no field `{name}`", Self::TYPE_NAME))
        })?;
        self.assign(spec, Some(value.into()))
    }
}

/// Build a model from a wire map.
///
/// Returns `Ok(None)` if `wire` is not a JSON object. Fields whose value has
/// the wrong shape are logged and left unset.
///
/// # Errors
///
/// Returns [`Error::ConflictingKeys`] if a field is supplied under both its
/// wire and local name, and [`Error::InvalidEnumValue`] for an out-of-set
/// value in a strict enum field.
pub fn hydrate<M: Model>(wire: &Value) -> Result<Option<M>> {
    let Value::Object(map) = wire else {
        warn!(model = M::TYPE_NAME, "Expected a JSON object, skipping hydration");
        return Ok(None);
    };

    for spec in M::schema() {
        if spec.wire_name != spec.local_name
            && map.contains_key(spec.wire_name)
            && map.contains_key(spec.local_name)
        {
            return Err(Error::ConflictingKeys {
                model: M::TYPE_NAME.to_string(),
                wire_name: spec.wire_name.to_string(),
                local_name: spec.local_name.to_string(),
            });
        }
    }

    let mut model = M::default();
    for spec in M::schema() {
        let value = match map.get(spec.wire_name).or_else(|| map.get(spec.local_name)) {
            Some(value) => value.clone(),
            None => match spec.default {
                Some(default) => default(),
                None => continue,
            },
        };

        match model.assign(spec, Some(value)) {
            Ok(()) => {}
            Err(Error::MalformedAttribute { message, .. }) => {
                warn!(
                    model = M::TYPE_NAME,
                    field = spec.local_name,
                    %message,
                    "Ignoring malformed attribute"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Some(model))
}

/// Convert a model to its wire map. Unset fields are omitted and null fields
/// are emitted as `null`.
#[must_use]
pub fn dehydrate<M: Model>(model: &M) -> Map<String, Value> {
    let mut out = Map::new();
    for spec in M::schema() {
        match model.read(spec) {
            Attr::Set(value) => {
                out.insert(spec.wire_name.to_string(), value);
            }
            Attr::Null => {
                out.insert(spec.wire_name.to_string(), Value::Null);
            }
            Attr::Unset => {}
        }
    }
    out
}

/// Check a model before it is sent as a request body.
///
/// # Errors
///
/// Returns [`Error::InvalidEnumValue`] if a strict enum field holds an
/// unknown value.
pub fn validate<M: Model>(model: &M) -> Result<()> {
    model.validate()
}

/// Serialize a request body, validating it first.
///
/// # Errors
///
/// See [`validate`].
pub fn to_body<M: Model>(model: &M) -> Result<Value> {
    validate(model)?;
    Ok(Value::Object(dehydrate(model)))
}

/// Declare a model backed by the attribute codec.
///
/// ```
/// oci_common::oci_enum! {
///     /// Bucket tier.
///     pub enum Tier {
///         /// Standard.
///         Standard => "Standard",
///     }
/// }
///
/// oci_common::oci_model! {
///     /// A bucket.
///     pub struct Bucket {
///         /// Bucket name.
///         name: String => "name";
///         /// Storage tier.
///         tier: Tier => "storageTier", policy = tolerant, default = Tier::Standard;
///     }
/// }
///
/// let bucket: Option<Bucket> =
///     oci_common::codec::hydrate(&serde_json::json!({"name": "b1"})).unwrap();
/// assert_eq!(bucket.unwrap().tier.get(), Some(&Tier::Standard));
/// ```
#[macro_export]
macro_rules! oci_model {
    (@policy) => {
        $crate::enum_guard::EnumPolicy::Strict
    };
    (@policy strict) => {
        $crate::enum_guard::EnumPolicy::Strict
    };
    (@policy tolerant) => {
        $crate::enum_guard::EnumPolicy::Tolerant
    };
    (@default $ty:ty) => {
        ::core::option::Option::None
    };
    (@default $ty:ty, $default:expr) => {
        ::core::option::Option::Some({
            fn default_value() -> $crate::__private::serde_json::Value {
                $crate::wire::WireValue::to_wire(&<$ty as ::core::convert::From<_>>::from(
                    $default,
                ))
            }
            default_value as fn() -> $crate::__private::serde_json::Value
        })
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal
                $(, policy = $policy:ident)?
                $(, default = $default:expr)?
            );* $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $crate::attr::Attr<$ty>,
            )*
        }

        impl $name {
            /// Create an instance with declared defaults applied.
            #[must_use]
            pub fn new() -> Self {
                #[allow(unused_mut)]
                let mut model = Self::default();
                $(
                    $(
                        model.$field = $crate::attr::Attr::Set(
                            <$ty as ::core::convert::From<_>>::from($default),
                        );
                    )?
                )*
                model
            }
        }

        impl $crate::codec::Model for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn schema() -> &'static [$crate::wire::FieldSpec] {
                static SCHEMA: &[$crate::wire::FieldSpec] = &[
                    $(
                        $crate::wire::FieldSpec {
                            wire_name: $wire,
                            local_name: stringify!($field),
                            kind: <$ty as $crate::wire::WireValue>::kind,
                            policy: $crate::oci_model!(@policy $($policy)?),
                            default: $crate::oci_model!(@default $ty $(, $default)?),
                        },
                    )*
                ];
                SCHEMA
            }

            fn assign(
                &mut self,
                spec: &$crate::wire::FieldSpec,
                value: ::core::option::Option<$crate::__private::serde_json::Value>,
            ) -> $crate::Result<()> {
                let ctx = spec.context(<Self as $crate::codec::Model>::TYPE_NAME);
                match spec.local_name {
                    $(
                        stringify!($field) => {
                            self.$field = $crate::attr::Attr::from_wire(value, &ctx)?;
                        }
                    )*
                    _ => {}
                }
                ::core::result::Result::Ok(())
            }

            fn read(
                &self,
                spec: &$crate::wire::FieldSpec,
            ) -> $crate::attr::Attr<$crate::__private::serde_json::Value> {
                match spec.local_name {
                    $(stringify!($field) => self.$field.to_wire(),)*
                    _ => $crate::attr::Attr::Unset,
                }
            }

            fn validate(&self) -> $crate::Result<()> {
                $(
                    if let $crate::attr::Attr::Set(value) = &self.$field {
                        $crate::wire::WireValue::validate(
                            value,
                            &$crate::wire::FieldContext {
                                model: <Self as $crate::codec::Model>::TYPE_NAME,
                                field: stringify!($field),
                                policy: $crate::oci_model!(@policy $($policy)?),
                            },
                        )?;
                    }
                )*
                ::core::result::Result::Ok(())
            }
        }

        impl $crate::wire::WireValue for $name {
            fn kind() -> $crate::wire::FieldKind {
                $crate::wire::FieldKind::Model(stringify!($name))
            }

            fn from_wire(
                value: $crate::__private::serde_json::Value,
                ctx: &$crate::wire::FieldContext,
            ) -> $crate::Result<Self> {
                $crate::codec::hydrate::<Self>(&value)?
                    .ok_or_else(|| ctx.malformed(concat!("expected ", stringify!($name), " object")))
            }

            fn to_wire(&self) -> $crate::__private::serde_json::Value {
                $crate::__private::serde_json::Value::Object($crate::codec::dehydrate(self))
            }

            fn validate(&self, _ctx: &$crate::wire::FieldContext) -> $crate::Result<()> {
                <Self as $crate::codec::Model>::validate(self)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::codec::dehydrate(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::Error as _;

                let value = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                $crate::codec::hydrate::<Self>(&value)
                    .map_err(D::Error::custom)?
                    .ok_or_else(|| D::Error::custom(concat!("expected ", stringify!($name), " object")))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enum_guard::WireEnum;
    use crate::wire::{FieldKind, FreeformTags};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    crate::oci_enum! {
        /// Paint colour.
        pub enum Color {
            /// Red.
            Red => "RED",
            /// Blue.
            Blue => "BLUE",
        }
    }

    crate::oci_model! {
        /// Nested part.
        pub struct Part {
            /// Part number.
            part_number: i64 => "partNumber";
            /// Colour, strict.
            color: Color => "color";
        }
    }

    crate::oci_model! {
        /// Widget under test.
        pub struct Widget {
            /// Compartment.
            compartment_id: String => "compartmentId";
            /// Name.
            name: String => "name";
            /// Strict colour.
            color: Color => "color";
            /// Colour reported by the server.
            reported_color: Color => "reportedColor", policy = tolerant;
            /// Flag with a default.
            is_enabled: bool => "isEnabled", default = false;
            /// Nested parts.
            parts: Vec<Part> => "parts";
            /// Primary part.
            primary: Part => "primary";
            /// Tags.
            freeform_tags: FreeformTags => "freeformTags";
            /// Created.
            time_created: chrono::DateTime<Utc> => "timeCreated";
            /// Weight.
            weight: f64 => "weight";
        }
    }

    #[test]
    fn schema_lists_fields_in_order() {
        let names: Vec<_> = Widget::schema().iter().map(|s| s.wire_name).collect();
        assert_eq!(names[0], "compartmentId");
        assert_eq!(names.len(), 10);
        let color = Widget::field("color").unwrap();
        assert_eq!(
            (color.kind)(),
            FieldKind::Enum {
                name: "Color",
                values: &["RED", "BLUE"]
            }
        );
        assert_eq!(
            Widget::field("reported_color").unwrap().policy,
            crate::enum_guard::EnumPolicy::Tolerant
        );
        assert!(Widget::field("isEnabled").unwrap().default.is_some());
    }

    #[test]
    fn hydrate_by_wire_names() {
        let widget: Widget = hydrate(&json!({
            "compartmentId": "ocid1.compartment.oc1..aaa",
            "name": "w1",
            "color": "RED",
            "parts": [{"partNumber": 1, "color": "BLUE"}, null],
            "primary": {"partNumber": 7},
            "freeformTags": {"env": "dev"},
            "timeCreated": "2024-05-01T12:00:00Z",
            "weight": 1.5
        }))
        .unwrap()
        .unwrap();

        assert_eq!(
            widget.compartment_id.get().map(String::as_str),
            Some("ocid1.compartment.oc1..aaa")
        );
        assert_eq!(widget.color, Attr::Set(Color::Red));
        let parts = widget.parts.get().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].part_number, Attr::Set(1));
        assert_eq!(widget.primary.get().unwrap().part_number, Attr::Set(7));
        assert!(widget.primary.get().unwrap().color.is_unset());
        assert_eq!(widget.freeform_tags.get().unwrap()["env"], "dev");
        assert_eq!(
            widget.time_created,
            Attr::Set(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn hydrate_by_local_names() {
        let widget: Widget = hydrate(&json!({
            "compartment_id": "ocid1.compartment.oc1..bbb",
            "is_enabled": true
        }))
        .unwrap()
        .unwrap();

        assert_eq!(
            widget.compartment_id.get().map(String::as_str),
            Some("ocid1.compartment.oc1..bbb")
        );
        assert_eq!(widget.is_enabled, Attr::Set(true));
    }

    #[test]
    fn both_spellings_conflict() {
        let err = hydrate::<Widget>(&json!({
            "compartmentId": "a",
            "compartment_id": "b"
        }))
        .unwrap_err();

        assert_eq!(
            err,
            Error::ConflictingKeys {
                model: "Widget".to_string(),
                wire_name: "compartmentId".to_string(),
                local_name: "compartment_id".to_string(),
            }
        );
    }

    #[test]
    fn default_applies_only_when_absent() {
        let omitted: Widget = hydrate(&json!({"name": "w"})).unwrap().unwrap();
        assert_eq!(omitted.is_enabled, Attr::Set(false));

        let explicit_null: Widget = hydrate(&json!({"isEnabled": null})).unwrap().unwrap();
        assert!(explicit_null.is_enabled.is_null());

        let explicit: Widget = hydrate(&json!({"isEnabled": true})).unwrap().unwrap();
        assert_eq!(explicit.is_enabled, Attr::Set(true));
    }

    #[test]
    fn new_applies_defaults() {
        let widget = Widget::new();
        assert_eq!(widget.is_enabled, Attr::Set(false));
        assert!(widget.name.is_unset());
        assert!(Widget::default().is_enabled.is_unset());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let widget: Widget = hydrate(&json!({"name": "w", "brandNewField": {"x": 1}}))
            .unwrap()
            .unwrap();
        assert_eq!(widget.name.get().map(String::as_str), Some("w"));
    }

    #[test]
    fn non_object_input_yields_none() {
        assert_eq!(hydrate::<Widget>(&json!("text")).unwrap(), None);
        assert_eq!(hydrate::<Widget>(&json!([1, 2])).unwrap(), None);
        assert_eq!(hydrate::<Widget>(&Value::Null).unwrap(), None);
    }

    #[test]
    fn malformed_field_is_left_unset() {
        let widget: Widget = hydrate(&json!({"name": 12, "weight": "heavy", "compartmentId": "c"}))
            .unwrap()
            .unwrap();
        assert!(widget.name.is_unset());
        assert!(widget.weight.is_unset());
        assert_eq!(widget.compartment_id.get().map(String::as_str), Some("c"));
    }

    #[test]
    fn strict_enum_rejects_unknown_value() {
        let err = hydrate::<Widget>(&json!({"color": "GREEN"})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEnumValue { ref field, ref value, .. }
                if field == "color" && value == "GREEN"
        ));

        let err = hydrate::<Widget>(&json!({"parts": [{"color": "GREEN"}]})).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { .. }));
    }

    #[test]
    fn tolerant_enum_degrades_to_unknown() {
        let widget: Widget = hydrate(&json!({"reportedColor": "GREEN"})).unwrap().unwrap();
        let color = widget.reported_color.get().unwrap();
        assert_eq!(color.as_str(), crate::enum_guard::UNKNOWN_ENUM_VALUE);
        assert_eq!(dehydrate(&widget)["reportedColor"], json!("GREEN"));
    }

    #[test]
    fn dehydrate_skips_unset_and_keeps_null() {
        let mut widget = Widget::default();
        widget.name.set("w");
        widget.color.set_null();

        let wire = Value::Object(dehydrate(&widget));
        assert_eq!(wire, json!({"name": "w", "color": null}));
    }

    #[test]
    fn dehydrate_drops_null_array_elements() {
        let mut widget = Widget::default();
        let mut part = Part::default();
        part.part_number.set(3);
        widget.parts.set(vec![part]);

        assert_eq!(
            Value::Object(dehydrate(&widget)),
            json!({"parts": [{"partNumber": 3}]})
        );
    }

    #[test]
    fn round_trip_reproduces_wire_map() {
        let wire = json!({
            "compartmentId": "ocid1.compartment.oc1..ccc",
            "name": "round",
            "color": "BLUE",
            "reportedColor": "PURPLE",
            "isEnabled": true,
            "parts": [{"partNumber": 2, "color": "RED"}],
            "primary": {"partNumber": 9, "color": "BLUE"},
            "freeformTags": {"a": "1", "b": "2"},
            "timeCreated": "2023-11-14T22:13:20.500Z",
            "weight": 2.25,
            "ignored": "value"
        });

        let widget: Widget = hydrate(&wire).unwrap().unwrap();
        let mut expected = wire.as_object().unwrap().clone();
        expected.remove("ignored");
        assert_eq!(dehydrate(&widget), expected);
    }

    #[test]
    fn guarded_setter_applies_policy() {
        let mut widget = Widget::default();
        widget.set("name", "w").unwrap();
        widget.set("reportedColor", "PINK").unwrap();
        assert!(widget.reported_color.get().unwrap().is_unknown());

        let err = widget.set("color", "PINK").unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref field, .. } if field == "color"));
        assert!(widget.color.is_unset());

        let err = widget.set("nope", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        widget.set("color", Value::Null).unwrap();
        assert!(widget.color.is_null());
    }

    #[test]
    fn validate_walks_nested_strict_fields() {
        let mut widget = Widget::default();
        widget.reported_color.set(Color::Unknown("PINK".to_string()));
        assert!(validate(&widget).is_ok());

        let mut part = Part::default();
        part.color.set(Color::Unknown("PINK".to_string()));
        widget.parts.set(vec![part]);
        let err = validate(&widget).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref field, .. } if field == "color"));
        assert!(to_body(&widget).is_err());
    }

    #[test]
    fn serde_goes_through_codec() {
        let widget: Widget =
            serde_json::from_value(json!({"name": "w", "reportedColor": "RED"})).unwrap();
        assert_eq!(widget.reported_color, Attr::Set(Color::Red));
        assert_eq!(widget.is_enabled, Attr::Set(false));

        let out = serde_json::to_value(&widget).unwrap();
        assert_eq!(
            out,
            json!({"name": "w", "reportedColor": "RED", "isEnabled": false})
        );

        assert!(serde_json::from_value::<Widget>(json!("nope")).is_err());
        assert!(serde_json::from_value::<Widget>(json!({"color": "NOPE"})).is_err());
    }
}
