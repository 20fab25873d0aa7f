//! Query string assembly for operations.
//!
//! Optional filters are only sent when the caller sets them; the service
//! treats an empty `lifecycleState=` differently from an absent one.

use std::fmt::Display;
use url::Url;

use crate::enum_guard::{EnumGuard, WireEnum};
use crate::error::Result;

/// Ordered query parameters for one operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter that is always sent.
    pub fn push<T: Display>(&mut self, key: &'static str, value: T) {
        self.pairs.push((key, value.to_string()));
    }

    /// Add a parameter only when `value` is `Some`. Enum filters go through
    /// [`Self::push_enum`] instead.
    pub fn push_opt<T: Display>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Add an enum filter when `value` is `Some`, under the strict policy.
    ///
    /// An `Unknown` value, for instance a lifecycle state read back from a
    /// response, is rejected unless its raw text is one of the known values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`](crate::Error::InvalidEnumValue)
    /// naming `key` when the value is outside the allowed set.
    pub fn push_enum<E: WireEnum>(&mut self, key: &'static str, value: Option<&E>) -> Result<()> {
        if let Some(value) = value {
            EnumGuard::check(key, value.as_wire(), E::VARIANTS)?;
            self.push(key, value.as_wire());
        }
        Ok(())
    }

    /// Comma-joined enum list, every element checked as in [`Self::push_enum`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`](crate::Error::InvalidEnumValue)
    /// for the first element outside the allowed set.
    pub fn push_enum_list<E: WireEnum>(&mut self, key: &'static str, values: &[E]) -> Result<()> {
        let wire = values
            .iter()
            .map(|value| EnumGuard::check(key, value.as_wire(), E::VARIANTS).map(|()| value.as_wire()))
            .collect::<Result<Vec<_>>>()?;
        self.push_list(key, &wire);
        Ok(())
    }

    /// Add a multi-valued parameter as a comma-separated list. Nothing is
    /// sent for an empty slice.
    pub fn push_list<T: Display>(&mut self, key: &'static str, values: &[T]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((key, joined));
    }

    /// Parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// True when no parameter has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encode the parameters onto `url`. A URL is left without a
    /// `?` when there is nothing to add.
    pub fn append_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut serializer = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;
    use crate::error::Error;
    use crate::types::SortOrder;
    use url::Url;

    #[test]
    fn unset_filters_are_not_sent() {
        let mut params = QueryParams::new();
        params.push_opt("displayName", Option::<String>::None);
        params.push_opt("limit", Option::<u32>::None);
        assert!(params.is_empty());

        let mut url = Url::parse("https://example.com/20180917/stacks").unwrap();
        params.append_to(&mut url);
        assert_eq!(url.as_str(), "https://example.com/20180917/stacks");
    }

    #[test]
    fn enums_render_as_wire_values() {
        let mut params = QueryParams::new();
        params.push_opt("sortOrder", Some(SortOrder::Desc));
        params.push("compartmentId", "ocid1.compartment.oc1..x");
        assert_eq!(
            params.pairs(),
            &[
                ("sortOrder", "DESC".to_string()),
                ("compartmentId", "ocid1.compartment.oc1..x".to_string())
            ]
        );
    }

    #[test]
    fn lists_join_with_commas() {
        let mut params = QueryParams::new();
        params.push_list("fields", &["name", "approximateCount"]);
        params.push_list::<&str>("lifecycleState", &[]);
        assert_eq!(
            params.pairs(),
            &[("fields", "name,approximateCount".to_string())]
        );
    }

    #[test]
    fn append_to_encodes_values() {
        let mut params = QueryParams::new();
        params.push("name", "a b&c");
        params.push("limit", 10);

        let mut url = Url::parse("https://example.com/n/ns/b/").unwrap();
        params.append_to(&mut url);
        assert_eq!(url.query(), Some("name=a+b%26c&limit=10"));
    }

    #[test]
    fn enum_filters_use_wire_values() {
        let mut params = QueryParams::new();
        params.push_enum("sortOrder", Some(&SortOrder::Asc)).unwrap();
        params.push_enum::<SortOrder>("lifecycleState", None).unwrap();
        params
            .push_enum_list("sortOrder", &[SortOrder::Asc, SortOrder::Desc])
            .unwrap();
        assert_eq!(
            params.pairs(),
            &[
                ("sortOrder", "ASC".to_string()),
                ("sortOrder", "ASC,DESC".to_string())
            ]
        );
    }

    #[test]
    fn unknown_enum_filter_is_rejected() {
        let mut params = QueryParams::new();
        let err = params
            .push_enum("sortOrder", Some(&SortOrder::Unknown("SIDEWAYS".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref field, ref value, .. }
            if field == "sortOrder" && value == "SIDEWAYS"));

        let err = params
            .push_enum_list("sortOrder", &[SortOrder::Asc, SortOrder::Unknown("UP".to_string())])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref value, .. } if value == "UP"));
        assert!(params.is_empty());
    }

    #[test]
    fn unknown_holding_a_known_value_is_sent() {
        let mut params = QueryParams::new();
        params
            .push_enum("sortOrder", Some(&SortOrder::Unknown("DESC".to_string())))
            .unwrap();
        assert_eq!(params.pairs(), &[("sortOrder", "DESC".to_string())]);
    }
}
