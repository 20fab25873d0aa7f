//! Typed operation responses.

use http::HeaderMap;
use serde_json::Value;

use crate::codec::{self, Model};
use crate::error::Result;
use crate::transport::{HttpResponse, ETAG, OPC_NEXT_PAGE, OPC_REQUEST_ID, OPC_TOTAL_ITEMS};

/// Response of one operation: the decoded body plus the headers callers
/// routinely need.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// All response headers
    pub headers: HeaderMap,
    /// `opc-request-id`
    pub opc_request_id: Option<String>,
    /// `etag`
    pub etag: Option<String>,
    /// `opc-next-page`; absent on the last page
    pub opc_next_page: Option<String>,
    /// `opc-total-items`
    pub opc_total_items: Option<u64>,
    /// Decoded body
    pub data: T,
}

impl<T> OperationResponse<T> {
    /// Wrap `data` with the metadata of `response`.
    #[must_use]
    pub fn new(response: &HttpResponse, data: T) -> Self {
        Self {
            status: response.status.as_u16(),
            headers: response.headers.clone(),
            opc_request_id: response.header(OPC_REQUEST_ID).map(str::to_string),
            etag: response.header(ETAG).map(str::to_string),
            opc_next_page: response
                .header(OPC_NEXT_PAGE)
                .filter(|page| !page.is_empty())
                .map(str::to_string),
            opc_total_items: response
                .header(OPC_TOTAL_ITEMS)
                .and_then(|total| total.parse().ok()),
            data,
        }
    }

    /// Transform the body, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> OperationResponse<U> {
        OperationResponse {
            status: self.status,
            headers: self.headers,
            opc_request_id: self.opc_request_id,
            etag: self.etag,
            opc_next_page: self.opc_next_page,
            opc_total_items: self.opc_total_items,
            data: f(self.data),
        }
    }
}

/// Response with no body.
#[must_use]
pub fn decode_empty(response: &HttpResponse) -> OperationResponse<()> {
    OperationResponse::new(response, ())
}

/// Decode a single model body.
///
/// # Errors
///
/// Returns a deserialization error if the body is not a JSON object, or a
/// codec error (for example a strict enum violation) from hydration.
pub fn decode_model<M: Model>(response: &HttpResponse) -> Result<OperationResponse<M>> {
    let body = response.json()?;
    let model = codec::hydrate::<M>(&body)?.ok_or_else(|| {
        response.deserialization_error(format!("expected {} object", M::TYPE_NAME))
    })?;
    Ok(OperationResponse::new(response, model))
}

/// Decode an array body of models. Elements that are not objects are
/// skipped.
///
/// # Errors
///
/// Returns a deserialization error if the body is not a JSON array.
pub fn decode_list<M: Model>(response: &HttpResponse) -> Result<OperationResponse<Vec<M>>> {
    let Value::Array(items) = response.json()? else {
        return Err(response.deserialization_error(format!(
            "expected array of {}",
            M::TYPE_NAME
        )));
    };

    let mut models = Vec::with_capacity(items.len());
    for item in &items {
        if let Some(model) = codec::hydrate::<M>(item)? {
            models.push(model);
        }
    }
    Ok(OperationResponse::new(response, models))
}

/// Decode a JSON string body, as returned by the namespace lookup.
///
/// # Errors
///
/// Returns a deserialization error if the body is not a JSON string.
pub fn decode_string(response: &HttpResponse) -> Result<OperationResponse<String>> {
    match response.json()? {
        Value::String(s) => Ok(OperationResponse::new(response, s)),
        _ => Err(response.deserialization_error("expected a JSON string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::error::Error;
    use http::{HeaderValue, StatusCode};

    crate::oci_model! {
        /// Item.
        pub struct Item {
            /// Id.
            id: String => "id";
        }
    }

    fn response(body: &str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(OPC_REQUEST_ID, HeaderValue::from_static("req-9"));
        headers.insert(ETAG, HeaderValue::from_static("etag-1"));
        headers.insert(OPC_NEXT_PAGE, HeaderValue::from_static("page-2"));
        headers.insert(OPC_TOTAL_ITEMS, HeaderValue::from_static("42"));
        HttpResponse {
            status: StatusCode::OK,
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_metadata_headers() {
        let decoded = decode_empty(&response(""));
        assert_eq!(decoded.status, 200);
        assert_eq!(decoded.opc_request_id.as_deref(), Some("req-9"));
        assert_eq!(decoded.etag.as_deref(), Some("etag-1"));
        assert_eq!(decoded.opc_next_page.as_deref(), Some("page-2"));
        assert_eq!(decoded.opc_total_items, Some(42));
    }

    #[test]
    fn test_decode_model() {
        let decoded = decode_model::<Item>(&response(r#"{"id":"a"}"#)).unwrap();
        assert_eq!(decoded.data.id, Attr::Set("a".to_string()));
    }

    #[test]
    fn test_decode_model_rejects_non_object() {
        let err = decode_model::<Item>(&response("[1]")).unwrap_err();
        assert!(matches!(err, Error::Deserialization { status: 200, .. }));
    }

    #[test]
    fn test_decode_list() {
        let decoded = decode_list::<Item>(&response(r#"[{"id":"a"},"junk",{"id":"b"}]"#)).unwrap();
        let ids: Vec<_> = decoded
            .data
            .iter()
            .filter_map(|item| item.id.get().cloned())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(decode_list::<Item>(&response(r#"{"items":[]}"#)).is_err());
    }

    #[test]
    fn test_decode_string_and_map() {
        let decoded = decode_string(&response(r#""axaxnpcrorw5""#)).unwrap();
        assert_eq!(decoded.data, "axaxnpcrorw5");
        let mapped = decoded.map(|ns| ns.len());
        assert_eq!(mapped.data, 12);
        assert_eq!(mapped.opc_request_id.as_deref(), Some("req-9"));
    }
}
