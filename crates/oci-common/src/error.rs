//! Error types for OCI operations.
//!
//! One error enum covers the whole SDK. Caller mistakes (missing parameters,
//! conflicting attribute keys, invalid enum values) are raised before any
//! network call; transport and service failures carry enough detail for the
//! retry layer to classify them.

use serde::Deserialize;
use thiserror::Error;

/// Service error code the server uses for optimistic-locking conflicts that
/// clear up on their own.
pub const INCORRECT_STATE_CODE: &str = "IncorrectState";

/// Main error type for OCI operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value outside the allowed set was assigned to a strict enum field.
    #[error("Invalid value `{value}` for `{field}`, must be one of: {}", .allowed.join(", "))]
    InvalidEnumValue {
        /// Local name of the field (or the enum type name for plain parsing)
        field: String,
        /// The rejected value
        value: String,
        /// The values the field accepts
        allowed: Vec<String>,
    },

    /// Both spellings of a field were supplied when constructing a model.
    #[error("Cannot specify both `{wire_name}` and `{local_name}` for {model}")]
    ConflictingKeys {
        /// Model type name
        model: String,
        /// Wire (camelCase) key
        wire_name: String,
        /// Local (snake_case) key
        local_name: String,
    },

    /// A required operation parameter was not supplied.
    #[error("Missing the required parameter `{0}`")]
    MissingParameter(String),

    /// A required operation parameter was supplied but empty.
    #[error("Parameter `{0}` cannot be empty or whitespace")]
    BlankParameter(String),

    /// A model attribute value did not match the declared shape.
    #[error("Malformed attribute `{field}` on {model}: {message}")]
    MalformedAttribute {
        /// Model type name
        model: String,
        /// Local name of the field
        field: String,
        /// What was wrong with the value
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Service error {status} {code}: {message}")]
    ServiceError {
        /// HTTP status code
        status: u16,
        /// Service error code (e.g. `NotAuthorizedOrNotFound`)
        code: String,
        /// Human-readable message
        message: String,
        /// Request id echoed by the service, for support tickets
        opc_request_id: Option<String>,
    },

    /// The service is unreachable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Network-level failure below HTTP.
    #[error("Network error: {0}")]
    Network(String),

    /// The transport timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// A response body could not be turned into the expected model.
    #[error("Failed to deserialize response (status {status}): {message}")]
    Deserialization {
        /// HTTP status code of the response
        status: u16,
        /// Parser or codec message
        message: String,
        /// Raw response body
        raw_response: String,
    },

    /// A request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for OCI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by OCI services on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceErrorBody {
    /// Service error code.
    #[serde(default)]
    pub code: String,
    /// Service error message.
    #[serde(default)]
    pub message: String,
}

impl Error {
    /// Returns true for errors the caller caused; these are raised before
    /// any network traffic and never retried.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEnumValue { .. }
                | Self::ConflictingKeys { .. }
                | Self::MissingParameter(_)
                | Self::BlankParameter(_)
                | Self::InvalidRequest(_)
                | Self::ValidationError(_)
                | Self::Serialization(_)
        )
    }

    /// Returns true if the failure is transient and the call may be retried.
    ///
    /// Network errors, timeouts, throttling (429), server errors other than
    /// 501, and `409 IncorrectState` conflicts are retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable(_) => true,
            Self::ServiceError { status, code, .. } => match *status {
                409 => code == INCORRECT_STATE_CODE,
                429 => true,
                501 => false,
                s => s >= 500,
            },
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } | Self::Deserialization { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Request id echoed by the service, if any.
    #[must_use]
    pub fn opc_request_id(&self) -> Option<&str> {
        match self {
            Self::ServiceError { opc_request_id, .. } => opc_request_id.as_deref(),
            _ => None,
        }
    }

    /// Build a service error from a non-success response body.
    ///
    /// Bodies that are not the standard `{code, message}` JSON become the
    /// message verbatim.
    #[must_use]
    pub fn from_service_response(status: u16, body: &str, opc_request_id: Option<String>) -> Self {
        let parsed = serde_json::from_str::<ServiceErrorBody>(body).unwrap_or_default();
        let message = if parsed.message.is_empty() {
            body.to_string()
        } else {
            parsed.message
        };
        Self::ServiceError {
            status,
            code: parsed.code,
            message,
            opc_request_id,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error(status: u16, code: &str) -> Error {
        Error::ServiceError {
            status,
            code: code.to_string(),
            message: "boom".to_string(),
            opc_request_id: None,
        }
    }

    #[test]
    fn test_invalid_enum_display_names_field_and_allowed_set() {
        let err = Error::InvalidEnumValue {
            field: "public_access_type".to_string(),
            value: "NotARealValue".to_string(),
            allowed: vec!["NoPublicAccess".to_string(), "ObjectRead".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid value `NotARealValue` for `public_access_type`, must be one of: NoPublicAccess, ObjectRead"
        );
    }

    #[test]
    fn test_retry_classification() {
        assert!(service_error(500, "InternalServerError").is_retryable());
        assert!(service_error(503, "ServiceUnavailable").is_retryable());
        assert!(service_error(429, "TooManyRequests").is_retryable());
        assert!(service_error(409, INCORRECT_STATE_CODE).is_retryable());
        assert!(!service_error(409, "Conflict").is_retryable());
        assert!(!service_error(501, "NotImplemented").is_retryable());
        assert!(!service_error(400, "InvalidParameter").is_retryable());
        assert!(!service_error(404, "NotAuthorizedOrNotFound").is_retryable());
        assert!(Error::Timeout("slow".to_string()).is_retryable());
        assert!(Error::Network("reset".to_string()).is_retryable());
        assert!(!Error::MissingParameter("bucket_name".to_string()).is_retryable());
    }

    #[test]
    fn test_caller_errors() {
        assert!(Error::MissingParameter("a".to_string()).is_caller_error());
        assert!(Error::BlankParameter("a".to_string()).is_caller_error());
        assert!(!Error::Timeout("a".to_string()).is_caller_error());
    }

    #[test]
    fn test_from_service_response_parses_body() {
        let err = Error::from_service_response(
            404,
            r#"{"code":"BucketNotFound","message":"Either the bucket does not exist or you are not authorized"}"#,
            Some("req-1".to_string()),
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.opc_request_id(), Some("req-1"));
        match err {
            Error::ServiceError { code, message, .. } => {
                assert_eq!(code, "BucketNotFound");
                assert!(message.starts_with("Either the bucket"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_from_service_response_plain_text() {
        let err = Error::from_service_response(502, "bad gateway", None);
        match err {
            Error::ServiceError { code, message, .. } => {
                assert!(code.is_empty());
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let oci_err: Error = err.into();
        assert!(matches!(oci_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let oci_err: Error = err.into();
        assert!(matches!(oci_err, Error::Serialization(_)));
    }
}
