//! HTTP transport and request-signing seams.
//!
//! [`ServiceClient`](crate::client::ServiceClient) never talks to `reqwest`
//! directly; it hands a fully prepared [`HttpRequest`] to a [`Transport`].
//! Tests substitute a mock transport to count attempts.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::client::ClientConfig;
use crate::error::{Error, Result};

/// `opc-request-id` header name.
pub const OPC_REQUEST_ID: &str = "opc-request-id";
/// `opc-retry-token` header name.
pub const OPC_RETRY_TOKEN: &str = "opc-retry-token";
/// `opc-next-page` header name.
pub const OPC_NEXT_PAGE: &str = "opc-next-page";
/// `opc-total-items` header name.
pub const OPC_TOTAL_ITEMS: &str = "opc-total-items";
/// `if-match` header name.
pub const IF_MATCH: &str = "if-match";
/// `if-none-match` header name.
pub const IF_NONE_MATCH: &str = "if-none-match";
/// `etag` header name.
pub const ETAG: &str = "etag";

/// One attempt's worth of HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query string
    pub url: Url,
    /// Final request headers
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Raw HTTP response as returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

impl HttpResponse {
    /// Header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON; an empty body is `null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| self.deserialization_error(e.to_string()))
    }

    /// Build a deserialization error carrying this response's body.
    #[must_use]
    pub fn deserialization_error(&self, message: impl Into<String>) -> Error {
        Error::Deserialization {
            status: self.status.as_u16(),
            message: message.into(),
            raw_response: self.body.clone(),
        }
    }

    /// Convert a non-success response into a service error.
    #[must_use]
    pub fn into_error(self) -> Error {
        let opc_request_id = self.header(OPC_REQUEST_ID).map(str::to_string);
        Error::from_service_response(self.status.as_u16(), &self.body, opc_request_id)
    }
}

/// Sends a single HTTP request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns network, timeout or connection errors only; non-success
    /// statuses are returned as responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Signs each attempt after its headers are final.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Add authentication headers to `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be signed; the call fails
    /// without being sent.
    fn sign(&self, request: &mut HttpRequest) -> Result<()>;
}

/// Signer that leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigner;

impl RequestSigner for NoSigner {
    fn sign(&self, _request: &mut HttpRequest) -> Result<()> {
        Ok(())
    }
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from client configuration, optionally trusting an
    /// extra PEM-encoded root certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the CA certificate is invalid or the
    /// underlying client cannot be built.
    pub fn new(config: &ClientConfig, ca_cert_pem: Option<&[u8]>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression)
            .danger_accept_invalid_certs(!config.tls_verify);

        if let Some(pem) = ca_cert_pem {
            let cert = reqwest::Certificate::from_pem(pem)
                .map_err(|e| Error::ConfigError(format!("Invalid CA certificate: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
