//! HTTP client configuration and the retrying service client.
//!
//! Every service crate wraps a [`ServiceClient`]. A call is described by an
//! [`OperationRequest`] and executed by [`ServiceClient::invoke`], which
//! resolves the retry policy, injects the idempotency token once and loops
//! over the [`Transport`] until success, a terminal error, or exhaustion.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::codec::{self, Model};
use crate::config::OciClientConfig;
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::retry::{RetryOnRetryable, RetryOverride, RetryPolicy, RetryPredicate};
use crate::transport::{
    HttpRequest, HttpResponse, NoSigner, ReqwestTransport, RequestSigner, Transport,
    OPC_RETRY_TOKEN,
};
use crate::types::OciService;

/// Object Storage request timeout, in seconds.
pub const OBJECT_STORAGE_DEFAULT_TIMEOUT: u64 = 60;

/// Database Management request timeout, in seconds.
pub const DATABASE_MANAGEMENT_DEFAULT_TIMEOUT: u64 = 30;

/// Stack Monitoring request timeout, in seconds.
pub const STACK_MONITORING_DEFAULT_TIMEOUT: u64 = 30;

/// Application Migration request timeout, in seconds.
pub const APPLICATION_MIGRATION_DEFAULT_TIMEOUT: u64 = 30;

/// Resource Manager request timeout, in seconds.
pub const RESOURCE_MANAGER_DEFAULT_TIMEOUT: u64 = 30;

/// Subscription billing request timeout, in seconds.
pub const OSUB_SUBSCRIPTION_DEFAULT_TIMEOUT: u64 = 20;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_CONNECTION_TTL: Duration = Duration::from_secs(90);
const IDLE_CONNECTIONS_PER_HOST: usize = 10;

const APPLICATION_JSON: &str = "application/json";

/// Transport settings shared by every call a client makes.
///
/// No retry policy is set by default, so each call makes one attempt unless
/// a policy is configured here or passed on the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
    /// Client-wide retry policy.
    pub retry_policy: Option<RetryPolicy>,
    /// How long an idle pooled connection is kept.
    pub pool_idle_timeout: Duration,
    /// Idle pooled connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// Emit `debug!` per attempt and `info!` per response.
    pub enable_logging: bool,
    /// Accept gzip-encoded responses.
    pub enable_compression: bool,
    /// Verify server certificates.
    pub tls_verify: bool,
}

impl ClientConfig {
    /// 30s timeout, no retries, pooled gzip connections with TLS checks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: CONNECT_TIMEOUT,
            retry_policy: None,
            pool_idle_timeout: IDLE_CONNECTION_TTL,
            pool_max_idle_per_host: IDLE_CONNECTIONS_PER_HOST,
            enable_logging: true,
            enable_compression: true,
            tls_verify: true,
        }
    }

    /// Replace the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Retry every call under `policy` unless the call overrides it.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Drop the client-wide retry policy.
    #[must_use]
    pub const fn without_retries(mut self) -> Self {
        self.retry_policy = None;
        self
    }

    /// Size the idle connection pool.
    #[must_use]
    pub const fn with_connection_pool(mut self, idle_timeout: Duration, max_idle: usize) -> Self {
        self.pool_idle_timeout = idle_timeout;
        self.pool_max_idle_per_host = max_idle;
        self
    }

    /// Turn per-attempt and per-response events on or off.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Turn gzip response decoding on or off.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Turn certificate verification on or off.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One logical REST call, ready for [`ServiceClient::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// HTTP method
    pub method: Method,
    /// Resolved path, relative to the service's versioned base URL
    pub path: String,
    /// Query parameters
    pub query: QueryParams,
    /// Per-call headers
    pub headers: HeaderMap,
    /// JSON body
    pub body: Option<Value>,
    /// Retry setting for this call
    pub retry: RetryOverride,
    /// Whether an `opc-retry-token` is generated when absent
    pub accepts_retry_token: bool,
}

impl OperationRequest {
    /// Describe a call. POST calls accept a retry token by default.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let accepts_retry_token = method == Method::POST;
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: HeaderMap::new(),
            body: None,
            retry: RetryOverride::Inherit,
            accepts_retry_token,
        }
    }

    /// GET `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST `path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT `path`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE `path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a raw JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Validate and dehydrate `model` as the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnumValue`] if a strict enum field holds an
    /// unknown value.
    pub fn with_model<M: Model>(mut self, model: &M) -> Result<Self> {
        self.body = Some(codec::to_body(model)?);
        Ok(self)
    }

    /// Set a header when `value` is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the name or value is not a valid
    /// header.
    pub fn with_header(mut self, name: &'static str, value: Option<&str>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(self);
        };
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidRequest(format!("Invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidRequest(format!("Invalid value for header `{name}`: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the retry override.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryOverride) -> Self {
        self.retry = retry;
        self
    }

    /// Never generate an `opc-retry-token` for this call.
    #[must_use]
    pub const fn without_retry_token(mut self) -> Self {
        self.accepts_retry_token = false;
        self
    }
}

/// Builder for [`ServiceClient`].
#[derive(Clone)]
pub struct ServiceClientBuilder {
    service: OciService,
    base_url: Url,
    config: ClientConfig,
    user_agent: String,
    user_agent_suffix: Option<String>,
    ca_cert_pem: Option<Vec<u8>>,
    transport: Option<Arc<dyn Transport>>,
    signer: Arc<dyn RequestSigner>,
    predicate: Arc<dyn RetryPredicate>,
}

impl fmt::Debug for ServiceClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClientBuilder")
            .field("service", &self.service)
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("user_agent", &self.user_agent)
            .field("signer", &self.signer)
            .field("predicate", &self.predicate)
            .finish_non_exhaustive()
    }
}

impl ServiceClientBuilder {
    /// Create a builder for `service` at `base_url` (without the API version
    /// prefix, which is added on build).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(service: OciService, base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidEndpoint(format!(
                "Unsupported scheme `{}` for {service}",
                base_url.scheme()
            )));
        }

        Ok(Self {
            service,
            base_url,
            config: ClientConfig::new().with_timeout(timeout),
            user_agent: concat!("oci-common/", env!("CARGO_PKG_VERSION")).to_string(),
            user_agent_suffix: None,
            ca_cert_pem: None,
            transport: None,
            signer: Arc::new(NoSigner),
            predicate: Arc::new(RetryOnRetryable),
        })
    }

    /// Create a builder from a validated [`OciClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails, no endpoint can be
    /// resolved, or the CA certificate cannot be read.
    pub fn from_config(service: OciService, config: &OciClientConfig) -> Result<Self> {
        config.check()?;
        let endpoint = config.endpoint_for(service)?;
        let mut builder = Self::new(service, endpoint, config.timeout())?;

        if config.max_retries > 0 {
            builder = builder
                .with_retry_policy(RetryPolicy::new().with_max_retries(config.max_retries));
        }
        builder.config.tls_verify = config.tls_verify;
        if let Some(path) = &config.tls_ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                Error::ConfigError(format!("Failed to read CA certificate {}: {e}", path.display()))
            })?;
            builder.ca_cert_pem = Some(pem);
        }
        builder.user_agent_suffix = config.user_agent_suffix.clone();
        Ok(builder)
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.config.retry_policy = Some(retry);
        self
    }

    /// Make a single attempt per call unless a call overrides it.
    #[must_use]
    pub fn without_retries(mut self) -> Self {
        self.config.retry_policy = None;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Trust an extra PEM-encoded root certificate.
    #[must_use]
    pub fn with_ca_cert_pem(mut self, pem: Vec<u8>) -> Self {
        self.ca_cert_pem = Some(pem);
        self
    }

    /// Use a custom transport instead of `reqwest`.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sign every attempt with `signer`.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// Replace the retry predicate.
    #[must_use]
    pub fn with_retry_predicate(mut self, predicate: Arc<dyn RetryPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the user agent is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn build(self) -> Result<ServiceClient> {
        let mut base_url = self.base_url;
        let path = format!(
            "{}{}",
            base_url.path().trim_end_matches('/'),
            self.service.api_prefix()
        );
        base_url.set_path(&path);

        let user_agent = match &self.user_agent_suffix {
            Some(suffix) => format!("{} {suffix}", self.user_agent),
            None => self.user_agent,
        };
        let mut default_headers = HeaderMap::new();
        default_headers.insert(http::header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        default_headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON),
        );
        default_headers.insert(
            http::header::USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|e| Error::ConfigError(format!("Invalid user agent: {e}")))?,
        );

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.config,
                self.ca_cert_pem.as_deref(),
            )?),
        };

        Ok(ServiceClient {
            inner: Arc::new(ClientInner {
                service: self.service,
                base_url,
                default_headers,
                retry_policy: self.config.retry_policy,
                enable_logging: self.config.enable_logging,
                transport,
                signer: self.signer,
                predicate: self.predicate,
            }),
        })
    }
}

struct ClientInner {
    service: OciService,
    base_url: Url,
    default_headers: HeaderMap,
    retry_policy: Option<RetryPolicy>,
    enable_logging: bool,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn RequestSigner>,
    predicate: Arc<dyn RetryPredicate>,
}

/// Retrying client for one service. Cheap to clone.
#[derive(Clone)]
pub struct ServiceClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.inner.service)
            .field("base_url", &self.inner.base_url.as_str())
            .field("retry_policy", &self.inner.retry_policy)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Service this client talks to.
    #[must_use]
    pub fn service(&self) -> OciService {
        self.inner.service
    }

    /// Versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Default retry policy, if any.
    #[must_use]
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.inner.retry_policy
    }

    /// Absolute URL for `path` with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the result is not a valid URL.
    pub fn url_for(&self, path: &str, query: &QueryParams) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        ))?;
        query.append_to(&mut url);
        Ok(url)
    }

    /// Execute `request` under its resolved retry policy.
    ///
    /// Returns the first successful response. On a non-retryable failure, or
    /// once the policy's attempts are used up, returns the last error as is.
    ///
    /// # Errors
    ///
    /// Returns the transport or service error of the final attempt, or a
    /// request error if signing fails.
    pub async fn invoke(&self, request: OperationRequest) -> Result<HttpResponse> {
        let policy = request.retry.resolve(self.inner.retry_policy);
        let max_attempts = policy.map_or(1, |p| p.max_attempts());
        let url = self.url_for(&request.path, &request.query)?;

        let mut headers = self.inner.default_headers.clone();
        headers.extend(request.headers);
        if request.accepts_retry_token
            && request.method == Method::POST
            && !headers.contains_key(OPC_RETRY_TOKEN)
        {
            let token = uuid::Uuid::new_v4().simple().to_string();
            headers.insert(
                OPC_RETRY_TOKEN,
                HeaderValue::from_str(&token)
                    .map_err(|e| Error::InvalidRequest(format!("Invalid retry token: {e}")))?,
            );
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let mut http_request = HttpRequest {
                method: request.method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body: request.body.clone(),
            };
            self.inner.signer.sign(&mut http_request)?;

            if self.inner.enable_logging {
                debug!(
                    service = %self.inner.service,
                    method = %request.method,
                    path = %request.path,
                    attempt,
                    max_attempts,
                    "Sending request"
                );
            }

            let error = match self.inner.transport.send(http_request).await {
                Ok(response) if response.status.is_success() => {
                    if self.inner.enable_logging {
                        info!(
                            service = %self.inner.service,
                            status = response.status.as_u16(),
                            attempts = attempt,
                            "Received response"
                        );
                    }
                    return Ok(response);
                }
                Ok(response) => response.into_error(),
                Err(error) => error,
            };

            let retry_policy = match policy {
                Some(policy)
                    if attempt < max_attempts
                        && self.inner.predicate.should_retry(&error, attempt) =>
                {
                    policy
                }
                _ => return Err(error),
            };

            let delay = retry_policy.delay_for_attempt(attempt);
            warn!(
                service = %self.inner.service,
                path = %request.path,
                attempt,
                error = %error,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
