//! Configuration structures for OCI clients.
//!
//! [`OciClientConfig`] is the serde-loadable, validated description of where
//! and how to reach the services. Service builders turn it into a
//! [`ServiceClientBuilder`](crate::client::ServiceClientBuilder) through
//! `from_config`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::error::{Error, Result};
use crate::types::OciService;

/// Configuration for an OCI client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OciClientConfig {
    /// Region identifier, e.g. `us-phoenix-1`
    #[validate(length(min = 1))]
    pub region: String,

    /// Explicit endpoint; overrides the regional template for every service
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Verify server certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// PEM bundle trusted in addition to the system roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    /// Whole-request timeout, seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries after the first attempt; 0 means no client-wide policy
    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Text appended to every user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_suffix: Option<String>,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    60
}

const fn default_max_retries() -> u32 {
    0
}

impl OciClientConfig {
    /// Create a new configuration for `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn new(region: impl Into<String>) -> Result<Self> {
        let config = Self {
            region: region.into(),
            endpoint: None,
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent_suffix: None,
        };
        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the failing fields.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Override the endpoint for every service.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Turn certificate verification on or off.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust the PEM bundle at `path`.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Whole-request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Client-wide retries after the first attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the user agent suffix.
    #[must_use]
    pub fn with_user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// [`Self::request_timeout_secs`] as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Endpoint for `service`: the override if set, otherwise the regional
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if neither yields a usable endpoint.
    pub fn endpoint_for(&self, service: OciService) -> Result<String> {
        match &self.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => Ok(endpoint.clone()),
            _ => service.regional_endpoint(&self.region).map_err(|e| {
                Error::ConfigError(format!("No endpoint for {service}: {e}"))
            }),
        }
    }
}

impl Default for OciClientConfig {
    fn default() -> Self {
        Self {
            region: "us-ashburn-1".to_string(),
            endpoint: None,
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent_suffix: None,
        }
    }
}
