//! Asynchronous Stack Monitoring client implementation.

use crate::models::{
    CreateMonitoredResourceRequest, DeleteMonitoredResourceRequest, GetMonitoredResourceRequest,
    MonitoredResource, MonitoredResourceCollection, SearchMonitoredResourcesRequest,
};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    STACK_MONITORING_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::PathTemplate;
use oci_common::query::QueryParams;
use oci_common::response::{decode_empty, decode_model};
use oci_common::transport::{RequestSigner, IF_MATCH, OPC_REQUEST_ID, OPC_RETRY_TOKEN};
use oci_common::types::OciService;
use oci_common::{Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("oci-stackmonitoring/", env!("CARGO_PKG_VERSION"));

/// Builder for [`StackMonitoringClient`].
#[derive(Debug, Clone)]
pub struct StackMonitoringClientBuilder {
    inner: ServiceClientBuilder,
}

impl StackMonitoringClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::StackMonitoring,
            endpoint,
            Duration::from_secs(STACK_MONITORING_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::StackMonitoring, config)?
            .with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Set the default retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Sign every outgoing request.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.inner = self.inner.with_signer(signer);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StackMonitoringClient> {
        let inner = self.inner.build()?;
        Ok(StackMonitoringClient { inner })
    }
}

/// Asynchronous Stack Monitoring client.
#[derive(Debug, Clone)]
pub struct StackMonitoringClient {
    inner: ServiceClient,
}

impl StackMonitoringClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        StackMonitoringClientBuilder::new(endpoint)?.build()
    }

    /// Return the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Register a monitored resource.
    pub async fn create_monitored_resource(
        &self,
        request: &CreateMonitoredResourceRequest,
    ) -> Result<OperationResponse<MonitoredResource>> {
        let details = request
            .create_monitored_resource_details
            .as_ref()
            .ok_or_else(|| {
                Error::MissingParameter("createMonitoredResourceDetails".to_string())
            })?;

        let operation = OperationRequest::post("/monitoredResources")
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(OPC_RETRY_TOKEN, request.opc_retry_token.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Fetch a monitored resource.
    pub async fn get_monitored_resource(
        &self,
        request: &GetMonitoredResourceRequest,
    ) -> Result<OperationResponse<MonitoredResource>> {
        let path = PathTemplate::new("/monitoredResources/{monitoredResourceId}")
            .bind("monitoredResourceId", request.monitored_resource_id.as_deref())?
            .build()?;

        let operation = OperationRequest::get(path)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Delete a monitored resource.
    pub async fn delete_monitored_resource(
        &self,
        request: &DeleteMonitoredResourceRequest,
    ) -> Result<OperationResponse<()>> {
        let path = PathTemplate::new("/monitoredResources/{monitoredResourceId}")
            .bind("monitoredResourceId", request.monitored_resource_id.as_deref())?
            .build()?;
        let mut query = QueryParams::new();
        query.push_opt("isDeleteMembers", request.is_delete_members);

        let operation = OperationRequest::delete(path)
            .with_query(query)
            .with_header(IF_MATCH, request.if_match.as_deref())?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        Ok(decode_empty(&response))
    }

    /// Search monitored resources.
    pub async fn search_monitored_resources(
        &self,
        request: &SearchMonitoredResourcesRequest,
    ) -> Result<OperationResponse<MonitoredResourceCollection>> {
        let details = request
            .search_monitored_resources_details
            .as_ref()
            .ok_or_else(|| {
                Error::MissingParameter("searchMonitoredResourcesDetails".to_string())
            })?;
        let mut query = QueryParams::new();
        query.push_opt("limit", request.limit);
        query.push_opt("page", request.page.as_deref());

        let operation = OperationRequest::post("/monitoredResources/actions/search")
            .with_query(query)
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry)
            .without_retry_token();

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }
}
