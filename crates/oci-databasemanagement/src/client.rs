//! Asynchronous Database Management client implementation.

use crate::models::{
    ChangeDatabaseParametersRequest, GetManagedDatabaseRequest, ListManagedDatabasesRequest,
    ManagedDatabase, ManagedDatabaseCollection, ResetDatabaseParametersRequest,
    UpdateDatabaseParametersResult,
};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    DATABASE_MANAGEMENT_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::{required, PathTemplate};
use oci_common::query::QueryParams;
use oci_common::response::decode_model;
use oci_common::transport::{RequestSigner, OPC_REQUEST_ID, OPC_RETRY_TOKEN};
use oci_common::types::OciService;
use oci_common::{Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("oci-databasemanagement/", env!("CARGO_PKG_VERSION"));

/// Builder for [`DatabaseManagementClient`].
#[derive(Debug, Clone)]
pub struct DatabaseManagementClientBuilder {
    inner: ServiceClientBuilder,
}

impl DatabaseManagementClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::DatabaseManagement,
            endpoint,
            Duration::from_secs(DATABASE_MANAGEMENT_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::DatabaseManagement, config)?
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
    pub fn build(self) -> Result<DatabaseManagementClient> {
        let inner = self.inner.build()?;
        Ok(DatabaseManagementClient { inner })
    }
}

/// Asynchronous Database Management client.
#[derive(Debug, Clone)]
pub struct DatabaseManagementClient {
    inner: ServiceClient,
}

impl DatabaseManagementClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        DatabaseManagementClientBuilder::new(endpoint)?.build()
    }

    /// Return the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Fetch a managed database.
    pub async fn get_managed_database(
        &self,
        request: &GetManagedDatabaseRequest,
    ) -> Result<OperationResponse<ManagedDatabase>> {
        let path = PathTemplate::new("/managedDatabases/{managedDatabaseId}")
            .bind("managedDatabaseId", request.managed_database_id.as_deref())?
            .build()?;

        let operation = OperationRequest::get(path)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// List managed databases in a compartment.
    pub async fn list_managed_databases(
        &self,
        request: &ListManagedDatabasesRequest,
    ) -> Result<OperationResponse<ManagedDatabaseCollection>> {
        let compartment_id = required("compartmentId", request.compartment_id.as_deref())?;

        let mut query = QueryParams::new();
        query.push("compartmentId", compartment_id);
        query.push_opt("id", request.id.as_deref());
        query.push_opt("name", request.name.as_deref());
        query.push_enum("deploymentType", request.deployment_type.as_ref())?;
        query.push_opt("page", request.page.as_deref());
        query.push_opt("limit", request.limit);
        query.push_enum("sortOrder", request.sort_order.as_ref())?;
        query.push_enum("sortBy", request.sort_by.as_ref())?;

        let operation = OperationRequest::get("/managedDatabases")
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Reset parameters to their default values.
    pub async fn reset_database_parameters(
        &self,
        request: &ResetDatabaseParametersRequest,
    ) -> Result<OperationResponse<UpdateDatabaseParametersResult>> {
        let details = request
            .reset_database_parameters_details
            .as_ref()
            .ok_or_else(|| Error::MissingParameter("resetDatabaseParametersDetails".to_string()))?;
        let path = PathTemplate::new(
            "/managedDatabases/{managedDatabaseId}/actions/resetDatabaseParameters",
        )
        .bind("managedDatabaseId", request.managed_database_id.as_deref())?
        .build()?;

        let operation = OperationRequest::post(path)
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(OPC_RETRY_TOKEN, request.opc_retry_token.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Change parameter values.
    pub async fn change_database_parameters(
        &self,
        request: &ChangeDatabaseParametersRequest,
    ) -> Result<OperationResponse<UpdateDatabaseParametersResult>> {
        let details = request
            .change_database_parameters_details
            .as_ref()
            .ok_or_else(|| {
                Error::MissingParameter("changeDatabaseParametersDetails".to_string())
            })?;
        let path = PathTemplate::new(
            "/managedDatabases/{managedDatabaseId}/actions/changeDatabaseParameters",
        )
        .bind("managedDatabaseId", request.managed_database_id.as_deref())?
        .build()?;

        let operation = OperationRequest::post(path)
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(OPC_RETRY_TOKEN, request.opc_retry_token.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }
}
