//! Asynchronous Object Storage client implementation.

use crate::models::{
    Bucket, BucketSummary, CreateBucketRequest, DeleteBucketRequest, GetBucketRequest,
    GetNamespaceRequest, ListBucketsRequest, UpdateBucketRequest,
};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    OBJECT_STORAGE_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::{required, PathTemplate};
use oci_common::query::QueryParams;
use oci_common::response::{decode_empty, decode_list, decode_model, decode_string};
use oci_common::transport::{RequestSigner, IF_MATCH, IF_NONE_MATCH, OPC_REQUEST_ID};
use oci_common::types::OciService;
use oci_common::{paginate, Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("oci-objectstorage/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ObjectStorageClient`].
#[derive(Debug, Clone)]
pub struct ObjectStorageClientBuilder {
    inner: ServiceClientBuilder,
}

impl ObjectStorageClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::ObjectStorage,
            endpoint,
            Duration::from_secs(OBJECT_STORAGE_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration, using the regional
    /// endpoint unless the configuration overrides it.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::ObjectStorage, config)?
            .with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Set the default retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Make a single attempt per call unless a call says otherwise.
    #[must_use]
    pub fn without_retries(mut self) -> Self {
        self.inner = self.inner.without_retries();
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
    pub fn build(self) -> Result<ObjectStorageClient> {
        let inner = self.inner.build()?;
        Ok(ObjectStorageClient { inner })
    }
}

/// Asynchronous Object Storage client.
#[derive(Debug, Clone)]
pub struct ObjectStorageClient {
    inner: ServiceClient,
}

impl ObjectStorageClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        ObjectStorageClientBuilder::new(endpoint)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Look up the namespace of the caller's tenancy.
    pub async fn get_namespace(
        &self,
        request: &GetNamespaceRequest,
    ) -> Result<OperationResponse<String>> {
        let mut query = QueryParams::new();
        query.push_opt("compartmentId", request.compartment_id.as_deref());

        let operation = OperationRequest::get("/n/")
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_string(&response)
    }

    /// Create a bucket.
    pub async fn create_bucket(
        &self,
        request: &CreateBucketRequest,
    ) -> Result<OperationResponse<Bucket>> {
        let details = request
            .create_bucket_details
            .as_ref()
            .ok_or_else(|| Error::MissingParameter("createBucketDetails".to_string()))?;
        let path = PathTemplate::new("/n/{namespaceName}/b/")
            .bind("namespaceName", request.namespace_name.as_deref())?
            .build()?;

        let operation = OperationRequest::post(path)
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry)
            .without_retry_token();

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Fetch a bucket.
    pub async fn get_bucket(&self, request: &GetBucketRequest) -> Result<OperationResponse<Bucket>> {
        let path = bucket_path(
            request.namespace_name.as_deref(),
            request.bucket_name.as_deref(),
        )?;
        let mut query = QueryParams::new();
        query.push_enum_list("fields", &request.fields)?;

        let operation = OperationRequest::get(path)
            .with_query(query)
            .with_header(IF_MATCH, request.if_match.as_deref())?
            .with_header(IF_NONE_MATCH, request.if_none_match.as_deref())?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Update a bucket. Fields left unset in the details are unchanged.
    pub async fn update_bucket(
        &self,
        request: &UpdateBucketRequest,
    ) -> Result<OperationResponse<Bucket>> {
        let details = request
            .update_bucket_details
            .as_ref()
            .ok_or_else(|| Error::MissingParameter("updateBucketDetails".to_string()))?;
        let path = bucket_path(
            request.namespace_name.as_deref(),
            request.bucket_name.as_deref(),
        )?;

        let operation = OperationRequest::post(path)
            .with_model(details)?
            .with_header(IF_MATCH, request.if_match.as_deref())?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry)
            .without_retry_token();

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Delete an empty bucket.
    pub async fn delete_bucket(
        &self,
        request: &DeleteBucketRequest,
    ) -> Result<OperationResponse<()>> {
        let path = bucket_path(
            request.namespace_name.as_deref(),
            request.bucket_name.as_deref(),
        )?;

        let operation = OperationRequest::delete(path)
            .with_header(IF_MATCH, request.if_match.as_deref())?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        Ok(decode_empty(&response))
    }

    /// List one page of buckets in a compartment.
    pub async fn list_buckets(
        &self,
        request: &ListBucketsRequest,
    ) -> Result<OperationResponse<Vec<BucketSummary>>> {
        let compartment_id = required("compartmentId", request.compartment_id.as_deref())?;
        let path = PathTemplate::new("/n/{namespaceName}/b/")
            .bind("namespaceName", request.namespace_name.as_deref())?
            .build()?;

        let mut query = QueryParams::new();
        query.push("compartmentId", compartment_id);
        query.push_opt("limit", request.limit);
        query.push_opt("page", request.page.as_deref());
        query.push_enum_list("fields", &request.fields)?;

        let operation = OperationRequest::get(path)
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_list(&response)
    }

    /// List every bucket in a compartment, following page tokens.
    pub async fn list_all_buckets(&self, request: &ListBucketsRequest) -> Result<Vec<BucketSummary>> {
        paginate::collect_all(|page| {
            debug!(page = ?page, "Listing buckets");
            let request = ListBucketsRequest {
                page,
                ..request.clone()
            };
            async move { self.list_buckets(&request).await }
        })
        .await
    }
}

fn bucket_path(namespace_name: Option<&str>, bucket_name: Option<&str>) -> Result<String> {
    PathTemplate::new("/n/{namespaceName}/b/{bucketName}")
        .bind("namespaceName", namespace_name)?
        .bind("bucketName", bucket_name)?
        .build()
}
