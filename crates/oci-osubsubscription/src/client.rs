//! Asynchronous subscription billing client implementation.

use crate::models::{ListSubscriptionsRequest, SubscriptionSummary};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    OSUB_SUBSCRIPTION_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::required;
use oci_common::query::QueryParams;
use oci_common::response::decode_list;
use oci_common::transport::{RequestSigner, OPC_REQUEST_ID};
use oci_common::types::OciService;
use oci_common::{Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("oci-osubsubscription/", env!("CARGO_PKG_VERSION"));

/// Gateway subscription id header.
pub const X_ONE_GATEWAY_SUBSCRIPTION_ID: &str = "x-one-gateway-subscription-id";

/// Gateway origin region header.
pub const X_ONE_ORIGIN_REGION: &str = "x-one-origin-region";

/// Builder for [`SubscriptionClient`].
#[derive(Debug, Clone)]
pub struct SubscriptionClientBuilder {
    inner: ServiceClientBuilder,
}

impl SubscriptionClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::OsubSubscription,
            endpoint,
            Duration::from_secs(OSUB_SUBSCRIPTION_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::OsubSubscription, config)?
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
    pub fn build(self) -> Result<SubscriptionClient> {
        let inner = self.inner.build()?;
        Ok(SubscriptionClient { inner })
    }
}

/// Asynchronous subscription billing client.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    inner: ServiceClient,
}

impl SubscriptionClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        SubscriptionClientBuilder::new(endpoint)?.build()
    }

    /// Return the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// List subscriptions matching a plan number, subscription id or buyer
    /// email.
    pub async fn list_subscriptions(
        &self,
        request: &ListSubscriptionsRequest,
    ) -> Result<OperationResponse<Vec<SubscriptionSummary>>> {
        let compartment_id = required("compartmentId", request.compartment_id.as_deref())?;
        if request.plan_number.is_none()
            && request.subscription_id.is_none()
            && request.buyer_email.is_none()
        {
            return Err(Error::InvalidRequest(
                "One of planNumber, subscriptionId or buyerEmail is required".to_string(),
            ));
        }

        let mut query = QueryParams::new();
        query.push("compartmentId", compartment_id);
        query.push_opt("planNumber", request.plan_number.as_deref());
        query.push_opt("subscriptionId", request.subscription_id.as_deref());
        query.push_opt("buyerEmail", request.buyer_email.as_deref());
        query.push_opt("isCommitInfoRequired", request.is_commit_info_required);
        query.push_opt("limit", request.limit);
        query.push_opt("page", request.page.as_deref());
        query.push_enum("sortOrder", request.sort_order.as_ref())?;
        query.push_enum("sortBy", request.sort_by.as_ref())?;

        let operation = OperationRequest::get("/subscriptions")
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(
                X_ONE_GATEWAY_SUBSCRIPTION_ID,
                request.x_one_gateway_subscription_id.as_deref(),
            )?
            .with_header(X_ONE_ORIGIN_REGION, request.x_one_origin_region.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_list(&response)
    }
}
