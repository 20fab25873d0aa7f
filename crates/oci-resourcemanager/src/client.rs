//! Asynchronous Resource Manager client implementation.

use crate::models::{
    CreateJobRequest, GetJobRequest, GetStackRequest, Job, ListStacksRequest, Stack, StackSummary,
};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    RESOURCE_MANAGER_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::PathTemplate;
use oci_common::query::QueryParams;
use oci_common::response::{decode_list, decode_model};
use oci_common::transport::{RequestSigner, OPC_REQUEST_ID, OPC_RETRY_TOKEN};
use oci_common::types::OciService;
use oci_common::{Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("oci-resourcemanager/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ResourceManagerClient`].
#[derive(Debug, Clone)]
pub struct ResourceManagerClientBuilder {
    inner: ServiceClientBuilder,
}

impl ResourceManagerClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::ResourceManager,
            endpoint,
            Duration::from_secs(RESOURCE_MANAGER_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::ResourceManager, config)?
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
    pub fn build(self) -> Result<ResourceManagerClient> {
        let inner = self.inner.build()?;
        Ok(ResourceManagerClient { inner })
    }
}

/// Asynchronous Resource Manager client.
#[derive(Debug, Clone)]
pub struct ResourceManagerClient {
    inner: ServiceClient,
}

impl ResourceManagerClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        ResourceManagerClientBuilder::new(endpoint)?.build()
    }

    /// Return the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// List stacks. Either `compartment_id` or `id` narrows the result.
    pub async fn list_stacks(
        &self,
        request: &ListStacksRequest,
    ) -> Result<OperationResponse<Vec<StackSummary>>> {
        let mut query = QueryParams::new();
        query.push_opt("compartmentId", request.compartment_id.as_deref());
        query.push_opt("id", request.id.as_deref());
        query.push_opt("displayName", request.display_name.as_deref());
        query.push_enum("lifecycleState", request.lifecycle_state.as_ref())?;
        query.push_enum("sortBy", request.sort_by.as_ref())?;
        query.push_enum("sortOrder", request.sort_order.as_ref())?;
        query.push_opt("limit", request.limit);
        query.push_opt("page", request.page.as_deref());

        let operation = OperationRequest::get("/stacks")
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_list(&response)
    }

    /// Fetch a stack.
    pub async fn get_stack(&self, request: &GetStackRequest) -> Result<OperationResponse<Stack>> {
        let path = PathTemplate::new("/stacks/{stackId}")
            .bind("stackId", request.stack_id.as_deref())?
            .build()?;

        let operation = OperationRequest::get(path)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Queue a Terraform job on a stack.
    pub async fn create_job(&self, request: &CreateJobRequest) -> Result<OperationResponse<Job>> {
        let details = request
            .create_job_details
            .as_ref()
            .ok_or_else(|| Error::MissingParameter("createJobDetails".to_string()))?;

        let operation = OperationRequest::post("/jobs")
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(OPC_RETRY_TOKEN, request.opc_retry_token.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Fetch a job.
    pub async fn get_job(&self, request: &GetJobRequest) -> Result<OperationResponse<Job>> {
        let path = PathTemplate::new("/jobs/{jobId}")
            .bind("jobId", request.job_id.as_deref())?
            .build()?;

        let operation = OperationRequest::get(path)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateJobDetails, ExecutionPlanStrategy, JobLifecycleState, JobOperation,
        JobOperationDetails, StackLifecycleState, StackSortBy,
    };
    use oci_common::transport::HttpRequest;
    use oci_common::types::SortOrder;
    use oci_common::Attr;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{
        body_json, header, header_exists, header_regex, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STACK_ID: &str = "ocid1.ormstack.oc1.iad.aaa";
    const JOB_ID: &str = "ocid1.ormjob.oc1.iad.bbb";

    fn test_client(server: &MockServer) -> ResourceManagerClient {
        ResourceManagerClient::new(server.uri()).unwrap()
    }

    #[derive(Debug, Default)]
    struct StaticSigner {
        calls: AtomicUsize,
    }

    impl RequestSigner for StaticSigner {
        fn sign(&self, request: &mut HttpRequest) -> oci_common::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let auth = format!("Signature keyId=\"test\",method=\"{}\"", request.method);
            request.headers.insert(
                "authorization",
                auth.parse()
                    .map_err(|_| Error::InvalidRequest("bad signature".to_string()))?,
            );
            Ok(())
        }
    }

    #[tokio::test]
    async fn list_stacks_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20180917/stacks"))
            .and(query_param("compartmentId", "ocid1.compartment.oc1..aaa"))
            .and(query_param("lifecycleState", "ACTIVE"))
            .and(query_param("sortBy", "TIMECREATED"))
            .and(query_param("sortOrder", "DESC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": STACK_ID, "displayName": "network", "lifecycleState": "ACTIVE",
                 "terraformVersion": "1.5.x"}
            ])))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .list_stacks(&ListStacksRequest {
                compartment_id: Some("ocid1.compartment.oc1..aaa".to_string()),
                lifecycle_state: Some(StackLifecycleState::Active),
                sort_by: Some(StackSortBy::TimeCreated),
                sort_order: Some(SortOrder::Desc),
                ..ListStacksRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(
            response.data[0].terraform_version.get().map(String::as_str),
            Some("1.5.x")
        );
    }

    #[tokio::test]
    async fn get_stack_signed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/20180917/stacks/{STACK_ID}")))
            .and(header_regex("authorization", r#"^Signature keyId="test",method="GET"$"#))
            .and(header("accept", "application/json"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": STACK_ID,
                "displayName": "network",
                "variables": {"region": "us-ashburn-1"}
            })))
            .mount(&server)
            .await;

        let signer = Arc::new(StaticSigner::default());
        let client = ResourceManagerClientBuilder::new(server.uri())
            .unwrap()
            .with_signer(signer.clone())
            .build()
            .unwrap();

        let stack = client
            .get_stack(&GetStackRequest {
                stack_id: Some(STACK_ID.to_string()),
                ..GetStackRequest::default()
            })
            .await
            .unwrap()
            .data;

        assert_eq!(
            stack.variables.get().and_then(|v| v.get("region")).map(String::as_str),
            Some("us-ashburn-1")
        );
        assert_eq!(signer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn create_job_apply_from_plan() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/20180917/jobs"))
            .and(header_exists("opc-retry-token"))
            .and(body_json(json!({
                "stackId": STACK_ID,
                "jobOperationDetails": {
                    "operation": "APPLY",
                    "executionPlanStrategy": "FROM_PLAN_JOB_ID",
                    "executionPlanJobId": "ocid1.ormjob.oc1.iad.plan"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": JOB_ID,
                "stackId": STACK_ID,
                "operation": "APPLY",
                "lifecycleState": "ACCEPTED",
                "timeCreated": "2024-06-01T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let details = CreateJobDetails {
            stack_id: Attr::Set(STACK_ID.to_string()),
            job_operation_details: Attr::Set(JobOperationDetails {
                operation: Attr::Set(JobOperation::Apply),
                execution_plan_strategy: Attr::Set(ExecutionPlanStrategy::FromPlanJobId),
                execution_plan_job_id: Attr::Set("ocid1.ormjob.oc1.iad.plan".to_string()),
                ..JobOperationDetails::default()
            }),
            ..CreateJobDetails::default()
        };
        let job = test_client(&server)
            .create_job(&CreateJobRequest {
                create_job_details: Some(details),
                ..CreateJobRequest::default()
            })
            .await
            .unwrap()
            .data;

        assert_eq!(job.lifecycle_state.get(), Some(&JobLifecycleState::Accepted));
        assert!(job.time_finished.is_unset());
    }

    #[tokio::test]
    async fn create_job_rejects_unknown_operation_locally() {
        let server = MockServer::start().await;
        let details = CreateJobDetails {
            operation: Attr::Set(JobOperation::Unknown("REFRESH".to_string())),
            ..CreateJobDetails::default()
        };
        let err = test_client(&server)
            .create_job(&CreateJobRequest {
                create_job_details: Some(details),
                ..CreateJobRequest::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_caller_error());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_job_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/20180917/jobs/{JOB_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_job(&GetJobRequest {
                job_id: Some(JOB_ID.to_string()),
                ..GetJobRequest::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Deserialization { ref raw_response, .. } if raw_response == "{not json"
        ));
    }

    #[tokio::test]
    async fn get_job_missing_id() {
        let server = MockServer::start().await;
        let err = test_client(&server)
            .get_job(&GetJobRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, Error::MissingParameter("jobId".to_string()));
    }

    #[tokio::test]
    async fn list_stacks_rejects_unknown_sort_order() {
        let server = MockServer::start().await;
        let err = test_client(&server)
            .list_stacks(&ListStacksRequest {
                compartment_id: Some("ocid1.compartment.oc1..aaa".to_string()),
                sort_order: Some(SortOrder::Unknown("RANDOM".to_string())),
                ..ListStacksRequest::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEnumValue { ref field, .. } if field == "sortOrder"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
