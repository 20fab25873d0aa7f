//! Asynchronous Application Migration client implementation.

use crate::models::{
    CreateMigrationRequest, DeleteMigrationRequest, GetMigrationRequest, ListMigrationsRequest,
    Migration, MigrationSummary,
};
use crate::Result;
use oci_common::client::{
    ClientConfig, OperationRequest, ServiceClient, ServiceClientBuilder,
    APPLICATION_MIGRATION_DEFAULT_TIMEOUT,
};
use oci_common::config::OciClientConfig;
use oci_common::path::{required, PathTemplate};
use oci_common::query::QueryParams;
use oci_common::response::{decode_empty, decode_list, decode_model};
use oci_common::transport::{RequestSigner, IF_MATCH, OPC_REQUEST_ID, OPC_RETRY_TOKEN};
use oci_common::types::OciService;
use oci_common::{Error, OperationResponse, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("oci-applicationmigration/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ApplicationMigrationClient`].
#[derive(Debug, Clone)]
pub struct ApplicationMigrationClientBuilder {
    inner: ServiceClientBuilder,
}

impl ApplicationMigrationClientBuilder {
    /// Create a builder for the specified endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            OciService::ApplicationMigration,
            endpoint,
            Duration::from_secs(APPLICATION_MIGRATION_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from shared configuration.
    pub fn from_config(config: &OciClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(OciService::ApplicationMigration, config)?
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
    pub fn build(self) -> Result<ApplicationMigrationClient> {
        let inner = self.inner.build()?;
        Ok(ApplicationMigrationClient { inner })
    }
}

/// Asynchronous Application Migration client.
#[derive(Debug, Clone)]
pub struct ApplicationMigrationClient {
    inner: ServiceClient,
}

impl ApplicationMigrationClient {
    /// Construct a client directly from the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        ApplicationMigrationClientBuilder::new(endpoint)?.build()
    }

    /// Return the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// List migrations in a compartment.
    pub async fn list_migrations(
        &self,
        request: &ListMigrationsRequest,
    ) -> Result<OperationResponse<Vec<MigrationSummary>>> {
        let compartment_id = required("compartmentId", request.compartment_id.as_deref())?;

        let mut query = QueryParams::new();
        query.push("compartmentId", compartment_id);
        query.push_opt("id", request.id.as_deref());
        query.push_opt("displayName", request.display_name.as_deref());
        query.push_enum("lifecycleState", request.lifecycle_state.as_ref())?;
        query.push_opt("limit", request.limit);
        query.push_opt("page", request.page.as_deref());
        query.push_enum("sortOrder", request.sort_order.as_ref())?;
        query.push_enum("sortBy", request.sort_by.as_ref())?;

        let operation = OperationRequest::get("/migrations")
            .with_query(query)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_list(&response)
    }

    /// Fetch a migration.
    pub async fn get_migration(
        &self,
        request: &GetMigrationRequest,
    ) -> Result<OperationResponse<Migration>> {
        let path = migration_path(request.migration_id.as_deref())?;

        let operation = OperationRequest::get(path)
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Create a migration and start discovering the source application.
    pub async fn create_migration(
        &self,
        request: &CreateMigrationRequest,
    ) -> Result<OperationResponse<Migration>> {
        let details = request
            .create_migration_details
            .as_ref()
            .ok_or_else(|| Error::MissingParameter("createMigrationDetails".to_string()))?;

        let operation = OperationRequest::post("/migrations")
            .with_model(details)?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_header(OPC_RETRY_TOKEN, request.opc_retry_token.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        decode_model(&response)
    }

    /// Delete a migration. The service answers before deletion completes.
    pub async fn delete_migration(
        &self,
        request: &DeleteMigrationRequest,
    ) -> Result<OperationResponse<()>> {
        let path = migration_path(request.migration_id.as_deref())?;

        let operation = OperationRequest::delete(path)
            .with_header(IF_MATCH, request.if_match.as_deref())?
            .with_header(OPC_REQUEST_ID, request.opc_request_id.as_deref())?
            .with_retry(request.retry);

        let response = self.inner.invoke(operation).await?;
        Ok(decode_empty(&response))
    }
}

fn migration_path(migration_id: Option<&str>) -> Result<String> {
    PathTemplate::new("/migrations/{migrationId}")
        .bind("migrationId", migration_id)?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateMigrationDetails, DiscoveryDetails, MigrationLifecycleState, MigrationSortBy,
        MigrationType,
    };
    use oci_common::types::SortOrder;
    use oci_common::{Attr, RetryOverride};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MIGRATION_ID: &str = "ocid1.application-migration-migration.oc1.iad.aaa";

    fn test_client(server: &MockServer) -> ApplicationMigrationClient {
        ApplicationMigrationClient::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn list_migrations_array_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20191031/migrations"))
            .and(query_param("compartmentId", "ocid1.compartment.oc1..aaa"))
            .and(query_param("lifecycleState", "ACTIVE"))
            .and(query_param("sortBy", "DISPLAYNAME"))
            .and(query_param("sortOrder", "DESC"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("opc-total-items", "2")
                    .set_body_json(json!([
                        {"id": "m1", "displayName": "jcs-app", "lifecycleState": "ACTIVE",
                         "applicationType": "JCS"},
                        {"id": "m2", "displayName": "oic-app", "lifecycleState": "ACTIVE",
                         "applicationType": "OIC", "migrationState": "MIGRATING"}
                    ])),
            )
            .mount(&server)
            .await;

        let response = test_client(&server)
            .list_migrations(&ListMigrationsRequest {
                compartment_id: Some("ocid1.compartment.oc1..aaa".to_string()),
                lifecycle_state: Some(MigrationLifecycleState::Active),
                sort_by: Some(MigrationSortBy::DisplayName),
                sort_order: Some(SortOrder::Desc),
                ..ListMigrationsRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(response.opc_total_items, Some(2));
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].application_type.get(), Some(&MigrationType::Oic));
    }

    #[tokio::test]
    async fn list_migrations_blank_compartment() {
        let server = MockServer::start().await;
        let err = test_client(&server)
            .list_migrations(&ListMigrationsRequest {
                compartment_id: Some(String::new()),
                ..ListMigrationsRequest::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, Error::BlankParameter("compartmentId".to_string()));
    }

    #[tokio::test]
    async fn list_migrations_rejects_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/20191031/migrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .list_migrations(&ListMigrationsRequest {
                compartment_id: Some("ocid1.compartment.oc1..aaa".to_string()),
                ..ListMigrationsRequest::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization { status: 200, .. }));
    }

    #[tokio::test]
    async fn get_migration_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/20191031/migrations/{MIGRATION_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": MIGRATION_ID,
                "displayName": "jcs-app",
                "isSelectiveMigration": true,
                "lifecycleState": "NEEDS_ATTENTION",
                "migrationState": "MISSING_CONFIG_VALUES"
            })))
            .mount(&server)
            .await;

        let migration = test_client(&server)
            .get_migration(&GetMigrationRequest {
                migration_id: Some(MIGRATION_ID.to_string()),
                ..GetMigrationRequest::default()
            })
            .await
            .unwrap()
            .data;

        assert_eq!(migration.is_selective_migration.get(), Some(&true));
        assert_eq!(
            migration.lifecycle_state.get(),
            Some(&MigrationLifecycleState::Unknown("NEEDS_ATTENTION".to_string()))
        );
    }

    #[tokio::test]
    async fn create_migration_with_caller_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/20191031/migrations"))
            .and(header("opc-retry-token", "create-jcs-app-1"))
            .and(body_json(json!({
                "compartmentId": "ocid1.compartment.oc1..aaa",
                "sourceId": "ocid1.application-migration-source.oc1.iad.src",
                "applicationName": "jcs-app",
                "discoveryDetails": {
                    "type": "JCS",
                    "weblogicUser": "weblogic",
                    "weblogicPassword": "secret"
                },
                "isSelectiveMigration": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": MIGRATION_ID,
                "lifecycleState": "CREATING"
            })))
            .mount(&server)
            .await;

        let mut details = CreateMigrationDetails::new();
        details.compartment_id.set("ocid1.compartment.oc1..aaa");
        details
            .source_id
            .set("ocid1.application-migration-source.oc1.iad.src");
        details.application_name.set("jcs-app");
        details.discovery_details = Attr::Set(DiscoveryDetails {
            discovery_type: Attr::Set(MigrationType::Jcs),
            weblogic_user: Attr::Set("weblogic".to_string()),
            weblogic_password: Attr::Set("secret".to_string()),
            ..DiscoveryDetails::default()
        });

        let response = test_client(&server)
            .create_migration(&CreateMigrationRequest {
                create_migration_details: Some(details),
                opc_retry_token: Some("create-jcs-app-1".to_string()),
                ..CreateMigrationRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(
            response.data.lifecycle_state.get(),
            Some(&MigrationLifecycleState::Creating)
        );
    }

    #[tokio::test]
    async fn create_migration_throttled_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/20191031/migrations"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "code": "TooManyRequests",
                "message": "slow down"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/20191031/migrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": MIGRATION_ID})))
            .mount(&server)
            .await;

        let client = ApplicationMigrationClientBuilder::new(server.uri())
            .unwrap()
            .with_retry_policy(
                RetryPolicy::new()
                    .with_max_retries(1)
                    .with_initial_delay(Duration::ZERO),
            )
            .build()
            .unwrap();

        let response = client
            .create_migration(&CreateMigrationRequest {
                create_migration_details: Some(CreateMigrationDetails::new()),
                ..CreateMigrationRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(response.data.id.get().map(String::as_str), Some(MIGRATION_ID));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].headers.get("opc-retry-token"),
            requests[1].headers.get("opc-retry-token")
        );
    }

    #[tokio::test]
    async fn delete_migration_conflict_is_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/20191031/migrations/{MIGRATION_ID}")))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "Conflict",
                "message": "migration is in progress"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server)
            .delete_migration(&DeleteMigrationRequest {
                migration_id: Some(MIGRATION_ID.to_string()),
                retry: RetryOverride::Policy(
                    RetryPolicy::new().with_initial_delay(Duration::ZERO),
                ),
                ..DeleteMigrationRequest::default()
            })
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn list_migrations_rejects_state_read_from_newer_service() {
        let server = MockServer::start().await;
        // A tolerant response field handed straight back as a filter.
        let state = MigrationLifecycleState::Unknown("SUSPENDED".to_string());
        let err = test_client(&server)
            .list_migrations(&ListMigrationsRequest {
                compartment_id: Some("ocid1.compartment.oc1..aaa".to_string()),
                lifecycle_state: Some(state),
                ..ListMigrationsRequest::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEnumValue { ref field, ref value, .. }
            if field == "lifecycleState" && value == "SUSPENDED"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
