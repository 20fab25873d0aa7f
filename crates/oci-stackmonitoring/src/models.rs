//! Data models for monitored resources.

use chrono::{DateTime, Utc};
use oci_common::types::SortOrder;
use oci_common::wire::{DefinedTags, FreeformTags};
use oci_common::{oci_enum, oci_model, RetryOverride};

oci_enum! {
    /// Lifecycle state of a monitored resource.
    pub enum ResourceLifecycleState {
        /// Being created.
        Creating => "CREATING",
        /// Being updated.
        Updating => "UPDATING",
        /// Active.
        Active => "ACTIVE",
        /// Being deleted.
        Deleting => "DELETING",
        /// Deleted.
        Deleted => "DELETED",
        /// Failed.
        Failed => "FAILED",
    }
}

oci_enum! {
    /// Sort key for resource search.
    pub enum MonitoredResourceSortBy {
        /// Creation time.
        TimeCreated => "TIME_CREATED",
        /// Resource name.
        ResourceName => "RESOURCE_NAME",
    }
}

oci_model! {
    /// A name/value property of a monitored resource.
    pub struct MonitoredResourceProperty {
        /// Property name.
        name: String => "name";
        /// Property value.
        value: String => "value";
    }
}

oci_model! {
    /// A monitored resource.
    pub struct MonitoredResource {
        /// OCID.
        id: String => "id";
        /// Resource name.
        name: String => "name";
        /// Display name.
        display_name: String => "displayName";
        /// Resource type, e.g. `host` or `oracle_database`.
        resource_type: String => "type";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Tenancy OCID.
        tenant_id: String => "tenantId";
        /// Host name.
        host_name: String => "hostName";
        /// OCID of the cloud resource this one mirrors.
        external_id: String => "externalId";
        /// Management agent OCID.
        management_agent_id: String => "managementAgentId";
        /// Time zone of the resource.
        resource_time_zone: String => "resourceTimeZone";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Last update time.
        time_updated: DateTime<Utc> => "timeUpdated";
        /// Lifecycle state.
        lifecycle_state: ResourceLifecycleState => "lifecycleState", policy = tolerant;
        /// Type-specific properties.
        properties: Vec<MonitoredResourceProperty> => "properties";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// Body of `create_monitored_resource`.
    pub struct CreateMonitoredResourceDetails {
        /// Resource name.
        name: String => "name";
        /// Display name.
        display_name: String => "displayName";
        /// Resource type.
        resource_type: String => "type";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Host name.
        host_name: String => "hostName";
        /// OCID of the cloud resource this one mirrors.
        external_id: String => "externalId";
        /// Management agent OCID.
        management_agent_id: String => "managementAgentId";
        /// Time zone of the resource.
        resource_time_zone: String => "resourceTimeZone";
        /// Type-specific properties.
        properties: Vec<MonitoredResourceProperty> => "properties";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// Search criteria for `search_monitored_resources`.
    pub struct SearchMonitoredResourcesDetails {
        /// Compartment to search.
        compartment_id: String => "compartmentId";
        /// Exact resource name.
        name: String => "name";
        /// Name substring.
        name_contains: String => "nameContains";
        /// Resource type.
        resource_type: String => "type";
        /// Host name.
        host_name: String => "hostName";
        /// Management agent OCID.
        management_agent_id: String => "managementAgentId";
        /// Lifecycle state.
        lifecycle_state: ResourceLifecycleState => "lifecycleState";
        /// Sort key.
        sort_by: MonitoredResourceSortBy => "sortBy";
        /// Sort direction.
        sort_order: SortOrder => "sortOrder";
    }
}

oci_model! {
    /// A monitored resource in a search response.
    pub struct MonitoredResourceSummary {
        /// OCID.
        id: String => "id";
        /// Resource name.
        name: String => "name";
        /// Display name.
        display_name: String => "displayName";
        /// Resource type.
        resource_type: String => "type";
        /// Host name.
        host_name: String => "hostName";
        /// OCID of the cloud resource this one mirrors.
        external_id: String => "externalId";
        /// Management agent OCID.
        management_agent_id: String => "managementAgentId";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Last update time.
        time_updated: DateTime<Utc> => "timeUpdated";
        /// Lifecycle state.
        lifecycle_state: ResourceLifecycleState => "lifecycleState", policy = tolerant;
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// One page of search results.
    pub struct MonitoredResourceCollection {
        /// Summaries on this page.
        items: Vec<MonitoredResourceSummary> => "items";
    }
}

/// Parameters of `create_monitored_resource`.
#[derive(Debug, Clone, Default)]
pub struct CreateMonitoredResourceRequest {
    /// Resource to create.
    pub create_monitored_resource_details: Option<CreateMonitoredResourceDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Idempotency token; generated when absent.
    pub opc_retry_token: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `get_monitored_resource`.
#[derive(Debug, Clone, Default)]
pub struct GetMonitoredResourceRequest {
    /// Monitored resource OCID.
    pub monitored_resource_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `delete_monitored_resource`.
#[derive(Debug, Clone, Default)]
pub struct DeleteMonitoredResourceRequest {
    /// Monitored resource OCID.
    pub monitored_resource_id: Option<String>,
    /// Also delete member resources.
    pub is_delete_members: Option<bool>,
    /// Only delete if the etag matches.
    pub if_match: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `search_monitored_resources`.
#[derive(Debug, Clone, Default)]
pub struct SearchMonitoredResourcesRequest {
    /// Search criteria.
    pub search_monitored_resources_details: Option<SearchMonitoredResourcesDetails>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}
