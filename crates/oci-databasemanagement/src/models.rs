//! Data models for managed databases and database parameters.

use chrono::{DateTime, Utc};
use oci_common::types::SortOrder;
use oci_common::wire::{DefinedTags, FreeformTags};
use oci_common::{oci_enum, oci_model, RetryOverride};
use std::collections::BTreeMap;

oci_enum! {
    /// Where and how the database is hosted.
    pub enum DatabaseType {
        /// External single-instance database.
        ExternalSidb => "EXTERNAL_SIDB",
        /// External RAC database.
        ExternalRac => "EXTERNAL_RAC",
        /// Cloud single-instance database.
        CloudSidb => "CLOUD_SIDB",
        /// Cloud RAC database.
        CloudRac => "CLOUD_RAC",
        /// Autonomous database on shared infrastructure.
        Shared => "SHARED",
        /// Autonomous database on dedicated infrastructure.
        Dedicated => "DEDICATED",
    }
}

oci_enum! {
    /// Container layout of the database.
    pub enum DatabaseSubType {
        /// Container database.
        Cdb => "CDB",
        /// Pluggable database.
        Pdb => "PDB",
        /// Non-container database.
        NonCdb => "NON_CDB",
        /// Autonomous container database.
        Acd => "ACD",
        /// Autonomous database.
        Adb => "ADB",
    }
}

oci_enum! {
    /// Infrastructure the database is deployed on.
    pub enum DeploymentType {
        /// On-premises.
        Onpremise => "ONPREMISE",
        /// Bare metal DB system.
        Bm => "BM",
        /// Virtual machine DB system.
        Vm => "VM",
        /// Exadata.
        Exadata => "EXADATA",
        /// Exadata Cloud@Customer.
        ExadataCc => "EXADATA_CC",
        /// Autonomous.
        Autonomous => "AUTONOMOUS",
    }
}

oci_enum! {
    /// Where a parameter change takes effect.
    pub enum ParameterScope {
        /// Running instance only.
        Memory => "MEMORY",
        /// Server parameter file only.
        Spfile => "SPFILE",
        /// Both.
        Both => "BOTH",
    }
}

oci_enum! {
    /// Reachability of the database.
    pub enum DatabaseStatus {
        /// Up.
        Up => "UP",
        /// Down.
        Down => "DOWN",
        /// The service could not determine the status.
        Indeterminate => "UNKNOWN",
    }
}

oci_enum! {
    /// Workload of an autonomous database.
    pub enum WorkloadType {
        /// Transaction processing.
        Oltp => "OLTP",
        /// Data warehouse.
        Dw => "DW",
        /// JSON database.
        Ajd => "AJD",
        /// APEX service.
        Apex => "APEX",
    }
}

oci_enum! {
    /// Role used to connect.
    pub enum DatabaseCredentialRole {
        /// Normal user.
        Normal => "NORMAL",
        /// SYSDBA.
        Sysdba => "SYSDBA",
    }
}

oci_enum! {
    /// Outcome of one parameter update.
    pub enum ParameterUpdateStatus {
        /// Applied.
        Succeeded => "SUCCEEDED",
        /// Rejected.
        Failed => "FAILED",
    }
}

oci_enum! {
    /// Sort key for `list_managed_databases`.
    pub enum ManagedDatabaseSortBy {
        /// Creation time; descending by default.
        TimeCreated => "TIMECREATED",
        /// Name; ascending by default.
        Name => "NAME",
    }
}

oci_model! {
    /// Credentials used to run a parameter action on the database.
    pub struct DatabaseCredentials {
        /// Database user.
        username: String => "userName";
        /// Password; prefer `password_secret_id`.
        password: String => "password";
        /// Vault secret holding the password.
        password_secret_id: String => "passwordSecretId";
        /// Connection role.
        role: DatabaseCredentialRole => "role";
    }
}

oci_model! {
    /// A database registered with Database Management.
    pub struct ManagedDatabase {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Name.
        name: String => "name";
        /// Hosting type.
        database_type: DatabaseType => "databaseType", policy = tolerant;
        /// Container layout.
        database_sub_type: DatabaseSubType => "databaseSubType", policy = tolerant;
        /// Infrastructure.
        deployment_type: DeploymentType => "deploymentType", policy = tolerant;
        /// Whether the database is clustered.
        is_cluster: bool => "isCluster";
        /// OCID of the parent CDB for a PDB.
        parent_container_id: String => "parentContainerId";
        /// Reachability.
        database_status: DatabaseStatus => "databaseStatus", policy = tolerant;
        /// Autonomous workload.
        workload_type: WorkloadType => "workloadType", policy = tolerant;
        /// DB system OCID.
        db_system_id: String => "dbSystemId";
        /// Exadata storage system OCID.
        storage_system_id: String => "storageSystemId";
        /// Database version.
        database_version: String => "databaseVersion";
        /// Registration time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Extra service-specific details.
        additional_details: BTreeMap<String, String> => "additionalDetails";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// A managed database in a list response.
    pub struct ManagedDatabaseSummary {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Name.
        name: String => "name";
        /// Hosting type.
        database_type: DatabaseType => "databaseType", policy = tolerant;
        /// Container layout.
        database_sub_type: DatabaseSubType => "databaseSubType", policy = tolerant;
        /// Infrastructure.
        deployment_type: DeploymentType => "deploymentType", policy = tolerant;
        /// Autonomous workload.
        workload_type: WorkloadType => "workloadType", policy = tolerant;
        /// Whether the database is clustered.
        is_cluster: bool => "isCluster";
        /// OCID of the parent CDB for a PDB.
        parent_container_id: String => "parentContainerId";
        /// Database version.
        database_version: String => "databaseVersion";
        /// Registration time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// One page of managed databases.
    pub struct ManagedDatabaseCollection {
        /// Summaries on this page.
        items: Vec<ManagedDatabaseSummary> => "items";
    }
}

oci_model! {
    /// Body of `reset_database_parameters`.
    pub struct ResetDatabaseParametersDetails {
        /// Connection credentials.
        credentials: DatabaseCredentials => "credentials";
        /// Where to reset.
        scope: ParameterScope => "scope";
        /// Parameter names to reset to their defaults.
        parameters: Vec<String> => "parameters";
    }
}

oci_model! {
    /// New value for one parameter.
    pub struct ChangeDatabaseParameterDetails {
        /// Parameter name.
        name: String => "name";
        /// New value.
        value: String => "value";
        /// Comment stored with the change.
        update_comment: String => "updateComment";
    }
}

oci_model! {
    /// Body of `change_database_parameters`.
    pub struct ChangeDatabaseParametersDetails {
        /// Connection credentials.
        credentials: DatabaseCredentials => "credentials";
        /// Where to apply.
        scope: ParameterScope => "scope";
        /// Parameters to change.
        parameters: Vec<ChangeDatabaseParameterDetails> => "parameters";
    }
}

oci_model! {
    /// Result of updating one parameter.
    pub struct DatabaseParameterUpdateStatus {
        /// Outcome.
        status: ParameterUpdateStatus => "status", policy = tolerant;
        /// Database error code on failure.
        error_code: String => "errorCode";
        /// Database error message on failure.
        error_message: String => "errorMessage";
    }
}

oci_model! {
    /// Per-parameter outcome of a parameter action.
    pub struct UpdateDatabaseParametersResult {
        /// Outcome keyed by parameter name.
        status: BTreeMap<String, DatabaseParameterUpdateStatus> => "status";
    }
}

/// Parameters of `get_managed_database`.
#[derive(Debug, Clone, Default)]
pub struct GetManagedDatabaseRequest {
    /// Managed database OCID.
    pub managed_database_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `list_managed_databases`.
#[derive(Debug, Clone, Default)]
pub struct ListManagedDatabasesRequest {
    /// Compartment to list; required.
    pub compartment_id: Option<String>,
    /// Only the database with this OCID.
    pub id: Option<String>,
    /// Only databases with this exact name.
    pub name: Option<String>,
    /// Only databases on this infrastructure.
    pub deployment_type: Option<DeploymentType>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Sort key.
    pub sort_by: Option<ManagedDatabaseSortBy>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `reset_database_parameters`.
#[derive(Debug, Clone, Default)]
pub struct ResetDatabaseParametersRequest {
    /// Managed database OCID.
    pub managed_database_id: Option<String>,
    /// Parameters to reset.
    pub reset_database_parameters_details: Option<ResetDatabaseParametersDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Idempotency token; generated when absent.
    pub opc_retry_token: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `change_database_parameters`.
#[derive(Debug, Clone, Default)]
pub struct ChangeDatabaseParametersRequest {
    /// Managed database OCID.
    pub managed_database_id: Option<String>,
    /// Parameters to change.
    pub change_database_parameters_details: Option<ChangeDatabaseParametersDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Idempotency token; generated when absent.
    pub opc_retry_token: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}
