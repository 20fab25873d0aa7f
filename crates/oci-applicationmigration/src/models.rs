//! Data models for application migrations.

use chrono::{DateTime, Utc};
use oci_common::types::SortOrder;
use oci_common::wire::{DefinedTags, FreeformTags};
use oci_common::{oci_enum, oci_model, RetryOverride};
use serde_json::Value;
use std::collections::BTreeMap;

oci_enum! {
    /// Lifecycle state of a migration.
    pub enum MigrationLifecycleState {
        /// Being created.
        Creating => "CREATING",
        /// Being updated.
        Updating => "UPDATING",
        /// Active.
        Active => "ACTIVE",
        /// Inactive.
        Inactive => "INACTIVE",
        /// Being deleted.
        Deleting => "DELETING",
        /// Deleted.
        Deleted => "DELETED",
        /// Failed.
        Failed => "FAILED",
        /// Completed.
        Succeeded => "SUCCEEDED",
    }
}

oci_enum! {
    /// Progress of an active migration.
    pub enum MigrationLifecycleSubstate {
        /// Discovering the source application.
        DiscoveringApplication => "DISCOVERING_APPLICATION",
        /// Discovery failed.
        DiscoveryFailed => "DISCOVERY_FAILED",
        /// Discovery finished.
        DiscoverySucceeded => "DISCOVERY_SUCCEEDED",
        /// Migrating.
        Migrating => "MIGRATING",
        /// Migration failed.
        MigrationFailed => "MIGRATION_FAILED",
        /// Migration finished.
        MigrationSucceeded => "MIGRATION_SUCCEEDED",
        /// Configuration values must be supplied.
        MissingConfigValues => "MISSING_CONFIG_VALUES",
        /// Ready to migrate.
        Ready => "READY",
    }
}

oci_enum! {
    /// Kind of application being migrated.
    pub enum MigrationType {
        /// Java Cloud Service.
        Jcs => "JCS",
        /// SOA Cloud Service.
        Soacs => "SOACS",
        /// Integration Cloud.
        Oic => "OIC",
        /// Analytics Cloud.
        Oac => "OAC",
        /// Integration Cloud Service (classic).
        Ics => "ICS",
        /// Process Cloud Service.
        Pcs => "PCS",
    }
}

oci_enum! {
    /// Sort key for `list_migrations`.
    pub enum MigrationSortBy {
        /// Creation time.
        TimeCreated => "TIMECREATED",
        /// Display name.
        DisplayName => "DISPLAYNAME",
    }
}

oci_model! {
    /// Credentials used to discover the source application.
    pub struct DiscoveryDetails {
        /// Source application kind.
        discovery_type: MigrationType => "type";
        /// WebLogic administrator, for JCS and SOACS sources.
        weblogic_user: String => "weblogicUser";
        /// WebLogic administrator password.
        weblogic_password: String => "weblogicPassword";
        /// Service instance user, for integration and analytics sources.
        service_instance_user: String => "serviceInstanceUser";
        /// Service instance password.
        service_instance_password: String => "serviceInstancePassword";
    }
}

oci_model! {
    /// Database the migrated application should use.
    pub struct TargetDatabaseConfig {
        /// Target database OCID.
        database_id: String => "databaseId";
        /// Database user.
        database_user: String => "databaseUser";
        /// Database password.
        database_password: String => "databasePassword";
    }
}

oci_model! {
    /// A migration.
    pub struct Migration {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Description.
        description: String => "description";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Source OCID.
        source_id: String => "sourceId";
        /// Application name in the source.
        application_name: String => "applicationName";
        /// Application kind.
        application_type: MigrationType => "applicationType", policy = tolerant;
        /// Whether only selected artifacts are migrated.
        is_selective_migration: bool => "isSelectiveMigration";
        /// Service-level configuration.
        service_config: BTreeMap<String, Value> => "serviceConfig";
        /// Application-level configuration.
        application_config: BTreeMap<String, Value> => "applicationConfig";
        /// Lifecycle state.
        lifecycle_state: MigrationLifecycleState => "lifecycleState", policy = tolerant;
        /// Human-readable lifecycle detail.
        lifecycle_details: String => "lifecycleDetails";
        /// Progress within the lifecycle state.
        migration_state: MigrationLifecycleSubstate => "migrationState", policy = tolerant;
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// A migration in a list response.
    pub struct MigrationSummary {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Application kind.
        application_type: MigrationType => "applicationType", policy = tolerant;
        /// Lifecycle state.
        lifecycle_state: MigrationLifecycleState => "lifecycleState", policy = tolerant;
        /// Human-readable lifecycle detail.
        lifecycle_details: String => "lifecycleDetails";
        /// Progress within the lifecycle state.
        migration_state: MigrationLifecycleSubstate => "migrationState", policy = tolerant;
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// Body of `create_migration`.
    pub struct CreateMigrationDetails {
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Description.
        description: String => "description";
        /// Source OCID.
        source_id: String => "sourceId";
        /// Application name in the source.
        application_name: String => "applicationName";
        /// How to discover the application.
        discovery_details: DiscoveryDetails => "discoveryDetails";
        /// Target database settings.
        target_database_config: TargetDatabaseConfig => "targetDatabaseConfig";
        /// Whether only selected artifacts are migrated.
        is_selective_migration: bool => "isSelectiveMigration", default = false;
        /// Service-level configuration.
        service_config: BTreeMap<String, Value> => "serviceConfig";
        /// Application-level configuration.
        application_config: BTreeMap<String, Value> => "applicationConfig";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

/// Parameters of `list_migrations`.
#[derive(Debug, Clone, Default)]
pub struct ListMigrationsRequest {
    /// Compartment to list; required.
    pub compartment_id: Option<String>,
    /// Only the migration with this OCID.
    pub id: Option<String>,
    /// Only migrations with this display name.
    pub display_name: Option<String>,
    /// Only migrations in this state.
    pub lifecycle_state: Option<MigrationLifecycleState>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Sort key.
    pub sort_by: Option<MigrationSortBy>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `get_migration`.
#[derive(Debug, Clone, Default)]
pub struct GetMigrationRequest {
    /// Migration OCID.
    pub migration_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `create_migration`.
#[derive(Debug, Clone, Default)]
pub struct CreateMigrationRequest {
    /// Migration to create.
    pub create_migration_details: Option<CreateMigrationDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Idempotency token; generated when absent.
    pub opc_retry_token: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `delete_migration`.
#[derive(Debug, Clone, Default)]
pub struct DeleteMigrationRequest {
    /// Migration OCID.
    pub migration_id: Option<String>,
    /// Only delete if the etag matches.
    pub if_match: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

#[cfg(test)]
mod tests {
    use super::*;
    use oci_common::codec;
    use oci_common::{Attr, Error};
    use serde_json::json;

    #[test]
    fn selective_migration_default_only_when_absent() {
        let omitted: CreateMigrationDetails =
            codec::hydrate(&json!({"displayName": "m1"})).unwrap().unwrap();
        assert_eq!(omitted.is_selective_migration, Attr::Set(false));

        let null: CreateMigrationDetails =
            codec::hydrate(&json!({"isSelectiveMigration": null})).unwrap().unwrap();
        assert_eq!(null.is_selective_migration, Attr::Null);

        let local: CreateMigrationDetails =
            codec::hydrate(&json!({"is_selective_migration": true})).unwrap().unwrap();
        assert_eq!(local.is_selective_migration, Attr::Set(true));
    }

    #[test]
    fn discovery_type_is_strict() {
        let err = codec::hydrate::<CreateMigrationDetails>(&json!({
            "discoveryDetails": {"type": "WLS", "weblogicUser": "weblogic"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref field, ref value, .. }
            if field == "discovery_type" && value == "WLS"));
    }

    #[test]
    fn free_form_config_values_round_trip() {
        let wire = json!({
            "serviceConfig": {
                "shape": {"value": "VM.Standard2.1"},
                "ocpuCount": 2
            },
            "lifecycleState": "NEEDS_ATTENTION",
            "migrationState": "READY"
        });
        let migration: Migration = codec::hydrate(&wire).unwrap().unwrap();
        assert_eq!(
            migration.migration_state.get(),
            Some(&MigrationLifecycleSubstate::Ready)
        );
        assert_eq!(codec::dehydrate(&migration), *wire.as_object().unwrap());
    }

    #[test]
    fn non_object_input_yields_nothing() {
        assert!(codec::hydrate::<Migration>(&json!("migration")).unwrap().is_none());
        assert!(codec::hydrate::<Migration>(&json!([1, 2])).unwrap().is_none());
    }
}
