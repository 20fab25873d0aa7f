//! Service catalogue and shared wire enums.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::client::{
    APPLICATION_MIGRATION_DEFAULT_TIMEOUT, DATABASE_MANAGEMENT_DEFAULT_TIMEOUT,
    OBJECT_STORAGE_DEFAULT_TIMEOUT, OSUB_SUBSCRIPTION_DEFAULT_TIMEOUT,
    RESOURCE_MANAGER_DEFAULT_TIMEOUT, STACK_MONITORING_DEFAULT_TIMEOUT,
};
use crate::error::{Error, Result};

/// Placeholder substituted with the region identifier in endpoint templates.
pub const REGION_PLACEHOLDER: &str = "{region}";

/// Supported OCI services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OciService {
    /// Object Storage
    ObjectStorage,
    /// Database Management
    DatabaseManagement,
    /// Stack Monitoring
    StackMonitoring,
    /// Application Migration
    ApplicationMigration,
    /// Resource Manager
    ResourceManager,
    /// Subscription billing
    OsubSubscription,
}

impl OciService {
    /// Returns the service name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ObjectStorage => "objectstorage",
            Self::DatabaseManagement => "databasemanagement",
            Self::StackMonitoring => "stackmonitoring",
            Self::ApplicationMigration => "applicationmigration",
            Self::ResourceManager => "resourcemanager",
            Self::OsubSubscription => "osubsubscription",
        }
    }

    /// Returns all available services.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ObjectStorage,
            Self::DatabaseManagement,
            Self::StackMonitoring,
            Self::ApplicationMigration,
            Self::ResourceManager,
            Self::OsubSubscription,
        ]
    }

    /// Regional endpoint template; `{region}` is replaced by the region id.
    #[must_use]
    pub const fn endpoint_template(&self) -> &'static str {
        match self {
            Self::ObjectStorage => "https://objectstorage.{region}.oraclecloud.com",
            Self::DatabaseManagement => "https://dbmgmt.{region}.oci.oraclecloud.com",
            Self::StackMonitoring => "https://stack-monitoring.{region}.oci.oraclecloud.com",
            Self::ApplicationMigration => "https://applicationmigration.{region}.oci.oraclecloud.com",
            Self::ResourceManager => "https://resourcemanager.{region}.oraclecloud.com",
            Self::OsubSubscription => "https://csaap-e.oracle.com",
        }
    }

    /// API version path prefix prepended to every operation path.
    #[must_use]
    pub const fn api_prefix(&self) -> &'static str {
        match self {
            Self::ObjectStorage => "",
            Self::DatabaseManagement => "/20201101",
            Self::StackMonitoring => "/20210330",
            Self::ApplicationMigration => "/20191031",
            Self::ResourceManager => "/20180917",
            Self::OsubSubscription => "/20210501",
        }
    }

    /// Default request timeout for the service.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_secs(match self {
            Self::ObjectStorage => OBJECT_STORAGE_DEFAULT_TIMEOUT,
            Self::DatabaseManagement => DATABASE_MANAGEMENT_DEFAULT_TIMEOUT,
            Self::StackMonitoring => STACK_MONITORING_DEFAULT_TIMEOUT,
            Self::ApplicationMigration => APPLICATION_MIGRATION_DEFAULT_TIMEOUT,
            Self::ResourceManager => RESOURCE_MANAGER_DEFAULT_TIMEOUT,
            Self::OsubSubscription => OSUB_SUBSCRIPTION_DEFAULT_TIMEOUT,
        })
    }

    /// Regional endpoint for this service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `region` is blank or contains
    /// characters that cannot appear in a host name.
    pub fn regional_endpoint(&self, region: &str) -> Result<String> {
        let region = region.trim();
        if region.is_empty()
            || !region
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::ConfigError(format!("Invalid region: `{region}`")));
        }
        Ok(self
            .endpoint_template()
            .replace(REGION_PLACEHOLDER, &region.to_ascii_lowercase()))
    }
}

impl FromStr for OciService {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|service| service.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown service: {s}")))
    }
}

impl std::fmt::Display for OciService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

crate::oci_enum! {
    /// Sort direction for list operations.
    pub enum SortOrder {
        /// Ascending.
        Asc => "ASC",
        /// Descending.
        Desc => "DESC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names_round_trip() {
        for service in OciService::all() {
            assert_eq!(service.name().parse::<OciService>().unwrap(), *service);
        }
        assert_eq!(
            "ObjectStorage".parse::<OciService>().unwrap(),
            OciService::ObjectStorage
        );
        assert!("compute".parse::<OciService>().is_err());
    }

    #[test]
    fn test_regional_endpoint() {
        assert_eq!(
            OciService::ObjectStorage
                .regional_endpoint("us-phoenix-1")
                .unwrap(),
            "https://objectstorage.us-phoenix-1.oraclecloud.com"
        );
        assert_eq!(
            OciService::DatabaseManagement
                .regional_endpoint("US-ASHBURN-1")
                .unwrap(),
            "https://dbmgmt.us-ashburn-1.oci.oraclecloud.com"
        );
        assert_eq!(
            OciService::OsubSubscription
                .regional_endpoint("eu-frankfurt-1")
                .unwrap(),
            "https://csaap-e.oracle.com"
        );
    }

    #[test]
    fn test_regional_endpoint_rejects_bad_region() {
        assert!(matches!(
            OciService::StackMonitoring.regional_endpoint("  "),
            Err(Error::ConfigError(_))
        ));
        assert!(OciService::StackMonitoring
            .regional_endpoint("us/phoenix")
            .is_err());
    }

    #[test]
    fn test_api_prefixes() {
        assert_eq!(OciService::ObjectStorage.api_prefix(), "");
        assert_eq!(OciService::ResourceManager.api_prefix(), "/20180917");
        assert_eq!(
            OciService::ApplicationMigration.default_timeout(),
            Duration::from_secs(APPLICATION_MIGRATION_DEFAULT_TIMEOUT)
        );
    }

    #[test]
    fn test_sort_order_wire_values() {
        assert_eq!(SortOrder::Asc.to_string(), "ASC");
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("desc".parse::<SortOrder>().is_err());
    }
}
