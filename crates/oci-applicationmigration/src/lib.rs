//! Application Migration client and data models.
//!
//! Lists, fetches, creates and deletes migrations of applications from
//! classic cloud services.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ApplicationMigrationClient, ApplicationMigrationClientBuilder};
pub use models::{
    CreateMigrationDetails, DiscoveryDetails, Migration, MigrationLifecycleState,
    MigrationLifecycleSubstate, MigrationSummary, MigrationType, TargetDatabaseConfig,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
