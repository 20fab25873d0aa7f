//! Database Management client and data models.
//!
//! Covers managed database lookup and the database parameter actions of the
//! Database Management API.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{DatabaseManagementClient, DatabaseManagementClientBuilder};
pub use models::{
    ChangeDatabaseParameterDetails, ChangeDatabaseParametersDetails, DatabaseCredentials,
    ManagedDatabase, ManagedDatabaseCollection, ManagedDatabaseSummary,
    ResetDatabaseParametersDetails, UpdateDatabaseParametersResult,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
