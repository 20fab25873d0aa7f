//! Resource Manager client and data models.
//!
//! Provides stack and job models and an asynchronous client for listing
//! stacks and running Terraform jobs against them.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ResourceManagerClient, ResourceManagerClientBuilder};
pub use models::{
    CreateJobDetails, Job, JobLifecycleState, JobOperation, JobOperationDetails, Stack,
    StackLifecycleState, StackSummary,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
