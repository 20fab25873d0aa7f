//! Stack Monitoring client and data models.
//!
//! Provides monitored resource models and an asynchronous client for
//! creating, fetching, deleting and searching monitored resources.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{StackMonitoringClient, StackMonitoringClientBuilder};
pub use models::{
    CreateMonitoredResourceDetails, MonitoredResource, MonitoredResourceCollection,
    MonitoredResourceProperty, MonitoredResourceSummary, ResourceLifecycleState,
    SearchMonitoredResourcesDetails,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
