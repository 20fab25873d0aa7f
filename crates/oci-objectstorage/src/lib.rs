//! Object Storage client and data models.
//!
//! Provides typed bucket models and an asynchronous client for the namespace
//! and bucket operations of the Object Storage API.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ObjectStorageClient, ObjectStorageClientBuilder};
pub use models::{
    AutoTiering, Bucket, BucketSummary, CreateBucketDetails, PublicAccessType, StorageTier,
    UpdateBucketDetails, Versioning,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
