//! # oci-common
//!
//! Core types and utilities shared by the OCI service crates.
//!
//! This crate provides the attribute codec that maps models to and from wire
//! JSON, strict/tolerant enum handling, and the retrying HTTP client every
//! service client is built on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and service error parsing
//! - [`attr`] - Tri-state attribute storage (`Unset`/`Null`/`Set`)
//! - [`wire`] - Wire-value coercion and field schemas
//! - [`enum_guard`] - Strict and tolerant enum validation, [`oci_enum!`]
//! - [`codec`] - Hydrate/dehydrate models, [`oci_model!`]
//! - [`types`] - Service catalogue and shared enums
//! - [`config`] - Validated client configuration
//! - [`retry`] - Retry policies and per-call overrides
//! - [`transport`] - HTTP transport and signing seams
//! - [`client`] - The retrying service client
//! - [`query`] / [`path`] - Request assembly
//! - [`response`] / [`paginate`] - Typed responses and paging

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod attr;
pub mod client;
pub mod codec;
pub mod config;
pub mod enum_guard;
pub mod error;
pub mod paginate;
pub mod path;
pub mod query;
pub mod response;
pub mod retry;
pub mod transport;
pub mod types;
pub mod wire;

// Re-export commonly used types
pub use attr::Attr;
pub use codec::Model;
pub use error::{Error, Result};
pub use response::OperationResponse;
pub use retry::{RetryOverride, RetryPolicy};

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
