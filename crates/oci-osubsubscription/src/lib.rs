//! Subscription billing client and data models.
//!
//! Lists the subscriptions of a compartment together with their subscribed
//! services, products and currency.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{SubscriptionClient, SubscriptionClientBuilder};
pub use models::{
    Currency, SubscribedServiceSummary, SubscriptionProduct, SubscriptionStatus,
    SubscriptionSummary,
};

/// Convenient result alias that reuses the shared OCI error type.
pub type Result<T> = oci_common::Result<T>;
