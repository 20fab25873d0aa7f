//! Data models for subscriptions.

use chrono::{DateTime, Utc};
use oci_common::types::SortOrder;
use oci_common::{oci_enum, oci_model, RetryOverride};

oci_enum! {
    /// Status of a subscription.
    pub enum SubscriptionStatus {
        /// Awaiting provisioning.
        Pending => "PENDING",
        /// In effect.
        Active => "ACTIVE",
        /// Ended at its term.
        Expired => "EXPIRED",
        /// Ended early.
        Canceled => "CANCELED",
    }
}

oci_enum! {
    /// Sort key for `list_subscriptions`.
    pub enum SubscriptionSortBy {
        /// Order number.
        OrderNumber => "ORDERNUMBER",
        /// Invoicing time.
        TimeInvoicing => "TIMEINVOICING",
    }
}

oci_model! {
    /// Billing currency.
    pub struct Currency {
        /// ISO 4217 code.
        iso_code: String => "isoCode";
        /// Display name.
        name: String => "name";
        /// Decimal places.
        std_precision: i64 => "stdPrecision";
    }
}

oci_model! {
    /// A product line of a subscribed service.
    pub struct SubscriptionProduct {
        /// Part number.
        part_number: String => "partNumber";
        /// Product name.
        name: String => "name";
        /// Unit of measure.
        unit_of_measure: String => "unitOfMeasure";
        /// Provisioning group.
        provisioning_group: String => "provisioningGroup";
    }
}

oci_model! {
    /// A service within a subscription.
    pub struct SubscribedServiceSummary {
        /// Subscribed service id.
        id: String => "id";
        /// Product.
        product: SubscriptionProduct => "product";
        /// Quantity, as sent by the service.
        quantity: String => "quantity";
        /// Status text.
        status: String => "status";
        /// Net unit price.
        net_unit_price: String => "netUnitPrice";
        /// Total value.
        total_value: String => "totalValue";
        /// Start of the service term.
        time_start: DateTime<Utc> => "timeStart";
        /// End of the service term.
        time_end: DateTime<Utc> => "timeEnd";
        /// Opportunity number.
        booking_opty_number: String => "bookingOptyNumber";
    }
}

oci_model! {
    /// A subscription in a list response.
    pub struct SubscriptionSummary {
        /// Subscription id.
        id: String => "id";
        /// Status.
        status: SubscriptionStatus => "status", policy = tolerant;
        /// Start of the term.
        time_start: DateTime<Utc> => "timeStart";
        /// End of the term.
        time_end: DateTime<Utc> => "timeEnd";
        /// Billing currency.
        currency: Currency => "currency";
        /// Service name.
        service_name: String => "serviceName";
        /// Total value.
        total_value: String => "totalValue";
        /// Services in the subscription.
        subscribed_services: Vec<SubscribedServiceSummary> => "subscribedServices";
    }
}

/// Parameters of `list_subscriptions`.
///
/// One of `plan_number`, `subscription_id` or `buyer_email` is required.
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsRequest {
    /// Compartment; required.
    pub compartment_id: Option<String>,
    /// Plan number.
    pub plan_number: Option<String>,
    /// Subscription id.
    pub subscription_id: Option<String>,
    /// Buyer email.
    pub buyer_email: Option<String>,
    /// Include commitment details.
    pub is_commit_info_required: Option<bool>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Sort key.
    pub sort_by: Option<SubscriptionSortBy>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Gateway subscription id, for calls routed through the gateway.
    pub x_one_gateway_subscription_id: Option<String>,
    /// Origin region, for calls routed through the gateway.
    pub x_one_origin_region: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}
