//! Data models for Object Storage buckets.

use chrono::{DateTime, Utc};
use oci_common::wire::{DefinedTags, FreeformTags};
use oci_common::{oci_enum, oci_model, RetryOverride};
use std::collections::BTreeMap;

oci_enum! {
    /// Who may read the objects in a bucket without authentication.
    pub enum PublicAccessType {
        /// Authenticated access only.
        NoPublicAccess => "NoPublicAccess",
        /// Public read and list.
        ObjectRead => "ObjectRead",
        /// Public read without list.
        ObjectReadWithoutList => "ObjectReadWithoutList",
    }
}

oci_enum! {
    /// Storage tier of a bucket; fixed at creation.
    pub enum StorageTier {
        /// Standard storage.
        Standard => "Standard",
        /// Archive storage.
        Archive => "Archive",
    }
}

oci_enum! {
    /// Object versioning state.
    pub enum Versioning {
        /// Versioning on.
        Enabled => "Enabled",
        /// Versioning paused; existing versions kept.
        Suspended => "Suspended",
        /// Versioning never enabled.
        Disabled => "Disabled",
    }
}

oci_enum! {
    /// Automatic tiering of infrequently accessed objects.
    pub enum AutoTiering {
        /// No auto-tiering.
        Disabled => "Disabled",
        /// Move cold objects to infrequent access.
        InfrequentAccess => "InfrequentAccess",
    }
}

oci_enum! {
    /// Optional fields returned by `get_bucket`.
    pub enum BucketField {
        /// Approximate object count.
        ApproximateCount => "approximateCount",
        /// Approximate total size.
        ApproximateSize => "approximateSize",
        /// Auto-tiering state.
        AutoTiering => "autoTiering",
    }
}

oci_enum! {
    /// Optional fields returned by `list_buckets`.
    pub enum BucketSummaryField {
        /// Freeform and defined tags.
        Tags => "tags",
    }
}

oci_model! {
    /// A bucket as returned by the service.
    ///
    /// Enum fields are tolerant: values introduced by newer service versions
    /// are kept as `Unknown` instead of failing the call.
    pub struct Bucket {
        /// Namespace the bucket lives in.
        namespace: String => "namespace";
        /// Bucket name, unique within the namespace.
        name: String => "name";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// User metadata.
        metadata: BTreeMap<String, String> => "metadata";
        /// OCID of the creating user.
        created_by: String => "createdBy";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Entity tag.
        etag: String => "etag";
        /// Public access level.
        public_access_type: PublicAccessType => "publicAccessType", policy = tolerant;
        /// Storage tier.
        storage_tier: StorageTier => "storageTier", policy = tolerant;
        /// Whether object events are emitted.
        object_events_enabled: bool => "objectEventsEnabled";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
        /// Master encryption key OCID.
        kms_key_id: String => "kmsKeyId";
        /// Etag of the lifecycle policy, if any.
        object_lifecycle_policy_etag: String => "objectLifecyclePolicyEtag";
        /// Approximate object count; requested through `fields`.
        approximate_count: i64 => "approximateCount";
        /// Approximate size in bytes; requested through `fields`.
        approximate_size: i64 => "approximateSize";
        /// Whether replication is enabled.
        replication_enabled: bool => "replicationEnabled";
        /// Whether the bucket is a read-only replication target.
        is_read_only: bool => "isReadOnly";
        /// Bucket OCID.
        id: String => "id";
        /// Versioning state.
        versioning: Versioning => "versioning", policy = tolerant;
        /// Auto-tiering state.
        auto_tiering: AutoTiering => "autoTiering", policy = tolerant;
    }
}

oci_model! {
    /// A bucket in a list response.
    pub struct BucketSummary {
        /// Namespace.
        namespace: String => "namespace";
        /// Bucket name.
        name: String => "name";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// OCID of the creating user.
        created_by: String => "createdBy";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Entity tag.
        etag: String => "etag";
        /// Free-form tags; only with `fields=tags`.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags; only with `fields=tags`.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// Body of `create_bucket`.
    pub struct CreateBucketDetails {
        /// Bucket name.
        name: String => "name";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// User metadata.
        metadata: BTreeMap<String, String> => "metadata";
        /// Public access level.
        public_access_type: PublicAccessType => "publicAccessType",
            default = PublicAccessType::NoPublicAccess;
        /// Storage tier.
        storage_tier: StorageTier => "storageTier", default = StorageTier::Standard;
        /// Whether object events are emitted.
        object_events_enabled: bool => "objectEventsEnabled";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
        /// Master encryption key OCID.
        kms_key_id: String => "kmsKeyId";
        /// Versioning state.
        versioning: Versioning => "versioning";
        /// Auto-tiering state.
        auto_tiering: AutoTiering => "autoTiering";
    }
}

oci_model! {
    /// Body of `update_bucket`. Only set fields are changed.
    pub struct UpdateBucketDetails {
        /// Namespace.
        namespace: String => "namespace";
        /// Move the bucket to this compartment.
        compartment_id: String => "compartmentId";
        /// Rename the bucket.
        name: String => "name";
        /// Replace user metadata.
        metadata: BTreeMap<String, String> => "metadata";
        /// Public access level.
        public_access_type: PublicAccessType => "publicAccessType";
        /// Whether object events are emitted.
        object_events_enabled: bool => "objectEventsEnabled";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
        /// Master encryption key OCID.
        kms_key_id: String => "kmsKeyId";
        /// Versioning state.
        versioning: Versioning => "versioning";
        /// Auto-tiering state.
        auto_tiering: AutoTiering => "autoTiering";
    }
}

/// Parameters of `get_namespace`.
#[derive(Debug, Clone, Default)]
pub struct GetNamespaceRequest {
    /// Look up the namespace of this compartment's tenancy.
    pub compartment_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `create_bucket`.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketRequest {
    /// Namespace.
    pub namespace_name: Option<String>,
    /// Bucket to create.
    pub create_bucket_details: Option<CreateBucketDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `get_bucket`.
#[derive(Debug, Clone, Default)]
pub struct GetBucketRequest {
    /// Namespace.
    pub namespace_name: Option<String>,
    /// Bucket name.
    pub bucket_name: Option<String>,
    /// Only return the bucket if its etag matches.
    pub if_match: Option<String>,
    /// Only return the bucket if its etag differs.
    pub if_none_match: Option<String>,
    /// Optional fields to include.
    pub fields: Vec<BucketField>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `update_bucket`.
#[derive(Debug, Clone, Default)]
pub struct UpdateBucketRequest {
    /// Namespace.
    pub namespace_name: Option<String>,
    /// Bucket name.
    pub bucket_name: Option<String>,
    /// Changes to apply.
    pub update_bucket_details: Option<UpdateBucketDetails>,
    /// Only update if the etag matches.
    pub if_match: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `delete_bucket`.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketRequest {
    /// Namespace.
    pub namespace_name: Option<String>,
    /// Bucket name.
    pub bucket_name: Option<String>,
    /// Only delete if the etag matches.
    pub if_match: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `list_buckets`.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsRequest {
    /// Namespace.
    pub namespace_name: Option<String>,
    /// Compartment to list; required.
    pub compartment_id: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Optional fields to include.
    pub fields: Vec<BucketSummaryField>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}
