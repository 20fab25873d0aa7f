//! Data models for stacks and jobs.

use chrono::{DateTime, Utc};
use oci_common::types::SortOrder;
use oci_common::wire::{DefinedTags, FreeformTags};
use oci_common::{oci_enum, oci_model, RetryOverride};
use serde_json::Value;
use std::collections::BTreeMap;

oci_enum! {
    /// Lifecycle state of a stack.
    pub enum StackLifecycleState {
        /// Being created.
        Creating => "CREATING",
        /// Active.
        Active => "ACTIVE",
        /// Being deleted.
        Deleting => "DELETING",
        /// Deleted.
        Deleted => "DELETED",
        /// Failed.
        Failed => "FAILED",
    }
}

oci_enum! {
    /// Terraform action a job runs.
    pub enum JobOperation {
        /// `terraform plan`.
        Plan => "PLAN",
        /// `terraform apply`.
        Apply => "APPLY",
        /// `terraform destroy`.
        Destroy => "DESTROY",
        /// Import a state file.
        ImportTfState => "IMPORT_TF_STATE",
    }
}

oci_enum! {
    /// Lifecycle state of a job.
    pub enum JobLifecycleState {
        /// Queued.
        Accepted => "ACCEPTED",
        /// Running.
        InProgress => "IN_PROGRESS",
        /// Failed.
        Failed => "FAILED",
        /// Finished.
        Succeeded => "SUCCEEDED",
        /// Being cancelled.
        Canceling => "CANCELING",
        /// Cancelled.
        Canceled => "CANCELED",
    }
}

oci_enum! {
    /// How an apply or destroy job chooses its plan.
    pub enum ExecutionPlanStrategy {
        /// Reuse the plan of an earlier plan job.
        FromPlanJobId => "FROM_PLAN_JOB_ID",
        /// Plan and apply without review.
        AutoApproved => "AUTO_APPROVED",
    }
}

oci_enum! {
    /// Sort key for `list_stacks`.
    pub enum StackSortBy {
        /// Creation time.
        TimeCreated => "TIMECREATED",
        /// Display name.
        DisplayName => "DISPLAYNAME",
    }
}

oci_model! {
    /// A Terraform configuration and its state.
    pub struct Stack {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Description.
        description: String => "description";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Lifecycle state.
        lifecycle_state: StackLifecycleState => "lifecycleState", policy = tolerant;
        /// Where the configuration comes from; shape depends on its type.
        config_source: Value => "configSource";
        /// Terraform input variables.
        variables: BTreeMap<String, String> => "variables";
        /// Terraform version.
        terraform_version: String => "terraformVersion";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// A stack in a list response.
    pub struct StackSummary {
        /// OCID.
        id: String => "id";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Description.
        description: String => "description";
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Lifecycle state.
        lifecycle_state: StackLifecycleState => "lifecycleState", policy = tolerant;
        /// Terraform version.
        terraform_version: String => "terraformVersion";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// What a job does.
    pub struct JobOperationDetails {
        /// Terraform action.
        operation: JobOperation => "operation";
        /// Plan selection for apply and destroy.
        execution_plan_strategy: ExecutionPlanStrategy => "executionPlanStrategy";
        /// Plan job to reuse with `FROM_PLAN_JOB_ID`.
        execution_plan_job_id: String => "executionPlanJobId";
        /// Upgrade providers before running.
        is_provider_upgrade_required: bool => "isProviderUpgradeRequired";
    }
}

oci_model! {
    /// Body of `create_job`.
    pub struct CreateJobDetails {
        /// Stack to run against.
        stack_id: String => "stackId";
        /// Display name.
        display_name: String => "displayName";
        /// Terraform action; superseded by `job_operation_details`.
        operation: JobOperation => "operation";
        /// Terraform action and its options.
        job_operation_details: JobOperationDetails => "jobOperationDetails";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

oci_model! {
    /// A Terraform job.
    pub struct Job {
        /// OCID.
        id: String => "id";
        /// Stack OCID.
        stack_id: String => "stackId";
        /// Compartment OCID.
        compartment_id: String => "compartmentId";
        /// Display name.
        display_name: String => "displayName";
        /// Terraform action.
        operation: JobOperation => "operation", policy = tolerant;
        /// Terraform action and its options.
        job_operation_details: JobOperationDetails => "jobOperationDetails";
        /// Lifecycle state.
        lifecycle_state: JobLifecycleState => "lifecycleState", policy = tolerant;
        /// Creation time.
        time_created: DateTime<Utc> => "timeCreated";
        /// Completion time.
        time_finished: DateTime<Utc> => "timeFinished";
        /// Free-form tags.
        freeform_tags: FreeformTags => "freeformTags";
        /// Defined tags.
        defined_tags: DefinedTags => "definedTags";
    }
}

/// Parameters of `list_stacks`.
#[derive(Debug, Clone, Default)]
pub struct ListStacksRequest {
    /// Compartment to list.
    pub compartment_id: Option<String>,
    /// Only the stack with this OCID.
    pub id: Option<String>,
    /// Only stacks with this display name.
    pub display_name: Option<String>,
    /// Only stacks in this state.
    pub lifecycle_state: Option<StackLifecycleState>,
    /// Sort key.
    pub sort_by: Option<StackSortBy>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page token from a previous `opc-next-page`.
    pub page: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `get_stack`.
#[derive(Debug, Clone, Default)]
pub struct GetStackRequest {
    /// Stack OCID.
    pub stack_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `create_job`.
#[derive(Debug, Clone, Default)]
pub struct CreateJobRequest {
    /// Job to run.
    pub create_job_details: Option<CreateJobDetails>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Idempotency token; generated when absent.
    pub opc_retry_token: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}

/// Parameters of `get_job`.
#[derive(Debug, Clone, Default)]
pub struct GetJobRequest {
    /// Job OCID.
    pub job_id: Option<String>,
    /// Client request id for tracing.
    pub opc_request_id: Option<String>,
    /// Retry behaviour for this call.
    pub retry: RetryOverride,
}
