//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa when generating OpenAPI"
)]

use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// A backing service is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "since must be an integer number of milliseconds: soon")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::JobStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobStatus, rename_all = "snake_case")]
pub enum JobStatusSchema {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::Job`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Job, rename_all = "camelCase")]
pub struct JobSchema {
    id: Uuid,
    org_id: Uuid,
    assigned_carer_id: Option<Uuid>,
    pool_id: Option<Uuid>,
    plan_id: Option<Uuid>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    status: JobStatusSchema,
    notes: Option<String>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::Pool`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Pool, rename_all = "camelCase")]
pub struct PoolSchema {
    id: Uuid,
    org_id: Uuid,
    client_id: Uuid,
    #[schema(example = "Backyard pool")]
    name: String,
    address: String,
    volume_l: Option<i32>,
    /// Target chemistry ranges keyed by measurement name.
    targets: serde_json::Value,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::VisitEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::VisitEntry, rename_all = "camelCase")]
pub struct VisitEntrySchema {
    id: Uuid,
    org_id: Uuid,
    job_id: Uuid,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::Reading`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Reading, rename_all = "camelCase")]
pub struct ReadingSchema {
    id: Uuid,
    org_id: Uuid,
    visit_id: Uuid,
    ph: Option<f64>,
    free_chlorine: Option<f64>,
    total_chlorine: Option<f64>,
    alkalinity: Option<f64>,
    calcium_hardness: Option<f64>,
    cyanuric_acid: Option<f64>,
    salt: Option<f64>,
    temperature_c: Option<f64>,
    measured_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::ChemicalsUsed`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ChemicalsUsed, rename_all = "camelCase")]
pub struct ChemicalsUsedSchema {
    id: Uuid,
    org_id: Uuid,
    visit_id: Uuid,
    #[schema(example = "liquid chlorine")]
    chemical: String,
    quantity: f64,
    #[schema(example = "L")]
    unit: String,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::IssueSeverity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IssueSeverity, rename_all = "snake_case")]
pub enum IssueSeveritySchema {
    Low,
    Medium,
    High,
    Critical,
}

/// OpenAPI schema for [`crate::domain::IssueStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IssueStatus, rename_all = "snake_case")]
pub enum IssueStatusSchema {
    Open,
    Resolved,
}

/// OpenAPI schema for [`crate::domain::Issue`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Issue, rename_all = "camelCase")]
pub struct IssueSchema {
    id: Uuid,
    org_id: Uuid,
    visit_id: Uuid,
    kind: String,
    severity: IssueSeveritySchema,
    status: IssueStatusSchema,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::VanStockItem`].
///
/// Reserved; the server currently always returns an empty list.
#[derive(ToSchema)]
#[schema(as = crate::domain::VanStockItem, rename_all = "camelCase")]
pub struct VanStockItemSchema {
    item_id: Uuid,
    name: String,
    quantity: f64,
    unit: String,
}

/// OpenAPI schema for [`crate::domain::Tombstone`].
///
/// Reserved; deletions are not propagated yet, so the list is always empty.
#[derive(ToSchema)]
#[schema(as = crate::domain::Tombstone, rename_all = "camelCase")]
pub struct TombstoneSchema {
    #[schema(example = "jobs")]
    shape: String,
    id: Uuid,
    deleted_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::DeltaSnapshot`].
///
/// Every shape is always present; shapes not requested are empty arrays.
#[derive(ToSchema)]
#[schema(as = crate::domain::DeltaSnapshot, rename_all = "camelCase")]
pub struct DeltaSnapshotSchema {
    /// Snapshot time in epoch milliseconds; send back as `since`.
    #[schema(example = 1_760_860_800_000_i64)]
    server_ts: i64,
    jobs: Vec<JobSchema>,
    pools: Vec<PoolSchema>,
    visits: Vec<VisitEntrySchema>,
    readings: Vec<ReadingSchema>,
    chemicals: Vec<ChemicalsUsedSchema>,
    issues: Vec<IssueSchema>,
    van_stock: Vec<VanStockItemSchema>,
    tombstones: Vec<TombstoneSchema>,
}
