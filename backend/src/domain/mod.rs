//! Domain primitives, services, and ports.
//!
//! Purpose: define the transport-agnostic mobile sync model and the ports
//! through which it reaches the record store. Nothing in here knows about
//! HTTP or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Caller / TenantScope — authenticated identity and query scope.
//! - DeltaSnapshot / SyncRequest — sync pull request and response.
//! - MobileSyncService — resolves shapes for a caller.

pub mod error;
mod ids;
mod mobile_sync_service;
pub mod ports;
pub mod sync;
mod tenancy;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    ChemicalsUsedId, ClientId, IssueId, JobId, OrgId, PlanId, PoolId, ReadingId, StaffId, UserId,
    VisitId,
};
pub use self::mobile_sync_service::MobileSyncService;
pub use self::sync::{
    ChemicalsUsed, DayWindow, DeltaSnapshot, Issue, IssueSeverity, IssueStatus, Job, JobStatus,
    NonEmptyIds, Pool, Reading, Shape, ShapeSet, SyncRequest, SyncTimeZone, Tombstone,
    VanStockItem, VisitEntry, Watermark, WatermarkError,
};
pub use self::tenancy::{Caller, ParseRoleError, Role, TenantScope};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
