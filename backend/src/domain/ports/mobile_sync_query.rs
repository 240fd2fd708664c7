//! Driving port for mobile delta-sync pulls.
//!
//! Inbound adapters hand over an authenticated [`SyncRequest`] and receive
//! the assembled [`DeltaSnapshot`] without touching persistence.

use async_trait::async_trait;

use crate::domain::{DeltaSnapshot, Error, SyncRequest};

/// Driving port for building a sync snapshot.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), backend::domain::Error> {
/// use backend::domain::ports::{FixtureMobileSyncQuery, MobileSyncQuery};
/// use backend::domain::{Caller, OrgId, Role, ShapeSet, SyncRequest, UserId, Watermark};
///
/// let caller = Caller::new(OrgId::random(), UserId::random(), Role::Manager);
/// let request = SyncRequest::new(caller, ShapeSet::defaults(), Watermark::EPOCH);
/// let snapshot = FixtureMobileSyncQuery.get_delta(request).await?;
/// assert!(snapshot.jobs.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MobileSyncQuery: Send + Sync {
    /// Resolve the requested shapes for the caller.
    ///
    /// Fails as a whole when any record-store read fails; partial snapshots
    /// are never returned.
    async fn get_delta(&self, request: SyncRequest) -> Result<DeltaSnapshot, Error>;
}

/// Fixture query returning an empty snapshot at the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMobileSyncQuery;

#[async_trait]
impl MobileSyncQuery for FixtureMobileSyncQuery {
    async fn get_delta(&self, _request: SyncRequest) -> Result<DeltaSnapshot, Error> {
        Ok(DeltaSnapshot::default())
    }
}
