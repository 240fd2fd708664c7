//! Mobile sync domain service.
//!
//! Builds a [`DeltaSnapshot`] for one caller. Jobs are always "today" in the
//! configured zone; pools and visits follow from the resolved jobs; visit
//! children follow from the resolved visits. Reads run one after another
//! and any failure fails the whole pull.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MobileSyncQuery, SyncRecordRepository, SyncRecordRepositoryError};
use crate::domain::sync::epoch_millis;
use crate::domain::{
    Caller, DayWindow, DeltaSnapshot, Error, Job, NonEmptyIds, Shape, SyncRequest, SyncTimeZone,
    TenantScope, VisitEntry,
};

fn map_repository_error(error: SyncRecordRepositoryError) -> Error {
    match error {
        SyncRecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("sync record repository unavailable: {message}"))
        }
        SyncRecordRepositoryError::Query { message } => {
            Error::internal(format!("sync record repository error: {message}"))
        }
    }
}

/// Sync service implementing the [`MobileSyncQuery`] driving port.
#[derive(Clone)]
pub struct MobileSyncService<R: ?Sized> {
    records: Arc<R>,
    clock: Arc<dyn Clock>,
    zone: SyncTimeZone,
}

impl<R: ?Sized> MobileSyncService<R> {
    /// Create a service over a record store, evaluating "today" in `zone`.
    pub fn new(records: Arc<R>, clock: Arc<dyn Clock>, zone: SyncTimeZone) -> Self {
        Self {
            records,
            clock,
            zone,
        }
    }
}

impl<R> MobileSyncService<R>
where
    R: SyncRecordRepository + ?Sized,
{
    async fn resolve_jobs(
        &self,
        caller: &Caller,
        scope: &TenantScope,
        window: &DayWindow,
    ) -> Result<Vec<Job>, Error> {
        let assignee = if caller.role().is_field_technician() {
            let staff_id = self
                .records
                .find_staff_id_for_user(scope, &caller.user_id())
                .await
                .map_err(map_repository_error)?;
            let Some(staff_id) = staff_id else {
                return Ok(Vec::new());
            };
            Some(staff_id)
        } else {
            None
        };

        self.records
            .list_jobs_in_window(scope, window, assignee)
            .await
            .map_err(map_repository_error)
    }

    async fn resolve_visits(
        &self,
        caller: &Caller,
        scope: &TenantScope,
        jobs: &[Job],
    ) -> Result<Vec<VisitEntry>, Error> {
        if !caller.role().is_field_technician() {
            return self
                .records
                .list_visits(scope)
                .await
                .map_err(map_repository_error);
        }

        let Some(job_ids) = NonEmptyIds::collect(jobs.iter().map(|job| job.id)) else {
            return Ok(Vec::new());
        };
        self.records
            .list_visits_for_jobs(scope, &job_ids)
            .await
            .map_err(map_repository_error)
    }

    async fn resolve_visit_children(
        &self,
        request: &SyncRequest,
        scope: &TenantScope,
        snapshot: &mut DeltaSnapshot,
    ) -> Result<(), Error> {
        let Some(visit_ids) = NonEmptyIds::collect(snapshot.visits.iter().map(|visit| visit.id))
        else {
            return Ok(());
        };

        if request.shapes.contains(Shape::Readings) {
            snapshot.readings = self
                .records
                .list_readings_for_visits(scope, &visit_ids)
                .await
                .map_err(map_repository_error)?;
        }
        if request.shapes.contains(Shape::Chemicals) {
            snapshot.chemicals = self
                .records
                .list_chemicals_for_visits(scope, &visit_ids)
                .await
                .map_err(map_repository_error)?;
        }
        if request.shapes.contains(Shape::Issues) {
            snapshot.issues = self
                .records
                .list_issues_for_visits(scope, &visit_ids)
                .await
                .map_err(map_repository_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl<R> MobileSyncQuery for MobileSyncService<R>
where
    R: SyncRecordRepository + ?Sized,
{
    async fn get_delta(&self, request: SyncRequest) -> Result<DeltaSnapshot, Error> {
        let now = self.clock.utc();
        let caller = request.caller;
        let scope = caller.scope();
        let window = DayWindow::containing(now, self.zone);
        let mut snapshot = DeltaSnapshot::empty_at(epoch_millis(now));

        if request.shapes.contains(Shape::Jobs) {
            snapshot.jobs = self.resolve_jobs(&caller, &scope, &window).await?;
        }

        if request.shapes.contains(Shape::Pools) {
            let pool_ids = NonEmptyIds::collect(snapshot.jobs.iter().filter_map(|job| job.pool_id));
            if let Some(pool_ids) = pool_ids {
                snapshot.pools = self
                    .records
                    .list_pools_by_ids(&scope, &pool_ids)
                    .await
                    .map_err(map_repository_error)?;
            }
        }

        if request.shapes.contains(Shape::Visits) {
            snapshot.visits = self.resolve_visits(&caller, &scope, &snapshot.jobs).await?;
        }

        self.resolve_visit_children(&request, &scope, &mut snapshot)
            .await?;

        // Van stock is not tracked yet; tombstones are never produced.

        info!(
            org_id = %caller.org_id(),
            role = %caller.role(),
            shapes = %request.shapes,
            since = request.since.as_millis(),
            server_ts = snapshot.server_ts,
            window_start = %window.start(),
            jobs = snapshot.jobs.len(),
            pools = snapshot.pools.len(),
            visits = snapshot.visits.len(),
            readings = snapshot.readings.len(),
            chemicals = snapshot.chemicals.len(),
            issues = snapshot.issues.len(),
            "mobile sync snapshot assembled"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "mobile_sync_service_tests.rs"]
mod tests;
