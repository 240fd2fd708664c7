//! Driven port for the records a sync snapshot is built from.
//!
//! Every method takes a [`TenantScope`] first. Lookups keyed by parent ids
//! take [`NonEmptyIds`], so callers resolve an empty parent set to an empty
//! result themselves instead of sending an `IN ()` filter to the store.

use async_trait::async_trait;

use crate::domain::{
    ChemicalsUsed, DayWindow, Issue, Job, JobId, NonEmptyIds, Pool, PoolId, Reading, StaffId,
    TenantScope, UserId, VisitEntry, VisitId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by sync record repository adapters.
    pub enum SyncRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "sync record repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "sync record repository query failed: {message}",
    }
}

/// Read access to jobs, pools, visits, and visit children for one tenant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncRecordRepository: Send + Sync {
    /// Staff record linked to a user account, if any.
    async fn find_staff_id_for_user(
        &self,
        scope: &TenantScope,
        user_id: &UserId,
    ) -> Result<Option<StaffId>, SyncRecordRepositoryError>;

    /// Jobs whose `window_start` falls in `window`, ordered by
    /// `(window_start, id)`.
    ///
    /// When `assignee` is set only jobs assigned to that staff member are
    /// returned.
    async fn list_jobs_in_window(
        &self,
        scope: &TenantScope,
        window: &DayWindow,
        assignee: Option<StaffId>,
    ) -> Result<Vec<Job>, SyncRecordRepositoryError>;

    /// Pools with the given ids.
    async fn list_pools_by_ids(
        &self,
        scope: &TenantScope,
        ids: &NonEmptyIds<PoolId>,
    ) -> Result<Vec<Pool>, SyncRecordRepositoryError>;

    /// Every visit in the tenant.
    async fn list_visits(
        &self,
        scope: &TenantScope,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError>;

    /// Visits belonging to the given jobs.
    async fn list_visits_for_jobs(
        &self,
        scope: &TenantScope,
        job_ids: &NonEmptyIds<JobId>,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError>;

    /// Readings taken during the given visits.
    async fn list_readings_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Reading>, SyncRecordRepositoryError>;

    /// Chemical usage recorded during the given visits.
    async fn list_chemicals_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<ChemicalsUsed>, SyncRecordRepositoryError>;

    /// Issues reported during the given visits.
    async fn list_issues_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Issue>, SyncRecordRepositoryError>;
}

/// Fixture implementation used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSyncRecordRepository;

#[async_trait]
impl SyncRecordRepository for FixtureSyncRecordRepository {
    async fn find_staff_id_for_user(
        &self,
        _scope: &TenantScope,
        _user_id: &UserId,
    ) -> Result<Option<StaffId>, SyncRecordRepositoryError> {
        Ok(None)
    }

    async fn list_jobs_in_window(
        &self,
        _scope: &TenantScope,
        _window: &DayWindow,
        _assignee: Option<StaffId>,
    ) -> Result<Vec<Job>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_pools_by_ids(
        &self,
        _scope: &TenantScope,
        _ids: &NonEmptyIds<PoolId>,
    ) -> Result<Vec<Pool>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_visits(
        &self,
        _scope: &TenantScope,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_visits_for_jobs(
        &self,
        _scope: &TenantScope,
        _job_ids: &NonEmptyIds<JobId>,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_readings_for_visits(
        &self,
        _scope: &TenantScope,
        _visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Reading>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_chemicals_for_visits(
        &self,
        _scope: &TenantScope,
        _visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<ChemicalsUsed>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_issues_for_visits(
        &self,
        _scope: &TenantScope,
        _visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Issue>, SyncRecordRepositoryError> {
        Ok(Vec::new())
    }
}
