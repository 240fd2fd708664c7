//! In-memory record store and record factories for sync tests.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;

use crate::domain::ports::{SyncRecordRepository, SyncRecordRepositoryError};
use crate::domain::{
    ChemicalsUsed, ChemicalsUsedId, ClientId, DayWindow, Issue, IssueId, IssueSeverity,
    IssueStatus, Job, JobId, JobStatus, NonEmptyIds, OrgId, Pool, PoolId, Reading, ReadingId,
    StaffId, TenantScope, UserId, VisitEntry, VisitId,
};

#[derive(Debug, Default)]
struct RecordSet {
    staff: Vec<(OrgId, UserId, StaffId)>,
    jobs: Vec<Job>,
    pools: Vec<Pool>,
    visits: Vec<VisitEntry>,
    readings: Vec<Reading>,
    chemicals: Vec<ChemicalsUsed>,
    issues: Vec<Issue>,
    failure: Option<SyncRecordRepositoryError>,
}

/// Record store kept in memory, filtering like the database adapter.
///
/// Results come back ordered by id, except jobs which are ordered by
/// `(window_start, id)`.
#[derive(Debug, Default)]
pub struct InMemorySyncRecordRepository {
    records: RwLock<RecordSet>,
}

impl InMemorySyncRecordRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a user account to a staff record.
    pub fn link_staff(&self, org_id: OrgId, user_id: UserId, staff_id: StaffId) {
        self.write().staff.push((org_id, user_id, staff_id));
    }

    /// Store a job.
    pub fn insert_job(&self, job: Job) {
        self.write().jobs.push(job);
    }

    /// Store a pool.
    pub fn insert_pool(&self, pool: Pool) {
        self.write().pools.push(pool);
    }

    /// Store a visit entry.
    pub fn insert_visit(&self, visit: VisitEntry) {
        self.write().visits.push(visit);
    }

    /// Store a reading.
    pub fn insert_reading(&self, reading: Reading) {
        self.write().readings.push(reading);
    }

    /// Store a chemicals-used row.
    pub fn insert_chemicals_used(&self, chemicals: ChemicalsUsed) {
        self.write().chemicals.push(chemicals);
    }

    /// Store an issue.
    pub fn insert_issue(&self, issue: Issue) {
        self.write().issues.push(issue);
    }

    /// Make every subsequent call fail with `error`, or succeed again with
    /// `None`.
    pub fn set_failure(&self, error: Option<SyncRecordRepositoryError>) {
        self.write().failure = error;
    }

    fn read(&self) -> RwLockReadGuard<'_, RecordSet> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RecordSet> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked(&self) -> Result<RwLockReadGuard<'_, RecordSet>, SyncRecordRepositoryError> {
        let records = self.read();
        match &records.failure {
            Some(error) => Err(error.clone()),
            None => Ok(records),
        }
    }
}

fn sorted_by_key<T, K: Ord>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl SyncRecordRepository for InMemorySyncRecordRepository {
    async fn find_staff_id_for_user(
        &self,
        scope: &TenantScope,
        user_id: &UserId,
    ) -> Result<Option<StaffId>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        Ok(records
            .staff
            .iter()
            .find(|(org_id, linked_user, _)| *org_id == scope.org_id() && linked_user == user_id)
            .map(|(_, _, staff_id)| *staff_id))
    }

    async fn list_jobs_in_window(
        &self,
        scope: &TenantScope,
        window: &DayWindow,
        assignee: Option<StaffId>,
    ) -> Result<Vec<Job>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records.jobs.iter().filter(|job| {
            job.org_id == scope.org_id()
                && window.contains(job.window_start)
                && assignee.is_none_or(|staff_id| job.assigned_carer_id == Some(staff_id))
        });
        Ok(sorted_by_key(rows.cloned(), |job| (job.window_start, job.id)))
    }

    async fn list_pools_by_ids(
        &self,
        scope: &TenantScope,
        ids: &NonEmptyIds<PoolId>,
    ) -> Result<Vec<Pool>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .pools
            .iter()
            .filter(|pool| pool.org_id == scope.org_id() && ids.contains(&pool.id));
        Ok(sorted_by_key(rows.cloned(), |pool| pool.id))
    }

    async fn list_visits(
        &self,
        scope: &TenantScope,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .visits
            .iter()
            .filter(|visit| visit.org_id == scope.org_id());
        Ok(sorted_by_key(rows.cloned(), |visit| visit.id))
    }

    async fn list_visits_for_jobs(
        &self,
        scope: &TenantScope,
        job_ids: &NonEmptyIds<JobId>,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .visits
            .iter()
            .filter(|visit| visit.org_id == scope.org_id() && job_ids.contains(&visit.job_id));
        Ok(sorted_by_key(rows.cloned(), |visit| visit.id))
    }

    async fn list_readings_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Reading>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .readings
            .iter()
            .filter(|row| row.org_id == scope.org_id() && visit_ids.contains(&row.visit_id));
        Ok(sorted_by_key(rows.cloned(), |row| row.id))
    }

    async fn list_chemicals_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<ChemicalsUsed>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .chemicals
            .iter()
            .filter(|row| row.org_id == scope.org_id() && visit_ids.contains(&row.visit_id));
        Ok(sorted_by_key(rows.cloned(), |row| row.id))
    }

    async fn list_issues_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Issue>, SyncRecordRepositoryError> {
        let records = self.checked()?;
        let rows = records
            .issues
            .iter()
            .filter(|row| row.org_id == scope.org_id() && visit_ids.contains(&row.visit_id));
        Ok(sorted_by_key(rows.cloned(), |row| row.id))
    }
}

/// A scheduled one-hour job with no pool or assignee.
pub fn job(org_id: OrgId, window_start: DateTime<Utc>) -> Job {
    Job {
        id: JobId::random(),
        org_id,
        assigned_carer_id: None,
        pool_id: None,
        plan_id: None,
        window_start,
        window_end: window_start + TimeDelta::hours(1),
        status: JobStatus::Scheduled,
        notes: None,
        updated_at: window_start,
    }
}

/// A pool with sample chemistry targets.
pub fn pool(org_id: OrgId) -> Pool {
    Pool {
        id: PoolId::random(),
        org_id,
        client_id: ClientId::random(),
        name: "Backyard pool".to_owned(),
        address: "12 Harbour Road".to_owned(),
        volume_l: Some(45_000),
        targets: json!({ "ph": { "min": 7.2, "max": 7.6 } }),
        updated_at: DateTime::UNIX_EPOCH,
    }
}

/// An unstarted visit for `job_id`.
pub fn visit(org_id: OrgId, job_id: JobId) -> VisitEntry {
    VisitEntry {
        id: VisitId::random(),
        org_id,
        job_id,
        started_at: None,
        completed_at: None,
        notes: None,
        updated_at: DateTime::UNIX_EPOCH,
    }
}

/// A reading with typical chemistry values.
pub fn reading(org_id: OrgId, visit_id: VisitId) -> Reading {
    Reading {
        id: ReadingId::random(),
        org_id,
        visit_id,
        ph: Some(7.4),
        free_chlorine: Some(2.0),
        total_chlorine: Some(2.5),
        alkalinity: Some(100.0),
        calcium_hardness: None,
        cyanuric_acid: None,
        salt: None,
        temperature_c: Some(26.0),
        measured_at: DateTime::UNIX_EPOCH,
    }
}

/// Chlorine dosed on `visit_id`.
pub fn chemicals_used(org_id: OrgId, visit_id: VisitId) -> ChemicalsUsed {
    ChemicalsUsed {
        id: ChemicalsUsedId::random(),
        org_id,
        visit_id,
        chemical: "liquid chlorine".to_owned(),
        quantity: 2.5,
        unit: "L".to_owned(),
        created_at: DateTime::UNIX_EPOCH,
    }
}

/// An open, medium-severity issue on `visit_id`.
pub fn issue(org_id: OrgId, visit_id: VisitId) -> Issue {
    Issue {
        id: IssueId::random(),
        org_id,
        visit_id,
        kind: "equipment".to_owned(),
        severity: IssueSeverity::Medium,
        status: IssueStatus::Open,
        description: Some("Pump is noisy".to_owned()),
        created_at: DateTime::UNIX_EPOCH,
    }
}
