//! PostgreSQL-backed `SyncRecordRepository` implementation using Diesel ORM.
//!
//! Every query is filtered by the tenant's `org_id`. Parent-id lookups bind
//! the ids as an array (`= ANY($1)`), and [`NonEmptyIds`] guarantees that
//! array is never empty.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{SyncRecordRepository, SyncRecordRepositoryError};
use crate::domain::{
    ChemicalsUsed, DayWindow, Issue, Job, JobId, NonEmptyIds, Pool, PoolId, Reading, StaffId,
    TenantScope, UserId, VisitEntry, VisitId,
};

use super::models::{
    ChemicalsUsedRow, IssueRow, JobRow, PoolRow, ReadingRow, RowConversionError, VisitEntryRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{chemicals_used, issues, jobs, pools, readings, staff, visit_entries};

/// Diesel-backed implementation of the `SyncRecordRepository` port.
#[derive(Clone)]
pub struct DieselSyncRecordRepository {
    pool: DbPool,
}

impl DieselSyncRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SyncRecordRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SyncRecordRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SyncRecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SyncRecordRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            SyncRecordRepositoryError::query("database query error")
        }
        _ => SyncRecordRepositoryError::query("database error"),
    }
}

fn map_row_error(error: RowConversionError) -> SyncRecordRepositoryError {
    warn!(%error, "stored record failed domain conversion");
    SyncRecordRepositoryError::query(error.to_string())
}

fn uuids<T>(ids: &NonEmptyIds<T>) -> Vec<Uuid>
where
    T: Ord + Copy + Into<Uuid>,
{
    ids.iter().map(Into::into).collect()
}

fn org_uuid(scope: &TenantScope) -> Uuid {
    scope.org_id().into()
}

#[async_trait]
impl SyncRecordRepository for DieselSyncRecordRepository {
    async fn find_staff_id_for_user(
        &self,
        scope: &TenantScope,
        user_id: &UserId,
    ) -> Result<Option<StaffId>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Option<Uuid> = staff::table
            .filter(staff::org_id.eq(org_uuid(scope)))
            .filter(staff::user_id.eq(*user_id.as_uuid()))
            .select(staff::id)
            .order(staff::id.asc())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(StaffId::from_uuid))
    }

    async fn list_jobs_in_window(
        &self,
        scope: &TenantScope,
        window: &DayWindow,
        assignee: Option<StaffId>,
    ) -> Result<Vec<Job>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = jobs::table
            .filter(jobs::org_id.eq(org_uuid(scope)))
            .filter(jobs::window_start.ge(window.start()))
            .filter(jobs::window_start.lt(window.end()))
            .select(JobRow::as_select())
            .order((jobs::window_start.asc(), jobs::id.asc()))
            .into_boxed();
        if let Some(staff_id) = assignee {
            query = query.filter(jobs::assigned_carer_id.eq(*staff_id.as_uuid()));
        }
        let rows: Vec<JobRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| Job::try_from(row).map_err(map_row_error))
            .collect()
    }

    async fn list_pools_by_ids(
        &self,
        scope: &TenantScope,
        ids: &NonEmptyIds<PoolId>,
    ) -> Result<Vec<Pool>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PoolRow> = pools::table
            .filter(pools::org_id.eq(org_uuid(scope)))
            .filter(pools::id.eq_any(uuids(ids)))
            .select(PoolRow::as_select())
            .order(pools::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Pool::from).collect())
    }

    async fn list_visits(
        &self,
        scope: &TenantScope,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VisitEntryRow> = visit_entries::table
            .filter(visit_entries::org_id.eq(org_uuid(scope)))
            .select(VisitEntryRow::as_select())
            .order(visit_entries::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(VisitEntry::from).collect())
    }

    async fn list_visits_for_jobs(
        &self,
        scope: &TenantScope,
        job_ids: &NonEmptyIds<JobId>,
    ) -> Result<Vec<VisitEntry>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VisitEntryRow> = visit_entries::table
            .filter(visit_entries::org_id.eq(org_uuid(scope)))
            .filter(visit_entries::job_id.eq_any(uuids(job_ids)))
            .select(VisitEntryRow::as_select())
            .order(visit_entries::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(VisitEntry::from).collect())
    }

    async fn list_readings_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Reading>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReadingRow> = readings::table
            .filter(readings::org_id.eq(org_uuid(scope)))
            .filter(readings::visit_id.eq_any(uuids(visit_ids)))
            .select(ReadingRow::as_select())
            .order(readings::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Reading::from).collect())
    }

    async fn list_chemicals_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<ChemicalsUsed>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ChemicalsUsedRow> = chemicals_used::table
            .filter(chemicals_used::org_id.eq(org_uuid(scope)))
            .filter(chemicals_used::visit_id.eq_any(uuids(visit_ids)))
            .select(ChemicalsUsedRow::as_select())
            .order(chemicals_used::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ChemicalsUsed::from).collect())
    }

    async fn list_issues_for_visits(
        &self,
        scope: &TenantScope,
        visit_ids: &NonEmptyIds<VisitId>,
    ) -> Result<Vec<Issue>, SyncRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IssueRow> = issues::table
            .filter(issues::org_id.eq(org_uuid(scope)))
            .filter(issues::visit_id.eq_any(uuids(visit_ids)))
            .select(IssueRow::as_select())
            .order(issues::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| Issue::try_from(row).map_err(map_row_error))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sync::records::ParseJobStatusError;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, SyncRecordRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(diesel::result::Error::NotFound)]
    #[case(diesel::result::Error::RollbackTransaction)]
    fn other_diesel_errors_map_to_query(#[case] error: diesel::result::Error) {
        assert!(matches!(
            map_diesel_error(error),
            SyncRecordRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn closed_connections_map_to_connection() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            SyncRecordRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn row_errors_keep_the_offending_value() {
        let err = map_row_error(RowConversionError::from(ParseJobStatusError {
            value: "paused".to_owned(),
        }));
        assert!(err.to_string().contains("paused"));
    }

    #[rstest]
    fn id_sets_bind_as_plain_uuids() {
        let raw = Uuid::from_u128(7);
        let ids = NonEmptyIds::collect([VisitId::from_uuid(raw)]).expect("one id");
        assert_eq!(uuids(&ids), vec![raw]);
    }
}
