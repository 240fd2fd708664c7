//! Tests for the mobile sync service.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockSyncRecordRepository, SyncRecordRepositoryError};
use crate::domain::{ErrorCode, OrgId, PoolId, Role, ShapeSet, StaffId, UserId, Watermark};
use crate::test_support::clock::FixedClock;
use crate::test_support::sync_records::{
    InMemorySyncRecordRepository, chemicals_used, issue, job, pool, reading, visit,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture instant")
}

fn utc_zone() -> SyncTimeZone {
    SyncTimeZone::from_offset_minutes(0).expect("utc offset")
}

fn service<R>(records: R) -> MobileSyncService<R> {
    MobileSyncService::new(
        Arc::new(records),
        Arc::new(FixedClock::new(now())),
        utc_zone(),
    )
}

fn request(caller: Caller, shapes: &str) -> SyncRequest {
    SyncRequest::new(caller, ShapeSet::parse(Some(shapes)), Watermark::EPOCH)
}

#[fixture]
fn manager() -> Caller {
    Caller::new(OrgId::random(), UserId::random(), Role::Manager)
}

#[fixture]
fn carer() -> Caller {
    Caller::new(OrgId::random(), UserId::random(), Role::Carer)
}

#[rstest]
#[tokio::test]
async fn default_shapes_leave_child_shapes_empty(manager: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = manager.org_id();
    let today = job(org, now());
    store.insert_job(today.clone());
    let entry = visit(org, today.id);
    store.insert_reading(reading(org, entry.id));
    store.insert_visit(entry);

    let snapshot = service(store)
        .get_delta(SyncRequest::new(
            manager,
            ShapeSet::parse(None),
            Watermark::EPOCH,
        ))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.jobs.len(), 1);
    assert_eq!(snapshot.visits.len(), 1);
    assert!(snapshot.readings.is_empty());
    assert!(snapshot.chemicals.is_empty());
    assert!(snapshot.issues.is_empty());
    assert!(snapshot.van_stock.is_empty());
    assert!(snapshot.tombstones.is_empty());
}

#[rstest]
#[tokio::test]
async fn server_ts_is_the_clock_time_in_millis(manager: Caller) {
    let snapshot = service(InMemorySyncRecordRepository::new())
        .get_delta(request(manager, "jobs"))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.server_ts, now().timestamp_millis());
}

#[rstest]
#[tokio::test]
async fn carer_without_staff_record_gets_no_jobs_or_visits(carer: Caller) {
    let mut repo = MockSyncRecordRepository::new();
    repo.expect_find_staff_id_for_user()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_list_jobs_in_window().times(0);
    repo.expect_list_visits().times(0);
    repo.expect_list_visits_for_jobs().times(0);
    repo.expect_list_pools_by_ids().times(0);

    let snapshot = service(repo)
        .get_delta(SyncRequest::new(
            carer,
            ShapeSet::defaults(),
            Watermark::from_millis(1).expect("valid watermark"),
        ))
        .await
        .expect("snapshot");

    assert!(snapshot.jobs.is_empty());
    assert!(snapshot.visits.is_empty());
    assert!(snapshot.pools.is_empty());
}

#[rstest]
#[tokio::test]
async fn carer_sees_only_assigned_jobs_and_their_visits(carer: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = carer.org_id();
    let staff_id = StaffId::random();
    store.link_staff(org, carer.user_id(), staff_id);

    let mut mine = job(org, now());
    mine.assigned_carer_id = Some(staff_id);
    let mut theirs = job(org, now());
    theirs.assigned_carer_id = Some(StaffId::random());
    let my_visit = visit(org, mine.id);
    store.insert_visit(my_visit.clone());
    store.insert_visit(visit(org, theirs.id));
    store.insert_job(mine.clone());
    store.insert_job(theirs);

    let snapshot = service(store)
        .get_delta(request(carer, "jobs,visits,vanStock"))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.jobs, vec![mine]);
    assert_eq!(snapshot.visits, vec![my_visit]);
    assert!(snapshot.van_stock.is_empty());
}

#[rstest]
#[tokio::test]
async fn manager_jobs_ignore_watermark_and_stay_within_today(manager: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = manager.org_id();
    let today = job(org, now());
    store.insert_job(today.clone());
    store.insert_job(job(org, now() - TimeDelta::days(3)));
    store.insert_job(job(org, now() + TimeDelta::days(1)));

    let ten_days_ago = (now() - TimeDelta::days(10)).timestamp_millis();
    let snapshot = service(store)
        .get_delta(SyncRequest::new(
            manager,
            ShapeSet::parse(Some("jobs")),
            Watermark::from_millis(ten_days_ago).expect("valid watermark"),
        ))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.jobs, vec![today]);
}

#[rstest]
#[tokio::test]
async fn pools_come_only_from_resolved_jobs(manager: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = manager.org_id();
    let serviced = pool(org);
    let unrelated = pool(org);
    let mut with_pool = job(org, now());
    with_pool.pool_id = Some(serviced.id);
    store.insert_job(with_pool);
    store.insert_job(job(org, now()));
    store.insert_pool(serviced.clone());
    store.insert_pool(unrelated);

    let snapshot = service(store)
        .get_delta(request(manager, "jobs,pools"))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.pools, vec![serviced]);
}

#[rstest]
#[tokio::test]
async fn pools_without_jobs_shape_are_empty(manager: Caller) {
    let mut repo = MockSyncRecordRepository::new();
    repo.expect_list_jobs_in_window().times(0);
    repo.expect_list_pools_by_ids().times(0);

    let snapshot = service(repo)
        .get_delta(request(manager, "pools"))
        .await
        .expect("snapshot");

    assert!(snapshot.pools.is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_pool_references_are_fetched_once(manager: Caller) {
    let pool_id = PoolId::random();
    let org = manager.org_id();
    let mut first = job(org, now());
    first.pool_id = Some(pool_id);
    let mut second = job(org, now());
    second.pool_id = Some(pool_id);
    let jobs = vec![first, second];

    let mut repo = MockSyncRecordRepository::new();
    repo.expect_list_jobs_in_window()
        .times(1)
        .return_once(move |_, _, _| Ok(jobs));
    repo.expect_list_pools_by_ids()
        .withf(move |_, ids| ids.iter().collect::<Vec<_>>() == vec![pool_id])
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    service(repo)
        .get_delta(request(manager, "jobs,pools"))
        .await
        .expect("snapshot");
}

#[rstest]
#[tokio::test]
async fn empty_visits_skip_child_lookups(manager: Caller) {
    let mut repo = MockSyncRecordRepository::new();
    repo.expect_list_visits()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    repo.expect_list_readings_for_visits().times(0);
    repo.expect_list_chemicals_for_visits().times(0);
    repo.expect_list_issues_for_visits().times(0);

    let snapshot = service(repo)
        .get_delta(request(manager, "visits,readings,chemicals,issues"))
        .await
        .expect("snapshot");

    assert!(snapshot.readings.is_empty());
    assert!(snapshot.chemicals.is_empty());
    assert!(snapshot.issues.is_empty());
}

#[rstest]
#[tokio::test]
async fn child_shapes_are_filtered_to_resolved_visits(manager: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = manager.org_id();
    let entry = visit(org, job(org, now()).id);
    let other_org = OrgId::random();
    let foreign = visit(other_org, job(other_org, now()).id);
    store.insert_visit(entry.clone());
    store.insert_visit(foreign.clone());
    store.insert_chemicals_used(chemicals_used(org, entry.id));
    store.insert_issue(issue(org, entry.id));
    store.insert_issue(issue(other_org, foreign.id));

    let snapshot = service(store)
        .get_delta(request(manager, "visits,chemicals,issues"))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.visits, vec![entry.clone()]);
    assert_eq!(snapshot.chemicals.len(), 1);
    assert_eq!(snapshot.issues.len(), 1);
    assert!(snapshot.issues.iter().all(|row| row.visit_id == entry.id));
}

#[rstest]
#[tokio::test]
async fn manager_example_snapshot_counts(manager: Caller) {
    let store = InMemorySyncRecordRepository::new();
    let org = manager.org_id();
    let serviced = pool(org);
    let mut first = job(org, now());
    first.pool_id = Some(serviced.id);
    let second = job(org, now() + TimeDelta::hours(2));
    let with_readings = visit(org, first.id);
    store.insert_reading(reading(org, with_readings.id));
    store.insert_reading(reading(org, with_readings.id));
    store.insert_visit(with_readings);
    store.insert_visit(visit(org, first.id));
    store.insert_visit(visit(org, second.id));
    store.insert_pool(serviced);
    store.insert_job(first);
    store.insert_job(second);

    let snapshot = service(store)
        .get_delta(request(manager, "jobs,pools,visits,readings"))
        .await
        .expect("snapshot");

    assert_eq!(snapshot.jobs.len(), 2);
    assert_eq!(snapshot.pools.len(), 1);
    assert_eq!(snapshot.visits.len(), 3);
    assert_eq!(snapshot.readings.len(), 2);
    assert!(snapshot.tombstones.is_empty());
}

#[rstest]
#[case(SyncRecordRepositoryError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(SyncRecordRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_fail_the_whole_pull(
    manager: Caller,
    #[case] failure: SyncRecordRepositoryError,
    #[case] expected: ErrorCode,
) {
    let store = InMemorySyncRecordRepository::new();
    store.insert_job(job(manager.org_id(), now()));
    store.set_failure(Some(failure));

    let error = service(store)
        .get_delta(request(manager, "jobs,pools,visits"))
        .await
        .expect_err("failure propagates");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn jobs_are_scoped_to_the_callers_organisation(manager: Caller) {
    let org = manager.org_id();
    let mut repo = MockSyncRecordRepository::new();
    repo.expect_list_jobs_in_window()
        .withf(move |scope, window, assignee| {
            scope.org_id() == org && window.contains(now()) && assignee.is_none()
        })
        .times(1)
        .return_once(|_, _, _| Ok(Vec::new()));

    service(repo)
        .get_delta(request(manager, "jobs"))
        .await
        .expect("snapshot");
}

#[derive(Debug, Clone, Copy)]
enum Profile {
    Admin,
    Manager,
    StaffedCarer,
    UnstaffedCarer,
}

/// Store holding one fully populated job for `caller`'s organisation,
/// assigned to the caller when they have a staff record.
fn populated_store(caller: &Caller, staffed: bool) -> InMemorySyncRecordRepository {
    let store = InMemorySyncRecordRepository::new();
    let org = caller.org_id();
    let staff_id = StaffId::random();
    if staffed {
        store.link_staff(org, caller.user_id(), staff_id);
    }
    let serviced = pool(org);
    let mut today = job(org, now());
    today.pool_id = Some(serviced.id);
    today.assigned_carer_id = Some(staff_id);
    let entry = visit(org, today.id);
    store.insert_reading(reading(org, entry.id));
    store.insert_chemicals_used(chemicals_used(org, entry.id));
    store.insert_issue(issue(org, entry.id));
    store.insert_visit(entry);
    store.insert_pool(serviced);
    store.insert_job(today);
    store
}

#[rstest]
#[case::admin_defaults(Profile::Admin, None)]
#[case::manager_defaults(Profile::Manager, None)]
#[case::manager_van_stock_only(Profile::Manager, Some("vanStock"))]
#[case::manager_every_shape(
    Profile::Manager,
    Some("jobs,pools,visits,readings,chemicals,issues,vanStock")
)]
#[case::manager_no_known_shapes(Profile::Manager, Some("tombstones,unknown"))]
#[case::staffed_carer_defaults(Profile::StaffedCarer, None)]
#[case::staffed_carer_every_shape(
    Profile::StaffedCarer,
    Some("jobs,pools,visits,readings,chemicals,issues,vanStock")
)]
#[case::unstaffed_carer_defaults(Profile::UnstaffedCarer, None)]
#[case::unstaffed_carer_van_stock(Profile::UnstaffedCarer, Some("vanStock,visits"))]
#[tokio::test]
async fn tombstones_and_van_stock_are_always_empty(
    #[case] profile: Profile,
    #[case] shapes: Option<&str>,
) {
    let role = match profile {
        Profile::Admin => Role::Admin,
        Profile::Manager => Role::Manager,
        Profile::StaffedCarer | Profile::UnstaffedCarer => Role::Carer,
    };
    let caller = Caller::new(OrgId::random(), UserId::random(), role);
    let store = populated_store(&caller, matches!(profile, Profile::StaffedCarer));

    let snapshot = service(store)
        .get_delta(SyncRequest::new(
            caller,
            ShapeSet::parse(shapes),
            Watermark::EPOCH,
        ))
        .await
        .expect("snapshot");

    assert!(snapshot.tombstones.is_empty());
    assert!(snapshot.van_stock.is_empty());
}
