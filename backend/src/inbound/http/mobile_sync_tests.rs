//! Tests for the mobile sync HTTP handler.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::CACHE_CONTROL;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::Trace;
use crate::domain::ports::{MobileSyncQuery, MockMobileSyncQuery};
use crate::domain::{
    Caller, DeltaSnapshot, Error, MobileSyncService, OrgId, Role, Shape, SyncTimeZone,
    TRACE_ID_HEADER, UserId, Watermark,
};
use crate::inbound::http::test_utils::{bearer_header, test_verifier};
use crate::test_support::clock::FixedClock;
use crate::test_support::sync_records::InMemorySyncRecordRepository;

fn test_app(
    mobile_sync: Arc<dyn MobileSyncQuery>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(mobile_sync)))
        .app_data(web::Data::new(test_verifier()))
        .wrap(Trace)
        .service(get_mobile_sync)
}

fn in_memory_sync() -> Arc<dyn MobileSyncQuery> {
    Arc::new(MobileSyncService::new(
        Arc::new(InMemorySyncRecordRepository::new()),
        Arc::new(FixedClock::at_utc(2026, 10, 19, 9, 30)),
        SyncTimeZone::from_offset_minutes(0).expect("utc offset"),
    ))
}

#[fixture]
fn manager() -> Caller {
    Caller::new(OrgId::random(), UserId::random(), Role::Manager)
}

#[rstest]
#[actix_web::test]
async fn default_request_returns_every_key(manager: Caller) {
    let app = actix_test::init_service(test_app(in_memory_sync())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/mobile/sync")
            .insert_header(bearer_header(&manager))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CACHE_CONTROL)
            .expect("cache-control header"),
        "no-store"
    );
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let body: Value = actix_test::read_body_json(response).await;
    for key in [
        "serverTs",
        "jobs",
        "pools",
        "visits",
        "readings",
        "chemicals",
        "issues",
        "vanStock",
        "tombstones",
    ] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}

#[rstest]
#[actix_web::test]
async fn empty_snapshot_matches_snapshot(manager: Caller) {
    let app = actix_test::init_service(test_app(in_memory_sync())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/mobile/sync?since=0")
            .insert_header(bearer_header(&manager))
            .to_request(),
    )
    .await;
    let snapshot: DeltaSnapshot = actix_test::read_body_json(response).await;

    insta::assert_json_snapshot!(snapshot, @r#"
    {
      "serverTs": 1792402200000,
      "jobs": [],
      "pools": [],
      "visits": [],
      "readings": [],
      "chemicals": [],
      "issues": [],
      "vanStock": [],
      "tombstones": []
    }
    "#);
}

#[rstest]
#[actix_web::test]
async fn query_parameters_reach_the_port(manager: Caller) {
    let mut query = MockMobileSyncQuery::new();
    query
        .expect_get_delta()
        .withf(move |request| {
            request.caller == manager
                && request.since.as_millis() == 1_500
                && request.shapes.contains(Shape::Readings)
                && request.shapes.contains(Shape::Jobs)
                && !request.shapes.contains(Shape::Pools)
        })
        .times(1)
        .return_once(|_| Ok(DeltaSnapshot::empty_at(42)));
    let app = actix_test::init_service(test_app(Arc::new(query))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/mobile/sync?since=1500&shapes=readings,%20jobs,unknown")
            .insert_header(bearer_header(&manager))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["serverTs"], 42);
}

#[rstest]
#[case("abc")]
#[case("1.5")]
#[case("-10")]
#[actix_web::test]
async fn malformed_since_falls_back_to_full_resync(manager: Caller, #[case] since: &str) {
    let mut query = MockMobileSyncQuery::new();
    query
        .expect_get_delta()
        .withf(|request| request.since == Watermark::EPOCH)
        .times(1)
        .return_once(|_| Ok(DeltaSnapshot::empty_at(7)));
    let app = actix_test::init_service(test_app(Arc::new(query))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/mobile/sync?since={since}"))
            .insert_header(bearer_header(&manager))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["serverTs"], 7);
}

#[rstest]
#[actix_web::test]
async fn missing_token_is_unauthorised() {
    let mut query = MockMobileSyncQuery::new();
    query.expect_get_delta().times(0);
    let app = actix_test::init_service(test_app(Arc::new(query))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/mobile/sync")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case(Error::service_unavailable("sync record repository unavailable: timeout"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("sync record repository error: boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn port_failures_map_to_status(
    manager: Caller,
    #[case] failure: Error,
    #[case] expected: StatusCode,
) {
    let mut query = MockMobileSyncQuery::new();
    query
        .expect_get_delta()
        .times(1)
        .return_once(move |_| Err(failure));
    let app = actix_test::init_service(test_app(Arc::new(query))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/mobile/sync")
            .insert_header(bearer_header(&manager))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        !body["message"]
            .as_str()
            .expect("message")
            .contains("boom"),
        "internal detail leaked"
    );
}
