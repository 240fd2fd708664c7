//! Mobile delta-sync HTTP handler.
//!
//! ```text
//! GET /mobile/sync?since=<epoch_ms>&shapes=<comma_separated_list>
//! Authorization: Bearer <jwt>
//! ```

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::{ShapeSet, SyncRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::schemas::{DeltaSnapshotSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::watermark_or_epoch;

/// Query parameters accepted by the sync endpoint.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MobileSyncParams {
    /// Client watermark in epoch milliseconds; absent or malformed requests a
    /// full resync.
    #[param(example = "1760860800000")]
    pub since: Option<String>,
    /// Comma-separated shapes; absent means `jobs,pools,visits`.
    /// Unknown names are ignored.
    #[param(example = "jobs,pools,visits,readings")]
    pub shapes: Option<String>,
}

/// Pull today's jobs and related records for the authenticated caller.
#[utoipa::path(
    get,
    path = "/mobile/sync",
    params(MobileSyncParams),
    responses(
        (status = 200, description = "Sync snapshot", body = DeltaSnapshotSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["mobile"],
    operation_id = "getMobileSync",
    security(("BearerToken" = []))
)]
#[get("/mobile/sync")]
pub async fn get_mobile_sync(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    params: web::Query<MobileSyncParams>,
) -> ApiResult<HttpResponse> {
    let MobileSyncParams { since, shapes } = params.into_inner();
    let since = watermark_or_epoch(since.as_deref());
    let shapes = ShapeSet::parse(shapes.as_deref());
    debug!(%shapes, since = since.as_millis(), "mobile sync requested");

    let snapshot = state
        .mobile_sync
        .get_delta(SyncRequest::new(caller.into_inner(), shapes, since))
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .json(snapshot))
}

#[cfg(test)]
#[path = "mobile_sync_tests.rs"]
mod tests;
