//! Builders wiring domain services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::MobileSyncService;
use backend::domain::ports::{FixtureSyncRecordRepository, MobileSyncQuery, SyncRecordRepository};
use backend::domain::SyncTimeZone;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselSyncRecordRepository};

use super::ServerConfig;

/// Pick the Diesel record store when a pool is configured, otherwise the
/// empty fixture store.
fn build_sync_records<Pool, R>(
    pool: &Option<Pool>,
    make_repository: impl FnOnce(&Pool) -> R,
) -> Arc<dyn SyncRecordRepository>
where
    R: SyncRecordRepository + 'static,
{
    match pool {
        Some(pool) => Arc::new(make_repository(pool)),
        None => Arc::new(FixtureSyncRecordRepository),
    }
}

fn build_mobile_sync(
    records: Arc<dyn SyncRecordRepository>,
    clock: Arc<dyn Clock>,
    zone: SyncTimeZone,
) -> Arc<dyn MobileSyncQuery> {
    Arc::new(MobileSyncService::new(records, clock, zone))
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let records = build_sync_records(&config.db_pool, |pool: &DbPool| {
        DieselSyncRecordRepository::new(pool.clone())
    });
    let mobile_sync = build_mobile_sync(records, Arc::new(DefaultClock), config.sync_zone);
    web::Data::new(HttpState::new(mobile_sync))
}
