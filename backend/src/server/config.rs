//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::SyncTimeZone;
use backend::inbound::http::auth::JwtVerifier;
use backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: JwtVerifier,
    pub(crate) sync_zone: SyncTimeZone,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration with the fixture store and the server's local zone.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: JwtVerifier) -> Self {
        Self {
            bind_addr,
            verifier,
            sync_zone: SyncTimeZone::ServerLocal,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Evaluate "today" in `zone` instead of the server's local zone.
    #[must_use]
    pub fn with_sync_zone(mut self, zone: SyncTimeZone) -> Self {
        self.sync_zone = zone;
        self
    }

    /// Attach a database connection pool.
    ///
    /// Without one the sync endpoint serves empty snapshots from the fixture
    /// record store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
