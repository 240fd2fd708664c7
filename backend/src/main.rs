//! Backend entry-point: loads settings, prepares the record store, and serves
//! the mobile sync API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use server::metrics::build_prometheus;
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::SyncTimeZone;
use backend::inbound::http::auth::JwtVerifier;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Resolve the token-signing secret, generating a throwaway one for debug
/// builds.
fn jwt_secret(settings: &AppSettings) -> std::io::Result<Vec<u8>> {
    match settings.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => Ok(secret.as_bytes().to_vec()),
        _ if cfg!(debug_assertions) => {
            warn!("POOLOPS_JWT_SECRET unset; using an ephemeral secret (dev only)");
            let bytes: [u8; 32] = rand::thread_rng().r#gen();
            Ok(hex::encode(bytes).into_bytes())
        }
        _ => Err(std::io::Error::other("POOLOPS_JWT_SECRET must be set")),
    }
}

async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("POOLOPS_DATABASE_URL unset; serving empty fixture data");
        return Ok(None);
    };

    if settings.run_migrations {
        let applied = run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
    }

    let mut config = PoolConfig::new(url);
    if let Some(max) = settings.db_max_connections {
        config = config.with_max_size(max);
    }
    let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let sync_zone = settings.sync_time_zone().map_err(std::io::Error::other)?;
    let verifier = JwtVerifier::from_secret(&jwt_secret(&settings)?);

    let mut config = ServerConfig::new(bind_addr, verifier).with_sync_zone(sync_zone);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }
    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(build_prometheus("poolops"));
    }

    if sync_zone == SyncTimeZone::ServerLocal {
        info!("job window uses the server's local time zone");
    }
    info!(%bind_addr, "starting server");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
