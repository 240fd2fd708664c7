//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `POOLOPS_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SyncTimeZone;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings rejected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value}: {message}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `sync_utc_offset_minutes` is a day or more away from UTC.
    #[error("sync UTC offset of {minutes} minutes is out of range")]
    SyncOffset {
        /// Configured offset.
        minutes: i32,
    },
}

/// Configuration for the sync server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POOLOPS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server answers from empty fixtures.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// HMAC secret used to verify bearer tokens.
    pub jwt_secret: Option<String>,
    /// Fixed offset, in minutes east of UTC, defining "today" for job
    /// selection. The server's local zone is used when unset.
    pub sync_utc_offset_minutes: Option<i32>,
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Zone whose calendar day bounds the job window.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::SyncOffset`] for offsets of a day or more.
    pub fn sync_time_zone(&self) -> Result<SyncTimeZone, SettingsError> {
        match self.sync_utc_offset_minutes {
            None => Ok(SyncTimeZone::ServerLocal),
            Some(minutes) => SyncTimeZone::from_offset_minutes(minutes)
                .ok_or(SettingsError::SyncOffset { minutes }),
        }
    }
}
