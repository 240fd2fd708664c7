//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureMobileSyncQuery, MobileSyncQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Driving port behind `GET /mobile/sync`.
    pub mobile_sync: Arc<dyn MobileSyncQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    pub fn new(mobile_sync: Arc<dyn MobileSyncQuery>) -> Self {
        Self { mobile_sync }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureMobileSyncQuery))
    }
}
