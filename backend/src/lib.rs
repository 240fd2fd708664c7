//! PoolOps backend: the mobile delta-sync API.
//!
//! Laid out as ports and adapters. `domain` holds the sync model, its ports,
//! and the service; `inbound::http` exposes it over Actix; `outbound`
//! implements the record store on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
