//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories run on `diesel-async` connections checked out of a `bb8`
//! pool. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; only domain types cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselSyncRecordRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/poolops")).await?;
//! let records = DieselSyncRecordRepository::new(pool);
//! ```

mod diesel_sync_record_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_sync_record_repository::DieselSyncRecordRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
