//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod mobile_sync_query;
mod sync_record_repository;

#[cfg(test)]
pub use mobile_sync_query::MockMobileSyncQuery;
pub use mobile_sync_query::{FixtureMobileSyncQuery, MobileSyncQuery};
#[cfg(test)]
pub use sync_record_repository::MockSyncRecordRepository;
pub use sync_record_repository::{
    FixtureSyncRecordRepository, SyncRecordRepository, SyncRecordRepositoryError,
};
