//! Sync request and response payloads.

use serde::{Deserialize, Serialize};

use super::records::{ChemicalsUsed, Issue, Job, Pool, Reading, Tombstone, VanStockItem, VisitEntry};
use super::{ShapeSet, Watermark};
use crate::domain::Caller;

/// One pull from a mobile client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Authenticated caller the pull is scoped to.
    pub caller: Caller,
    /// Shapes to compute.
    pub shapes: ShapeSet,
    /// Client watermark; logged but not applied.
    pub since: Watermark,
}

impl SyncRequest {
    /// Bundle an authenticated caller with parsed query parameters.
    #[must_use]
    pub fn new(caller: Caller, shapes: ShapeSet, since: Watermark) -> Self {
        Self {
            caller,
            shapes,
            since,
        }
    }
}

/// Response for one sync request.
///
/// Every shape is always present; shapes that were not requested, or have no
/// data, serialise as empty arrays. Clients treat an empty array as
/// authoritative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaSnapshot {
    /// Server time of the snapshot in epoch milliseconds; the client's next
    /// `since`.
    pub server_ts: i64,
    /// Jobs in today's window, ordered by start then id.
    pub jobs: Vec<Job>,
    /// Pools referenced by `jobs`.
    pub pools: Vec<Pool>,
    /// Visit entries.
    pub visits: Vec<VisitEntry>,
    /// Readings for `visits`.
    pub readings: Vec<Reading>,
    /// Chemical usage for `visits`.
    pub chemicals: Vec<ChemicalsUsed>,
    /// Issues for `visits`.
    pub issues: Vec<Issue>,
    /// Van stock; always empty.
    pub van_stock: Vec<VanStockItem>,
    /// Deletions since the watermark; always empty.
    pub tombstones: Vec<Tombstone>,
}

impl DeltaSnapshot {
    /// An empty snapshot stamped with `server_ts`.
    #[must_use]
    pub fn empty_at(server_ts: i64) -> Self {
        Self {
            server_ts,
            ..Self::default()
        }
    }
}
