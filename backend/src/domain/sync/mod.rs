//! Mobile delta-sync model.
//!
//! A sync pull names the shapes it wants and the client's last watermark;
//! the answer is a [`DeltaSnapshot`] holding today's jobs and the records
//! that hang off them.

mod day_window;
mod non_empty_ids;
pub mod records;
mod shapes;
mod snapshot;
mod watermark;

pub use self::day_window::{DayWindow, SyncTimeZone};
pub use self::non_empty_ids::NonEmptyIds;
pub use self::records::{
    ChemicalsUsed, Issue, IssueSeverity, IssueStatus, Job, JobStatus, Pool, Reading, Tombstone,
    VanStockItem, VisitEntry,
};
pub use self::shapes::{ParseShapeError, Shape, ShapeSet};
pub use self::snapshot::{DeltaSnapshot, SyncRequest};
pub use self::watermark::{Watermark, WatermarkError, epoch_millis};
