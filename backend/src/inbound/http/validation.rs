//! Lenient parsing for inbound HTTP query parameters.
//!
//! The sync endpoint has no failure path beyond authentication, so malformed
//! parameters degrade to their defaults instead of rejecting the request.

use tracing::warn;

use crate::domain::Watermark;

/// Parse the optional `since` watermark, falling back to
/// [`Watermark::EPOCH`] when the value is not a non-negative integer.
pub(crate) fn watermark_or_epoch(raw: Option<&str>) -> Watermark {
    Watermark::parse(raw).unwrap_or_else(|error| {
        warn!(%error, "ignoring malformed since parameter; using full resync");
        Watermark::EPOCH
    })
}
