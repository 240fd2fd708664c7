//! Client watermark (`since`) handling.

use chrono::{DateTime, Utc};

/// Point in time from which a client asks for changes.
///
/// Stored as epoch milliseconds, the unit the mobile client persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Watermark(i64);

/// Errors raised while parsing a watermark.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatermarkError {
    /// The value is not an integer.
    #[error("since must be an integer number of milliseconds: {0}")]
    NotAnInteger(String),
    /// The value is before the epoch.
    #[error("since must not be negative: {0}")]
    Negative(i64),
}

impl Watermark {
    /// The epoch, meaning "send me everything".
    pub const EPOCH: Self = Self(0);

    /// Build a watermark from epoch milliseconds.
    pub fn from_millis(millis: i64) -> Result<Self, WatermarkError> {
        if millis < 0 {
            return Err(WatermarkError::Negative(millis));
        }
        Ok(Self(millis))
    }

    /// Parse the raw `since` parameter; absent means [`Self::EPOCH`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Watermark;
    ///
    /// assert_eq!(Watermark::parse(None), Ok(Watermark::EPOCH));
    /// assert_eq!(Watermark::parse(Some("1500")).map(|w| w.as_millis()), Ok(1500));
    /// assert!(Watermark::parse(Some("yesterday")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self, WatermarkError> {
        let Some(raw) = raw.map(str::trim) else {
            return Ok(Self::EPOCH);
        };
        let millis = raw
            .parse::<i64>()
            .map_err(|_| WatermarkError::NotAnInteger(raw.to_owned()))?;
        Self::from_millis(millis)
    }

    /// Epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

/// Convert a server instant to the epoch-millisecond wire format.
#[must_use]
pub fn epoch_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}
