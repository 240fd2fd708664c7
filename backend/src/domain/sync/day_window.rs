//! Calendar-day bucket used for "today's jobs".

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use tracing::warn;

/// Zone in which "today" is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncTimeZone {
    /// The server process's local zone.
    #[default]
    ServerLocal,
    /// A fixed offset east of UTC.
    Fixed(FixedOffset),
}

impl SyncTimeZone {
    /// Build a fixed zone from minutes east of UTC.
    ///
    /// Returns `None` when the offset is outside ±24 hours.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(Self::Fixed)
    }
}

/// Half-open `[start, end)` range of UTC instants covering one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    /// The local day containing `now` in `zone`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{DayWindow, SyncTimeZone};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let zone = SyncTimeZone::from_offset_minutes(60).expect("valid offset");
    /// let now = Utc.with_ymd_and_hms(2026, 3, 10, 23, 30, 0).unwrap();
    /// let window = DayWindow::containing(now, zone);
    /// assert_eq!(window.start(), Utc.with_ymd_and_hms(2026, 3, 10, 23, 0, 0).unwrap());
    /// assert_eq!(window.end(), Utc.with_ymd_and_hms(2026, 3, 11, 23, 0, 0).unwrap());
    /// ```
    #[must_use]
    pub fn containing(now: DateTime<Utc>, zone: SyncTimeZone) -> Self {
        match zone {
            SyncTimeZone::ServerLocal => window_in(now, &Local),
            SyncTimeZone::Fixed(offset) => window_in(now, &offset),
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn window_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DayWindow {
    let today = now.with_timezone(tz).date_naive();
    let start = local_midnight(tz, today);
    let end = today
        .succ_opt()
        .map_or(start + TimeDelta::days(1), |tomorrow| local_midnight(tz, tomorrow));
    DayWindow { start, end }
}

const GAP_STEP_MINUTES: i64 = 15;

/// First valid instant of `date` in `tz`.
///
/// Zones that skip midnight for DST resolve to the earliest quarter hour after
/// the gap.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    let first_valid = (0..24 * 60 / GAP_STEP_MINUTES)
        .map(|step| midnight + TimeDelta::minutes(step * GAP_STEP_MINUTES))
        .find_map(|local| tz.from_local_datetime(&local).earliest());
    match first_valid {
        Some(instant) => instant.with_timezone(&Utc),
        None => {
            warn!(%date, "no valid local time on date; treating local midnight as UTC");
            midnight.and_utc()
        }
    }
}
