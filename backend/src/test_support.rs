//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is compiled for unit tests and when the
//! `test-support` feature is enabled.

pub mod clock {
    //! Deterministic clocks.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Clock pinned to an instant that tests may move forward.
    #[derive(Debug)]
    pub struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        /// Pin the clock to `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Pin the clock to a UTC wall time.
        ///
        /// # Panics
        /// Panics when the components do not form a valid instant.
        pub fn at_utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
            let Some(now) = Utc
                .with_ymd_and_hms(year, month, day, hour, minute, 0)
                .single()
            else {
                panic!("invalid fixture instant {year}-{month}-{day} {hour}:{minute}");
            };
            Self::new(now)
        }

        /// Move the clock forward.
        pub fn advance(&self, delta: TimeDelta) {
            *self.lock_clock() += delta;
        }

        fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod sync_records;
