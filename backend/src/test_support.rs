//! Test utilities for the koperasi crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock pinned to a starting instant plus however much time tests have
/// stepped it forward.
///
/// Readings saturate at the latest representable instant.
#[derive(Debug)]
pub struct FixedClock {
    start: DateTime<Utc>,
    elapsed: Mutex<Duration>,
}

impl FixedClock {
    /// Pin the clock at `start`.
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Step the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut elapsed = self.elapsed();
        *elapsed = elapsed.saturating_add(step);
    }

    // A panicking test thread must not wedge the clock for the others.
    fn elapsed(&self) -> MutexGuard<'_, Duration> {
        self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        TimeDelta::from_std(*self.elapsed())
            .ok()
            .and_then(|offset| self.start.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
