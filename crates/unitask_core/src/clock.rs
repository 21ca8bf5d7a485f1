//! Injected wall-clock capability.
//!
//! # Responsibility
//! - Provide "current local date/time" to every time-dependent core path.
//! - Allow tests to substitute a fixed or manually advanced clock.
//!
//! # Invariants
//! - Core code never reads the system clock directly; it always goes through
//!   a `Clock` implementation.
//! - All times are local wall-clock values (`NaiveDateTime`); `today` is the
//!   date part of `now()`.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::cell::Cell;

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for deterministic tests and simulations.
///
/// Uses interior mutability so the owning app can keep a shared reference
/// while a test moves time forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Creates a clock pinned to `hour:minute` on the given date.
    ///
    /// Returns `None` when the date or time components are out of range.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let now = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
        Some(Self::new(now))
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
