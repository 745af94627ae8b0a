// File: ./src/clock.rs
//! Injectable source of "now".
//!
//! Tense classification depends on the current moment. Callers pass a
//! `&dyn Clock` instead of reading the wall clock directly so tests can pin
//! the reference instant.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Current date/time provider, expressed in the local calendar.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current local date-time.
    fn now(&self) -> NaiveDateTime;

    /// Current local date (ISO calendar).
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local wall clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a caller-chosen instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub current: NaiveDateTime,
}

impl FixedClock {
    pub fn new(current: NaiveDateTime) -> Self {
        Self { current }
    }

    /// Clock pinned to 00:00:00 on `date`.
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self {
            current: date.and_time(chrono::NaiveTime::MIN),
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.current
    }
}

// Convenience alias for callers that keep the clock behind an Arc.
pub type SharedClock = std::sync::Arc<dyn Clock>;
