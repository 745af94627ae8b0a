// File: ./src/calendar.rs
//! Date "tense" classification and weekday naming.
//!
//! Everything here is a pure function of its arguments, apart from the
//! reference instant which comes from an injected [`Clock`].

use crate::clock::Clock;
use crate::i18n::I18n;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use strum::EnumIter;

/// A proleptic Gregorian calendar date.
pub type CalendarDate = NaiveDate;
/// A calendar date plus time-of-day, nanosecond precision.
pub type CalendarDateTime = NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Past,
    Present,
    Future,
}

impl Tense {
    /// Maps `value.cmp(&reference)` to a tense.
    pub fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Tense::Past,
            Ordering::Equal => Tense::Present,
            Ordering::Greater => Tense::Future,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Past => "past",
            Tense::Present => "present",
            Tense::Future => "future",
        }
    }

    fn i18n_key(&self) -> &'static str {
        match self {
            Tense::Past => "tense.past",
            Tense::Present => "tense.present",
            Tense::Future => "tense.future",
        }
    }

    pub fn localized(&self, i18n: &I18n) -> String {
        i18n.translate(self.i18n_key())
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week by ISO ordinal (1 = Monday .. 7 = Sunday).
///
/// `Unknown` (ordinal 0) is never produced from a valid date but is kept so
/// out-of-range ordinals have somewhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum WeekDay {
    #[default]
    Unknown,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

// Indexed by ordinal.
const WEEKDAYS: [WeekDay; 8] = [
    WeekDay::Unknown,
    WeekDay::Monday,
    WeekDay::Tuesday,
    WeekDay::Wednesday,
    WeekDay::Thursday,
    WeekDay::Friday,
    WeekDay::Saturday,
    WeekDay::Sunday,
];

const WEEKDAY_NAMES: [&str; 8] = [
    "unknown",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

impl WeekDay {
    pub fn from_ordinal(ordinal: u32) -> Self {
        match ordinal {
            1..=7 => WEEKDAYS[ordinal as usize],
            _ => WeekDay::Unknown,
        }
    }

    pub fn from_date(date: &CalendarDate) -> Self {
        Self::from_ordinal(date.weekday().number_from_monday())
    }

    pub fn ordinal(&self) -> u32 {
        *self as u32
    }

    /// Lowercase English name, "unknown" for the sentinel.
    pub fn name(&self) -> &'static str {
        WEEKDAY_NAMES[self.ordinal() as usize]
    }

    pub fn localized(&self, i18n: &I18n) -> String {
        i18n.translate(&format!("weekday.{}", self.name()))
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compares `date` with the clock's current local date.
pub fn classify_date_tense(date: &CalendarDate, clock: &dyn Clock) -> Tense {
    Tense::from_ordering(date.cmp(&clock.today()))
}

/// Compares the full instant `date_time` with the clock's current local
/// date-time, so a later time on today's date is still `Future`.
pub fn classify_date_time_tense(date_time: &CalendarDateTime, clock: &dyn Clock) -> Tense {
    Tense::from_ordering(date_time.cmp(&clock.now()))
}

pub fn weekday_name(date: &CalendarDate) -> &'static str {
    WeekDay::from_date(date).name()
}

/// Half-open range check: `start <= date < end`.
///
/// A reversed range (`start > end`) is empty and always yields false.
pub fn is_date_between(date: &CalendarDate, start: &CalendarDate, end: &CalendarDate) -> bool {
    start <= date && date < end
}
