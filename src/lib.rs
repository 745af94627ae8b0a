// Crate root library declaration and module exports.
pub mod calendar;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod i18n;

// Bundled translations, compiled in from ./locales.
rust_i18n::i18n!("locales", fallback = "en");

pub use calendar::{
    CalendarDate, CalendarDateTime, Tense, WeekDay, classify_date_tense,
    classify_date_time_tense, is_date_between, weekday_name,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use i18n::{I18n, I18nOptions, setup_i18n};
