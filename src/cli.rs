// File: ./src/cli.rs
//! Command-line parsing and dispatch shared by the `daytense` binary.

use crate::calendar::{self, CalendarDate, CalendarDateTime, WeekDay};
use crate::clock::Clock;
use crate::i18n::I18n;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateArg {
    Date(CalendarDate),
    DateTime(CalendarDateTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tense(DateArg),
    Weekday(CalendarDate),
    Between {
        date: CalendarDate,
        start: CalendarDate,
        end: CalendarDate,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub locale: Option<String>,
    pub root: Option<PathBuf>,
    pub raw: bool,
}

pub fn parse_date(s: &str) -> Result<CalendarDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts a plain date or a date-time (`T` or space separated).
pub fn parse_date_arg(s: &str) -> Result<DateArg> {
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(DateArg::Date(d));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(DateArg::DateTime)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS[.fff]]",
                s
            )
        })
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut locale = None;
    let mut root = None;
    let mut raw = false;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    command: Command::Help,
                    locale,
                    root,
                    raw,
                });
            }
            "--locale" | "-l" => {
                let v = iter.next().context("--locale requires a value")?;
                locale = Some(v.clone());
            }
            "--root" | "-r" => {
                let v = iter.next().context("--root requires a path")?;
                root = Some(PathBuf::from(v));
            }
            "--raw" => raw = true,
            other if other.starts_with('-') && parse_date(other).is_err() => {
                anyhow::bail!("Unknown option '{}'", other);
            }
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        ["tense", date] => Command::Tense(parse_date_arg(date)?),
        ["weekday", date] => Command::Weekday(parse_date(date)?),
        ["between", date, start, end] => Command::Between {
            date: parse_date(date)?,
            start: parse_date(start)?,
            end: parse_date(end)?,
        },
        [cmd, ..] => anyhow::bail!("Unknown command or wrong arguments for '{}'", cmd),
    };

    Ok(CliArgs {
        command,
        locale,
        root,
        raw,
    })
}

/// Runs `command` and renders its result. With `i18n == None` the raw
/// English labels are printed.
pub fn execute(command: &Command, clock: &dyn Clock, i18n: Option<&I18n>) -> String {
    match command {
        Command::Tense(arg) => {
            let tense = match arg {
                DateArg::Date(d) => calendar::classify_date_tense(d, clock),
                DateArg::DateTime(dt) => calendar::classify_date_time_tense(dt, clock),
            };
            match i18n {
                Some(i18n) => tense.localized(i18n),
                None => tense.as_str().to_string(),
            }
        }
        Command::Weekday(d) => match i18n {
            Some(i18n) => WeekDay::from_date(d).localized(i18n),
            None => calendar::weekday_name(d).to_string(),
        },
        Command::Between { date, start, end } => {
            let inside = calendar::is_date_between(date, start, end);
            match i18n {
                Some(i18n) if inside => i18n.translate("range.inside"),
                Some(i18n) => i18n.translate("range.outside"),
                None => inside.to_string(),
            }
        }
        Command::Help => String::new(),
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Daytense v{} - Classify dates as past, present or future",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} tense <date|datetime>", binary_name);
    println!("    {} weekday <date>", binary_name);
    println!("    {} between <date> <start> <end>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -l, --locale <code>   Locale for labels (en, de, or any loaded locale).");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    --raw                 Print untranslated labels / true / false.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("FORMATS:");
    println!("    date                  YYYY-MM-DD");
    println!("    datetime              YYYY-MM-DDTHH:MM[:SS[.fff]]");
    println!();
    println!("NOTES:");
    println!("    'between' is half-open: start is included, end is excluded.");
    println!("    Extra locales are read from <data>/locales/<code>.json.");
}
