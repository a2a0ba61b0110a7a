//! Date-window classification and date normalization
//!
//! Every window check takes an explicit `as_of` date instead of reading the
//! wall clock, so results are deterministic for a given input. The binary
//! supplies today's local date at the outermost boundary.
//!
//! All textual date recognition funnels through [`match_date_text`], which
//! keeps free-text extraction and import normalization in agreement.

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::{Record, TimeWindow};
use crate::constants::{CANONICAL_DATE_FORMAT, SPREADSHEET_EPOCH};

static DASHED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("valid date regex"));

static SLASHED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2})").expect("valid date regex"));

static LOCALIZED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").expect("valid date regex"));

/// A date as it arrives from an import source
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Already a calendar date
    Date(NaiveDate),
    /// Spreadsheet serial day number
    Serial(f64),
    /// Free text in one of the recognised patterns
    Text(String),
    /// No value at all
    Empty,
}

impl DateInput {
    pub fn is_empty(&self) -> bool {
        match self {
            DateInput::Empty => true,
            DateInput::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            DateInput::Empty
        } else {
            DateInput::Text(value.to_string())
        }
    }
}

// =============================================================================
// Window Classification
// =============================================================================

/// Check whether `date` falls inside `window` relative to `as_of`
///
/// Membership is calendar year/month equality, not a rolling range:
/// `Month` on 2024-03-01 includes 2024-03-31 but not 2024-02-29.
pub fn is_in_window(date: NaiveDate, window: TimeWindow, as_of: NaiveDate) -> bool {
    match window {
        TimeWindow::Month => date.year() == as_of.year() && date.month() == as_of.month(),
        TimeWindow::Year => date.year() == as_of.year(),
        TimeWindow::LastMonth => {
            let (year, month) = if as_of.month() == 1 {
                (as_of.year() - 1, 12)
            } else {
                (as_of.year(), as_of.month() - 1)
            };
            date.year() == year && date.month() == month
        }
        TimeWindow::LastYear => date.year() == as_of.year() - 1,
        TimeWindow::All => true,
    }
}

/// Borrow the records that fall inside `window`
///
/// `All` returns every record without evaluating dates.
pub fn filter_window<R: Record>(records: &[R], window: TimeWindow, as_of: NaiveDate) -> Vec<&R> {
    match window {
        TimeWindow::All => records.iter().collect(),
        _ => records
            .iter()
            .filter(|record| is_in_window(record.date(), window, as_of))
            .collect(),
    }
}

// =============================================================================
// Date Extraction
// =============================================================================

/// Find the first recognisable date in `text`
///
/// Patterns are tried in order: `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY年MM月DD日`.
/// A match that is not a real calendar day (e.g. `2024-02-30`) is ignored
/// and the next pattern is tried.
pub fn match_date_text(text: &str) -> Option<NaiveDate> {
    [&*DASHED_DATE, &*SLASHED_DATE, &*LOCALIZED_DATE]
        .into_iter()
        .find_map(|pattern| {
            let caps = pattern.captures(text)?;
            let year = caps[1].parse::<i32>().ok()?;
            let month = caps[2].parse::<u32>().ok()?;
            let day = caps[3].parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
}

/// Extract a date from free text, falling back to `today`
pub fn extract_date(text: &str, today: NaiveDate) -> NaiveDate {
    match_date_text(text).unwrap_or(today)
}

/// Resolve any import-side date representation to a calendar date
///
/// This is the single normalization point for every import path. Anything
/// unresolvable yields `today`.
pub fn normalize_date(value: &DateInput, today: NaiveDate) -> NaiveDate {
    match value {
        DateInput::Date(date) => *date,
        DateInput::Serial(serial) => serial_to_date(*serial).unwrap_or(today),
        DateInput::Text(text) => extract_date(text, today),
        DateInput::Empty => today,
    }
}

/// Canonical `YYYY-MM-DD` form of a normalized date
pub fn normalize_date_string(value: &DateInput, today: NaiveDate) -> String {
    canonical_date(normalize_date(value, today))
}

pub fn canonical_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

// =============================================================================
// Spreadsheet Serials
// =============================================================================

fn spreadsheet_epoch() -> NaiveDate {
    let (year, month, day) = SPREADSHEET_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Convert a spreadsheet serial day number to a date
///
/// The fractional (time-of-day) part is ignored. Negative, non-finite and
/// out-of-range serials yield `None`.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > u32::MAX as f64 {
        return None;
    }
    spreadsheet_epoch().checked_add_days(Days::new(serial.floor() as u64))
}

/// Convert a date to its spreadsheet serial day number
pub fn date_to_serial(date: NaiveDate) -> f64 {
    (date - spreadsheet_epoch()).num_days() as f64
}

// =============================================================================
// Display
// =============================================================================

/// Localized display form, e.g. `2024年3月5日`
pub fn format_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// Display form for any date representation
///
/// Serials are converted first; text that cannot be understood is echoed
/// back unchanged.
pub fn format_date_input(value: &DateInput) -> String {
    match value {
        DateInput::Date(date) => format_date(*date),
        DateInput::Serial(serial) => serial_to_date(*serial)
            .map(format_date)
            .unwrap_or_else(|| serial.to_string()),
        DateInput::Text(text) => match_date_text(text)
            .map(format_date)
            .unwrap_or_else(|| text.clone()),
        DateInput::Empty => String::new(),
    }
}

/// Whole days from `start` to `end`, never negative
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}
