//! Test fixtures for the metrics engine
//!
//! All window-based tests pin `as_of` so they do not depend on the calendar.

use chrono::NaiveDate;

use crate::app::models::{ChargingRecord, ParkingRecord};

mod cost_tests;
mod overview_tests;

/// Parse a `YYYY-MM-DD` fixture date
pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// The fixed reference date used across metrics tests
pub fn as_of() -> NaiveDate {
    day("2024-03-15")
}

/// Build a charging record; price is derived from amount and cost
pub fn charge(date: &str, mileage: f64, amount: f64, cost: f64, is_full: bool) -> ChargingRecord {
    ChargingRecord {
        id: format!("charging_{}_{}", date, mileage),
        date: day(date),
        mileage,
        amount,
        price: if amount > 0.0 { cost / amount } else { 0.0 },
        cost,
        is_full,
    }
}

pub fn park(date: &str, cost: f64) -> ParkingRecord {
    ParkingRecord {
        id: format!("parking_{}_{}", date, cost),
        date: day(date),
        cost,
    }
}

/// Charging history spanning last year, last month and this month
///
/// Relative to [`as_of`] (2024-03-15):
/// - 2023: two records, max mileage 5000
/// - February 2024: two records, max mileage 6000, last on Feb 20
/// - March 2024: two records, max mileage 6600, last on Mar 10
pub fn sample_charging() -> Vec<ChargingRecord> {
    vec![
        charge("2023-06-01", 4000.0, 30.0, 36.0, true),
        charge("2023-11-11", 5000.0, 40.0, 48.0, false),
        charge("2024-02-05", 5600.0, 35.0, 42.0, true),
        charge("2024-02-20", 6000.0, 20.0, 24.0, false),
        charge("2024-03-02", 6300.0, 25.0, 30.0, false),
        charge("2024-03-10", 6600.0, 30.0, 36.0, true),
    ]
}

pub fn sample_parking() -> Vec<ParkingRecord> {
    vec![
        park("2023-12-30", 20.0),
        park("2024-02-14", 10.0),
        park("2024-03-03", 5.0),
        park("2024-03-12", 7.0),
    ]
}

/// Float comparison for derived values
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
