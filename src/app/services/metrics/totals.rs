//! Windowed sums and counts

use chrono::NaiveDate;

use super::sorted_by_date;
use crate::app::models::{ChargingRecord, ParkingRecord, Record, TimeWindow};
use crate::app::services::numeric::round2;
use crate::app::services::temporal::{days_between, filter_window};

/// Sum of `cost` over records in `window`, rounded to two decimals
///
/// Works for either record kind.
pub fn total_fee<R: Record>(records: &[R], window: TimeWindow, as_of: NaiveDate) -> f64 {
    let sum: f64 = filter_window(records, window, as_of)
        .iter()
        .map(|record| record.cost())
        .sum();
    round2(sum)
}

/// Sum of charged energy over records in `window`, rounded to two decimals
pub fn total_electricity(records: &[ChargingRecord], window: TimeWindow, as_of: NaiveDate) -> f64 {
    let sum: f64 = filter_window(records, window, as_of)
        .iter()
        .map(|record| record.amount)
        .sum();
    round2(sum)
}

/// Number of full charges in `window`
pub fn full_charge_count(records: &[ChargingRecord], window: TimeWindow, as_of: NaiveDate) -> usize {
    filter_window(records, window, as_of)
        .iter()
        .filter(|record| record.is_full)
        .count()
}

/// Odometer distance from the earliest to the latest record in `window`
///
/// Needs at least two records. Out-of-order readings give a negative
/// result, which is returned as-is.
pub fn total_mileage(records: &[ChargingRecord], window: TimeWindow, as_of: NaiveDate) -> f64 {
    let filtered = filter_window(records, window, as_of);
    if filtered.len() < 2 {
        return 0.0;
    }

    let sorted = sorted_by_date(filtered);
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => last.mileage - first.mileage,
        _ => 0.0,
    }
}

/// Whole days from the earliest record of either kind to `as_of`
pub fn total_days(charging: &[ChargingRecord], parking: &[ParkingRecord], as_of: NaiveDate) -> i64 {
    charging
        .iter()
        .map(|record| record.date)
        .chain(parking.iter().map(|record| record.date))
        .min()
        .map(|earliest| days_between(earliest, as_of))
        .unwrap_or(0)
}
