//! Cost per kilometre and cost per day
//!
//! Both metrics compare the current period against the one before it. The
//! reference rules differ between `month`/`year` and the other windows; they
//! are kept exactly as the dashboard has always computed them.

use chrono::NaiveDate;
use tracing::debug;

use super::totals::total_fee;
use super::{max_mileage, min_mileage};
use crate::app::models::{ChargingRecord, CostPeriod, ParkingRecord, TimeWindow};
use crate::app::services::numeric::round2;
use crate::app::services::temporal::{days_between, filter_window};

/// Charging fee in `window` divided by the distance driven
///
/// The distance is the highest odometer reading across all records minus a
/// reference reading:
/// - `Month`/`Year`: the highest reading of the previous period, or the
///   lowest reading overall when the previous period has no records
/// - any other window: the lowest reading overall
///
/// Returns `0` when nothing falls in the window or the distance is not
/// positive.
pub fn cost_per_km(records: &[ChargingRecord], window: TimeWindow, as_of: NaiveDate) -> f64 {
    let filtered = filter_window(records, window, as_of);
    if filtered.is_empty() {
        return 0.0;
    }
    let fee: f64 = filtered.iter().map(|record| record.cost).sum();

    let (Some(highest), Some(lowest)) = (max_mileage(records), min_mileage(records)) else {
        return 0.0;
    };

    let reference = window
        .previous()
        .and_then(|previous| max_mileage(filter_window(records, previous, as_of)))
        .unwrap_or(lowest);

    let distance = highest - reference;
    debug!(
        "Cost per km for {}: fee {:.2} over {:.1} (reference {:.1})",
        window, fee, distance, reference
    );

    if distance > 0.0 {
        round2(fee / distance)
    } else {
        0.0
    }
}

/// Latest charging date within `window`
fn last_charging_date(records: &[ChargingRecord], window: TimeWindow, as_of: NaiveDate) -> Option<NaiveDate> {
    filter_window(records, window, as_of)
        .iter()
        .map(|record| record.date)
        .max()
}

/// Number of days the period's spending is spread over
fn period_days(records: &[ChargingRecord], period: CostPeriod, as_of: NaiveDate) -> i64 {
    let window = period.window();
    match window.previous() {
        Some(previous) => {
            let Some(current_last) = last_charging_date(records, window, as_of) else {
                return 0;
            };
            match last_charging_date(records, previous, as_of) {
                Some(previous_last) => days_between(previous_last, current_last),
                None => 1,
            }
        }
        None => {
            let first = records.iter().map(|record| record.date).min();
            let last = records.iter().map(|record| record.date).max();
            match (first, last) {
                (Some(first), Some(last)) => days_between(first, last),
                _ => 0,
            }
        }
    }
}

/// Charging plus parking spend per day, formatted with two decimals
///
/// For `Month`/`Year` the day count runs from the last charging date of the
/// previous period to the last charging date of the current one (one day
/// when the previous period is empty). For `Total` it is the span of all
/// charging records. A zero day count yields `"0.00"`.
pub fn cost_per_day(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    period: CostPeriod,
    as_of: NaiveDate,
) -> String {
    if charging.is_empty() && parking.is_empty() {
        return "0.00".to_string();
    }

    let window = period.window();
    let fee = total_fee(charging, window, as_of) + total_fee(parking, window, as_of);
    let days = period_days(charging, period, as_of);

    if days > 0 {
        format!("{:.2}", fee / days as f64)
    } else {
        "0.00".to_string()
    }
}
