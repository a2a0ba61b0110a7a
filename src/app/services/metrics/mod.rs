//! Metrics engine for charging and parking records
//!
//! This module computes aggregate and derived statistics over record
//! collections for a given time window. Every function takes its records by
//! slice and returns fresh values; nothing here mutates or retains input.
//!
//! # Architecture
//!
//! - [`consumption`] - Energy per 100 km between full-charge checkpoints
//! - [`totals`] - Windowed sums and counts (fees, energy, mileage, days)
//! - [`cost`] - Cost per kilometre and cost per day
//! - [`overview`] - Period overview, cost breakdown and the combined dashboard
//!
//! # Time Reference
//!
//! Window membership is evaluated against an explicit `as_of` date. Calling
//! the same function with a later `as_of` can include different records even
//! when the collection is unchanged.
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use charge_ledger::app::services::metrics::{Dashboard, electricity_per_100km};
//! use charge_ledger::TimeWindow;
//!
//! let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let dashboard = Dashboard::compute(&[], &[], TimeWindow::Month, as_of);
//! assert_eq!(dashboard.cost_per_day, "0.00");
//! assert_eq!(electricity_per_100km(&[]), 0.0);
//! ```

pub mod consumption;
pub mod cost;
pub mod overview;
pub mod totals;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use consumption::{
    ConsumptionPoint, consumption_series, electricity_per_100km, recent_consumption,
};
pub use cost::{cost_per_day, cost_per_km};
pub use overview::{CostBreakdown, Dashboard, PeriodOverview, cost_breakdown, period_overview};
pub use totals::{
    full_charge_count, total_days, total_electricity, total_fee, total_mileage,
};

use crate::app::models::ChargingRecord;

/// Charging records ordered by date, ties keeping their original order
pub(crate) fn sorted_by_date<'a, I>(records: I) -> Vec<&'a ChargingRecord>
where
    I: IntoIterator<Item = &'a ChargingRecord>,
{
    let mut sorted: Vec<&ChargingRecord> = records.into_iter().collect();
    sorted.sort_by_key(|record| record.date);
    sorted
}

/// Highest odometer reading among `records`
pub(crate) fn max_mileage<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a ChargingRecord>,
{
    records.into_iter().map(|record| record.mileage).reduce(f64::max)
}

/// Lowest odometer reading among `records`
pub(crate) fn min_mileage<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a ChargingRecord>,
{
    records.into_iter().map(|record| record.mileage).reduce(f64::min)
}
