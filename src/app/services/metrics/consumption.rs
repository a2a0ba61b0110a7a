//! Consumption between full-charge checkpoints
//!
//! A full charge resets the battery to a known state, so the energy put in
//! between two consecutive full charges is the energy driven between their
//! odometer readings. The interval after checkpoint `k` up to and including
//! checkpoint `k+1` owns every record dated in `(date_k, date_k+1]`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sorted_by_date;
use crate::app::models::ChargingRecord;
use crate::app::services::numeric::round2;

/// Consumption measured over one checkpoint interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionPoint {
    /// Id of the checkpoint closing the interval
    pub checkpoint_id: String,

    /// Date of the checkpoint closing the interval
    pub date: NaiveDate,

    /// Energy per 100 distance units, rounded to two decimals
    pub per_100km: f64,
}

/// Energy charged in `(previous.date, latest.date]`
fn interval_energy(
    sorted: &[&ChargingRecord],
    previous: &ChargingRecord,
    latest: &ChargingRecord,
) -> f64 {
    sorted
        .iter()
        .filter(|record| record.date > previous.date && record.date <= latest.date)
        .map(|record| record.amount)
        .sum()
}

/// Energy per 100 km over the two most recent full-charge checkpoints
///
/// Returns `0` with fewer than two checkpoints or when the odometer did not
/// advance between them.
pub fn electricity_per_100km(records: &[ChargingRecord]) -> f64 {
    if records.len() < 2 {
        return 0.0;
    }

    let sorted = sorted_by_date(records);
    let checkpoints: Vec<&ChargingRecord> =
        sorted.iter().copied().filter(|record| record.is_full).collect();

    let [.., previous, latest] = checkpoints.as_slice() else {
        debug!(
            "Consumption needs two full charges, found {}",
            checkpoints.len()
        );
        return 0.0;
    };

    let distance = latest.mileage - previous.mileage;
    if distance <= 0.0 {
        return 0.0;
    }

    let energy = interval_energy(&sorted, previous, latest);
    round2(energy / distance * 100.0)
}

/// Consumption for every consecutive pair of checkpoints, oldest first
///
/// Intervals where the odometer did not advance or no energy was recorded
/// are left out.
pub fn consumption_series(records: &[ChargingRecord]) -> Vec<ConsumptionPoint> {
    let sorted = sorted_by_date(records);
    let checkpoints: Vec<&ChargingRecord> =
        sorted.iter().copied().filter(|record| record.is_full).collect();

    checkpoints
        .windows(2)
        .filter_map(|pair| {
            let (previous, latest) = (pair[0], pair[1]);
            let distance = latest.mileage - previous.mileage;
            let energy = interval_energy(&sorted, previous, latest);
            (distance > 0.0 && energy > 0.0).then(|| ConsumptionPoint {
                checkpoint_id: latest.id.clone(),
                date: latest.date,
                per_100km: round2(energy / distance * 100.0),
            })
        })
        .collect()
}

/// The last `count` points of [`consumption_series`]
pub fn recent_consumption(records: &[ChargingRecord], count: usize) -> Vec<ConsumptionPoint> {
    let mut series = consumption_series(records);
    let excess = series.len().saturating_sub(count);
    series.drain(..excess);
    series
}
