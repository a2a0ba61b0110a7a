//! Period overview, cost breakdown and the combined dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::consumption::{ConsumptionPoint, electricity_per_100km, recent_consumption};
use super::cost::{cost_per_day, cost_per_km};
use super::totals::{full_charge_count, total_days, total_electricity, total_fee};
use super::{max_mileage, min_mileage};
use crate::app::models::{ChargingRecord, CostPeriod, ParkingRecord, TimeWindow};
use crate::app::services::numeric::round2;
use crate::app::services::temporal::filter_window;
use crate::constants::CONSUMPTION_TREND_POINTS;

/// Distance, energy and spend for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodOverview {
    pub period: CostPeriod,
    pub mileage: f64,
    pub electricity: f64,
    pub charging_fee: f64,
    pub parking_fee: f64,
}

/// Summarise one period
///
/// For `Month`/`Year` the mileage is the highest reading of the current
/// period minus the highest reading of the previous one, and zero unless
/// both periods have records. For `Total` it is the spread between the
/// highest and lowest readings overall.
pub fn period_overview(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    period: CostPeriod,
    as_of: NaiveDate,
) -> PeriodOverview {
    let window = period.window();

    let mileage = match window.previous() {
        Some(previous) => {
            let current_max = max_mileage(filter_window(charging, window, as_of));
            let previous_max = max_mileage(filter_window(charging, previous, as_of));
            match (current_max, previous_max) {
                (Some(current), Some(previous)) => current - previous,
                _ => 0.0,
            }
        }
        None => match (max_mileage(charging), min_mileage(charging)) {
            (Some(highest), Some(lowest)) => highest - lowest,
            _ => 0.0,
        },
    };

    PeriodOverview {
        period,
        mileage,
        electricity: total_electricity(charging, window, as_of),
        charging_fee: total_fee(charging, window, as_of),
        parking_fee: total_fee(parking, window, as_of),
    }
}

/// Charging versus parking spend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub charging: f64,
    pub parking: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        round2(self.charging + self.parking)
    }

    pub fn is_empty(&self) -> bool {
        self.charging == 0.0 && self.parking == 0.0
    }

    /// Charging share of the total as a percentage
    pub fn charging_share(&self) -> f64 {
        let total = self.charging + self.parking;
        if total > 0.0 {
            round2(self.charging / total * 100.0)
        } else {
            0.0
        }
    }
}

/// Split spend between charging and parking for a period
pub fn cost_breakdown(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    scope: CostPeriod,
    as_of: NaiveDate,
) -> CostBreakdown {
    let window = scope.window();
    CostBreakdown {
        charging: total_fee(charging, window, as_of),
        parking: total_fee(parking, window, as_of),
    }
}

/// Every summary figure for one window, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub window: TimeWindow,
    pub as_of: NaiveDate,
    pub total_days: i64,
    pub electricity_per_100km: f64,
    pub charging_fee: f64,
    pub parking_fee: f64,
    pub full_charge_count: usize,
    pub total_electricity: f64,
    pub cost_per_km: f64,
    pub cost_per_day: String,
    pub overview: PeriodOverview,
    pub consumption_trend: Vec<ConsumptionPoint>,
}

impl Dashboard {
    pub fn compute(
        charging: &[ChargingRecord],
        parking: &[ParkingRecord],
        window: TimeWindow,
        as_of: NaiveDate,
    ) -> Self {
        let period = CostPeriod::from(window);
        Self {
            window,
            as_of,
            total_days: total_days(charging, parking, as_of),
            electricity_per_100km: electricity_per_100km(charging),
            charging_fee: total_fee(charging, window, as_of),
            parking_fee: total_fee(parking, window, as_of),
            full_charge_count: full_charge_count(charging, window, as_of),
            total_electricity: total_electricity(charging, window, as_of),
            cost_per_km: cost_per_km(charging, window, as_of),
            cost_per_day: cost_per_day(charging, parking, period, as_of),
            overview: period_overview(charging, parking, period, as_of),
            consumption_trend: recent_consumption(charging, CONSUMPTION_TREND_POINTS),
        }
    }
}
