//! Tests for period overview, cost breakdown and dashboard assembly

use super::super::overview::{Dashboard, cost_breakdown, period_overview};
use super::{as_of, assert_close, charge, sample_charging, sample_parking};
use crate::app::models::{CostPeriod, TimeWindow};

#[test]
fn test_month_overview() {
    let overview = period_overview(&sample_charging(), &sample_parking(), CostPeriod::Month, as_of());

    assert_close(overview.mileage, 600.0);
    assert_close(overview.electricity, 55.0);
    assert_close(overview.charging_fee, 66.0);
    assert_close(overview.parking_fee, 12.0);
}

#[test]
fn test_year_and_total_overview_mileage() {
    let year = period_overview(&sample_charging(), &sample_parking(), CostPeriod::Year, as_of());
    assert_close(year.mileage, 1600.0);

    let total = period_overview(&sample_charging(), &sample_parking(), CostPeriod::Total, as_of());
    assert_close(total.mileage, 2600.0);
    assert_close(total.charging_fee, 216.0);
}

#[test]
fn test_overview_mileage_needs_previous_period() {
    let charging = vec![
        charge("2024-03-01", 1000.0, 10.0, 12.0, false),
        charge("2024-03-09", 1400.0, 10.0, 12.0, false),
    ];
    let overview = period_overview(&charging, &[], CostPeriod::Month, as_of());
    assert_eq!(overview.mileage, 0.0);
    assert_close(overview.charging_fee, 24.0);
}

#[test]
fn test_cost_breakdown() {
    let year = cost_breakdown(&sample_charging(), &sample_parking(), CostPeriod::Year, as_of());
    assert_close(year.charging, 132.0);
    assert_close(year.parking, 22.0);
    assert_close(year.total(), 154.0);
    assert_close(year.charging_share(), 85.71);

    let total = cost_breakdown(&sample_charging(), &sample_parking(), CostPeriod::Total, as_of());
    assert_close(total.total(), 258.0);

    let empty = cost_breakdown(&[], &[], CostPeriod::Total, as_of());
    assert!(empty.is_empty());
    assert_eq!(empty.charging_share(), 0.0);
}

#[test]
fn test_dashboard_compute() {
    let dashboard = Dashboard::compute(&sample_charging(), &sample_parking(), TimeWindow::Month, as_of());

    assert_eq!(dashboard.total_days, 288);
    assert_close(dashboard.electricity_per_100km, 7.5);
    assert_close(dashboard.charging_fee, 66.0);
    assert_close(dashboard.parking_fee, 12.0);
    assert_eq!(dashboard.full_charge_count, 1);
    assert_close(dashboard.total_electricity, 55.0);
    assert_close(dashboard.cost_per_km, 0.11);
    assert_eq!(dashboard.cost_per_day, "4.11");
    assert_eq!(dashboard.overview.period, CostPeriod::Month);
    assert_eq!(dashboard.consumption_trend.len(), 2);
}

#[test]
fn test_dashboard_serializes() {
    let dashboard = Dashboard::compute(&[], &[], TimeWindow::All, as_of());
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["window"], "all");
    assert_eq!(json["cost_per_day"], "0.00");
    assert_eq!(json["overview"]["period"], "total");
}
