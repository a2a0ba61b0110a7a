//! Tests for cost per kilometre and cost per day

use super::super::cost::{cost_per_day, cost_per_km};
use super::{as_of, assert_close, charge, park, sample_charging, sample_parking};
use crate::app::models::{CostPeriod, TimeWindow};

#[test]
fn test_cost_per_km_month_uses_last_month_reference() {
    // 66 over (6600 - 6000)
    assert_close(cost_per_km(&sample_charging(), TimeWindow::Month, as_of()), 0.11);
}

#[test]
fn test_cost_per_km_year_uses_last_year_reference() {
    // 132 over (6600 - 5000) = 0.0825
    assert_close(cost_per_km(&sample_charging(), TimeWindow::Year, as_of()), 0.08);
}

#[test]
fn test_cost_per_km_other_windows_use_global_minimum() {
    // 216 over (6600 - 4000)
    assert_close(cost_per_km(&sample_charging(), TimeWindow::All, as_of()), 0.08);
    // 66 over (6600 - 4000), even though last month has a previous period
    assert_close(cost_per_km(&sample_charging(), TimeWindow::LastMonth, as_of()), 0.03);
}

#[test]
fn test_cost_per_km_month_without_previous_period() {
    let charging = vec![
        charge("2023-10-01", 1000.0, 10.0, 10.0, false),
        charge("2024-03-01", 1500.0, 10.0, 25.0, false),
        charge("2024-03-09", 2000.0, 10.0, 25.0, false),
    ];
    // 50 over (2000 - 1000)
    assert_close(cost_per_km(&charging, TimeWindow::Month, as_of()), 0.05);
}

#[test]
fn test_cost_per_km_degenerate_inputs() {
    assert_eq!(cost_per_km(&[], TimeWindow::All, as_of()), 0.0);

    let outside = vec![charge("2023-01-01", 1000.0, 10.0, 10.0, false)];
    assert_eq!(cost_per_km(&outside, TimeWindow::Month, as_of()), 0.0);

    let flat = vec![
        charge("2024-03-01", 1000.0, 10.0, 10.0, false),
        charge("2024-03-02", 1000.0, 10.0, 10.0, false),
    ];
    assert_eq!(cost_per_km(&flat, TimeWindow::Month, as_of()), 0.0);
}

#[test]
fn test_cost_per_day_month() {
    // (66 + 12) over Feb 20 -> Mar 10
    assert_eq!(
        cost_per_day(&sample_charging(), &sample_parking(), CostPeriod::Month, as_of()),
        "4.11"
    );
}

#[test]
fn test_cost_per_day_year() {
    // (132 + 22) over 2023-11-11 -> 2024-03-10
    assert_eq!(
        cost_per_day(&sample_charging(), &sample_parking(), CostPeriod::Year, as_of()),
        "1.28"
    );
}

#[test]
fn test_cost_per_day_total() {
    // (216 + 42) over 2023-06-01 -> 2024-03-10
    assert_eq!(
        cost_per_day(&sample_charging(), &sample_parking(), CostPeriod::Total, as_of()),
        "0.91"
    );
}

#[test]
fn test_cost_per_day_without_previous_period_uses_one_day() {
    let charging = vec![charge("2024-03-05", 1000.0, 10.0, 15.0, false)];
    let parking = vec![park("2024-03-06", 5.0)];
    assert_eq!(
        cost_per_day(&charging, &parking, CostPeriod::Month, as_of()),
        "20.00"
    );
}

#[test]
fn test_cost_per_day_zero_days() {
    assert_eq!(cost_per_day(&[], &[], CostPeriod::Month, as_of()), "0.00");

    // parking alone never establishes a day count
    let parking = vec![park("2024-03-06", 5.0)];
    assert_eq!(cost_per_day(&[], &parking, CostPeriod::Month, as_of()), "0.00");

    // no charging in the current month
    let charging = vec![charge("2024-02-05", 1000.0, 10.0, 15.0, false)];
    assert_eq!(cost_per_day(&charging, &[], CostPeriod::Month, as_of()), "0.00");

    // a single record spans zero days
    assert_eq!(cost_per_day(&charging, &[], CostPeriod::Total, as_of()), "0.00");
}
