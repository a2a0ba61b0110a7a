//! Test utilities for the interchange codec

use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::app::models::{ChargingRecord, ParkingRecord};

mod importer_tests;
mod workbook_tests;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Reference date for every import in these tests
pub fn today() -> NaiveDate {
    day(2024, 3, 15)
}

pub fn sample_charging() -> Vec<ChargingRecord> {
    vec![
        ChargingRecord {
            id: "charging_a".to_string(),
            date: day(2024, 2, 5),
            mileage: 5600.0,
            amount: 35.0,
            price: 1.2,
            cost: 42.0,
            is_full: true,
        },
        ChargingRecord {
            id: "charging_b".to_string(),
            date: day(2024, 2, 20),
            mileage: 6000.0,
            amount: 20.5,
            price: 1.15,
            cost: 23.58,
            is_full: false,
        },
        ChargingRecord {
            id: "charging_c".to_string(),
            date: day(2024, 3, 10),
            mileage: 6600.0,
            amount: 30.0,
            price: 1.2,
            cost: 36.0,
            is_full: true,
        },
    ]
}

/// Values that do not fit two decimals, as the add command can store them
pub fn fractional_charging() -> Vec<ChargingRecord> {
    vec![ChargingRecord {
        id: "charging_f".to_string(),
        date: day(2024, 3, 8),
        mileage: 12345.6,
        amount: 25.555,
        price: 0.6853,
        cost: 17.51,
        is_full: false,
    }]
}

pub fn sample_parking() -> Vec<ParkingRecord> {
    vec![
        ParkingRecord {
            id: "parking_a".to_string(),
            date: day(2024, 3, 3),
            cost: 5.0,
        },
        ParkingRecord {
            id: "parking_b".to_string(),
            date: day(2024, 3, 12),
            cost: 7.5,
        },
    ]
}

/// Field values of a charging record, id excluded
pub fn charging_values(record: &ChargingRecord) -> (NaiveDate, f64, f64, f64, f64, bool) {
    (
        record.date,
        record.mileage,
        record.amount,
        record.price,
        record.cost,
        record.is_full,
    )
}

/// Write `content` to a file with the given name in a fresh temp dir
pub fn write_temp_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
