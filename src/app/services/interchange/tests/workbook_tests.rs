//! Tests for XLSX reading and writing

use super::*;
use crate::app::services::interchange::workbook::{parse_workbook, render_workbook};
use crate::constants::{CHARGING_SHEET, workbook_headers};
use rust_xlsxwriter::Workbook;

#[test]
fn test_round_trip_preserves_values() {
    let charging = sample_charging();
    let parking = sample_parking();
    let bytes = render_workbook(&charging, &parking).unwrap();

    let result = parse_workbook(bytes, today()).unwrap();

    let imported: Vec<_> = result.charging.iter().map(charging_values).collect();
    let original: Vec<_> = charging.iter().map(charging_values).collect();
    assert_eq!(imported, original);

    assert_eq!(result.parking.len(), 2);
    assert_eq!(result.parking[0].cost, 5.0);
    assert_eq!(result.stats.rows_skipped, 0);
}

#[test]
fn test_round_trip_keeps_full_precision() {
    let charging = fractional_charging();
    let bytes = render_workbook(&charging, &[]).unwrap();

    let result = parse_workbook(bytes, today()).unwrap();

    let imported: Vec<_> = result.charging.iter().map(charging_values).collect();
    let original: Vec<_> = charging.iter().map(charging_values).collect();
    assert_eq!(imported, original);
}

#[test]
fn test_missing_sheet_yields_no_records() {
    let bytes = render_workbook(&sample_charging(), &[]).unwrap();
    let result = parse_workbook(bytes, today()).unwrap();

    assert_eq!(result.charging.len(), 3);
    assert!(result.parking.is_empty());
}

#[test]
fn test_columns_matched_by_header() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(CHARGING_SHEET).unwrap();

    // reversed column order, date as a spreadsheet serial
    let headers: Vec<&str> = workbook_headers::CHARGING.iter().rev().copied().collect();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 1, "是").unwrap();
    sheet.write_number(1, 2, 30.0).unwrap();
    sheet.write_number(1, 3, 1.2).unwrap();
    sheet.write_number(1, 4, 25.0).unwrap();
    sheet.write_number(1, 5, 6300.0).unwrap();
    sheet.write_number(1, 6, 45356.0).unwrap();
    // second row has zero mileage
    sheet.write_number(2, 5, 0.0).unwrap();
    sheet.write_string(2, 6, "2024-03-06").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = parse_workbook(bytes, today()).unwrap();

    assert_eq!(result.charging.len(), 1);
    let record = &result.charging[0];
    assert_eq!(record.date, day(2024, 3, 5));
    assert_eq!(record.mileage, 6300.0);
    assert_eq!(record.amount, 25.0);
    assert_eq!(record.price, 1.2);
    assert_eq!(record.cost, 30.0);
    assert!(record.is_full);
    assert_eq!(result.stats.rows_skipped, 1);
}

#[test]
fn test_invalid_bytes_are_rejected() {
    let result = parse_workbook(b"not a workbook".to_vec(), today());
    assert!(matches!(result, Err(crate::Error::WorkbookRead { .. })));
}
