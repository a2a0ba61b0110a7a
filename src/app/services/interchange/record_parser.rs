//! Row to record conversion for both import formats
//!
//! A row only becomes a record when it has a date cell and its key value is
//! positive (mileage for charging, cost for parking). Every accepted row gets
//! a freshly generated id; ids in the source file are never reused.

use chrono::NaiveDate;
use tracing::debug;

use super::columns::ColumnMapping;
use super::field_parsers::{Cell, cell_to_date_input, cell_to_float, cell_to_full_flag};
use super::stats::ImportStats;
use crate::app::models::{ChargingRecord, ParkingRecord, RecordKind};
use crate::app::services::temporal::{DateInput, normalize_date};
use crate::constants::workbook_headers::{
    AMOUNT, COST, DATE, IS_FULL, MILEAGE, PARKING_COST, PRICE,
};
use crate::{Error, Result};

fn required_date(row: &[Cell], mapping: &ColumnMapping, kind: RecordKind) -> Result<DateInput> {
    let input = cell_to_date_input(mapping.cell(row, DATE));
    if input.is_empty() {
        return Err(Error::validation(format!("{} row has no date", kind)));
    }
    Ok(input)
}

/// Parse a single charging row
pub fn parse_charging_row(
    row: &[Cell],
    mapping: &ColumnMapping,
    today: NaiveDate,
) -> Result<ChargingRecord> {
    let date = required_date(row, mapping, RecordKind::Charging)?;
    let mileage = cell_to_float(mapping.cell(row, MILEAGE));
    if mileage <= 0.0 {
        return Err(Error::validation(format!(
            "charging row has mileage {} (must be greater than 0)",
            mileage
        )));
    }

    Ok(ChargingRecord {
        id: RecordKind::Charging.new_id(),
        date: normalize_date(&date, today),
        mileage,
        amount: cell_to_float(mapping.cell(row, AMOUNT)),
        price: cell_to_float(mapping.cell(row, PRICE)),
        cost: cell_to_float(mapping.cell(row, COST)),
        is_full: cell_to_full_flag(mapping.cell(row, IS_FULL)),
    })
}

/// Parse a single parking row
pub fn parse_parking_row(
    row: &[Cell],
    mapping: &ColumnMapping,
    today: NaiveDate,
) -> Result<ParkingRecord> {
    let date = required_date(row, mapping, RecordKind::Parking)?;
    let cost = cell_to_float(mapping.cell(row, PARKING_COST));
    if cost <= 0.0 {
        return Err(Error::validation(format!(
            "parking row has cost {} (must be greater than 0)",
            cost
        )));
    }

    Ok(ParkingRecord {
        id: RecordKind::Parking.new_id(),
        date: normalize_date(&date, today),
        cost,
    })
}

/// Parse every row of one kind, dropping and counting rejected rows
pub(crate) fn collect_rows<T, F>(
    rows: impl IntoIterator<Item = Vec<Cell>>,
    kind: RecordKind,
    stats: &mut ImportStats,
    mut parse: F,
) -> Vec<T>
where
    F: FnMut(&[Cell]) -> Result<T>,
{
    let mut records = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        match parse(&row) {
            Ok(record) => {
                stats.record_imported(kind);
                records.push(record);
            }
            Err(e) => {
                debug!("Skipping {} row {}: {}", kind, index + 1, e);
                stats.record_skipped(&e);
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::workbook_headers;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn charging_mapping() -> ColumnMapping {
        ColumnMapping::positional(workbook_headers::CHARGING)
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|cell| Cell::from(*cell)).collect()
    }

    #[test]
    fn test_parse_charging_row() {
        let cells = row(&["2024年3月5日", "6,300", "25.00", "1.20", "30.00", "是"]);
        let record = parse_charging_row(&cells, &charging_mapping(), today()).unwrap();

        assert!(record.id.starts_with("charging_"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(record.mileage, 6300.0);
        assert_eq!(record.amount, 25.0);
        assert_eq!(record.price, 1.2);
        assert_eq!(record.cost, 30.0);
        assert!(record.is_full);
    }

    #[test]
    fn test_serial_date_cell() {
        let mut cells = row(&["", "100", "10", "1", "10", "否"]);
        cells[0] = Cell::Number(45356.0);
        let record = parse_charging_row(&cells, &charging_mapping(), today()).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(!record.is_full);
    }

    #[test]
    fn test_rejects_missing_date_and_zero_mileage() {
        let no_date = row(&["", "100", "10", "1", "10", "否"]);
        assert!(parse_charging_row(&no_date, &charging_mapping(), today()).is_err());

        let zero_mileage = row(&["2024-03-05", "0", "10", "1", "10", "否"]);
        assert!(parse_charging_row(&zero_mileage, &charging_mapping(), today()).is_err());
    }

    #[test]
    fn test_unrecognised_date_degrades_to_today() {
        let cells = row(&["last tuesday", "100", "10", "1", "10", "否"]);
        let record = parse_charging_row(&cells, &charging_mapping(), today()).unwrap();
        assert_eq!(record.date, today());
    }

    #[test]
    fn test_parse_parking_row() {
        let mapping = ColumnMapping::positional(workbook_headers::PARKING);

        let record = parse_parking_row(&row(&["2024/3/3", "5"]), &mapping, today()).unwrap();
        assert!(record.id.starts_with("parking_"));
        assert_eq!(record.cost, 5.0);

        assert!(parse_parking_row(&row(&["2024/3/3", "free"]), &mapping, today()).is_err());
    }

    #[test]
    fn test_collect_rows_counts_skips() {
        let mapping = ColumnMapping::positional(workbook_headers::PARKING);
        let rows = vec![row(&["2024-03-01", "5"]), row(&["2024-03-02", "0"])];
        let mut stats = ImportStats::new();

        let records = collect_rows(rows, RecordKind::Parking, &mut stats, |cells| {
            parse_parking_row(cells, &mapping, today())
        });

        assert_eq!(records.len(), 1);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.parking_imported, 1);
        assert_eq!(stats.rows_skipped, 1);
        assert_eq!(stats.errors.len(), 1);
    }

    #[test]
    fn test_fresh_ids_per_row() {
        let cells = row(&["2024-03-05", "100", "10", "1", "10", "否"]);
        let first = parse_charging_row(&cells, &charging_mapping(), today()).unwrap();
        let second = parse_charging_row(&cells, &charging_mapping(), today()).unwrap();
        assert_ne!(first.id, second.id);
    }
}
