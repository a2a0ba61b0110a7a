//! Two-sheet XLSX workbook reading and writing
//!
//! Exported workbooks carry one sheet per record kind with localized header
//! rows. On import, sheets are matched by name and columns by header text,
//! so column order in a hand-edited workbook does not matter. A missing
//! sheet simply yields no records of that kind.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use super::columns::ColumnMapping;
use super::field_parsers::Cell;
use super::record_parser::{collect_rows, parse_charging_row, parse_parking_row};
use super::stats::ImportResult;
use crate::app::models::{ChargingRecord, ParkingRecord, RecordKind};
use crate::app::services::metrics::consumption_series;
use crate::app::services::temporal::format_date;
use crate::constants::{CHARGING_SHEET, FULL_NO, FULL_YES, PARKING_SHEET, workbook_headers};
use crate::{Error, Result};

// =============================================================================
// Reading
// =============================================================================

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) => Cell::Number(*value),
        Data::String(text) => Cell::from(text.as_str()),
        Data::Bool(flag) => Cell::Bool(*flag),
        Data::DateTime(datetime) => Cell::Number(datetime.as_f64()),
        Data::DateTimeIso(text) => Cell::from(text.as_str()),
        Data::DurationIso(_) | Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Header mapping and data rows of one sheet, blank rows dropped
type SheetRows = (ColumnMapping, Vec<Vec<Cell>>);

fn read_sheet<R>(workbook: &mut R, name: &str) -> Result<Option<SheetRows>>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: std::fmt::Display,
{
    if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
        debug!("Workbook has no '{}' sheet", name);
        return Ok(None);
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| Error::workbook_read(format!("Failed to read sheet '{}': {}", name, e)))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(None);
    };
    let mapping = ColumnMapping::analyze(header_row.iter().map(|data| data.to_string()));

    let data_rows = rows
        .map(|row| row.iter().map(data_to_cell).collect::<Vec<Cell>>())
        .filter(|cells| !cells.iter().all(Cell::is_empty))
        .collect();

    Ok(Some((mapping, data_rows)))
}

/// Parse workbook bytes (`.xlsx` or `.xls`)
pub fn parse_workbook(bytes: Vec<u8>, today: NaiveDate) -> Result<ImportResult> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::workbook_read(format!("Failed to open workbook: {}", e)))?;

    let mut result = ImportResult::default();

    if let Some((mapping, rows)) = read_sheet(&mut workbook, CHARGING_SHEET)? {
        result.charging = collect_rows(rows, RecordKind::Charging, &mut result.stats, |row| {
            parse_charging_row(row, &mapping, today)
        });
    }

    if let Some((mapping, rows)) = read_sheet(&mut workbook, PARKING_SHEET)? {
        result.parking = collect_rows(rows, RecordKind::Parking, &mut result.stats, |row| {
            parse_parking_row(row, &mapping, today)
        });
    }

    Ok(result)
}

// =============================================================================
// Writing
// =============================================================================

fn write_headers(worksheet: &mut Worksheet, headers: &[&str], bold: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, bold)?;
    }
    Ok(())
}

fn write_charging_sheet(
    worksheet: &mut Worksheet,
    records: &[ChargingRecord],
    bold: &Format,
    decimal: &Format,
) -> Result<()> {
    worksheet.set_name(CHARGING_SHEET)?;
    write_headers(worksheet, workbook_headers::CHARGING, bold)?;

    let consumption: HashMap<String, f64> = consumption_series(records)
        .into_iter()
        .map(|point| (point.checkpoint_id, point.per_100km))
        .collect();

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, format_date(record.date))?;
        worksheet.write_number(row, 1, record.mileage)?;
        worksheet.write_number_with_format(row, 2, record.amount, decimal)?;
        worksheet.write_number_with_format(row, 3, record.price, decimal)?;
        worksheet.write_number_with_format(row, 4, record.cost, decimal)?;
        worksheet.write_string(row, 5, if record.is_full { FULL_YES } else { FULL_NO })?;
        if let Some(per_100km) = consumption.get(&record.id) {
            worksheet.write_number_with_format(row, 6, *per_100km, decimal)?;
        }
    }
    Ok(())
}

fn write_parking_sheet(
    worksheet: &mut Worksheet,
    records: &[ParkingRecord],
    bold: &Format,
) -> Result<()> {
    worksheet.set_name(PARKING_SHEET)?;
    write_headers(worksheet, workbook_headers::PARKING, bold)?;

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, format_date(record.date))?;
        worksheet.write_number(row, 1, record.cost)?;
    }
    Ok(())
}

/// Build an XLSX workbook holding both collections
///
/// The charging sheet's consumption column is filled on full-charge rows
/// that close a measurable interval and left blank elsewhere.
pub fn render_workbook(charging: &[ChargingRecord], parking: &[ParkingRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let decimal = Format::new().set_num_format("0.00");

    write_charging_sheet(workbook.add_worksheet(), charging, &bold, &decimal)?;
    write_parking_sheet(workbook.add_worksheet(), parking, &bold)?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::workbook_write("Failed to serialize workbook", e))
}
