//! Sectioned CSV reading and writing
//!
//! The CSV fallback holds both record kinds in one document:
//!
//! ```text
//! <BOM>车辆费用记录
//!
//! 充电记录
//! 日期,里程(公里),充电量(度),电费单价(元/度),本次充电费用(元),是否充满
//! 2024年3月5日,6300,25,1.2,30,是
//!
//! 停车记录
//! 日期,停车费用(元)
//! 2024年3月3日,5
//! ```
//!
//! A line equal to a section title switches sections and the next non-blank
//! line is taken as that section's header row. Fields are never quoted, so a
//! delimiter inside a value splits it. Numbers are written at full precision.

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use tracing::debug;

use super::columns::ColumnMapping;
use super::field_parsers::Cell;
use super::record_parser::{collect_rows, parse_charging_row, parse_parking_row};
use super::stats::ImportResult;
use crate::app::models::{ChargingRecord, ParkingRecord, RecordKind};
use crate::app::services::temporal::format_date;
use crate::constants::{
    CHARGING_MIN_COLUMNS, CHARGING_SHEET, CSV_BOM, CSV_CHARGING_HEADERS, CSV_DELIMITER,
    CSV_DOCUMENT_TITLE, CSV_PARKING_HEADERS, FULL_NO, FULL_YES, PARKING_MIN_COLUMNS,
    PARKING_SHEET, workbook_headers,
};
use crate::{Error, Result};

// =============================================================================
// Reading
// =============================================================================

/// Lines of one titled section, header row first
#[derive(Debug, Default)]
struct Section {
    lines: Vec<String>,
}

impl Section {
    fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split the document into its charging and parking sections
///
/// Blank lines, the document title and anything before the first section
/// title are dropped.
fn split_sections(text: &str) -> (Section, Section) {
    let mut charging = Section::default();
    let mut parking = Section::default();
    let mut current: Option<RecordKind> = None;

    for line in text.trim_start_matches(CSV_BOM).lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == CSV_DOCUMENT_TITLE {
            continue;
        }
        if trimmed == CHARGING_SHEET {
            current = Some(RecordKind::Charging);
            continue;
        }
        if trimmed == PARKING_SHEET {
            current = Some(RecordKind::Parking);
            continue;
        }

        match current {
            Some(RecordKind::Charging) => charging.lines.push(trimmed.to_string()),
            Some(RecordKind::Parking) => parking.lines.push(trimmed.to_string()),
            None => debug!("Ignoring line outside any section: {}", trimmed),
        }
    }

    (charging, parking)
}

/// Data rows of a section, header skipped and short rows dropped
fn section_rows(section: &Section, min_columns: usize, kind: RecordKind) -> Result<Vec<Vec<Cell>>> {
    let text = section.text();
    let mut reader = ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|e| Error::csv_format(format!("Failed to read {} section", kind), Some(e)))?;
        if record.len() < min_columns {
            debug!(
                "Skipping {} line with {} columns (need {})",
                kind,
                record.len(),
                min_columns
            );
            continue;
        }
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(rows)
}

/// Parse a sectioned CSV document
pub fn parse_delimited(text: &str, today: NaiveDate) -> Result<ImportResult> {
    let (charging_section, parking_section) = split_sections(text);
    let mut result = ImportResult::default();

    let charging_mapping = ColumnMapping::positional(workbook_headers::CHARGING);
    let rows = section_rows(&charging_section, CHARGING_MIN_COLUMNS, RecordKind::Charging)?;
    result.charging = collect_rows(rows, RecordKind::Charging, &mut result.stats, |row| {
        parse_charging_row(row, &charging_mapping, today)
    });

    let parking_mapping = ColumnMapping::positional(workbook_headers::PARKING);
    let rows = section_rows(&parking_section, PARKING_MIN_COLUMNS, RecordKind::Parking)?;
    result.parking = collect_rows(rows, RecordKind::Parking, &mut result.stats, |row| {
        parse_parking_row(row, &parking_mapping, today)
    });

    Ok(result)
}

// =============================================================================
// Writing
// =============================================================================

fn write_section<I, R>(title: &str, headers: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record([title])?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.into_iter().collect::<Vec<String>>())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::csv_format(format!("Failed to flush {} section: {}", title, e), None))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::csv_format(format!("Section {} is not valid UTF-8: {}", title, e), None))
}

fn charging_fields(record: &ChargingRecord) -> Vec<String> {
    vec![
        format_date(record.date),
        record.mileage.to_string(),
        record.amount.to_string(),
        record.price.to_string(),
        record.cost.to_string(),
        if record.is_full { FULL_YES } else { FULL_NO }.to_string(),
    ]
}

fn parking_fields(record: &ParkingRecord) -> Vec<String> {
    vec![format_date(record.date), record.cost.to_string()]
}

/// Render both collections as one sectioned CSV document, BOM included
pub fn render_delimited(charging: &[ChargingRecord], parking: &[ParkingRecord]) -> Result<String> {
    let charging_section = write_section(
        CHARGING_SHEET,
        CSV_CHARGING_HEADERS,
        charging.iter().map(charging_fields),
    )?;
    let parking_section = write_section(
        PARKING_SHEET,
        CSV_PARKING_HEADERS,
        parking.iter().map(parking_fields),
    )?;

    let mut document = String::new();
    document.push(CSV_BOM);
    document.push_str(CSV_DOCUMENT_TITLE);
    document.push_str("\n\n");
    document.push_str(&charging_section);
    document.push('\n');
    document.push_str(&parking_section);
    Ok(document)
}
