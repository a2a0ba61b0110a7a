//! Record interchange for workbook and sectioned CSV files
//!
//! This module converts between the canonical record collections and the two
//! file formats the ledger reads and writes. Import is lenient at the field
//! level and strict at the file level: a malformed cell degrades to a default
//! value, while an unreadable or unsupported file fails the whole import
//! before anything reaches the record store.
//!
//! ## Architecture
//!
//! - [`importer`] - Format detection and the async file import entry point
//! - [`exporter`] - Export with workbook-to-CSV fallback
//! - [`workbook`] - Two-sheet XLSX reading and writing
//! - [`delimited`] - Sectioned CSV reading and writing
//! - [`columns`] - Header analysis and cell lookup by column name
//! - [`record_parser`] - Row to record conversion and row filtering
//! - [`field_parsers`] - Lenient number, date and flag conversion for cells
//! - [`stats`] - Import statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use charge_ledger::app::services::interchange::import_file;
//!
//! # async fn example() -> charge_ledger::Result<()> {
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let result = import_file(std::path::Path::new("车辆费用记录_20240315.csv"), today).await?;
//!
//! println!("Imported {} charging and {} parking records",
//!          result.charging.len(),
//!          result.parking.len());
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod delimited;
pub mod exporter;
pub mod field_parsers;
pub mod importer;
pub mod record_parser;
pub mod stats;
pub mod workbook;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::ColumnMapping;
pub use exporter::{ExportOutcome, export_file_name, export_records};
pub use field_parsers::Cell;
pub use importer::{SourceFormat, import_bytes, import_file};
pub use stats::{ImportResult, ImportStats};
