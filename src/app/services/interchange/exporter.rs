//! Export with workbook-to-CSV fallback
//!
//! Export never returns an error. The workbook is attempted first (unless
//! disabled); any failure there falls back to the sectioned CSV document,
//! and only a failure of both is reported as [`ExportOutcome::Failed`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, warn};

use super::delimited::render_delimited;
use super::workbook::render_workbook;
use crate::Result;
use crate::app::models::{ChargingRecord, ParkingRecord};
use crate::constants::EXPORT_FILE_STEM;

/// What an export attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Workbook written to this path
    Workbook(PathBuf),
    /// CSV written to this path, either by request or after a workbook failure
    Delimited(PathBuf),
    /// Both collections were empty; no file was written
    NothingToExport,
    /// Every format failed
    Failed(String),
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Workbook(_) | ExportOutcome::Delimited(_))
    }

    /// Path of the written file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Workbook(path) | ExportOutcome::Delimited(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

/// `车辆费用记录_YYYYMMDD.<extension>`
pub fn export_file_name(today: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", EXPORT_FILE_STEM, today.format("%Y%m%d"), extension)
}

async fn write_workbook(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    path: &Path,
) -> Result<()> {
    let bytes = render_workbook(charging, parking)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

async fn write_delimited(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    path: &Path,
) -> Result<()> {
    let document = render_delimited(charging, parking)?;
    tokio::fs::write(path, document.into_bytes()).await?;
    Ok(())
}

/// Export both collections into `dir`
///
/// With `prefer_workbook` an XLSX file is tried first; otherwise, or when the
/// workbook cannot be produced, a CSV file is written.
pub async fn export_records(
    charging: &[ChargingRecord],
    parking: &[ParkingRecord],
    dir: &Path,
    today: NaiveDate,
    prefer_workbook: bool,
) -> ExportOutcome {
    if charging.is_empty() && parking.is_empty() {
        info!("Nothing to export");
        return ExportOutcome::NothingToExport;
    }

    if prefer_workbook {
        let path = dir.join(export_file_name(today, "xlsx"));
        match write_workbook(charging, parking, &path).await {
            Ok(()) => {
                info!(
                    "Exported {} charging and {} parking records to {}",
                    charging.len(),
                    parking.len(),
                    path.display()
                );
                return ExportOutcome::Workbook(path);
            }
            Err(e) => warn!("Workbook export failed, falling back to CSV: {}", e),
        }
    }

    let path = dir.join(export_file_name(today, "csv"));
    match write_delimited(charging, parking, &path).await {
        Ok(()) => {
            info!(
                "Exported {} charging and {} parking records to {}",
                charging.len(),
                parking.len(),
                path.display()
            );
            ExportOutcome::Delimited(path)
        }
        Err(e) => {
            error!("CSV export failed: {}", e);
            ExportOutcome::Failed(e.to_string())
        }
    }
}
