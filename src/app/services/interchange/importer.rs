//! Import entry point and format detection
//!
//! The format is decided by file extension alone. An unsupported extension
//! is rejected before the file is opened; reading the file is the only
//! suspend point in the whole import path.

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use super::delimited::parse_delimited;
use super::stats::ImportResult;
use super::workbook::parse_workbook;
use crate::constants::{CSV_BOM, DELIMITED_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::{Error, Result};

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Delimited,
}

impl SourceFormat {
    /// Detect the format from a path's extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Workbook)
        } else if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Delimited)
        } else {
            Err(Error::unsupported_format(path.display().to_string()))
        }
    }
}

/// Parse already-read file content
///
/// Delimited content is decoded as UTF-8, replacing invalid sequences, and a
/// leading byte-order marker is ignored.
pub fn import_bytes(bytes: Vec<u8>, format: SourceFormat, today: NaiveDate) -> Result<ImportResult> {
    match format {
        SourceFormat::Workbook => parse_workbook(bytes, today),
        SourceFormat::Delimited => {
            let text = String::from_utf8_lossy(&bytes);
            parse_delimited(text.trim_start_matches(CSV_BOM), today)
        }
    }
}

/// Read and parse an import file
///
/// Unrecognisable dates inside the file resolve to `today`.
pub async fn import_file(path: &Path, today: NaiveDate) -> Result<ImportResult> {
    let format = SourceFormat::from_path(path)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::file_read(path.display().to_string(), e))?;

    let result = import_bytes(bytes, format, today)?;
    info!(
        "Imported {} charging and {} parking records from {} ({} rows skipped)",
        result.charging.len(),
        result.parking.len(),
        path.display(),
        result.stats.rows_skipped
    );
    Ok(result)
}
