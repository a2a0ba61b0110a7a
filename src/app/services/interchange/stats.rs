//! Import statistics and result structures
//!
//! An [`ImportResult`] is the complete outcome of parsing one file. It is
//! built in full before the record store is touched, so a file that fails to
//! parse never leaves the store half-replaced.

use crate::Error;
use crate::app::models::{ChargingRecord, ParkingRecord, RecordKind};

/// Parsed records with basic statistics
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub charging: Vec<ChargingRecord>,
    pub parking: Vec<ParkingRecord>,
    pub stats: ImportStats,
}

impl ImportResult {
    /// True when neither kind produced a valid row
    pub fn is_empty(&self) -> bool {
        self.charging.is_empty() && self.parking.is_empty()
    }

    /// Kinds that produced at least one valid row
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds = Vec::new();
        if !self.charging.is_empty() {
            kinds.push(RecordKind::Charging);
        }
        if !self.parking.is_empty() {
            kinds.push(RecordKind::Parking);
        }
        kinds
    }
}

/// Simple import statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportStats {
    /// Data rows encountered across both kinds
    pub total_rows: usize,

    pub charging_imported: usize,

    pub parking_imported: usize,

    /// Rows dropped by the import filter
    pub rows_skipped: usize,

    /// Why each skipped row was dropped
    pub errors: Vec<String>,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_imported(&mut self, kind: RecordKind) {
        self.total_rows += 1;
        match kind {
            RecordKind::Charging => self.charging_imported += 1,
            RecordKind::Parking => self.parking_imported += 1,
        }
    }

    pub fn record_skipped(&mut self, error: &Error) {
        self.total_rows += 1;
        self.rows_skipped += 1;
        self.errors.push(error.to_string());
    }
}
