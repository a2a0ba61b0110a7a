//! CRUD facade over a record store
//!
//! [`RecordBook`] is the only place records are created, edited or removed.
//! Drafts are validated before anything is written, new records always get
//! a freshly generated id, and an import replaces whole collections rather
//! than merging into them.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{RecordStore, StoredRecord};
use crate::Result;
use crate::app::models::{
    ChargingDraft, ChargingRecord, ParkingDraft, ParkingRecord, RecordKind, TimeWindow,
};
use crate::app::services::interchange::ImportResult;
use crate::app::services::metrics::Dashboard;
use crate::app::services::temporal::days_between;

/// Record collections with validated mutation
#[derive(Debug)]
pub struct RecordBook<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> RecordBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn charging(&self) -> Vec<ChargingRecord> {
        self.store.get()
    }

    pub fn parking(&self) -> Vec<ParkingRecord> {
        self.store.get()
    }

    pub fn is_empty(&self) -> bool {
        self.charging().is_empty() && self.parking().is_empty()
    }

    // =========================================================================
    // Create / update / delete
    // =========================================================================

    /// Validate a draft and store it under a fresh id
    pub fn add_charging(&mut self, draft: ChargingDraft) -> Result<ChargingRecord> {
        draft.validate()?;
        let record = draft.into_record(RecordKind::Charging.new_id());

        let mut records = self.charging();
        records.push(record.clone());
        self.store.set(records)?;

        info!("Added charging record {}", record.id);
        Ok(record)
    }

    /// Validate a draft and store it under a fresh id
    pub fn add_parking(&mut self, draft: ParkingDraft) -> Result<ParkingRecord> {
        draft.validate()?;
        let record = draft.into_record(RecordKind::Parking.new_id());

        let mut records = self.parking();
        records.push(record.clone());
        self.store.set(records)?;

        info!("Added parking record {}", record.id);
        Ok(record)
    }

    /// Replace the fields of the charging record with `id`
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub fn update_charging(&mut self, id: &str, draft: ChargingDraft) -> Result<bool> {
        draft.validate()?;
        let mut records = self.charging();
        let Some(existing) = records.iter_mut().find(|record| record.id == id) else {
            debug!("No charging record {} to update", id);
            return Ok(false);
        };
        *existing = draft.into_record(id.to_string());
        self.store.set(records)?;
        Ok(true)
    }

    /// Replace the fields of the parking record with `id`
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub fn update_parking(&mut self, id: &str, draft: ParkingDraft) -> Result<bool> {
        draft.validate()?;
        let mut records = self.parking();
        let Some(existing) = records.iter_mut().find(|record| record.id == id) else {
            debug!("No parking record {} to update", id);
            return Ok(false);
        };
        *existing = draft.into_record(id.to_string());
        self.store.set(records)?;
        Ok(true)
    }

    /// Remove a record by id; an unknown id leaves the collection untouched
    pub fn delete(&mut self, kind: RecordKind, id: &str) -> Result<bool> {
        match kind {
            RecordKind::Charging => self.remove::<ChargingRecord>(id),
            RecordKind::Parking => self.remove::<ParkingRecord>(id),
        }
    }

    fn remove<R: StoredRecord>(&mut self, id: &str) -> Result<bool> {
        let mut records: Vec<R> = self.store.get();
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before {
            debug!("No {} record {} to delete", R::KIND, id);
            return Ok(false);
        }

        self.store.set(records)?;
        info!("Deleted {} record {}", R::KIND, id);
        Ok(true)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.set(Vec::<ChargingRecord>::new())?;
        self.store.set(Vec::<ParkingRecord>::new())?;
        info!("Cleared all records");
        Ok(())
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Replace every collection the import produced rows for
    ///
    /// A kind with no valid rows keeps its existing records. Returns the
    /// kinds that were replaced.
    pub fn apply_import(&mut self, result: ImportResult) -> Result<Vec<RecordKind>> {
        let kinds = result.kinds();

        if !result.charging.is_empty() {
            info!("Replacing charging records with {} imported", result.charging.len());
            self.store.set(result.charging)?;
        }
        if !result.parking.is_empty() {
            info!("Replacing parking records with {} imported", result.parking.len());
            self.store.set(result.parking)?;
        }

        Ok(kinds)
    }

    pub fn mark_exported(&mut self, date: NaiveDate) -> Result<()> {
        self.store.set_last_export(date)
    }

    /// Days since the last export, if there ever was one
    pub fn days_since_export(&self, as_of: NaiveDate) -> Option<i64> {
        self.store
            .last_export()
            .map(|exported| days_between(exported, as_of))
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    pub fn dashboard(&self, window: TimeWindow, as_of: NaiveDate) -> Dashboard {
        Dashboard::compute(&self.charging(), &self.parking(), window, as_of)
    }
}
