//! Record persistence
//!
//! The store exclusively owns both record collections. Callers read a
//! snapshot with [`RecordStore::get`] and replace a whole collection with
//! [`RecordStore::set`]; there is no partial update at this level.
//!
//! ## Components
//!
//! - [`memory`] - In-process store for tests and embedding
//! - [`json_file`] - Durable store backed by a single JSON document
//! - [`book`] - CRUD facade with validation, id assignment and import replace

pub mod book;
pub mod json_file;
pub mod memory;

pub use book::RecordBook;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::app::models::{ChargingRecord, ParkingRecord, Record};

/// Everything the ledger persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub charging: Vec<ChargingRecord>,

    #[serde(default)]
    pub parking: Vec<ParkingRecord>,

    /// Date of the last successful export
    #[serde(default)]
    pub last_export: Option<NaiveDate>,
}

/// A record type with a collection slot in [`LedgerDocument`]
pub trait StoredRecord: Record {
    fn collection(document: &LedgerDocument) -> &[Self];

    fn collection_mut(document: &mut LedgerDocument) -> &mut Vec<Self>;
}

impl StoredRecord for ChargingRecord {
    fn collection(document: &LedgerDocument) -> &[Self] {
        &document.charging
    }

    fn collection_mut(document: &mut LedgerDocument) -> &mut Vec<Self> {
        &mut document.charging
    }
}

impl StoredRecord for ParkingRecord {
    fn collection(document: &LedgerDocument) -> &[Self] {
        &document.parking
    }

    fn collection_mut(document: &mut LedgerDocument) -> &mut Vec<Self> {
        &mut document.parking
    }
}

/// Storage contract for the two record collections
pub trait RecordStore {
    /// Snapshot of one collection
    fn get<R: StoredRecord>(&self) -> Vec<R>;

    /// Replace one collection wholesale
    ///
    /// On error the previous contents are kept.
    fn set<R: StoredRecord>(&mut self, records: Vec<R>) -> Result<()>;

    fn last_export(&self) -> Option<NaiveDate>;

    fn set_last_export(&mut self, date: NaiveDate) -> Result<()>;
}
