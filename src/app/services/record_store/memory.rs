//! In-process record store

use chrono::NaiveDate;

use super::{LedgerDocument, RecordStore, StoredRecord};
use crate::Result;

/// Store that lives only as long as the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: LedgerDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get<R: StoredRecord>(&self) -> Vec<R> {
        R::collection(&self.document).to_vec()
    }

    fn set<R: StoredRecord>(&mut self, records: Vec<R>) -> Result<()> {
        *R::collection_mut(&mut self.document) = records;
        Ok(())
    }

    fn last_export(&self) -> Option<NaiveDate> {
        self.document.last_export
    }

    fn set_last_export(&mut self, date: NaiveDate) -> Result<()> {
        self.document.last_export = Some(date);
        Ok(())
    }
}
