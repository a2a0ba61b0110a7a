//! JSON document store
//!
//! The whole ledger is one pretty-printed JSON document. Every change writes
//! a complete new document to a temporary file in the same directory and
//! renames it over the old one, so a crash mid-write leaves the previous
//! document intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{LedgerDocument, RecordStore, StoredRecord};
use crate::{Error, Result};

/// Durable store backed by a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: LedgerDocument,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty ledger; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::file_read(path.display().to_string(), e))?;
            serde_json::from_str(&content).map_err(|e| {
                Error::serialization(format!("Invalid ledger document {}", path.display()), e)
            })?
        } else {
            debug!("No ledger at {}, starting empty", path.display());
            LedgerDocument::default()
        };

        info!(
            "Opened ledger {} ({} charging, {} parking)",
            path.display(),
            document.charging.len(),
            document.parking.len()
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &LedgerDocument) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| {
            Error::io(format!("Failed to create directory {}", parent.display()), e)
        })?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|e| {
            Error::io(format!("Failed to create temp file in {}", parent.display()), e)
        })?;
        serde_json::to_writer_pretty(&mut temp, document)
            .map_err(|e| Error::serialization("Failed to encode ledger document", e))?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| {
            Error::io(format!("Failed to replace {}", self.path.display()), e.error)
        })?;

        debug!("Wrote ledger {}", self.path.display());
        Ok(())
    }

    /// Persist a modified copy, adopting it only once the write succeeded
    fn commit(&mut self, document: LedgerDocument) -> Result<()> {
        self.persist(&document)?;
        self.document = document;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get<R: StoredRecord>(&self) -> Vec<R> {
        R::collection(&self.document).to_vec()
    }

    fn set<R: StoredRecord>(&mut self, records: Vec<R>) -> Result<()> {
        let mut document = self.document.clone();
        *R::collection_mut(&mut document) = records;
        self.commit(document)
    }

    fn last_export(&self) -> Option<NaiveDate> {
        self.document.last_export
    }

    fn set_last_export(&mut self, date: NaiveDate) -> Result<()> {
        let mut document = self.document.clone();
        document.last_export = Some(date);
        self.commit(document)
    }
}
