//! Charge Ledger Library
//!
//! A Rust library for tracking vehicle charging and parking expenses and
//! deriving summary metrics from them.
//!
//! This library provides tools for:
//! - Classifying dates against relative time windows (this month, last year, ...)
//! - Extracting structured fields from free-form entry text
//! - Computing consumption per 100 km between full-charge checkpoints
//! - Computing fee totals, cost per kilometre and cost per day
//! - Importing and exporting records as XLSX workbooks or sectioned CSV
//! - Persisting records to a local JSON document

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod interchange;
        pub mod metrics;
        pub mod numeric;
        pub mod record_store;
        pub mod temporal;
        pub mod text_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ChargingRecord, CostPeriod, ParkingRecord, Record, RecordKind, TimeWindow};
pub use config::LedgerConfig;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ledger operations
///
/// Field-level parse problems never show up here: malformed numbers and dates
/// degrade to defaults inside the parsers. Only file-level and storage-level
/// failures are surfaced.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Import source has an extension we cannot read
    #[error("Unsupported file format: {path} (expected .xlsx, .xls or .csv)")]
    UnsupportedFileFormat { path: String },

    /// Import source could not be read
    #[error("Failed to read file '{path}'")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Workbook bytes could not be opened as a spreadsheet
    #[error("Workbook parsing error: {message}")]
    WorkbookRead { message: String },

    /// Workbook could not be produced
    #[error("Workbook writing error: {message}")]
    WorkbookWrite {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Delimited text could not be read or written
    #[error("CSV error: {message}")]
    CsvFormat {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Store document could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record failed validation before being stored
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Neither export format could be written
    #[error("Export error: {message}")]
    Export { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported file format error
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self::UnsupportedFileFormat { path: path.into() }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a workbook read error
    pub fn workbook_read(message: impl Into<String>) -> Self {
        Self::WorkbookRead {
            message: message.into(),
        }
    }

    /// Create a workbook write error
    pub fn workbook_write(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWrite {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_format(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvFormat {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvFormat {
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWrite {
            message: "Workbook generation failed".to_string(),
            source: error,
        }
    }
}
