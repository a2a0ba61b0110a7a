//! Application constants for the charge ledger
//!
//! Sheet names, localized column headers, CSV section markers and the
//! phrase tables used by the text parser. Everything that appears verbatim
//! in an exported file lives here so import and export cannot drift apart.

// =============================================================================
// Workbook Layout
// =============================================================================

/// Sheet holding charging records (also the CSV section title)
pub const CHARGING_SHEET: &str = "充电记录";

/// Sheet holding parking records (also the CSV section title)
pub const PARKING_SHEET: &str = "停车记录";

/// Workbook column headers
pub mod workbook_headers {
    pub const DATE: &str = "日期";
    pub const MILEAGE: &str = "里程";
    pub const AMOUNT: &str = "充电量";
    pub const PRICE: &str = "电费单价";
    pub const COST: &str = "本次充电总费用";
    pub const IS_FULL: &str = "是否充满";
    pub const CONSUMPTION: &str = "百公里电耗";
    pub const PARKING_COST: &str = "停车费用";

    /// Charging sheet header row, in column order
    pub const CHARGING: &[&str] = &[DATE, MILEAGE, AMOUNT, PRICE, COST, IS_FULL, CONSUMPTION];

    /// Parking sheet header row, in column order
    pub const PARKING: &[&str] = &[DATE, PARKING_COST];
}

// =============================================================================
// Delimited Text Layout
// =============================================================================

/// First line of an exported CSV document
pub const CSV_DOCUMENT_TITLE: &str = "车辆费用记录";

/// Byte-order marker written ahead of the CSV document
pub const CSV_BOM: char = '\u{feff}';

/// Field delimiter for the CSV fallback (no quoting, no escaping)
pub const CSV_DELIMITER: u8 = b',';

/// CSV charging header row
pub const CSV_CHARGING_HEADERS: &[&str] = &[
    "日期",
    "里程(公里)",
    "充电量(度)",
    "电费单价(元/度)",
    "本次充电费用(元)",
    "是否充满",
];

/// CSV parking header row
pub const CSV_PARKING_HEADERS: &[&str] = &["日期", "停车费用(元)"];

/// Minimum columns for a charging data line to be accepted
pub const CHARGING_MIN_COLUMNS: usize = 6;

/// Minimum columns for a parking data line to be accepted
pub const PARKING_MIN_COLUMNS: usize = 2;

/// Cell text for a full charge
pub const FULL_YES: &str = "是";

/// Cell text for a partial charge
pub const FULL_NO: &str = "否";

// =============================================================================
// File Handling
// =============================================================================

/// Extensions read as workbooks
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Extensions read as sectioned CSV
pub const DELIMITED_EXTENSIONS: &[&str] = &["csv"];

/// Stem of exported file names, followed by `_YYYYMMDD`
pub const EXPORT_FILE_STEM: &str = "车辆费用记录";

// =============================================================================
// Dates
// =============================================================================

/// Spreadsheet serial day zero (1899-12-30)
pub const SPREADSHEET_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Canonical date format used for storage and normalization
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Text Parsing
// =============================================================================

/// Phrases that mark a charge as not full
pub const NOT_FULL_PHRASES: &[&str] = &["未充满", "没充满", "不满"];

/// Number of consumption points shown in the trend view
pub const CONSUMPTION_TREND_POINTS: usize = 7;

// =============================================================================
// Logging
// =============================================================================

/// Default log level for the binary
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the store path
pub const ENV_STORE_PATH: &str = "CHARGE_LEDGER_STORE";

/// Environment variable overriding the export directory
pub const ENV_EXPORT_DIR: &str = "CHARGE_LEDGER_EXPORT_DIR";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "CHARGE_LEDGER_LOG";
