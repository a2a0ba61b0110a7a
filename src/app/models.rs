//! Data models for the charge ledger
//!
//! This module contains the canonical record types, the closed enumerations
//! that replace string-keyed window and kind names, and the draft types that
//! carry partially-known field values from text entry to the store.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Record Kinds
// =============================================================================

/// The two collections held by the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Charging,
    Parking,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Charging => "charging",
            RecordKind::Parking => "parking",
        }
    }

    /// Generate a fresh identifier for a record of this kind
    ///
    /// Identifiers are never reused, including across imports.
    pub fn new_id(&self) -> String {
        format!("{}_{}", self.as_str(), Uuid::new_v4().simple())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "charging" | "charge" => Ok(RecordKind::Charging),
            "parking" | "park" => Ok(RecordKind::Parking),
            other => Err(Error::validation(format!(
                "Unknown record kind '{}': expected 'charging' or 'parking'",
                other
            ))),
        }
    }
}

// =============================================================================
// Time Windows
// =============================================================================

/// Relative time range evaluated against an "as of" date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    /// Current calendar month
    #[default]
    Month,
    /// Current calendar year
    Year,
    /// Calendar month before the current one (wraps into December of last year)
    LastMonth,
    /// Calendar year before the current one
    LastYear,
    /// No filtering
    All,
}

impl TimeWindow {
    /// Resolve a window name, treating anything unrecognised as `All`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(TimeWindow::All)
    }

    /// The immediately preceding period, for windows that have one
    pub fn previous(&self) -> Option<TimeWindow> {
        match self {
            TimeWindow::Month => Some(TimeWindow::LastMonth),
            TimeWindow::Year => Some(TimeWindow::LastYear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::LastMonth => "lastMonth",
            TimeWindow::LastYear => "lastYear",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "lastmonth" => Ok(TimeWindow::LastMonth),
            "lastyear" => Ok(TimeWindow::LastYear),
            "all" | "total" => Ok(TimeWindow::All),
            other => Err(Error::validation(format!(
                "Unknown time window '{}': expected month, year, last-month, last-year or all",
                other
            ))),
        }
    }
}

/// Period selector for cost-per-day, overview and breakdown views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostPeriod {
    Month,
    Year,
    Total,
}

impl CostPeriod {
    /// Window selecting the records of the current period
    pub fn window(&self) -> TimeWindow {
        match self {
            CostPeriod::Month => TimeWindow::Month,
            CostPeriod::Year => TimeWindow::Year,
            CostPeriod::Total => TimeWindow::All,
        }
    }
}

impl From<TimeWindow> for CostPeriod {
    fn from(window: TimeWindow) -> Self {
        match window {
            TimeWindow::Month | TimeWindow::LastMonth => CostPeriod::Month,
            TimeWindow::Year | TimeWindow::LastYear => CostPeriod::Year,
            TimeWindow::All => CostPeriod::Total,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Common view over both record kinds
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Collection this record type belongs to
    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn date(&self) -> NaiveDate;

    /// Total amount paid for this event
    fn cost(&self) -> f64;
}

/// A single charging event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingRecord {
    pub id: String,

    pub date: NaiveDate,

    /// Odometer reading at the time of charging (not a delta)
    pub mileage: f64,

    /// Energy added, in kWh
    pub amount: f64,

    /// Unit price per kWh
    pub price: f64,

    /// Total paid
    pub cost: f64,

    /// True iff this charge brought the battery to 100%
    #[serde(default)]
    pub is_full: bool,
}

impl Record for ChargingRecord {
    const KIND: RecordKind = RecordKind::Charging;

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn cost(&self) -> f64 {
        self.cost
    }
}

/// A single parking payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingRecord {
    pub id: String,
    pub date: NaiveDate,
    pub cost: f64,
}

impl Record for ParkingRecord {
    const KIND: RecordKind = RecordKind::Parking;

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn cost(&self) -> f64 {
        self.cost
    }
}

// =============================================================================
// Drafts
// =============================================================================

/// Partially-populated charging entry
///
/// `None` means the field was not provided, which is distinct from an
/// explicit zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingDraft {
    pub date: NaiveDate,
    pub mileage: Option<f64>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    /// `Some(false)` only when the entry explicitly says the charge was partial
    pub is_full: Option<bool>,
}

impl ChargingDraft {
    /// Empty draft for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            mileage: None,
            amount: None,
            price: None,
            cost: None,
            is_full: None,
        }
    }

    /// Check the draft can become a stored record
    pub fn validate(&self) -> Result<()> {
        if self.mileage.unwrap_or(0.0) <= 0.0 {
            return Err(Error::validation(
                "Charging record needs a mileage greater than 0",
            ));
        }

        let any_positive = [self.amount, self.price, self.cost]
            .iter()
            .any(|field| field.unwrap_or(0.0) > 0.0);
        if !any_positive {
            return Err(Error::validation(
                "Charging record needs at least one of amount, price or cost greater than 0",
            ));
        }

        Ok(())
    }

    /// Build a record, unset fields becoming zero
    pub fn into_record(self, id: String) -> ChargingRecord {
        ChargingRecord {
            id,
            date: self.date,
            mileage: self.mileage.unwrap_or(0.0),
            amount: self.amount.unwrap_or(0.0),
            price: self.price.unwrap_or(0.0),
            cost: self.cost.unwrap_or(0.0),
            is_full: self.is_full.unwrap_or(false),
        }
    }
}

/// Partially-populated parking entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingDraft {
    pub date: NaiveDate,
    pub cost: Option<f64>,
}

impl ParkingDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, cost: None }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cost.unwrap_or(0.0) <= 0.0 {
            return Err(Error::validation(
                "Parking record needs a cost greater than 0",
            ));
        }
        Ok(())
    }

    pub fn into_record(self, id: String) -> ParkingRecord {
        ParkingRecord {
            id,
            date: self.date,
            cost: self.cost.unwrap_or(0.0),
        }
    }
}
