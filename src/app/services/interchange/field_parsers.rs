//! Lenient field parsing for imported cells
//!
//! Nothing in here fails: malformed numbers become `0`, malformed dates are
//! handed to the temporal normalizer which falls back to "today". This keeps
//! one bad cell from aborting a whole import.

use chrono::NaiveDate;

use crate::app::services::numeric::parse_lenient_float;
use crate::app::services::temporal::DateInput;
use crate::constants::FULL_YES;

/// A single cell from either import format
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }
}

/// Numeric value of a cell, degrading to `0`
pub fn cell_to_float(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(value) if value.is_finite() => *value,
        Cell::Text(text) => parse_lenient_float(text),
        Cell::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Date representation of a cell, for the temporal normalizer
pub fn cell_to_date_input(cell: &Cell) -> DateInput {
    match cell {
        Cell::Date(date) => DateInput::Date(*date),
        Cell::Number(serial) => DateInput::Serial(*serial),
        Cell::Text(text) if !text.trim().is_empty() => DateInput::Text(text.clone()),
        _ => DateInput::Empty,
    }
}

/// Whether a cell marks a full charge
pub fn cell_to_full_flag(cell: &Cell) -> bool {
    match cell {
        Cell::Text(text) => text.trim() == FULL_YES,
        Cell::Bool(flag) => *flag,
        _ => false,
    }
}
