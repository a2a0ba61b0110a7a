//! Free-text entry parsing
//!
//! Turns a single line such as `2024-03-05 充电 25度 单价1.2 30元 里程12345km`
//! into a draft with whichever fields could be recognised. Patterns are unit
//! suffixes and are tried in a fixed order; a field whose pattern does not
//! match stays `None` so callers can tell "absent" from "zero".
//!
//! A full charge is never inferred from text. The only flag this parser sets
//! is an explicit "not full".

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::models::{ChargingDraft, ParkingDraft};
use crate::app::services::numeric::{extract_number, parse_lenient_float, round2};
use crate::app::services::temporal::extract_date;
use crate::constants::NOT_FULL_PHRASES;

static DISTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:km|公里|千米)").expect("valid distance regex")
});

static ENERGY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:度|kwh)").expect("valid energy regex")
});

static UNIT_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:元/度|元每度|元每千瓦时)").expect("valid price regex")
});

static UNIT_PRICE_LABELLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)单价\s*(\d+(?:\.\d+)?)").expect("valid price regex"));

static TOTAL_COST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:元|费用)").expect("valid cost regex")
});

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .map(|caps| parse_lenient_float(&caps[1]))
}

/// Parse a charging entry line
pub fn parse_charging_text(text: &str, today: NaiveDate) -> ChargingDraft {
    let mut draft = ChargingDraft::new(extract_date(text, today));

    draft.mileage = capture_number(&DISTANCE, text);
    draft.amount = capture_number(&ENERGY, text);
    draft.price =
        capture_number(&UNIT_PRICE, text).or_else(|| capture_number(&UNIT_PRICE_LABELLED, text));
    draft.cost = capture_number(&TOTAL_COST, text);

    if NOT_FULL_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        draft.is_full = Some(false);
    }

    debug!("Parsed charging text {:?} -> {:?}", text, draft);
    draft
}

/// Parse a parking entry line
///
/// When no cost-suffixed number is present, the first number anywhere in the
/// text is used instead. A fallback value of zero is treated as absent.
pub fn parse_parking_text(text: &str, today: NaiveDate) -> ParkingDraft {
    let mut draft = ParkingDraft::new(extract_date(text, today));

    draft.cost = capture_number(&TOTAL_COST, text)
        .or_else(|| extract_number(text).filter(|value| *value != 0.0));

    debug!("Parsed parking text {:?} -> {:?}", text, draft);
    draft
}

/// Derive the one missing value among amount, unit price and total cost
///
/// Only acts when exactly one of the three is absent. Division by zero
/// yields `0`. Results are rounded to two decimals.
pub fn complete_charge_costs(draft: &mut ChargingDraft) {
    match (draft.amount, draft.price, draft.cost) {
        (Some(amount), Some(price), None) => {
            draft.cost = Some(round2(amount * price));
        }
        (Some(amount), None, Some(cost)) => {
            draft.price = Some(if amount != 0.0 { round2(cost / amount) } else { 0.0 });
        }
        (None, Some(price), Some(cost)) => {
            draft.amount = Some(if price != 0.0 { round2(cost / price) } else { 0.0 });
        }
        _ => {}
    }
}
