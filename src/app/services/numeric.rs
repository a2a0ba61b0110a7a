//! Lenient number parsing and rounding
//!
//! Shared by the text parser, the metrics engine and the import codec.
//! Nothing in here fails: text without a number gives `None` or `0`.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d.]+").expect("valid number regex"));

/// Parse the longest leading number in `text`
///
/// Thousands separators are stripped first, so `"1,234.5 km"` gives
/// `1234.5`. Text with no leading number gives `None`.
pub fn leading_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let trimmed = cleaned.trim();
    LEADING_NUMBER
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Parse text as a number, degrading to `0`
pub fn parse_lenient_float(text: &str) -> f64 {
    leading_number(text).unwrap_or(0.0)
}

/// First number appearing anywhere in `text`
pub fn extract_number(text: &str) -> Option<f64> {
    FIRST_NUMBER
        .find(text)
        .and_then(|m| leading_number(m.as_str()))
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12.5"), Some(12.5));
        assert_eq!(leading_number(" 12.5元 "), Some(12.5));
        assert_eq!(leading_number("1,234.5"), Some(1234.5));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("abc"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_parse_lenient_float_defaults_to_zero() {
        assert_eq!(parse_lenient_float("n/a"), 0.0);
        assert_eq!(parse_lenient_float("42"), 42.0);
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("停车 15 块"), Some(15.0));
        assert_eq!(extract_number("paid 2.5 today"), Some(2.5));
        assert_eq!(extract_number("nothing"), None);
        assert_eq!(extract_number("just ."), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.000000000000002), 10.0);
        assert_eq!(round2(-0.004), 0.0);
        assert_eq!(round2(2.345678), 2.35);
    }
}
