//! Numeric score recovery.
//!
//! Two scales coexist: percentage strings from the structured schema
//! (0-100, taken as given) and bare criteria scores from legacy payloads
//! (clamped to 1-10). They are kept as separate paths.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref PERCENT: Regex = Regex::new(r"([0-9]+)\s*%").expect("valid percent regex");
    static ref OUT_OF_HUNDRED: Regex =
        Regex::new(r"([0-9]+)\s*(?:out of|/)\s*100").expect("valid out-of-100 regex");
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("valid leading number regex");
}

pub const LEGACY_SCORE_MIN: f64 = 1.0;
pub const LEGACY_SCORE_MAX: f64 = 10.0;

/// Score from a string such as `"85%"`, `"85 out of 100"` or `"85/100"`.
///
/// Tries, in order: digits before `%`, digits before `out of 100` / `/100`,
/// then a leading number. `None` when nothing numeric is found.
pub fn extract_percentage_score(text: &str) -> Option<f64> {
    if let Some(captures) = PERCENT.captures(text) {
        return captures[1].parse().ok();
    }
    if let Some(captures) = OUT_OF_HUNDRED.captures(text) {
        return captures[1].parse().ok();
    }
    parse_leading_number(text)
}

/// Longest numeric prefix after leading whitespace (`"7.5 points"` -> 7.5).
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let found = LEADING_NUMBER.find(trimmed)?;
    found.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Legacy criteria score clamped to `[1, 10]`.
///
/// Numbers and numeric strings are accepted; anything else, including 0,
/// counts as missing and becomes 1.
pub fn clamp_legacy_score(value: Option<&Value>) -> f64 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| !n.is_nan() && *n != 0.0)
    .unwrap_or(LEGACY_SCORE_MIN);

    score.clamp(LEGACY_SCORE_MIN, LEGACY_SCORE_MAX)
}

/// Plain numeric reading of a JSON value, without clamping.
pub(crate) fn number_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_number(s),
        _ => None,
    }
}
