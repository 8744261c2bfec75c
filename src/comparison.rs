use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::controls::numeric_ready;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?[dDfF]?|\d+[lL])$")
        .expect("number pattern is a valid regex")
});

static HEX_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)0[xX]([0-9a-fA-F]{1,15})$").expect("hex pattern is a valid regex")
});

/// Parse `text` as a number: decimals (`12`, `-3.5`, `.5`, `1e3`), a trailing type
/// suffix (`7L`, `2.5f`, `3d`) or hex (`0x1F`).
///
/// Words that `f64::from_str` would otherwise accept (`inf`, `NaN`) are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    if let Some(caps) = HEX_NUMBER.captures(text) {
        // at most 15 hex digits, always fits an i64
        let value = i64::from_str_radix(&caps[2], 16).ok()? as f64;
        return Some(if &caps[1] == "-" { -value } else { value });
    }
    if !NUMBER.is_match(text) {
        return None;
    }
    text.trim_end_matches(&['d', 'D', 'f', 'F', 'l', 'L'][..]).parse::<f64>().ok()
}

/// Parse `text` after [`numeric_ready`] cleanup, so `"$ 1 000"` reads as `1000`.
pub fn to_number(text: &str) -> Option<f64> {
    parse_number(&numeric_ready(text))
}

/// Equal as text, or equal as numbers when both sides read as numbers.
///
/// Text equality is checked first; `"007"` and `"7"` are then equal numerically.
pub fn is_equals_text_or_numeric(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (to_number(a), to_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Inclusive range check.
pub fn is_in_range(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}

pub fn cmp_numbers<F>(a: f64, b: f64, pred_on_ord: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    a.partial_cmp(&b).map(pred_on_ord).unwrap_or(false)
}
