//! Control value normalization: scalars, `[a|b]` lists and `[min|max]` ranges.

use tracing::warn;

use crate::comparator::{Arity, Comparator};
use crate::comparison::is_in_range;
use crate::errors::{FilterError, Result};

pub const LIST_OPEN: char = '[';
pub const LIST_CLOSE: char = ']';
pub const ITEM_SEP: char = '|';

fn unwrap_quotes(text: &str, quote: char) -> &str {
    if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Trim, then strip one pair of surrounding double quotes.
///
/// A value that starts or ends with a double quote, but not both, is logged as a likely
/// data issue and returned trimmed but otherwise untouched.
pub fn normalize_scalar(text: &str) -> String {
    let value = text.trim();
    if value.starts_with('"') != value.ends_with('"') {
        warn!(value, "found unbalanced double-quote, possible data issue");
    }
    unwrap_quotes(value, '"').to_string()
}

/// Cleanup applied before reading text as a number: surrounding quotes, a leading `$`
/// and all whitespace are removed.
pub fn numeric_ready(text: &str) -> String {
    let value = unwrap_quotes(text, '"');
    let value = unwrap_quotes(value, '\'').trim();
    let value = value.strip_prefix('$').unwrap_or(value);
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn is_bracketed(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with(LIST_OPEN) && text.ends_with(LIST_CLOSE)
}

/// `[]`, whitespace ignored.
pub fn is_empty_list(text: &str) -> bool {
    text.chars().filter(|c| !c.is_whitespace()).eq([LIST_OPEN, LIST_CLOSE])
}

fn split_items(text: &str) -> Vec<String> {
    let text = text.trim();
    // interior is trimmed first, so `[ ]` is the empty list
    text[1..text.len() - 1]
        .trim()
        .split(ITEM_SEP)
        .filter(|item| !item.is_empty())
        .map(normalize_scalar)
        .collect()
}

pub fn parse_list(controls: &str) -> Result<Vec<String>> {
    if !is_bracketed(controls) {
        return Err(FilterError::malformed_list(controls, "expected [item|item|...]"));
    }
    Ok(split_items(controls))
}

pub fn parse_range(controls: &str) -> Result<Vec<String>> {
    if !is_bracketed(controls) {
        return Err(FilterError::malformed_range(controls, "expected [min|max]"));
    }
    let items = split_items(controls);
    if items.len() != 2 {
        return Err(FilterError::malformed_range(
            controls,
            format!("exactly 2 values (low, high) required, found {}", items.len()),
        ));
    }
    Ok(items)
}

/// Control entries for `comparator`; empty unless it takes a list or a range.
///
/// `contain` also accepts a single unbracketed value.
pub fn control_list(comparator: Comparator, controls: &str) -> Result<Vec<String>> {
    match comparator.arity() {
        Arity::List if comparator == Comparator::Contain && !is_bracketed(controls) => {
            Ok(vec![normalize_scalar(controls)])
        }
        Arity::List => parse_list(controls),
        Arity::Range => parse_range(controls),
        Arity::None | Arity::Scalar => Ok(Vec::new()),
    }
}

/// Inclusive numeric range; bounds may be given in either order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        is_in_range(value, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar() {
        assert_eq!(normalize_scalar("  abc "), "abc");
        assert_eq!(normalize_scalar(" \"a b\" "), "a b");
        assert_eq!(normalize_scalar("\"\""), "");
        // unbalanced quotes are kept
        assert_eq!(normalize_scalar("\"abc"), "\"abc");
        assert_eq!(normalize_scalar("abc\""), "abc\"");
        assert_eq!(normalize_scalar("\""), "\"");
    }

    #[test]
    fn numeric_cleanup() {
        assert_eq!(numeric_ready("\" $12 345.6 \""), "12345.6");
        assert_eq!(numeric_ready("'7'"), "7");
        assert_eq!(numeric_ready("abc"), "abc");
    }

    #[test]
    fn lists() {
        assert_eq!(parse_list("[a| \"b c\" |c]").unwrap(), vec!["a", "b c", "c"]);
        assert_eq!(parse_list("[a||b]").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_list("[]").unwrap(), Vec::<String>::new());
        assert!(matches!(parse_list("a|b"), Err(FilterError::MalformedList { .. })));
        assert_eq!(parse_list("[ ]").unwrap(), Vec::<String>::new());
        assert_eq!(parse_list("[ |a]").unwrap(), vec!["a"]);
        assert_eq!(parse_list("[a| ]").unwrap(), vec!["a"]);
        assert!(is_empty_list(" [ ] "));
        assert!(!is_empty_list("[a]"));
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_range("[18|65]").unwrap(), vec!["18", "65"]);
        assert!(matches!(parse_range("[1|2|3]"), Err(FilterError::MalformedRange { .. })));
        assert!(matches!(parse_range("[1]"), Err(FilterError::MalformedRange { .. })));
        assert!(matches!(parse_range("1|2"), Err(FilterError::MalformedRange { .. })));

        let range = NumericRange::new(65.0, 18.0);
        assert_eq!(range, NumericRange { min: 18.0, max: 65.0 });
        assert!(range.contains(65.0));
        assert!(!range.contains(17.9));
    }

    #[test]
    fn list_only_for_list_and_range_comparators() {
        assert_eq!(control_list(Comparator::Equal, "[a|b]").unwrap(), Vec::<String>::new());
        assert_eq!(control_list(Comparator::In, "[a|b]").unwrap(), vec!["a", "b"]);
        assert_eq!(control_list(Comparator::Contain, "\"foo\"").unwrap(), vec!["foo"]);
        assert_eq!(control_list(Comparator::Between, "[1|2]").unwrap(), vec!["1", "2"]);
        assert!(control_list(Comparator::Is, "abc").is_err());
    }
}
