// src/parser.rs
use crate::comparator::{composite_grammar, Comparator};
use crate::errors::{FilterError, Result};
use crate::filter::Filter;

/// Parse `subject comparator controls` into a [`Filter`].
///
/// List and range controls are normalized here, so a bad `[...]` shape fails at parse
/// time rather than during evaluation.
pub fn parse(text: &str) -> Result<Filter> {
    if text.trim().is_empty() {
        return Err(FilterError::malformed_filter(text, "null or blank"));
    }

    let caps = composite_grammar()
        .captures(text)
        .ok_or_else(|| FilterError::malformed_filter(text, "does not match required format"))?;

    let parts: Vec<&str> = caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
    if parts.len() != 3 {
        return Err(FilterError::malformed_filter(
            text,
            "does not contain the required 3 parts of a valid filter",
        ));
    }

    let subject = parts[0].trim();
    if subject.is_empty() {
        return Err(FilterError::malformed_filter(text, "empty/blank subject"));
    }

    let comparator = Comparator::find(parts[1])?;
    Filter::new(subject, comparator, parts[2])
}
