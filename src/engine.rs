//! Filter evaluation.
//!
//! Both evaluation modes run through [`evaluate`]; they only differ in how control
//! text is resolved, which comparators are legal, and a few empty-data rules of literal
//! mode. Context mode swallows errors (logged, no match) so a larger run can go on;
//! literal mode returns them.

use std::cmp::Ordering;

use regex::Regex;
use tracing::{debug, error, warn};

use crate::comparator::{Comparator, ModeRestriction};
use crate::comparison::{cmp_numbers, is_equals_text_or_numeric, parse_number, to_number};
use crate::context::EvaluationContext;
use crate::controls::{is_bracketed, is_empty_list, normalize_scalar, parse_list, NumericRange};
use crate::errors::{FilterError, Result};
use crate::filter::{Filter, NULL_LITERAL};

enum Mode<'a> {
    Context(&'a dyn EvaluationContext),
    Literal,
}

impl Mode<'_> {
    fn resolve(&self, text: &str) -> String {
        match self {
            Mode::Context(ctx) => ctx.resolve(text),
            Mode::Literal => text.to_string(),
        }
    }

    // Control text to compare against: resolved as-is in context mode, quote-normalized
    // in literal mode.
    fn expected(&self, controls: &str) -> String {
        match self {
            Mode::Context(ctx) => ctx.resolve(controls),
            Mode::Literal => normalize_scalar(controls),
        }
    }

    // Context values are taken as numbers only when they already read as one; literal data
    // gets the `$`/whitespace cleanup first.
    fn number(&self, actual: &str) -> Option<f64> {
        match self {
            Mode::Context(_) => parse_number(actual),
            Mode::Literal => to_number(actual),
        }
    }

    fn exists(&self, name: &str, comparator: Comparator) -> Result<bool> {
        match self {
            Mode::Context(ctx) => Ok(ctx.exists(name)),
            Mode::Literal => Err(FilterError::UnsupportedOperation(comparator.to_string())),
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, Mode::Literal)
    }

    fn allows(&self, comparator: Comparator) -> bool {
        match comparator.mode() {
            ModeRestriction::Any => true,
            ModeRestriction::ContextOnly => !self.is_literal(),
            ModeRestriction::LiteralOnly => self.is_literal(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Mode::Context(_) => "context",
            Mode::Literal => "literal",
        }
    }
}

pub(crate) fn matches_context(filter: &Filter, ctx: &dyn EvaluationContext) -> bool {
    let actual = ctx.resolve(filter.subject());
    match evaluate(filter, &actual, &Mode::Context(ctx)) {
        Ok(matched) => matched,
        Err(e) => {
            error!(filter = %filter, error = %e, "filter evaluation failed");
            false
        }
    }
}

pub(crate) fn matches_literal(filter: &Filter, data: Option<&str>) -> Result<bool> {
    if filter.comparator() == Comparator::Any {
        return Ok(true);
    }
    let data = normalize_scalar(data.unwrap_or(NULL_LITERAL));
    evaluate(filter, &data, &Mode::Literal)
}

fn evaluate(filter: &Filter, actual: &str, mode: &Mode) -> Result<bool> {
    let comparator = filter.comparator();
    if !mode.allows(comparator) {
        return Err(FilterError::UnsupportedOperation(comparator.to_string()));
    }

    let expected = mode.expected(filter.controls());
    debug!(mode = mode.name(), "({actual} {comparator} {expected})");

    let matched = match comparator {
        Comparator::Any => true,

        Comparator::Equal => is_equals_text_or_numeric(actual, &expected),
        Comparator::NotEqual => !is_equals_text_or_numeric(actual, &expected),

        Comparator::Greater => numeric_match(comparator, mode, actual, &expected, |o| o == Ordering::Greater),
        Comparator::GreaterOrEqual => numeric_match(comparator, mode, actual, &expected, |o| o != Ordering::Less),
        Comparator::Lesser => numeric_match(comparator, mode, actual, &expected, |o| o == Ordering::Less),
        Comparator::LesserOrEqual => numeric_match(comparator, mode, actual, &expected, |o| o != Ordering::Greater),
        Comparator::HasLengthOf => {
            let length = actual.chars().count().to_string();
            numeric_match(comparator, mode, &length, &expected, |o| o == Ordering::Equal)
        }

        Comparator::Is | Comparator::In => {
            (mode.is_literal() && actual.is_empty()) || is_member(actual, filter, mode)
        }
        Comparator::IsNot | Comparator::NotIn => {
            (mode.is_literal() && actual.is_empty() && is_empty_list(filter.controls()))
                || !is_member(actual, filter, mode)
        }

        Comparator::Between => in_range(comparator, actual, filter.control_list(), mode),

        Comparator::StartsWith => {
            text_match(filter, &expected, mode, |control| actual.starts_with(control))?
        }
        Comparator::EndsWith => {
            text_match(filter, &expected, mode, |control| actual.ends_with(control))?
        }
        Comparator::Contain => filter
            .control_list()
            .iter()
            .all(|control| actual.contains(mode.resolve(control).as_str())),

        Comparator::Match => is_exact_match(actual, mode.resolve(filter.controls()).trim())?,

        Comparator::IsEmpty => actual.is_empty(),
        Comparator::IsNotEmpty => !actual.is_empty(),

        Comparator::IsDefined => mode.exists(filter.subject(), comparator)?,
        Comparator::IsUndefined => !mode.exists(filter.subject(), comparator)?,
    };
    Ok(matched)
}

fn numeric_match<F>(comparator: Comparator, mode: &Mode, actual: &str, expected: &str, pred_on_ord: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    let Some(actual_num) = mode.number(actual) else {
        warn!(%comparator, value = actual, "NOT A NUMBER");
        return false;
    };
    let Some(expected_num) = to_number(expected) else {
        warn!(%comparator, value = expected, "NOT A NUMBER");
        return false;
    };
    cmp_numbers(actual_num, expected_num, pred_on_ord)
}

fn is_member(actual: &str, filter: &Filter, mode: &Mode) -> bool {
    filter.control_list().iter().any(|control| mode.resolve(control) == actual)
}

fn in_range(comparator: Comparator, actual: &str, controls: &[String], mode: &Mode) -> bool {
    let Some(value) = mode.number(actual) else {
        warn!(%comparator, value = actual, "NOT A NUMBER");
        return false;
    };
    let [low, high] = controls else {
        warn!(%comparator, count = controls.len(), "EXPECTS [min|max]");
        return false;
    };

    let bound = |control: &String| {
        let resolved = mode.resolve(control.trim());
        let resolved = normalize_scalar(&resolved);
        let number = to_number(resolved.trim());
        if number.is_none() {
            warn!(%comparator, value = %resolved, "NOT A NUMBER");
        }
        number
    };
    match (bound(low), bound(high)) {
        (Some(a), Some(b)) => NumericRange::new(a, b).contains(value),
        _ => false,
    }
}

/// Prefix/suffix test. In literal mode a bracketed control list matches when any
/// entry does.
fn text_match<F>(filter: &Filter, expected: &str, mode: &Mode, pred: F) -> Result<bool>
where
    F: Fn(&str) -> bool,
{
    if mode.is_literal() && is_bracketed(filter.controls()) {
        let controls = parse_list(filter.controls())?;
        return Ok(controls.iter().any(|control| pred(control.as_str())));
    }
    Ok(pred(expected))
}

fn is_exact_match(actual: &str, pattern: &str) -> Result<bool> {
    let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| FilterError::InvalidComparator {
        comparator: format!("{} {pattern}", Comparator::Match),
        reason: e.to_string(),
    })?;
    Ok(regex.is_match(actual))
}
