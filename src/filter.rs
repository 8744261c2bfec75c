use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::comparator::Comparator;
use crate::context::EvaluationContext;
use crate::controls::control_list;
use crate::engine;
use crate::errors::{FilterError, Result};
use crate::parser;

/// Subject meaning "match any subject".
pub const ANY_SUBJECT: &str = "[ANY]";

/// Stand-in for missing literal data.
pub const NULL_LITERAL: &str = "null";

/// A parsed `subject comparator controls` predicate.
///
/// Immutable once built. The control list is computed up front and is only non-empty
/// for list and range comparators (`in`, `is not`, `between`, `contain`, ...).
///
/// ```
/// use cond_filter::Filter;
///
/// let filter: Filter = "age between [18|65]".parse().unwrap();
/// assert!(filter.matches_literal("30").unwrap());
/// assert!(!filter.matches_literal("90").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Filter {
    subject: String,
    comparator: Comparator,
    controls: String,
    control_list: Vec<String>,
}

impl Filter {
    pub fn new(subject: &str, comparator: Comparator, controls: &str) -> Result<Self> {
        let subject = subject.trim();
        let controls = controls.trim();
        if subject.is_empty() {
            return Err(FilterError::malformed_filter(
                &format!("{subject} {comparator} {controls}"),
                "empty/blank subject",
            ));
        }
        Ok(Self {
            subject: subject.to_string(),
            comparator,
            controls: controls.to_string(),
            control_list: control_list(comparator, controls)?,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn is_any_subject(&self) -> bool {
        self.subject == ANY_SUBJECT
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Raw (trimmed) control text as written.
    pub fn controls(&self) -> &str {
        &self.controls
    }

    pub fn control_list(&self) -> &[String] {
        &self.control_list
    }

    /// Evaluate against values resolved through `ctx`.
    ///
    /// Never fails: type mismatches and bad patterns are logged and count as no match.
    pub fn matches(&self, ctx: &dyn EvaluationContext) -> bool {
        engine::matches_context(self, ctx)
    }

    /// Evaluate against a literal value, such as a cell of tabular data. `None` reads as
    /// `"null"`.
    ///
    /// Fails for comparators that need a context (`is defined`, `is undefined`) and for
    /// invalid `match` patterns.
    pub fn matches_literal<'a>(&self, data: impl Into<Option<&'a str>>) -> Result<bool> {
        engine::matches_literal(self, data.into())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.comparator)?;
        if !self.controls.is_empty() {
            write!(f, " {}", self.controls)?;
        }
        Ok(())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl TryFrom<String> for Filter {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self> {
        parser::parse(&value)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}
