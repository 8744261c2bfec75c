//! Comparator catalog.
//!
//! Every comparator a filter can use, with the aliases accepted in filter text and the
//! metadata the parser and evaluator need:
//!
//! | Comparator       | Aliases                           | Controls |
//! |------------------|-----------------------------------|----------|
//! | `Any`            | `match any`                       | none     |
//! | `Equal`          | `=`, `==`                         | scalar   |
//! | `NotEqual`       | `!=`, `<>`                        | scalar   |
//! | `Greater`        | `>`, `greater than`               | scalar   |
//! | `GreaterOrEqual` | `>=`, `greater or equal`          | scalar   |
//! | `Lesser`         | `<`, `less than`                  | scalar   |
//! | `LesserOrEqual`  | `<=`, `less or equal`             | scalar   |
//! | `Is` / `IsNot`   | `is` / `is not`                   | list     |
//! | `In` / `NotIn`   | `in` / `not in`                   | list     |
//! | `Between`        | `between`                         | range    |
//! | `StartsWith`     | `start with`, `starts with`       | scalar   |
//! | `EndsWith`       | `end with`, `ends with`           | scalar   |
//! | `Contain`        | `contain`, `contains`             | list     |
//! | `Match`          | `match`                           | scalar   |
//! | `HasLengthOf`    | `has length of`                   | scalar   |
//! | `IsEmpty`        | `is empty`                        | none     |
//! | `IsNotEmpty`     | `is not empty`                    | none     |
//! | `IsDefined`      | `is defined`                      | none     |
//! | `IsUndefined`    | `is undefined`                    | none     |

use std::fmt;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    Any,
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Lesser,
    LesserOrEqual,
    Is,
    IsNot,
    In,
    NotIn,
    Between,
    StartsWith,
    EndsWith,
    Contain,
    Match,
    HasLengthOf,
    IsEmpty,
    IsNotEmpty,
    IsDefined,
    IsUndefined,
}

/// Shape of the control text a comparator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Controls are ignored.
    None,
    Scalar,
    /// Bracketed `[a|b|c]` list.
    List,
    /// Bracketed `[min|max]` pair.
    Range,
}

/// Evaluation modes in which a comparator may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRestriction {
    Any,
    ContextOnly,
    /// Reserved: no built-in comparator is literal-only today.
    LiteralOnly,
}

struct Meta {
    aliases: &'static [&'static str],
    arity: Arity,
    numeric: bool,
    mode: ModeRestriction,
}

const fn meta(aliases: &'static [&'static str], arity: Arity, numeric: bool) -> Meta {
    Meta { aliases, arity, numeric, mode: ModeRestriction::Any }
}

impl Comparator {
    pub const ALL: [Comparator; 21] = [
        Comparator::Any,
        Comparator::Equal,
        Comparator::NotEqual,
        Comparator::Greater,
        Comparator::GreaterOrEqual,
        Comparator::Lesser,
        Comparator::LesserOrEqual,
        Comparator::Is,
        Comparator::IsNot,
        Comparator::In,
        Comparator::NotIn,
        Comparator::Between,
        Comparator::StartsWith,
        Comparator::EndsWith,
        Comparator::Contain,
        Comparator::Match,
        Comparator::HasLengthOf,
        Comparator::IsEmpty,
        Comparator::IsNotEmpty,
        Comparator::IsDefined,
        Comparator::IsUndefined,
    ];

    fn meta(self) -> Meta {
        use Arity::{List, Range, Scalar};
        match self {
            Comparator::Any => meta(&["match any"], Arity::None, false),
            Comparator::Equal => meta(&["=", "=="], Scalar, false),
            Comparator::NotEqual => meta(&["!=", "<>"], Scalar, false),
            Comparator::Greater => meta(&[">", "greater than"], Scalar, true),
            Comparator::GreaterOrEqual => meta(&[">=", "greater or equal"], Scalar, true),
            Comparator::Lesser => meta(&["<", "less than"], Scalar, true),
            Comparator::LesserOrEqual => meta(&["<=", "less or equal"], Scalar, true),
            Comparator::Is => meta(&["is"], List, false),
            Comparator::IsNot => meta(&["is not"], List, false),
            Comparator::In => meta(&["in"], List, false),
            Comparator::NotIn => meta(&["not in"], List, false),
            Comparator::Between => meta(&["between"], Range, true),
            Comparator::StartsWith => meta(&["start with", "starts with"], Scalar, false),
            Comparator::EndsWith => meta(&["end with", "ends with"], Scalar, false),
            Comparator::Contain => meta(&["contain", "contains"], List, false),
            Comparator::Match => meta(&["match"], Scalar, false),
            Comparator::HasLengthOf => meta(&["has length of"], Scalar, true),
            Comparator::IsEmpty => meta(&["is empty"], Arity::None, false),
            Comparator::IsNotEmpty => meta(&["is not empty"], Arity::None, false),
            Comparator::IsDefined => Meta {
                mode: ModeRestriction::ContextOnly,
                ..meta(&["is defined"], Arity::None, false)
            },
            Comparator::IsUndefined => Meta {
                mode: ModeRestriction::ContextOnly,
                ..meta(&["is undefined"], Arity::None, false)
            },
        }
    }

    /// Every surface form accepted for this comparator, in lower case.
    pub fn aliases(self) -> &'static [&'static str] {
        self.meta().aliases
    }

    /// Symbol used when rendering a filter back to text.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Any => "MATCH ANY",
            other => other.meta().aliases[0],
        }
    }

    pub fn arity(self) -> Arity {
        self.meta().arity
    }

    /// True when both sides must be numbers for the comparison to succeed.
    pub fn is_numeric(self) -> bool {
        self.meta().numeric
    }

    pub fn mode(self) -> ModeRestriction {
        self.meta().mode
    }

    /// Look up a comparator by alias, ignoring case and runs of whitespace.
    pub fn find(alias: &str) -> Result<Comparator> {
        let wanted = alias.split_whitespace().join(" ").to_lowercase();
        Comparator::ALL
            .into_iter()
            .find(|c| c.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| FilterError::UnknownComparator(alias.trim().to_string()))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn is_word(alias: &str) -> bool {
    alias.chars().any(|c| c.is_alphabetic())
}

fn alternation<'a>(aliases: impl Iterator<Item = &'a str>) -> String {
    aliases
        .sorted_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)))
        .map(|alias| alias.split_whitespace().map(regex::escape).join(r"\s+"))
        .join("|")
}

/// Alternation of word aliases (`is not`, `between`, ...), longest first.
pub fn word_alternation() -> String {
    alternation(Comparator::ALL.iter().flat_map(|c| c.aliases()).copied().filter(|a| is_word(a)))
}

/// Alternation of symbol aliases (`!=`, `<=`, ...), longest first.
pub fn symbol_alternation() -> String {
    alternation(Comparator::ALL.iter().flat_map(|c| c.aliases()).copied().filter(|a| !is_word(a)))
}

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?is)^(.+?)(\s+(?:{})(?:\s+|$)|\s*(?:{})\s*)(.*)$",
        word_alternation(),
        symbol_alternation()
    );
    Regex::new(&pattern).expect("comparator grammar is a valid regex")
});

/// The three-part `subject comparator controls` grammar.
///
/// Capture 1 is the subject, capture 2 the comparator alias (with its surrounding
/// whitespace) and capture 3 the raw controls. Word aliases must be separated from the
/// subject by whitespace, so `index in [a]` is never split inside `index`.
pub fn composite_grammar() -> &'static Regex {
    &GRAMMAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_is_case_and_whitespace_tolerant() {
        assert_eq!(Comparator::find("IS   NOT").unwrap(), Comparator::IsNot);
        assert_eq!(Comparator::find(" == ").unwrap(), Comparator::Equal);
        assert_eq!(Comparator::find("<>").unwrap(), Comparator::NotEqual);
        assert_eq!(Comparator::find("Has Length Of").unwrap(), Comparator::HasLengthOf);
    }

    #[test]
    fn find_unknown() {
        assert_eq!(
            Comparator::find("~~"),
            Err(FilterError::UnknownComparator("~~".to_string()))
        );
    }

    #[test]
    fn aliases_are_unique() {
        let all: Vec<&str> = Comparator::ALL.iter().flat_map(|c| c.aliases()).copied().collect();
        assert_eq!(all.iter().unique().count(), all.len());
    }

    #[test]
    fn longer_aliases_come_first() {
        let words = word_alternation();
        let pos = |needle: &str| words.find(needle).unwrap();
        assert!(pos(r"is\s+not\s+empty") < pos(r"is\s+not|"));
        assert!(words.ends_with("|in|is") || words.ends_with("|is|in"));

        let symbols = symbol_alternation();
        assert!(symbols.find("!=").unwrap() < symbols.rfind('=').unwrap());
        assert!(symbols.find("<=").unwrap() < symbols.find("<|").unwrap_or(usize::MAX));
    }

    #[test]
    fn metadata() {
        assert_eq!(Comparator::Between.arity(), Arity::Range);
        assert!(Comparator::Between.is_numeric());
        assert_eq!(Comparator::Contain.arity(), Arity::List);
        assert_eq!(Comparator::IsDefined.mode(), ModeRestriction::ContextOnly);
        assert_eq!(Comparator::Equal.mode(), ModeRestriction::Any);
        assert_eq!(Comparator::Any.symbol(), "MATCH ANY");
        assert_eq!(Comparator::GreaterOrEqual.to_string(), ">=");
    }

    #[test]
    fn no_comparator_is_literal_only() {
        assert!(Comparator::ALL.iter().all(|c| c.mode() != ModeRestriction::LiteralOnly));
    }

    #[test]
    fn grammar_splits_three_parts() {
        let caps = composite_grammar().captures("age >= 18").unwrap();
        assert_eq!(&caps[1], "age");
        assert_eq!(caps[2].trim(), ">=");
        assert_eq!(&caps[3], "18");

        let caps = composite_grammar().captures("name is not empty").unwrap();
        assert_eq!(&caps[1], "name");
        assert_eq!(caps[2].trim(), "is not empty");
        assert_eq!(&caps[3], "");
    }
}
