pub mod errors;
pub mod context;
pub mod comparator;
pub mod comparison;
pub mod controls;
pub mod filter;
pub mod parser;
mod engine;

pub use comparator::{Arity, Comparator, ModeRestriction};
pub use comparison::is_equals_text_or_numeric;
pub use context::{EvaluationContext, MapContext};
pub use controls::{normalize_scalar, numeric_ready};
pub use errors::{FilterError, Result};
pub use filter::{Filter, ANY_SUBJECT, NULL_LITERAL};

/// Convenience: parse a `subject comparator controls` expression.
pub fn parse(text: &str) -> Result<Filter> {
    parser::parse(text)
}

/// Convenience: parse `filter` and evaluate it against a literal value.
pub fn matches_literal(filter: &str, data: &str) -> Result<bool> {
    parse(filter)?.matches_literal(data)
}
