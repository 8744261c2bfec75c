use cond_filter as cf;
use cf::FilterError;

#[test]
fn test_unknown_comparator() {
    let err = cf::parse("x ~~ y").unwrap_err();
    assert!(
        matches!(err, FilterError::MalformedFilter { .. } | FilterError::UnknownComparator(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn test_blank_filter() {
    assert!(matches!(cf::parse(" \t "), Err(FilterError::MalformedFilter { .. })));
}

#[test]
fn test_range_needs_two_values() {
    assert!(matches!(
        cf::parse("x between [1|2|3]"),
        Err(FilterError::MalformedRange { .. })
    ));
}

#[test]
fn test_list_needs_brackets() {
    assert!(matches!(cf::parse("x in a,b"), Err(FilterError::MalformedList { .. })));
}

#[test]
fn test_context_only_comparators_in_literal_mode() {
    for text in ["v is defined", "v is undefined"] {
        let filter = cf::parse(text).unwrap();
        assert!(matches!(
            filter.matches_literal("anything"),
            Err(FilterError::UnsupportedOperation(_))
        ));
    }
}

#[test]
fn test_bad_pattern_aborts_literal_mode_only() {
    let filter = cf::parse("x match [a-").unwrap();
    assert!(matches!(
        filter.matches_literal("a"),
        Err(FilterError::InvalidComparator { .. })
    ));
    assert!(!filter.matches(&cf::MapContext::new().with("x", "a")));
}

#[test]
fn test_non_numeric_is_a_soft_failure() {
    assert!(!cf::matches_literal("x > 5", "n/a").unwrap());
    assert!(!cf::matches_literal("x between [1|10]", "n/a").unwrap());
    let ctx = cf::MapContext::new().with("x", "n/a");
    assert!(!cf::parse("${x} >= 1").unwrap().matches(&ctx));
}
