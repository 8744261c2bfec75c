use cond_filter as cf;
use proptest::prelude::*;

proptest! {
    // Normalizing text without surrounding quotes only trims it, and is idempotent.
    #[test]
    fn normalize_scalar_idempotent(s in "[a-zA-Z0-9 ._-]{0,20}") {
        let once = cf::normalize_scalar(&s);
        prop_assert_eq!(&once, s.trim());
        prop_assert_eq!(cf::normalize_scalar(&once), once.clone());
    }

    #[test]
    fn quoted_scalar_is_unwrapped(s in "[a-z0-9 ]{0,12}") {
        prop_assert_eq!(cf::normalize_scalar(&format!("  \"{s}\" ")), s);
    }

    #[test]
    fn numeric_equality_ignores_formatting(n in -100000i64..100000) {
        let plain = n.to_string();
        let decimal = format!("{n}.0");
        prop_assert!(cf::is_equals_text_or_numeric(&plain, &decimal));
        let quoted = format!("\"{plain}\"");
        prop_assert!(cf::is_equals_text_or_numeric(&plain, &quoted));
    }

    #[test]
    fn between_is_order_independent(a in -1000i32..1000, b in -1000i32..1000, v in -1200i32..1200) {
        let forward = cf::parse(&format!("n between [{a}|{b}]")).unwrap();
        let reverse = cf::parse(&format!("n between [{b}|{a}]")).unwrap();
        let data = v.to_string();
        let expected = v >= a.min(b) && v <= a.max(b);
        prop_assert_eq!(forward.matches_literal(data.as_str()).unwrap(), expected);
        prop_assert_eq!(reverse.matches_literal(data.as_str()).unwrap(), expected);
    }

    #[test]
    fn parse_display_round_trip(
        subject in "[a-z][a-z0-9_]{0,8}",
        op in prop::sample::select(vec!["=", "!=", ">", ">=", "<", "<=", "start with", "end with", "match"]),
        control in "[0-9][a-z0-9]{0,7}",
    ) {
        let filter = cf::parse(&format!("{subject} {op} {control}")).unwrap();
        prop_assert_eq!(filter.subject(), subject.as_str());
        prop_assert_eq!(filter.controls(), control.as_str());
        prop_assert_eq!(cf::parse(&filter.to_string()).unwrap(), filter);
    }
}
