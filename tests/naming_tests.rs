use proptest::prelude::*;
use sql2crud::parser::names::{camel_to_kebab, snake_to_camel, snake_to_dash};

#[test]
fn known_conversions() {
    assert_eq!(snake_to_camel("customer_account", true), "CustomerAccount");
    assert_eq!(snake_to_camel("customer_account", false), "customerAccount");
    assert_eq!(camel_to_kebab("CustomerAccount"), "customer-account");
    assert_eq!(snake_to_dash("customer_account"), "customer-account");
}

#[test]
fn digits_are_not_segment_boundaries() {
    assert_eq!(camel_to_kebab("field2Name"), "field2-name");
    assert_eq!(snake_to_camel("line_2", true), "Line_2");
    assert_eq!(camel_to_kebab("Line_2"), "line-2");
}

proptest! {
    #[test]
    fn pascal_round_trip_matches_dash_case(
        ident in "[a-z]{1,6}(_[a-z]{1,6}){0,4}(_?[0-9]{1,3})?"
    ) {
        prop_assert_eq!(camel_to_kebab(&snake_to_camel(&ident, true)), snake_to_dash(&ident));
    }

    #[test]
    fn camel_round_trip_matches_dash_case(
        ident in "[a-z]{1,6}(_[a-z]{1,6}){0,4}(_?[0-9]{1,3})?"
    ) {
        prop_assert_eq!(camel_to_kebab(&snake_to_camel(&ident, false)), snake_to_dash(&ident));
    }

    #[test]
    fn dash_case_never_contains_underscores_or_capitals(ident in "[a-zA-Z0-9_]{0,24}") {
        let dashed = snake_to_dash(&ident);
        prop_assert!(!dashed.contains('_'));
        prop_assert!(!dashed.chars().any(|c| c.is_ascii_uppercase()));
    }
}
