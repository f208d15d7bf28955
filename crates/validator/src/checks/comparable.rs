//! Ordering checks.

use std::any::Any;
use std::fmt::Debug;

use crate::chain::Validator;
use crate::foundation::ErrorKind;
use crate::message::quote_name;

/// Checks for values with an ordering.
///
/// Each bound can be a literal or the value of another named parameter
/// (`_named` variants), which is then listed in the failure's context.
pub trait ComparableChecks<T>: Sized {
    /// Ensures the value is less than `bound`.
    fn is_less_than(self, bound: T) -> Self;

    /// Ensures the value is less than the parameter `name`.
    fn is_less_than_named(self, bound: T, name: &str) -> Self;

    /// Ensures the value is less than or equal to `bound`.
    fn is_less_than_or_equal_to(self, bound: T) -> Self;

    /// Ensures the value is less than or equal to the parameter `name`.
    fn is_less_than_or_equal_to_named(self, bound: T, name: &str) -> Self;

    /// Ensures the value is greater than `bound`.
    fn is_greater_than(self, bound: T) -> Self;

    /// Ensures the value is greater than the parameter `name`.
    fn is_greater_than_named(self, bound: T, name: &str) -> Self;

    /// Ensures the value is greater than or equal to `bound`.
    fn is_greater_than_or_equal_to(self, bound: T) -> Self;

    /// Ensures the value is greater than or equal to the parameter `name`.
    fn is_greater_than_or_equal_to_named(self, bound: T, name: &str) -> Self;

    /// Ensures `start <= value < end`.
    fn is_between(self, start: T, end: T) -> Self;

    /// Ensures `start <= value <= end`.
    fn is_between_closed(self, start: T, end: T) -> Self;
}

#[derive(Clone, Copy)]
enum Bound {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Bound {
    fn holds<T: PartialOrd>(self, value: &T, bound: &T) -> bool {
        match self {
            Self::Less => value < bound,
            Self::LessOrEqual => value <= bound,
            Self::Greater => value > bound,
            Self::GreaterOrEqual => value >= bound,
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::Less => "must be less than",
            Self::LessOrEqual => "must be less than or equal to",
            Self::Greater => "must be greater than",
            Self::GreaterOrEqual => "must be greater than or equal to",
        }
    }
}

fn compare<T: PartialOrd + Any + Debug>(chain: Validator<T>, kind: Bound, bound: T) -> Validator<T> {
    chain.check(
        ErrorKind::InvalidArgument,
        |value| kind.holds(value, &bound),
        |chain| chain.message_with_actual(&format!("{} {}.", kind.phrase(), chain.render(&bound))),
    )
}

#[track_caller]
fn compare_named<T: PartialOrd + Any + Debug>(chain: Validator<T>, kind: Bound, bound: T, name: &str) -> Validator<T> {
    chain.require_name_is_unique(name);
    chain.check(
        ErrorKind::InvalidArgument,
        |value| kind.holds(value, &bound),
        |chain| {
            chain
                .message_with_actual(&format!("{} {}.", kind.phrase(), quote_name(name)))
                .with_value(name, &bound)
        },
    )
}

impl<T: PartialOrd + Any + Debug> ComparableChecks<T> for Validator<T> {
    fn is_less_than(self, bound: T) -> Self {
        compare(self, Bound::Less, bound)
    }

    #[track_caller]
    fn is_less_than_named(self, bound: T, name: &str) -> Self {
        compare_named(self, Bound::Less, bound, name)
    }

    fn is_less_than_or_equal_to(self, bound: T) -> Self {
        compare(self, Bound::LessOrEqual, bound)
    }

    #[track_caller]
    fn is_less_than_or_equal_to_named(self, bound: T, name: &str) -> Self {
        compare_named(self, Bound::LessOrEqual, bound, name)
    }

    fn is_greater_than(self, bound: T) -> Self {
        compare(self, Bound::Greater, bound)
    }

    #[track_caller]
    fn is_greater_than_named(self, bound: T, name: &str) -> Self {
        compare_named(self, Bound::Greater, bound, name)
    }

    fn is_greater_than_or_equal_to(self, bound: T) -> Self {
        compare(self, Bound::GreaterOrEqual, bound)
    }

    #[track_caller]
    fn is_greater_than_or_equal_to_named(self, bound: T, name: &str) -> Self {
        compare_named(self, Bound::GreaterOrEqual, bound, name)
    }

    fn is_between(self, start: T, end: T) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| start <= *value && *value < end,
            |chain| {
                chain.message_with_actual(&format!(
                    "must be between {} (inclusive) and {} (exclusive).",
                    chain.render(&start),
                    chain.render(&end)
                ))
            },
        )
    }

    fn is_between_closed(self, start: T, end: T) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| start <= *value && *value <= end,
            |chain| {
                chain.message_with_actual(&format!(
                    "must be between {} and {}, inclusive.",
                    chain.render(&start),
                    chain.render(&end)
                ))
            },
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ValidatorFactory;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, true)]
    #[case(2, 2, false)]
    #[case(3, 2, false)]
    fn less_than(#[case] value: i32, #[case] bound: i32, #[case] passes: bool) {
        let chain = ValidatorFactory::new().check_if(value, "x").is_less_than(bound);
        assert_eq!(chain.validation_failed(), !passes);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(9, true)]
    #[case(10, false)]
    fn between_is_half_open(#[case] value: i32, #[case] passes: bool) {
        let chain = ValidatorFactory::new().check_if(value, "x").is_between(1, 10);
        assert_eq!(chain.validation_failed(), !passes);
    }

    #[test]
    fn between_closed_includes_end() {
        let factory = ValidatorFactory::new();
        assert!(!factory.check_if(10, "x").is_between_closed(1, 10).validation_failed());
        assert!(factory.check_if(11, "x").is_between_closed(1, 10).validation_failed());
    }

    #[test]
    fn literal_bound_message() {
        let failures = ValidatorFactory::new().check_if(12, "x").is_less_than_or_equal_to(10).into_failures();
        assert_eq!(
            failures.messages(),
            vec!["\"x\" must be less than or equal to 10.\nActual: 12"]
        );
    }

    #[test]
    fn named_bound_message_lists_the_parameter() {
        let failures = ValidatorFactory::new()
            .check_if(3, "min")
            .is_greater_than_named(5, "max")
            .into_failures();
        assert_eq!(
            failures.messages(),
            vec!["\"min\" must be greater than \"max\".\nActual: 3\nmax   : 5"]
        );
    }

    #[test]
    fn text_values_compare_lexicographically() {
        let chain = ValidatorFactory::new()
            .check_if(String::from("apple"), "fruit")
            .is_greater_than_or_equal_to(String::from("banana"));
        assert!(chain.validation_failed());
    }
}
