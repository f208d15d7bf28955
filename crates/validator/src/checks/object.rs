//! Checks that apply to every value.

use std::any::Any;
use std::fmt::Debug;

use crate::chain::Validator;
use crate::foundation::{Equatable, ErrorKind, Identity, TriState};
use crate::message::{MessageBuilder, NULL_TEXT, quote_name};

impl<T: Any + Debug> Validator<T> {
    /// Ensures the value is null.
    pub fn is_null(self) -> Self {
        self.check_nullable(
            ErrorKind::InvalidArgument,
            |value| value.is_none(),
            |chain| chain.message_with_actual("must be null."),
        )
    }

    /// Ensures the value is not null.
    pub fn is_not_null(self) -> Self {
        self.check(ErrorKind::NullValue, |_| true, |chain| chain.message("may not be null."))
    }

    /// Ensures the value equals `expected`, using the configured
    /// [`EqualityMethod`](crate::config::EqualityMethod).
    ///
    /// The failure compares both values line by line.
    pub fn is_equal_to(self, expected: &T) -> Self
    where
        T: Equatable,
    {
        let method = self.configuration().equality_method();
        self.check(
            ErrorKind::InvalidArgument,
            |actual| method.equals(actual, expected),
            |chain| equality_message(chain, "had an unexpected value.", expected),
        )
    }

    /// Ensures the value equals the value of another parameter named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not unique; see [`require_name_is_unique`](Self::require_name_is_unique).
    #[track_caller]
    pub fn is_equal_to_named(self, expected: &T, name: &str) -> Self
    where
        T: Equatable,
    {
        self.require_name_is_unique(name);
        let method = self.configuration().equality_method();
        let text = format!("must be equal to {}.", quote_name(name));
        self.check(
            ErrorKind::InvalidArgument,
            |actual| method.equals(actual, expected),
            |chain| equality_message(chain, &text, expected),
        )
    }

    /// Ensures the value does not equal `unwanted`.
    pub fn is_not_equal_to(self, unwanted: &T) -> Self
    where
        T: Equatable,
    {
        let method = self.configuration().equality_method();
        self.check(
            ErrorKind::InvalidArgument,
            |actual| !method.equals(actual, unwanted),
            |chain| chain.message(&format!("may not be equal to {}.", chain.render(unwanted))),
        )
    }

    /// Ensures the value points at the same object as `expected`.
    pub fn is_same_reference_as(self, expected: &T) -> Self
    where
        T: Identity,
    {
        let address = expected.address();
        self.check(
            ErrorKind::InvalidArgument,
            |actual| std::ptr::eq(actual.address(), address),
            |chain| {
                chain
                    .message_with_actual("must be the same object as the expected value.")
                    .with_context("Expected", chain.render(expected))
                    .with_context("Actual.address", format_address(chain.tri_state()))
                    .with_context("Expected.address", format!("{:#x}", address.addr()))
            },
        )
    }

    /// Ensures the value does not point at the same object as `unwanted`.
    pub fn is_not_same_reference_as(self, unwanted: &T) -> Self
    where
        T: Identity,
    {
        let address = unwanted.address();
        self.check(
            ErrorKind::InvalidArgument,
            |actual| !std::ptr::eq(actual.address(), address),
            |chain| chain.message_with_actual("may not be the same object as the unwanted value."),
        )
    }

    /// Ensures `predicate` holds. `requirement` completes the sentence
    /// `"name" must ...`, as in `satisfies(is_even, "be even")`.
    pub fn satisfies(self, predicate: impl FnOnce(&T) -> bool, requirement: &str) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            predicate,
            |chain| chain.message_with_actual(&format!("must {requirement}.")),
        )
    }
}

fn equality_message<T: Any + Debug>(
    chain: &Validator<T>,
    text: &str,
    expected: &T,
) -> MessageBuilder
where
    T: PartialEq,
{
    let actual = chain.value();
    let values_equal = actual.is_some_and(|actual| actual == expected);
    chain.message(text).with_diff(actual, expected, values_equal)
}

fn format_address<T: Identity>(value: &TriState<T>) -> String {
    match value.get() {
        Some(value) => format!("{:#x}", value.address().addr()),
        None => NULL_TEXT.to_owned(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
