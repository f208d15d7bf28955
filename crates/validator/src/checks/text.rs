//! Text checks.

use std::any::Any;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;

use crate::chain::Validator;
use crate::foundation::ErrorKind;

/// Values that are text.
pub trait Text {
    /// The text.
    fn as_text(&self) -> &str;
}

macro_rules! impl_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Text for $ty {
                fn as_text(&self) -> &str {
                    self
                }
            }
        )*
    };
}

impl_text!(String, &str, Box<str>, Arc<str>, Cow<'_, str>);

/// Checks for text.
pub trait TextChecks: Sized {
    /// Ensures the text starts with `prefix`.
    fn starts_with(self, prefix: &str) -> Self;

    /// Ensures the text does not start with `prefix`.
    fn does_not_start_with(self, prefix: &str) -> Self;

    /// Ensures the text ends with `suffix`.
    fn ends_with(self, suffix: &str) -> Self;

    /// Ensures the text does not end with `suffix`.
    fn does_not_end_with(self, suffix: &str) -> Self;

    /// Ensures the text contains `needle`.
    fn contains_text(self, needle: &str) -> Self;

    /// Ensures the text does not contain `needle`.
    fn does_not_contain_text(self, needle: &str) -> Self;

    /// Ensures the whole text matches `pattern`.
    fn matches(self, pattern: &Regex) -> Self;

    /// Ensures the text is empty or only whitespace.
    fn is_blank(self) -> Self;

    /// Ensures the text has at least one non-whitespace character.
    fn is_not_blank(self) -> Self;

    /// Ensures the text has no leading or trailing whitespace.
    fn is_trimmed(self) -> Self;

    /// Continues with the text parsed as `N`.
    ///
    /// If parsing fails the parse error becomes the failure's cause and the
    /// returned chain is undefined, so later checks add nothing.
    ///
    /// ```rust,ignore
    /// let port: u16 = require_that(input, "port").parse().is_greater_than(1023).into_value()?;
    /// ```
    fn parse<N>(self) -> Validator<N>
    where
        N: FromStr,
        N::Err: Error + Send + Sync + 'static;
}

fn text_check<T: Text + Any + Debug>(
    chain: Validator<T>,
    predicate: impl FnOnce(&str) -> bool,
    requirement: &str,
    operand: &str,
) -> Validator<T> {
    chain.check(
        ErrorKind::InvalidArgument,
        |value| predicate(value.as_text()),
        |chain| {
            let operand = chain.render(&operand.to_owned());
            chain.message_with_actual(&format!("{requirement} {operand}."))
        },
    )
}

/// Short name of a type, without its module path.
fn short_type_name<N>() -> &'static str {
    let name = std::any::type_name::<N>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

impl<T: Text + Any + Debug> TextChecks for Validator<T> {
    fn starts_with(self, prefix: &str) -> Self {
        text_check(self, |text| text.starts_with(prefix), "must start with", prefix)
    }

    fn does_not_start_with(self, prefix: &str) -> Self {
        text_check(self, |text| !text.starts_with(prefix), "may not start with", prefix)
    }

    fn ends_with(self, suffix: &str) -> Self {
        text_check(self, |text| text.ends_with(suffix), "must end with", suffix)
    }

    fn does_not_end_with(self, suffix: &str) -> Self {
        text_check(self, |text| !text.ends_with(suffix), "may not end with", suffix)
    }

    fn contains_text(self, needle: &str) -> Self {
        text_check(self, |text| text.contains(needle), "must contain", needle)
    }

    fn does_not_contain_text(self, needle: &str) -> Self {
        text_check(self, |text| !text.contains(needle), "may not contain", needle)
    }

    fn matches(self, pattern: &Regex) -> Self {
        text_check(
            self,
            |text| pattern.find(text).is_some_and(|m| m.start() == 0 && m.end() == text.len()),
            "must match the pattern",
            pattern.as_str(),
        )
    }

    fn is_blank(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| value.as_text().trim().is_empty(),
            |chain| chain.message_with_actual("must be blank."),
        )
    }

    fn is_not_blank(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| !value.as_text().trim().is_empty(),
            |chain| chain.message_with_actual("may not be blank."),
        )
    }

    fn is_trimmed(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| value.as_text().trim() == value.as_text(),
            |chain| chain.message_with_actual("may not contain leading or trailing whitespace."),
        )
    }

    fn parse<N>(self) -> Validator<N>
    where
        N: FromStr,
        N::Err: Error + Send + Sync + 'static,
    {
        self.try_map(
            |value| value.as_text().parse::<N>(),
            |chain, _| chain.message_with_actual(&format!("must be a valid {}.", short_type_name::<N>())),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
