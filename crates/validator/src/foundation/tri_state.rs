//! Values that may be missing because an earlier step already failed.
//!
//! A [`TriState`] separates three situations that `Option` alone cannot:
//!
//! - [`TriState::Undefined`]: there is no value because an earlier check or
//!   conversion failed. Everything derived from it stays undefined.
//! - [`TriState::Null`]: the value is present and null (`None`).
//! - [`TriState::Value`]: the value is present.
//!
//! ```rust,ignore
//! use verity_validator::foundation::{Outcome, TriState};
//!
//! let port = TriState::value("8080").map_defined(|s| s.len());
//! assert_eq!(port.test(|len| *len == 4), Outcome::True);
//!
//! let failed: TriState<&str> = TriState::undefined();
//! assert_eq!(failed.test(|_| unreachable!()), Outcome::Undefined);
//! ```

/// Result of testing a [`TriState`] against a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The value is undefined; the predicate was not called.
    Undefined,
    /// The predicate held.
    True,
    /// The predicate did not hold.
    False,
}

impl Outcome {
    /// Returns true only for [`Outcome::True`].
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

/// A value that is undefined, null, or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState<T> {
    /// No value; an earlier failure has already been reported.
    #[default]
    Undefined,
    /// The value is present and null.
    Null,
    /// The value is present.
    Value(T),
}

impl<T> TriState<T> {
    /// An undefined value.
    #[must_use]
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// A present, non-null value.
    #[must_use]
    pub const fn value(value: T) -> Self {
        Self::Value(value)
    }

    /// A present value that may be null.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }

    /// Returns true if there is no value.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the value is present, null or not.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    /// Returns true only for a present null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Tests the value.
    ///
    /// A null value is tested as `None`; the predicate is never called when
    /// the value is undefined.
    pub fn test_nullable(&self, predicate: impl FnOnce(Option<&T>) -> bool) -> Outcome {
        match self {
            Self::Undefined => Outcome::Undefined,
            Self::Null => predicate(None).into(),
            Self::Value(value) => predicate(Some(value)).into(),
        }
    }

    /// Tests a present, non-null value.
    ///
    /// A null value yields [`Outcome::False`].
    pub fn test(&self, predicate: impl FnOnce(&T) -> bool) -> Outcome {
        self.test_nullable(|value| value.is_some_and(predicate))
    }

    /// Transforms a present, non-null value; undefined and null pass through.
    pub fn map_defined<U>(self, f: impl FnOnce(T) -> U) -> TriState<U> {
        match self {
            Self::Undefined => TriState::Undefined,
            Self::Null => TriState::Null,
            Self::Value(value) => TriState::Value(f(value)),
        }
    }

    /// Transforms a present value, null included; undefined passes through.
    pub fn map_nullable<U>(self, f: impl FnOnce(Option<T>) -> Option<U>) -> TriState<U> {
        match self {
            Self::Undefined => TriState::Undefined,
            Self::Null => TriState::from_option(f(None)),
            Self::Value(value) => TriState::from_option(f(Some(value))),
        }
    }

    /// Turns a null value into an undefined one.
    #[must_use]
    pub fn null_to_undefined(self) -> Self {
        match self {
            Self::Null => Self::Undefined,
            other => other,
        }
    }

    /// Borrows the held value.
    #[must_use]
    pub const fn as_ref(&self) -> TriState<&T> {
        match self {
            Self::Undefined => TriState::Undefined,
            Self::Null => TriState::Null,
            Self::Value(value) => TriState::Value(value),
        }
    }

    /// Returns the present, non-null value.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value, null as `None`, or `error` if undefined.
    pub fn ok_or<E>(self, error: E) -> Result<Option<T>, E> {
        match self {
            Self::Undefined => Err(error),
            Self::Null => Ok(None),
            Self::Value(value) => Ok(Some(value)),
        }
    }

    /// Returns the present, non-null value or `fallback`.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Value(value) => value,
            _ => fallback,
        }
    }

    /// Returns the present, non-null value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for TriState<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
