//! Numeric checks.

use std::any::Any;
use std::fmt::Debug;

use crate::chain::Validator;
use crate::foundation::ErrorKind;

/// Primitive numbers.
pub trait Number: Copy + PartialOrd + Any + Debug {
    /// The additive identity.
    const ZERO: Self;

    /// Returns true if the value is not a number (floats only).
    fn is_nan(self) -> bool;

    /// Returns true if the value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Returns true if the value has no fractional part.
    fn is_whole(self) -> bool;

    /// Returns true if the value is a multiple of `divisor`. Only zero is a
    /// multiple of zero.
    fn is_multiple_of(self, divisor: Self) -> bool;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0;

                fn is_nan(self) -> bool {
                    false
                }

                fn is_finite(self) -> bool {
                    true
                }

                fn is_whole(self) -> bool {
                    true
                }

                fn is_multiple_of(self, divisor: Self) -> bool {
                    if divisor == 0 {
                        self == 0
                    } else {
                        self.wrapping_rem(divisor) == 0
                    }
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0.0;

                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                fn is_whole(self) -> bool {
                    <$ty>::is_finite(self) && self.trunc() == self
                }

                fn is_multiple_of(self, divisor: Self) -> bool {
                    if divisor == 0.0 {
                        self == 0.0
                    } else {
                        <$ty>::is_finite(self) && self % divisor == 0.0
                    }
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/// Checks for primitive numbers.
pub trait NumberChecks<T>: Sized {
    /// Ensures the value is less than zero.
    fn is_negative(self) -> Self;

    /// Ensures the value is not less than zero.
    fn is_not_negative(self) -> Self;

    /// Ensures the value is zero.
    fn is_zero(self) -> Self;

    /// Ensures the value is not zero.
    fn is_not_zero(self) -> Self;

    /// Ensures the value is greater than zero.
    fn is_positive(self) -> Self;

    /// Ensures the value is not greater than zero.
    fn is_not_positive(self) -> Self;

    /// Ensures the value is a multiple of `divisor`.
    fn is_multiple_of(self, divisor: T) -> Self;

    /// Ensures the value is not a multiple of `divisor`.
    fn is_not_multiple_of(self, divisor: T) -> Self;

    /// Ensures the value has no fractional part.
    fn is_whole_number(self) -> Self;

    /// Ensures the value is neither infinite nor NaN.
    fn is_finite(self) -> Self;

    /// Ensures the value is not NaN.
    fn is_number(self) -> Self;
}

fn number_check<T: Number>(chain: Validator<T>, predicate: impl FnOnce(T) -> bool, text: &str) -> Validator<T> {
    chain.check(
        ErrorKind::InvalidArgument,
        |value| predicate(*value),
        |chain| chain.message_with_actual(text),
    )
}

// NaN fails every sign check, including the negated ones.
impl<T: Number> NumberChecks<T> for Validator<T> {
    fn is_negative(self) -> Self {
        number_check(self, |v| v < T::ZERO, "must be negative.")
    }

    fn is_not_negative(self) -> Self {
        number_check(self, |v| v >= T::ZERO, "may not be negative.")
    }

    fn is_zero(self) -> Self {
        number_check(self, |v| v == T::ZERO, "must be zero.")
    }

    fn is_not_zero(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |v| *v != T::ZERO,
            |chain| chain.message("may not be zero."),
        )
    }

    fn is_positive(self) -> Self {
        number_check(self, |v| v > T::ZERO, "must be positive.")
    }

    fn is_not_positive(self) -> Self {
        number_check(self, |v| v <= T::ZERO, "may not be positive.")
    }

    fn is_multiple_of(self, divisor: T) -> Self {
        let text = format!("must be a multiple of {}.", self.render(&divisor));
        number_check(self, |v| v.is_multiple_of(divisor), &text)
    }

    fn is_not_multiple_of(self, divisor: T) -> Self {
        let text = format!("may not be a multiple of {}.", self.render(&divisor));
        number_check(self, |v| !v.is_multiple_of(divisor), &text)
    }

    fn is_whole_number(self) -> Self {
        number_check(self, T::is_whole, "must be a whole number.")
    }

    fn is_finite(self) -> Self {
        number_check(self, T::is_finite, "must be finite.")
    }

    fn is_number(self) -> Self {
        number_check(self, |v| !v.is_nan(), "must be a well-defined number.")
    }
}

// ============================================================================
// TESTS
// ============================================================================
