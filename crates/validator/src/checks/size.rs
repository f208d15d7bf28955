//! Size checks for text and containers.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::chain::Validator;
use crate::foundation::ErrorKind;

/// Values with a size.
pub trait Sizeable {
    /// What the size is called in messages: `length` for text, `size` otherwise.
    const SIZE_NAME: &'static str;

    /// Number of characters or elements.
    fn size(&self) -> usize;
}

macro_rules! impl_text_size {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sizeable for $ty {
                const SIZE_NAME: &'static str = "length";

                fn size(&self) -> usize {
                    self.chars().count()
                }
            }
        )*
    };
}

impl_text_size!(String, &str, Box<str>, Arc<str>, Cow<'_, str>);

macro_rules! impl_container_size {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Sizeable for $ty {
                const SIZE_NAME: &'static str = "size";

                fn size(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

impl_container_size!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] Box<[T]>,
    [T] &[T],
    [T, S] HashSet<T, S>,
    [T] BTreeSet<T>,
    [K, V, S] HashMap<K, V, S>,
    [K, V] BTreeMap<K, V>,
    [T, S] IndexSet<T, S>,
    [K, V, S] IndexMap<K, V, S>,
);

impl<T, const N: usize> Sizeable for [T; N] {
    const SIZE_NAME: &'static str = "size";

    fn size(&self) -> usize {
        N
    }
}

/// Checks for text and containers.
pub trait SizeChecks: Sized {
    /// Ensures the value has no characters or elements.
    fn is_empty(self) -> Self;

    /// Ensures the value has at least one character or element.
    fn is_not_empty(self) -> Self;

    /// Continues with a chain over the value's size, named `name.length()`
    /// for text and `name.size()` otherwise.
    ///
    /// ```rust,ignore
    /// check_if(name, "name").size().is_between(1, 64)
    /// ```
    #[must_use]
    fn size(self) -> Validator<usize>;
}

impl<T: Sizeable + Any + Debug> SizeChecks for Validator<T> {
    fn is_empty(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| value.size() == 0,
            |chain| chain.message_with_actual("must be empty."),
        )
    }

    fn is_not_empty(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| value.size() != 0,
            |chain| chain.message("may not be empty."),
        )
    }

    fn size(self) -> Validator<usize> {
        let name = format!("{}.{}()", self.name(), T::SIZE_NAME);
        self.derive(name, |value| value.size())
    }
}

// ============================================================================
// TESTS
// ============================================================================
