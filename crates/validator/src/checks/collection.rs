//! Element checks for sequences and sets.

use std::any::Any;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexSet;

use super::render_list;
use crate::chain::Validator;
use crate::foundation::ErrorKind;

/// Containers whose elements can be searched.
pub trait Collection {
    /// The element type.
    type Item: PartialEq + Any + Debug;

    /// Iterates over the elements in order.
    fn items(&self) -> impl Iterator<Item = &Self::Item>;

    /// Returns true if `item` is an element.
    fn contains_item(&self, item: &Self::Item) -> bool {
        self.items().any(|element| element == item)
    }
}

impl<T: PartialEq + Any + Debug> Collection for Vec<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: PartialEq + Any + Debug> Collection for VecDeque<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: PartialEq + Any + Debug, const N: usize> Collection for [T; N] {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: PartialEq + Any + Debug> Collection for Box<[T]> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Eq + Hash + Any + Debug, S: BuildHasher> Collection for HashSet<T, S> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: Ord + Any + Debug> Collection for BTreeSet<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: Eq + Hash + Any + Debug, S: BuildHasher> Collection for IndexSet<T, S> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

/// Checks on the elements of a collection.
pub trait CollectionChecks<I>: Sized {
    /// Ensures `item` is an element.
    fn contains(self, item: &I) -> Self;

    /// Ensures `item` is not an element.
    fn does_not_contain(self, item: &I) -> Self;

    /// Ensures every one of `items` is an element.
    fn contains_all(self, items: &[I]) -> Self;

    /// Ensures no element appears twice.
    fn does_not_contain_duplicates(self) -> Self;
}

impl<C> CollectionChecks<C::Item> for Validator<C>
where
    C: Collection + Any + Debug,
{
    fn contains(self, item: &C::Item) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| value.contains_item(item),
            |chain| chain.message_with_actual(&format!("must contain {}.", chain.render(item))),
        )
    }

    fn does_not_contain(self, item: &C::Item) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| !value.contains_item(item),
            |chain| chain.message_with_actual(&format!("may not contain {}.", chain.render(item))),
        )
    }

    fn contains_all(self, items: &[C::Item]) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| items.iter().all(|item| value.contains_item(item)),
            |chain| {
                let missing = chain
                    .value()
                    .map(|value| items.iter().filter(|item| !value.contains_item(item)).collect::<Vec<_>>())
                    .unwrap_or_default();
                chain
                    .message_with_actual(&format!("must contain all of {}.", render_list(chain, items)))
                    .with_context("Missing", render_list(chain, missing))
            },
        )
    }

    fn does_not_contain_duplicates(self) -> Self {
        self.check(
            ErrorKind::InvalidArgument,
            |value| duplicates(value).is_empty(),
            |chain| {
                let found = chain.value().map(duplicates).unwrap_or_default();
                chain
                    .message_with_actual("may not contain any duplicate elements.")
                    .with_context("Duplicates", render_list(chain, found))
            },
        )
    }
}

/// Elements that appear more than once, each listed once, in order of first
/// repetition.
fn duplicates<C: Collection>(collection: &C) -> Vec<&C::Item> {
    let items: Vec<&C::Item> = collection.items().collect();
    let mut found: Vec<&C::Item> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if items[..index].contains(item) && !found.contains(item) {
            found.push(*item);
        }
    }
    found
}

// ============================================================================
// TESTS
// ============================================================================
