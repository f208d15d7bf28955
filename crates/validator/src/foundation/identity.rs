//! Object identity for reference comparisons.
//!
//! A chain owns the value it validates, so the value itself never shares an
//! address with anything the caller holds. Identity is therefore taken from
//! what the value points at: two `Arc`s are the same object when they share
//! an allocation, two references when they point at the same place.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

/// Values that point at an object with its own identity.
pub trait Identity {
    /// Address of the object pointed at.
    fn address(&self) -> *const ();
}

impl<U: ?Sized> Identity for &U {
    fn address(&self) -> *const () {
        std::ptr::from_ref::<U>(*self).cast()
    }
}

impl<U: ?Sized> Identity for Box<U> {
    fn address(&self) -> *const () {
        std::ptr::from_ref::<U>(&**self).cast()
    }
}

impl<U: ?Sized> Identity for Rc<U> {
    fn address(&self) -> *const () {
        Rc::as_ptr(self).cast()
    }
}

impl<U: ?Sized> Identity for Arc<U> {
    fn address(&self) -> *const () {
        Arc::as_ptr(self).cast()
    }
}

/// Values compared by the equality checks.
///
/// Under [`EqualityMethod::Reference`](crate::config::EqualityMethod::Reference)
/// two values are equal when both have an [`identity`](Self::identity) and
/// it is the same object. Plain values have none and compare with
/// `PartialEq` in either mode.
///
/// Implement it with an empty block for your own types:
///
/// ```rust,ignore
/// #[derive(Debug, PartialEq)]
/// struct Version { major: u32 }
///
/// impl verity_validator::prelude::Equatable for Version {}
/// ```
pub trait Equatable: PartialEq {
    /// The object this value points at, or `None` for a plain value.
    fn identity(&self) -> Option<*const ()> {
        None
    }
}

impl<U: PartialEq + ?Sized> Equatable for &U {
    fn identity(&self) -> Option<*const ()> {
        Some(Identity::address(self))
    }
}

impl<U: PartialEq + ?Sized> Equatable for Box<U> {
    fn identity(&self) -> Option<*const ()> {
        Some(self.address())
    }
}

impl<U: PartialEq + ?Sized> Equatable for Rc<U> {
    fn identity(&self) -> Option<*const ()> {
        Some(self.address())
    }
}

impl<U: PartialEq + ?Sized> Equatable for Arc<U> {
    fn identity(&self) -> Option<*const ()> {
        Some(self.address())
    }
}

impl<U: Equatable> Equatable for Option<U> {
    fn identity(&self) -> Option<*const ()> {
        self.as_ref().and_then(Equatable::identity)
    }
}

macro_rules! impl_plain {
    ($($ty:ty),* $(,)?) => {
        $(impl Equatable for $ty {})*
    };
}

impl_plain!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, (),
    String,
);

impl<U: PartialEq> Equatable for Vec<U> {}
impl<U: PartialEq> Equatable for VecDeque<U> {}
impl<U: PartialEq, const N: usize> Equatable for [U; N] {}
impl<U: Ord> Equatable for BTreeSet<U> {}
impl<K: PartialEq, V: PartialEq> Equatable for BTreeMap<K, V> {}
impl<U: Eq + Hash, S: BuildHasher> Equatable for HashSet<U, S> {}
impl<K: Eq + Hash, V: PartialEq, S: BuildHasher> Equatable for HashMap<K, V, S> {}
impl<U: Eq + Hash, S: BuildHasher> Equatable for IndexSet<U, S> {}
impl<K: Eq + Hash, V: PartialEq, S: BuildHasher> Equatable for IndexMap<K, V, S> {}
impl<B: ToOwned + PartialEq + ?Sized> Equatable for Cow<'_, B> {}
impl<A: PartialEq, B: PartialEq> Equatable for (A, B) {}
impl<A: PartialEq, B: PartialEq, C: PartialEq> Equatable for (A, B, C) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointers_share_identity_with_their_clones() {
        let shared = Arc::new(String::from("value"));
        assert_eq!(Arc::clone(&shared).identity(), shared.identity());
        assert_ne!(Arc::new(String::from("value")).identity(), shared.identity());
    }

    #[test]
    fn plain_values_have_no_identity() {
        assert_eq!(5_i32.identity(), None);
        assert_eq!(String::from("x").identity(), None);
        assert_eq!(Some(5_i32).identity(), None);
    }

    #[test]
    fn options_take_the_identity_of_their_pointer() {
        let shared = Rc::new(3);
        assert_eq!(Some(Rc::clone(&shared)).identity(), shared.identity());
        assert_eq!(None::<Rc<i32>>.identity(), None);
    }
}
