//! Per-type string conversion for values shown in failure messages.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ConverterFn = dyn Fn(&dyn Any) -> Option<String> + Send + Sync;

/// Table of functions that render values of a given type.
///
/// Types without an entry fall back to their default rendering. The table
/// is copy-on-write: cloning is cheap and a published table is never
/// modified in place.
///
/// ```rust,ignore
/// use std::time::Duration;
/// use verity_validator::config::StringConverters;
///
/// let mut converters = StringConverters::new();
/// converters.insert(|d: &Duration| format!("{}ms", d.as_millis()));
/// assert_eq!(converters.convert(&Duration::from_secs(1)).as_deref(), Some("1000ms"));
/// ```
#[derive(Clone, Default)]
pub struct StringConverters {
    converters: Arc<HashMap<TypeId, Arc<ConverterFn>>>,
}

impl StringConverters {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the converter for `V`, replacing any previous one.
    pub fn insert<V: Any>(&mut self, converter: impl Fn(&V) -> String + Send + Sync + 'static) -> &mut Self {
        let converter: Arc<ConverterFn> =
            Arc::new(move |value: &dyn Any| value.downcast_ref::<V>().map(&converter));
        Arc::make_mut(&mut self.converters).insert(TypeId::of::<V>(), converter);
        self
    }

    /// Removes the converter for `V`. Returns true if one was registered.
    pub fn remove<V: Any>(&mut self) -> bool {
        if !self.contains::<V>() {
            return false;
        }
        Arc::make_mut(&mut self.converters)
            .remove(&TypeId::of::<V>())
            .is_some()
    }

    /// Returns true if `V` has a converter.
    #[must_use]
    pub fn contains<V: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<V>())
    }

    /// Renders `value` with its registered converter, if any.
    #[must_use]
    pub fn convert<V: Any>(&self, value: &V) -> Option<String> {
        self.converters
            .get(&TypeId::of::<V>())
            .and_then(|converter| converter(value))
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns true if no converter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Returns true if both tables are the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.converters, &other.converters)
    }
}

impl fmt::Debug for StringConverters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringConverters")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_registered_types_only() {
        let mut converters = StringConverters::new();
        converters.insert(|v: &i32| format!("int {v}"));

        assert_eq!(converters.convert(&7_i32).as_deref(), Some("int 7"));
        assert_eq!(converters.convert(&7_i64), None);
    }

    #[test]
    fn clones_are_copy_on_write() {
        let mut original = StringConverters::new();
        original.insert(|v: &bool| if *v { "yes".into() } else { "no".into() });
        let published = original.clone();
        assert!(original.ptr_eq(&published));

        original.remove::<bool>();
        assert!(!original.ptr_eq(&published));
        assert!(published.contains::<bool>());
        assert!(!original.contains::<bool>());
    }

    #[test]
    fn removing_missing_converter_keeps_instance() {
        let mut converters = StringConverters::new();
        let before = converters.clone();
        assert!(!converters.remove::<u8>());
        assert!(converters.ptr_eq(&before));
    }
}
