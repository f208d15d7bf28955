//! Ordered, uniquely-keyed context entries and name rules.

use indexmap::IndexMap;

use super::error::UsageError;

/// Keys written by diff output; user context may not use them.
pub const RESERVED_NAMES: [&str; 3] = ["Actual", "Expected", "Diff"];

/// Checks that `name` can name a value, parameter or context entry.
pub fn validate_name(name: &str) -> Result<(), UsageError> {
    if name.is_empty() {
        return Err(UsageError::EmptyName);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(UsageError::WhitespaceInName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|reserved| {
        name.strip_prefix(reserved)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('@') || rest.starts_with('.'))
    })
}

/// Context entries in insertion order, each key at most once.
///
/// Values are stored already rendered to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: IndexMap<String, String>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that `name` may be added next to `value_name` and the existing entries.
    pub fn check_unique(&self, name: &str, value_name: &str) -> Result<(), UsageError> {
        validate_name(name)?;
        if name == value_name {
            return Err(UsageError::SameAsValueName {
                name: name.to_owned(),
            });
        }
        if is_reserved(name) {
            return Err(UsageError::ReservedName {
                name: name.to_owned(),
            });
        }
        if self.entries.contains_key(name) {
            return Err(UsageError::DuplicateName {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Adds an entry, replacing any previous value under the same key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Adds an entry unless the key is already present.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Adds every entry of `other` whose key is not already present.
    pub fn merge_absent(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.insert_if_absent(name, value);
        }
    }

    /// Removes an entry, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    /// Returns the value under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns true if `name` is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.insert(name, value);
        }
        context
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UsageError::EmptyName)]
    #[case("first name", UsageError::WhitespaceInName { name: "first name".into() })]
    #[case("age", UsageError::SameAsValueName { name: "age".into() })]
    #[case("Actual", UsageError::ReservedName { name: "Actual".into() })]
    #[case("Expected@2", UsageError::ReservedName { name: "Expected@2".into() })]
    #[case("limit", UsageError::DuplicateName { name: "limit".into() })]
    fn rejected_names(#[case] name: &str, #[case] expected: UsageError) {
        let context: Context = [("limit", "10")].into_iter().collect();
        assert_eq!(context.check_unique(name, "age"), Err(expected));
    }

    #[rstest]
    #[case("minimum")]
    #[case("name.length()")]
    #[case("Actually")]
    fn accepted_names(#[case] name: &str) {
        let context: Context = [("limit", "10")].into_iter().collect();
        assert_eq!(context.check_unique(name, "age"), Ok(()));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut context = Context::new();
        context.insert("b", "2");
        context.insert("a", "1");
        context.insert("c", "3");
        context.remove("a");

        let keys: Vec<&str> = context.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn merge_keeps_existing_values() {
        let mut failure: Context = [("Actual", "5")].into_iter().collect();
        let chain: Context = [("Actual", "ignored"), ("request", "42")].into_iter().collect();
        failure.merge_absent(&chain);

        assert_eq!(failure.get("Actual"), Some("5"));
        assert_eq!(failure.get("request"), Some("42"));
        assert_eq!(failure.len(), 2);
    }
}
