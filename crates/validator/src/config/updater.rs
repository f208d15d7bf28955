//! Scoped configuration changes.

use verity_diff::TerminalEncoding;

use super::configuration::{Configuration, EqualityMethod};
use super::converters::StringConverters;
use super::settings::ConfigurationSettings;
use super::store::ConfigStore;
use super::transformer::ExceptionTransformer;

/// Collects configuration changes and publishes them as one new snapshot.
///
/// The updater starts from the factory's current configuration. Changes are
/// published when [`close`](Self::close) is called or the updater is dropped,
/// including during unwinding, and only if a field actually changed.
/// `throw_on_failure` is owned by the validation mode and cannot be changed
/// here.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::prelude::*;
///
/// let factory = ValidatorFactory::new();
/// {
///     let mut updater = factory.update_configuration();
///     updater.set_allow_diff(false).set_equality_method(EqualityMethod::Reference);
/// } // published here
/// assert!(!factory.configuration().allow_diff());
/// ```
#[must_use = "dropping the updater immediately publishes nothing"]
pub struct ConfigurationUpdater<'a> {
    store: &'a ConfigStore,
    original: Configuration,
    clean_stack_trace: bool,
    allow_diff: bool,
    equality_method: EqualityMethod,
    terminal_encoding: TerminalEncoding,
    string_converters: StringConverters,
    lazy_exceptions: bool,
    exception_transformer: ExceptionTransformer,
    closed: bool,
}

impl<'a> ConfigurationUpdater<'a> {
    pub(crate) fn new(store: &'a ConfigStore) -> Self {
        let original = (*store.strict()).clone();
        Self {
            store,
            clean_stack_trace: original.clean_stack_trace(),
            allow_diff: original.allow_diff(),
            equality_method: original.equality_method(),
            terminal_encoding: original.terminal_encoding(),
            string_converters: original.string_converters().clone(),
            lazy_exceptions: original.lazy_exceptions(),
            exception_transformer: original.exception_transformer().clone(),
            original,
            closed: false,
        }
    }

    /// Current value of `clean_stack_trace` in the working copy.
    pub fn clean_stack_trace(&self) -> bool {
        self.clean_stack_trace
    }

    /// Sets whether the library's own frames are removed from backtraces.
    pub fn set_clean_stack_trace(&mut self, clean_stack_trace: bool) -> &mut Self {
        self.clean_stack_trace = clean_stack_trace;
        self
    }

    /// Current value of `allow_diff` in the working copy.
    pub fn allow_diff(&self) -> bool {
        self.allow_diff
    }

    /// Sets whether messages may include a diff.
    pub fn set_allow_diff(&mut self, allow_diff: bool) -> &mut Self {
        self.allow_diff = allow_diff;
        self
    }

    /// Current equality method in the working copy.
    pub fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// Sets how equality checks compare values.
    pub fn set_equality_method(&mut self, equality_method: EqualityMethod) -> &mut Self {
        self.equality_method = equality_method;
        self
    }

    /// Current terminal encoding in the working copy.
    pub fn terminal_encoding(&self) -> TerminalEncoding {
        self.terminal_encoding
    }

    /// Sets how diffs are written: a marker row or ANSI colors.
    pub fn set_terminal_encoding(&mut self, terminal_encoding: TerminalEncoding) -> &mut Self {
        self.terminal_encoding = terminal_encoding;
        self
    }

    /// Current value of `lazy_exceptions` in the working copy.
    pub fn lazy_exceptions(&self) -> bool {
        self.lazy_exceptions
    }

    /// Sets whether message rendering is deferred.
    pub fn set_lazy_exceptions(&mut self, lazy_exceptions: bool) -> &mut Self {
        self.lazy_exceptions = lazy_exceptions;
        self
    }

    /// The working copy of the converter table.
    ///
    /// The table is copied on first modification; the published one is untouched.
    pub fn string_converters_mut(&mut self) -> &mut StringConverters {
        &mut self.string_converters
    }

    /// Sets the function applied to errors before they are raised.
    pub fn set_exception_transformer(&mut self, exception_transformer: ExceptionTransformer) -> &mut Self {
        self.exception_transformer = exception_transformer;
        self
    }

    /// Applies every field of `settings`.
    pub fn apply_settings(&mut self, settings: &ConfigurationSettings) -> &mut Self {
        self.set_clean_stack_trace(settings.clean_stack_trace)
            .set_allow_diff(settings.allow_diff)
            .set_equality_method(settings.equality_method)
            .set_terminal_encoding(settings.terminal_encoding)
            .set_lazy_exceptions(settings.lazy_exceptions)
    }

    /// Names of the fields that differ from the configuration this updater started from.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let original = &self.original;
        let mut changed = Vec::new();
        if self.clean_stack_trace != original.clean_stack_trace() {
            changed.push("clean_stack_trace");
        }
        if self.allow_diff != original.allow_diff() {
            changed.push("allow_diff");
        }
        if self.equality_method != original.equality_method() {
            changed.push("equality_method");
        }
        if self.terminal_encoding != original.terminal_encoding() {
            changed.push("terminal_encoding");
        }
        if !self.string_converters.ptr_eq(original.string_converters()) {
            changed.push("string_converters");
        }
        if self.lazy_exceptions != original.lazy_exceptions() {
            changed.push("lazy_exceptions");
        }
        if !self.exception_transformer.ptr_eq(original.exception_transformer()) {
            changed.push("exception_transformer");
        }
        changed
    }

    /// Publishes the changes. Returns true if a new configuration was published.
    ///
    /// Dropping the updater has the same effect.
    pub fn close(mut self) -> bool {
        self.commit()
    }

    fn commit(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;

        let changed = self.changed_fields();
        if changed.is_empty() {
            return false;
        }

        let working = Configuration::new()
            .with_clean_stack_trace(self.clean_stack_trace)
            .with_allow_diff(self.allow_diff)
            .with_equality_method(self.equality_method)
            .with_terminal_encoding(self.terminal_encoding)
            .with_string_converters(self.string_converters.clone())
            .with_lazy_exceptions(self.lazy_exceptions)
            .with_exception_transformer(self.exception_transformer.clone());
        let published = self.store.update(|current| {
            Some(working.with_throw_on_failure(current.throw_on_failure()))
        });
        if published {
            tracing::debug!(changed = ?changed, "published configuration");
        }
        published
    }
}

impl Drop for ConfigurationUpdater<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn unchanged_updater_publishes_nothing() {
        let store = ConfigStore::new(Configuration::default());
        let before = store.strict();
        let updater = ConfigurationUpdater::new(&store);
        assert!(!updater.close());
        assert!(Arc::ptr_eq(&before, &store.strict()));
    }

    #[test]
    fn setting_the_same_value_is_not_a_change() {
        let store = ConfigStore::new(Configuration::default());
        let mut updater = ConfigurationUpdater::new(&store);
        updater.set_allow_diff(true).set_lazy_exceptions(true);
        assert!(updater.changed_fields().is_empty());
    }

    #[test]
    fn drop_publishes_changes() {
        let store = ConfigStore::new(Configuration::default());
        {
            let mut updater = ConfigurationUpdater::new(&store);
            updater.set_allow_diff(false);
        }
        assert!(!store.strict().allow_diff());
        assert!(!store.collecting().allow_diff());
    }

    #[test]
    fn terminal_encoding_changes_are_published() {
        let store = ConfigStore::new(Configuration::default());
        let mut updater = ConfigurationUpdater::new(&store);
        assert_eq!(updater.terminal_encoding(), TerminalEncoding::TextOnly);
        updater.set_terminal_encoding(TerminalEncoding::Rgb888Colors);
        assert_eq!(updater.changed_fields(), vec!["terminal_encoding"]);
        assert!(updater.close());
        assert_eq!(store.collecting().terminal_encoding(), TerminalEncoding::Rgb888Colors);
    }

    #[test]
    fn converter_changes_are_detected() {
        let store = ConfigStore::new(Configuration::default());
        let mut updater = ConfigurationUpdater::new(&store);
        updater.string_converters_mut().insert(|v: &u8| format!("byte {v}"));
        assert_eq!(updater.changed_fields(), vec!["string_converters"]);
        assert!(updater.close());
        assert!(store.assertion().string_converters().contains::<u8>());
    }

    #[test]
    fn mode_overrides_survive_updates() {
        let store = ConfigStore::new(Configuration::default());
        let mut updater = ConfigurationUpdater::new(&store);
        updater.set_exception_transformer(ExceptionTransformer::new(|e| e));
        assert!(updater.close());

        assert!(store.strict().throw_on_failure());
        assert!(!store.collecting().throw_on_failure());
        assert!(!store.assertion().exception_transformer().is_identity());
    }
}
