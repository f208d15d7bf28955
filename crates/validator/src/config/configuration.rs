//! Immutable validation settings.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use verity_diff::TerminalEncoding;

use super::converters::StringConverters;
use super::settings::ConfigurationSettings;
use super::transformer::ExceptionTransformer;
use crate::foundation::Equatable;

/// How equality checks compare values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMethod {
    /// Compare with `PartialEq`.
    #[default]
    Value,
    /// Compare identities: two pointers are equal only if they point at the
    /// same object. Values without an identity compare with `PartialEq`.
    Reference,
}

impl EqualityMethod {
    /// Compares `actual` with `expected`.
    pub fn equals<E: Equatable + ?Sized>(self, actual: &E, expected: &E) -> bool {
        match self {
            Self::Value => actual == expected,
            Self::Reference => match (actual.identity(), expected.identity()) {
                (Some(actual), Some(expected)) => std::ptr::eq(actual, expected),
                _ => actual == expected,
            },
        }
    }
}

/// A snapshot of validation behaviour.
///
/// Snapshots are immutable once shared: a factory replaces its configuration
/// wholesale and chains keep the snapshot they were created with.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::config::{Configuration, EqualityMethod};
///
/// let config = Configuration::default()
///     .with_allow_diff(false)
///     .with_equality_method(EqualityMethod::Reference);
/// assert!(!config.allow_diff());
/// ```
#[derive(Clone)]
pub struct Configuration {
    clean_stack_trace: bool,
    allow_diff: bool,
    equality_method: EqualityMethod,
    terminal_encoding: TerminalEncoding,
    string_converters: StringConverters,
    lazy_exceptions: bool,
    throw_on_failure: bool,
    exception_transformer: ExceptionTransformer,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            clean_stack_trace: true,
            allow_diff: true,
            equality_method: EqualityMethod::Value,
            terminal_encoding: TerminalEncoding::TextOnly,
            string_converters: StringConverters::new(),
            lazy_exceptions: true,
            throw_on_failure: true,
            exception_transformer: ExceptionTransformer::identity(),
        }
    }
}

impl Configuration {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the library's own frames are removed from captured backtraces.
    pub const fn clean_stack_trace(&self) -> bool {
        self.clean_stack_trace
    }

    /// Returns true if failure messages may include a diff of actual and expected values.
    pub const fn allow_diff(&self) -> bool {
        self.allow_diff
    }

    /// How equality checks compare values.
    pub const fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// How diffs are written: a plain marker row, or ANSI colors in place.
    pub const fn terminal_encoding(&self) -> TerminalEncoding {
        self.terminal_encoding
    }

    /// Per-type converters used to render values.
    pub const fn string_converters(&self) -> &StringConverters {
        &self.string_converters
    }

    /// Returns true if message rendering is deferred until a failure is read.
    pub const fn lazy_exceptions(&self) -> bool {
        self.lazy_exceptions
    }

    /// Returns true if the first failure is raised instead of collected.
    pub const fn throw_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// Applied to every error before it is raised.
    pub const fn exception_transformer(&self) -> &ExceptionTransformer {
        &self.exception_transformer
    }

    /// Sets [`clean_stack_trace`](Self::clean_stack_trace).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_clean_stack_trace(mut self, clean_stack_trace: bool) -> Self {
        self.clean_stack_trace = clean_stack_trace;
        self
    }

    /// Sets [`allow_diff`](Self::allow_diff).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_allow_diff(mut self, allow_diff: bool) -> Self {
        self.allow_diff = allow_diff;
        self
    }

    /// Sets [`equality_method`](Self::equality_method).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_equality_method(mut self, equality_method: EqualityMethod) -> Self {
        self.equality_method = equality_method;
        self
    }

    /// Sets [`terminal_encoding`](Self::terminal_encoding).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_terminal_encoding(mut self, terminal_encoding: TerminalEncoding) -> Self {
        self.terminal_encoding = terminal_encoding;
        self
    }

    /// Sets [`string_converters`](Self::string_converters).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_string_converters(mut self, string_converters: StringConverters) -> Self {
        self.string_converters = string_converters;
        self
    }

    /// Sets [`lazy_exceptions`](Self::lazy_exceptions).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_lazy_exceptions(mut self, lazy_exceptions: bool) -> Self {
        self.lazy_exceptions = lazy_exceptions;
        self
    }

    /// Sets [`throw_on_failure`](Self::throw_on_failure).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_throw_on_failure(mut self, throw_on_failure: bool) -> Self {
        self.throw_on_failure = throw_on_failure;
        self
    }

    /// Sets [`exception_transformer`](Self::exception_transformer).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_exception_transformer(mut self, exception_transformer: ExceptionTransformer) -> Self {
        self.exception_transformer = exception_transformer;
        self
    }

    /// Applies serialized settings on top of this configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_settings(self, settings: &ConfigurationSettings) -> Self {
        self.with_clean_stack_trace(settings.clean_stack_trace)
            .with_allow_diff(settings.allow_diff)
            .with_equality_method(settings.equality_method)
            .with_terminal_encoding(settings.terminal_encoding)
            .with_lazy_exceptions(settings.lazy_exceptions)
    }

    /// The serializable part of this configuration.
    #[must_use]
    pub fn settings(&self) -> ConfigurationSettings {
        ConfigurationSettings {
            clean_stack_trace: self.clean_stack_trace,
            allow_diff: self.allow_diff,
            equality_method: self.equality_method,
            terminal_encoding: self.terminal_encoding,
            lazy_exceptions: self.lazy_exceptions,
        }
    }

    /// The configuration used by `assume_that`: raises like this one, but
    /// every raised error becomes an assertion failure.
    #[must_use]
    pub fn derive_assertion(&self) -> Self {
        let mut derived = self.clone();
        derived.throw_on_failure = true;
        derived.exception_transformer = self
            .exception_transformer
            .then(&ExceptionTransformer::to_assertion());
        derived
    }

    /// The configuration used by `check_if`: failures are recorded, never raised.
    #[must_use]
    pub fn derive_collecting(&self) -> Self {
        let mut derived = self.clone();
        derived.throw_on_failure = false;
        derived
    }

    /// Renders `value` with its registered converter.
    ///
    /// Returns `None` if no converter is registered for `V`.
    pub fn convert<V: Any>(&self, value: &V) -> Option<String> {
        self.string_converters.convert(value)
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.clean_stack_trace == other.clean_stack_trace
            && self.allow_diff == other.allow_diff
            && self.equality_method == other.equality_method
            && self.terminal_encoding == other.terminal_encoding
            && self.lazy_exceptions == other.lazy_exceptions
            && self.throw_on_failure == other.throw_on_failure
            && self.string_converters.ptr_eq(&other.string_converters)
            && self.exception_transformer.ptr_eq(&other.exception_transformer)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("clean_stack_trace", &self.clean_stack_trace)
            .field("allow_diff", &self.allow_diff)
            .field("equality_method", &self.equality_method)
            .field("terminal_encoding", &self.terminal_encoding)
            .field("string_converters", &self.string_converters)
            .field("lazy_exceptions", &self.lazy_exceptions)
            .field("throw_on_failure", &self.throw_on_failure)
            .field("exception_transformer", &self.exception_transformer)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::foundation::{ErrorKind, ValidationError};

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert!(config.clean_stack_trace());
        assert!(config.allow_diff());
        assert_eq!(config.equality_method(), EqualityMethod::Value);
        assert_eq!(config.terminal_encoding(), TerminalEncoding::TextOnly);
        assert!(config.string_converters().is_empty());
        assert!(config.lazy_exceptions());
        assert!(config.throw_on_failure());
        assert!(config.exception_transformer().is_identity());
    }

    #[test]
    fn assertion_derivation_forces_assertion_kind() {
        let derived = Configuration::default()
            .with_throw_on_failure(false)
            .derive_assertion();
        assert!(derived.throw_on_failure());

        let error = derived
            .exception_transformer()
            .apply(ValidationError::new(ErrorKind::InvalidArgument, "message"));
        assert_eq!(error.kind(), ErrorKind::Assertion);
        assert_eq!(error.message(), "message");
    }

    #[test]
    fn collecting_derivation_keeps_other_fields() {
        let base = Configuration::default()
            .with_allow_diff(false)
            .with_equality_method(EqualityMethod::Reference);
        let derived = base.derive_collecting();

        assert!(!derived.throw_on_failure());
        assert!(!derived.allow_diff());
        assert_eq!(derived.equality_method(), EqualityMethod::Reference);
        assert_eq!(derived, base.clone().with_throw_on_failure(false));
    }

    #[test]
    fn value_and_reference_equality() {
        let a = Arc::new(String::from("same"));
        let b = Arc::new(String::from("same"));
        assert!(EqualityMethod::Value.equals(&a, &b));
        assert!(!EqualityMethod::Reference.equals(&a, &b));
        assert!(EqualityMethod::Reference.equals(&a, &Arc::clone(&a)));
    }

    #[test]
    fn reference_equality_falls_back_to_values_without_identity() {
        assert!(EqualityMethod::Reference.equals(&5, &5));
        assert!(!EqualityMethod::Reference.equals(&String::from("a"), &String::from("b")));
    }

    #[test]
    fn settings_round_trip_through_configuration() {
        let config = Configuration::default()
            .with_allow_diff(false)
            .with_terminal_encoding(TerminalEncoding::Xterm256Colors);
        let restored = Configuration::default().with_settings(&config.settings());
        assert_eq!(restored, config);
    }
}
