//! Validator factories.
//!
//! A [`ValidatorFactory`] owns the strict, assertion and collecting
//! configurations and creates chains bound to one of them. Factories are
//! `Send + Sync`; configuration may be updated while other threads create
//! validators, and every chain sees one complete configuration snapshot.
//!
//! The free functions [`require_that`], [`assume_that`] and [`check_if`]
//! use a process-wide default factory.

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::{Arc, LazyLock};

use crate::chain::Validator;
use crate::config::store::ConfigStore;
use crate::config::{Configuration, ConfigurationUpdater};
use crate::foundation::{Context, TriState};
use crate::message::Rendered;

/// Creates validation chains.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::prelude::*;
///
/// let factory = ValidatorFactory::new().with_context("request_id", &"r-17");
///
/// let port = factory.require_that(8080, "port").is_between(1024, 65536).into_value()?;
/// let failures = factory.check_if(-1, "retries").is_not_negative().into_failures();
/// ```
pub struct ValidatorFactory {
    store: ConfigStore,
    context: Context,
}

impl ValidatorFactory {
    /// Creates a factory with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_configuration(Configuration::default())
    }

    /// Creates a factory from a base configuration.
    ///
    /// The base always raises failures; its `throw_on_failure` is ignored.
    #[must_use]
    pub fn with_configuration(configuration: Configuration) -> Self {
        Self {
            store: ConfigStore::new(configuration),
            context: Context::new(),
        }
    }

    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// Validates a value, stopping at the first failure.
    ///
    /// The failure is returned by the chain's terminal call.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    #[track_caller]
    pub fn require_that<T>(&self, value: T, name: &str) -> Validator<T> {
        self.chain(TriState::value(value), name, self.store.strict())
    }

    /// Like [`require_that`](Self::require_that) for a value that may be null.
    #[track_caller]
    pub fn require_that_option<T>(&self, value: Option<T>, name: &str) -> Validator<T> {
        self.chain(TriState::from_option(value), name, self.store.strict())
    }

    /// Checks an internal invariant; the first failure panics.
    ///
    /// # Panics
    ///
    /// Panics on the first failed check, or if `name` is invalid.
    #[track_caller]
    pub fn assume_that<T>(&self, value: T, name: &str) -> Validator<T> {
        self.chain(TriState::value(value), name, self.store.assertion())
    }

    /// Like [`assume_that`](Self::assume_that) for a value that may be null.
    #[track_caller]
    pub fn assume_that_option<T>(&self, value: Option<T>, name: &str) -> Validator<T> {
        self.chain(TriState::from_option(value), name, self.store.assertion())
    }

    /// Validates a value, recording every failure.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    #[track_caller]
    pub fn check_if<T>(&self, value: T, name: &str) -> Validator<T> {
        self.chain(TriState::value(value), name, self.store.collecting())
    }

    /// Like [`check_if`](Self::check_if) for a value that may be null.
    #[track_caller]
    pub fn check_if_option<T>(&self, value: Option<T>, name: &str) -> Validator<T> {
        self.chain(TriState::from_option(value), name, self.store.collecting())
    }

    #[track_caller]
    fn chain<T>(&self, value: TriState<T>, name: &str, config: Arc<Configuration>) -> Validator<T> {
        Validator::new(value, name, config, self.context.clone())
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    /// The configuration used by `require_that`.
    pub fn configuration(&self) -> Arc<Configuration> {
        self.store.strict()
    }

    /// The configuration used by `assume_that`.
    pub fn assertion_configuration(&self) -> Arc<Configuration> {
        self.store.assertion()
    }

    /// The configuration used by `check_if`.
    pub fn collecting_configuration(&self) -> Arc<Configuration> {
        self.store.collecting()
    }

    /// Replaces the configuration.
    pub fn set_configuration(&self, configuration: Configuration) {
        self.store.update(|_| Some(configuration));
        tracing::debug!("replaced configuration");
    }

    /// Starts a scoped configuration update; see [`ConfigurationUpdater`].
    pub fn update_configuration(&self) -> ConfigurationUpdater<'_> {
        ConfigurationUpdater::new(&self.store)
    }

    /// Applies `update` to a new updater and publishes the result.
    ///
    /// Returns true if a new configuration was published. If `update`
    /// panics, the changes made so far are still published.
    pub fn update_configuration_with(&self, update: impl FnOnce(&mut ConfigurationUpdater<'_>)) -> bool {
        let mut updater = self.update_configuration();
        update(&mut updater);
        updater.close()
    }

    // ========================================================================
    // CONTEXT
    // ========================================================================

    /// Adds an entry to the context of every chain created afterwards.
    ///
    /// The value is rendered with the current configuration.
    ///
    /// # Panics
    ///
    /// Panics if `name` is invalid, reserved, or already in the context.
    #[must_use = "builder methods must be chained or built"]
    #[track_caller]
    pub fn with_context<V: Any + Debug>(mut self, name: &str, value: &V) -> Self {
        if let Err(error) = self.context.check_unique(name, "") {
            panic!("{error}");
        }
        let text = Rendered::of(&self.store.strict(), value).into_text();
        self.context.insert(name, text);
        self
    }

    /// Removes a context entry, returning its rendered value.
    pub fn remove_context(&mut self, name: &str) -> Option<String> {
        self.context.remove(name)
    }

    /// Context copied into every chain.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl Default for ValidatorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ValidatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFactory")
            .field("configuration", &self.store.strict())
            .field("context", &self.context)
            .finish()
    }
}

// ============================================================================
// DEFAULT FACTORY
// ============================================================================

static DEFAULT_FACTORY: LazyLock<ValidatorFactory> = LazyLock::new(ValidatorFactory::new);

/// The process-wide factory behind the free functions.
pub fn default_factory() -> &'static ValidatorFactory {
    &DEFAULT_FACTORY
}

/// Validates a value with the default factory; see [`ValidatorFactory::require_that`].
#[track_caller]
pub fn require_that<T>(value: T, name: &str) -> Validator<T> {
    DEFAULT_FACTORY.require_that(value, name)
}

/// Checks an invariant with the default factory; see [`ValidatorFactory::assume_that`].
#[track_caller]
pub fn assume_that<T>(value: T, name: &str) -> Validator<T> {
    DEFAULT_FACTORY.assume_that(value, name)
}

/// Collects failures with the default factory; see [`ValidatorFactory::check_if`].
#[track_caller]
pub fn check_if<T>(value: T, name: &str) -> Validator<T> {
    DEFAULT_FACTORY.check_if(value, name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EqualityMethod;

    #[test]
    fn entry_points_use_their_configuration() {
        let factory = ValidatorFactory::new();
        assert!(factory.require_that(1, "x").configuration().throw_on_failure());
        assert!(!factory.check_if(1, "x").configuration().throw_on_failure());

        let assertion = factory.assume_that(1, "x");
        assert!(assertion.configuration().throw_on_failure());
        assert!(!assertion.configuration().exception_transformer().is_identity());
    }

    #[test]
    fn option_entry_points_map_none_to_null() {
        let factory = ValidatorFactory::new();
        assert!(factory.check_if_option::<i32>(None, "x").tri_state().is_null());
        assert_eq!(factory.require_that_option(Some(4), "x").value(), Some(&4));
    }

    #[test]
    fn factory_context_reaches_every_chain() {
        let factory = ValidatorFactory::new().with_context("request", &7);
        let chain = factory.check_if(1, "x");
        assert_eq!(chain.context().get("request"), Some("7"));
    }

    #[test]
    fn removed_context_is_not_copied() {
        let mut factory = ValidatorFactory::new().with_context("request", &7);
        assert_eq!(factory.remove_context("request").as_deref(), Some("7"));
        assert!(factory.check_if(1, "x").context().is_empty());
    }

    #[test]
    #[should_panic(expected = "\"Actual\" is reserved")]
    fn reserved_factory_context_panics() {
        let _ = ValidatorFactory::new().with_context("Actual", &1);
    }

    #[test]
    fn chains_keep_the_snapshot_they_were_created_with() {
        let factory = ValidatorFactory::new();
        let before = factory.check_if(1, "x");
        factory.update_configuration_with(|updater| {
            updater.set_equality_method(EqualityMethod::Reference);
        });
        let after = factory.check_if(1, "x");

        assert_eq!(before.configuration().equality_method(), EqualityMethod::Value);
        assert_eq!(after.configuration().equality_method(), EqualityMethod::Reference);
    }

    #[test]
    fn set_configuration_keeps_modes() {
        let factory = ValidatorFactory::new();
        factory.set_configuration(Configuration::default().with_allow_diff(false).with_throw_on_failure(false));

        assert!(factory.configuration().throw_on_failure());
        assert!(!factory.collecting_configuration().throw_on_failure());
        assert!(!factory.assertion_configuration().allow_diff());
    }

    #[test]
    fn default_factory_is_shared() {
        assert!(std::ptr::eq(default_factory(), default_factory()));
        assert!(require_that(3, "x").into_value().is_ok());
    }
}
