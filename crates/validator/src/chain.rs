//! The validation chain.
//!
//! A [`Validator`] wraps one named value together with the configuration it
//! was created with, the shared context and the failures recorded so far.
//! Every check consumes the chain and returns it, so one expression can
//! validate many properties of the same value:
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! // Strict: stops at the first failure, reported by the terminal call.
//! let age = require_that(42, "age").is_not_negative().is_less_than(150).into_value()?;
//!
//! // Collecting: runs every check, reports every failure.
//! let failures = check_if(String::new(), "name").is_empty().is_not_empty().into_failures();
//! assert_eq!(failures.len(), 1);
//! ```
//!
//! # Modes
//!
//! The configuration decides what happens when a check fails:
//!
//! - `throw_on_failure = true` (strict, `require_that`): the failure is
//!   transformed by the configured [`ExceptionTransformer`](crate::config::ExceptionTransformer)
//!   and recorded as the chain's only failure; the value becomes undefined so
//!   no later check runs, and the terminal call returns it as `Err`.
//!   If the transformed error is an [`ErrorKind::Assertion`] (assertion mode,
//!   `assume_that`), it panics immediately instead.
//! - `throw_on_failure = false` (collecting, `check_if`): the failure is
//!   appended and the chain continues.

use std::any::Any;
use std::error::Error;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::config::Configuration;
use crate::foundation::{
    Cause, Context, ErrorKind, Outcome, TriState, UsageError, ValidationError, ValidationFailure,
    ValidationFailures, validate_name,
};
use crate::message::{MessageBuilder, NULL_TEXT, Rendered, quote_name};

/// A named value under validation.
#[must_use = "a validation chain reports failures only through its terminal call"]
pub struct Validator<T> {
    name: String,
    value: TriState<T>,
    config: Arc<Configuration>,
    context: Context,
    failures: Vec<ValidationFailure>,
}

/// Raises a usage error.
#[track_caller]
fn usage(error: UsageError) -> ! {
    panic!("{error}")
}

impl<T> Validator<T> {
    /// Creates a chain.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    #[track_caller]
    pub fn new(value: TriState<T>, name: impl Into<String>, config: Arc<Configuration>, context: Context) -> Self {
        let name = name.into();
        if let Err(error) = validate_name(&name) {
            usage(error);
        }
        Self {
            name,
            value,
            config,
            context,
            failures: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The name of the value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value, if present and non-null.
    pub fn value(&self) -> Option<&T> {
        self.value.get()
    }

    /// The value's tri-state.
    pub fn tri_state(&self) -> &TriState<T> {
        &self.value
    }

    /// The configuration the chain was created with.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Context shared by every failure of this chain.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns true if any check failed.
    pub fn validation_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    // ========================================================================
    // CHECK-AND-RECORD
    // ========================================================================

    /// Panics unless `name` can be added next to the chain's name and context.
    ///
    /// Context entries and named parameters share one namespace.
    ///
    /// # Panics
    ///
    /// Panics with the [`UsageError`] if the name is invalid, equal to the
    /// chain's name, reserved, or already in the context.
    #[track_caller]
    pub fn require_name_is_unique(&self, name: &str) {
        if let Err(error) = self.context.check_unique(name, &self.name) {
            usage(error);
        }
    }

    /// Adds an entry to the context shared by every failure of this chain.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not unique; see [`require_name_is_unique`](Self::require_name_is_unique).
    #[track_caller]
    pub fn with_context<V: Any + Debug>(mut self, name: &str, value: &V) -> Self {
        self.require_name_is_unique(name);
        let text = self.render(value);
        self.context.insert(name, text);
        self
    }

    /// Renders a value the way this chain's messages show it.
    pub fn render<V: Any + Debug>(&self, value: &V) -> String {
        Rendered::of(&self.config, value).into_text()
    }

    /// Starts a failure message about this value. `text` follows the quoted
    /// name, as in `"age" <text>`.
    pub fn message(&self, text: &str) -> MessageBuilder {
        MessageBuilder::new(
            Arc::clone(&self.config),
            format!("{} {text}", quote_name(&self.name)),
        )
        .with_chain_context(&self.context)
    }

    /// Like [`message`](Self::message), with an `Actual` line showing the value.
    pub fn message_with_actual(&self, text: &str) -> MessageBuilder
    where
        T: Any + Debug,
    {
        let builder = self.message(text);
        match &self.value {
            TriState::Value(value) => builder.with_value("Actual", value),
            TriState::Null => builder.with_context("Actual", NULL_TEXT),
            TriState::Undefined => builder,
        }
    }

    /// Runs one check.
    ///
    /// - A null value triggers the null hook: a [`ErrorKind::NullValue`]
    ///   failure is recorded and the value becomes undefined.
    /// - Otherwise the predicate is tested. If it does not hold, `message`
    ///   builds the failure message and the failure is recorded with `kind`.
    /// - An undefined value is only reported when nothing has been recorded
    ///   yet; otherwise its root cause is already on record.
    pub fn check(
        mut self,
        kind: ErrorKind,
        predicate: impl FnOnce(&T) -> bool,
        message: impl FnOnce(&Self) -> MessageBuilder,
    ) -> Self {
        if self.value.is_null() {
            self.on_null();
            return self;
        }
        let failed = match self.value.test(predicate) {
            Outcome::True => false,
            Outcome::False => true,
            Outcome::Undefined => self.failures.is_empty(),
        };
        if failed {
            let message = message(&self);
            self.add_failure(kind, message, None);
        }
        self
    }

    /// Runs a check that also accepts a null value.
    pub fn check_nullable(
        mut self,
        kind: ErrorKind,
        predicate: impl FnOnce(Option<&T>) -> bool,
        message: impl FnOnce(&Self) -> MessageBuilder,
    ) -> Self {
        let failed = match self.value.test_nullable(predicate) {
            Outcome::True => false,
            Outcome::False => true,
            Outcome::Undefined => self.failures.is_empty(),
        };
        if failed {
            let message = message(&self);
            self.add_failure(kind, message, None);
        }
        self
    }

    /// Records that the value was null where a value was required.
    fn on_null(&mut self) {
        let message = self.message("may not be null.");
        self.add_failure(ErrorKind::NullValue, message, None);
        self.value = TriState::Undefined;
    }

    /// Records a failure according to the configured mode.
    ///
    /// # Panics
    ///
    /// Panics if the configuration raises failures and the transformed error
    /// is an [`ErrorKind::Assertion`].
    #[track_caller]
    pub fn add_failure(&mut self, kind: ErrorKind, message: MessageBuilder, cause: Option<Cause>) {
        let failure = ValidationFailure::new(kind, message, cause);
        if !self.config.throw_on_failure() {
            tracing::trace!(name = %self.name, kind = %kind, "recorded validation failure");
            self.failures.push(failure);
            return;
        }

        let error = self.config.exception_transformer().apply(failure.to_error());
        if error.kind().is_fatal() {
            panic!("{error}");
        }
        tracing::debug!(
            name = %self.name,
            kind = %error.kind(),
            "validation failed; skipping remaining checks"
        );
        self.failures.push(ValidationFailure::from_error(error));
        self.value = TriState::Undefined;
    }

    // ========================================================================
    // CONVERSIONS
    // ========================================================================

    fn with_value<U>(self, name: String, value: TriState<U>) -> Validator<U> {
        Validator {
            name,
            value,
            config: self.config,
            context: self.context,
            failures: self.failures,
        }
    }

    /// Converts the value, keeping the name, context and failures.
    ///
    /// Undefined and null values are carried over unchanged.
    pub fn map<U>(mut self, convert: impl FnOnce(T) -> U) -> Validator<U> {
        let value = std::mem::replace(&mut self.value, TriState::Undefined).map_defined(convert);
        let name = std::mem::take(&mut self.name);
        self.with_value(name, value)
    }

    /// Converts the value with a conversion that may fail.
    ///
    /// On failure `on_error` builds the message, the conversion error becomes
    /// the failure's cause, and the converted chain is undefined. Failures
    /// recorded before the conversion stay visible afterwards.
    pub fn try_map<U, E>(
        mut self,
        convert: impl FnOnce(&T) -> Result<U, E>,
        on_error: impl FnOnce(&Self, &E) -> MessageBuilder,
    ) -> Validator<U>
    where
        E: Error + Send + Sync + 'static,
    {
        let converted = match &self.value {
            TriState::Undefined => Ok(TriState::Undefined),
            TriState::Null => Ok(TriState::Null),
            TriState::Value(value) => convert(value).map(TriState::Value),
        };
        let value = match converted {
            Ok(value) => value,
            Err(error) => {
                let message = on_error(&self, &error);
                self.add_failure(ErrorKind::InvalidArgument, message, Some(Arc::new(error)));
                TriState::Undefined
            }
        };
        let name = std::mem::take(&mut self.name);
        self.with_value(name, value)
    }

    /// Starts a child chain over a property of the value, such as its length.
    ///
    /// A null value triggers the null hook first; the child of a null or
    /// undefined value is undefined, so it reports nothing further. The
    /// parent's value is added to the child's context under the parent's name,
    /// unless the context already holds an entry with that name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    #[track_caller]
    pub fn derive<U>(mut self, name: impl Into<String>, project: impl FnOnce(&T) -> U) -> Validator<U>
    where
        T: Any + Debug,
    {
        let name = name.into();
        if let Err(error) = validate_name(&name) {
            usage(error);
        }
        if self.value.is_null() {
            self.on_null();
        }

        let value = self.value.as_ref().null_to_undefined().map_defined(project);
        if let Some(parent) = self.value.get() {
            let text = Rendered::of(&self.config, parent).into_text();
            self.context.insert_if_absent(self.name.clone(), text);
        }
        self.with_value(name, value)
    }

    // ========================================================================
    // TERMINALS
    // ========================================================================

    /// Consumes the chain, returning its failures.
    pub fn into_failures(self) -> ValidationFailures {
        self.failures.into()
    }

    /// Consumes the chain, returning `Err` if any check failed.
    ///
    /// Several collected failures are combined into one error; the
    /// configured transformer is applied to it.
    ///
    /// # Panics
    ///
    /// Panics if the transformed error is an [`ErrorKind::Assertion`].
    #[track_caller]
    pub fn into_result(self) -> Result<(), ValidationError> {
        match Self::combined_error(&self.config, self.failures) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Consumes the chain, returning the value if every check passed.
    ///
    /// A null value that passed every check has no `T` to return and is
    /// reported as a [`ErrorKind::NullValue`] error.
    ///
    /// # Panics
    ///
    /// Panics if the transformed error is an [`ErrorKind::Assertion`].
    #[track_caller]
    pub fn into_value(self) -> Result<T, ValidationError> {
        if let Some(error) = Self::combined_error(&self.config, self.failures) {
            return Err(error);
        }
        let name = quote_name(&self.name);
        match self.value {
            TriState::Value(value) => Ok(value),
            TriState::Null => Err(ValidationError::new(
                ErrorKind::NullValue,
                format!("{name} may not be null"),
            )),
            TriState::Undefined => Err(ValidationError::new(
                ErrorKind::InvalidArgument,
                format!("{name} has no value"),
            )),
        }
    }

    /// Consumes the chain, returning the value if it is present, non-null and
    /// passed every check, or `fallback` otherwise.
    pub fn value_or(self, fallback: T) -> T {
        if self.failures.is_empty() {
            self.value.unwrap_or(fallback)
        } else {
            fallback
        }
    }

    #[track_caller]
    fn combined_error(config: &Configuration, failures: Vec<ValidationFailure>) -> Option<ValidationError> {
        let error = ValidationFailures::from(failures).into_error()?;
        if config.throw_on_failure() {
            return Some(error);
        }
        let error = config.exception_transformer().apply(error);
        if error.kind().is_fatal() {
            panic!("{error}");
        }
        Some(error)
    }
}

impl<T: Debug> Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("context", &self.context)
            .field("failures", &self.failures.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
