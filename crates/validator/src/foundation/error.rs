//! Error types.
//!
//! Two families of errors exist and never mix:
//!
//! - [`ValidationError`]: a declared contract was violated by the value under
//!   test. Depending on the mode it is returned, collected, or raised as an
//!   assertion failure.
//! - [`UsageError`]: the library was called incorrectly (bad or duplicate
//!   names). These are programmer mistakes and always panic, in every mode.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shareable cause attached to a [`ValidationError`].
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

// ============================================================================
// ERROR KIND
// ============================================================================

/// The kind of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// The value violated a contract.
    InvalidArgument,
    /// The value was null where a non-null value was required.
    NullValue,
    /// An internal invariant was violated.
    ///
    /// Raising an error of this kind panics instead of returning it, so it
    /// cannot be handled like an ordinary failure.
    Assertion,
    /// Several failures combined into one error.
    Multiple,
}

impl ErrorKind {
    /// Stable identifier used in messages and JSON output.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NullValue => "null_value",
            Self::Assertion => "assertion",
            Self::Multiple => "multiple",
        }
    }

    /// Returns true if raising this kind must abort rather than return.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Assertion)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A contract violation, ready to be returned or raised.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new(ErrorKind::InvalidArgument, "\"age\" may not be negative.\nActual: -5");
/// assert!(error.to_string().contains("\"age\""));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    cause: Option<Cause>,
    suppressed: Vec<ValidationError>,
    backtrace: Option<String>,
}

impl ValidationError {
    /// Creates an error from a kind and a fully rendered message.
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            suppressed: Vec::new(),
            backtrace: None,
        }
    }

    /// Sets the underlying cause.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Adds errors that were suppressed in favour of this one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_suppressed(mut self, errors: impl IntoIterator<Item = ValidationError>) -> Self {
        self.suppressed.extend(errors);
        self
    }

    /// Attaches rendered backtrace text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Changes the kind, keeping the message, cause, suppressed errors and backtrace.
    #[must_use = "builder methods must be chained or built"]
    pub fn into_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// The error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The rendered message, including context lines.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Errors suppressed in favour of this one.
    #[must_use]
    pub fn suppressed(&self) -> &[ValidationError] {
        &self.suppressed
    }

    /// Rendered backtrace text, if one was captured.
    #[must_use]
    pub fn backtrace(&self) -> Option<&str> {
        self.backtrace.as_deref()
    }

    /// Converts the error to a JSON structure.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind.code(),
            "message": self.message,
            "cause": self.cause.as_ref().map(ToString::to_string),
            "suppressed": self.suppressed.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, "\nCaused by: {cause}")?;
        }
        Ok(())
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

// ============================================================================
// USAGE ERROR
// ============================================================================

/// The library was called incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UsageError {
    /// A name was empty.
    #[error("name may not be empty")]
    EmptyName,

    /// A name contained whitespace.
    #[error("name may not contain whitespace: {name:?}")]
    WhitespaceInName {
        /// The offending name.
        name: String,
    },

    /// A parameter or context name repeated the name of the value being validated.
    #[error("{name:?} is already the name of the value being validated")]
    SameAsValueName {
        /// The offending name.
        name: String,
    },

    /// A context name was already in use.
    #[error("{name:?} is already used as a context name")]
    DuplicateName {
        /// The offending name.
        name: String,
    },

    /// A name is reserved for diff output.
    #[error("{name:?} is reserved")]
    ReservedName {
        /// The offending name.
        name: String,
    },
}

// ============================================================================
// TESTS
// ============================================================================
