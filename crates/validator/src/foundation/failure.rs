//! Recorded contract violations.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::error::{Cause, ErrorKind, ValidationError};
use crate::message::MessageBuilder;

/// Symbol prefixes of frames that belong to the library or to backtrace capture.
const INTERNAL_FRAMES: [&str; 4] = [
    "verity_validator::",
    "<verity_validator::",
    "std::backtrace",
    "<std::backtrace",
];

/// Removes the library's own frames from rendered backtrace text.
pub(crate) fn clean_backtrace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut skipping = false;
    for line in text.lines() {
        if let Some(symbol) = frame_symbol(line) {
            skipping = INTERNAL_FRAMES
                .iter()
                .any(|prefix| symbol.starts_with(prefix));
        }
        if !skipping {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Returns the symbol of a `  N: symbol` frame header line.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(symbol)
}

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

#[derive(Debug, Clone)]
enum Detail {
    /// Recorded without being raised; the message may not be rendered yet.
    Pending {
        builder: MessageBuilder,
        message: OnceLock<String>,
        cause: Option<Cause>,
        backtrace: Option<Arc<Backtrace>>,
        clean_backtrace: bool,
    },
    /// Already converted into the error that was raised.
    Raised(ValidationError),
}

/// One contract violation recorded by a chain.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    kind: ErrorKind,
    detail: Detail,
}

impl ValidationFailure {
    /// Records a violation.
    ///
    /// A backtrace is captured now (when enabled through `RUST_BACKTRACE`).
    /// The message is rendered now unless the configuration enables lazy
    /// exceptions.
    pub fn new(kind: ErrorKind, builder: MessageBuilder, cause: Option<Cause>) -> Self {
        let config = builder.configuration();
        let lazy = config.lazy_exceptions();
        let clean_backtrace = config.clean_stack_trace();

        let backtrace = Backtrace::capture();
        let backtrace = (backtrace.status() == BacktraceStatus::Captured).then(|| Arc::new(backtrace));

        let message = OnceLock::new();
        if !lazy {
            let _ = message.set(builder.render());
        }
        Self {
            kind,
            detail: Detail::Pending {
                builder,
                message,
                cause,
                backtrace,
                clean_backtrace,
            },
        }
    }

    /// Wraps an error that was already raised.
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            kind: error.kind(),
            detail: Detail::Raised(error),
        }
    }

    /// The failure kind.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The rendered message, rendering it on first access.
    pub fn message(&self) -> &str {
        match &self.detail {
            Detail::Pending { builder, message, .. } => message.get_or_init(|| builder.render()),
            Detail::Raised(error) => error.message(),
        }
    }

    /// Returns true if the message has been rendered.
    pub fn is_rendered(&self) -> bool {
        match &self.detail {
            Detail::Pending { message, .. } => message.get().is_some(),
            Detail::Raised(_) => true,
        }
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        match &self.detail {
            Detail::Pending { cause, .. } => cause.as_ref(),
            Detail::Raised(error) => error.cause(),
        }
    }

    /// Converts the failure into an error.
    pub fn to_error(&self) -> ValidationError {
        match &self.detail {
            Detail::Raised(error) => error.clone(),
            Detail::Pending {
                cause,
                backtrace,
                clean_backtrace: clean,
                ..
            } => {
                let mut error = ValidationError::new(self.kind, self.message().to_owned());
                if let Some(cause) = cause {
                    error = error.with_cause(Arc::clone(cause));
                }
                if let Some(backtrace) = backtrace {
                    let text = backtrace.to_string();
                    let text = if *clean {
                        clean_backtrace(&text)
                    } else {
                        text
                    };
                    error = error.with_backtrace(text);
                }
                error
            }
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// FAILURE COLLECTION
// ============================================================================

/// The failures recorded by one chain, in the order they occurred.
#[derive(Debug, Clone, Default)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a failure.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failures.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Iterates the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.failures.iter()
    }

    /// Rendered messages of every failure.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(ValidationFailure::message).collect()
    }

    /// Combines the failures into one error.
    ///
    /// Returns `None` if nothing failed and the failure itself if there is
    /// only one. Several failures become an [`ErrorKind::Multiple`] error
    /// listing every message, with each individual error kept as suppressed.
    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        match self.failures.len() {
            0 => None,
            1 => self.failures.first().map(ValidationFailure::to_error),
            _ => Some(
                ValidationError::new(ErrorKind::Multiple, self.to_string())
                    .with_suppressed(self.failures.iter().map(ValidationFailure::to_error)),
            ),
        }
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failures occurred", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let mut lines = failure.message().lines();
            write!(f, "\n\n{}. {}", i + 1, lines.next().unwrap_or_default())?;
            for line in lines {
                write!(f, "\n   {line}")?;
            }
        }
        Ok(())
    }
}

impl From<Vec<ValidationFailure>> for ValidationFailures {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }
}

impl FromIterator<ValidationFailure> for ValidationFailures {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
