//! Functions applied to errors before they are raised.

use std::fmt;
use std::sync::Arc;

use crate::foundation::{ErrorKind, ValidationError};

type TransformFn = dyn Fn(ValidationError) -> ValidationError + Send + Sync;

/// Rewrites a [`ValidationError`] right before it is raised.
///
/// The default transformer returns the error unchanged.
#[derive(Clone, Default)]
pub struct ExceptionTransformer {
    function: Option<Arc<TransformFn>>,
}

impl ExceptionTransformer {
    /// Returns errors unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Wraps a transformation function.
    pub fn new(function: impl Fn(ValidationError) -> ValidationError + Send + Sync + 'static) -> Self {
        Self {
            function: Some(Arc::new(function)),
        }
    }

    /// Converts every error into an [`ErrorKind::Assertion`] error,
    /// preserving its message, cause and suppressed errors.
    #[must_use]
    pub fn to_assertion() -> Self {
        Self::new(|error| error.into_kind(ErrorKind::Assertion))
    }

    /// Applies `self`, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        match (&self.function, &next.function) {
            (None, _) => next.clone(),
            (_, None) => self.clone(),
            (Some(first), Some(second)) => {
                let (first, second) = (Arc::clone(first), Arc::clone(second));
                Self::new(move |error| second(first(error)))
            }
        }
    }

    /// Transforms `error`.
    #[must_use]
    pub fn apply(&self, error: ValidationError) -> ValidationError {
        match &self.function {
            Some(function) => function(error),
            None => error,
        }
    }

    /// Returns true for the identity transformer.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.function.is_none()
    }

    /// Returns true if both wrap the same function instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.function, &other.function) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ExceptionTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("ExceptionTransformer(identity)")
        } else {
            f.write_str("ExceptionTransformer(custom)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error() -> ValidationError {
        ValidationError::new(ErrorKind::InvalidArgument, "\"x\" must be positive.")
    }

    #[test]
    fn identity_returns_input() {
        let transformed = ExceptionTransformer::identity().apply(error());
        assert_eq!(transformed.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn composition_runs_in_order() {
        let prefix = ExceptionTransformer::new(|e| {
            let message = format!("[app] {}", e.message());
            ValidationError::new(e.kind(), message)
        });
        let combined = prefix.then(&ExceptionTransformer::to_assertion());

        let transformed = combined.apply(error());
        assert_eq!(transformed.kind(), ErrorKind::Assertion);
        assert_eq!(transformed.message(), "[app] \"x\" must be positive.");
    }

    #[test]
    fn composing_with_identity_reuses_instance() {
        let custom = ExceptionTransformer::to_assertion();
        assert!(ExceptionTransformer::identity().then(&custom).ptr_eq(&custom));
        assert!(custom.then(&ExceptionTransformer::identity()).ptr_eq(&custom));
    }
}
