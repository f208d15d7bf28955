//! Prelude module for convenient imports.
//!
//! Provides a single `use verity_validator::prelude::*;` import that brings
//! in the entry points, the chain, every check group and the common types.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! let name = require_that(input, "name").is_not_blank().size().is_less_than_or_equal_to(64);
//! let age = check_if(age, "age").is_not_negative().into_failures();
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::factory::{ValidatorFactory, assume_that, check_if, default_factory, require_that};

// ============================================================================
// CHAIN AND CHECKS
// ============================================================================

pub use crate::chain::Validator;
pub use crate::checks::{
    Collection, CollectionChecks, ComparableChecks, Equatable, Identity, Number, NumberChecks, SizeChecks,
    Sizeable, Text, TextChecks,
};

// ============================================================================
// CONFIGURATION
// ============================================================================

pub use crate::config::{
    Configuration, ConfigurationSettings, ConfigurationUpdater, EqualityMethod,
    ExceptionTransformer, StringConverters, TerminalEncoding,
};

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    Context, ErrorKind, TriState, UsageError, ValidationError, ValidationFailure,
    ValidationFailures,
};
pub use crate::message::MessageBuilder;
