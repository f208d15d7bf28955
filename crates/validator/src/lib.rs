//! # verity-validator
//!
//! Fluent contract validation: declare what a value must satisfy and get
//! either an error, an assertion panic, or a list of every violation, each
//! with a message that shows how the actual value differs from the expected
//! one.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! fn open(port: i64, host: &str) -> Result<(), ValidationError> {
//!     require_that(port, "port").is_between(1, 65536).into_result()?;
//!     require_that(host.to_owned(), "host").is_not_blank().is_trimmed().into_result()?;
//!     Ok(())
//! }
//!
//! // Report everything at once instead of stopping at the first failure.
//! let failures = check_if(String::new(), "name").is_not_empty().is_not_blank().into_failures();
//! assert_eq!(failures.len(), 2);
//! ```
//!
//! ## Modes
//!
//! | Entry point | On failure |
//! |---|---|
//! | [`require_that`] | stops the chain; the terminal call returns `Err` |
//! | [`assume_that`] | panics with an [`ErrorKind::Assertion`] error |
//! | [`check_if`] | records the failure and continues |
//!
//! ## Layout
//!
//! - [`foundation`]: tri-state values, errors, failures and context.
//! - [`config`]: configuration snapshots and scoped updates.
//! - [`factory`]: [`ValidatorFactory`] and the default factory.
//! - [`chain`]: [`Validator`], the check-and-record core.
//! - [`checks`]: checks grouped by capability.
//! - [`message`]: failure message rendering and diff context.

pub mod chain;
pub mod checks;
pub mod config;
pub mod factory;
pub mod foundation;
pub mod message;
pub mod prelude;

pub use chain::Validator;
pub use factory::{ValidatorFactory, assume_that, check_if, default_factory, require_that};
pub use foundation::{ErrorKind, ValidationError, ValidationFailure, ValidationFailures};
