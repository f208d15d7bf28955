//! Core validation types.
//!
//! - **Values**: [`TriState`], [`Outcome`]
//! - **Errors**: [`ValidationError`], [`ErrorKind`], [`UsageError`]
//! - **Failures**: [`ValidationFailure`], [`ValidationFailures`]
//! - **Context**: [`Context`] and the naming rules shared by chains and messages
//! - **Identity**: [`Identity`], [`Equatable`] for reference comparisons
//!
//! # Failure propagation
//!
//! A chain never reports the same root cause twice. When a conversion fails,
//! or a null value meets a check that needs a value, the failure is recorded
//! once and the chain's value becomes [`TriState::Undefined`]. Checks and
//! conversions that follow see the undefined value and record nothing:
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! let failures = check_if("abc".to_owned(), "port")
//!     .parse::<u16>()       // fails: recorded once
//!     .is_positive()        // skipped
//!     .is_less_than(1024)   // skipped
//!     .into_failures();
//! assert_eq!(failures.len(), 1);
//! ```

pub mod context;
pub mod error;
pub mod failure;
pub mod identity;
pub mod tri_state;

pub use context::{Context, RESERVED_NAMES, validate_name};
pub use error::{Cause, ErrorKind, UsageError, ValidationError};
pub use failure::{ValidationFailure, ValidationFailures};
pub use identity::{Equatable, Identity};
pub use tri_state::{Outcome, TriState};
