//! Validation configuration.
//!
//! - [`Configuration`]: an immutable snapshot shared by every chain a factory creates.
//! - [`ConfigurationUpdater`]: a scoped working copy that publishes one new snapshot.
//! - [`ConfigurationSettings`]: the serializable subset, for loading from files.

mod configuration;
mod converters;
mod settings;
pub(crate) mod store;
mod transformer;
mod updater;

pub use configuration::{Configuration, EqualityMethod};
pub use converters::StringConverters;
pub use settings::ConfigurationSettings;
pub use transformer::ExceptionTransformer;
pub use updater::ConfigurationUpdater;
pub use verity_diff::TerminalEncoding;
