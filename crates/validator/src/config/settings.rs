//! Serializable configuration values.

use serde::{Deserialize, Serialize};
use verity_diff::TerminalEncoding;

use super::configuration::EqualityMethod;

/// The plain, serializable fields of a [`Configuration`](super::Configuration).
///
/// Converters and transformers are code and cannot be loaded from a file;
/// `throw_on_failure` belongs to the validation mode, not to the user.
///
/// ```rust,ignore
/// use verity_validator::config::ConfigurationSettings;
///
/// let settings = ConfigurationSettings::from_json(r#"{ "allow_diff": false }"#)?;
/// assert!(!settings.allow_diff);
/// assert!(settings.lazy_exceptions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigurationSettings {
    /// Remove the library's own frames from captured backtraces.
    pub clean_stack_trace: bool,
    /// Include a diff of actual and expected values in messages.
    pub allow_diff: bool,
    /// How equality checks compare values.
    pub equality_method: EqualityMethod,
    /// How diffs are written to the terminal.
    pub terminal_encoding: TerminalEncoding,
    /// Defer message rendering until a failure is read.
    pub lazy_exceptions: bool,
}

impl Default for ConfigurationSettings {
    fn default() -> Self {
        Self {
            clean_stack_trace: true,
            allow_diff: true,
            equality_method: EqualityMethod::Value,
            terminal_encoding: TerminalEncoding::TextOnly,
            lazy_exceptions: true,
        }
    }
}

impl ConfigurationSettings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings = ConfigurationSettings::from_json(r#"{ "equality_method": "reference" }"#)
            .expect("valid settings");
        assert_eq!(settings.equality_method, EqualityMethod::Reference);
        assert!(settings.allow_diff);
        assert!(settings.clean_stack_trace);
        assert_eq!(settings.terminal_encoding, TerminalEncoding::TextOnly);
    }

    #[test]
    fn terminal_encoding_uses_snake_case_names() {
        let settings = ConfigurationSettings::from_json(r#"{ "terminal_encoding": "xterm_16_colors" }"#)
            .expect("valid settings");
        assert_eq!(settings.terminal_encoding, TerminalEncoding::Xterm16Colors);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = ConfigurationSettings::from_json(r#"{ "throw_on_failure": false }"#);
        assert!(result.is_err());
    }

    #[test]
    fn json_round_trip() {
        let settings = ConfigurationSettings {
            lazy_exceptions: false,
            ..ConfigurationSettings::default()
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(ConfigurationSettings::from_json(&json).expect("valid"), settings);
    }
}
