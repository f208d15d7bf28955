//! Turning values into display text.

use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use crate::config::Configuration;

/// Text shown for a present null value.
pub const NULL_TEXT: &str = "null";

/// A value rendered for a failure message, with what is needed to tell two
/// values apart when their text is identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    text: String,
    type_name: &'static str,
    debug: Option<String>,
    address: usize,
}

impl Rendered {
    /// Renders `value` with the configured converters, falling back to its
    /// default representation.
    ///
    /// Text values are shown between double quotes, unescaped, so multi-line
    /// text keeps its lines. Everything else uses `Debug`.
    pub fn of<V: Any + Debug>(config: &Configuration, value: &V) -> Self {
        let (text, debug) = match config.convert(value) {
            Some(text) => (text, Some(format!("{value:?}"))),
            None => (default_text(value), None),
        };
        Self {
            text,
            type_name: std::any::type_name::<V>(),
            debug,
            address: std::ptr::from_ref(value).addr(),
        }
    }

    /// A present null value.
    #[must_use]
    pub fn null() -> Self {
        Self {
            text: NULL_TEXT.to_owned(),
            type_name: NULL_TEXT,
            debug: None,
            address: 0,
        }
    }

    /// The display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the rendering, returning the display text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Name of the rendered value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `Debug` output, kept only when a custom converter produced the text.
    #[must_use]
    pub fn debug(&self) -> Option<&str> {
        self.debug.as_deref()
    }

    /// Address of the rendered value.
    #[must_use]
    pub const fn address(&self) -> usize {
        self.address
    }

    pub(crate) fn is_bool(&self) -> bool {
        self.type_name == std::any::type_name::<bool>()
    }
}

fn default_text<V: Any + Debug>(value: &V) -> String {
    let any: &dyn Any = value;
    let text = any
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| any.downcast_ref::<&'static str>().copied())
        .or_else(|| any.downcast_ref::<Box<str>>().map(AsRef::as_ref))
        .or_else(|| any.downcast_ref::<Arc<str>>().map(AsRef::as_ref))
        .or_else(|| any.downcast_ref::<Cow<'static, str>>().map(AsRef::as_ref));
    match text {
        Some(text) => format!("\"{text}\""),
        None => format!("{value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_quoted_but_not_escaped() {
        let config = Configuration::default();
        assert_eq!(Rendered::of(&config, &String::from("a\nb")).text(), "\"a\nb\"");
        assert_eq!(Rendered::of(&config, &"").text(), "\"\"");
    }

    #[test]
    fn other_values_use_debug() {
        let config = Configuration::default();
        assert_eq!(Rendered::of(&config, &-5).text(), "-5");
        assert_eq!(Rendered::of(&config, &vec![1, 2]).text(), "[1, 2]");
        assert_eq!(Rendered::of(&config, &Some('x')).text(), "Some('x')");
    }

    #[test]
    fn converters_take_precedence() {
        let mut converters = crate::config::StringConverters::new();
        converters.insert(|v: &i32| format!("#{v}"));
        let config = Configuration::default().with_string_converters(converters);

        let rendered = Rendered::of(&config, &7);
        assert_eq!(rendered.text(), "#7");
        assert_eq!(rendered.debug(), Some("7"));
        assert_eq!(rendered.type_name(), "i32");
    }

    #[test]
    fn booleans_are_recognized() {
        let config = Configuration::default();
        assert!(Rendered::of(&config, &true).is_bool());
        assert!(!Rendered::of(&config, &1).is_bool());
    }
}
