//! Builder for failure messages.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use super::diff_context::DiffRequest;
use super::render::Rendered;
use super::{DIFF_LEGEND, Section, layout};
use crate::config::Configuration;
use crate::foundation::Context;

/// Collects the parts of a failure message and renders them on demand.
///
/// Rendering is deferred so that, with lazy exceptions enabled, a failure
/// that is only counted never pays for its diff.
///
/// ```rust,ignore
/// let message = chain
///     .message("must be less than 10.")
///     .with_value("Actual", &12)
///     .render();
/// ```
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    config: Arc<Configuration>,
    message: String,
    context: Context,
    chain_context: Context,
    diff: Option<DiffRequest>,
}

impl MessageBuilder {
    /// Starts a message. `message` is the sentence shown on the first line.
    pub fn new(config: Arc<Configuration>, message: impl Into<String>) -> Self {
        Self {
            config,
            message: message.into(),
            context: Context::new(),
            chain_context: Context::new(),
            diff: None,
        }
    }

    /// Appends the shared context of the chain, after the failure's own entries.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_chain_context(mut self, context: &Context) -> Self {
        self.chain_context.merge_absent(context);
        self
    }

    /// Adds a context line with already rendered text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(name, value);
        self
    }

    /// Adds a context line showing `value`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value<V: Any + Debug>(self, name: impl Into<String>, value: &V) -> Self {
        let text = Rendered::of(&self.config, value).into_text();
        self.with_context(name, text)
    }

    /// Compares an actual value with the expected one. A missing actual value
    /// is shown as null.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_diff<A, E>(self, actual: Option<&A>, expected: &E, values_equal: bool) -> Self
    where
        A: Any + Debug,
        E: Any + Debug,
    {
        let actual = actual.map_or_else(Rendered::null, |actual| Rendered::of(&self.config, actual));
        let expected = Rendered::of(&self.config, expected);
        self.with_rendered_diff(actual, expected, values_equal)
    }

    /// Compares two values rendered ahead of time.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rendered_diff(mut self, actual: Rendered, expected: Rendered, values_equal: bool) -> Self {
        self.diff = Some(DiffRequest {
            actual,
            expected,
            values_equal,
        });
        self
    }

    /// The first line of the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The configuration used for rendering.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Renders the full message.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        let mut context = self.context.clone();
        context.merge_absent(&self.chain_context);
        if !context.is_empty() {
            sections.push(Section::entries(context.iter()));
        }

        if let Some(diff) = &self.diff {
            let diff = diff.sections(&self.config);
            if !diff.sections.is_empty() {
                sections.push(Section::blank());
                sections.extend(diff.sections);
                if diff.has_markers {
                    sections.push(Section::blank());
                    sections.push(Section::Text(DIFF_LEGEND.to_owned()));
                }
            }
        }

        layout(&self.message, &sections)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder(message: &str) -> MessageBuilder {
        MessageBuilder::new(Arc::new(Configuration::default()), message)
    }

    #[test]
    fn message_with_actual_value() {
        let rendered = builder("\"age\" may not be negative.")
            .with_value("Actual", &-5)
            .render();
        assert_eq!(rendered, "\"age\" may not be negative.\nActual: -5");
    }

    #[test]
    fn failure_entries_precede_chain_context() {
        let chain: Context = [("request", "42"), ("Actual", "shadowed")].into_iter().collect();
        let rendered = builder("\"x\" must be positive.")
            .with_value("Actual", &0)
            .with_chain_context(&chain)
            .render();
        assert_eq!(rendered, "\"x\" must be positive.\nActual : 0\nrequest: 42");
    }

    #[test]
    fn diff_follows_a_blank_line_and_adds_legend() {
        let rendered = builder("\"name\" must be equal to \"bob\".")
            .with_diff(Some(&"alice"), &"bob", false)
            .render();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("\"name\" must be equal to \"bob\"."));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().is_some_and(|line| line.starts_with("Actual  : \"")));
        assert!(rendered.contains("Diff    : "));
        assert!(rendered.ends_with(DIFF_LEGEND));
    }

    #[test]
    fn diff_without_markers_has_no_legend() {
        let config = Arc::new(Configuration::default().with_allow_diff(false));
        let rendered = MessageBuilder::new(config, "\"a\" must be equal to 2.")
            .with_diff(Some(&1), &2, false)
            .render();
        assert_eq!(rendered, "\"a\" must be equal to 2.\n\nActual  : 1\nExpected: 2");
    }

    #[test]
    fn missing_actual_is_null() {
        let rendered = builder("m.")
            .with_diff(None::<&i32>, &2, false)
            .render();
        assert!(rendered.contains("Actual  : null"));
    }
}
