//! Failure message assembly.
//!
//! A message is the failure sentence followed by context lines:
//!
//! ```text
//! "age" may not be negative.
//! Actual: -5
//! ```
//!
//! Context keys are padded so the colons line up. When an actual value is
//! compared with an expected one, a diff is appended after a blank line:
//!
//! ```text
//! "name" must be equal to "bob".
//!
//! Actual  : "alice"
//! Diff    : -----+++
//! Expected: "bob"
//! ```

mod builder;
mod diff_context;
mod render;

use std::borrow::Cow;

pub use builder::MessageBuilder;
pub use render::{NULL_TEXT, Rendered};

/// Placed where unchanged lines of a multi-line diff were left out.
pub const ELISION: &str = "[...]";

/// Explains diff markers. Appended to messages whose diff has markers.
pub const DIFF_LEGEND: &str = "\
Legend
------
+   : Add this character to the value
-   : Remove this character from the value
@N  : Refers to line N of a multi-line value, starting at 0";

/// Formats a name for use in a message.
///
/// Names containing `.` (such as `name.length()`) are used as-is; other
/// names are wrapped in double quotes.
#[must_use]
pub fn quote_name(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{name}\""))
    }
}

/// One block of a rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Section {
    /// `key: value` lines.
    Entries(Vec<(String, String)>),
    /// A literal line; empty for a separator.
    Text(String),
}

impl Section {
    pub(crate) fn blank() -> Self {
        Self::Text(String::new())
    }

    pub(crate) fn entries<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Entries(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Joins the message and its sections.
///
/// Keys of every entry section share one width. A single-line message with
/// nothing after it loses its trailing period unless it contains a comma.
pub(crate) fn layout(message: &str, sections: &[Section]) -> String {
    if sections.is_empty() {
        if !message.contains('\n') && !message.contains(',') {
            if let Some(stripped) = message.strip_suffix('.') {
                return stripped.to_owned();
            }
        }
        return message.to_owned();
    }

    let width = sections
        .iter()
        .filter_map(|section| match section {
            Section::Entries(entries) => entries.iter().map(|(key, _)| key.chars().count()).max(),
            Section::Text(_) => None,
        })
        .max()
        .unwrap_or(0);

    let mut out = String::from(message);
    for section in sections {
        match section {
            Section::Entries(entries) => {
                for (key, value) in entries {
                    out.push('\n');
                    out.push_str(&format!("{key:<width$}: {value}"));
                }
            }
            Section::Text(text) => {
                out.push('\n');
                out.push_str(text);
            }
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
