//! Context lines comparing an actual value with an expected one.

use verity_diff::{DiffEngine, DiffResult, LineKind, TerminalEncoding};

use super::render::Rendered;
use super::{ELISION, Section};
use crate::config::Configuration;

const ACTUAL: &str = "Actual";
const EXPECTED: &str = "Expected";
const DIFF: &str = "Diff";

static ENGINE: DiffEngine = DiffEngine::new();

/// An actual value to be compared with an expected one.
#[derive(Debug, Clone)]
pub(crate) struct DiffRequest {
    pub(crate) actual: Rendered,
    pub(crate) expected: Rendered,
    /// Whether the values compared equal, independent of their text.
    pub(crate) values_equal: bool,
}

/// Sections describing a comparison, and whether any diff markers were emitted.
#[derive(Debug, Default)]
pub(crate) struct DiffSections {
    pub(crate) sections: Vec<Section>,
    pub(crate) has_markers: bool,
}

impl DiffRequest {
    /// Builds the comparison sections.
    ///
    /// Single-line values yield `Actual` / `Diff` / `Expected`. Multi-line
    /// values yield one block per line, keyed `Actual@N` / `Expected@N`;
    /// unchanged interior lines are replaced by [`ELISION`] while the first
    /// and last line are always shown. When both values render to the same
    /// text but are not equal, their types, `Debug` output or addresses are
    /// compared as well.
    ///
    /// With a colored [`TerminalEncoding`] the `Diff` rows are omitted and the
    /// changed characters are styled in place instead.
    pub(crate) fn sections(&self, config: &Configuration) -> DiffSections {
        let (actual, expected) = (self.actual.text(), self.expected.text());
        let mut out = if !config.allow_diff() || self.actual.is_bool() || self.expected.is_bool() {
            DiffSections {
                sections: vec![Section::entries([(ACTUAL, actual), (EXPECTED, expected)])],
                has_markers: false,
            }
        } else {
            let result = ENGINE.diff(actual, expected);
            let encoding = config.terminal_encoding();
            if result.len() == 1 {
                single_line(&result, encoding)
            } else {
                multi_line(&result, encoding)
            }
        };

        if !self.values_equal && actual == expected {
            let distinction = self.distinguish();
            if !distinction.is_empty() {
                out.sections.push(Section::blank());
                out.sections.push(Section::entries(distinction));
            }
        }
        out
    }

    /// Tells apart two values whose text is identical.
    fn distinguish(&self) -> Vec<(String, String)> {
        let (actual, expected) = (&self.actual, &self.expected);
        if actual.type_name() != expected.type_name() {
            return vec![
                ("Actual.type".into(), actual.type_name().into()),
                ("Expected.type".into(), expected.type_name().into()),
            ];
        }
        if let (Some(actual_debug), Some(expected_debug)) = (actual.debug(), expected.debug()) {
            if actual_debug != expected_debug {
                return vec![
                    ("Actual.debug".into(), actual_debug.into()),
                    ("Expected.debug".into(), expected_debug.into()),
                ];
            }
        }
        if actual.address() != expected.address() {
            return vec![
                ("Actual.address".into(), format!("{:#x}", actual.address())),
                ("Expected.address".into(), format!("{:#x}", expected.address())),
            ];
        }
        Vec::new()
    }
}

/// A diff row as shown. Colored rows carry no marker row.
struct Row {
    actual: String,
    marker: Option<String>,
    expected: String,
}

fn row(result: &DiffResult, index: usize, encoding: TerminalEncoding) -> Row {
    if let Some((actual, expected)) = encoding.paint_row(result, index) {
        return Row {
            actual,
            marker: None,
            expected,
        };
    }
    let marker = result.marker(index);
    let has_marker = result.kinds()[index] != LineKind::Equal && !marker.is_empty();
    Row {
        actual: result.actual_lines()[index].clone(),
        marker: has_marker.then(|| marker.to_owned()),
        expected: result.expected_lines()[index].clone(),
    }
}

fn single_line(result: &DiffResult, encoding: TerminalEncoding) -> DiffSections {
    let Row {
        actual,
        marker,
        expected,
    } = row(result, 0, encoding);
    let has_markers = marker.is_some();
    let mut entries = vec![(ACTUAL.to_owned(), actual)];
    if let Some(marker) = marker {
        entries.push((DIFF.to_owned(), marker));
    }
    entries.push((EXPECTED.to_owned(), expected));
    DiffSections {
        sections: vec![Section::Entries(entries)],
        has_markers,
    }
}

fn multi_line(result: &DiffResult, encoding: TerminalEncoding) -> DiffSections {
    let mut out = DiffSections::default();
    let last = result.len() - 1;
    let (mut actual_line, mut expected_line) = (0_usize, 0_usize);
    let mut skipped = false;

    for (index, kind) in result.kinds().iter().copied().enumerate() {
        if kind == LineKind::Equal && index != 0 && index != last {
            skipped = true;
            actual_line += 1;
            expected_line += 1;
            continue;
        }
        if !out.sections.is_empty() {
            out.sections.push(Section::blank());
        }
        if skipped {
            out.sections.push(Section::Text(ELISION.to_owned()));
            out.sections.push(Section::blank());
            skipped = false;
        }

        let Row {
            actual,
            marker,
            expected,
        } = row(result, index, encoding);
        let mut entries = Vec::with_capacity(3);
        if kind.has_actual() {
            entries.push((format!("{ACTUAL}@{actual_line}"), actual));
            actual_line += 1;
        }
        if let Some(marker) = marker {
            entries.push((DIFF.to_owned(), marker));
            out.has_markers = true;
        }
        if kind.has_expected() {
            entries.push((format!("{EXPECTED}@{expected_line}"), expected));
            expected_line += 1;
        }
        out.sections.push(Section::Entries(entries));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StringConverters;
    use crate::message::layout;
    use pretty_assertions::assert_eq;

    fn request<A: std::any::Any + std::fmt::Debug, E: std::any::Any + std::fmt::Debug>(
        config: &Configuration,
        actual: &A,
        expected: &E,
        values_equal: bool,
    ) -> DiffRequest {
        DiffRequest {
            actual: Rendered::of(config, actual),
            expected: Rendered::of(config, expected),
            values_equal,
        }
    }

    fn render(config: &Configuration, request: &DiffRequest) -> String {
        layout("m", &request.sections(config).sections)
    }

    #[test]
    fn single_line_triple() {
        let config = Configuration::default();
        let diff = request(&config, &"abc", &"xyz", false);
        assert_eq!(
            render(&config, &diff),
            "m\nActual  : \"abc   \"\nDiff    :  ---+++ \nExpected: \"   xyz\""
        );
        assert!(diff.sections(&config).has_markers);
    }

    #[test]
    fn diff_disabled_shows_plain_values() {
        let config = Configuration::default().with_allow_diff(false);
        let diff = request(&config, &1, &2, false);
        assert_eq!(render(&config, &diff), "m\nActual  : 1\nExpected: 2");
    }

    #[test]
    fn booleans_are_never_diffed() {
        let config = Configuration::default();
        let diff = request(&config, &true, &false, false);
        assert_eq!(render(&config, &diff), "m\nActual  : true\nExpected: false");
    }

    #[test]
    fn multi_line_numbers_rows_and_elides_equal_lines() {
        let config = Configuration::default();
        let actual = String::from("a\nb\nc\nd\ne");
        let expected = String::from("a\nb\nc\nd\nE");
        let sections = request(&config, &actual, &expected, false).sections(&config);

        assert!(sections.has_markers);
        assert_eq!(
            layout("m", &sections.sections),
            [
                "m",
                "Actual@0  : \"a",
                "Expected@0: \"a",
                "",
                "[...]",
                "",
                "Actual@4  : e\"  ",
                "Diff      : --++",
                "Expected@4:   E\"",
            ]
            .join("\n")
        );
    }

    #[test]
    fn identical_multi_line_text_has_no_markers() {
        let config = Configuration::default();
        let text = String::from("first\nsecond\nthird\nfourth");
        let other = text.clone();
        let sections = request(&config, &text, &other, false).sections(&config);

        assert!(!sections.has_markers);
        let rendered = layout("m", &sections.sections);
        assert_eq!(rendered.matches(ELISION).count(), 1);
        assert!(
            rendered
                .lines()
                .any(|line| line.starts_with("Actual@0 ") && line.ends_with(": \"first"))
        );
        assert!(
            rendered
                .lines()
                .any(|line| line.starts_with("Expected@3 ") && line.ends_with(": fourth\""))
        );
        assert!(!rendered.contains("Diff"));
        assert!(rendered.contains("Actual.address"));
    }

    #[test]
    fn equal_text_with_different_types_compares_types() {
        let config = Configuration::default();
        let diff = request(&config, &5_i32, &5_i64, false);
        let rendered = render(&config, &diff);
        assert!(rendered.contains("Actual.type  : i32"));
        assert!(rendered.contains("Expected.type: i64"));
    }

    #[test]
    fn equal_text_from_converter_compares_debug_output() {
        let mut converters = StringConverters::new();
        converters.insert(|_: &u8| "byte".to_owned());
        let config = Configuration::default().with_string_converters(converters);

        let rendered = render(&config, &request(&config, &1_u8, &2_u8, false));
        assert!(rendered.contains("Actual.debug  : 1"));
        assert!(rendered.contains("Expected.debug: 2"));
    }

    const RESET: &str = "\x1b[0m";

    #[test]
    fn colored_single_line_styles_changes_in_place() {
        let config = Configuration::default().with_terminal_encoding(TerminalEncoding::Xterm8Colors);
        let sections = request(&config, &"abc", &"xyz", false).sections(&config);

        assert!(!sections.has_markers);
        let (red, green, grey) = ("\x1b[30;41m", "\x1b[30;42m", "\x1b[37m");
        assert_eq!(
            layout("m", &sections.sections),
            format!(
                "m\nActual  : \"{red}abc{RESET}{grey}///{RESET}\"\nExpected: \"{grey}///{RESET}{green}xyz{RESET}\""
            )
        );
    }

    #[test]
    fn colored_multi_line_has_no_diff_rows() {
        let config = Configuration::default().with_terminal_encoding(TerminalEncoding::Xterm256Colors);
        let actual = String::from("a\nb\nc\nd\ne");
        let expected = String::from("a\nb\nc\nd\nE");
        let sections = request(&config, &actual, &expected, false).sections(&config);

        assert!(!sections.has_markers);
        let rendered = layout("m", &sections.sections);
        assert!(!rendered.contains("Diff"));
        assert!(rendered.contains("Actual@0  : \"a\n"));
        let changed = rendered
            .lines()
            .find(|line| line.starts_with("Actual@4"))
            .expect("changed row");
        assert!(changed.contains("\x1b[38;5;15;48;5;124m"));
        assert!(changed.ends_with(RESET));
    }

    #[test]
    fn colors_do_not_apply_when_diff_is_disabled() {
        let config = Configuration::default()
            .with_allow_diff(false)
            .with_terminal_encoding(TerminalEncoding::Rgb888Colors);
        let diff = request(&config, &1, &2, false);
        assert_eq!(render(&config, &diff), "m\nActual  : 1\nExpected: 2");
    }
}
