//! Colored rendering of diff rows.
//!
//! A colored row replaces the marker line: changed characters are styled with
//! ANSI SGR sequences in place, and the column the other side lacks is shown
//! as [`COLOR_PADDING`] in a muted style.

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{DiffResult, LineKind, MARKER_DELETE, MARKER_INSERT};

/// Fills the column of a character that exists on one side only.
pub const COLOR_PADDING: char = '/';

const SGR_RESET: &str = "\x1b[0m";

/// How diff rows are written for the terminal that will show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalEncoding {
    /// Plain text with a separate marker row.
    #[default]
    TextOnly,
    /// The eight basic xterm colors.
    #[serde(rename = "xterm_8_colors")]
    Xterm8Colors,
    /// The sixteen xterm colors, including the bright variants.
    #[serde(rename = "xterm_16_colors")]
    Xterm16Colors,
    /// The xterm 256-color palette.
    #[serde(rename = "xterm_256_colors")]
    Xterm256Colors,
    /// 24-bit RGB.
    #[serde(rename = "rgb_888_colors")]
    Rgb888Colors,
}

struct Palette {
    delete: &'static str,
    insert: &'static str,
    padding: &'static str,
}

impl TerminalEncoding {
    /// Every encoding, from plain text to the richest palette.
    pub const ALL: [Self; 5] = [
        Self::TextOnly,
        Self::Xterm8Colors,
        Self::Xterm16Colors,
        Self::Xterm256Colors,
        Self::Rgb888Colors,
    ];

    /// Returns true if rows are written with ANSI styling instead of a marker row.
    pub const fn is_colored(self) -> bool {
        !matches!(self, Self::TextOnly)
    }

    const fn palette(self) -> Option<Palette> {
        match self {
            Self::TextOnly => None,
            Self::Xterm8Colors => Some(Palette {
                delete: "\x1b[30;41m",
                insert: "\x1b[30;42m",
                padding: "\x1b[37m",
            }),
            Self::Xterm16Colors => Some(Palette {
                delete: "\x1b[30;101m",
                insert: "\x1b[30;102m",
                padding: "\x1b[90m",
            }),
            Self::Xterm256Colors => Some(Palette {
                delete: "\x1b[38;5;15;48;5;124m",
                insert: "\x1b[38;5;15;48;5;28m",
                padding: "\x1b[38;5;244m",
            }),
            Self::Rgb888Colors => Some(Palette {
                delete: "\x1b[38;2;255;255;255;48;2;175;0;0m",
                insert: "\x1b[38;2;255;255;255;48;2;0;135;0m",
                padding: "\x1b[38;2;128;128;128m",
            }),
        }
    }

    /// The encoding supported by standard output.
    ///
    /// Redirected output is always [`TextOnly`](Self::TextOnly).
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from(
            std::io::stdout().is_terminal(),
            std::env::var("TERM").ok().as_deref(),
            std::env::var("COLORTERM").ok().as_deref(),
        )
    }

    /// The encoding implied by the given terminal environment.
    #[must_use]
    pub fn detect_from(is_terminal: bool, term: Option<&str>, color_term: Option<&str>) -> Self {
        if !is_terminal {
            return Self::TextOnly;
        }
        if matches!(color_term, Some("truecolor" | "24bit")) {
            return Self::Rgb888Colors;
        }
        match term {
            None | Some("" | "dumb") => Self::TextOnly,
            Some(term) if term.contains("256color") => Self::Xterm256Colors,
            Some(term) if term.starts_with("xterm") || term.contains("16color") => {
                Self::Xterm16Colors
            }
            Some(_) => Self::Xterm8Colors,
        }
    }

    /// Writes row `index` of `diff` as a styled `(actual, expected)` pair.
    ///
    /// Returns `None` when this encoding is text-only or the row has no
    /// markers: unchanged and unaligned rows are written as they are.
    #[must_use]
    pub fn paint_row(self, diff: &DiffResult, index: usize) -> Option<(String, String)> {
        let palette = self.palette()?;
        let kind = *diff.kinds().get(index)?;
        let marker = diff.marker(index);
        if marker.is_empty() {
            return None;
        }
        let actual = diff.actual_lines().get(index)?;
        let expected = diff.expected_lines().get(index)?;

        let mut painted_actual = Painter::default();
        let mut painted_expected = Painter::default();
        match kind {
            LineKind::Equal => return None,
            LineKind::Delete => {
                painted_actual.push_str(Some(palette.delete), actual);
                painted_expected.push_padding(palette.padding, marker.chars().count());
            }
            LineKind::Insert => {
                painted_actual.push_padding(palette.padding, marker.chars().count());
                painted_expected.push_str(Some(palette.insert), expected);
            }
            LineKind::Replace => {
                let columns = marker.chars().zip(actual.chars()).zip(expected.chars());
                for ((mark, a), e) in columns {
                    match mark {
                        MARKER_DELETE => {
                            painted_actual.push(Some(palette.delete), a);
                            painted_expected.push(Some(palette.padding), COLOR_PADDING);
                        }
                        MARKER_INSERT => {
                            painted_actual.push(Some(palette.padding), COLOR_PADDING);
                            painted_expected.push(Some(palette.insert), e);
                        }
                        _ => {
                            painted_actual.push(None, a);
                            painted_expected.push(None, e);
                        }
                    }
                }
            }
        }
        Some((painted_actual.finish(), painted_expected.finish()))
    }
}

/// Accumulates styled text, emitting a sequence only when the style changes.
#[derive(Default)]
struct Painter {
    out: String,
    style: Option<&'static str>,
}

impl Painter {
    fn push(&mut self, style: Option<&'static str>, c: char) {
        if self.style != style {
            if self.style.is_some() {
                self.out.push_str(SGR_RESET);
            }
            if let Some(sequence) = style {
                self.out.push_str(sequence);
            }
            self.style = style;
        }
        self.out.push(c);
    }

    fn push_str(&mut self, style: Option<&'static str>, text: &str) {
        for c in text.chars() {
            self.push(style, c);
        }
    }

    fn push_padding(&mut self, style: &'static str, width: usize) {
        for _ in 0..width {
            self.push(Some(style), COLOR_PADDING);
        }
    }

    fn finish(mut self) -> String {
        if self.style.is_some() {
            self.out.push_str(SGR_RESET);
        }
        self.out
    }
}

// ============================================================================
// TESTS
// ============================================================================
