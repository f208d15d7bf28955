//! # verity-diff
//!
//! Line-aligned diffs between two display strings, used to build the
//! `Actual` / `Diff` / `Expected` context of validation failures.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity_diff::{DiffEngine, LineKind};
//!
//! let diff = DiffEngine::new().diff("line1\nline2\nline3", "line1\nlineX\nline3");
//!
//! assert_eq!(diff.len(), 3);
//! assert_eq!(diff.kinds()[1], LineKind::Replace);
//! assert_eq!(diff.marker(1), "    -+");
//! ```
//!
//! ## Algorithm
//!
//! 1. Identical inputs produce one unchanged row per line and no markers.
//! 2. Inputs larger than [`DiffEngine::max_input_len`] produce one unaligned
//!    row and no markers.
//! 3. Otherwise lines are aligned with a longest-common-subsequence pass.
//!    Inside each run of changed lines, the k-th removed line is paired with
//!    the k-th added line as a [`LineKind::Replace`] row and diffed character
//!    by character; unpaired lines become [`LineKind::Delete`] or
//!    [`LineKind::Insert`] rows.
//! 4. Character edits scattered across a short word are rewritten as one
//!    whole-word replacement so the markers stay readable.

mod intraline;
mod lcs;
mod result;
mod terminal;

pub use result::{DiffResult, LineKind};
pub use terminal::{COLOR_PADDING, TerminalEncoding};

/// Marker for a character present on both sides.
pub const MARKER_EQUAL: char = ' ';
/// Marker for a character present only in the actual value.
pub const MARKER_DELETE: char = '-';
/// Marker for a character present only in the expected value.
pub const MARKER_INSERT: char = '+';
/// Filler written on the side that lacks a character.
pub const PADDING: char = ' ';

/// Computes [`DiffResult`]s.
///
/// The engine is stateless apart from its limits and can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEngine {
    max_input_len: usize,
    max_cells: usize,
}

impl DiffEngine {
    /// Inputs longer than this many bytes are not aligned.
    pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;
    /// Upper bound on the size of one alignment table.
    pub const DEFAULT_MAX_CELLS: usize = 4_000_000;

    /// Creates an engine with the default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
            max_cells: Self::DEFAULT_MAX_CELLS,
        }
    }

    /// Sets the largest input, in bytes, that is still aligned.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Sets the largest alignment table; bigger blocks degrade to a plain replacement.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Largest input, in bytes, that is still aligned.
    #[must_use]
    pub const fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// Largest alignment table.
    #[must_use]
    pub const fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Diffs `actual` against `expected`.
    #[must_use]
    pub fn diff(&self, actual: &str, expected: &str) -> DiffResult {
        if actual == expected {
            return DiffResult::identical(actual);
        }
        if actual.len() > self.max_input_len || expected.len() > self.max_input_len {
            return DiffResult::unaligned(actual, expected);
        }

        let actual_lines: Vec<&str> = actual.split('\n').collect();
        let expected_lines: Vec<&str> = expected.split('\n').collect();

        let mut result = DiffResult::default();
        let mut deleted: Vec<&str> = Vec::new();
        let mut inserted: Vec<&str> = Vec::new();
        for edit in lcs::align(&actual_lines, &expected_lines, self.max_cells) {
            match edit {
                lcs::Edit::Keep(i, _) => {
                    self.flush_changes(&mut result, &mut deleted, &mut inserted);
                    let line = actual_lines[i].to_owned();
                    result.push(LineKind::Equal, line.clone(), String::new(), line);
                }
                lcs::Edit::Delete(i) => deleted.push(actual_lines[i]),
                lcs::Edit::Insert(j) => inserted.push(expected_lines[j]),
            }
        }
        self.flush_changes(&mut result, &mut deleted, &mut inserted);
        result
    }

    fn flush_changes(&self, result: &mut DiffResult, deleted: &mut Vec<&str>, inserted: &mut Vec<&str>) {
        let paired = deleted.len().min(inserted.len());
        for (actual, expected) in deleted.iter().zip(inserted.iter()) {
            let line = intraline::diff_line(actual, expected, self.max_cells);
            result.push(LineKind::Replace, line.actual, line.marker, line.expected);
        }
        for actual in &deleted[paired..] {
            result.push(
                LineKind::Delete,
                (*actual).to_owned(),
                whole_line_marker(actual, MARKER_DELETE),
                String::new(),
            );
        }
        for expected in &inserted[paired..] {
            result.push(
                LineKind::Insert,
                String::new(),
                whole_line_marker(expected, MARKER_INSERT),
                (*expected).to_owned(),
            );
        }
        deleted.clear();
        inserted.clear();
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn whole_line_marker(line: &str, marker: char) -> String {
    let width = line.chars().count().max(1);
    std::iter::repeat_n(marker, width).collect()
}

// ============================================================================
// TESTS
// ============================================================================
