//! Character-level markers for a pair of lines that differ.

use crate::lcs::{self, Edit};
use crate::{MARKER_DELETE, MARKER_EQUAL, MARKER_INSERT, PADDING};

/// Column-aligned rendering of one replaced line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineDiff {
    pub actual: String,
    pub marker: String,
    pub expected: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal(char),
    Delete(char),
    Insert(char),
}

impl Op {
    const fn is_change(self) -> bool {
        !matches!(self, Self::Equal(_))
    }

    const fn same_kind(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Equal(_), Self::Equal(_))
                | (Self::Delete(_), Self::Delete(_))
                | (Self::Insert(_), Self::Insert(_))
        )
    }
}

/// Diffs two lines character by character.
pub(crate) fn diff_line(actual: &str, expected: &str, max_cells: usize) -> LineDiff {
    let actual_chars: Vec<char> = actual.chars().collect();
    let expected_chars: Vec<char> = expected.chars().collect();

    let ops = lcs::align(&actual_chars, &expected_chars, max_cells)
        .into_iter()
        .map(|edit| match edit {
            Edit::Keep(i, _) => Op::Equal(actual_chars[i]),
            Edit::Delete(i) => Op::Delete(actual_chars[i]),
            Edit::Insert(j) => Op::Insert(expected_chars[j]),
        })
        .collect();

    render(&coalesce_words(ops))
}

fn render(ops: &[Op]) -> LineDiff {
    let mut line = LineDiff {
        actual: String::with_capacity(ops.len()),
        marker: String::with_capacity(ops.len()),
        expected: String::with_capacity(ops.len()),
    };
    for op in ops {
        let (actual, marker, expected) = match *op {
            Op::Equal(c) => (c, MARKER_EQUAL, c),
            Op::Delete(c) => (c, MARKER_DELETE, PADDING),
            Op::Insert(c) => (PADDING, MARKER_INSERT, c),
        };
        line.actual.push(actual);
        line.marker.push(marker);
        line.expected.push(expected);
    }
    line
}

/// Returns true for characters that end a word.
pub(crate) fn is_word_delimiter(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '[' | ']' | '(' | ')' | '{' | '}' | '/' | '\\' | '*' | '+' | '-' | '#' | ':' | ';' | '.' | ','
        )
}

/// Rewrites words with scattered edits as a whole-word replacement.
///
/// Unchanged delimiters split the operations into words. A word keeps its
/// fine-grained edits only when it has at most two change runs and either
/// every run is at least three characters long or the word itself is at
/// least five characters long.
fn coalesce_words(ops: Vec<Op>) -> Vec<Op> {
    let mut out = Vec::with_capacity(ops.len());
    let mut word = Vec::new();
    for op in ops {
        match op {
            Op::Equal(c) if is_word_delimiter(c) => {
                flush_word(&mut word, &mut out);
                out.push(op);
            }
            _ => word.push(op),
        }
    }
    flush_word(&mut word, &mut out);
    out
}

fn flush_word(word: &mut Vec<Op>, out: &mut Vec<Op>) {
    if word.is_empty() {
        return;
    }

    let mut runs: Vec<usize> = Vec::new();
    let mut previous: Option<Op> = None;
    for &op in word.iter() {
        if op.is_change() {
            let extends_run = matches!(previous, Some(prev) if prev.same_kind(op));
            if !extends_run {
                runs.push(0);
            }
            if let Some(len) = runs.last_mut() {
                *len += 1;
            }
        }
        previous = Some(op);
    }

    let actual: Vec<char> = word
        .iter()
        .filter_map(|op| match *op {
            Op::Equal(c) | Op::Delete(c) => Some(c),
            Op::Insert(_) => None,
        })
        .collect();
    let expected: Vec<char> = word
        .iter()
        .filter_map(|op| match *op {
            Op::Equal(c) | Op::Insert(c) => Some(c),
            Op::Delete(_) => None,
        })
        .collect();

    let shortest = runs.iter().copied().min().unwrap_or(0);
    let word_len = actual.len().max(expected.len());
    let readable = runs.len() <= 2 && (shortest >= 3 || word_len >= 5);

    if runs.is_empty() || readable {
        out.append(word);
    } else {
        out.extend(actual.into_iter().map(Op::Delete));
        out.extend(expected.into_iter().map(Op::Insert));
        word.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
