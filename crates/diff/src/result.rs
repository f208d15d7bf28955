//! Output of a line-aligned diff.

/// How one aligned row relates the two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// The line is present, unchanged, on both sides.
    Equal,
    /// The line exists only in the actual value.
    Delete,
    /// The line exists only in the expected value.
    Insert,
    /// An actual line paired with the expected line that replaces it.
    Replace,
}

impl LineKind {
    /// Returns true if the row has an actual-side line.
    #[must_use]
    pub const fn has_actual(self) -> bool {
        !matches!(self, Self::Insert)
    }

    /// Returns true if the row has an expected-side line.
    #[must_use]
    pub const fn has_expected(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

/// Three index-aligned sequences describing the difference between two strings.
///
/// `actual_lines`, `expected_lines` and `kinds` always have the same length.
/// `marker_lines` has that length too, unless no markers were produced
/// (identical inputs, or inputs too large to align), in which case it is
/// empty. Rows of kind [`LineKind::Equal`] carry an empty marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    actual_lines: Vec<String>,
    marker_lines: Vec<String>,
    expected_lines: Vec<String>,
    kinds: Vec<LineKind>,
}

impl DiffResult {
    /// Every line of `text` paired with itself, without markers.
    pub(crate) fn identical(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        Self {
            kinds: vec![LineKind::Equal; lines.len()],
            actual_lines: lines.clone(),
            marker_lines: Vec::new(),
            expected_lines: lines,
        }
    }

    /// The inputs as one row each, without alignment.
    pub(crate) fn unaligned(actual: &str, expected: &str) -> Self {
        Self {
            actual_lines: vec![actual.to_owned()],
            marker_lines: Vec::new(),
            expected_lines: vec![expected.to_owned()],
            kinds: vec![LineKind::Replace],
        }
    }

    pub(crate) fn push(&mut self, kind: LineKind, actual: String, marker: String, expected: String) {
        self.actual_lines.push(actual);
        self.marker_lines.push(marker);
        self.expected_lines.push(expected);
        self.kinds.push(kind);
    }

    /// Lines of the actual value, padded where characters were inserted.
    #[must_use]
    pub fn actual_lines(&self) -> &[String] {
        &self.actual_lines
    }

    /// Per-row markers: `' '` unchanged, `'-'` only in actual, `'+'` only in expected.
    #[must_use]
    pub fn marker_lines(&self) -> &[String] {
        &self.marker_lines
    }

    /// Lines of the expected value, padded where characters were deleted.
    #[must_use]
    pub fn expected_lines(&self) -> &[String] {
        &self.expected_lines
    }

    /// Row kinds.
    #[must_use]
    pub fn kinds(&self) -> &[LineKind] {
        &self.kinds
    }

    /// Marker of row `index`, or `""` when the row has none.
    #[must_use]
    pub fn marker(&self, index: usize) -> &str {
        self.marker_lines.get(index).map_or("", String::as_str)
    }

    /// Number of aligned rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns true if every row is unchanged.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.kinds.iter().all(|kind| *kind == LineKind::Equal)
    }

    /// Indices of the rows that differ.
    pub fn changed_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind != LineKind::Equal)
            .map(|(index, _)| index)
    }
}
