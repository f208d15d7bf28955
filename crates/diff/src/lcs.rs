//! Longest-common-subsequence alignment shared by the line and character diffs.

/// One step of an alignment between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    /// `actual[i]` matches `expected[j]`.
    Keep(usize, usize),
    /// `actual[i]` has no counterpart in `expected`.
    Delete(usize),
    /// `expected[j]` has no counterpart in `actual`.
    Insert(usize),
}

/// Aligns `actual` against `expected`.
///
/// The common prefix and suffix are matched directly; only the middle block
/// goes through the quadratic table. When the table would exceed `max_cells`
/// the middle block is emitted as one run of deletions followed by one run of
/// insertions.
///
/// Within a run of changes, deletions always precede insertions.
pub(crate) fn align<T: PartialEq>(actual: &[T], expected: &[T], max_cells: usize) -> Vec<Edit> {
    let prefix = actual
        .iter()
        .zip(expected)
        .take_while(|(a, e)| a == e)
        .count();
    let suffix = actual[prefix..]
        .iter()
        .rev()
        .zip(expected[prefix..].iter().rev())
        .take_while(|(a, e)| a == e)
        .count();
    let actual_end = actual.len() - suffix;
    let expected_end = expected.len() - suffix;

    let mut edits = Vec::with_capacity(actual.len().max(expected.len()) + 1);
    edits.extend((0..prefix).map(|i| Edit::Keep(i, i)));

    let middle_actual = &actual[prefix..actual_end];
    let middle_expected = &expected[prefix..expected_end];
    let cells = (middle_actual.len() + 1).saturating_mul(middle_expected.len() + 1);
    if cells > max_cells {
        edits.extend((prefix..actual_end).map(Edit::Delete));
        edits.extend((prefix..expected_end).map(Edit::Insert));
    } else {
        align_middle(middle_actual, middle_expected, prefix, &mut edits);
    }

    edits.extend((0..suffix).map(|k| Edit::Keep(actual_end + k, expected_end + k)));
    edits
}

fn align_middle<T: PartialEq>(actual: &[T], expected: &[T], offset: usize, out: &mut Vec<Edit>) {
    let (rows, cols) = (actual.len(), expected.len());
    let width = cols + 1;
    // table[i * width + j] = LCS length of actual[i..] and expected[j..]
    let mut table = vec![0u32; (rows + 1) * width];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            table[i * width + j] = if actual[i] == expected[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if actual[i] == expected[j] {
            out.push(Edit::Keep(offset + i, offset + j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            out.push(Edit::Delete(offset + i));
            i += 1;
        } else {
            out.push(Edit::Insert(offset + j));
            j += 1;
        }
    }
    out.extend((i..rows).map(|k| Edit::Delete(offset + k)));
    out.extend((j..cols).map(|k| Edit::Insert(offset + k)));
}

// ============================================================================
// TESTS
// ============================================================================
