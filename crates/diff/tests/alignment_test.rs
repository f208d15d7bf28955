//! Integration tests for line alignment.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use verity_diff::{DiffEngine, LineKind, MARKER_DELETE, MARKER_EQUAL, MARKER_INSERT};

// ============================================================================
// ROW SHAPES
// ============================================================================

#[rstest]
#[case::equal("same", "same", &[LineKind::Equal])]
#[case::replace("abc", "xyz", &[LineKind::Replace])]
#[case::middle("line1\nline2\nline3", "line1\nlineX\nline3", &[LineKind::Equal, LineKind::Replace, LineKind::Equal])]
#[case::insert_at_end("a", "a\nb", &[LineKind::Equal, LineKind::Insert])]
#[case::delete_at_start("x\na", "a", &[LineKind::Delete, LineKind::Equal])]
#[case::two_deleted_one_added("a\nb\nc\nz", "a\nq\nz", &[LineKind::Equal, LineKind::Replace, LineKind::Delete, LineKind::Equal])]
fn row_kinds(#[case] actual: &str, #[case] expected: &str, #[case] kinds: &[LineKind]) {
    let diff = DiffEngine::new().diff(actual, expected);
    assert_eq!(diff.kinds(), kinds);
}

#[test]
fn wholly_different_single_lines_give_one_row() {
    let diff = DiffEngine::new().diff("hello", "world!");
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.kinds(), &[LineKind::Replace]);
    assert!(!diff.marker(0).is_empty());
}

#[test]
fn multiline_identical_values_produce_no_markers() {
    let text = "first\nsecond\nthird\nfourth\nfifth";
    let diff = DiffEngine::new().diff(text, text);
    assert_eq!(diff.len(), 5);
    assert!(diff.marker_lines().is_empty());
    assert_eq!(diff.actual_lines(), diff.expected_lines());
}

#[test]
fn small_cell_budget_still_produces_aligned_rows() {
    let engine = DiffEngine::new().with_max_cells(2);
    let diff = engine.diff("a\nb\nc\nd", "a\nc\nb\nd");
    assert_eq!(diff.kinds().first(), Some(&LineKind::Equal));
    assert_eq!(diff.kinds().last(), Some(&LineKind::Equal));
    assert_eq!(diff.actual_lines().len(), diff.expected_lines().len());
    assert_eq!(diff.marker_lines().len(), diff.len());
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn strip_padding(line: &str, marker: &str, skip: char) -> String {
    line.chars()
        .zip(marker.chars().chain(std::iter::repeat(MARKER_EQUAL)))
        .filter(|(_, m)| *m != skip)
        .map(|(c, _)| c)
        .collect()
}

proptest! {
    #[test]
    fn rows_are_index_aligned(actual in "[a-c\n ]{0,24}", expected in "[a-c\n ]{0,24}") {
        let diff = DiffEngine::new().diff(&actual, &expected);
        prop_assert_eq!(diff.actual_lines().len(), diff.len());
        prop_assert_eq!(diff.expected_lines().len(), diff.len());
        prop_assert!(diff.marker_lines().is_empty() || diff.marker_lines().len() == diff.len());
        prop_assert_eq!(diff.marker_lines().is_empty(), actual == expected);
    }

    #[test]
    fn replaced_rows_reconstruct_both_inputs(actual in "[a-d ]{1,16}", expected in "[a-d ]{1,16}") {
        prop_assume!(actual != expected);
        let diff = DiffEngine::new().diff(&actual, &expected);
        prop_assert_eq!(diff.len(), 1);

        let marker = diff.marker(0);
        let width = marker.chars().count();
        prop_assert_eq!(diff.actual_lines()[0].chars().count(), width);
        prop_assert_eq!(diff.expected_lines()[0].chars().count(), width);
        prop_assert!(marker.chars().all(|m| m == MARKER_EQUAL || m == MARKER_DELETE || m == MARKER_INSERT));

        prop_assert_eq!(strip_padding(&diff.actual_lines()[0], marker, MARKER_INSERT), actual);
        prop_assert_eq!(strip_padding(&diff.expected_lines()[0], marker, MARKER_DELETE), expected);
    }

    #[test]
    fn equal_rows_match_on_both_sides(actual in "[ab\n]{0,20}", expected in "[ab\n]{0,20}") {
        let diff = DiffEngine::new().diff(&actual, &expected);
        for (index, kind) in diff.kinds().iter().enumerate() {
            if *kind == LineKind::Equal {
                prop_assert_eq!(&diff.actual_lines()[index], &diff.expected_lines()[index]);
                prop_assert_eq!(diff.marker(index), "");
            }
        }
    }
}
