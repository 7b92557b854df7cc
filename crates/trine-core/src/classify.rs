//! Turning a single insert or delete chunk into a line region
//!
//! A character diff rarely lines up with line boundaries, so for every
//! chunk we decide two things: which lines of the edited buffer it covers,
//! and whether the counterpart buffer should show a replaced line or just
//! a zero-height insertion point.

use crate::line_index::LineIndex;
use crate::region::DiffRegion;
use std::ops::Range;

/// Which side of a pair a chunk's text lives in.
///
/// Scripts are computed as `diff(right side, left side)`, so inserted text
/// belongs to the left side and deleted text to the right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Delete,
}

/// Build the region for one non-empty chunk.
///
/// `left_offset` and `right_offset` are the cumulative positions in each
/// buffer before this chunk.
pub fn classify(
    kind: ChangeKind,
    left: &LineIndex,
    right: &LineIndex,
    left_offset: usize,
    right_offset: usize,
    text: &str,
) -> DiffRegion {
    match kind {
        ChangeKind::Insert => {
            let (edited, counterpart) = align(left, right, left_offset, right_offset, text);
            DiffRegion::new(edited, counterpart)
        }
        ChangeKind::Delete => {
            let (edited, counterpart) = align(right, left, right_offset, left_offset, text);
            DiffRegion::new(counterpart, edited)
        }
    }
}

/// Line ranges in the edited buffer and its counterpart
fn align(
    edited: &LineIndex,
    counterpart: &LineIndex,
    edited_offset: usize,
    counterpart_offset: usize,
    text: &str,
) -> (Range<usize>, Range<usize>) {
    let mut span = edited.span(edited_offset, text.len());

    // Starting on a terminator means the change really begins on the next line
    if span.start_char > 0 && edited.chars_on_line(span.start_line) == span.start_char {
        span.start_line += 1;
        span.start_char = 0;
    }

    // Ending at column 0 leaves that trailing line untouched
    if span.end_char == 0 {
        span.end_line = span.end_line.saturating_sub(1);
    }

    // A mid-line chunk ending in a newline pushes the rest of its line down
    if span.start_char > 0 && text.ends_with('\n') {
        span.end_line += 1;
    }

    let current_line_other = counterpart.line_for_offset(counterpart_offset);
    let chars_on_other = counterpart.chars_on_line(current_line_other);
    let chars_on_start = edited.chars_on_line(span.start_line);

    let leading_newline = text.starts_with('\n') && chars_on_start > 0;

    // The diff tends to anchor a chunk that opens a line onto the previous
    // line's terminator in the counterpart
    let counterpart_start =
        if span.start_char == 0 && counterpart.is_line_end(counterpart_offset, leading_newline) {
            current_line_other + 1
        } else {
            current_line_other
        };

    let same_line = span.start_line == span.end_line;
    let overwrites = (span.start_char > 0 || (same_line && text.len() < chars_on_start))
        && chars_on_other > 0
        && span.start_char < chars_on_start;

    let edited_lines = span.start_line..(span.end_line + 1).max(span.start_line);
    let counterpart_lines = counterpart_start..counterpart_start + usize::from(overwrites);
    (edited_lines, counterpart_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(kind: ChangeKind, left: &str, right: &str, lo: usize, ro: usize, text: &str) -> DiffRegion {
        classify(
            kind,
            &LineIndex::from_text(left),
            &LineIndex::from_text(right),
            lo,
            ro,
            text,
        )
    }

    #[test]
    fn test_replaced_line_delete_side() {
        // left "a\nX\nc\n" vs common "a\nb\nc\n": "b" deleted from common
        let r = region(ChangeKind::Delete, "a\nX\nc\n", "a\nb\nc\n", 2, 2, "b");
        assert_eq!(r, DiffRegion::new(1..1, 1..2));
    }

    #[test]
    fn test_replaced_line_insert_side() {
        let r = region(ChangeKind::Insert, "a\nX\nc\n", "a\nb\nc\n", 2, 3, "X");
        assert_eq!(r, DiffRegion::new(1..2, 1..1));
    }

    #[test]
    fn test_whole_new_line_is_marker_on_counterpart() {
        let r = region(ChangeKind::Insert, "a\nnew\nb\n", "a\nb\n", 2, 2, "new\n");
        assert_eq!(r, DiffRegion::new(1..2, 1..1));
    }

    #[test]
    fn test_mid_line_insert_overwrites_counterpart_line() {
        // "ab\n" -> "aXb\n": X inserted after 'a'
        let r = region(ChangeKind::Insert, "aXb\n", "ab\n", 1, 1, "X");
        assert_eq!(r, DiffRegion::new(0..1, 0..1));
    }

    #[test]
    fn test_mid_line_delete_overwrites_counterpart_line() {
        // "aXb\n" lost its X on the left
        let r = region(ChangeKind::Delete, "ab\n", "aXb\n", 1, 1, "X");
        assert_eq!(r, DiffRegion::new(0..1, 0..1));
    }

    #[test]
    fn test_insert_at_buffer_start() {
        // "b\n" -> "a\nb\n"
        let r = region(ChangeKind::Insert, "a\nb\n", "b\n", 0, 0, "a\n");
        assert_eq!(r, DiffRegion::new(0..1, 0..0));
    }

    #[test]
    fn test_prefix_on_line_start_overwrites() {
        // "b\n" -> "xb\n": a short chunk at column 0 of a longer line
        let r = region(ChangeKind::Insert, "xb\n", "b\n", 0, 0, "x");
        assert_eq!(r, DiffRegion::new(0..1, 0..1));
    }

    #[test]
    fn test_append_at_end_without_trailing_newline() {
        // "a" -> "a\nb": the chunk starts on the terminator position of line 0
        let r = region(ChangeKind::Insert, "a\nb", "a", 1, 1, "\nb");
        assert_eq!(r, DiffRegion::new(1..2, 1..1));
    }

    #[test]
    fn test_append_at_end_with_trailing_newline() {
        // "a\n" -> "a\nb\n"
        let r = region(ChangeKind::Insert, "a\nb\n", "a\n", 2, 2, "b\n");
        assert_eq!(r, DiffRegion::new(1..2, 1..1));
    }

    #[test]
    fn test_chunk_at_exact_line_length() {
        // "ab\ncd\n" -> "abZ\ncd\n": inserted right before the terminator
        let r = region(ChangeKind::Insert, "abZ\ncd\n", "ab\ncd\n", 2, 2, "Z");
        assert_eq!(r, DiffRegion::new(0..1, 0..1));
    }

    #[test]
    fn test_mid_line_chunk_ending_in_newline_spans_next_line() {
        // "ab\n" -> "aX\nb\n": the insert splits the line in two
        let r = region(ChangeKind::Insert, "aX\nb\n", "ab\n", 1, 1, "X\n");
        assert_eq!(r, DiffRegion::new(0..2, 0..1));
    }

    #[test]
    fn test_empty_counterpart_line_stays_marker() {
        // "\n" -> "abc\n": the counterpart line is empty
        let r = region(ChangeKind::Insert, "abc\n", "\n", 0, 0, "abc");
        assert_eq!(r, DiffRegion::new(0..1, 0..0));
    }

    #[test]
    fn test_removed_trailing_line() {
        // common "a\nb\n" lost "b\n" on the left
        let r = region(ChangeKind::Delete, "a\n", "a\nb\n", 2, 2, "b\n");
        assert_eq!(r, DiffRegion::new(1..1, 1..2));
    }

    #[test]
    fn test_everything_inserted_into_empty_buffer() {
        let r = region(ChangeKind::Insert, "x\ny\n", "", 0, 0, "x\ny\n");
        assert_eq!(r, DiffRegion::new(0..2, 0..0));
    }
}
