//! Line-range description of one aligned change between two buffers

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One contiguous change between the two buffers of a pair.
///
/// Lines are 0-indexed and end lines are exclusive. A side whose start and
/// end are equal is a zero-height marker: content from the other side was
/// inserted at that point and nothing on this side was replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffRegion {
    pub left_start_line: usize,
    pub left_end_line: usize,
    pub right_start_line: usize,
    pub right_end_line: usize,
}

impl DiffRegion {
    pub fn new(left: Range<usize>, right: Range<usize>) -> Self {
        Self {
            left_start_line: left.start,
            left_end_line: left.end.max(left.start),
            right_start_line: right.start,
            right_end_line: right.end.max(right.start),
        }
    }

    pub fn left_lines(&self) -> Range<usize> {
        self.left_start_line..self.left_end_line
    }

    pub fn right_lines(&self) -> Range<usize> {
        self.right_start_line..self.right_end_line
    }

    pub fn left_is_marker(&self) -> bool {
        self.left_start_line == self.left_end_line
    }

    pub fn right_is_marker(&self) -> bool {
        self.right_start_line == self.right_end_line
    }

    /// No extent on either side, so nothing to draw
    pub fn is_empty(&self) -> bool {
        self.left_is_marker() && self.right_is_marker()
    }

    /// Grow to cover `other` as well
    pub fn absorb(&mut self, other: &DiffRegion) {
        self.left_start_line = self.left_start_line.min(other.left_start_line);
        self.right_start_line = self.right_start_line.min(other.right_start_line);
        self.left_end_line = self.left_end_line.max(other.left_end_line);
        self.right_end_line = self.right_end_line.max(other.right_end_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        let region = DiffRegion::new(1..2, 1..1);
        assert!(!region.left_is_marker());
        assert!(region.right_is_marker());
        assert!(!region.is_empty());
        assert!(DiffRegion::new(3..3, 4..4).is_empty());
    }

    #[test]
    fn test_new_never_inverts() {
        #[allow(clippy::reversed_empty_ranges)]
        let region = DiffRegion::new(5..2, 0..1);
        assert_eq!(region.left_lines(), 5..5);
    }

    #[test]
    fn test_absorb_takes_union() {
        let mut region = DiffRegion::new(1..1, 1..2);
        region.absorb(&DiffRegion::new(1..2, 1..1));
        assert_eq!(region, DiffRegion::new(1..2, 1..2));
    }

    #[test]
    fn test_serializes_with_line_names() {
        let json = serde_json::to_value(DiffRegion::new(0..1, 2..2)).unwrap();
        assert_eq!(json["left_start_line"], 0);
        assert_eq!(json["right_end_line"], 2);
    }
}
