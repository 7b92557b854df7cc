//! Walking one pair's edit script into diff regions

use crate::buffer::BufferRole;
use crate::classify::{classify, ChangeKind};
use crate::edit::{normalize_newline_splits, EditOp};
use crate::line_index::LineIndex;
use crate::region::DiffRegion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two pairs a three-pane view compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferPair {
    /// Left pane against common
    LeftCommon,
    /// Common against right pane
    CommonRight,
}

impl BufferPair {
    pub const ALL: [BufferPair; 2] = [BufferPair::LeftCommon, BufferPair::CommonRight];

    /// Buffer behind the regions' `left_*` lines
    pub fn left_role(self) -> BufferRole {
        match self {
            BufferPair::LeftCommon => BufferRole::Left,
            BufferPair::CommonRight => BufferRole::Common,
        }
    }

    /// Buffer behind the regions' `right_*` lines
    pub fn right_role(self) -> BufferRole {
        match self {
            BufferPair::LeftCommon => BufferRole::Common,
            BufferPair::CommonRight => BufferRole::Right,
        }
    }
}

impl fmt::Display for BufferPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.left_role(), self.right_role())
    }
}

/// Convert a script of `diff(right side, left side)` into regions, in
/// source order.
pub fn translate(script: &[EditOp], left: &LineIndex, right: &LineIndex) -> Vec<DiffRegion> {
    let script = normalize_newline_splits(script);
    let mut regions = Vec::new();
    let mut left_offset = 0;
    let mut right_offset = 0;

    for op in &script {
        let text = op.text();
        // The diff occasionally emits chunks with no text
        if text.is_empty() {
            continue;
        }

        match op {
            EditOp::Equal(_) => {
                left_offset += text.len();
                right_offset += text.len();
            }
            EditOp::Delete(_) => {
                regions.push(classify(
                    ChangeKind::Delete,
                    left,
                    right,
                    left_offset,
                    right_offset,
                    text,
                ));
                right_offset += text.len();
            }
            EditOp::Insert(_) => {
                regions.push(classify(
                    ChangeKind::Insert,
                    left,
                    right,
                    left_offset,
                    right_offset,
                    text,
                ));
                left_offset += text.len();
            }
        }
    }

    debug_assert!(
        left_offset < left.total_len() && right_offset < right.total_len(),
        "script does not match its buffers"
    );
    regions
}
