//! Copying regions into the common pane
//!
//! A [`MergeSession`] owns the three buffers and the regions last shown for
//! them. Copies read lines from an outer pane and replace the matching
//! lines of common, after which the session runs a fresh pass.

use crate::buffer::{BufferRole, Buffers, EditableBuffer, StringBuffer, TextBuffer};
use crate::edit::{CharDiff, SemanticCharDiff};
use crate::engine::{DiffEngine, DiffOptions, PassOutcome, ThreeWayDiff};
use crate::error::MergeError;
use crate::region::DiffRegion;
use crate::translate::BufferPair;
use serde::{Deserialize, Serialize};

/// Which outer pane a copy takes its lines from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyDirection {
    LeftToCommon,
    RightToCommon,
}

impl CopyDirection {
    /// Pair whose regions the copy indexes into
    pub fn pair(self) -> BufferPair {
        match self {
            CopyDirection::LeftToCommon => BufferPair::LeftCommon,
            CopyDirection::RightToCommon => BufferPair::CommonRight,
        }
    }

    pub fn source_role(self) -> BufferRole {
        match self {
            CopyDirection::LeftToCommon => BufferRole::Left,
            CopyDirection::RightToCommon => BufferRole::Right,
        }
    }

    pub fn target_role(self) -> BufferRole {
        BufferRole::Common
    }

    /// Source and target line ranges of `region` for this direction
    fn lines(self, region: &DiffRegion) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        match self {
            CopyDirection::LeftToCommon => (region.left_lines(), region.right_lines()),
            CopyDirection::RightToCommon => (region.right_lines(), region.left_lines()),
        }
    }
}

/// Copy actions a region offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyLinks {
    pub left_to_common: bool,
    pub right_to_common: bool,
}

impl CopyLinks {
    /// A copy is offered when the source side has lines and the source pane
    /// allows copying
    pub fn for_region(pair: BufferPair, region: &DiffRegion, options: &DiffOptions) -> Self {
        match pair {
            BufferPair::LeftCommon => Self {
                left_to_common: !region.left_is_marker() && options.left.copy_link_enabled,
                right_to_common: false,
            },
            BufferPair::CommonRight => Self {
                left_to_common: false,
                right_to_common: !region.right_is_marker() && options.right.copy_link_enabled,
            },
        }
    }

    pub fn allows(&self, direction: CopyDirection) -> bool {
        match direction {
            CopyDirection::LeftToCommon => self.left_to_common,
            CopyDirection::RightToCommon => self.right_to_common,
        }
    }
}

/// Replace the target lines of `region` with the source lines.
///
/// Every copied line gets a `'\n'`, so copying onto a zero-height marker
/// inserts whole lines at that point.
pub fn copy_region<S, T>(source: &S, target: &mut T, region: &DiffRegion, direction: CopyDirection)
where
    S: TextBuffer + ?Sized,
    T: EditableBuffer + ?Sized,
{
    let (source_lines, target_lines) = direction.lines(region);

    let mut content = String::new();
    for line in source_lines {
        content.push_str(&source.line(line).unwrap_or_default());
        content.push('\n');
    }

    target.replace_lines(target_lines.start, target_lines.end, &content);
}

/// What a refresh did to the shown regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Updated,
    /// The pass was abandoned; the previous regions are still shown
    Skipped { count: usize, max: usize },
}

/// Buffers plus the regions currently shown for them
pub struct MergeSession<D = SemanticCharDiff, B = StringBuffer> {
    buffers: Buffers<B>,
    engine: DiffEngine<D>,
    diff: ThreeWayDiff,
    last_refresh: Refresh,
}

impl MergeSession<SemanticCharDiff, StringBuffer> {
    pub fn new(buffers: Buffers<StringBuffer>, options: DiffOptions) -> Self {
        Self::with_engine(buffers, DiffEngine::new(options))
    }
}

impl<D: CharDiff, B: EditableBuffer> MergeSession<D, B> {
    /// Start a session and run the first pass
    pub fn with_engine(buffers: Buffers<B>, engine: DiffEngine<D>) -> Self {
        let mut session = Self {
            buffers,
            engine,
            diff: ThreeWayDiff::default(),
            last_refresh: Refresh::Updated,
        };
        session.refresh();
        session
    }

    pub fn buffer(&self, role: BufferRole) -> &B {
        self.buffers.get(role)
    }

    pub fn options(&self) -> &DiffOptions {
        self.engine.options()
    }

    /// Regions currently shown
    pub fn diff(&self) -> &ThreeWayDiff {
        &self.diff
    }

    pub fn num_diffs(&self) -> usize {
        self.diff.num_diffs()
    }

    /// Outcome of the most recent pass
    pub fn last_refresh(&self) -> Refresh {
        self.last_refresh
    }

    /// Copy actions for the region at `index` of `pair`
    pub fn copy_links(&self, pair: BufferPair, index: usize) -> Option<CopyLinks> {
        self.diff
            .regions(pair)
            .get(index)
            .map(|region| CopyLinks::for_region(pair, region, self.engine.options()))
    }

    /// Run a pass and replace the shown regions unless it was abandoned
    pub fn refresh(&mut self) -> Refresh {
        self.last_refresh = match self.engine.run_pass(&self.buffers) {
            PassOutcome::Updated(diff) => {
                self.diff = diff;
                Refresh::Updated
            }
            PassOutcome::TooManyDiffs { count, max } => Refresh::Skipped { count, max },
        };
        self.last_refresh
    }

    /// Replace the options and re-diff
    pub fn set_options(&mut self, options: DiffOptions) -> Refresh {
        self.engine.set_options(options);
        self.refresh()
    }

    /// Replace one pane's text and re-diff
    pub fn set_text(&mut self, role: BufferRole, text: &str) -> Refresh {
        self.buffers.get_mut(role).set_full_text(text);
        self.refresh()
    }

    /// Copy region `index` of the direction's pair into common
    pub fn copy(&mut self, direction: CopyDirection, index: usize) -> Result<Refresh, MergeError> {
        let pair = direction.pair();
        let regions = self.diff.regions(pair);
        let region = *regions.get(index).ok_or(MergeError::RegionOutOfRange {
            pair,
            index,
            count: regions.len(),
        })?;

        let options = self.engine.options();
        let source = direction.source_role();
        let target = direction.target_role();
        if !options.pane(source).copy_link_enabled {
            return Err(MergeError::CopyDisabled(source));
        }
        if !CopyLinks::for_region(pair, &region, options).allows(direction) {
            return Err(MergeError::NothingToCopy(index));
        }
        if !options.pane(target).editable {
            return Err(MergeError::ReadOnly(target));
        }

        if let Some((from, into)) = self.buffers.outer_and_common(source) {
            copy_region(from, into, &region, direction);
        }
        tracing::debug!(?direction, index, ?region, "copied region into common");

        Ok(self.refresh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(left: &str, common: &str, right: &str) -> MergeSession {
        MergeSession::new(
            Buffers::from_contents(Some(left), Some(common), Some(right)),
            DiffOptions::default(),
        )
    }

    #[test]
    fn test_copy_replaced_line_from_left() {
        let mut s = session("a\nX\nc\n", "a\nb\nc\n", "a\nb\nc\n");
        assert_eq!(s.diff().left_common, vec![DiffRegion::new(1..2, 1..2)]);

        let refresh = s.copy(CopyDirection::LeftToCommon, 0).unwrap();
        assert_eq!(refresh, Refresh::Updated);
        assert_eq!(s.buffer(BufferRole::Common).as_str(), "a\nX\nc\n");
        assert!(s.diff().left_common.is_empty());
        // Common now differs from right instead
        assert_eq!(s.diff().common_right, vec![DiffRegion::new(1..2, 1..2)]);
    }

    #[test]
    fn test_copy_inserted_line_onto_marker() {
        let mut s = session("a\nb\n", "a\nb\n", "a\nnew\nb\n");
        assert_eq!(s.diff().common_right, vec![DiffRegion::new(1..1, 1..2)]);

        s.copy(CopyDirection::RightToCommon, 0).unwrap();
        assert_eq!(s.buffer(BufferRole::Common).as_str(), "a\nnew\nb\n");
        assert!(s.diff().common_right.is_empty());
        assert_eq!(s.num_diffs(), 1);
    }

    #[test]
    fn test_copy_out_of_range() {
        let mut s = session("a\n", "a\n", "a\n");
        assert_eq!(
            s.copy(CopyDirection::LeftToCommon, 0),
            Err(MergeError::RegionOutOfRange {
                pair: BufferPair::LeftCommon,
                index: 0,
                count: 0,
            })
        );
    }

    #[test]
    fn test_copy_from_marker_side_is_rejected() {
        // Left lost "b": its side of the region is a marker
        let mut s = session("a\n", "a\nb\n", "a\nb\n");
        assert_eq!(s.diff().left_common, vec![DiffRegion::new(1..1, 1..2)]);
        assert_eq!(
            s.copy_links(BufferPair::LeftCommon, 0),
            Some(CopyLinks::default())
        );
        assert_eq!(
            s.copy(CopyDirection::LeftToCommon, 0),
            Err(MergeError::NothingToCopy(0))
        );
        assert_eq!(s.buffer(BufferRole::Common).as_str(), "a\nb\n");
    }

    #[test]
    fn test_disabled_pane_options() {
        let mut options = DiffOptions::default();
        options.left.copy_link_enabled = false;
        let mut s = MergeSession::new(
            Buffers::from_contents(Some("a\nX\n"), Some("a\nb\n"), Some("a\nb\n")),
            options.clone(),
        );
        assert_eq!(
            s.copy(CopyDirection::LeftToCommon, 0),
            Err(MergeError::CopyDisabled(BufferRole::Left))
        );

        options.left.copy_link_enabled = true;
        options.common.editable = false;
        s.set_options(options);
        assert_eq!(
            s.copy(CopyDirection::LeftToCommon, 0),
            Err(MergeError::ReadOnly(BufferRole::Common))
        );
    }

    #[test]
    fn test_skipped_pass_keeps_previous_regions() {
        let mut s = session("a\nX\nc\n", "a\nb\nc\n", "a\nb\nc\n");
        let before = s.diff().clone();

        let mut options = s.options().clone();
        options.max_diffs = 1;
        s.set_options(options);

        let refresh = s.set_text(BufferRole::Right, "a\nb\nZ\n");
        assert_eq!(refresh, Refresh::Skipped { count: 2, max: 1 });
        assert_eq!(s.last_refresh(), refresh);
        assert_eq!(s.diff(), &before);
        assert_eq!(s.buffer(BufferRole::Right).as_str(), "a\nb\nZ\n");
    }

    #[test]
    fn test_copy_links_follow_options() {
        let s = session("a\nX\n", "a\nb\n", "a\nY\n");
        let links = s.copy_links(BufferPair::LeftCommon, 0).unwrap();
        assert!(links.left_to_common);
        assert!(!links.right_to_common);
        let links = s.copy_links(BufferPair::CommonRight, 0).unwrap();
        assert!(links.right_to_common);
        assert_eq!(s.copy_links(BufferPair::CommonRight, 5), None);
    }

    #[test]
    fn test_copy_region_into_plain_buffers() {
        let source = StringBuffer::new("one\ntwo\nthree\n");
        let mut target = StringBuffer::new("one\nthree\n");
        copy_region(
            &source,
            &mut target,
            &DiffRegion::new(1..2, 1..1),
            CopyDirection::LeftToCommon,
        );
        assert_eq!(target.as_str(), "one\ntwo\nthree\n");
    }
}
