//! Diff passes over the three panes

use crate::buffer::{BufferRole, Buffers, TextBuffer};
use crate::edit::{CharDiff, SemanticCharDiff};
use crate::line_index::LineIndex;
use crate::region::DiffRegion;
use crate::simplify::{simplify, Granularity};
use crate::translate::{translate, BufferPair};
use serde::{Deserialize, Serialize};


/// Default ceiling on the number of regions a pass may emit
pub const DEFAULT_MAX_DIFFS: usize = 5000;

/// Per-pane behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaneOptions {
    /// Whether merge operations may rewrite this pane
    pub editable: bool,
    /// Whether regions offer copying this pane's lines into common
    pub copy_link_enabled: bool,
}

impl Default for PaneOptions {
    fn default() -> Self {
        Self {
            editable: true,
            copy_link_enabled: true,
        }
    }
}

/// A partial pane table. Unset fields keep the role's own default, so
/// `{"common": {"editable": false}}` leaves common's copy link off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaneOverrides {
    pub editable: Option<bool>,
    pub copy_link_enabled: Option<bool>,
}

impl PaneOverrides {
    pub fn apply(self, base: PaneOptions) -> PaneOptions {
        PaneOptions {
            editable: self.editable.unwrap_or(base.editable),
            copy_link_enabled: self.copy_link_enabled.unwrap_or(base.copy_link_enabled),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartialDiffOptions")]
pub struct DiffOptions {
    /// How aggressively nearby regions merge
    pub granularity: Granularity,
    /// Passes producing more regions than this emit nothing
    pub max_diffs: usize,
    pub left: PaneOptions,
    pub common: PaneOptions,
    pub right: PaneOptions,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Broad,
            max_diffs: DEFAULT_MAX_DIFFS,
            left: PaneOptions::default(),
            common: PaneOptions {
                editable: true,
                copy_link_enabled: false,
            },
            right: PaneOptions::default(),
        }
    }
}

/// Wire form of [`DiffOptions`]: every field optional, merged over defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialDiffOptions {
    granularity: Option<Granularity>,
    max_diffs: Option<usize>,
    left: PaneOverrides,
    common: PaneOverrides,
    right: PaneOverrides,
}

impl From<PartialDiffOptions> for DiffOptions {
    fn from(partial: PartialDiffOptions) -> Self {
        let defaults = DiffOptions::default();
        Self {
            granularity: partial.granularity.unwrap_or(defaults.granularity),
            max_diffs: partial.max_diffs.unwrap_or(defaults.max_diffs),
            left: partial.left.apply(defaults.left),
            common: partial.common.apply(defaults.common),
            right: partial.right.apply(defaults.right),
        }
    }
}

impl DiffOptions {
    pub fn pane(&self, role: BufferRole) -> &PaneOptions {
        match role {
            BufferRole::Left => &self.left,
            BufferRole::Common => &self.common,
            BufferRole::Right => &self.right,
        }
    }
}

/// Simplified regions for both pairs of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeWayDiff {
    pub left_common: Vec<DiffRegion>,
    pub common_right: Vec<DiffRegion>,
}

impl ThreeWayDiff {
    pub fn regions(&self, pair: BufferPair) -> &[DiffRegion] {
        match pair {
            BufferPair::LeftCommon => &self.left_common,
            BufferPair::CommonRight => &self.common_right,
        }
    }

    /// Total regions across both pairs
    pub fn num_diffs(&self) -> usize {
        self.left_common.len() + self.common_right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_diffs() == 0
    }
}

/// Result of a diff pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// New regions to show
    Updated(ThreeWayDiff),
    /// Too many regions; whatever is shown now should stay
    TooManyDiffs { count: usize, max: usize },
}

/// Computes diff passes. The character diff is injected so callers can
/// swap the primitive without touching the alignment rules.
#[derive(Debug, Clone)]
pub struct DiffEngine<D = SemanticCharDiff> {
    options: DiffOptions,
    differ: D,
}

impl DiffEngine<SemanticCharDiff> {
    pub fn new(options: DiffOptions) -> Self {
        Self::with_differ(options, SemanticCharDiff::new())
    }
}

impl<D: CharDiff> DiffEngine<D> {
    pub fn with_differ(options: DiffOptions, differ: D) -> Self {
        Self { options, differ }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DiffOptions) {
        self.options = options;
    }

    /// Raw regions for one pair, before simplification
    pub fn pair_regions<B: TextBuffer>(&self, buffers: &Buffers<B>, pair: BufferPair) -> Vec<DiffRegion> {
        let left = buffers.get(pair.left_role()).full_text();
        let right = buffers.get(pair.right_role()).full_text();
        self.regions_between(&left, &right)
    }

    fn regions_between(&self, left: &str, right: &str) -> Vec<DiffRegion> {
        let script = self.differ.diff(right, left);
        let left_index = LineIndex::from_text(left);
        let right_index = LineIndex::from_text(right);
        tracing::trace!(
            ops = script.len(),
            left_lines = left_index.line_count(),
            right_lines = right_index.line_count(),
            "translating pair script"
        );
        translate(&script, &left_index, &right_index)
    }

    /// Simplified regions for both pairs, regardless of the ceiling
    pub fn compute<B: TextBuffer>(&self, buffers: &Buffers<B>) -> ThreeWayDiff {
        let granularity = self.options.granularity;
        let left_common = simplify(&self.pair_regions(buffers, BufferPair::LeftCommon), granularity);
        let common_right = simplify(&self.pair_regions(buffers, BufferPair::CommonRight), granularity);

        tracing::debug!(
            left_common = left_common.len(),
            common_right = common_right.len(),
            ?granularity,
            "diff pass computed"
        );

        ThreeWayDiff {
            left_common,
            common_right,
        }
    }

    /// Compute both pairs and apply the region ceiling.
    ///
    /// Nothing is emitted when the combined count exceeds `max_diffs`.
    pub fn run_pass<B: TextBuffer>(&self, buffers: &Buffers<B>) -> PassOutcome {
        let diff = self.compute(buffers);
        let count = diff.num_diffs();
        let max = self.options.max_diffs;

        if count > max {
            tracing::warn!(count, max, "too many diff regions, skipping update");
            return PassOutcome::TooManyDiffs { count, max };
        }

        PassOutcome::Updated(diff)
    }
}
