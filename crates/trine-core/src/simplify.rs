//! Grouping nearby regions into as few connectors as possible

use crate::region::DiffRegion;
use serde::{Deserialize, Serialize};

/// How far apart two regions may be and still merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Merge only regions that touch
    Specific,
    /// Merge regions up to one line apart
    #[default]
    Broad,
}

impl Granularity {
    fn within(self, distance: usize) -> bool {
        match self {
            Granularity::Specific => distance < 1,
            Granularity::Broad => distance <= 1,
        }
    }

    fn joins(self, group: &DiffRegion, region: &DiffRegion) -> bool {
        self.within(region.left_start_line.abs_diff(group.left_end_line))
            && self.within(region.right_start_line.abs_diff(group.right_end_line))
    }
}

/// Merge regions whose start is close to an existing group's end on both
/// sides, then drop anything left with no extent on either side.
///
/// Each region joins the first matching group, not the closest one.
pub fn simplify(regions: &[DiffRegion], granularity: Granularity) -> Vec<DiffRegion> {
    let mut groups: Vec<DiffRegion> = Vec::with_capacity(regions.len());

    for region in regions {
        match groups
            .iter_mut()
            .find(|group| granularity.joins(group, region))
        {
            Some(group) => group.absorb(region),
            None => groups.push(*region),
        }
    }

    groups.retain(|group| !group.is_empty());
    groups
}
