//! Printable summaries of a diff pass

use serde::{Deserialize, Serialize};
use trine_core::{BufferPair, CopyLinks, DiffOptions, DiffRegion, ThreeWayDiff};

/// Output format for region reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct RegionEntry {
    index: usize,
    #[serde(flatten)]
    region: DiffRegion,
    copy: CopyLinks,
}

#[derive(Serialize)]
struct PairReport {
    pair: BufferPair,
    regions: Vec<RegionEntry>,
}

#[derive(Serialize)]
struct Report {
    num_diffs: usize,
    pairs: Vec<PairReport>,
}

fn build(diff: &ThreeWayDiff, options: &DiffOptions) -> Report {
    let pairs = BufferPair::ALL
        .iter()
        .map(|&pair| PairReport {
            pair,
            regions: diff
                .regions(pair)
                .iter()
                .enumerate()
                .map(|(index, region)| RegionEntry {
                    index,
                    region: *region,
                    copy: CopyLinks::for_region(pair, region, options),
                })
                .collect(),
        })
        .collect();

    Report {
        num_diffs: diff.num_diffs(),
        pairs,
    }
}

/// Human-readable side of a region, 1-based lines
fn describe_side(start: usize, end: usize) -> String {
    match end - start {
        0 => format!("insert before line {}", start + 1),
        1 => format!("line {}", start + 1),
        _ => format!("lines {}-{}", start + 1, end),
    }
}

pub fn render_text(diff: &ThreeWayDiff, options: &DiffOptions) -> String {
    let report = build(diff, options);
    let mut out = String::new();

    for pair in &report.pairs {
        let left = pair.pair.left_role();
        let right = pair.pair.right_role();
        let noun = if pair.regions.len() == 1 { "region" } else { "regions" };
        out.push_str(&format!("{} <-> {}: {} {}\n", left, right, pair.regions.len(), noun));

        for entry in &pair.regions {
            let region = &entry.region;
            let mut line = format!(
                "  [{}] {} {} | {} {}",
                entry.index,
                left,
                describe_side(region.left_start_line, region.left_end_line),
                right,
                describe_side(region.right_start_line, region.right_end_line),
            );
            if entry.copy.left_to_common {
                line.push_str("  (copy ltr)");
            }
            if entry.copy.right_to_common {
                line.push_str("  (copy rtl)");
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

pub fn render_json(diff: &ThreeWayDiff, options: &DiffOptions) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build(diff, options))
}
