//! Configuration file support for trine
//!
//! Without `--config`, the first `trine/config.toml` found under
//! `$XDG_CONFIG_HOME`, `~/.config` or the platform config dir is used.
//!
//! Example config:
//! ```toml
//! [diff]
//! granularity = "specific"
//! max_diffs = 5000
//!
//! [panes.left]
//! copy_link_enabled = false
//!
//! [panes.common]
//! editable = false
//!
//! [output]
//! format = "json"
//! ```
//!
//! Every key is optional. Pane tables only override the keys they set; the
//! rest keep that pane's defaults.

use crate::report::Format;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use trine_core::{DiffOptions, Granularity, PaneOverrides};

const APP_DIR: &str = "trine";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSection {
    pub granularity: Option<Granularity>,
    pub max_diffs: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanesSection {
    pub left: PaneOverrides,
    pub common: PaneOverrides,
    pub right: PaneOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<Format>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub diff: DiffSection,
    pub panes: PanesSection,
    pub output: OutputSection,
}

/// Where an auto-discovered config may live, most specific first
fn candidate_paths() -> Vec<PathBuf> {
    let roots = [
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        dirs::home_dir().map(|home| home.join(".config")),
        dirs::config_dir(),
    ];

    let mut paths: Vec<PathBuf> = Vec::new();
    for root in roots.into_iter().flatten() {
        let path = root.join(APP_DIR).join(CONFIG_FILE);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

impl Config {
    /// Load an explicit config file, or discover one.
    ///
    /// An explicit path must exist and parse. A discovered file that fails
    /// to parse is reported and replaced by the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)
                .context(format!("Failed to read config: {}", path.display()))?;
            return Self::parse(&content)
                .context(format!("Invalid config: {}", path.display()));
        }

        let Some(path) = candidate_paths().into_iter().find(|p| p.is_file()) else {
            return Ok(Self::default());
        };
        tracing::debug!(path = %path.display(), "loading config");

        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Self::parse(&content));
        Ok(parsed.unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring config: {:#}", e);
            Self::default()
        }))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Engine options: config values layered over the engine defaults
    pub fn diff_options(&self) -> DiffOptions {
        let defaults = DiffOptions::default();
        DiffOptions {
            granularity: self.diff.granularity.unwrap_or(defaults.granularity),
            max_diffs: self.diff.max_diffs.unwrap_or(defaults.max_diffs),
            left: self.panes.left.apply(defaults.left),
            common: self.panes.common.apply(defaults.common),
            right: self.panes.right.apply(defaults.right),
        }
    }
}
