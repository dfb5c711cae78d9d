//! Configuration management
//!
//! Settings come from the first file found among `--config`,
//! `<repo>/.nbrebase.toml` and `~/.config/nbrebase/config.toml`; missing
//! keys fall back to defaults. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::ProjectorKind;
use crate::adapters::projector::nbconvert::DEFAULT_JUPYTER;
use crate::core::services::normalizer::{
    DEFAULT_ALLOWED_IDS, DEFAULT_HOSTING_URL, DEFAULT_INDENT, NormalizeOptions,
};
use crate::core::services::replay::{DEFAULT_PRIMARY_BRANCH, ReplayOptions};
use crate::paths;

/// nbrebase configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Git settings
    #[serde(default)]
    pub git: GitConfig,
    /// Normalization settings
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Equivalence checking settings
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// `[git]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    /// Branch checked out before a stale destination branch is deleted
    #[serde(default = "default_primary_branch")]
    pub primary_branch: String,
}

fn default_primary_branch() -> String {
    DEFAULT_PRIMARY_BRANCH.to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            primary_branch: default_primary_branch(),
        }
    }
}

/// `[normalize]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Link prefix identifying the hosted-platform badge
    #[serde(default = "default_hosting_url")]
    pub hosting_url: String,
    /// `metadata.id` values kept by the normalizer
    #[serde(default = "default_allowed_ids")]
    pub allowed_ids: Vec<String>,
    /// JSON indent width
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_hosting_url() -> String {
    DEFAULT_HOSTING_URL.to_string()
}

fn default_allowed_ids() -> Vec<String> {
    DEFAULT_ALLOWED_IDS.iter().map(ToString::to_string).collect()
}

const fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            hosting_url: default_hosting_url(),
            allowed_ids: default_allowed_ids(),
            indent: default_indent(),
        }
    }
}

/// `[verify]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Projector used by the equivalence oracle
    #[serde(default)]
    pub projector: ProjectorKind,
    /// `jupyter` executable for the nbconvert projector
    #[serde(default = "default_jupyter")]
    pub jupyter: String,
}

fn default_jupyter() -> String {
    DEFAULT_JUPYTER.to_string()
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            projector: ProjectorKind::default(),
            jupyter: default_jupyter(),
        }
    }
}

impl Config {
    /// Parse a config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
        toml::from_str(&content).map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
    }

    /// Candidate config files, highest precedence first
    #[must_use]
    pub fn search_paths(explicit: Option<&Path>, repo: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        if let Some(repo) = repo {
            candidates.push(paths::project_config(repo));
        }
        candidates.push(paths::global_config());
        candidates
    }

    /// Load the first config that applies, or defaults
    ///
    /// An explicit path must exist; the other locations are optional.
    pub fn load(explicit: Option<&Path>, repo: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::from_file(path);
        }
        for path in Self::search_paths(None, repo) {
            if path.is_file() {
                log::debug!("loading config from {}", path.display());
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Normalizer options from the `[normalize]` section
    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            hosting_url: self.normalize.hosting_url.clone(),
            allowed_ids: self.normalize.allowed_ids.clone(),
            indent: self.normalize.indent,
        }
    }

    /// Replay options from the `[git]` and `[normalize]` sections
    #[must_use]
    pub fn replay_options(&self) -> ReplayOptions {
        ReplayOptions {
            primary_branch: self.git.primary_branch.clone(),
            normalize: self.normalize_options(),
        }
    }
}
