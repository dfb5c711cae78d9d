//! Centralized path definitions for nbrebase
//!
//! ## Storage Layout
//!
//! ```text
//! repo/
//! └── .nbrebase.toml            # Per-repository settings
//!
//! ~/.config/nbrebase/
//! └── config.toml               # User-level defaults
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths (per-repository)
// =============================================================================

/// Repository configuration filename
pub const PROJECT_CONFIG: &str = ".nbrebase.toml";

/// Get path to `.nbrebase.toml` inside `repo`.
#[must_use]
pub fn project_config(repo: &Path) -> PathBuf {
    repo.join(PROJECT_CONFIG)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "nbrebase";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global nbrebase directory.
///
/// Returns `~/.config/nbrebase/` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
