//! Script projection port
//!
//! Converts a notebook into the plain script the equivalence oracle compares.

use std::path::Path;

/// Notebook-to-script converter
#[cfg_attr(test, mockall::automock)]
pub trait ScriptProjector {
    /// Render the notebook at `notebook` as a script written to `output`
    fn project(&self, notebook: &Path, output: &Path) -> anyhow::Result<()>;
}
