//! Equivalence oracle
//!
//! Two notebooks are equivalent when their script projections are textually
//! identical. Structural and metadata differences do not count.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::models::Notebook;
use crate::core::ports::ScriptProjector;
use crate::core::services::normalizer::{drop_badge, ensure_notebook_file, read_notebook, to_canonical_json};

/// Project both files and compare the scripts
///
/// # Errors
///
/// Returns an input-shape error if either path is not an existing `.ipynb`
/// file, or any error from the projector. A textual difference is `Ok(false)`.
pub fn equivalent(projector: &dyn ScriptProjector, a: &Path, b: &Path) -> anyhow::Result<bool> {
    ensure_notebook_file(a)?;
    ensure_notebook_file(b)?;

    let tmp = TempDir::new()?;
    let a_script = project_into(projector, a, tmp.path(), "src")?;
    let b_script = project_into(projector, b, tmp.path(), "dest")?;

    let same = a_script == b_script;
    if !same {
        log::debug!("script projections differ: {} vs {}", a.display(), b.display());
    }
    Ok(same)
}

/// Compare after dropping the leading badge cell from both inputs
///
/// # Errors
///
/// Same as [`equivalent`], plus parse errors for malformed notebooks.
pub fn equivalent_ignoring_badge(
    projector: &dyn ScriptProjector,
    a: &Path,
    b: &Path,
    hosting_url: &str,
) -> anyhow::Result<bool> {
    let a_nb = drop_badge(&read_notebook(a)?, hosting_url);
    let b_nb = drop_badge(&read_notebook(b)?, hosting_url);
    documents_equivalent(projector, &a_nb, &b_nb)
}

/// Compare two in-memory documents
///
/// # Errors
///
/// Returns any error from writing the temporary files or the projector.
pub fn documents_equivalent(
    projector: &dyn ScriptProjector,
    a: &Notebook,
    b: &Notebook,
) -> anyhow::Result<bool> {
    let tmp = TempDir::new()?;
    let a_path = tmp.path().join("src.ipynb");
    let b_path = tmp.path().join("dest.ipynb");
    fs::write(&a_path, to_canonical_json(a, 1)?)?;
    fs::write(&b_path, to_canonical_json(b, 1)?)?;
    equivalent(projector, &a_path, &b_path)
}

fn project_into(
    projector: &dyn ScriptProjector,
    notebook: &Path,
    dir: &Path,
    prefix: &str,
) -> anyhow::Result<String> {
    let stem = notebook.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let output: PathBuf = dir.join(format!("{prefix}_{stem}.py"));
    projector.project(notebook, &output)?;
    if !output.is_file() {
        anyhow::bail!("projector produced no script for {}", notebook.display());
    }
    Ok(fs::read_to_string(output)?)
}
