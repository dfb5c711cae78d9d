//! Normalize notebook files in place

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use nbrebase::config::Config;
use nbrebase::core::services::normalizer::{
    NOTEBOOK_EXTENSION, drop_badge_file, needs_normalization, read_notebook,
};
use nbrebase::core::services::{NormalizeOptions, drop_badge, normalize_file, to_canonical_json};
use nbrebase::output::{NormalizeResult, NormalizedFile, OutputMode};

/// Normalize every notebook under `paths`
pub fn normalize(
    paths: &[PathBuf],
    badge_only: bool,
    check: bool,
    config: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let options = Config::load(config, Some(Path::new(".")))?.normalize_options();

    let mut files = Vec::new();
    for path in collect_notebooks(paths)? {
        let changed = if badge_only {
            strip_badge(&path, &options, check)?
        } else if check {
            needs_normalization(&path, &options)?
        } else {
            normalize_file(&path, &options)?
        };
        files.push(NormalizedFile { path, changed });
    }

    let result = NormalizeResult { check, files };
    result.render(mode);

    if check && result.changed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Remove only the badge cell; returns whether the file changes
fn strip_badge(path: &Path, options: &NormalizeOptions, check: bool) -> anyhow::Result<bool> {
    let before = fs::read_to_string(path)?;
    let after = to_canonical_json(&drop_badge(&read_notebook(path)?, &options.hosting_url), options.indent)?;
    let changed = before != after;
    if changed && !check {
        drop_badge_file(path, path, options)?;
        log::debug!("removed badge from {}", path.display());
    }
    Ok(changed)
}

/// Expand directories into the notebooks they contain
///
/// Explicit file arguments are passed through so that a wrong extension is
/// reported instead of silently skipped.
fn collect_notebooks(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut notebooks = Vec::new();
    for path in paths {
        if !path.is_dir() {
            notebooks.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
        for entry in walker {
            let entry = entry?;
            let is_notebook = entry.path().extension().and_then(|e| e.to_str()) == Some(NOTEBOOK_EXTENSION);
            if entry.file_type().is_file() && is_notebook {
                notebooks.push(entry.into_path());
            }
        }
    }
    Ok(notebooks)
}

/// `.git`, `.ipynb_checkpoints` and other dot entries
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
