//! Notebook normalizer
//!
//! Strips the volatile, environment-specific metadata hosted notebook
//! platforms attach to cells, and serializes the result in a canonical form
//! so that repeated normalization of the same document is byte-identical.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::core::error::Error;
use crate::core::models::{Cell, Notebook};

/// Link prefix that marks a hosted "open in" badge cell
pub const DEFAULT_HOSTING_URL: &str = "https://colab.research.google.com/github/";

/// Metadata `id` values kept because a navigation hook refers to them
pub const DEFAULT_ALLOWED_IDS: &[&str] = &["view-in-github"];

/// Spaces per indentation level, as hosted platforms write notebooks
pub const DEFAULT_INDENT: usize = 1;

/// Notebook file extension
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Metadata key of the hosted-execution badge object
const BADGE_KEY: &str = "colab";

/// Metadata key of the hosted-execution output identifier
const OUTPUT_ID_KEY: &str = "outputId";

/// Settings for [`normalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Substring identifying a badge cell's first source line
    pub hosting_url: String,
    /// Metadata ids that survive normalization
    pub allowed_ids: Vec<String>,
    /// Spaces per indentation level in the serialized output
    pub indent: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            hosting_url: DEFAULT_HOSTING_URL.to_string(),
            allowed_ids: DEFAULT_ALLOWED_IDS.iter().map(ToString::to_string).collect(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Whether a cell is the introductory hosted-notebook badge
fn is_badge_cell(cell: &Cell, hosting_url: &str) -> bool {
    matches!(cell, Cell::Markdown(_))
        && cell.source().first_line().is_some_and(|line| line.contains(hosting_url))
}

/// Drop the leading badge cell, if there is one
///
/// Only the first cell is considered; a badge link further down the
/// document is ordinary content.
#[must_use]
pub fn drop_badge(notebook: &Notebook, hosting_url: &str) -> Notebook {
    let mut out = notebook.clone();
    if out.cells.first().is_some_and(|cell| is_badge_cell(cell, hosting_url)) {
        out.cells.remove(0);
    }
    out
}

/// Produce the normalized copy of a notebook
///
/// Drops the badge cell, then removes from every cell its cell-level `id`,
/// any metadata `id` not on the allow-list, the hosted badge object and the
/// hosted output id.
///
/// # Errors
///
/// Returns [`Error::InputShape`] if a cell still carries an identifier
/// afterwards.
pub fn normalize(notebook: &Notebook, options: &NormalizeOptions) -> Result<Notebook, Error> {
    let mut out = drop_badge(notebook, &options.hosting_url);

    for cell in &mut out.cells {
        // nbformat 4.5 gives raw cells an id too, so every kind is stripped.
        cell.take_id();

        let metadata = cell.metadata_mut();
        let keep_id = metadata
            .get("id")
            .and_then(|id| id.as_str())
            .is_some_and(|id| options.allowed_ids.iter().any(|allowed| allowed == id));
        if !keep_id {
            metadata.remove("id");
        }
        metadata.remove(BADGE_KEY);
        metadata.remove(OUTPUT_ID_KEY);
    }

    if let Some(pos) = out.cells.iter().position(|c| c.id().is_some()) {
        return Err(Error::input_shape("", format!("cell {pos} still carries an identifier")));
    }

    Ok(out)
}

/// Serialize a notebook deterministically
///
/// Keys are sorted, indentation is fixed, non-ASCII text is written as is
/// and the output ends with a newline.
///
/// # Errors
///
/// Returns an error if the document cannot be represented as JSON.
pub fn to_canonical_json(notebook: &Notebook, indent: usize) -> anyhow::Result<String> {
    // Round-tripping through `Value` sorts every object's keys.
    let value = serde_json::to_value(notebook)?;
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

/// Check that a path is an existing `.ipynb` file
///
/// # Errors
///
/// Returns [`Error::InputShape`] otherwise.
pub fn ensure_notebook_file(path: &Path) -> Result<(), Error> {
    if !path.is_file() {
        return Err(Error::input_shape(path, "not a file"));
    }
    if path.extension().and_then(|e| e.to_str()) != Some(NOTEBOOK_EXTENSION) {
        return Err(Error::input_shape(path, format!("expected a .{NOTEBOOK_EXTENSION} file")));
    }
    Ok(())
}

/// Read and parse a notebook file
///
/// # Errors
///
/// Returns an error if the path is not a notebook file or cannot be parsed.
pub fn read_notebook(path: &Path) -> anyhow::Result<Notebook> {
    ensure_notebook_file(path)?;
    let text = fs::read_to_string(path)?;
    Ok(Notebook::parse(&text, path)?)
}

/// Normalize a notebook file in place
///
/// Returns whether the file's bytes changed.
///
/// # Errors
///
/// Returns an error if the file is not a valid notebook or cannot be written.
pub fn normalize_file(path: &Path, options: &NormalizeOptions) -> anyhow::Result<bool> {
    ensure_notebook_file(path)?;
    let before = fs::read_to_string(path)?;
    let notebook = Notebook::parse(&before, path)?;
    let after = to_canonical_json(&normalize(&notebook, options)?, options.indent)?;
    if after == before {
        return Ok(false);
    }
    fs::write(path, after)?;
    log::debug!("normalized {}", path.display());
    Ok(true)
}

/// Whether normalizing the file would change it
///
/// # Errors
///
/// Returns an error if the file is not a valid notebook.
pub fn needs_normalization(path: &Path, options: &NormalizeOptions) -> anyhow::Result<bool> {
    ensure_notebook_file(path)?;
    let before = fs::read_to_string(path)?;
    let notebook = Notebook::parse(&before, path)?;
    let after = to_canonical_json(&normalize(&notebook, options)?, options.indent)?;
    Ok(after != before)
}

/// Write `src` to `dest` with only the badge cell removed
///
/// # Errors
///
/// Returns an error if `src` is not a valid notebook or `dest` cannot be written.
pub fn drop_badge_file(src: &Path, dest: &Path, options: &NormalizeOptions) -> anyhow::Result<()> {
    let notebook = read_notebook(src)?;
    let out = drop_badge(&notebook, &options.hosting_url);
    fs::write(dest, to_canonical_json(&out, options.indent)?)?;
    Ok(())
}
