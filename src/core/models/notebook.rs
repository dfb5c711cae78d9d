//! Notebook document model
//!
//! A notebook is an ordered list of cells plus whatever top-level keys the
//! document carries (`metadata`, `nbformat`, ...). Keys this crate does not
//! interpret are kept verbatim in the flattened maps so a parse/serialize
//! cycle loses nothing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::Error;

/// A Jupyter notebook document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,

    /// Remaining top-level keys
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// One notebook cell, tagged by `cell_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Narrative text
    Markdown(TextCell),
    /// Executable source with its outputs
    Code(CodeCell),
    /// Raw passthrough content
    Raw(TextCell),
}

/// Body shared by markdown and raw cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    /// Platform-assigned cell identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Cell metadata; an absent object reads as empty
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Cell source
    pub source: Source,
    /// Remaining keys (`attachments`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a code cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    /// Platform-assigned cell identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Cell metadata; an absent object reads as empty
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Cell source
    pub source: Source,
    /// Execution results
    pub outputs: Vec<Value>,
    /// Remaining keys (`execution_count`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell source: a list of lines or one text blob, kept in the form it was read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Lines, each normally ending in `\n` except the last
    Lines(Vec<String>),
    /// A single string
    Text(String),
}

impl Source {
    /// The first line of the source, if any
    #[must_use]
    pub fn first_line(&self) -> Option<&str> {
        match self {
            Self::Lines(lines) => lines.first().map(String::as_str),
            Self::Text(text) => text.lines().next(),
        }
    }

    /// The full source text
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Lines(lines) => lines.concat(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl Cell {
    /// The `cell_type` name
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Markdown(_) => "markdown",
            Self::Code(_) => "code",
            Self::Raw(_) => "raw",
        }
    }

    /// Cell-level identifier
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        match self {
            Self::Markdown(c) | Self::Raw(c) => c.id.as_ref(),
            Self::Code(c) => c.id.as_ref(),
        }
    }

    /// Remove and return the cell-level identifier
    pub fn take_id(&mut self) -> Option<Value> {
        match self {
            Self::Markdown(c) | Self::Raw(c) => c.id.take(),
            Self::Code(c) => c.id.take(),
        }
    }

    /// Cell metadata
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        match self {
            Self::Markdown(c) | Self::Raw(c) => &c.metadata,
            Self::Code(c) => &c.metadata,
        }
    }

    /// Mutable cell metadata
    pub fn metadata_mut(&mut self) -> &mut Map<String, Value> {
        match self {
            Self::Markdown(c) | Self::Raw(c) => &mut c.metadata,
            Self::Code(c) => &mut c.metadata,
        }
    }

    /// Cell source
    #[must_use]
    pub const fn source(&self) -> &Source {
        match self {
            Self::Markdown(c) | Self::Raw(c) => &c.source,
            Self::Code(c) => &c.source,
        }
    }
}

impl Notebook {
    /// Parse a notebook from JSON text
    ///
    /// `origin` only labels the error; pass an empty path for in-memory text.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, Error> {
        serde_json::from_str(text)
            .map_err(|e| Error::input_shape(origin, format!("not a notebook document: {e}")))
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the notebook has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
