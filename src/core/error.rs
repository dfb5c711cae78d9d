//! Error taxonomy for the rewrite pipeline
//!
//! Every variant is fatal. Nothing in the pipeline retries: the external
//! tools are deterministic given their inputs, so a second attempt would
//! fail the same way.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the core pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced path is missing, has the wrong extension, or a notebook
    /// lacks the required structure
    #[error("invalid input {}: {reason}", path.display())]
    InputShape {
        /// Offending path (empty for in-memory documents)
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// The requested endpoints do not lie on one linear ancestry path
    #[error("cannot resolve commit range: {0}")]
    RangeResolution(String),

    /// Commit inspection output did not have the expected shape
    #[error("unexpected commit inspection output ({reason}):\n{raw}")]
    Parse {
        /// What did not match
        reason: String,
        /// The raw text, kept for diagnosis
        raw: String,
    },

    /// Normalization changed the executable content of a notebook
    #[error("normalized notebook {path} in commit {commit} is not equivalent to the original")]
    NotEquivalent {
        /// Original commit sha
        commit: String,
        /// Repository-relative notebook path
        path: String,
    },

    /// An external command exited unsuccessfully
    #[error("`{command}` failed: {stderr}")]
    Command {
        /// The command line that was run
        command: String,
        /// Captured standard error
        stderr: String,
    },
}

impl Error {
    /// Build an input-shape error for a path
    pub fn input_shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InputShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a parse error carrying the raw inspection text
    pub fn parse(reason: impl Into<String>, raw: &str) -> Self {
        Self::Parse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}
