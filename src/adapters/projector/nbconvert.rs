//! `jupyter nbconvert` projector

use std::path::Path;
use std::process::Command;

use crate::core::Error;
use crate::core::ports::ScriptProjector;

/// Default executable name
pub const DEFAULT_JUPYTER: &str = "jupyter";

/// Projector backed by `jupyter nbconvert --to python`
#[derive(Debug, Clone)]
pub struct NbconvertProjector {
    jupyter: String,
}

impl NbconvertProjector {
    /// Use the given `jupyter` executable
    #[must_use]
    pub fn new(jupyter: impl Into<String>) -> Self {
        Self {
            jupyter: jupyter.into(),
        }
    }
}

impl Default for NbconvertProjector {
    fn default() -> Self {
        Self::new(DEFAULT_JUPYTER)
    }
}

impl ScriptProjector for NbconvertProjector {
    fn project(&self, notebook: &Path, output: &Path) -> anyhow::Result<()> {
        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        // nbconvert appends the `.py` extension itself
        let stem = output.file_stem().ok_or_else(|| Error::input_shape(output, "no file name"))?;

        let mut cmd = Command::new(&self.jupyter);
        cmd.arg("nbconvert")
            .args(["--to", "python"])
            .arg(notebook)
            .arg("--output-dir")
            .arg(dir)
            .arg("--output")
            .arg(stem);
        log::debug!("running {cmd:?}");

        let out = cmd.output()?;
        if !out.status.success() {
            return Err(Error::Command {
                command: format!("{} nbconvert --to python {}", self.jupyter, notebook.display()),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }
}
