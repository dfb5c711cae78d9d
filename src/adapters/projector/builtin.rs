//! Built-in script projector
//!
//! Emits the code cells of a notebook in document order, each under an
//! `# In[n]:` header, in the layout `nbconvert --to python` uses. Markdown
//! and raw cells are skipped, so prose edits never count as a difference.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::models::{Cell, Notebook};
use crate::core::ports::ScriptProjector;
use crate::core::services::normalizer::read_notebook;

const PREAMBLE: &str = "#!/usr/bin/env python\n# coding: utf-8\n";

/// In-process projector that needs no Python installation
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProjector;

impl BuiltinProjector {
    /// Render a parsed notebook as a script
    #[must_use]
    pub fn render(notebook: &Notebook) -> String {
        let mut script = String::from(PREAMBLE);
        for cell in &notebook.cells {
            let Cell::Code(code) = cell else {
                continue;
            };
            let count = match code.extra.get("execution_count") {
                Some(Value::Number(n)) => n.to_string(),
                _ => " ".to_string(),
            };
            script.push_str(&format!("\n# In[{count}]:\n\n\n{}\n\n", code.source.text()));
        }
        script
    }
}

impl ScriptProjector for BuiltinProjector {
    fn project(&self, notebook: &Path, output: &Path) -> anyhow::Result<()> {
        let parsed = read_notebook(notebook)?;
        log::debug!("projecting {} -> {}", notebook.display(), output.display());
        fs::write(output, Self::render(&parsed))?;
        Ok(())
    }
}
