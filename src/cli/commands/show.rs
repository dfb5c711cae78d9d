//! Print the parsed metadata of one commit

use std::path::Path;

use nbrebase::adapters::GitVersionControl;
use nbrebase::core::ports::VersionControl;
use nbrebase::core::services::range::load_record;
use nbrebase::output::{OutputMode, ShowResult};

/// Show the `CommitRecord` parsed for `commit`
pub fn show(repo: &Path, commit: &str, mode: OutputMode) -> anyhow::Result<()> {
    let vcs = GitVersionControl::open(repo)?;
    let sha = vcs.resolve_commit(commit)?;
    ShowResult(load_record(&vcs, &sha)?).render(mode);
    Ok(())
}
