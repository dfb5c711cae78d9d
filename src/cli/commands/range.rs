//! Print the commits a rebase would replay

use std::path::Path;

use nbrebase::adapters::GitVersionControl;
use nbrebase::core::services::resolve_range;
use nbrebase::output::{OutputMode, RangeResult};

/// Resolve `first..=last` and print it
pub fn range(repo: &Path, first: &str, last: &str, mode: OutputMode) -> anyhow::Result<()> {
    let vcs = GitVersionControl::open(repo)?;
    RangeResult(resolve_range(&vcs, first, last)?).render(mode);
    Ok(())
}
