//! Replay verifier
//!
//! Compares a replayed branch against the original range it was built from:
//! same number of commits, same metadata, different hashes, same changed
//! paths, and equivalent notebooks.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::core::models::{CommitRange, Notebook};
use crate::core::ports::{ScriptProjector, VersionControl};
use crate::core::services::equivalence::documents_equivalent;
use crate::core::services::normalizer::drop_badge;
use crate::core::services::range::load_record;
use crate::core::services::replay::is_notebook;

/// Comparison of one original commit with its replayed counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitCheck {
    /// Original hash
    pub original: String,
    /// Replayed hash
    pub replayed: String,
    /// Author, committer, dates and message match
    pub metadata_equal: bool,
    /// The two hashes differ
    pub hash_differs: bool,
    /// Both commits changed the same set of paths
    pub files_equal: bool,
    /// Notebooks whose script projections differ
    pub mismatched_notebooks: Vec<String>,
}

impl CommitCheck {
    /// Whether every comparison passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.metadata_equal
            && self.hash_differs
            && self.files_equal
            && self.mismatched_notebooks.is_empty()
    }
}

/// Result of verifying a replayed branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Replayed branch
    pub branch: String,
    /// Commits in the original range
    pub expected_commits: usize,
    /// Commits found on the branch after the base
    pub found_commits: usize,
    /// Per-commit comparisons, in order
    pub checks: Vec<CommitCheck>,
}

impl VerifyReport {
    /// Whether the branch is a faithful replay of the range
    #[must_use]
    pub fn passed(&self) -> bool {
        self.expected_commits == self.found_commits && self.checks.iter().all(CommitCheck::passed)
    }
}

/// Verify `branch` against the `range` it was replayed from
///
/// Mismatches are reported, not raised.
///
/// # Errors
///
/// Returns git, I/O or parse errors.
pub fn verify_replay(
    vcs: &dyn VersionControl,
    projector: &dyn ScriptProjector,
    range: &CommitRange,
    branch: &str,
    hosting_url: &str,
) -> anyhow::Result<VerifyReport> {
    let replayed = vcs.ancestry(&range.base, branch)?;
    let mut checks = Vec::with_capacity(range.len());

    for (original, new_sha) in range.commits.iter().zip(&replayed) {
        let new_record = load_record(vcs, new_sha)?;

        let original_files: BTreeSet<String> = vcs.changed_files(&original.sha)?.into_iter().collect();
        let new_files: BTreeSet<String> = vcs.changed_files(new_sha)?.into_iter().collect();

        let mut mismatched = Vec::new();
        for path in original_files.intersection(&new_files).filter(|p| is_notebook(p)) {
            let (Some(before), Some(after)) = (
                notebook_at(vcs, &original.sha, path)?,
                notebook_at(vcs, new_sha, path)?,
            ) else {
                continue;
            };
            let same = documents_equivalent(
                projector,
                &drop_badge(&before, hosting_url),
                &drop_badge(&after, hosting_url),
            )?;
            if !same {
                mismatched.push(path.clone());
            }
        }

        checks.push(CommitCheck {
            original: original.sha.clone(),
            replayed: new_sha.clone(),
            metadata_equal: original.same_metadata(&new_record),
            hash_differs: original.sha != new_record.sha,
            files_equal: original_files == new_files,
            mismatched_notebooks: mismatched,
        });
    }

    let report = VerifyReport {
        branch: branch.to_string(),
        expected_commits: range.len(),
        found_commits: replayed.len(),
        checks,
    };
    if report.passed() {
        log::info!("verified {} replayed commit(s) on {branch}", report.found_commits);
    } else {
        log::warn!("replayed branch {branch} does not match the original range");
    }
    Ok(report)
}

/// Parse a notebook as of a commit; `None` if the commit deleted it
fn notebook_at(vcs: &dyn VersionControl, commit: &str, path: &str) -> anyhow::Result<Option<Notebook>> {
    let Ok(bytes) = vcs.file_at(commit, path) else {
        return Ok(None);
    };
    let text = String::from_utf8(bytes)?;
    Ok(Some(Notebook::parse(&text, Path::new(path))?))
}
