//! Version control system port
//!
//! The narrow command surface the rewrite pipeline needs from git.

use std::path::PathBuf;

use crate::core::models::CommitRecord;

/// Version control system abstraction
///
/// Every method maps to one git invocation in the real adapter. Calls are
/// synchronous and operate on the single working tree of the repository.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Root of the working tree
    fn workdir(&self) -> PathBuf;

    /// Resolve a reference (sha prefix, branch, `HEAD~2`, ...) to a full hash
    fn resolve_commit(&self, reference: &str) -> anyhow::Result<String>;

    /// Full hash of the first parent of a commit
    fn parent_of(&self, commit: &str) -> anyhow::Result<String>;

    /// Hashes on the ancestry path `base..last`, oldest first
    fn ancestry(&self, base: &str, last: &str) -> anyhow::Result<Vec<String>>;

    /// Raw "fuller" metadata plus file-change summary of a commit
    fn show(&self, commit: &str) -> anyhow::Result<String>;

    /// Repository-relative paths changed by a commit
    fn changed_files(&self, commit: &str) -> anyhow::Result<Vec<String>>;

    /// Content of a path as of a commit
    fn file_at(&self, commit: &str, path: &str) -> anyhow::Result<Vec<u8>>;

    /// Whether a local branch exists
    fn branch_exists(&self, branch: &str) -> anyhow::Result<bool>;

    /// Currently checked out branch, `None` when detached
    fn current_branch(&self) -> anyhow::Result<Option<String>>;

    /// Create a branch at `start` and check it out
    fn create_branch_at(&self, branch: &str, start: &str) -> anyhow::Result<()>;

    /// Force-delete a local branch
    fn delete_branch(&self, branch: &str) -> anyhow::Result<()>;

    /// Check out an existing branch
    fn checkout(&self, branch: &str) -> anyhow::Result<()>;

    /// Check out a branch, discarding local changes in the way
    fn force_checkout(&self, branch: &str) -> anyhow::Result<()>;

    /// Check out a commit with a detached HEAD
    fn checkout_detached(&self, commit: &str) -> anyhow::Result<()>;

    /// Stage the given paths, including deletions
    fn stage(&self, paths: &[String]) -> anyhow::Result<()>;

    /// Commit the index with the identity, dates and message of `record`
    ///
    /// Empty commits are allowed. Returns the new commit's hash.
    fn commit(&self, record: &CommitRecord) -> anyhow::Result<String>;
}
