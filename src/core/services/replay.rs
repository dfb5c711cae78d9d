//! Branch transplanter / commit replayer
//!
//! Replays a resolved [`CommitRange`] onto a fresh branch rooted at the
//! range's base. For every original commit the changed files are carried
//! across the branch switch in a [`StagingSnapshot`], notebooks among them
//! are normalized and checked for equivalence, and the result is committed
//! with the original author, committer, dates and message.
//!
//! The working tree and the branch pointer are one piece of shared state,
//! so everything here is strictly sequential.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::error::Error;
use crate::core::models::{CommitRange, CommitRecord};
use crate::core::ports::{ScriptProjector, VersionControl};
use crate::core::services::equivalence::equivalent_ignoring_badge;
use crate::core::services::normalizer::{NOTEBOOK_EXTENSION, NormalizeOptions, normalize_file};
use crate::core::services::staging::StagingSnapshot;

/// Default branch checked out before deleting a stale destination branch
pub const DEFAULT_PRIMARY_BRANCH: &str = "main";

/// Where the transplanter is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayState {
    /// Nothing done yet
    Idle,
    /// Destination branch created at the base and checked out
    BaseCheckedOut,
    /// Original commit `index` checked out and its files snapshotted
    PerCommitStaging {
        /// Position in the range
        index: usize,
    },
    /// Commit `index` replayed onto the destination branch
    PerCommitCommitted {
        /// Position in the range
        index: usize,
    },
    /// Every commit replayed
    Done,
    /// A fatal error stopped the run; the branch is left as it is
    Failed,
}

impl fmt::Display for ReplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::BaseCheckedOut => write!(f, "base checked out"),
            Self::PerCommitStaging { index } => write!(f, "staging commit #{index}"),
            Self::PerCommitCommitted { index } => write!(f, "committed #{index}"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Settings for a replay run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Branch to fall back to when the destination is checked out
    pub primary_branch: String,
    /// Notebook normalization settings
    pub normalize: NormalizeOptions,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            primary_branch: DEFAULT_PRIMARY_BRANCH.to_string(),
            normalize: NormalizeOptions::default(),
        }
    }
}

/// One original commit and its replayed counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayedCommit {
    /// Original hash
    pub original: String,
    /// Hash of the new commit
    pub replayed: String,
    /// Commit subject
    pub subject: String,
    /// Notebooks rewritten by normalization
    pub normalized: Vec<String>,
}

/// Outcome of a finished replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Destination branch
    pub branch: String,
    /// Base commit the branch was rooted at
    pub base: String,
    /// Replayed commits in order
    pub commits: Vec<ReplayedCommit>,
    /// Start time (RFC 3339)
    pub started_at: String,
    /// Finish time (RFC 3339)
    pub finished_at: String,
}

/// Drives the replay state machine over one repository
pub struct Transplanter<'a> {
    vcs: &'a dyn VersionControl,
    projector: &'a dyn ScriptProjector,
    options: ReplayOptions,
    state: ReplayState,
}

impl fmt::Debug for Transplanter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transplanter")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> Transplanter<'a> {
    /// Create an idle transplanter
    #[must_use]
    pub const fn new(
        vcs: &'a dyn VersionControl,
        projector: &'a dyn ScriptProjector,
        options: ReplayOptions,
    ) -> Self {
        Self {
            vcs,
            projector,
            options,
            state: ReplayState::Idle,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ReplayState {
        self.state
    }

    /// Replay the whole range onto `branch`
    ///
    /// # Errors
    ///
    /// Any error aborts the run and leaves the transplanter in
    /// [`ReplayState::Failed`]. The partially built branch is not rolled
    /// back; see [`abandon_branch`].
    pub fn run(&mut self, range: &CommitRange, branch: &str) -> anyhow::Result<ReplayReport> {
        let started_at = chrono::Utc::now().to_rfc3339();
        let result = self.run_inner(range, branch);
        if result.is_err() {
            self.transition(ReplayState::Failed);
        }
        let commits = result?;
        self.transition(ReplayState::Done);

        Ok(ReplayReport {
            branch: branch.to_string(),
            base: range.base.clone(),
            commits,
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn run_inner(&mut self, range: &CommitRange, branch: &str) -> anyhow::Result<Vec<ReplayedCommit>> {
        self.prepare_branch(branch, &range.base)?;

        let mut replayed = Vec::with_capacity(range.len());
        for (index, record) in range.commits.iter().enumerate() {
            log::info!(
                "[{}/{}] {} {}",
                index + 1,
                range.len(),
                record.short_sha(),
                record.subject()
            );
            replayed.push(self.replay_commit(index, record, branch)?);
        }
        Ok(replayed)
    }

    /// Create `branch` at `base` and check it out
    ///
    /// An existing branch of the same name is force-deleted first; if it is
    /// the one checked out, the primary branch is checked out beforehand.
    ///
    /// # Errors
    ///
    /// Returns any git error.
    pub fn prepare_branch(&mut self, branch: &str, base: &str) -> anyhow::Result<()> {
        if self.vcs.branch_exists(branch)? {
            if self.vcs.current_branch()?.as_deref() == Some(branch) {
                log::debug!("{branch} is checked out, switching to {}", self.options.primary_branch);
                self.vcs.checkout(&self.options.primary_branch)?;
            }
            log::info!("deleting existing branch {branch}");
            self.vcs.delete_branch(branch)?;
        }

        self.vcs.create_branch_at(branch, base)?;
        self.transition(ReplayState::BaseCheckedOut);
        Ok(())
    }

    /// Replay one original commit onto the tip of `branch`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEquivalent`] if normalization changed a notebook's
    /// executable content, or any git, I/O or parse error.
    pub fn replay_commit(
        &mut self,
        index: usize,
        record: &CommitRecord,
        branch: &str,
    ) -> anyhow::Result<ReplayedCommit> {
        let workdir = self.vcs.workdir();

        self.vcs.checkout_detached(&record.sha)?;
        let changed = self.vcs.changed_files(&record.sha)?;
        let snapshot = StagingSnapshot::capture(&workdir, &changed)?;
        self.transition(ReplayState::PerCommitStaging { index });

        self.vcs.checkout(branch)?;
        snapshot.restore_into(&workdir)?;

        let mut normalized = Vec::new();
        for rel in snapshot.files().iter().filter(|p| is_notebook(p)) {
            let target = workdir.join(rel);
            if normalize_file(&target, &self.options.normalize)? {
                normalized.push(rel.clone());
            }
            let same = equivalent_ignoring_badge(
                self.projector,
                &snapshot.staged_path(rel),
                &target,
                &self.options.normalize.hosting_url,
            )?;
            if !same {
                return Err(Error::NotEquivalent {
                    commit: record.sha.clone(),
                    path: rel.clone(),
                }
                .into());
            }
        }

        self.vcs.stage(&changed)?;
        let new_sha = self.vcs.commit(record)?;
        self.transition(ReplayState::PerCommitCommitted { index });
        log::debug!("{} -> {}", record.sha, new_sha);

        Ok(ReplayedCommit {
            original: record.sha.clone(),
            replayed: new_sha,
            subject: record.subject().to_string(),
            normalized,
        })
    }

    fn transition(&mut self, next: ReplayState) {
        log::debug!("replay state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Whether a repository path names a notebook
#[must_use]
pub fn is_notebook(path: &str) -> bool {
    Path::new(path).extension().and_then(|e| e.to_str()) == Some(NOTEBOOK_EXTENSION)
}

/// Switch off `branch` and force-delete it
///
/// This is the compensating cleanup for a failed run. Uncommitted files a
/// failed replay left behind are discarded by the checkout. Returns whether
/// the branch existed.
///
/// # Errors
///
/// Returns any git error.
pub fn abandon_branch(vcs: &dyn VersionControl, branch: &str, primary: &str) -> anyhow::Result<bool> {
    if !vcs.branch_exists(branch)? {
        return Ok(false);
    }
    if vcs.current_branch()?.as_deref() != Some(primary) {
        vcs.force_checkout(primary)?;
    }
    log::warn!("deleting partially built branch {branch}");
    vcs.delete_branch(branch)?;
    Ok(true)
}
