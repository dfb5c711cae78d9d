//! Staging snapshot
//!
//! Carries one commit's changed files across a branch switch. The snapshot
//! owns a temporary directory that is removed when the value is dropped,
//! whether the per-commit cycle succeeded or bailed out early.
//!
//! Symbolic links are staged as links, never followed, so a committed link
//! keeps its mode in the replayed commit.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::core::error::Error;

/// Copies of the files changed by one commit, keyed by relative path
#[derive(Debug)]
pub struct StagingSnapshot {
    dir: TempDir,
    files: Vec<String>,
    links: Vec<String>,
    deleted: Vec<String>,
}

impl StagingSnapshot {
    /// Copy `paths` out of `workdir` into a fresh temporary directory
    ///
    /// Paths that do not exist in the working tree, or that became a
    /// directory, were deleted by the commit; they are recorded and removed
    /// again on restore.
    ///
    /// # Errors
    ///
    /// Returns an input-shape error for absolute or escaping paths and for
    /// submodules, or any I/O error from copying.
    pub fn capture(workdir: &Path, paths: &[String]) -> anyhow::Result<Self> {
        let dir = tempfile::Builder::new().prefix("nbrebase-stage-").tempdir()?;
        let mut files = Vec::new();
        let mut links = Vec::new();
        let mut deleted = Vec::new();

        for rel in paths {
            check_relative(rel)?;
            let src = workdir.join(rel);
            let meta = match fs::symlink_metadata(&src) {
                Ok(meta) => meta,
                Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                    deleted.push(rel.clone());
                    continue;
                },
                Err(e) => return Err(e.into()),
            };
            if meta.file_type().is_symlink() {
                copy_entry(&src, &dir.path().join(rel), true)?;
                links.push(rel.clone());
            } else if meta.is_file() {
                copy_entry(&src, &dir.path().join(rel), false)?;
                files.push(rel.clone());
            } else if is_submodule(&src)? {
                return Err(Error::input_shape(src, "submodule entries cannot be replayed").into());
            } else {
                deleted.push(rel.clone());
            }
        }

        log::debug!(
            "staged {} file(s), {} link(s), {} deletion(s) in {}",
            files.len(),
            links.len(),
            deleted.len(),
            dir.path().display()
        );
        Ok(Self {
            dir,
            files,
            links,
            deleted,
        })
    }

    /// Remove deleted paths from `workdir`, then copy every staged entry in
    ///
    /// Deletions go first so a file replaced by a directory (or the other
    /// way round) can be written.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from copying or removing.
    pub fn restore_into(&self, workdir: &Path) -> anyhow::Result<()> {
        for rel in &self.deleted {
            let target = workdir.join(rel);
            if fs::symlink_metadata(&target).is_ok_and(|meta| !meta.is_dir()) {
                fs::remove_file(&target)?;
                prune_empty_parents(workdir, &target);
            }
        }
        for rel in &self.files {
            copy_entry(&self.dir.path().join(rel), &workdir.join(rel), false)?;
        }
        for rel in &self.links {
            copy_entry(&self.dir.path().join(rel), &workdir.join(rel), true)?;
        }
        Ok(())
    }

    /// Location of the staged copy of `rel`
    #[must_use]
    pub fn staged_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Regular files present in the commit
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Symbolic links present in the commit
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Files the commit deleted
    #[must_use]
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    /// Root of the snapshot directory
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

fn check_relative(rel: &str) -> Result<(), Error> {
    let path = Path::new(rel);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if rel.is_empty() || escapes {
        return Err(Error::input_shape(path, "not a repository-relative path"));
    }
    Ok(())
}

/// A changed path that is a directory is a gitlink when it holds a `.git`
/// entry or is an uninitialized (empty) checkout
fn is_submodule(dir: &Path) -> io::Result<bool> {
    if dir.join(".git").exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(dir)?.next().is_none())
}

fn copy_entry(src: &Path, dest: &Path, link: bool) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    // Never write through a link already sitting at the destination
    if fs::symlink_metadata(dest).is_ok_and(|meta| !meta.is_dir()) {
        fs::remove_file(dest)?;
    }
    if link {
        symlink(&fs::read_link(src)?, dest)?;
    } else {
        fs::copy(src, dest)?;
    }
    Ok(())
}

fn prune_empty_parents(workdir: &Path, path: &Path) {
    let mut dir = path.parent();
    while let Some(current) = dir {
        if current == workdir || fs::remove_dir(current).is_err() {
            break;
        }
        dir = current.parent();
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
