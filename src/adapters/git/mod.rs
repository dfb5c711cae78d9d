//! Git integration adapter
//!
//! Implements `VersionControl` by running the `git` executable in the
//! repository's working tree. Every call blocks until git exits.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::core::Error;
use crate::core::models::CommitRecord;
use crate::core::ports::VersionControl;

/// Git-based version control implementation
#[derive(Debug, Clone)]
pub struct GitVersionControl {
    /// Working directory
    workdir: PathBuf,
}

impl GitVersionControl {
    /// Create a new git version control adapter
    #[must_use]
    pub const fn new(workdir: PathBuf) -> Self {
        Self { workdir }
    }

    /// Open the repository containing `path`, rooted at its top level
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a git working tree.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let probe = Self::new(path.into());
        let root = probe.git_text(["rev-parse", "--show-toplevel"])?;
        Ok(Self::new(PathBuf::from(root)))
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir).args(args);
        cmd
    }

    /// Run a prepared command and fail on a non-zero exit
    fn run(mut cmd: Command) -> anyhow::Result<Output> {
        let line = describe(&cmd);
        log::debug!("running {line}");
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::Command {
                command: line,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }

    fn git<I, S>(&self, args: I) -> anyhow::Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::run(self.command(args))
    }

    /// Run git and return trimmed stdout
    fn git_text<I, S>(&self, args: I) -> anyhow::Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.git(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitVersionControl {
    fn workdir(&self) -> PathBuf {
        self.workdir.clone()
    }

    fn resolve_commit(&self, reference: &str) -> anyhow::Result<String> {
        self.git_text(["rev-parse", "--verify", &format!("{reference}^{{commit}}")])
    }

    fn parent_of(&self, commit: &str) -> anyhow::Result<String> {
        self.git_text(["rev-parse", "--verify", &format!("{commit}^")])
    }

    fn ancestry(&self, base: &str, last: &str) -> anyhow::Result<Vec<String>> {
        let text = self.git_text([
            "log",
            "--reverse",
            "--ancestry-path",
            "--pretty=format:%H",
            &format!("{base}..{last}"),
        ])?;
        Ok(lines(&text))
    }

    fn show(&self, commit: &str) -> anyhow::Result<String> {
        let output = self.git(["show", "--no-color", "--pretty=fuller", "--stat", commit])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn changed_files(&self, commit: &str) -> anyhow::Result<Vec<String>> {
        // Unquoted paths, even with quotes, backslashes or control bytes
        let output = self.git(["diff-tree", "-z", "--no-commit-id", "--name-only", "-r", "--root", commit])?;
        Ok(nul_separated(&output.stdout))
    }

    fn file_at(&self, commit: &str, path: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.git(["show", &format!("{commit}:{path}")])?.stdout)
    }

    fn branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        let output = self
            .command(["show-ref", "--verify", "--quiet", &format!("refs/heads/{branch}")])
            .output()?;
        Ok(output.status.success())
    }

    fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let branch = self.git_text(["branch", "--show-current"])?;
        if branch.is_empty() {
            Ok(None) // Detached HEAD
        } else {
            Ok(Some(branch))
        }
    }

    fn create_branch_at(&self, branch: &str, start: &str) -> anyhow::Result<()> {
        self.git(["checkout", "-b", branch, start])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.git(["branch", "-D", branch])?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> anyhow::Result<()> {
        self.git(["checkout", branch])?;
        Ok(())
    }

    fn force_checkout(&self, branch: &str) -> anyhow::Result<()> {
        self.git(["checkout", "--force", branch])?;
        Ok(())
    }

    fn checkout_detached(&self, commit: &str) -> anyhow::Result<()> {
        self.git(["checkout", "--detach", commit])?;
        Ok(())
    }

    fn stage(&self, paths: &[String]) -> anyhow::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["--literal-pathspecs", "add", "-A", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.git(args)?;
        Ok(())
    }

    fn commit(&self, record: &CommitRecord) -> anyhow::Result<String> {
        let mut cmd = self.command([
            "commit",
            "--allow-empty",
            "--allow-empty-message",
            "--no-verify",
            "--cleanup=whitespace",
            "--author",
            &record.author_ident(),
            "--date",
            &record.author_date,
            "-m",
            &record.message,
        ]);
        // Scoped to the child process; our own environment is untouched.
        cmd.env("GIT_COMMITTER_NAME", &record.committer_name)
            .env("GIT_COMMITTER_EMAIL", &record.committer_email)
            .env("GIT_COMMITTER_DATE", &record.commit_date);
        Self::run(cmd)?;
        self.git_text(["rev-parse", "HEAD"])
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

fn nul_separated(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|&b| b == 0)
        .filter(|path| !path.is_empty())
        .map(|path| String::from_utf8_lossy(path).into_owned())
        .collect()
}

fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
