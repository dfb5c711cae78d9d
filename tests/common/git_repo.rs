//! Temporary git repository helper for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Identity and timestamps for one test commit
pub struct Signature<'a> {
    pub author: (&'a str, &'a str),
    pub committer: (&'a str, &'a str),
    pub author_date: &'a str,
    pub commit_date: &'a str,
}

impl Default for Signature<'_> {
    fn default() -> Self {
        Self {
            author: ("Test User", "test@example.com"),
            committer: ("Test User", "test@example.com"),
            author_date: "2023-01-02T10:00:00+00:00",
            commit_date: "2023-01-02T10:00:00+00:00",
        }
    }
}

/// A temporary git repository for testing
pub struct TempGitRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TempGitRepo {
    /// Create a new temporary git repository on branch `main`
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Resolve symlinks (macOS /var -> /private/var) so paths compare equal
        // to what `git rev-parse --show-toplevel` reports.
        let path = temp_dir.path().canonicalize().expect("Failed to resolve temp directory");

        let repo = Self {
            _temp_dir: temp_dir,
            path,
        };
        repo.git_ok(&["init", "--quiet"]);
        repo.git_ok(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git_ok(&["config", "user.name", "Test User"]);
        repo.git_ok(&["config", "user.email", "test@example.com"]);
        repo.git_ok(&["config", "commit.gpgsign", "false"]);
        repo.git_ok(&["config", "core.autocrlf", "false"]);
        repo
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a file to the repository
    pub fn write_file(&self, name: &str, content: &str) {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(file_path, content).expect("Failed to write file");
    }

    /// Delete a file from the working tree
    pub fn remove_file(&self, name: &str) {
        std::fs::remove_file(self.path.join(name)).expect("Failed to remove file");
    }

    /// Read a file from the working tree
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path.join(name)).expect("Failed to read file")
    }

    /// Stage everything and commit with a default signature
    pub fn commit(&self, message: &str) -> String {
        self.commit_as(message, &Signature::default())
    }

    /// Stage everything and commit with explicit identities and dates
    pub fn commit_as(&self, message: &str, sig: &Signature<'_>) -> String {
        self.git_ok(&["add", "-A"]);
        let output = Command::new("git")
            .args(["commit", "--quiet", "--allow-empty", "--allow-empty-message", "-m", message])
            .current_dir(&self.path)
            .env("GIT_AUTHOR_NAME", sig.author.0)
            .env("GIT_AUTHOR_EMAIL", sig.author.1)
            .env("GIT_AUTHOR_DATE", sig.author_date)
            .env("GIT_COMMITTER_NAME", sig.committer.0)
            .env("GIT_COMMITTER_EMAIL", sig.committer.1)
            .env("GIT_COMMITTER_DATE", sig.commit_date)
            .output()
            .expect("Failed to commit");
        assert!(output.status.success(), "commit failed: {}", String::from_utf8_lossy(&output.stderr));
        self.git_text(&["rev-parse", "HEAD"])
    }

    /// Run a git command and return output
    pub fn git(&self, args: &[&str]) -> std::process::Output {
        Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .expect("Failed to run git command")
    }

    /// Run a git command that must succeed
    pub fn git_ok(&self, args: &[&str]) {
        let output = self.git(args);
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Run a git command and return trimmed stdout
    pub fn git_text(&self, args: &[&str]) -> String {
        let output = self.git(args);
        assert!(output.status.success(), "git {args:?} failed");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Hashes in `from..to`, oldest first
    pub fn log_range(&self, from: &str, to: &str) -> Vec<String> {
        self.git_text(&["log", "--reverse", "--pretty=format:%H", &format!("{from}..{to}")])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Author, committer, dates and message of a commit, one field per line
    pub fn metadata(&self, commit: &str) -> String {
        self.git_text(&["show", "-s", "--format=%an%n%ae%n%aD%n%cn%n%ce%n%cD%n%B", commit])
    }
}

impl Default for TempGitRepo {
    fn default() -> Self {
        Self::new()
    }
}
