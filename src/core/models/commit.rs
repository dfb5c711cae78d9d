//! Commit record and commit range models

use serde::{Deserialize, Serialize};

/// Identity and message of one historical commit
///
/// Dates are kept exactly as git printed them so they can be fed back to
/// `git commit --date` and `GIT_COMMITTER_DATE` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub sha: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Original authorship timestamp
    pub author_date: String,
    /// Committer name
    pub committer_name: String,
    /// Committer email
    pub committer_email: String,
    /// Commit timestamp
    pub commit_date: String,
    /// Commit message, each line trimmed
    pub message: String,
}

impl CommitRecord {
    /// Compare everything except the hash
    ///
    /// A replayed commit always gets a new hash because its parent differs.
    #[must_use]
    pub fn same_metadata(&self, other: &Self) -> bool {
        self.author_name == other.author_name
            && self.author_email == other.author_email
            && self.author_date == other.author_date
            && self.committer_name == other.committer_name
            && self.committer_email == other.committer_email
            && self.commit_date == other.commit_date
            && self.message == other.message
    }

    /// `Name <email>` form of the author, as `git commit --author` expects
    #[must_use]
    pub fn author_ident(&self) -> String {
        format!("{} <{}>", self.author_name, self.author_email)
    }

    /// First line of the message
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Abbreviated hash for display
    #[must_use]
    pub fn short_sha(&self) -> &str {
        abbreviate(&self.sha)
    }
}

/// First seven characters of a hash, or the whole hash if shorter
#[must_use]
pub fn abbreviate(sha: &str) -> &str {
    &sha[..7.min(sha.len())]
}

/// Ordered commits in `(base, last]`, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRange {
    /// Full hash of the commit just before the range
    pub base: String,
    /// Commits in the order they were originally made
    pub commits: Vec<CommitRecord>,
}

impl CommitRange {
    /// Number of commits in the range
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the range holds no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Hashes in range order
    pub fn shas(&self) -> impl Iterator<Item = &str> {
        self.commits.iter().map(|c| c.sha.as_str())
    }
}
