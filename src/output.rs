//! Output formatting for human and JSON modes
//!
//! Every command result can be rendered either as human-readable text or as
//! machine-parseable JSON.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{CommitRange, CommitRecord, abbreviate};
use crate::core::services::{ReplayReport, VerifyReport};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of a `rebase` run
#[derive(Debug, Serialize)]
pub struct RebaseResult {
    /// What was replayed
    pub replay: ReplayReport,
    /// Post-replay verification, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerifyReport>,
}

impl RebaseResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let replay = &self.replay;
        println!(
            "Replayed {} commit(s) onto {} (base {})\n",
            replay.commits.len(),
            replay.branch.bold(),
            abbreviate(&replay.base)
        );
        for commit in &replay.commits {
            println!(
                "  {} -> {}  {}",
                abbreviate(&commit.original),
                abbreviate(&commit.replayed),
                commit.subject
            );
            for path in &commit.normalized {
                println!("      normalized {path}");
            }
        }
        if let Some(verification) = &self.verification {
            println!();
            render_verify_human(verification);
        }
    }
}

fn render_verify_human(report: &VerifyReport) {
    if report.expected_commits != report.found_commits {
        println!(
            "{} expected {} commit(s) on {}, found {}",
            "MISMATCH".red().bold(),
            report.expected_commits,
            report.branch,
            report.found_commits
        );
    }
    for check in &report.checks {
        if check.passed() {
            continue;
        }
        let mut problems = Vec::new();
        if !check.metadata_equal {
            problems.push("metadata differs".to_string());
        }
        if !check.hash_differs {
            problems.push("hash unchanged".to_string());
        }
        if !check.files_equal {
            problems.push("changed paths differ".to_string());
        }
        for path in &check.mismatched_notebooks {
            problems.push(format!("{path} not equivalent"));
        }
        println!("  {} {}: {}", "FAIL".red(), abbreviate(&check.original), problems.join(", "));
    }
    if report.passed() {
        println!("{} {} matches the original range", "OK".green().bold(), report.branch);
    }
}

/// One file seen by `normalize`
#[derive(Debug, Serialize)]
pub struct NormalizedFile {
    /// Notebook path
    pub path: PathBuf,
    /// Whether the file was (or, with `--check`, would be) rewritten
    pub changed: bool,
}

/// Result of a `normalize` run
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    /// Files were only inspected
    pub check: bool,
    /// Files processed, in walk order
    pub files: Vec<NormalizedFile>,
}

impl NormalizeResult {
    /// Number of files that changed or would change
    #[must_use]
    pub fn changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.files.is_empty() {
            println!("No notebooks found.");
            return;
        }
        let verb = if self.check { "would change" } else { "normalized" };
        for file in self.files.iter().filter(|f| f.changed) {
            println!("  {} {}", verb.yellow(), file.path.display());
        }
        println!("{} of {} notebook(s) {verb}", self.changed(), self.files.len());
    }
}

/// Result of comparing two notebook files
#[derive(Debug, Serialize)]
pub struct EquivalenceResult {
    /// First notebook
    pub a: PathBuf,
    /// Second notebook
    pub b: PathBuf,
    /// Whether the script projections match
    pub equivalent: bool,
}

impl EquivalenceResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.equivalent {
                    println!("{} notebooks are equivalent", "OK".green().bold());
                } else {
                    println!(
                        "{} {} and {} differ",
                        "DIFFERENT".red().bold(),
                        self.a.display(),
                        self.b.display()
                    );
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Parsed metadata of one commit
#[derive(Debug, Serialize)]
pub struct ShowResult(pub CommitRecord);

impl ShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => render_record(&self.0),
            OutputMode::Json => print_json(&self.0),
        }
    }
}

fn render_record(record: &CommitRecord) {
    println!("{} {}", "commit".yellow(), record.sha);
    println!("Author:     {} <{}>", record.author_name, record.author_email);
    println!("AuthorDate: {}", record.author_date);
    println!("Commit:     {} <{}>", record.committer_name, record.committer_email);
    println!("CommitDate: {}", record.commit_date);
    println!();
    for line in record.message.lines() {
        println!("    {line}");
    }
}

/// A resolved commit range
#[derive(Debug, Serialize)]
pub struct RangeResult(pub CommitRange);

impl RangeResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("base {}", self.0.base);
                for record in &self.0.commits {
                    println!("  {} {}", record.short_sha().yellow(), record.subject());
                }
            },
            OutputMode::Json => print_json(&self.0),
        }
    }
}
