//! Commit range resolver
//!
//! Computes the commit just before the requested first commit (the base)
//! and the commits in `(base, last]`, oldest first. Both endpoints are
//! taken from the ancestry query itself and then checked against what was
//! requested; the list is never patched up to make it fit.

use crate::core::error::Error;
use crate::core::models::{CommitRange, CommitRecord, abbreviate};
use crate::core::ports::VersionControl;
use crate::core::services::show_parser::parse_show;

/// Resolve `first..=last` into a [`CommitRange`]
///
/// Every commit's record is read here, before any branch is touched, so
/// replay never has to inspect a commit after the working tree has moved.
///
/// # Errors
///
/// Returns [`Error::RangeResolution`] if the endpoints are not on one linear
/// ancestry path, or a parse error if a commit's metadata cannot be read.
pub fn resolve_range(vcs: &dyn VersionControl, first: &str, last: &str) -> anyhow::Result<CommitRange> {
    let first_sha = vcs
        .resolve_commit(first)
        .map_err(|e| Error::RangeResolution(format!("unknown first commit {first}: {e}")))?;
    let last_sha = vcs
        .resolve_commit(last)
        .map_err(|e| Error::RangeResolution(format!("unknown last commit {last}: {e}")))?;
    let base = vcs
        .parent_of(&first_sha)
        .map_err(|e| Error::RangeResolution(format!("first commit {first} has no parent: {e}")))?;

    let shas = resolve_shas(vcs, &base, &first_sha, &last_sha)?;
    log::info!("resolved {} commit(s) after base {}", shas.len(), abbreviate(&base));

    let commits = shas
        .iter()
        .map(|sha| load_record(vcs, sha))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CommitRange { base, commits })
}

/// Ordered hashes in `(base, last]`, checked against the requested endpoints
///
/// # Errors
///
/// Returns [`Error::RangeResolution`] if the list is empty or its endpoints
/// do not match `first` and `last` by prefix.
pub fn resolve_shas(
    vcs: &dyn VersionControl,
    base: &str,
    first: &str,
    last: &str,
) -> anyhow::Result<Vec<String>> {
    let shas = vcs.ancestry(base, last)?;

    let (Some(head), Some(tail)) = (shas.first(), shas.last()) else {
        return Err(Error::RangeResolution(format!("no commits between {} and {last}", abbreviate(base))).into());
    };
    if !head.starts_with(first) {
        return Err(Error::RangeResolution(format!(
            "range starts at {head}, expected {first}; {last} may not descend from it linearly"
        ))
        .into());
    }
    if !tail.starts_with(last) {
        return Err(Error::RangeResolution(format!("range ends at {tail}, expected {last}")).into());
    }
    Ok(shas)
}

/// Read and parse one commit's metadata
///
/// # Errors
///
/// Returns an error if git fails or the output cannot be parsed.
pub fn load_record(vcs: &dyn VersionControl, sha: &str) -> anyhow::Result<CommitRecord> {
    let raw = vcs.show(sha)?;
    Ok(parse_show(&raw)?)
}
