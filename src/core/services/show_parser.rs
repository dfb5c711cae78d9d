//! Commit metadata parser
//!
//! Turns the output of `git show --pretty=fuller --stat <sha>` into a
//! [`CommitRecord`]. The layout is positional:
//!
//! ```text
//! commit <sha> (decorations)
//! Author:     <name> <<email>>
//! AuthorDate: <date>
//! Commit:     <name> <<email>>
//! CommitDate: <date>
//!
//!     <message lines>
//!
//!  <path> | <stat>            (one line per changed file)
//!  N files changed, ...
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::core::error::Error;
use crate::core::models::CommitRecord;

/// Number of header lines before the message body
const HEADER_LINES: usize = 5;

fn ident_re() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| {
        Regex::new(r"^(?P<name>[^<]*)<(?P<email>[^<>]*)>\s*$").expect("valid identity regex")
    })
}

/// Parse commit inspection text into a commit record
///
/// # Errors
///
/// Returns [`Error::Parse`] when the header lines do not have the expected
/// shape or the footer's file count is not an integer. Both mean the
/// inspection format changed and must not be tolerated silently.
pub fn parse_show(raw: &str) -> Result<CommitRecord, Error> {
    let lines: Vec<&str> = raw.lines().collect();
    if lines.len() < HEADER_LINES {
        return Err(Error::parse(
            format!("expected at least {HEADER_LINES} header lines, got {}", lines.len()),
            raw,
        ));
    }

    let sha = lines[0]
        .split_whitespace()
        .nth(1)
        .filter(|_| lines[0].starts_with("commit "))
        .ok_or_else(|| Error::parse("first line does not name a commit", raw))?
        .to_string();

    let (author_name, author_email) = parse_ident(field_value(lines[1], raw)?, raw)?;
    let author_date = field_value(lines[2], raw)?.to_string();
    let (committer_name, committer_email) = parse_ident(field_value(lines[3], raw)?, raw)?;
    let commit_date = field_value(lines[4], raw)?.to_string();

    let body_end = body_end(&lines, raw)?;
    let message = if body_end > HEADER_LINES {
        clean_message(&lines[HEADER_LINES..body_end])
    } else {
        String::new()
    };

    Ok(CommitRecord {
        sha,
        author_name,
        author_email,
        author_date,
        committer_name,
        committer_email,
        commit_date,
        message,
    })
}

/// Value after a `Label:` prefix, trimmed
fn field_value<'a>(line: &'a str, raw: &str) -> Result<&'a str, Error> {
    line.split_once(':')
        .map(|(_, value)| value.trim())
        .ok_or_else(|| Error::parse(format!("missing field label in {line:?}"), raw))
}

/// Split `Name <email>` into its parts
fn parse_ident(value: &str, raw: &str) -> Result<(String, String), Error> {
    let caps = ident_re()
        .captures(value)
        .ok_or_else(|| Error::parse(format!("malformed identity {value:?}"), raw))?;
    Ok((caps["name"].trim().to_string(), caps["email"].trim().to_string()))
}

/// Index one past the last message line
///
/// When the last non-empty line is a `N file(s) changed` footer, the footer
/// and the N per-file stat lines above it are excluded.
fn body_end(lines: &[&str], raw: &str) -> Result<usize, Error> {
    let Some(footer_idx) = lines.iter().rposition(|l| !l.trim().is_empty()) else {
        return Ok(lines.len());
    };

    let footer = lines[footer_idx];
    if !is_footer(footer) {
        return Ok(lines.len());
    }

    let token = footer.split_whitespace().next().unwrap_or_default();
    let count: usize = token
        .parse()
        .map_err(|_| Error::parse(format!("file count {token:?} in footer is not a number"), raw))?;

    footer_idx
        .checked_sub(count)
        .filter(|end| *end >= HEADER_LINES)
        .ok_or_else(|| {
            Error::parse(format!("footer reports {count} files but the stat block is shorter"), raw)
        })
}

/// Whether a line is the file-change summary footer
#[must_use]
pub fn is_footer(line: &str) -> bool {
    line.contains("file changed") || line.contains("files changed")
}

/// Trim every line, rejoin, and drop leading/trailing blank lines
#[must_use]
pub fn clean_message(lines: &[&str]) -> String {
    lines.iter().map(|l| l.trim()).collect::<Vec<_>>().join("\n").trim().to_string()
}
