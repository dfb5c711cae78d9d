//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use std::path::Path;

use nbrebase::core::Error;
use nbrebase::core::models::Notebook;
use nbrebase::core::services::normalizer::ensure_notebook_file;
use nbrebase::core::services::{NormalizeOptions, normalize, parse_show};
use serde_json::{Value, json};
use test_case::test_case;

// =============================================================================
// Commit inspection parsing
// =============================================================================

fn show_with(author: &str, tail: &str) -> String {
    format!(
        "commit abc123\nAuthor:     {author}\nAuthorDate: Mon Jan 2 10:00:00 2023 +0000\n\
         Commit:     C <c@x>\nCommitDate: Mon Jan 2 10:00:00 2023 +0000\n\n{tail}"
    )
}

#[test_case("Jane Doe <jane@example.com>", "Jane Doe", "jane@example.com" ; "plain identity")]
#[test_case("Jean-Luc Émile <jl@exemple.fr>", "Jean-Luc Émile", "jl@exemple.fr" ; "non ascii name")]
#[test_case("bot <>", "bot", "" ; "empty email")]
#[test_case("O'Brien, Pat <pat+git@example.com>", "O'Brien, Pat", "pat+git@example.com" ; "punctuation")]
fn test_identity_parsing(ident: &str, name: &str, email: &str) {
    let record = parse_show(&show_with(ident, "    msg\n")).unwrap();
    assert_eq!(record.author_name, name);
    assert_eq!(record.author_email, email);
}

#[test_case("    msg\n\n a | 1 +\n 1 file changed, 1 insertion(+)\n", "msg" ; "one file")]
#[test_case("    msg\n\n a | 1 +\n b | 1 +\n 2 files changed, 2 insertions(+)\n", "msg" ; "two files")]
#[test_case("    msg\n\n    body\n", "msg\n\nbody" ; "no footer")]
#[test_case("    subject\n    continued\n\n a | 1 -\n 1 file changed, 1 deletion(-)\n", "subject\ncontinued" ; "multi line subject")]
#[test_case("", "" ; "empty message")]
fn test_message_extraction(tail: &str, expected: &str) {
    let record = parse_show(&show_with("A <a@x>", tail)).unwrap();
    assert_eq!(record.message, expected);
}

#[test_case("Author A <a@x>" ; "missing colon")]
#[test_case("Author: A a@x" ; "missing brackets")]
fn test_malformed_author_line(line: &str) {
    let raw = format!("commit abc\n{line}\nAuthorDate: d\nCommit: C <c@x>\nCommitDate: d\n");
    assert!(matches!(parse_show(&raw), Err(Error::Parse { .. })));
}

// =============================================================================
// Normalization
// =============================================================================

fn single_cell(cell: Value) -> Notebook {
    Notebook::parse(&json!({ "cells": [cell] }).to_string(), Path::new("t.ipynb")).unwrap()
}

fn options(allowed: &[&str]) -> NormalizeOptions {
    NormalizeOptions {
        allowed_ids: allowed.iter().map(ToString::to_string).collect(),
        ..NormalizeOptions::default()
    }
}

#[test_case("markdown" ; "markdown cell")]
#[test_case("raw" ; "raw cell")]
fn test_text_cell_ids_removed(kind: &str) {
    let nb = single_cell(json!({"cell_type": kind, "id": "x1", "metadata": {"id": "m1"}, "source": "t"}));
    let out = normalize(&nb, &options(&[])).unwrap();
    assert!(out.cells[0].id().is_none());
    assert!(out.cells[0].metadata().is_empty());
}

#[test_case("view-in-github", &["view-in-github"], true ; "allow listed id kept")]
#[test_case("Xq3bB1", &["view-in-github"], false ; "random id removed")]
#[test_case("anchor", &["anchor", "other"], true ; "custom allow list")]
#[test_case("view-in-github", &[], false ; "empty allow list")]
fn test_metadata_id_allow_list(id: &str, allowed: &[&str], kept: bool) {
    let nb = single_cell(json!({"cell_type": "code", "metadata": {"id": id}, "outputs": [], "source": ""}));
    let out = normalize(&nb, &options(allowed)).unwrap();
    assert_eq!(out.cells[0].metadata().contains_key("id"), kept);
}

#[test_case("outputId" ; "output id")]
#[test_case("colab" ; "hosted badge object")]
fn test_hosted_keys_removed(key: &str) {
    let nb = single_cell(json!({
        "cell_type": "code",
        "metadata": {key: {"v": 1}, "tags": ["keep"]},
        "outputs": [],
        "source": ""
    }));
    let out = normalize(&nb, &options(&[])).unwrap();
    assert!(!out.cells[0].metadata().contains_key(key));
    assert_eq!(out.cells[0].metadata()["tags"], json!(["keep"]));
}

// =============================================================================
// Input shape
// =============================================================================

#[test_case("notes.txt", true ; "wrong extension")]
#[test_case("missing.ipynb", false ; "missing file")]
fn test_input_shape_errors(name: &str, create: bool) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(name);
    if create {
        std::fs::write(&path, "{}").unwrap();
    }
    assert!(matches!(ensure_notebook_file(&path), Err(Error::InputShape { .. })));
}
