//! Common test utilities shared across test types
//!
//! - `fixtures.rs` - Notebook documents in hosted-platform and clean form
//! - `git_repo.rs` - Temporary git repository helper

pub mod git_repo;
