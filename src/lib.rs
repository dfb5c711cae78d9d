//! nbrebase - Replay a range of git history with every touched Jupyter
//! notebook normalized
//!
//! Hosted notebook platforms stamp cells with random identifiers, output ids
//! and "open in" badges. This library rewrites a slice of history so those
//! artifacts disappear while every commit keeps its author, committer,
//! dates and message, and checks that no executable content changed.
//!
//! - [`core`] - domain model, ports and the rewrite pipeline
//! - [`adapters`] - git and script-projection implementations of the ports
//! - [`config`] - layered TOML configuration
//! - [`output`] - human and JSON rendering of results

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]
#![cfg_attr(test, allow(missing_docs))]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
