//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - [`git`] - `VersionControl` over the `git` executable
//! - [`projector`] - `ScriptProjector` implementations

pub mod git;
pub mod projector;

pub use git::GitVersionControl;
pub use projector::{BuiltinProjector, NbconvertProjector, ProjectorKind};
