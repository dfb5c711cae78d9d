//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the rewrite pipeline
//! and the external tools it drives (git, jupyter).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete
//! implementations. Tests substitute `mockall` mocks.

mod projector;
mod vcs;

pub use projector::ScriptProjector;
pub use vcs::VersionControl;

#[cfg(test)]
pub use projector::MockScriptProjector;
#[cfg(test)]
pub use vcs::MockVersionControl;
