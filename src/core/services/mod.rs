//! Pipeline services
//!
//! - [`show_parser`] - Commit inspection text to `CommitRecord`
//! - [`normalizer`] - Canonical notebook form and badge removal
//! - [`equivalence`] - Script-projection equality of two notebooks
//! - [`range`] - Resolve `(base, last]` in original order
//! - [`staging`] - Scoped per-commit file snapshot
//! - [`replay`] - The branch transplanter state machine
//! - [`verify`] - Compare a replayed branch with its original range

pub mod equivalence;
pub mod normalizer;
pub mod range;
pub mod replay;
pub mod show_parser;
pub mod staging;
pub mod verify;

pub use equivalence::{documents_equivalent, equivalent, equivalent_ignoring_badge};
pub use normalizer::{NormalizeOptions, drop_badge, normalize, normalize_file, to_canonical_json};
pub use range::resolve_range;
pub use replay::{ReplayOptions, ReplayReport, ReplayState, Transplanter, abandon_branch};
pub use show_parser::parse_show;
pub use staging::StagingSnapshot;
pub use verify::{VerifyReport, verify_replay};
