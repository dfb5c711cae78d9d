//! Domain models for nbrebase
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CommitRecord`] - Author, committer, dates and message of one commit
//! - [`CommitRange`] - Commits between a base and an end, oldest first
//! - [`Notebook`] - A notebook document as a sequence of typed cells

mod commit;
mod notebook;

pub use commit::{CommitRange, CommitRecord, abbreviate};
pub use notebook::{Cell, CodeCell, Notebook, Source, TextCell};
