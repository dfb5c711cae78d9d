//! Core domain logic for nbrebase
//!
//! All external interactions (git, the notebook-to-script converter) are
//! abstracted through port traits so the pipeline can run against fakes.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`CommitRecord`, `CommitRange`, `Notebook`)
//! - `services/` - Parsing, normalization, range resolution, replay
//! - `ports/` - Trait definitions for external dependencies
//! - `error` - The fatal error taxonomy

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::Error;
