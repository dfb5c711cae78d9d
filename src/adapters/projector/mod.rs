//! Script projector adapters
//!
//! - [`builtin`] - in-process projection of code cells
//! - [`nbconvert`] - shells out to `jupyter nbconvert --to python`

pub mod builtin;
pub mod nbconvert;

pub use builtin::BuiltinProjector;
pub use nbconvert::NbconvertProjector;

use serde::{Deserialize, Serialize};

use crate::core::ports::ScriptProjector;

/// Which projector the equivalence oracle runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectorKind {
    /// [`BuiltinProjector`]
    #[default]
    Builtin,
    /// [`NbconvertProjector`]
    Nbconvert,
}

impl ProjectorKind {
    /// Build the selected projector; `jupyter` is the executable nbconvert runs under
    #[must_use]
    pub fn build(self, jupyter: &str) -> Box<dyn ScriptProjector> {
        match self {
            Self::Builtin => Box::new(BuiltinProjector),
            Self::Nbconvert => Box::new(NbconvertProjector::new(jupyter)),
        }
    }
}
