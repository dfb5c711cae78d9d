//! Command implementations

mod normalize;
mod range;
mod rebase;
mod show;
mod verify;

pub use normalize::normalize;
pub use range::range;
pub use rebase::rebase;
pub use show::show;
pub use verify::verify;
