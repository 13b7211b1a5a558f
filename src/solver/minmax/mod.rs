//! Value iteration for min/max equation systems over row-grouped matrices.

mod info;
mod settings;
mod solver;
mod workspace;

pub use info::*;
pub use settings::*;
pub use solver::*;
