//! Solver core types shared by every solver implementation.

mod direction;
mod settings;
mod traits;

pub use direction::*;
pub use settings::*;
pub use traits::*;
