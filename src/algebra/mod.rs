//! Numeric types and linear algebra.
//!
//! Contains the [`FloatT`] numeric trait, slice vector math and the
//! [`SparseMatrix`] type consumed by every solver in the crate.

mod error_types;
mod floats;
mod math_traits;
mod sparse;
mod vecmath;

pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use sparse::*;

#[cfg(test)]
mod tests;
