//! Min/max linear equation solvers.
//!
//! The [`ValueIterationSolver`] computes fixed points of
//! `x = reduce(A·x + b)`, where `reduce` resolves the non-deterministic
//! choices of every row group according to an [`OptimizationDirection`].

pub mod core;
pub mod minmax;

pub use self::core::*;
pub use self::minmax::*;

#[cfg(test)]
mod tests;
