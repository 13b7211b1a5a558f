//! Convex polytopes in objective value space.
//!
//! The multi-objective refinement only relies on the [`ConvexPolytope`]
//! capability.  [`Polytope`] is the floating point implementation used
//! by default.

mod halfspace;
mod hull;
mod linalg;
mod polytope;
mod tolerance;

pub use halfspace::*;
pub use polytope::*;
pub use tolerance::*;

use crate::algebra::FloatT;

/// A bounded convex subset of `T^d`
pub trait ConvexPolytope<T: FloatT>: Sized + Clone + std::fmt::Debug {
    /// Dimension `d` of the ambient space
    fn dimension(&self) -> usize;

    /// The box `{ y : lower <= y <= upper }`.  Empty if any
    /// `lower[k] > upper[k]`.
    fn from_box(lower: &[T], upper: &[T]) -> Self;

    /// Convex hull of `points`
    fn from_points(dim: usize, points: &[Vec<T>]) -> Self;

    fn intersect_halfspace(&self, h: &Halfspace<T>) -> Self;

    /// Convex hull of `self` and `points`
    fn convex_union_points(&self, points: &[Vec<T>]) -> Self;

    fn contains(&self, y: &[T]) -> bool;

    /// `max { w·y : y in self }`, or `None` if `self` is empty
    fn support(&self, w: &[T]) -> Option<T>;

    /// A point attaining [`support`](ConvexPolytope::support)
    fn maximizer(&self, w: &[T]) -> Option<Vec<T>>;

    /// Irredundant halfspace description
    fn halfspaces(&self) -> &[Halfspace<T>];

    fn vertices(&self) -> &[Vec<T>];

    /// `d`-dimensional volume.  Zero for lower dimensional sets.
    fn measure(&self) -> T;

    fn is_empty(&self) -> bool;
}

#[cfg(test)]
mod tests;
