use super::hull::{convex_hull, volume, AffineFrame};
use super::linalg::sub;
use super::{get_tolerance, ConvexPolytope, Halfspace};
use crate::algebra::*;
use itertools::Itertools;

/// Bounded convex polytope over floating point coordinates, stored in
/// both halfspace (H) and vertex (V) representation.
///
/// The V-representation is authoritative.  Every operation rebuilds the
/// H-representation from the vertices, so both always describe the same
/// set.  Unbounded sets cannot be represented.

#[derive(Debug, Clone, PartialEq)]
pub struct Polytope<T> {
    dim: usize,
    halfspaces: Vec<Halfspace<T>>,
    vertices: Vec<Vec<T>>,
}

impl<T> Polytope<T>
where
    T: FloatT,
{
    /// The empty set in `dim` dimensions
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            halfspaces: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Dimension of the affine hull, or `None` for the empty set
    pub fn affine_dimension(&self) -> Option<usize> {
        if self.vertices.is_empty() {
            None
        } else {
            Some(AffineFrame::new(&self.vertices, get_tolerance()).rank())
        }
    }
}

impl<T> ConvexPolytope<T> for Polytope<T>
where
    T: FloatT,
{
    fn dimension(&self) -> usize {
        self.dim
    }

    fn from_box(lower: &[T], upper: &[T]) -> Self {
        assert_eq!(lower.len(), upper.len());
        let dim = lower.len();
        if std::iter::zip(lower, upper).any(|(l, u)| l > u) {
            return Self::empty(dim);
        }
        let corners: Vec<Vec<T>> = (0..dim)
            .map(|k| [lower[k], upper[k]])
            .multi_cartesian_product()
            .collect();
        // a zero dimensional box still has the single corner
        let corners = if dim == 0 { vec![Vec::new()] } else { corners };
        Self::from_points(dim, &corners)
    }

    fn from_points(dim: usize, points: &[Vec<T>]) -> Self {
        let hull = convex_hull(dim, points.to_vec(), get_tolerance());
        Self {
            dim,
            halfspaces: hull.halfspaces,
            vertices: hull.vertices,
        }
    }

    fn intersect_halfspace(&self, h: &Halfspace<T>) -> Self {
        assert_eq!(h.dimension(), self.dim);
        let tol = get_tolerance();

        let violation: Vec<T> = self.vertices.iter().map(|v| h.violation(v)).collect();

        // vertices inside, plus the crossing of every segment between a
        // vertex strictly inside and one strictly outside.  All vertices
        // of the intersection are among these.
        let mut points: Vec<Vec<T>> = std::iter::zip(&self.vertices, &violation)
            .filter(|(_, &s)| s <= tol)
            .map(|(v, _)| v.clone())
            .collect();

        for (i, j) in (0..self.vertices.len()).tuple_combinations() {
            let (si, sj) = (violation[i], violation[j]);
            if (si < -tol && sj > tol) || (si > tol && sj < -tol) {
                let (u, w) = (&self.vertices[i], &self.vertices[j]);
                let t = si / (si - sj);
                let mut p = u.clone();
                p.axpby(t, &sub(w, u), T::one());
                points.push(p);
            }
        }
        Self::from_points(self.dim, &points)
    }

    fn convex_union_points(&self, points: &[Vec<T>]) -> Self {
        let mut all = self.vertices.clone();
        all.extend(points.iter().cloned());
        Self::from_points(self.dim, &all)
    }

    fn contains(&self, y: &[T]) -> bool {
        let tol = get_tolerance();
        !self.is_empty() && self.halfspaces.iter().all(|h| h.contains(y, tol))
    }

    fn support(&self, w: &[T]) -> Option<T> {
        self.vertices
            .iter()
            .map(|v| v.dot(w))
            .reduce(T::max)
    }

    fn maximizer(&self, w: &[T]) -> Option<Vec<T>> {
        let best = self.support(w)?;
        let tol = get_tolerance();
        self.vertices
            .iter()
            .find(|v| v.dot(w) >= best - tol)
            .cloned()
    }

    fn halfspaces(&self) -> &[Halfspace<T>] {
        &self.halfspaces
    }

    fn vertices(&self) -> &[Vec<T>] {
        &self.vertices
    }

    fn measure(&self) -> T {
        volume(&self.vertices, get_tolerance())
    }

    fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
