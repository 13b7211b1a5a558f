use super::RefinementStep;
use crate::algebra::*;
use crate::geometry::{get_tolerance, ConvexPolytope, Halfspace};

/// What the current refinement is trying to decide, in maximization
/// oriented objective space
#[derive(Debug, Clone, Copy)]
pub enum RefinementTarget<'a, T> {
    Pareto,
    /// decide whether `point` is achievable
    Achievability { point: &'a [T] },
    /// optimize `objective`; `witness` is the best known achievable
    /// point meeting the thresholds, if any
    Numerical {
        objective: usize,
        witness: Option<&'a [T]>,
    },
}

/// Read-only view of the refinement state offered to a
/// [`WeightVectorPolicy`]
#[derive(Debug)]
pub struct RefinementView<'a, T, P> {
    pub over: &'a P,
    pub under: &'a P,
    pub steps: &'a [RefinementStep<T>],
    pub target: RefinementTarget<'a, T>,
    pub precision: T,
}

impl<'a, T, P> RefinementView<'a, T, P>
where
    T: FloatT,
    P: ConvexPolytope<T>,
{
    /// True if a weight vector with the same direction as `w` has
    /// already been solved for
    pub fn is_explored(&self, w: &[T]) -> bool {
        let tol = get_tolerance::<T>().sqrt();
        let mut w = w.to_vec();
        w.normalize();
        self.steps.iter().any(|s| {
            let mut v = s.weight_vector.clone();
            v.normalize();
            v.norm_inf_diff(&w) <= tol
        })
    }

    /// Gap between the supporting hyperplanes of both approximations
    /// along the unit facet normal of `h`
    pub fn gap(&self, h: &Halfspace<T>) -> Option<T> {
        self.over.support(&h.normal).map(|s| s - h.offset)
    }

    /// Largest [`gap`](RefinementView::gap) over the facets of the
    /// under-approximation with non-negative normals, explored or not.
    /// `Some(0)` if there is no such facet, `None` if the
    /// over-approximation is empty.
    pub fn largest_gap(&self) -> Option<T> {
        let tol = get_tolerance::<T>();
        self.refinable_facets(tol)
            .map(|h| self.gap(&h))
            .try_fold(T::zero(), |acc, gap| Some(T::max(acc, gap?)))
    }

    // unit facets of the under-approximation pointing into the
    // non-negative orthant
    fn refinable_facets<'s>(&'s self, tol: T) -> impl Iterator<Item = Halfspace<T>> + 's {
        let halfspaces: &'s [Halfspace<T>] = self.under.halfspaces();
        halfspaces
            .iter()
            .map(|h| h.clone().normalized())
            .filter(move |h| h.normal.iter().all(|&c| c >= -tol) && h.normal.maximum() > tol)
    }
}

/// Chooses the weight vector of the next refinement step.
///
/// Returning `None` ends the refinement.  The engine then reports the
/// target precision as reached only if the measured gap is within it.
pub trait WeightVectorPolicy<T: FloatT, P: ConvexPolytope<T>> {
    fn next_weight_vector(&mut self, view: &RefinementView<'_, T, P>) -> Option<Vec<T>>;
}

/// Refines along the facet of the under-approximation that is furthest
/// from the over-approximation.
///
/// Only facets with non-negative normals that have not been explored
/// yet are considered, and only if their gap exceeds the precision.
/// For achievability queries facets separating the threshold point
/// from the under-approximation are preferred.  For numerical queries
/// facets through the current witness are preferred.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestGapPolicy;

impl<T, P> WeightVectorPolicy<T, P> for LargestGapPolicy
where
    T: FloatT,
    P: ConvexPolytope<T>,
{
    fn next_weight_vector(&mut self, view: &RefinementView<'_, T, P>) -> Option<Vec<T>> {
        let tol = get_tolerance::<T>();

        // (gap, preferred, normal) of every refinable facet
        let candidates: Vec<(T, bool, Vec<T>)> = view
            .refinable_facets(tol)
            .filter(|h| !view.is_explored(&h.normal))
            .filter_map(|h| {
                let gap = view.gap(&h)?;
                let preferred = match view.target {
                    RefinementTarget::Pareto => false,
                    RefinementTarget::Achievability { point } => !h.contains(point, tol),
                    RefinementTarget::Numerical { witness, .. } => {
                        witness.map_or(false, |w| h.on_boundary(w, tol))
                    }
                };
                (gap > view.precision).then_some((gap, preferred, h.normal))
            })
            .collect();

        let any_preferred = candidates.iter().any(|c| c.1);
        candidates
            .into_iter()
            .filter(|c| c.1 || !any_preferred)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, _, normal)| clean_weight(normal, tol))
    }
}

// clamp round-off below zero so weights stay non-negative
fn clean_weight<T: FloatT>(mut w: Vec<T>, tol: T) -> Vec<T> {
    w.scalarop(|c| if c <= tol { T::zero() } else { c });
    w.normalize();
    w
}
