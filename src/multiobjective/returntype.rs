use super::UnsetValueError;
use crate::algebra::*;
use crate::geometry::{ConvexPolytope, Halfspace, Polytope};
use crate::solver::OptimizationDirection;
use std::sync::Arc;

/// Record of one weighted single objective solve

#[derive(Debug, Clone, PartialEq)]
pub struct RefinementStep<T> {
    /// weight vector in maximization oriented objective space
    pub weight_vector: Vec<T>,
    /// direction of the weighted solve
    pub direction: OptimizationDirection,
    /// optimal weighted value reported by the solver
    pub weighted_value: T,
    /// objective values attained by the computed scheduler
    pub point: Vec<T>,
    /// the halfspace this step contributes to the over-approximation
    pub halfspace: Option<Halfspace<T>>,
    /// local choice per state of the computed scheduler
    pub scheduler: Vec<usize>,
}

/// Result container of a multi-objective query.
///
/// Polytopes live in maximization oriented objective space, i.e. the
/// coordinates of minimized objectives are negated.  The optional
/// fields follow a set-before-get discipline: reading a field that
/// has not been set returns an [`UnsetValueError`].

#[derive(Debug, Clone)]
pub struct MultiObjectiveHelperReturnType<T, P = Polytope<T>> {
    steps: Vec<RefinementStep<T>>,
    directions: Vec<OptimizationDirection>,
    over_approximation: Arc<P>,
    under_approximation: Arc<P>,

    thresholds_are_achievable: Option<bool>,
    numerical_result: Option<T>,
    precision_of_result: Option<T>,
    optimum_is_achievable: Option<bool>,

    target_precision_reached: bool,
    max_steps_performed: bool,
}

macro_rules! optional_field {
    ($field:ident, $ty:ty, $set:ident, $is_set:ident, $name:literal) => {
        pub fn $field(&self) -> Result<$ty, UnsetValueError> {
            self.$field.ok_or(UnsetValueError($name))
        }

        pub fn $set(&mut self, value: $ty) {
            self.$field = Some(value);
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }
    };
}

impl<T, P> MultiObjectiveHelperReturnType<T, P>
where
    T: FloatT,
    P: ConvexPolytope<T>,
{
    /// A result with no steps, whose approximations are the empty
    /// set (under) and the given bounding polytope (over).
    pub fn new(directions: Vec<OptimizationDirection>, over_approximation: P) -> Self {
        let dim = directions.len();
        Self {
            steps: Vec::new(),
            directions,
            over_approximation: Arc::new(over_approximation),
            under_approximation: Arc::new(P::from_points(dim, &[])),
            thresholds_are_achievable: None,
            numerical_result: None,
            precision_of_result: None,
            optimum_is_achievable: None,
            target_precision_reached: false,
            max_steps_performed: false,
        }
    }

    pub fn steps(&self) -> &[RefinementStep<T>] {
        &self.steps
    }

    pub(crate) fn push_step(&mut self, step: RefinementStep<T>) {
        self.steps.push(step);
    }

    /// Orientation of every objective
    pub fn directions(&self) -> &[OptimizationDirection] {
        &self.directions
    }

    pub fn over_approximation(&self) -> Arc<P> {
        Arc::clone(&self.over_approximation)
    }

    pub fn set_over_approximation(&mut self, p: Arc<P>) {
        self.over_approximation = p;
    }

    pub fn under_approximation(&self) -> Arc<P> {
        Arc::clone(&self.under_approximation)
    }

    pub fn set_under_approximation(&mut self, p: Arc<P>) {
        self.under_approximation = p;
    }

    optional_field!(
        thresholds_are_achievable,
        bool,
        set_thresholds_are_achievable,
        is_thresholds_are_achievable_set,
        "thresholds_are_achievable"
    );

    optional_field!(
        numerical_result,
        T,
        set_numerical_result,
        is_numerical_result_set,
        "numerical_result"
    );

    optional_field!(
        precision_of_result,
        T,
        set_precision_of_result,
        is_precision_of_result_set,
        "precision_of_result"
    );

    optional_field!(
        optimum_is_achievable,
        bool,
        set_optimum_is_achievable,
        is_optimum_is_achievable_set,
        "optimum_is_achievable"
    );

    pub fn target_precision_reached(&self) -> bool {
        self.target_precision_reached
    }

    pub fn set_target_precision_reached(&mut self, value: bool) {
        self.target_precision_reached = value;
    }

    pub fn max_steps_performed(&self) -> bool {
        self.max_steps_performed
    }

    pub fn set_max_steps_performed(&mut self, value: bool) {
        self.max_steps_performed = value;
    }

    /// Non-dominated vertices of the under-approximation in the
    /// objectives' own orientation.  Each is attained by a scheduler.
    pub fn pareto_points(&self) -> Vec<Vec<T>> {
        let vertices = self.under_approximation.vertices();
        let dominated = |p: &Vec<T>| {
            vertices
                .iter()
                .any(|q| q != p && std::iter::zip(q, p).all(|(a, b)| a >= b))
        };
        vertices
            .iter()
            .filter(|p| !dominated(p))
            .map(|p| self.to_original_orientation(p))
            .collect()
    }

    /// Maps a point from maximization oriented space back to the
    /// objectives' own orientation
    pub fn to_original_orientation(&self, p: &[T]) -> Vec<T> {
        std::iter::zip(p, &self.directions)
            .map(|(&v, d)| if d.is_maximize() { v } else { -v })
            .collect()
    }
}

#[test]
fn test_set_before_get() {
    let mut result: MultiObjectiveHelperReturnType<f64> =
        MultiObjectiveHelperReturnType::new(vec![OptimizationDirection::Maximize], Polytope::empty(1));

    assert!(!result.is_thresholds_are_achievable_set());
    assert_eq!(
        result.thresholds_are_achievable(),
        Err(UnsetValueError("thresholds_are_achievable"))
    );
    assert!(result.numerical_result().is_err());
    assert!(result.precision_of_result().is_err());
    assert!(result.optimum_is_achievable().is_err());

    result.set_thresholds_are_achievable(true);
    assert!(result.is_thresholds_are_achievable_set());
    assert_eq!(result.thresholds_are_achievable(), Ok(true));

    result.set_numerical_result(0.25);
    result.set_precision_of_result(1e-3);
    assert_eq!(result.numerical_result(), Ok(0.25));
    assert_eq!(result.precision_of_result(), Ok(1e-3));

    assert!(!result.target_precision_reached());
    assert!(!result.max_steps_performed());
    assert!(result.steps().is_empty());
    assert!(result.under_approximation().is_empty());
}

#[test]
fn test_pareto_points_orientation() {
    use OptimizationDirection::*;
    let under = Polytope::from_points(
        2,
        &[
            vec![0.0, -3.0],
            vec![1.0, -3.0],
            vec![0.0, -1.0],
            vec![1.0, -2.0],
        ],
    );
    let mut result = MultiObjectiveHelperReturnType::new(vec![Maximize, Minimize], under.clone());
    result.set_under_approximation(Arc::new(under));

    let mut points = result.pareto_points();
    points.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap());
    assert_eq!(points, vec![vec![0.0, 1.0], vec![1.0, 2.0]]);
}
