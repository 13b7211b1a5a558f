#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::geometry::{get_tolerance, ConvexPolytope, Halfspace, Polytope};
use crate::io::{forward_print_target, ConfigurablePrintTarget, PrintTarget};
use crate::solver::*;
use crate::timers::*;
use std::io::Write;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Progress information of the [`MultiObjectiveEngine`]

#[derive(Default, Debug)]
pub struct RefinementInfo<T> {
    /// refinement steps of the last query, including initialization
    pub steps: u32,
    /// value iteration rounds summed over all single objective solves
    pub solver_iterations: u64,
    /// gap between upper and lower bound of the last numerical query
    pub final_gap: Option<T>,
    /// wall clock seconds spent in the last query
    pub solve_time: f64,

    stream: PrintTarget,
}

forward_print_target!(RefinementInfo<T>);

impl<T> RefinementInfo<T>
where
    T: FloatT,
{
    fn reset(&mut self, timers: &mut Timers) {
        self.steps = 0;
        self.solver_iterations = 0;
        self.final_gap = None;
        self.solve_time = 0f64;
        timers.reset_timer("refinement");
    }

    fn print_header(&mut self, verbose: bool, objectives: usize, states: usize) -> std::io::Result<()> {
        if !verbose {
            return Ok(());
        }
        let out = &mut self.stream;
        writeln!(out, "-------------------------------------------------------------")?;
        writeln!(out, "      quantmc v{}  -  multi-objective refinement", crate::VERSION)?;
        writeln!(out, "-------------------------------------------------------------")?;
        writeln!(out, "  objectives = {}, states = {}", objectives, states)?;
        writeln!(out)?;
        writeln!(out, "step  weighted value  point")?;
        writeln!(out, "--------------------------------------------")?;
        out.flush()
    }

    fn print_step(&mut self, verbose: bool, step: &RefinementStep<T>) -> std::io::Result<()> {
        if !verbose {
            return Ok(());
        }
        let point = step
            .point
            .iter()
            .map(|v| format!("{:+.4e}", v))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            self.stream,
            "{:>4}  {:+.6e}   [{}]",
            self.steps, step.weighted_value, point
        )
    }

    fn print_footer<P>(&mut self, verbose: bool, result: &MultiObjectiveHelperReturnType<T, P>) -> std::io::Result<()>
    where
        P: ConvexPolytope<T>,
    {
        if !verbose {
            return Ok(());
        }
        let out = &mut self.stream;
        writeln!(out, "--------------------------------------------")?;
        writeln!(
            out,
            "target precision reached = {}, max steps performed = {}",
            result.target_precision_reached(),
            result.max_steps_performed()
        )?;
        if let Ok(value) = result.numerical_result() {
            writeln!(out, "numerical result = {:+.6e}", value)?;
        }
        if let Ok(achievable) = result.thresholds_are_achievable() {
            writeln!(out, "thresholds achievable = {}", achievable)?;
        }
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        out.flush()
    }
}

/// Approximates the achievable values of several objectives at once by
/// repeated weighted single objective solves.
///
/// The engine maintains an over-approximation (intersection of the
/// halfspaces found by the weighted solves) and an under-approximation
/// (convex hull of the downward closure of the points attained by the
/// computed schedulers) of the achievable set.  Both live inside the
/// box spanned by the individual minima and maxima of the objectives.
pub struct MultiObjectiveEngine<'a, T: FloatT = f64, P = Polytope<T>, W = LargestGapPolicy> {
    model: &'a MultiObjectiveModel<T>,
    pub settings: MultiObjectiveSettings<T>,
    pub info: RefinementInfo<T>,
    policy: W,
    timers: Option<Timers>,
    phantom: PhantomData<P>,
}

impl<'a, T> MultiObjectiveEngine<'a, T>
where
    T: FloatT,
{
    /// Engine using [`Polytope`] and the [`LargestGapPolicy`]
    pub fn new(
        model: &'a MultiObjectiveModel<T>,
        settings: MultiObjectiveSettings<T>,
    ) -> Result<Self, MultiObjectiveError> {
        Self::with_policy(model, settings, LargestGapPolicy)
    }
}

// points attained by a weighted solve
struct Witness<T> {
    weighted_value: T,
    scheduler: Vec<usize>,
    point: Vec<T>,
}

// current approximation and the box containing it
struct Approximation<T, P> {
    lower: Vec<T>,
    upper: Vec<T>,
    points: Vec<Vec<T>>,
    result: MultiObjectiveHelperReturnType<T, P>,
}

impl<'a, T, P, W> MultiObjectiveEngine<'a, T, P, W>
where
    T: FloatT,
    P: ConvexPolytope<T>,
    W: WeightVectorPolicy<T, P>,
{
    pub fn with_policy(
        model: &'a MultiObjectiveModel<T>,
        settings: MultiObjectiveSettings<T>,
        policy: W,
    ) -> Result<Self, MultiObjectiveError> {
        model.validate()?;
        settings.validate()?;

        let required = 2 * model.objective_count() as u32;
        if settings.max_steps < required {
            return Err(MultiObjectiveError::InsufficientStepBudget {
                max_steps: settings.max_steps,
                required,
            });
        }

        Ok(Self {
            model,
            settings,
            info: RefinementInfo::default(),
            policy,
            timers: Some(Timers::default()),
            phantom: PhantomData,
        })
    }

    pub fn model(&self) -> &'a MultiObjectiveModel<T> {
        self.model
    }

    pub fn timers(&self) -> Option<&Timers> {
        self.timers.as_ref()
    }

    /// Runs the refinement loop for `query`
    pub fn check(
        &mut self,
        query: &MultiObjectiveQuery<T>,
    ) -> Result<MultiObjectiveHelperReturnType<T, P>, MultiObjectiveError> {
        let model = self.model;
        let d = model.objective_count();
        query.validate(d)?;

        let directions: Vec<OptimizationDirection> =
            model.objectives.iter().map(|o| o.direction).collect();
        let thresholds = query.oriented_thresholds(&directions);
        let verbose = self.settings.verbose;

        let mut timers = self.timers.take().unwrap_or_default();
        self.info.reset(&mut timers);
        self.info
            .print_header(verbose, d, model.state_count())
            .ok();

        let mut approx;
        let mut decided = false;

        timeit! {timers => "refinement"; {

        timeit! {timers => "initialization"; {
            approx = self.initialize(directions);
        }}

        loop {
            if let Some(precise) = self.decide(query, &thresholds, &mut approx) {
                decided = true;
                approx.result.set_target_precision_reached(precise);
                break;
            }
            if approx.result.steps().len() >= self.settings.max_steps as usize {
                approx.result.set_max_steps_performed(true);
                break;
            }

            let over = approx.result.over_approximation();
            let under = approx.result.under_approximation();
            let target_point;
            let witness;
            let target = match query {
                MultiObjectiveQuery::Pareto => RefinementTarget::Pareto,
                MultiObjectiveQuery::Achievability { .. } => {
                    target_point = threshold_point(&thresholds, &approx.lower);
                    RefinementTarget::Achievability {
                        point: &target_point,
                    }
                }
                MultiObjectiveQuery::Numerical { objective, .. } => {
                    witness = restrict(under.as_ref(), &thresholds)
                        .maximizer(&unit::<T>(d, *objective));
                    RefinementTarget::Numerical {
                        objective: *objective,
                        witness: witness.as_deref(),
                    }
                }
            };
            let view = RefinementView {
                over: over.as_ref(),
                under: under.as_ref(),
                steps: approx.result.steps(),
                target,
                precision: self.settings.precision,
            };

            // a policy without further directions either reached the
            // precision or stalled above it
            let Some(weights) = self.policy.next_weight_vector(&view) else {
                let gap = self.measured_gap(query, &thresholds, &view);
                debug!(gap = ?gap, "weight vector policy exhausted");
                if gap.map_or(false, |g| g <= self.settings.precision) {
                    approx.result.set_target_precision_reached(true);
                }
                break;
            };
            self.refine(&mut approx, weights);
        }
        }} // end "refinement" timer

        if let MultiObjectiveQuery::Numerical { objective, .. } = query {
            self.finalize_numerical(*objective, &thresholds, &mut approx.result);
        }

        self.info.solve_time = timers.total_time().as_secs_f64();
        info!(
            steps = self.info.steps,
            decided,
            target_precision_reached = approx.result.target_precision_reached(),
            max_steps_performed = approx.result.max_steps_performed(),
            "multi-objective refinement finished"
        );
        self.info.print_footer(verbose, &approx.result).ok();
        self.timers.replace(timers);

        Ok(approx.result)
    }

    // optimal weighted value and the point attained by its scheduler
    fn weighted_solve(&mut self, weights: &[T], direction: OptimizationDirection) -> Witness<T> {
        let model = self.model;
        let A = &model.matrix;

        let mut b = vec![T::zero(); A.row_count()];
        for (k, &w) in weights.iter().enumerate() {
            if w != T::zero() {
                b.axpby(w, &model.oriented_rewards(k), T::one());
            }
        }

        let settings = MinMaxSettings {
            track_scheduler: true,
            verbose: false,
            ..self.settings.solver.clone()
        };
        let mut solver = ValueIterationSolver::new(A, settings);
        let mut x = vec![T::zero(); A.row_group_count()];
        solver.solve_equation_system(direction, &mut x, &b, None, None);
        self.info.solver_iterations += u64::from(solver.info.iterations);

        let mut scheduler = solver.scheduler().map(<[usize]>::to_vec).unwrap_or_default();
        let iterations = model.improve_scheduler(direction, &b, &mut scheduler, &self.settings.solver);
        self.info.solver_iterations += u64::from(iterations);

        let (point, iterations) = model.evaluate_scheduler(&scheduler, &self.settings.solver);
        self.info.solver_iterations += u64::from(iterations);

        debug!(?weights, %direction, value = %x[model.initial_state], "weighted solve");

        Witness {
            weighted_value: x[model.initial_state],
            scheduler,
            point,
        }
    }

    // one maximizing and one minimizing solve per objective
    fn initialize(&mut self, directions: Vec<OptimizationDirection>) -> Approximation<T, P> {
        let d = directions.len();
        let mut steps = Vec::with_capacity(2 * d);
        let mut lower = vec![T::infinity(); d];
        let mut upper = vec![T::neg_infinity(); d];

        for k in 0..d {
            for direction in [OptimizationDirection::Maximize, OptimizationDirection::Minimize] {
                let w: Vec<T> = unit(d, k);
                let witness = self.weighted_solve(&w, direction);
                let halfspace = if direction.is_maximize() {
                    let bound = T::max(witness.weighted_value, witness.point[k]);
                    upper[k] = T::max(upper[k], bound);
                    Halfspace::new(w.clone(), bound)
                } else {
                    let bound = T::min(witness.weighted_value, witness.point[k]);
                    lower[k] = T::min(lower[k], bound);
                    Halfspace::new(w.clone(), bound).invert()
                };
                steps.push(RefinementStep {
                    weight_vector: w,
                    direction,
                    weighted_value: witness.weighted_value,
                    point: witness.point,
                    halfspace: Some(halfspace),
                    scheduler: witness.scheduler,
                });
            }
        }

        // the box must hold every witnessed point
        for step in &steps {
            for k in 0..d {
                lower[k] = T::min(lower[k], step.point[k]);
                upper[k] = T::max(upper[k], step.point[k]);
            }
        }

        let points: Vec<Vec<T>> = steps.iter().map(|s| s.point.clone()).collect();
        let mut result = MultiObjectiveHelperReturnType::new(directions, P::from_box(&lower, &upper));
        result.set_under_approximation(Arc::new(downward_closure(&points, &lower, &upper)));
        for step in steps {
            self.info.steps += 1;
            self.info.print_step(self.settings.verbose, &step).ok();
            result.push_step(step);
        }

        Approximation {
            lower,
            upper,
            points,
            result,
        }
    }

    // a weighted solve along `weights` and the resulting update
    fn refine(&mut self, approx: &mut Approximation<T, P>, weights: Vec<T>) {
        let witness = self.weighted_solve(&weights, OptimizationDirection::Maximize);
        let point = clamp(&witness.point, &approx.lower, &approx.upper);

        // keeps the witnessed point inside the over-approximation
        let offset = T::max(witness.weighted_value, weights.dot(&point));
        let halfspace = Halfspace::new(weights.clone(), offset);

        let over = approx.result.over_approximation().intersect_halfspace(&halfspace);
        approx.points.push(point.clone());
        let under = downward_closure(&approx.points, &approx.lower, &approx.upper);
        approx.result.set_over_approximation(Arc::new(over));
        approx.result.set_under_approximation(Arc::new(under));

        let step = RefinementStep {
            weight_vector: weights,
            direction: OptimizationDirection::Maximize,
            weighted_value: witness.weighted_value,
            point,
            halfspace: Some(halfspace),
            scheduler: witness.scheduler,
        };
        self.info.steps += 1;
        self.info.print_step(self.settings.verbose, &step).ok();
        approx.result.push_step(step);
    }

    // settles the query if the approximations allow it.  `Some(precise)`
    // ends the refinement, with `precise` telling whether the target
    // precision was reached.  Infeasible numerical thresholds end it
    // without a measured gap.
    fn decide(
        &self,
        query: &MultiObjectiveQuery<T>,
        thresholds: &[Option<T>],
        approx: &mut Approximation<T, P>,
    ) -> Option<bool> {
        let result = &mut approx.result;
        match query {
            MultiObjectiveQuery::Pareto => None,
            MultiObjectiveQuery::Achievability { .. } => {
                let q = threshold_point(thresholds, &approx.lower);
                if result.under_approximation().contains(&q) {
                    result.set_thresholds_are_achievable(true);
                    Some(true)
                } else if !result.over_approximation().contains(&q) {
                    result.set_thresholds_are_achievable(false);
                    Some(true)
                } else {
                    None
                }
            }
            MultiObjectiveQuery::Numerical { objective, .. } => {
                let over = restrict(result.over_approximation().as_ref(), thresholds);
                if over.is_empty() {
                    return Some(false);
                }
                let under = restrict(result.under_approximation().as_ref(), thresholds);
                numerical_gap(&under, &over, *objective)
                    .filter(|&gap| gap <= self.settings.precision)
                    .map(|_| true)
            }
        }
    }

    // gap of the current approximations in the metric of `query`: the
    // bound gap of the optimized objective for numerical queries, the
    // largest facet gap otherwise
    fn measured_gap(
        &self,
        query: &MultiObjectiveQuery<T>,
        thresholds: &[Option<T>],
        view: &RefinementView<'_, T, P>,
    ) -> Option<T> {
        match query {
            MultiObjectiveQuery::Numerical { objective, .. } => {
                let over = restrict(view.over, thresholds);
                let under = restrict(view.under, thresholds);
                numerical_gap(&under, &over, *objective)
            }
            _ => view.largest_gap(),
        }
    }

    fn finalize_numerical(
        &mut self,
        objective: usize,
        thresholds: &[Option<T>],
        result: &mut MultiObjectiveHelperReturnType<T, P>,
    ) {
        let over = restrict(result.over_approximation().as_ref(), thresholds);
        if over.is_empty() {
            result.set_thresholds_are_achievable(false);
            return;
        }
        let e: Vec<T> = unit(self.model.objective_count(), objective);
        let under = restrict(result.under_approximation().as_ref(), thresholds);
        let (Some(lo), Some(hi)) = (under.support(&e), over.support(&e)) else {
            return;
        };
        let gap = T::max(hi - lo, T::zero());
        let sign = self.model.objectives[objective].sign();

        result.set_thresholds_are_achievable(true);
        result.set_numerical_result(sign * lo);
        result.set_precision_of_result(gap);
        if gap <= self.settings.precision {
            result.set_optimum_is_achievable(true);
        }
        self.info.final_gap = Some(gap);
    }
}

impl<'a, T, P, W> ConfigurablePrintTarget for MultiObjectiveEngine<'a, T, P, W>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

/// Runs a single multi-objective query with the default polytope and
/// weight vector policy
pub fn check_multi_objective<T: FloatT>(
    model: &MultiObjectiveModel<T>,
    query: &MultiObjectiveQuery<T>,
    settings: MultiObjectiveSettings<T>,
) -> Result<MultiObjectiveHelperReturnType<T>, MultiObjectiveError> {
    MultiObjectiveEngine::new(model, settings)?.check(query)
}

// ---------------------------------------------------------
// helpers in maximization oriented objective space
// ---------------------------------------------------------

fn unit<T: FloatT>(dim: usize, k: usize) -> Vec<T> {
    let mut e = vec![T::zero(); dim];
    e[k] = T::one();
    e
}

// upper minus lower bound of `objective`
fn numerical_gap<T: FloatT, P: ConvexPolytope<T>>(under: &P, over: &P, objective: usize) -> Option<T> {
    let e: Vec<T> = unit(over.dimension(), objective);
    Some(over.support(&e)? - under.support(&e)?)
}

fn clamp<T: FloatT>(p: &[T], lower: &[T], upper: &[T]) -> Vec<T> {
    p.iter()
        .zip(lower.iter().zip(upper))
        .map(|(&v, (&l, &u))| T::min(T::max(v, l), u))
        .collect()
}

// the thresholds as a point, raised to the box where unconstrained or
// below it
fn threshold_point<T: FloatT>(thresholds: &[Option<T>], lower: &[T]) -> Vec<T> {
    thresholds
        .iter()
        .zip(lower)
        .map(|(t, &l)| t.map_or(l, |t| T::max(t, l)))
        .collect()
}

// intersection with the halfspaces y_k >= t_k
fn restrict<T: FloatT, P: ConvexPolytope<T>>(p: &P, thresholds: &[Option<T>]) -> P {
    let d = thresholds.len();
    thresholds
        .iter()
        .enumerate()
        .filter_map(|(k, t)| t.map(|t| Halfspace::new(unit(d, k), t).invert()))
        .fold(p.clone(), |acc, h| acc.intersect_halfspace(&h))
}

/// Convex hull of the parts of the downward closures of `points`
/// inside the box `[lower, upper]`
fn downward_closure<T: FloatT, P: ConvexPolytope<T>>(
    points: &[Vec<T>],
    lower: &[T],
    upper: &[T],
) -> P {
    let d = lower.len();
    let tol = get_tolerance::<T>();
    let points: Vec<Vec<T>> = points.iter().map(|p| clamp(p, lower, upper)).collect();

    // q weakly dominates p
    let dominates = |q: &[T], p: &[T]| std::iter::zip(q, p).all(|(&a, &b)| a >= b - tol);

    // every corner of the box [lower, p] replaces the coordinates in
    // `mask` by their lower bound.  Within one mask only corners not
    // dominated by another corner can be vertices.
    let mut corners: Vec<Vec<T>> = Vec::new();
    for mask in 0..(1usize << d) {
        let projected: Vec<Vec<T>> = points
            .iter()
            .map(|p| {
                (0..d)
                    .map(|k| if mask >> k & 1 == 1 { lower[k] } else { p[k] })
                    .collect()
            })
            .collect();
        for (i, c) in projected.iter().enumerate() {
            let redundant = projected
                .iter()
                .enumerate()
                .any(|(j, q)| j != i && dominates(q, c) && (!dominates(c, q) || j < i));
            if !redundant {
                corners.push(c.clone());
            }
        }
    }
    P::from_points(d, &corners)
}
