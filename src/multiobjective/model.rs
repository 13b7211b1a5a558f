#![allow(non_snake_case)]

use super::MultiObjectiveError;
use crate::algebra::*;
use crate::solver::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// An expected total reward objective.
///
/// `rewards` holds one entry per row (choice) of the transition matrix.
/// A reachability probability is expressed as the one-step probability
/// of entering the target from every choice.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Objective<T> {
    pub rewards: Vec<T>,
    pub direction: OptimizationDirection,
}

impl<T> Objective<T>
where
    T: FloatT,
{
    pub fn new(rewards: Vec<T>, direction: OptimizationDirection) -> Self {
        Self { rewards, direction }
    }

    pub fn maximize(rewards: Vec<T>) -> Self {
        Self::new(rewards, OptimizationDirection::Maximize)
    }

    pub fn minimize(rewards: Vec<T>) -> Self {
        Self::new(rewards, OptimizationDirection::Minimize)
    }

    /// `+1` for maximized and `-1` for minimized objectives
    pub(crate) fn sign(&self) -> T {
        if self.direction.is_maximize() {
            T::one()
        } else {
            -T::one()
        }
    }
}

/// Largest number of objectives a [`MultiObjectiveModel`] may carry.
///
/// The under-approximation enumerates `2^d` corners per witnessed point.
pub const MAX_OBJECTIVES: usize = 16;

/// A Markov decision process together with the objectives of a
/// multi-objective query.
///
/// Row group `s` of `matrix` holds the choices of state `s`.  Rows may be
/// substochastic: missing probability mass leaves the model and stops
/// reward accumulation.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct MultiObjectiveModel<T> {
    pub matrix: SparseMatrix<T>,
    pub initial_state: usize,
    pub objectives: Vec<Objective<T>>,
}

impl<T> MultiObjectiveModel<T>
where
    T: FloatT,
{
    pub fn new(matrix: SparseMatrix<T>, initial_state: usize, objectives: Vec<Objective<T>>) -> Self {
        Self {
            matrix,
            initial_state,
            objectives,
        }
    }

    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }

    pub fn state_count(&self) -> usize {
        self.matrix.row_group_count()
    }

    /// Checks that matrix, initial state and rewards fit together
    pub fn validate(&self) -> Result<(), MultiObjectiveError> {
        self.matrix.check_format()?;

        let states = self.state_count();
        if self.matrix.column_count() != states {
            return Err(MultiObjectiveError::ColumnCountMismatch {
                columns: self.matrix.column_count(),
                states,
            });
        }
        if self.initial_state >= states {
            return Err(MultiObjectiveError::InitialStateOutOfRange {
                state: self.initial_state,
                states,
            });
        }
        if self.objectives.is_empty() {
            return Err(MultiObjectiveError::NoObjectives);
        }
        if self.objectives.len() > MAX_OBJECTIVES {
            return Err(MultiObjectiveError::TooManyObjectives {
                count: self.objectives.len(),
                max: MAX_OBJECTIVES,
            });
        }
        for (objective, obj) in self.objectives.iter().enumerate() {
            if obj.rewards.len() != self.matrix.row_count() {
                return Err(MultiObjectiveError::RewardLength {
                    objective,
                    expected: self.matrix.row_count(),
                    found: obj.rewards.len(),
                });
            }
        }
        Ok(())
    }

    /// Rewards of objective `k` oriented for maximization
    pub(crate) fn oriented_rewards(&self, k: usize) -> Vec<T> {
        let obj = &self.objectives[k];
        let mut r = obj.rewards.clone();
        r.scale(obj.sign());
        r
    }

    /// Values of every maximization oriented objective at the initial
    /// state under the memoryless scheduler `choices`.
    pub(crate) fn evaluate_scheduler(
        &self,
        choices: &[usize],
        settings: &MinMaxSettings<T>,
    ) -> (Vec<T>, u32) {
        let A = self.matrix.select_rows(choices);
        let settings = MinMaxSettings {
            track_scheduler: false,
            verbose: false,
            ..settings.clone()
        };
        let mut solver = ValueIterationSolver::new(&A, settings);
        let mut iterations = 0;

        let point = (0..self.objective_count())
            .map(|k| {
                let b = self.matrix.select_row_values(&self.oriented_rewards(k), choices);
                let mut x = vec![T::zero(); A.row_group_count()];
                // a single choice per group, so the direction is irrelevant
                solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
                iterations += solver.info.iterations;
                x[self.initial_state]
            })
            .collect();
        (point, iterations)
    }

    /// Switches choices of `scheduler` while some state strictly gains
    /// from another choice under the rewards `b`, by more than the
    /// solver precision.
    ///
    /// The choices attaining the optimum of one value iteration step at
    /// the fixed point may stay in an end component forever without
    /// collecting the reward the fixed point promises.  Improving such a
    /// scheduler against its own values leaves the component.  Returns
    /// the value iteration rounds spent on evaluations.
    pub(crate) fn improve_scheduler(
        &self,
        direction: OptimizationDirection,
        b: &[T],
        scheduler: &mut [usize],
        settings: &MinMaxSettings<T>,
    ) -> u32 {
        let A = &self.matrix;
        let settings = MinMaxSettings {
            track_scheduler: false,
            verbose: false,
            ..settings.clone()
        };
        let relative = settings.is_relative();
        let mut values = vec![T::zero(); A.row_group_count()];
        let mut multiply_result = vec![T::zero(); A.row_count()];
        let mut iterations = 0;

        // every round strictly improves the scheduler, so the number of
        // choices bounds the rounds needed in practice
        for _ in 0..A.row_count() {
            let induced = A.select_rows(scheduler);
            let c = A.select_row_values(b, scheduler);
            values.set(T::zero());
            let mut solver = ValueIterationSolver::new(&induced, settings.clone());
            solver.solve_equation_system(direction, &mut values, &c, None, None);
            iterations += solver.info.iterations;

            A.multiply_with_vector(&values, &mut multiply_result);
            add_vectors(&mut multiply_result, b);

            let mut changed = false;
            for (s, choice) in scheduler.iter_mut().enumerate() {
                let q = &multiply_result[A.row_group(s)];
                let gain = |i: usize| {
                    if direction.is_maximize() {
                        q[i] - q[*choice]
                    } else {
                        q[*choice] - q[i]
                    }
                };
                let Some(best) = (0..q.len()).max_by(|&i, &j| {
                    gain(i).partial_cmp(&gain(j)).unwrap_or(std::cmp::Ordering::Equal)
                }) else {
                    continue;
                };
                let margin = if relative {
                    settings.precision * T::max(T::one(), values[s].abs())
                } else {
                    settings.precision
                };
                if gain(best) > margin {
                    *choice = best;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        iterations
    }
}
