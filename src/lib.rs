//! __quantmc__ is the numeric core of a probabilistic model checker.
//!
//! It computes reachability probabilities, expected rewards and
//! Pareto-optimal trade-offs over sparse Markov decision processes once
//! a property has been reduced to a linear system or game.  The crate
//! provides
//!
//! * a row-grouped sparse matrix in which every group of rows is a state
//!   and every row a non-deterministic choice ([`algebra::SparseMatrix`]),
//! * a value iteration solver computing least and greatest fixed points
//!   of $x = \mathrm{opt}_{\text{group}}(Ax + b)$, and its bounded
//!   horizon variant ([`solver::ValueIterationSolver`]),
//! * a multi-objective refinement engine that approximates the set of
//!   achievable objective values from above and below by repeated
//!   weighted solves ([`multiobjective::MultiObjectiveEngine`]).
//!
//! ## Example
//!
//! ```no_run
//! use quantmc::algebra::*;
//! use quantmc::solver::*;
//!
//! // state 0 chooses between a fair coin (row 0) and a self loop (row 1)
//! let A = SparseMatrix::new(3, 2, vec![0, 1, 2, 3], vec![1, 0, 1], vec![0.5, 1.0, 1.0], vec![0, 2, 3]);
//! let b = vec![0.5, 0.0, 0.0];
//!
//! let settings = MinMaxSettingsBuilder::default().build().unwrap();
//! let mut solver = ValueIterationSolver::new(&A, settings);
//! let mut x = vec![0.0; 2];
//! let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
//! assert!(status.is_converged());
//! ```
//!
//! Structured diagnostics are emitted through [`tracing`]; install a
//! subscriber to see them.  Solvers configured as `verbose` also print a
//! progress table to a [configurable target](io::ConfigurablePrintTarget).

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod geometry;
pub mod io;
pub mod multiobjective;
pub mod solver;
pub mod timers;

/// Version of the crate
pub fn version() -> &'static str {
    VERSION
}
