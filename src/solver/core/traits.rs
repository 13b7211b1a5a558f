use super::OptimizationDirection;
use crate::algebra::FloatT;

/// Status of a min/max solve at termination

#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum SolveStatus {
    /// Solver has not run.
    #[default]
    Unsolved,
    /// Successive iterates agree to within the requested precision.
    Converged,
    /// Iteration limit reached before convergence.  The last iterate is
    /// still returned.
    MaxIterations,
}

impl SolveStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Solvers for equation systems of the form `x = reduce(A·x + b)`, where
/// `reduce` collapses every row group of `A` to its minimum or maximum.
///
/// Scratch vectors may be supplied by the caller to avoid allocation
/// across repeated solves.  When `None` is passed the solver allocates
/// them for the duration of the call.
pub trait MinMaxLinearEquationSolver<T: FloatT> {
    /// Computes the least (Minimize) or greatest (Maximize) fixed point
    /// of `x = reduce(A·x + b)`, starting from the initial guess in `x`.
    ///
    /// `x` and `new_x` have one entry per row group, `b` and
    /// `multiply_result` one entry per row.  On return `x` holds the
    /// final iterate.
    fn solve_equation_system(
        &mut self,
        direction: OptimizationDirection,
        x: &mut [T],
        b: &[T],
        multiply_result: Option<&mut [T]>,
        new_x: Option<&mut [T]>,
    ) -> SolveStatus;

    /// Performs exactly `n` rounds of `x ← reduce(A·x + b)` without a
    /// convergence test.  If `b` is `None` the additive term is omitted.
    fn perform_matrix_vector_multiplication(
        &mut self,
        direction: OptimizationDirection,
        x: &mut [T],
        b: Option<&[T]>,
        n: usize,
        multiply_result: Option<&mut [T]>,
    );
}
