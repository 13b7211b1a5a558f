use super::workspace::Workspace;
use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::*;
use crate::timers::*;
use std::io::Write;
use tracing::{debug, info, warn};

/// Value iteration solver for min/max equation systems over a borrowed
/// row-grouped [`SparseMatrix`].
///
/// __Example usage__ : reachability in a two state model where state 0
/// may either move to the absorbing target or stay put
///
/// ```no_run
/// use quantmc::algebra::SparseMatrix;
/// use quantmc::solver::*;
///
/// // group 0 : row 0 -> stay in state 0, row 1 -> move to target
/// // group 1 : the target, no further reward
/// let A = SparseMatrix::new(3, 2, vec![0, 1, 1, 2], vec![0, 1], vec![1.0, 1.0], vec![0, 2, 3]);
/// let b = vec![0.0, 1.0, 0.0];
///
/// let settings = MinMaxSettings::default();
/// let mut solver = ValueIterationSolver::new(&A, settings);
///
/// let mut x = vec![0.0; 2];
/// let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
/// assert!(status.is_converged());
/// assert_eq!(x[0], 1.0);
/// ```
#[derive(Debug)]
pub struct ValueIterationSolver<'a, T: FloatT = f64> {
    A: &'a SparseMatrix<T>,
    pub settings: MinMaxSettings<T>,
    pub info: MinMaxInfo<T>,
    timers: Option<Timers>,
}

impl<'a, T> ValueIterationSolver<'a, T>
where
    T: FloatT,
{
    /// # Panics
    /// Panics if `settings` fail validation.
    pub fn new(A: &'a SparseMatrix<T>, settings: MinMaxSettings<T>) -> Self {
        if let Err(e) = settings.validate() {
            panic!("invalid solver settings: {e}");
        }
        Self {
            A,
            settings,
            info: MinMaxInfo::new(),
            timers: Some(Timers::default()),
        }
    }

    /// The matrix this solver operates on
    pub fn matrix(&self) -> &'a SparseMatrix<T> {
        self.A
    }

    /// Optimal local choice per row group recorded by the last call,
    /// if `track_scheduler` is set
    pub fn scheduler(&self) -> Option<&[usize]> {
        self.info.scheduler.as_deref()
    }

    /// Timing of the last call
    pub fn timers(&self) -> Option<&Timers> {
        self.timers.as_ref()
    }

    fn check_dimensions(&self, x: &[T], b: Option<&[T]>) {
        let A = self.A;
        assert_eq!(
            x.len(),
            A.row_group_count(),
            "value vector length must equal the row group count"
        );
        assert!(
            x.len() >= A.column_count(),
            "matrix has more columns than row groups"
        );
        if let Some(b) = b {
            assert_eq!(b.len(), A.row_count(), "offset vector length must equal the row count");
        }
    }

    // scheduler attaining the optimum in A·x + b for the given x
    fn extract_scheduler(
        &mut self,
        direction: OptimizationDirection,
        x: &[T],
        b: Option<&[T]>,
        multiply_result: &mut [T],
        target: &mut [T],
    ) {
        let A = self.A;
        A.multiply_with_vector(x, multiply_result);
        if let Some(b) = b {
            add_vectors(multiply_result, b);
        }
        let mut choices = vec![0; A.row_group_count()];
        reduce_row_groups(
            direction,
            multiply_result,
            A.row_group_indices(),
            target,
            Some(&mut choices),
        );
        self.info.scheduler = Some(choices);
    }
}

impl<'a, T> MinMaxLinearEquationSolver<T> for ValueIterationSolver<'a, T>
where
    T: FloatT,
{
    fn solve_equation_system(
        &mut self,
        direction: OptimizationDirection,
        x: &mut [T],
        b: &[T],
        multiply_result: Option<&mut [T]>,
        new_x: Option<&mut [T]>,
    ) -> SolveStatus {
        self.check_dimensions(x, Some(b));

        let A = self.A;
        let precision = self.settings.precision;
        let relative = self.settings.is_relative();
        let max_iter = self.settings.max_iter;

        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();
        self.info.reset(&mut timers);

        debug!(
            %direction,
            states = A.row_group_count(),
            choices = A.row_count(),
            precision = %precision,
            relative,
            "starting value iteration"
        );

        notimeit! {timers; {
            self.info.print_configuration(&self.settings, A, direction).ok();
        }}

        let mut multiply_result = Workspace::new(multiply_result, A.row_count(), T::zero());
        let mut new_x = Workspace::new(new_x, x.len(), T::zero());

        // true while the caller's `x` holds the most recent iterate
        let mut x_is_current = true;
        let mut converged = false;

        timeit! {timers => "solve"; {
        while !converged && self.info.iterations < max_iter {
            let (current, next): (&mut [T], &mut [T]) = if x_is_current {
                (&mut *x, &mut *new_x)
            } else {
                (&mut *new_x, &mut *x)
            };

            A.multiply_with_vector(current, &mut multiply_result);
            add_vectors(&mut multiply_result, b);
            reduce_row_groups(direction, &multiply_result, A.row_group_indices(), next, None);

            converged = equal_modulo_precision(current, next, precision, relative);
            self.info.max_difference = max_difference(current, next, relative);
            self.info.iterations += 1;
            x_is_current = !x_is_current;

            let is_last = converged || self.info.iterations == max_iter;
            notimeit! {timers; {
                self.info.print_status(&self.settings, is_last).ok();
            }}
        }

        if !x_is_current {
            x.copy_from(&new_x);
        }

        if self.settings.track_scheduler {
            self.extract_scheduler(direction, x, Some(b), &mut multiply_result, &mut new_x);
        }
        }} // end "solve" timer

        let status = if converged {
            info!(iterations = self.info.iterations, "value iteration converged");
            SolveStatus::Converged
        } else {
            warn!(
                iterations = self.info.iterations,
                max_difference = %self.info.max_difference,
                "value iteration did not converge within the iteration limit"
            );
            SolveStatus::MaxIterations
        };

        self.info.finalize(status, &timers);
        self.info.print_footer(&self.settings).ok();

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);

        status
    }

    fn perform_matrix_vector_multiplication(
        &mut self,
        direction: OptimizationDirection,
        x: &mut [T],
        b: Option<&[T]>,
        n: usize,
        multiply_result: Option<&mut [T]>,
    ) {
        self.check_dimensions(x, b);

        let A = self.A;
        let mut timers = self.timers.take().unwrap_or_default();
        self.info.reset(&mut timers);

        debug!(%direction, rounds = n, "starting bounded multiplication");

        let mut multiply_result = Workspace::new(multiply_result, A.row_count(), T::zero());

        timeit! {timers => "solve"; {
        for round in 0..n {
            A.multiply_with_vector(x, &mut multiply_result);
            if let Some(b) = b {
                add_vectors(&mut multiply_result, b);
            }
            // choices of the final round form the scheduler
            if self.settings.track_scheduler && round + 1 == n {
                let mut choices = vec![0; A.row_group_count()];
                reduce_row_groups(direction, &multiply_result, A.row_group_indices(), x, Some(&mut choices));
                self.info.scheduler = Some(choices);
            } else {
                reduce_row_groups(direction, &multiply_result, A.row_group_indices(), x, None);
            }
        }
        }}

        self.info.iterations = u32::try_from(n).unwrap_or(u32::MAX);
        self.info.finalize(SolveStatus::Converged, &timers);
        self.timers.replace(timers);
    }
}

impl<'a, T> ConfigurablePrintTarget for ValueIterationSolver<'a, T>
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
