use super::*;
use crate::algebra::*;
use crate::io::{forward_print_target, PrintTarget};
use crate::solver::core::{OptimizationDirection, SolveStatus};
use crate::timers::*;
use std::io::Write;
use std::time::Duration;

// rows of the progress table are printed at this interval,
// plus the first and the final iteration
const PRINT_INTERVAL: u32 = 100;

/// Progress and termination information for the
/// [`ValueIterationSolver`](crate::solver::ValueIterationSolver)

#[derive(Default, Debug)]
pub struct MinMaxInfo<T> {
    /// iterations (or bounded multiplication rounds) performed by the last call
    pub iterations: u32,
    /// largest coordinatewise difference between the final two iterates,
    /// in the configured convergence measure
    pub max_difference: T,
    pub status: SolveStatus,
    /// wall clock seconds spent in the last call
    pub solve_time: f64,
    /// local choice index per row group from the last call, if tracked
    pub scheduler: Option<Vec<usize>>,

    stream: PrintTarget,
}

forward_print_target!(MinMaxInfo<T>);

impl<T> MinMaxInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        self.status = SolveStatus::Unsolved;
        self.iterations = 0;
        self.max_difference = T::zero();
        self.solve_time = 0f64;
        self.scheduler = None;

        timers.reset_timer("solve");
    }

    pub(crate) fn finalize(&mut self, status: SolveStatus, timers: &Timers) {
        self.status = status;
        self.solve_time = timers.total_time().as_secs_f64();
    }

    pub(crate) fn print_configuration(
        &mut self,
        settings: &MinMaxSettings<T>,
        A: &SparseMatrix<T>,
        direction: OptimizationDirection,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "-------------------------------------------------------------")?;
        writeln!(out, "           quantmc v{}  -  value iteration", crate::VERSION)?;
        writeln!(out, "-------------------------------------------------------------")?;
        writeln!(out, "\nmodel:")?;
        writeln!(out, "  states (row groups) = {}", A.row_group_count())?;
        writeln!(out, "  choices (rows)      = {}", A.row_count())?;
        writeln!(out, "  transitions (nnz)   = {}", A.nonzero_entry_count())?;
        writeln!(out, "\nsettings:")?;
        writeln!(out, "  direction = {}, convergence = {}", direction, settings.convergence)?;
        writeln!(
            out,
            "  precision = {:.1e}, max iter = {}",
            settings.precision, settings.max_iter
        )?;
        writeln!(out)?;
        writeln!(out, "iter    max diff")?;
        writeln!(out, "--------------------")?;
        out.flush()
    }

    pub(crate) fn print_status(&mut self, settings: &MinMaxSettings<T>, is_last: bool) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }
        if !(self.iterations == 1 || is_last || self.iterations % PRINT_INTERVAL == 0) {
            return Ok(());
        }
        writeln!(self.stream, "{:>5}   {:.4e}", self.iterations, self.max_difference)
    }

    pub(crate) fn print_footer(&mut self, settings: &MinMaxSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "--------------------")?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        out.flush()
    }
}
