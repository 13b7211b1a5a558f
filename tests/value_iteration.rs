#![allow(non_snake_case)]

use quantmc::{algebra::*, solver::*};

// Acyclic reachability model.  Entries of b are the one step
// probabilities of reaching the target.
//
//   state 0 : row 0 -> 0.5 state 1, 0.5 state 2
//             row 1 -> 1.0 state 2
//   state 1 : row 2 -> 0.5 state 3,  b = 0.5
//   state 2 : row 3 -> 0.2 state 3,  b = 0.3
//   state 3 : row 4 -> nothing,      b = 0.9
fn acyclic_model() -> (SparseMatrix<f64>, Vec<f64>) {
    let A = SparseMatrix::new(
        5,
        4,
        vec![0, 2, 3, 4, 5, 5],
        vec![1, 2, 2, 3, 3],
        vec![0.5, 0.5, 1.0, 0.5, 0.2],
        vec![0, 2, 3, 4, 5],
    );
    let b = vec![0.0, 0.0, 0.5, 0.3, 0.9];
    (A, b)
}

// state 0 returns to itself with probability 1/2 and collects 1/4 per
// visit, so the fixed point is 1/2
fn geometric_model() -> (SparseMatrix<f64>, Vec<f64>) {
    let A = SparseMatrix::new(1, 1, vec![0, 1], vec![0], vec![0.5], vec![0, 1]);
    (A, vec![0.25])
}

fn absolute_settings(max_iter: u32) -> MinMaxSettings<f64> {
    MinMaxSettingsBuilder::default()
        .precision(1e-6)
        .max_iter(max_iter)
        .convergence(ConvergenceCriterion::Absolute)
        .build()
        .unwrap()
}

#[test]
fn test_acyclic_reachability() {
    let (A, b) = acyclic_model();
    let settings = MinMaxSettingsBuilder::default()
        .track_scheduler(true)
        .build()
        .unwrap();
    let mut solver = ValueIterationSolver::new(&A, settings);

    let mut x = vec![0.0; 4];
    let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
    assert_eq!(status, SolveStatus::Converged);
    let expected = [0.715, 0.95, 0.48, 0.9];
    assert!(x.norm_inf_diff(&expected) < 1e-12);
    assert_eq!(solver.scheduler(), Some(&[0, 0, 0, 0][..]));

    let mut x = vec![0.0; 4];
    let status = solver.solve_equation_system(OptimizationDirection::Minimize, &mut x, &b, None, None);
    assert!(status.is_converged());
    assert!((x[0] - 0.48).abs() < 1e-12);
    assert_eq!(solver.scheduler().unwrap()[0], 1);
    assert!(solver.info.iterations <= 5);
}

#[test]
fn test_convergence_monotonicity_absolute() {
    let (A, b) = geometric_model();

    // iterate k is the result of a solve capped at k iterations
    let iterates: Vec<f64> = (1..=30)
        .map(|k| {
            let mut solver = ValueIterationSolver::new(&A, absolute_settings(k));
            let mut x = vec![0.0];
            solver.solve_equation_system(OptimizationDirection::Minimize, &mut x, &b, None, None);
            x[0]
        })
        .collect();

    let diffs: Vec<f64> = iterates.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    assert!(diffs.windows(2).all(|d| d[1] <= d[0]));

    let mut solver = ValueIterationSolver::new(&A, absolute_settings(10_000));
    let mut x = vec![0.0];
    let status = solver.solve_equation_system(OptimizationDirection::Minimize, &mut x, &b, None, None);
    assert!(status.is_converged());
    assert!(solver.info.iterations <= 10_000);
    assert!((x[0] - 0.5).abs() <= 1e-6);
    assert!(solver.info.max_difference <= 1e-6);
}

#[test]
fn test_convergence_relative() {
    let (A, b) = geometric_model();
    let settings = MinMaxSettingsBuilder::default()
        .precision(1e-8)
        .build()
        .unwrap();
    let mut solver = ValueIterationSolver::new(&A, settings);
    let mut x = vec![0.0];
    solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
    assert!(((x[0] - 0.5) / 0.5).abs() <= 1e-8);
}

#[test]
fn test_iteration_limit_reported() {
    let (A, b) = geometric_model();
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(3));
    let mut x = vec![0.0];
    let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);

    // best available iterate is still returned
    assert_eq!(status, SolveStatus::MaxIterations);
    assert_eq!(solver.info.iterations, 3);
    assert!((x[0] - 0.4375).abs() < 1e-15);
}

#[test]
fn test_warm_start() {
    let (A, b) = geometric_model();
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(100));
    let mut x = vec![0.5];
    let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
    assert!(status.is_converged());
    assert_eq!(solver.info.iterations, 1);
    assert_eq!(x[0], 0.5);
}

#[test]
fn test_shared_matrix_across_threads() {
    let (A, b) = acyclic_model();

    std::thread::scope(|s| {
        let handles: Vec<_> = [OptimizationDirection::Minimize, OptimizationDirection::Maximize]
            .into_iter()
            .map(|direction| {
                let (A, b) = (&A, &b);
                s.spawn(move || {
                    let mut solver = ValueIterationSolver::new(A, MinMaxSettings::default());
                    let mut x = vec![0.0; 4];
                    solver.solve_equation_system(direction, &mut x, b, None, None);
                    x[0]
                })
            })
            .collect();
        let values: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!((values[0] - 0.48).abs() < 1e-12);
        assert!((values[1] - 0.715).abs() < 1e-12);
    });
}
