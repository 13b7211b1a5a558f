#![allow(non_snake_case)]
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::*;

// two transient states of a reachability query
//
// state 0 : a) move to state 1 w.p. 0.5, else fail
//           b) reach the goal w.p. 0.3, else fail
// state 1 : reach the goal w.p. 0.5, else return to state 0
//
// max probabilities are [1/3, 2/3], min probabilities [0.3, 0.65]
fn reachability_model() -> (SparseMatrix<f64>, Vec<f64>) {
    let A = SparseMatrix::new(
        3,
        2,
        vec![0, 1, 1, 2],
        vec![1, 0],
        vec![0.5, 0.5],
        vec![0, 2, 3],
    );
    let b = vec![0.0, 0.3, 0.5];
    (A, b)
}

fn absolute_settings(precision: f64) -> MinMaxSettings<f64> {
    MinMaxSettingsBuilder::default()
        .precision(precision)
        .convergence(ConvergenceCriterion::Absolute)
        .track_scheduler(true)
        .build()
        .unwrap()
}

#[test]
fn test_maximal_reachability() {
    let (A, b) = reachability_model();
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(1e-10));

    let mut x = vec![0.0; 2];
    let status =
        solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);

    assert_eq!(status, SolveStatus::Converged);
    assert_eq!(solver.info.status, SolveStatus::Converged);
    assert!((x[0] - 1.0 / 3.0).abs() < 1e-8);
    assert!((x[1] - 2.0 / 3.0).abs() < 1e-8);
    assert!(solver.info.max_difference <= 1e-10);
    assert_eq!(solver.scheduler(), Some(&[0, 0][..]));
}

#[test]
fn test_minimal_reachability() {
    let (A, b) = reachability_model();
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(1e-10));

    let mut x = vec![0.0; 2];
    let status =
        solver.solve_equation_system(OptimizationDirection::Minimize, &mut x, &b, None, None);

    // the iterates become stationary after six rounds
    assert!(status.is_converged());
    assert_eq!(solver.info.iterations, 6);
    assert_eq!(x, vec![0.3, 0.65]);
    assert_eq!(solver.scheduler(), Some(&[1, 0][..]));
}

#[test]
fn test_final_iterate_lands_in_x() {
    let (A, b) = reachability_model();
    let dir = OptimizationDirection::Maximize;

    // odd number of iterations : the last iterate lives in the scratch vector
    let settings = MinMaxSettings {
        max_iter: 1,
        ..absolute_settings(1e-12)
    };
    let mut solver = ValueIterationSolver::new(&A, settings);
    let mut x = vec![0.0; 2];
    let status = solver.solve_equation_system(dir, &mut x, &b, None, None);
    assert_eq!(status, SolveStatus::MaxIterations);
    assert_eq!(x, vec![0.3, 0.5]);

    // even number of iterations
    let settings = MinMaxSettings {
        max_iter: 2,
        ..absolute_settings(1e-12)
    };
    let mut solver = ValueIterationSolver::new(&A, settings);
    let mut x = vec![0.0; 2];
    let status = solver.solve_equation_system(dir, &mut x, &b, None, None);
    assert_eq!(status, SolveStatus::MaxIterations);
    assert_eq!(solver.info.iterations, 2);
    assert_eq!(x, vec![0.3, 0.65]);
}

#[test]
fn test_caller_scratch_buffers() {
    let (A, b) = reachability_model();
    let dir = OptimizationDirection::Minimize;
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(1e-10));

    let mut multiply_result = vec![-1.0; 5];
    let mut new_x = vec![-1.0; 2];
    let mut x = vec![0.0; 2];
    solver.solve_equation_system(
        dir,
        &mut x,
        &b,
        Some(&mut multiply_result[..]),
        Some(&mut new_x[..]),
    );
    assert_eq!(x, vec![0.3, 0.65]);
    // only the leading row count entries are used
    assert_eq!(&multiply_result[3..], &[-1.0, -1.0]);

    // repeated solve from the previous answer converges at once
    let status = solver.solve_equation_system(
        dir,
        &mut x,
        &b,
        Some(&mut multiply_result[..]),
        Some(&mut new_x[..]),
    );
    assert!(status.is_converged());
    assert_eq!(solver.info.iterations, 1);
    assert_eq!(x, vec![0.3, 0.65]);
}

#[test]
fn test_relative_zero_policy() {
    // a single state with a self loop and no reward stays at zero
    let A = SparseMatrix::new(1, 1, vec![0, 1], vec![0], vec![1.0], vec![0, 1]);
    let mut solver = ValueIterationSolver::new(&A, MinMaxSettings::default());

    let mut x = vec![0.0];
    let status =
        solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &[0.0], None, None);
    assert!(status.is_converged());
    assert_eq!(solver.info.iterations, 1);
    assert_eq!(x, vec![0.0]);
}

#[test]
fn test_bounded_multiplication() {
    let (A, b) = reachability_model();
    let mut solver = ValueIterationSolver::new(&A, absolute_settings(1e-10));

    let mut x = vec![0.0; 2];
    solver.perform_matrix_vector_multiplication(
        OptimizationDirection::Maximize,
        &mut x,
        Some(&b[..]),
        2,
        None,
    );
    assert_eq!(x, vec![0.3, 0.65]);
    assert_eq!(solver.info.iterations, 2);
    assert_eq!(solver.scheduler(), Some(&[1, 0][..]));

    // without offsets
    let mut x = vec![1.0, 1.0];
    solver.perform_matrix_vector_multiplication(
        OptimizationDirection::Minimize,
        &mut x,
        None,
        1,
        None,
    );
    assert_eq!(x, vec![0.0, 0.5]);

    // zero rounds leaves x untouched
    let mut x = vec![0.25, 0.75];
    solver.perform_matrix_vector_multiplication(
        OptimizationDirection::Minimize,
        &mut x,
        Some(&b[..]),
        0,
        None,
    );
    assert_eq!(x, vec![0.25, 0.75]);
}

#[test]
fn test_verbose_output() {
    let (A, b) = reachability_model();
    let settings = MinMaxSettings {
        verbose: true,
        ..absolute_settings(1e-10)
    };
    let mut solver = ValueIterationSolver::new(&A, settings);
    solver.print_to_buffer();

    let mut x = vec![0.0; 2];
    solver.solve_equation_system(OptimizationDirection::Minimize, &mut x, &b, None, None);

    let text = solver.get_print_buffer().unwrap();
    assert!(text.contains("states (row groups) = 2"));
    assert!(text.contains("direction = Minimize"));
    assert!(text.contains("Terminated with status = Converged"));
    assert!(solver.timers().unwrap().elapsed(&["solve"]).is_some());
}

#[test]
#[should_panic]
fn test_invalid_settings_panic() {
    let (A, _) = reachability_model();
    let settings = MinMaxSettings {
        max_iter: 0,
        ..MinMaxSettings::default()
    };
    ValueIterationSolver::new(&A, settings);
}
