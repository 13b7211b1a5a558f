#![allow(non_snake_case)]

use quantmc::{algebra::*, io::ConfigurablePrintTarget, multiobjective::*, solver::*};

fn test_print_matrix() -> SparseMatrix<f64> {
    // state 0 either stays or moves to the absorbing state 1
    SparseMatrix::new(3, 2, vec![0, 1, 2, 2], vec![0, 1], vec![0.5, 1.0], vec![0, 2, 3])
}

fn test_print_solve<S: MinMaxLinearEquationSolver<f64>>(solver: &mut S) {
    let b = [0.25, 0.5, 0.0];
    let mut x = vec![0.0; 2];
    solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &b, None, None);
}

fn verbose_settings() -> MinMaxSettings<f64> {
    MinMaxSettingsBuilder::default().verbose(true).build().unwrap()
}

#[test]
fn test_print_to_stdout() {
    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, verbose_settings());
    solver.print_to_stdout();
    test_print_solve(&mut solver);
}

#[test]
fn test_print_to_buffer() {
    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, verbose_settings());
    solver.print_to_buffer();
    test_print_solve(&mut solver);
    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("quantmc"));
    assert!(result.contains("Terminated with status = Converged"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, verbose_settings());
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    solver.print_to_file(file.into_file());
    test_print_solve(&mut solver);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("quantmc"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, verbose_settings());
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    solver.print_to_stream(stream);
    test_print_solve(&mut solver);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("quantmc"));
}

#[test]
fn test_print_to_sink() {
    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, verbose_settings());
    solver.print_to_sink();
    test_print_solve(&mut solver);
    // no output
}

#[test]
fn test_print_quiet_solver() {
    let A = test_print_matrix();
    let mut solver = ValueIterationSolver::new(&A, MinMaxSettings::default());
    solver.print_to_buffer();
    test_print_solve(&mut solver);
    assert!(solver.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_print_refinement_to_buffer() {
    // a single state choosing between two rewards
    let A = SparseMatrix::new(2, 1, vec![0, 0, 0], vec![], vec![], vec![0, 2]);
    let model = MultiObjectiveModel::new(
        A,
        0,
        vec![
            Objective::maximize(vec![1.0, 0.0]),
            Objective::maximize(vec![0.0, 1.0]),
        ],
    );
    let settings = MultiObjectiveSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();

    let mut engine = MultiObjectiveEngine::new(&model, settings).unwrap();
    engine.print_to_buffer();
    engine.check(&MultiObjectiveQuery::Pareto).unwrap();

    let result = engine.get_print_buffer().unwrap();
    assert!(result.contains("multi-objective refinement"));
    assert!(result.contains("target precision reached = true"));
}
