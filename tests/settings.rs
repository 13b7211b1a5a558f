#![allow(non_snake_case)]

use quantmc::{multiobjective::*, solver::*};

#[test]
fn test_minmax_builder_rejects_bad_values() {
    assert!(MinMaxSettingsBuilder::<f64>::default().precision(0.0).build().is_err());
    assert!(MinMaxSettingsBuilder::<f64>::default().precision(f64::NAN).build().is_err());
    assert!(MinMaxSettingsBuilder::<f64>::default().max_iter(0).build().is_err());

    let settings = MinMaxSettings::<f32> {
        precision: -1.0,
        ..MinMaxSettings::default()
    };
    assert_eq!(settings.validate(), Err(SettingsError::BadFieldValue("precision")));
}

#[test]
fn test_multiobjective_builder() {
    let solver = MinMaxSettingsBuilder::default()
        .precision(1e-9)
        .convergence(ConvergenceCriterion::Absolute)
        .build()
        .unwrap();
    let settings = MultiObjectiveSettingsBuilder::default()
        .precision(1e-3)
        .max_steps(20)
        .solver(solver.clone())
        .build()
        .unwrap();
    assert_eq!(settings.solver, solver);
    assert!(settings.validate().is_ok());

    // nested solver settings are validated too
    let bad = MinMaxSettings {
        max_iter: 0,
        ..MinMaxSettings::default()
    };
    assert!(MultiObjectiveSettingsBuilder::<f64>::default().solver(bad).build().is_err());
    assert!(MultiObjectiveSettingsBuilder::<f64>::default().max_steps(0).build().is_err());
}

#[test]
fn test_f32_solve() {
    use quantmc::algebra::SparseMatrix;

    let A = SparseMatrix::<f32>::new(1, 1, vec![0, 1], vec![0], vec![0.5], vec![0, 1]);
    let mut solver = ValueIterationSolver::new(&A, MinMaxSettings::default());
    let mut x = vec![0.0f32];
    let status = solver.solve_equation_system(OptimizationDirection::Maximize, &mut x, &[0.25], None, None);
    assert!(status.is_converged());
    assert!((x[0] - 0.5).abs() < 1e-5);
}
