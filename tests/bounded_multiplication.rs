#![allow(non_snake_case)]

use proptest::prelude::*;
use quantmc::{algebra::*, solver::*};

// random row-grouped matrices with 1..5 states and 1..4 choices per
// state, plus an offset vector and a starting vector
fn model_strategy() -> impl Strategy<Value = (SparseMatrix<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..5)
        .prop_flat_map(|states| (prop::collection::vec(1usize..4, states), Just(states)))
        .prop_flat_map(|(choices, states)| {
            let rows: usize = choices.iter().sum();
            (
                Just(choices),
                prop::collection::vec(prop::collection::vec(prop::option::of(0.0f64..0.5), states), rows),
                prop::collection::vec(-1.0f64..1.0, rows),
                prop::collection::vec(-1.0f64..1.0, states),
            )
        })
        .prop_map(|(choices, dense, b, x0)| {
            let mut builder = SparseMatrixBuilder::new();
            let mut row = 0;
            for &c in &choices {
                builder.new_row_group(row).unwrap();
                for _ in 0..c {
                    for (col, v) in dense[row].iter().enumerate() {
                        if let Some(v) = v {
                            builder.add_next_value(row, col, *v).unwrap();
                        }
                    }
                    row += 1;
                }
            }
            let A = builder.build(Some(row), Some(x0.len())).unwrap();
            (A, b, x0)
        })
}

fn direction_strategy() -> impl Strategy<Value = OptimizationDirection> {
    prop_oneof![
        Just(OptimizationDirection::Minimize),
        Just(OptimizationDirection::Maximize)
    ]
}

fn manual_step(A: &SparseMatrix<f64>, direction: OptimizationDirection, x: &mut [f64], b: Option<&[f64]>) {
    let mut result = vec![0.0; A.row_count()];
    A.multiply_with_vector(x, &mut result);
    if let Some(b) = b {
        add_vectors(&mut result, b);
    }
    reduce_row_groups(direction, &result, A.row_group_indices(), x, None);
}

proptest! {
    #[test]
    fn bounded_multiplication_equals_manual_steps(
        (A, b, x0) in model_strategy(),
        direction in direction_strategy(),
        n in 0usize..6,
        with_offset in any::<bool>(),
    ) {
        let b = with_offset.then_some(&b[..]);

        let mut expected = x0.clone();
        for _ in 0..n {
            manual_step(&A, direction, &mut expected, b);
        }

        let mut solver = ValueIterationSolver::new(&A, MinMaxSettings::default());
        let mut x = x0.clone();
        solver.perform_matrix_vector_multiplication(direction, &mut x, b, n, None);

        prop_assert!(x.norm_inf_diff(&expected) <= 1e-12);
        if n == 0 {
            prop_assert_eq!(x, x0);
        }
    }

    #[test]
    fn bounded_multiplication_with_scratch_buffer(
        (A, b, x0) in model_strategy(),
        direction in direction_strategy(),
        n in 1usize..4,
    ) {
        let mut solver = ValueIterationSolver::new(&A, MinMaxSettings::default());

        let mut x1 = x0.clone();
        solver.perform_matrix_vector_multiplication(direction, &mut x1, Some(&b), n, None);

        let mut scratch = vec![f64::NAN; A.row_count() + 3];
        let mut x2 = x0;
        solver.perform_matrix_vector_multiplication(direction, &mut x2, Some(&b), n, Some(&mut scratch[..]));

        prop_assert_eq!(x1, x2);
    }
}

#[test]
fn test_bounded_scheduler_from_last_round() {
    // state 0 picks between reaching the target now (row 0) or moving
    // to state 1 which collects more later (row 1)
    let A = SparseMatrix::new(3, 2, vec![0, 0, 1, 1], vec![1], vec![1.0], vec![0, 2, 3]);
    let b = [0.5, 0.0, 1.0];
    let settings = MinMaxSettingsBuilder::default()
        .track_scheduler(true)
        .build()
        .unwrap();
    let mut solver = ValueIterationSolver::new(&A, settings);

    let mut x = vec![0.0; 2];
    solver.perform_matrix_vector_multiplication(OptimizationDirection::Maximize, &mut x, Some(&b), 1, None);
    assert_eq!(x, vec![0.5, 1.0]);
    assert_eq!(solver.scheduler(), Some(&[0, 0][..]));

    let mut x = vec![0.0; 2];
    solver.perform_matrix_vector_multiplication(OptimizationDirection::Maximize, &mut x, Some(&b), 2, None);
    assert_eq!(x, vec![1.0, 1.0]);
    assert_eq!(solver.scheduler(), Some(&[1, 0][..]));
    assert_eq!(solver.info.iterations, 2);
}
