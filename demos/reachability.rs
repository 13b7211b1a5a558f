#![allow(non_snake_case)]
use quantmc::algebra::*;
use quantmc::solver::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quantmc=info".into()),
        )
        .init();

    // Reachability example
    //
    // state 0 : row 0 -> gamble, 0.5 to the goal and 0.5 back to state 0
    //           row 1 -> move to state 1
    // state 1 : row 2 -> 0.9 to the goal, 0.1 lost
    //
    // b holds the one step probabilities of reaching the goal

    let A = SparseMatrix::new(
        3,                   // m
        2,                   // n
        vec![0, 1, 2, 2],    // rowptr
        vec![0, 1],          // colval
        vec![0.5, 1.0],      // nzval
        vec![0, 2, 3],       // row_group_indices
    );

    let b = vec![0.5, 0., 0.9];

    let settings = MinMaxSettingsBuilder::default()
        .precision(1e-8)
        .track_scheduler(true)
        .verbose(true)
        .build()
        .unwrap();

    let mut solver = ValueIterationSolver::new(&A, settings);

    for direction in [OptimizationDirection::Maximize, OptimizationDirection::Minimize] {
        let mut x = vec![0.; 2];
        let status = solver.solve_equation_system(direction, &mut x, &b, None, None);
        println!("{} : status = {}, values = {:?}", direction, status, x);
        println!("scheduler = {:?}", solver.scheduler());
    }

    // probability of reaching the goal within 3 steps
    let mut x = vec![0.; 2];
    solver.perform_matrix_vector_multiplication(OptimizationDirection::Maximize, &mut x, Some(&b), 3, None);
    println!("bounded (3 steps) = {:?}", x);
}
