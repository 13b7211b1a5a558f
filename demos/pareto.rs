#![allow(non_snake_case)]
use quantmc::algebra::*;
use quantmc::geometry::ConvexPolytope;
use quantmc::multiobjective::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quantmc=info".into()),
        )
        .init();

    // Reward / cost trade-off
    //
    // state 0 offers three choices, each ending in the sink state 1
    //   row 0 : reward 1.0, cost 1.0
    //   row 1 : reward 0.0, cost 0.0
    //   row 2 : reward 0.6, cost 0.4

    let A = SparseMatrix::new(
        4,                   // m
        2,                   // n
        vec![0, 1, 2, 3, 3], // rowptr
        vec![1, 1, 1],       // colval
        vec![1., 1., 1.],    // nzval
        vec![0, 3, 4],       // row_group_indices
    );

    let model = MultiObjectiveModel::new(
        A,
        0,
        vec![
            Objective::maximize(vec![1.0, 0.0, 0.6, 0.0]),
            Objective::minimize(vec![1.0, 0.0, 0.4, 0.0]),
        ],
    );

    let settings = MultiObjectiveSettingsBuilder::default()
        .precision(1e-6)
        .verbose(true)
        .build()
        .unwrap();

    let mut engine = MultiObjectiveEngine::new(&model, settings).unwrap();

    let result = engine.check(&MultiObjectiveQuery::Pareto).unwrap();
    println!("Pareto points = {:?}", result.pareto_points());
    println!(
        "over = {:.4}, under = {:.4}",
        result.over_approximation().measure(),
        result.under_approximation().measure()
    );

    let query = MultiObjectiveQuery::Numerical {
        objective: 1,
        thresholds: vec![Some(0.5), None],
    };
    let result = engine.check(&query).unwrap();
    match result.numerical_result() {
        Ok(cost) => println!("minimal cost for reward >= 0.5 : {cost:.6}"),
        Err(e) => println!("{e}"),
    }
}
