#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use quantmc::{algebra::*, multiobjective::*};
    use std::io::{Seek, SeekFrom};

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
    let settings = MultiObjectiveSettings::default();
    let result = check_multi_objective(&model, &MultiObjectiveQuery::Pareto, settings.clone()).unwrap();

    // write the model to a file
    let mut file = tempfile::tempfile().unwrap();
    model.write_to_file(&settings, &mut file).unwrap();

    // read the model from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let (model2, settings2) = MultiObjectiveModel::<f64>::read_from_file(&mut file, None).unwrap();
    let result2 = check_multi_objective(&model2, &MultiObjectiveQuery::Pareto, settings2).unwrap();
    assert_eq!(result.pareto_points(), result2.pareto_points());

    // read the model from the file with custom settings
    file.seek(SeekFrom::Start(0)).unwrap();
    let settings = MultiObjectiveSettingsBuilder::default()
        .max_steps(4)
        .build()
        .unwrap();
    let (model3, settings3) =
        MultiObjectiveModel::<f64>::read_from_file(&mut file, Some(settings)).unwrap();
    let result3 = check_multi_objective(&model3, &MultiObjectiveQuery::Pareto, settings3).unwrap();
    assert!(result3.max_steps_performed());
    assert_eq!(result3.steps().len(), 4);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_io_rejects_invalid_model() {
    use quantmc::{algebra::*, multiobjective::*};
    use std::io::{Seek, SeekFrom, Write};

    let A = SparseMatrix::new(2, 1, vec![0, 0, 0], vec![], vec![], vec![0, 2]);
    let model = MultiObjectiveModel::new(A, 0, vec![Objective::maximize(vec![1.0, 0.0])]);
    let settings = MultiObjectiveSettings::default();

    let mut file = tempfile::tempfile().unwrap();
    model.write_to_file(&settings, &mut file).unwrap();

    // corrupt the initial state
    let mut bad = model.clone();
    bad.initial_state = 5;
    let mut file2 = tempfile::tempfile().unwrap();
    bad.write_to_file(&settings, &mut file2).unwrap();
    file2.seek(SeekFrom::Start(0)).unwrap();
    let err = MultiObjectiveModel::<f64>::read_from_file(&mut file2, None).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    // garbage is a parse error
    let mut file3 = tempfile::tempfile().unwrap();
    file3.write_all(b"{ not json").unwrap();
    file3.seek(SeekFrom::Start(0)).unwrap();
    assert!(MultiObjectiveModel::<f64>::read_from_file(&mut file3, None).is_err());
}
