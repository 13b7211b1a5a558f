#![allow(non_snake_case)]

use crate::{
    algebra::*,
    multiobjective::{MultiObjectiveModel, MultiObjectiveSettings},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// the model as supplied by the user together with the settings that
// accompanied it

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonModelData<T: FloatT> {
    pub model: MultiObjectiveModel<T>,
    pub settings: MultiObjectiveSettings<T>,
}

impl<T> MultiObjectiveModel<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the model and `settings` to `file` as JSON
    pub fn write_to_file(
        &self,
        settings: &MultiObjectiveSettings<T>,
        file: &mut File,
    ) -> Result<(), io::Error> {
        let json_data = JsonModelData {
            model: self.clone(),
            settings: settings.clone(),
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Reads a model written by [`write_to_file`](MultiObjectiveModel::write_to_file).
    ///
    /// The stored settings are returned unless `settings` overrides them.
    /// A model that fails [`validate`](MultiObjectiveModel::validate) is
    /// reported as [`io::ErrorKind::InvalidData`].
    pub fn read_from_file(
        file: &mut File,
        settings: Option<MultiObjectiveSettings<T>>,
    ) -> Result<(Self, MultiObjectiveSettings<T>), io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonModelData<T> = serde_json::from_str(&buffer)?;

        json_data
            .model
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let settings = settings.unwrap_or(json_data.settings);
        Ok((json_data.model, settings))
    }
}

#[test]
fn test_json_io() {
    use crate::multiobjective::{Objective, MultiObjectiveSettingsBuilder};
    use std::io::{Seek, SeekFrom};

    let A = SparseMatrix::new(3, 2, vec![0, 1, 1, 2], vec![1, 1], vec![0.5, 1.0], vec![0, 2, 3]);
    let model = MultiObjectiveModel::new(
        A,
        0,
        vec![
            Objective::maximize(vec![0.5, 0.0, 0.0]),
            Objective::minimize(vec![1.0, 2.0, 0.0]),
        ],
    );
    let settings = MultiObjectiveSettingsBuilder::default()
        .max_steps(12)
        .build()
        .unwrap();

    let mut file = tempfile::tempfile().unwrap();
    model.write_to_file(&settings, &mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let (model2, settings2) = MultiObjectiveModel::<f64>::read_from_file(&mut file, None).unwrap();
    assert_eq!(model, model2);
    assert_eq!(settings, settings2);

    // custom settings take precedence
    file.seek(SeekFrom::Start(0)).unwrap();
    let (_, settings3) =
        MultiObjectiveModel::<f64>::read_from_file(&mut file, Some(MultiObjectiveSettings::default()))
            .unwrap();
    assert_eq!(settings3.max_steps, 100);
}
