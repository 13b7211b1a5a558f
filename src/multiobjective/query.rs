use super::MultiObjectiveError;
use crate::solver::{validate_precision, MinMaxSettings, SettingsError};
use crate::{algebra::*, solver::core::OptimizationDirection};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The question asked about a [`MultiObjectiveModel`](super::MultiObjectiveModel).
///
/// Thresholds are stated in each objective's own orientation: lower
/// bounds for maximized objectives and upper bounds for minimized ones.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum MultiObjectiveQuery<T> {
    /// Can all thresholds be met simultaneously by a single scheduler?
    Achievability { thresholds: Vec<T> },
    /// Optimal value of `objective` among the schedulers meeting the
    /// given thresholds of the remaining objectives.
    Numerical {
        objective: usize,
        thresholds: Vec<Option<T>>,
    },
    /// Approximate the whole set of Pareto optimal values.
    Pareto,
}

impl<T> MultiObjectiveQuery<T>
where
    T: FloatT,
{
    /// Checks the query against a model with `objectives` objectives
    pub fn validate(&self, objectives: usize) -> Result<(), MultiObjectiveError> {
        match self {
            MultiObjectiveQuery::Achievability { thresholds } => {
                check_threshold_count(objectives, thresholds.len())
            }
            MultiObjectiveQuery::Numerical {
                objective,
                thresholds,
            } => {
                check_threshold_count(objectives, thresholds.len())?;
                if *objective >= objectives {
                    return Err(MultiObjectiveError::ObjectiveOutOfRange {
                        objective: *objective,
                        count: objectives,
                    });
                }
                if thresholds[*objective].is_some() {
                    return Err(MultiObjectiveError::OptimizedObjectiveHasThreshold(*objective));
                }
                Ok(())
            }
            MultiObjectiveQuery::Pareto => Ok(()),
        }
    }

    /// Thresholds converted to lower bounds for maximization oriented
    /// objectives, `None` where unconstrained
    pub(crate) fn oriented_thresholds(
        &self,
        directions: &[OptimizationDirection],
    ) -> Vec<Option<T>> {
        let orient = |t: T, d: &OptimizationDirection| if d.is_maximize() { t } else { -t };
        match self {
            MultiObjectiveQuery::Achievability { thresholds } => thresholds
                .iter()
                .zip(directions)
                .map(|(&t, d)| Some(orient(t, d)))
                .collect(),
            MultiObjectiveQuery::Numerical { thresholds, .. } => thresholds
                .iter()
                .zip(directions)
                .map(|(t, d)| t.map(|t| orient(t, d)))
                .collect(),
            MultiObjectiveQuery::Pareto => vec![None; directions.len()],
        }
    }
}

fn check_threshold_count(expected: usize, found: usize) -> Result<(), MultiObjectiveError> {
    if expected == found {
        Ok(())
    } else {
        Err(MultiObjectiveError::ThresholdCount { expected, found })
    }
}

/// Settings for the [`MultiObjectiveEngine`](super::MultiObjectiveEngine)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiObjectiveSettings<T: FloatT> {
    ///target gap between the over- and under-approximation
    #[builder(default = "(1e-4).as_T()")]
    pub precision: T,

    ///maximum number of refinement steps, including the two
    ///initialization steps per objective
    #[builder(default = "100")]
    pub max_steps: u32,

    ///settings for every single objective solve
    #[builder(default = "MinMaxSettings::default()")]
    pub solver: MinMaxSettings<T>,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for MultiObjectiveSettings<T>
where
    T: FloatT,
{
    fn default() -> MultiObjectiveSettings<T> {
        MultiObjectiveSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> MultiObjectiveSettings<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_precision(self.precision)?;
        validate_max_steps(self.max_steps)?;
        self.solver.validate()
    }
}

impl From<SettingsError> for MultiObjectiveSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        MultiObjectiveSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> MultiObjectiveSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(precision) = self.precision {
            validate_precision(precision)?;
        }
        if let Some(max_steps) = self.max_steps {
            validate_max_steps(max_steps)?;
        }
        if let Some(ref solver) = self.solver {
            solver.validate()?;
        }
        Ok(())
    }
}

fn validate_max_steps(max_steps: u32) -> Result<(), SettingsError> {
    if max_steps > 0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("max_steps"))
    }
}

#[test]
fn test_query_validate() {
    let q = MultiObjectiveQuery::Achievability {
        thresholds: vec![0.5, 0.5],
    };
    assert!(q.validate(2).is_ok());
    assert_eq!(
        q.validate(3),
        Err(MultiObjectiveError::ThresholdCount {
            expected: 3,
            found: 2
        })
    );

    let q = MultiObjectiveQuery::Numerical {
        objective: 0,
        thresholds: vec![Some(0.1), None],
    };
    assert_eq!(
        q.validate(2),
        Err(MultiObjectiveError::OptimizedObjectiveHasThreshold(0))
    );
    let q = MultiObjectiveQuery::<f64>::Numerical {
        objective: 2,
        thresholds: vec![None, None],
    };
    assert!(matches!(
        q.validate(2),
        Err(MultiObjectiveError::ObjectiveOutOfRange { .. })
    ));
    assert!(MultiObjectiveQuery::<f64>::Pareto.validate(4).is_ok());
}

#[test]
fn test_oriented_thresholds() {
    use OptimizationDirection::*;
    let q = MultiObjectiveQuery::Numerical {
        objective: 0,
        thresholds: vec![None, Some(2.0), Some(0.5)],
    };
    assert_eq!(
        q.oriented_thresholds(&[Maximize, Minimize, Maximize]),
        vec![None, Some(-2.0), Some(0.5)]
    );
}

#[test]
fn test_multiobjective_settings_validate() {
    let settings = MultiObjectiveSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings.precision, 1e-4);
    assert_eq!(settings.max_steps, 100);
    assert_eq!(settings.solver, MinMaxSettings::default());

    assert!(MultiObjectiveSettingsBuilder::<f64>::default()
        .max_steps(0)
        .build()
        .is_err());

    let bad_solver = MinMaxSettings {
        precision: 0.0,
        ..MinMaxSettings::default()
    };
    assert!(MultiObjectiveSettingsBuilder::<f64>::default()
        .solver(bad_solver)
        .build()
        .is_err());
}
