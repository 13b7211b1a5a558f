use crate::algebra::SparseFormatError;
use crate::solver::SettingsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned when a multi-objective query cannot be run
pub enum MultiObjectiveError {
    #[error("At least one objective is required")]
    NoObjectives,
    #[error("{count} objectives exceed the supported maximum of {max}")]
    TooManyObjectives { count: usize, max: usize },
    #[error("Objective {objective} has {found} rewards but the model has {expected} choices")]
    RewardLength {
        objective: usize,
        expected: usize,
        found: usize,
    },
    #[error("Initial state {state} is out of range for a model with {states} states")]
    InitialStateOutOfRange { state: usize, states: usize },
    #[error("Matrix has {columns} columns but {states} row groups")]
    ColumnCountMismatch { columns: usize, states: usize },
    #[error("Expected {expected} thresholds, found {found}")]
    ThresholdCount { expected: usize, found: usize },
    #[error("Objective {objective} is out of range for {count} objectives")]
    ObjectiveOutOfRange { objective: usize, count: usize },
    #[error("The optimized objective {0} must not carry a threshold")]
    OptimizedObjectiveHasThreshold(usize),
    #[error("A step budget of {max_steps} is below the {required} initialization steps")]
    InsufficientStepBudget { max_steps: u32, required: u32 },
    #[error("Invalid transition matrix: {0}")]
    Format(#[from] SparseFormatError),
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} was read before it was set")]
/// Error returned when reading a result field that has not been set
pub struct UnsetValueError(pub &'static str);
