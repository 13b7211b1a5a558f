use crate::{algebra::*, solver::core::SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Measure used to decide whether two successive iterates agree

#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvergenceCriterion {
    /// `|x[i] - y[i]| / |y[i]| <= precision`, or `|x[i]| <= precision`
    /// where `y[i]` is zero
    #[default]
    Relative,
    /// `|x[i] - y[i]| <= precision`
    Absolute,
}

impl ConvergenceCriterion {
    pub fn is_relative(&self) -> bool {
        matches!(self, ConvergenceCriterion::Relative)
    }
}

impl std::fmt::Display for ConvergenceCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Settings for the [`ValueIterationSolver`](crate::solver::ValueIterationSolver)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MinMaxSettings<T: FloatT> {
    ///convergence tolerance between successive iterates
    #[builder(default = "(1e-6).as_T()")]
    pub precision: T,

    ///maximum number of iterations
    #[builder(default = "10_000")]
    pub max_iter: u32,

    ///relative or absolute convergence test
    #[builder(default = "ConvergenceCriterion::Relative")]
    pub convergence: ConvergenceCriterion,

    ///record an optimal choice per row group after each solve
    #[builder(default = "false")]
    pub track_scheduler: bool,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for MinMaxSettings<T>
where
    T: FloatT,
{
    fn default() -> MinMaxSettings<T> {
        MinMaxSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> MinMaxSettings<T>
where
    T: FloatT,
{
    /// Checks that the numerical fields are in range
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_precision(self.precision)?;
        validate_max_iter(self.max_iter)?;
        Ok(())
    }

    pub(crate) fn is_relative(&self) -> bool {
        self.convergence.is_relative()
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for MinMaxSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        MinMaxSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> MinMaxSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(precision) = self.precision {
            validate_precision(precision)?;
        }
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

pub(crate) fn validate_precision<T: FloatT>(precision: T) -> Result<(), SettingsError> {
    // also rejects NaN
    if precision > T::zero() && precision.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("precision"))
    }
}

fn validate_max_iter(max_iter: u32) -> Result<(), SettingsError> {
    if max_iter > 0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("max_iter"))
    }
}

#[test]
fn test_minmax_settings_validate() {
    // all standard settings
    let settings = MinMaxSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings.precision, 1e-6);
    assert_eq!(settings.max_iter, 10_000);
    assert_eq!(settings.convergence, ConvergenceCriterion::Relative);
    assert!(!settings.track_scheduler);

    assert!(MinMaxSettingsBuilder::<f64>::default()
        .precision(0.0)
        .build()
        .is_err());
    assert!(MinMaxSettingsBuilder::<f64>::default()
        .precision(f64::NAN)
        .build()
        .is_err());
    assert!(MinMaxSettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());

    // directly construct bad settings and manually check
    let settings = MinMaxSettings::<f64> {
        precision: -1.0,
        ..MinMaxSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("precision"))
    );
}
