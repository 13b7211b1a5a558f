use crate::algebra::FloatT;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction in which non-deterministic choices are resolved

#[derive(PartialEq, Eq, Clone, Debug, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptimizationDirection {
    /// Choose the row with the smallest value in every row group
    Minimize,
    /// Choose the row with the largest value in every row group
    Maximize,
}

/// An [`OptimizationDirection`] that may not have been configured yet

#[derive(PartialEq, Eq, Clone, Debug, Copy, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptimizationDirectionSetting {
    Minimize,
    Maximize,
    #[default]
    Unset,
}

impl OptimizationDirection {
    pub fn is_minimize(&self) -> bool {
        matches!(self, OptimizationDirection::Minimize)
    }

    pub fn is_maximize(&self) -> bool {
        matches!(self, OptimizationDirection::Maximize)
    }

    /// The opposite direction
    pub fn invert(&self) -> Self {
        match self {
            OptimizationDirection::Minimize => OptimizationDirection::Maximize,
            OptimizationDirection::Maximize => OptimizationDirection::Minimize,
        }
    }

    /// True if `a` is strictly better than `b` in this direction
    #[inline]
    pub fn improves<T: FloatT>(&self, a: T, b: T) -> bool {
        match self {
            OptimizationDirection::Minimize => a < b,
            OptimizationDirection::Maximize => a > b,
        }
    }

    /// The better of `a` and `b` in this direction
    #[inline]
    pub fn best<T: FloatT>(&self, a: T, b: T) -> T {
        if self.improves(b, a) {
            b
        } else {
            a
        }
    }
}

impl std::ops::Not for OptimizationDirection {
    type Output = Self;
    fn not(self) -> Self {
        self.invert()
    }
}

impl OptimizationDirectionSetting {
    /// False only for [`Unset`](OptimizationDirectionSetting::Unset)
    pub fn is_set(&self) -> bool {
        !matches!(self, OptimizationDirectionSetting::Unset)
    }

    /// The configured direction.
    ///
    /// # Panics
    /// Panics if the setting is [`Unset`](OptimizationDirectionSetting::Unset).
    /// Callers must check [`is_set`](OptimizationDirectionSetting::is_set) first.
    pub fn direction(&self) -> OptimizationDirection {
        assert!(
            self.is_set(),
            "optimization direction converted while unset"
        );
        match self {
            OptimizationDirectionSetting::Minimize => OptimizationDirection::Minimize,
            _ => OptimizationDirection::Maximize,
        }
    }

    /// The configured direction, or `None` when unset
    pub fn try_direction(&self) -> Option<OptimizationDirection> {
        self.is_set().then(|| self.direction())
    }

    /// Inverts a configured direction.  `Unset` stays unset.
    pub fn invert(&self) -> Self {
        match self {
            OptimizationDirectionSetting::Minimize => OptimizationDirectionSetting::Maximize,
            OptimizationDirectionSetting::Maximize => OptimizationDirectionSetting::Minimize,
            OptimizationDirectionSetting::Unset => OptimizationDirectionSetting::Unset,
        }
    }
}

impl From<OptimizationDirection> for OptimizationDirectionSetting {
    fn from(d: OptimizationDirection) -> Self {
        match d {
            OptimizationDirection::Minimize => OptimizationDirectionSetting::Minimize,
            OptimizationDirection::Maximize => OptimizationDirectionSetting::Maximize,
        }
    }
}

impl From<OptimizationDirectionSetting> for OptimizationDirection {
    /// # Panics
    /// Panics if the setting is unset.
    fn from(s: OptimizationDirectionSetting) -> Self {
        s.direction()
    }
}

impl fmt::Display for OptimizationDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for OptimizationDirectionSetting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized optimization direction \"{0}\"")]
/// Error returned when parsing an [`OptimizationDirection`]
pub struct ParseDirectionError(pub String);

impl FromStr for OptimizationDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(OptimizationDirection::Minimize),
            "max" | "maximize" => Ok(OptimizationDirection::Maximize),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl FromStr for OptimizationDirectionSetting {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("unset") {
            return Ok(OptimizationDirectionSetting::Unset);
        }
        s.parse::<OptimizationDirection>().map(Into::into)
    }
}

#[test]
fn test_direction_rendering() {
    use OptimizationDirection::*;

    assert_eq!(Minimize.to_string(), "Minimize");
    assert_eq!(Maximize.to_string(), "Maximize");
    assert_eq!(OptimizationDirectionSetting::Unset.to_string(), "Unset");

    assert_eq!("MIN".parse::<OptimizationDirection>(), Ok(Minimize));
    assert_eq!(" maximize ".parse::<OptimizationDirection>(), Ok(Maximize));
    assert!("sideways".parse::<OptimizationDirection>().is_err());
    assert_eq!(
        "unset".parse::<OptimizationDirectionSetting>(),
        Ok(OptimizationDirectionSetting::Unset)
    );
}

#[test]
fn test_direction_improves() {
    use OptimizationDirection::*;

    assert!(Minimize.improves(0.4, 0.7));
    assert!(!Minimize.improves(0.7, 0.7));
    assert!(Maximize.improves(0.7, 0.4));
    assert_eq!(Minimize.best(0.4, 0.7), 0.4);
    assert_eq!(Maximize.best(0.4, 0.7), 0.7);
}
