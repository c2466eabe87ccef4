use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Velocity, acceleration and jerk bounds of a single axis.
///
/// Invariants (checked by `validate`):
/// - `v_max > 0`, `a_max > 0`, `a_min < 0`, `j_max > 0`, all finite.
/// - Velocities are non-negative along one search; direction is handled by
///   splitting the trajectory before searching.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisLimits {
    pub v_max: f64,
    pub a_max: f64,
    /// Largest deceleration, given as a negative acceleration.
    pub a_min: f64,
    pub j_max: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self {
            v_max: 5.0,
            a_max: 0.5,
            a_min: -0.5,
            j_max: 0.5,
        }
    }
}

impl AxisLimits {
    /// Symmetric limits: deceleration bound equals the acceleration bound.
    pub fn symmetric(v_max: f64, a_max: f64, j_max: f64) -> Self {
        Self {
            v_max,
            a_max,
            a_min: -a_max,
            j_max,
        }
    }

    pub fn validate(&self) -> Result<(), LimitsError> {
        let fields = [
            ("v_max", self.v_max),
            ("a_max", self.a_max),
            ("a_min", self.a_min),
            ("j_max", self.j_max),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LimitsError::NonFinite { name });
            }
        }
        if self.v_max <= 0.0 {
            return Err(LimitsError::sign("v_max", "> 0"));
        }
        if self.a_max <= 0.0 {
            return Err(LimitsError::sign("a_max", "> 0"));
        }
        if self.a_min >= 0.0 {
            return Err(LimitsError::sign("a_min", "< 0"));
        }
        if self.j_max <= 0.0 {
            return Err(LimitsError::sign("j_max", "> 0"));
        }
        Ok(())
    }
}

/// Rejected axis limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitsError {
    NonFinite { name: &'static str },
    WrongSign { name: &'static str, expected: &'static str },
}

impl LimitsError {
    fn sign(name: &'static str, expected: &'static str) -> Self {
        Self::WrongSign { name, expected }
    }
}

impl fmt::Display for LimitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitsError::NonFinite { name } => write!(f, "axis limit {name} must be finite"),
            LimitsError::WrongSign { name, expected } => {
                write!(f, "axis limit {name} must be {expected}")
            }
        }
    }
}

impl std::error::Error for LimitsError {}
