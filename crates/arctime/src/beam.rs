//! Beam delivery model: turn arc-plan segments (gantry angle, energy, spot
//! weights) into the waypoint records consumed by `segment`.
//!
//! Model
//! - Dwell at a waypoint = spot scanning time (constant dose rate per MU) plus
//!   a constant time per spot-to-spot switch.
//! - Switch time between waypoints = energy layer switching time: zero for
//!   equal energies, a larger constant when switching up, a smaller one when
//!   switching down.
//! - Angles are in degrees; distances are the shorter way round the circle,
//!   and the rotation direction is clockwise when the target lies less than
//!   180° ahead.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::segment::Waypoint;

/// Energies closer than this are treated as the same layer.
const ENERGY_EPS: f64 = 1e-8;

/// Machine timing constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeliveryModel {
    pub up_switch_time: f64,
    pub down_switch_time: f64,
    pub time_per_spot_switch: f64,
    pub spot_s_per_mu: f64,
}

impl Default for DeliveryModel {
    fn default() -> Self {
        Self {
            up_switch_time: 5.0,
            down_switch_time: 0.5,
            time_per_spot_switch: 0.002,
            spot_s_per_mu: 0.005,
        }
    }
}

impl DeliveryModel {
    pub fn energy_switch_time(&self, from: f64, to: f64) -> f64 {
        if (from - to).abs() < ENERGY_EPS {
            0.0
        } else if from < to {
            self.up_switch_time
        } else {
            self.down_switch_time
        }
    }

    /// Scanning plus spot switching time for one segment.
    pub fn irradiation_time(&self, beam_mu: f64, spot_weights: &[f64]) -> f64 {
        let scanning: f64 = spot_weights
            .iter()
            .map(|w| self.spot_s_per_mu * beam_mu * w)
            .sum();
        let switches = spot_weights.len().saturating_sub(1) as f64;
        scanning + self.time_per_spot_switch * switches
    }
}

/// One control point of an arc beam.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeamSegment {
    pub angle_deg: f64,
    pub energy: f64,
    pub spot_weights: Vec<f64>,
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_angle(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shorter angular distance between two angles, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize_angle(a) - normalize_angle(b)).abs();
    d.min(360.0 - d)
}

/// True when `to` lies less than 180° clockwise of `from`.
pub fn is_clockwise(from: f64, to: f64) -> bool {
    normalize_angle(to - from) < 180.0
}

#[derive(Clone, Debug, PartialEq)]
pub enum BeamError {
    TooFewSegments { got: usize },
    NonFinite { index: usize },
    CoincidentAngles { index: usize },
    HalfTurn { index: usize },
}

impl fmt::Display for BeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSegments { got } => write!(f, "need at least 2 segments, got {got}"),
            Self::NonFinite { index } => write!(f, "segment {index} has a non-finite value"),
            Self::CoincidentAngles { index } => {
                write!(f, "segments {index} and {} share the same angle", index + 1)
            }
            Self::HalfTurn { index } => write!(
                f,
                "segments {index} and {} are 180° or more apart",
                index + 1
            ),
        }
    }
}

impl std::error::Error for BeamError {}

/// Build waypoint records for consecutive beam segments.
pub fn waypoints_from_beam(
    beam_mu: f64,
    segments: &[BeamSegment],
    model: &DeliveryModel,
) -> Result<Vec<Waypoint>, BeamError> {
    let n = segments.len();
    if n < 2 {
        return Err(BeamError::TooFewSegments { got: n });
    }
    for (i, s) in segments.iter().enumerate() {
        let finite = s.angle_deg.is_finite()
            && s.energy.is_finite()
            && s.spot_weights.iter().all(|w| w.is_finite());
        if !finite {
            return Err(BeamError::NonFinite { index: i });
        }
    }
    let mut out = Vec::with_capacity(n);
    for (i, s) in segments.iter().enumerate() {
        let dwell_time = model.irradiation_time(beam_mu, &s.spot_weights);
        let Some(next) = segments.get(i + 1) else {
            out.push(Waypoint {
                dwell_time,
                switch_time: 0.0,
                distance: 0.0,
                clockwise: out.last().map_or(true, |w: &Waypoint| w.clockwise),
            });
            break;
        };
        let distance = angular_distance(s.angle_deg, next.angle_deg);
        if distance <= 0.0 {
            return Err(BeamError::CoincidentAngles { index: i });
        }
        if distance >= 180.0 {
            return Err(BeamError::HalfTurn { index: i });
        }
        out.push(Waypoint {
            dwell_time,
            switch_time: model.energy_switch_time(s.energy, next.energy),
            distance,
            clockwise: is_clockwise(s.angle_deg, next.angle_deg),
        });
    }
    Ok(out)
}
