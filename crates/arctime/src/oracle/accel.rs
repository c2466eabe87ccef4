//! Closed-form time-optimal motion with velocity and acceleration bounds.
//!
//! The profile family is bang-bang in acceleration: the fastest motion
//! accelerates at `a_max`, optionally cruises at `v_max`, and decelerates at
//! `|a_min|`; the slowest motion decelerates first and accelerates last. Every
//! duration between the two is attainable, and the slowest is unbounded when
//! the axis can come to rest on the way (it may then wait at zero velocity).
//!
//! Jerk is not limited here, so durations are lower bounds on those of
//! `JerkLimitedOracle` with the same limits. Use it to bound results from
//! below, not to plan.

use super::{MotionOracle, MotionQuery};
use crate::kinematics::AxisLimits;

/// Relative tolerance for the reachability and velocity-limit checks.
const REL_EPS: f64 = 1e-12;

/// Lower-bound oracle for second-order (acceleration-limited) axes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccelLimitedOracle;

impl AccelLimitedOracle {
    pub fn new() -> Self {
        Self
    }

    /// Duration of the fastest motion, or `None` if `v1` cannot be reached.
    pub fn fastest(&self, v0: f64, v1: f64, distance: f64, limits: &AxisLimits) -> Option<f64> {
        let (a, b, v_max) = (limits.a_max, -limits.a_min, limits.v_max);
        let hi_sq = v0.max(v1).powi(2);
        let peak_sq = (2.0 * a * b * distance + b * v0 * v0 + a * v1 * v1) / (a + b);
        if peak_sq < hi_sq * (1.0 - REL_EPS) - REL_EPS {
            return None;
        }
        let peak = peak_sq.max(hi_sq).sqrt();
        if peak <= v_max {
            return Some((peak - v0) / a + (peak - v1) / b);
        }
        let d_acc = (v_max * v_max - v0 * v0) / (2.0 * a);
        let d_dec = (v_max * v_max - v1 * v1) / (2.0 * b);
        let cruise = (distance - d_acc - d_dec).max(0.0) / v_max;
        Some((v_max - v0) / a + (v_max - v1) / b + cruise)
    }

    /// Duration of the slowest motion, or `None` when it is unbounded.
    pub fn slowest(&self, v0: f64, v1: f64, distance: f64, limits: &AxisLimits) -> Option<f64> {
        let (a, b) = (limits.a_max, -limits.a_min);
        let low_sq = (a * v0 * v0 + b * v1 * v1 - 2.0 * a * b * distance) / (a + b);
        if low_sq <= 0.0 {
            return None;
        }
        let low = low_sq.sqrt().min(v0.min(v1));
        Some((v0 - low) / b + (v1 - low) / a)
    }
}

impl MotionOracle for AccelLimitedOracle {
    fn min_duration(&mut self, query: &MotionQuery, limits: &AxisLimits) -> Option<f64> {
        let MotionQuery {
            v0,
            v1,
            remaining_distance: distance,
            minimum_duration,
        } = *query;
        let v_tol = limits.v_max * (1.0 + REL_EPS);
        if distance <= 0.0 || v0 < 0.0 || v1 < 0.0 || v0 > v_tol || v1 > v_tol {
            return None;
        }
        let limits = AxisLimits {
            v_max: limits.v_max.max(v0).max(v1),
            ..*limits
        };
        let fastest = self.fastest(v0, v1, distance, &limits)?;
        if minimum_duration <= fastest {
            return Some(fastest);
        }
        match self.slowest(v0, v1, distance, &limits) {
            None => Some(minimum_duration),
            Some(slowest) if minimum_duration <= slowest * (1.0 + REL_EPS) => {
                Some(minimum_duration)
            }
            Some(_) => None,
        }
    }
}
