//! Closed-form window and reachability bounds.

use super::AxisLimits;

/// Full arc swept while dwelling `dwell` seconds at constant velocity `v`.
#[inline]
pub fn swept_arc(v: f64, dwell: f64) -> f64 {
    v * dwell
}

/// Half of `swept_arc`: the part of the window on either side of the centre.
#[inline]
pub fn half_window(v: f64, dwell: f64) -> f64 {
    v * dwell * 0.5
}

/// Closed velocity interval `[min, max]` reachable at the next waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityBounds {
    pub min: f64,
    pub max: f64,
}

impl VelocityBounds {
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Velocities reachable at the next waypoint under constant-bound acceleration.
///
/// `available = segment_distance - current_half_window` is the distance left
/// for accelerating once the current window has been swept. Then
/// `max = sqrt(2 a_max available + v0²)` and `min = sqrt(2 a_min available + v0²)`,
/// clamped to 0 when the radicand is negative (the axis can come to a stop).
///
/// This is a necessary condition only: the true remaining distance also loses
/// the next waypoint's half window, and jerk is ignored, so every velocity a
/// motion solver can realize lies inside the interval.
pub fn reachable_velocity_bounds(
    v0: f64,
    current_half_window: f64,
    segment_distance: f64,
    limits: &AxisLimits,
) -> VelocityBounds {
    let available = segment_distance - current_half_window;
    let v0_sq = v0 * v0;
    let max = (2.0 * limits.a_max * available + v0_sq).max(0.0).sqrt();
    let min_sq = 2.0 * limits.a_min * available + v0_sq;
    let min = if min_sq < 0.0 { 0.0 } else { min_sq.sqrt() };
    VelocityBounds { min, max }
}
