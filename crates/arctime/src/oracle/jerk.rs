//! Jerk-limited (S-curve) time-optimal motion.
//!
//! Profile family
//! - Every motion is two velocity changes joined at a peak velocity `vp`
//!   (where the acceleration is zero), with an optional cruise at `vp` in
//!   between: `v0 → vp`, cruise, `vp → v1`. Each change is the fastest S-curve
//!   under `j_max` and the acceleration bound of its direction (`a_max`
//!   speeding up, `|a_min|` slowing down); its acceleration profile is
//!   symmetric, so it covers `(u + w) / 2 · t` while taking `t`.
//! - Velocities stay inside `[min(v0, v1, vp), max(v0, v1, vp)]`, so the axis
//!   never reverses and never exceeds `v_max`.
//!
//! Fastest motion
//! - If the direct change `v0 → v1` fits into the distance, the peak is
//!   raised by bisection until the two changes use the whole distance (or
//!   `v_max` is reached and the rest is cruised).
//! - Otherwise the peak must drop below `max(v0, v1)`: the largest feasible
//!   peak is bracketed by a downward scan and then bisected.
//!
//! Slower motions
//! - Lowering the peak from the fastest one and cruising the leftover distance
//!   stretches the duration continuously. When the whole range down to rest
//!   stays feasible, any duration is attainable (the axis can crawl).

use super::{MotionOracle, MotionQuery};
use crate::kinematics::AxisLimits;

/// Relative tolerance on velocity limits and the duration floor.
const REL_EPS: f64 = 1e-12;
/// Halvings of a peak-velocity bracket; enough to reach f64 resolution.
const BISECT_STEPS: usize = 100;
/// Grid steps when scanning peak velocities downward.
const SCAN_STEPS: usize = 128;

/// Default oracle: velocity, acceleration and jerk limited, non-negative velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct JerkLimitedOracle;

/// Duration and distance of one motion through a given peak velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Legs {
    time: f64,
    distance: f64,
}

/// Fastest S-curve change of velocity by `dv >= 0` under bounds `a` and `j`.
fn change_time(dv: f64, a: f64, j: f64) -> f64 {
    if dv <= 0.0 {
        0.0
    } else if dv * j <= a * a {
        // Triangular acceleration: peak acceleration sqrt(dv j) stays below `a`.
        2.0 * (dv / j).sqrt()
    } else {
        dv / a + a / j
    }
}

impl JerkLimitedOracle {
    pub fn new() -> Self {
        Self
    }

    fn legs(v0: f64, vp: f64, v1: f64, limits: &AxisLimits) -> Legs {
        let leg = |u: f64, w: f64| {
            let a = if w >= u { limits.a_max } else { -limits.a_min };
            let t = change_time((w - u).abs(), a, limits.j_max);
            (t, 0.5 * (u + w) * t)
        };
        let (t1, s1) = leg(v0, vp);
        let (t2, s2) = leg(vp, v1);
        Legs {
            time: t1 + t2,
            distance: s1 + s2,
        }
    }

    /// Duration through peak `vp` with the leftover distance cruised at `vp`.
    fn duration_via(
        v0: f64,
        vp: f64,
        v1: f64,
        distance: f64,
        limits: &AxisLimits,
    ) -> Option<f64> {
        let legs = Self::legs(v0, vp, v1, limits);
        let rest = distance - legs.distance;
        if rest < 0.0 {
            return None;
        }
        if vp > 0.0 {
            Some(legs.time + rest / vp)
        } else if rest <= REL_EPS * distance {
            Some(legs.time)
        } else {
            None
        }
    }

    /// Largest peak in `[fits, overshoots]` whose legs fit into `distance`.
    fn bisect_peak(
        v0: f64,
        v1: f64,
        distance: f64,
        limits: &AxisLimits,
        mut fits: f64,
        mut overshoots: f64,
    ) -> f64 {
        for _ in 0..BISECT_STEPS {
            let mid = 0.5 * (fits + overshoots);
            if mid == fits || mid == overshoots {
                break;
            }
            if Self::legs(v0, mid, v1, limits).distance <= distance {
                fits = mid;
            } else {
                overshoots = mid;
            }
        }
        fits
    }

    /// Peak velocity of the fastest motion, or `None` if `v1` cannot be
    /// reached within `distance`.
    pub fn fastest_peak(
        &self,
        v0: f64,
        v1: f64,
        distance: f64,
        limits: &AxisLimits,
    ) -> Option<f64> {
        let hi = v0.max(v1);
        let fits = |vp: f64| Self::legs(v0, vp, v1, limits).distance <= distance;
        if fits(hi) {
            if fits(limits.v_max) {
                return Some(limits.v_max);
            }
            return Some(Self::bisect_peak(v0, v1, distance, limits, hi, limits.v_max));
        }
        let mut above = hi;
        for k in 1..=SCAN_STEPS {
            let vp = hi * (1.0 - k as f64 / SCAN_STEPS as f64);
            if fits(vp) {
                return Some(Self::bisect_peak(v0, v1, distance, limits, vp, above));
            }
            above = vp;
        }
        None
    }

    /// Duration of the fastest motion, or `None` if it does not exist.
    pub fn fastest(&self, v0: f64, v1: f64, distance: f64, limits: &AxisLimits) -> Option<f64> {
        let vp = self.fastest_peak(v0, v1, distance, limits)?;
        Self::duration_via(v0, vp, v1, distance, limits)
    }

    /// Longest duration reachable by lowering the peak below `peak`, or
    /// `None` when durations are unbounded.
    pub fn slowest(
        &self,
        v0: f64,
        v1: f64,
        distance: f64,
        limits: &AxisLimits,
        peak: f64,
    ) -> Option<f64> {
        let mut longest = Self::duration_via(v0, peak, v1, distance, limits).unwrap_or(0.0);
        let mut above = peak;
        for k in 1..=SCAN_STEPS {
            let vp = peak * (1.0 - k as f64 / SCAN_STEPS as f64);
            match Self::duration_via(v0, vp, v1, distance, limits) {
                Some(t) if vp > 0.0 => {
                    longest = longest.max(t);
                    above = vp;
                }
                // Rest is reachable with distance to spare: crawl as long as needed.
                _ if vp == 0.0 && Self::legs(v0, 0.0, v1, limits).distance < distance => {
                    return None;
                }
                Some(t) => return Some(longest.max(t)),
                None => {
                    let edge = Self::bisect_peak(v0, v1, distance, limits, above, vp);
                    if let Some(t) = Self::duration_via(v0, edge, v1, distance, limits) {
                        longest = longest.max(t);
                    }
                    return Some(longest);
                }
            }
        }
        Some(longest)
    }
}

impl MotionOracle for JerkLimitedOracle {
    fn min_duration(&mut self, query: &MotionQuery, limits: &AxisLimits) -> Option<f64> {
        let MotionQuery {
            v0,
            v1,
            remaining_distance: distance,
            minimum_duration,
        } = *query;
        let v_tol = limits.v_max * (1.0 + REL_EPS);
        let usable = distance > 0.0 && distance.is_finite();
        if !usable || v0 < 0.0 || v1 < 0.0 || v0 > v_tol || v1 > v_tol {
            return None;
        }
        let limits = AxisLimits {
            v_max: limits.v_max.max(v0).max(v1),
            ..*limits
        };
        let peak = self.fastest_peak(v0, v1, distance, &limits)?;
        let fastest = Self::duration_via(v0, peak, v1, distance, &limits)?;
        if minimum_duration <= fastest {
            return Some(fastest);
        }
        match self.slowest(v0, v1, distance, &limits, peak) {
            None => Some(minimum_duration),
            Some(slowest) if minimum_duration <= slowest * (1.0 + REL_EPS) => {
                Some(minimum_duration)
            }
            Some(_) => None,
        }
    }
}
