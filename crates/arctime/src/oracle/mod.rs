//! Motion-cost oracle: the boundary between the search and a continuous
//! single-axis time-optimal trajectory solver.
//!
//! Purpose
//! - The search only needs “how long does it take, at least, to move from
//!   velocity v0 to v1 over this distance, taking no less than T?” The answer
//!   comes from an injected `MotionOracle`, so the engine can run against the
//!   built-in jerk-limited solver, an external one, or stubs in tests.
//!
//! Built-in oracles
//! - `JerkLimitedOracle`: S-curve motions under velocity, acceleration and
//!   jerk bounds. This is the default everywhere.
//! - `AccelLimitedOracle`: closed form without the jerk bound. Its durations
//!   never exceed the jerk-limited ones, so it serves as a lower bound.
//!
//! Contract
//! - Queries start at position 0 with velocity `v0` and zero acceleration and
//!   end at `remaining_distance` with velocity `v1` and zero acceleration.
//! - `None` signals infeasibility under the limits and the duration floor.
//! - Oracles must be pure functions of `(query, limits)`; `MemoOracle` relies
//!   on this to cache answers.
//! - `remaining_distance > 0` is a precondition checked by the caller, not an
//!   infeasibility.

mod accel;
mod jerk;
mod memo;

pub use accel::AccelLimitedOracle;
pub use jerk::JerkLimitedOracle;
pub use memo::MemoOracle;

use crate::kinematics::AxisLimits;

/// A single edge-cost request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionQuery {
    pub v0: f64,
    pub v1: f64,
    pub remaining_distance: f64,
    /// Lower bound on the returned duration (the mandatory switch time).
    pub minimum_duration: f64,
}

/// Minimal-duration motion solver consumed by the search.
pub trait MotionOracle {
    /// Minimal feasible duration, or `None` if the motion cannot be realized.
    fn min_duration(&mut self, query: &MotionQuery, limits: &AxisLimits) -> Option<f64>;
}

impl<F> MotionOracle for F
where
    F: FnMut(&MotionQuery, &AxisLimits) -> Option<f64>,
{
    #[inline]
    fn min_duration(&mut self, query: &MotionQuery, limits: &AxisLimits) -> Option<f64> {
        self(query, limits)
    }
}
