//! Seeded random arc instances for benchmarks, examples and property tests.
//!
//! Model
//! - Dwell times uniform in `[0, dwell_max)`.
//! - Each gap is an energy switch: `switch_up` with probability `up_prob`,
//!   `switch_down` otherwise.
//! - Waypoints are equally spaced by `distance`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::search::ArcProblem;

/// Random arc configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomArcCfg {
    /// Clamped to at least 2.
    pub waypoints: usize,
    pub dwell_max: f64,
    pub switch_down: f64,
    pub switch_up: f64,
    /// Clamped to `[0, 1]`.
    pub up_prob: f64,
    pub distance: f64,
}

impl Default for RandomArcCfg {
    fn default() -> Self {
        Self {
            waypoints: 360,
            dwell_max: 1.26,
            switch_down: 0.5,
            switch_up: 5.0,
            up_prob: 0.1,
            distance: 2.0,
        }
    }
}

/// Draw one arc; the same `(cfg, seed)` always yields the same instance.
pub fn draw_arc(cfg: RandomArcCfg, seed: u64) -> ArcProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = cfg.waypoints.max(2);
    let dwell_max = cfg.dwell_max.max(0.0);
    let up_prob = cfg.up_prob.clamp(0.0, 1.0);
    let dwell_times = (0..n)
        .map(|_| {
            if dwell_max > 0.0 {
                rng.gen_range(0.0..dwell_max)
            } else {
                0.0
            }
        })
        .collect();
    let switch_times = (0..n - 1)
        .map(|_| {
            if rng.gen_bool(up_prob) {
                cfg.switch_up
            } else {
                cfg.switch_down
            }
        })
        .collect();
    ArcProblem::new(dwell_times, switch_times, vec![cfg.distance; n - 1])
}
