//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI,
//!   benches and examples. Breaking changes are allowed and expected.

// Kinematics and configuration
pub use crate::kinematics::{
    half_window, reachable_velocity_bounds, swept_arc, AxisLimits, LimitsError, VelocityBounds,
};
// Motion-cost oracle
pub use crate::oracle::{
    AccelLimitedOracle, JerkLimitedOracle, MemoOracle, MotionOracle, MotionQuery,
};
// State graph
pub use crate::graph::{StateGraph, StateId, VelocityTable};
// Search
pub use crate::search::{
    search, solve_with_defaults, ArcProblem, Profile, SearchCfg, SearchError, SearchStats,
};
// Full paths
pub use crate::beam::{waypoints_from_beam, BeamError, BeamSegment, DeliveryModel};
pub use crate::randarc::{draw_arc, RandomArcCfg};
pub use crate::segment::{
    plan_delivery, split_arcs, ArcResult, ArcSpan, PlanResult, SegmentError, Waypoint,
};

/// Sum of all dwell and switch times of an arc: a lower bound on its
/// delivery time that ignores travel entirely.
pub fn dwell_switch_floor(problem: &ArcProblem) -> f64 {
    problem.dwell_times.iter().sum::<f64>() + problem.switch_times.iter().sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn floor_of_axis_aligned_instance() {
        let p = ArcProblem::new(vec![1.0, 2.0, 0.5], vec![0.25, 0.25], vec![1.0, 1.0]);
        assert!((dwell_switch_floor(&p) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn floor_bounds_search_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let n = rng.gen_range(2..8);
            let p = ArcProblem::new(
                (0..n).map(|_| rng.gen_range(0.0..1.0)).collect(),
                (0..n - 1).map(|_| rng.gen_range(0.0..1.0)).collect(),
                vec![1.0; n - 1],
            );
            let cfg = SearchCfg {
                vel_res: 16,
                max_window: 0.5,
            };
            let prof = search(&p, &AxisLimits::default(), &cfg, &mut JerkLimitedOracle::new())
                .unwrap();
            assert!(prof.total_time >= dwell_switch_floor(&p) - 1e-9);
        }
    }
}
