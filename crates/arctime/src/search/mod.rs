//! Minimum-time velocity profile search over one direction-consistent arc.
//!
//! Purpose
//! - Choose one discretized velocity per waypoint so that the total of
//!   motion, dwell and switch times from the first waypoint (at rest) to the
//!   last (at rest) is minimal, subject to the maximum window and the axis
//!   limits.
//!
//! Algorithm
//! - A* over `graph::StateGraph`. Before every oracle query a candidate edge
//!   must pass the reachable-velocity check and the maximum-window check
//!   (`kinematics`); the edge cost is the oracle's motion time (floored at
//!   the switch time) plus the dwell at the source waypoint.
//! - The open set is a binary heap with lazy deletion, ordered by lowest `f`,
//!   then highest velocity, then latest waypoint. Relaxation accepts equal
//!   costs (`<=`), so among equal-cost paths the last one relaxed wins the
//!   predecessor slot.
//! - Because the heuristic ignores travel time and edge costs are
//!   non-negative, the terminal state's `g` is optimal over the discretized
//!   graph when it is first popped.
//!
//! Errors
//! - `SearchError::Precondition` before any work for malformed inputs;
//!   `SearchError::InfeasiblePlan` when the open set empties.

mod astar;
mod profile;
mod types;

pub use types::{ArcProblem, Profile, SearchCfg, SearchError, SearchStats};

use crate::graph::{StateGraph, VelocityTable};
use crate::kinematics::AxisLimits;
use crate::oracle::{JerkLimitedOracle, MemoOracle, MotionOracle};

use astar::AstarRunner;

/// Run the search for one arc with an injected motion oracle.
pub fn search<O: MotionOracle + ?Sized>(
    problem: &ArcProblem,
    limits: &AxisLimits,
    cfg: &SearchCfg,
    oracle: &mut O,
) -> Result<Profile, SearchError> {
    limits.validate()?;
    cfg.validate()?;
    problem.validate(cfg.max_window)?;

    let _span = tracing::debug_span!(
        "arc_search",
        waypoints = problem.len(),
        vel_res = cfg.vel_res
    )
    .entered();
    let table = VelocityTable::linspace(limits.v_max, cfg.vel_res);
    let graph = StateGraph::build(&problem.dwell_times, &problem.switch_times, table);
    AstarRunner::new(problem, limits, cfg, oracle, graph).solve()
}

/// Convenience: memoized jerk-limited oracle and plain slices.
pub fn solve_with_defaults(
    dwell_times: &[f64],
    switch_times: &[f64],
    distances: &[f64],
    max_window: f64,
    limits: &AxisLimits,
    vel_res: usize,
) -> Result<Profile, SearchError> {
    let problem = ArcProblem::new(
        dwell_times.to_vec(),
        switch_times.to_vec(),
        distances.to_vec(),
    );
    let cfg = SearchCfg {
        vel_res,
        max_window,
    };
    let mut oracle = MemoOracle::new(JerkLimitedOracle::new());
    search(&problem, limits, &cfg, &mut oracle)
}
