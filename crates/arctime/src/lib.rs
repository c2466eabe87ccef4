//! Minimum delivery time of a single rotating axis over an ordered sequence of
//! dwell waypoints.
//!
//! Layout
//! - `kinematics`: axis limits, dwell windows, reachable velocity bounds.
//! - `oracle`: the motion-cost contract and the built-in solvers behind it.
//! - `graph`: the layered (waypoint, velocity) state arena.
//! - `search`: A* over the arena and profile reconstruction.
//! - `segment`: direction-reversal splitting of full paths.
//! - `beam`: arc-beam segments to waypoint records.
//! - `randarc`: seeded random instances.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; `api`
//!   collects the entry points callers normally need.

pub mod api;
pub mod beam;
pub mod graph;
pub mod kinematics;
pub mod oracle;
pub mod randarc;
pub mod search;
pub mod segment;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::kinematics::AxisLimits;
    pub use crate::oracle::{
        AccelLimitedOracle, JerkLimitedOracle, MemoOracle, MotionOracle, MotionQuery,
    };
    pub use crate::search::{search, solve_with_defaults, ArcProblem, Profile, SearchCfg};
    pub use crate::segment::{plan_delivery, Waypoint};
}
