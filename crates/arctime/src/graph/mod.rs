//! Layered state graph over (waypoint, velocity index) pairs.
//!
//! Purpose
//! - One layer per waypoint; the first and last layers hold a single
//!   zero-velocity state, interior layers hold one state per entry of the
//!   velocity table. Edges only connect layer `i` to layer `i + 1`, so the
//!   graph is a DAG and every start→terminal path visits each layer once.
//! - States live in a flat arena sized at construction; per-state search
//!   tables (`g`, `f`, visited, predecessor) are plain `Vec`s indexed by the
//!   flat index, with no hashing of states.
//!
//! Heuristic
//! - `heuristic(i)` sums all dwell and switch times still ahead of waypoint
//!   `i`, excluding the final dwell (the terminal state dwells at zero
//!   velocity and its dwell is added once after the search). Travel time is
//!   ignored, so the bound is admissible.

mod build;
mod types;

pub use build::StateGraph;
pub use types::{StateId, VelocityTable};
