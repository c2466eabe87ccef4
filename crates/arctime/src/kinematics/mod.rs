//! Kinematic window model and axis limits.
//!
//! Purpose
//! - Describe the physical bounds of a single rotating axis (`AxisLimits`).
//! - Provide the cheap, closed-form checks the search runs before every
//!   expensive motion query: the window swept while dwelling at a waypoint and
//!   the velocity interval reachable at the next waypoint.
//!
//! Conventions
//! - Angles are in the caller's unit (degrees for gantries), velocities in
//!   angle/s, accelerations in angle/s², jerk in angle/s³.
//! - `swept_arc` is the full window (compared against the maximum window);
//!   `half_window` is the part of it lying on one side of the waypoint centre
//!   (subtracted from centre-to-centre distances).

mod limits;
mod window;

pub use limits::{AxisLimits, LimitsError};
pub use window::{half_window, reachable_velocity_bounds, swept_arc, VelocityBounds};
