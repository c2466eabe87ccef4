//! Inputs, configuration, results and errors of one arc search.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::kinematics::LimitsError;

/// One direction-consistent arc: `n` waypoints and the `n - 1` gaps between them.
///
/// Invariants (checked by `validate`):
/// - `n > 1`; `switch_times` and `distances` have length `n - 1`.
/// - Dwell and switch times are finite and `>= 0`; distances are finite and `> 0`.
/// - `0 <= max_window < min(distances)`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcProblem {
    pub dwell_times: Vec<f64>,
    pub switch_times: Vec<f64>,
    pub distances: Vec<f64>,
}

impl ArcProblem {
    pub fn new(dwell_times: Vec<f64>, switch_times: Vec<f64>, distances: Vec<f64>) -> Self {
        Self {
            dwell_times,
            switch_times,
            distances,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dwell_times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dwell_times.is_empty()
    }

    pub fn validate(&self, max_window: f64) -> Result<(), SearchError> {
        let n = self.len();
        if n < 2 {
            return Err(SearchError::precondition(format!(
                "need at least 2 waypoints, got {n}"
            )));
        }
        if self.switch_times.len() != n - 1 {
            return Err(SearchError::precondition(format!(
                "expected {} switch times, got {}",
                n - 1,
                self.switch_times.len()
            )));
        }
        if self.distances.len() != n - 1 {
            return Err(SearchError::precondition(format!(
                "expected {} distances, got {}",
                n - 1,
                self.distances.len()
            )));
        }
        if let Some(i) = self.dwell_times.iter().position(|t| !(t.is_finite() && *t >= 0.0)) {
            return Err(SearchError::precondition(format!(
                "dwell time {i} must be finite and >= 0"
            )));
        }
        if let Some(i) = self.switch_times.iter().position(|t| !(t.is_finite() && *t >= 0.0)) {
            return Err(SearchError::precondition(format!(
                "switch time {i} must be finite and >= 0"
            )));
        }
        if let Some(i) = self.distances.iter().position(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(SearchError::precondition(format!(
                "distance {i} must be finite and > 0"
            )));
        }
        if !(max_window.is_finite() && max_window >= 0.0) {
            return Err(SearchError::precondition(
                "maximum window must be finite and >= 0",
            ));
        }
        let min_distance = self.distances.iter().copied().fold(f64::INFINITY, f64::min);
        if max_window >= min_distance {
            return Err(SearchError::precondition(format!(
                "maximum window {max_window} must be smaller than the shortest distance {min_distance}"
            )));
        }
        Ok(())
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchCfg {
    /// Number of discretized velocities in `[0, v_max]` (>= 2).
    pub vel_res: usize,
    /// Largest arc the axis may sweep while dwelling at one waypoint.
    pub max_window: f64,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            vel_res: 256,
            max_window: 0.99,
        }
    }
}

impl SearchCfg {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.vel_res < 2 {
            return Err(SearchError::precondition(format!(
                "velocity resolution must be >= 2, got {}",
                self.vel_res
            )));
        }
        Ok(())
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// States finalized (popped and marked visited).
    pub expanded: usize,
    pub oracle_queries: usize,
    /// Candidate edges rejected by the maximum-window check.
    pub pruned_window: usize,
    /// Candidate edges outside the reachable velocity interval.
    pub pruned_reach: usize,
    /// Oracle answers signalling infeasibility.
    pub infeasible_edges: usize,
}

/// Minimum-time velocity profile of one arc.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Profile {
    /// Motion, dwell and switch time from the first to the last waypoint,
    /// including the last waypoint's dwell.
    pub total_time: f64,
    /// One velocity per waypoint; first and last are 0.
    pub velocities: Vec<f64>,
    pub velocity_indices: Vec<usize>,
    pub stats: SearchStats,
}

/// Errors surfaced by the search.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// Inputs violate an invariant; nothing was searched.
    Precondition { reason: String },
    /// The open set ran empty before the terminal state was finalized.
    InfeasiblePlan { expanded: usize },
    /// Predecessor links from the terminal state do not reach the start.
    BrokenChain { waypoint: usize, vel_idx: usize },
}

impl SearchError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition { reason } => write!(f, "invalid search input: {reason}"),
            Self::InfeasiblePlan { expanded } => write!(
                f,
                "no feasible velocity profile under the given limits ({expanded} states expanded)"
            ),
            Self::BrokenChain { waypoint, vel_idx } => write!(
                f,
                "predecessor chain broken at waypoint {waypoint}, velocity index {vel_idx}"
            ),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<LimitsError> for SearchError {
    fn from(err: LimitsError) -> Self {
        Self::precondition(err.to_string())
    }
}
