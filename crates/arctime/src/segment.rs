//! Arc segmentation: split a full waypoint path at direction reversals and
//! search each direction-consistent span independently.
//!
//! Span rule
//! - Segment `i` joins waypoint `i` to `i + 1` and carries the rotation
//!   direction. When segment `i + 1` turns the other way, the current span
//!   ends at waypoint `i + 1` and the next one starts at waypoint `i + 2`; the
//!   switch time of the gap between them is added to the total. The last
//!   waypoint always closes a span.
//! - A span with fewer than two waypoints (two reversals in a row, or a
//!   reversal on the last segment) is rejected instead of being skipped.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::kinematics::AxisLimits;
use crate::oracle::MotionOracle;
use crate::search::{search, ArcProblem, Profile, SearchCfg, SearchError};

/// One waypoint of a full path plus the gap to its successor.
///
/// For the last waypoint `switch_time`, `distance` and `clockwise` are unused.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub dwell_time: f64,
    pub switch_time: f64,
    pub distance: f64,
    pub clockwise: bool,
}

/// Inclusive waypoint index range `[start, end]` of one span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcSpan {
    pub start: usize,
    pub end: usize,
}

impl ArcSpan {
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Search input for the span's waypoints.
    pub fn problem(&self, waypoints: &[Waypoint]) -> ArcProblem {
        let wps = &waypoints[self.start..=self.end];
        let gaps = &wps[..wps.len() - 1];
        ArcProblem::new(
            wps.iter().map(|w| w.dwell_time).collect(),
            gaps.iter().map(|w| w.switch_time).collect(),
            gaps.iter().map(|w| w.distance).collect(),
        )
    }
}

/// Result of one span's search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcResult {
    pub span: ArcSpan,
    pub profile: Profile,
}

/// Delivery time of a full path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResult {
    /// Sum of span times plus the switch times between spans.
    pub total_time: f64,
    pub arcs: Vec<ArcResult>,
}

/// Errors surfaced by segmentation and per-span searches.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentError {
    TooFewWaypoints { got: usize },
    ShortArc { start: usize, end: usize },
    InvalidGap { index: usize },
    Search { span: ArcSpan, source: SearchError },
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewWaypoints { got } => {
                write!(f, "a path needs at least 2 waypoints, got {got}")
            }
            Self::ShortArc { start, end } => write!(
                f,
                "direction-consistent span {start}..={end} has fewer than 2 waypoints"
            ),
            Self::InvalidGap { index } => write!(
                f,
                "switch time between spans at waypoint {index} must be finite and >= 0"
            ),
            Self::Search { span, source } => {
                write!(f, "span {}..={}: {source}", span.start, span.end)
            }
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Maximal direction-consistent spans of `waypoints`.
pub fn split_arcs(waypoints: &[Waypoint]) -> Result<Vec<ArcSpan>, SegmentError> {
    let n = waypoints.len();
    if n < 2 {
        return Err(SegmentError::TooFewWaypoints { got: n });
    }
    let mut spans = Vec::new();
    let mut start = 0;
    for i in 0..n - 2 {
        if waypoints[i].clockwise != waypoints[i + 1].clockwise {
            spans.push(ArcSpan { start, end: i + 1 });
            start = i + 2;
        }
    }
    spans.push(ArcSpan { start, end: n - 1 });
    if let Some(short) = spans.iter().find(|s| s.len() < 2) {
        return Err(SegmentError::ShortArc {
            start: short.start,
            end: short.end,
        });
    }
    Ok(spans)
}

fn span_error(span: ArcSpan) -> impl Fn(SearchError) -> SegmentError {
    move |source| SegmentError::Search { span, source }
}

/// Split, search every span with the shared oracle, and sum the results.
///
/// All inputs (gap switch times, every span's arrays, limits and search
/// settings) are checked before the first oracle query.
pub fn plan_delivery<O: MotionOracle + ?Sized>(
    waypoints: &[Waypoint],
    limits: &AxisLimits,
    cfg: &SearchCfg,
    oracle: &mut O,
) -> Result<PlanResult, SegmentError> {
    let spans = split_arcs(waypoints)?;
    for span in &spans[..spans.len() - 1] {
        let gap = waypoints[span.end].switch_time;
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(SegmentError::InvalidGap { index: span.end });
        }
    }
    let mut problems = Vec::with_capacity(spans.len());
    for span in &spans {
        let problem = span.problem(waypoints);
        limits
            .validate()
            .map_err(SearchError::from)
            .and_then(|()| cfg.validate())
            .and_then(|()| problem.validate(cfg.max_window))
            .map_err(span_error(*span))?;
        problems.push(problem);
    }

    let mut total_time = 0.0;
    let mut arcs = Vec::with_capacity(spans.len());
    for (k, (span, problem)) in spans.iter().zip(&problems).enumerate() {
        let profile = search(problem, limits, cfg, oracle).map_err(span_error(*span))?;
        tracing::debug!(
            start = span.start,
            end = span.end,
            time = profile.total_time,
            "span searched"
        );
        total_time += profile.total_time;
        if k + 1 < spans.len() {
            total_time += waypoints[span.end].switch_time;
        }
        arcs.push(ArcResult {
            span: *span,
            profile,
        });
    }
    Ok(PlanResult { total_time, arcs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::JerkLimitedOracle;
    use crate::search::solve_with_defaults;

    fn wp(dwell: f64, switch: f64, cw: bool) -> Waypoint {
        Waypoint {
            dwell_time: dwell,
            switch_time: switch,
            distance: 1.0,
            clockwise: cw,
        }
    }

    fn cfg() -> SearchCfg {
        SearchCfg {
            vel_res: 16,
            max_window: 0.5,
        }
    }

    #[test]
    fn consistent_direction_is_one_span() {
        let wps: Vec<_> = (0..5).map(|_| wp(0.2, 0.5, true)).collect();
        assert_eq!(split_arcs(&wps).unwrap(), vec![ArcSpan { start: 0, end: 4 }]);
    }

    #[test]
    fn reversal_splits_after_the_turning_waypoint() {
        // Segments: cw, cw, ccw, ccw, ccw (waypoint 5 closes the path).
        let dirs = [true, true, false, false, false, false];
        let wps: Vec<_> = dirs.iter().map(|&cw| wp(0.1, 0.5, cw)).collect();
        let spans = split_arcs(&wps).unwrap();
        assert_eq!(
            spans,
            vec![ArcSpan { start: 0, end: 2 }, ArcSpan { start: 3, end: 5 }]
        );
        let p = spans[1].problem(&wps);
        assert_eq!(p.len(), 3);
        assert_eq!(p.switch_times.len(), 2);
        assert_eq!(p.distances, vec![1.0, 1.0]);
    }

    #[test]
    fn single_waypoint_spans_are_rejected() {
        // Two reversals in a row leave waypoint 2 alone.
        let wps: Vec<_> = [true, false, true, true]
            .iter()
            .map(|&cw| wp(0.1, 0.5, cw))
            .collect();
        assert_eq!(
            split_arcs(&wps),
            Err(SegmentError::ShortArc { start: 2, end: 2 })
        );
        // Reversal on the last segment.
        let wps: Vec<_> = [true, true, false, false]
            .iter()
            .map(|&cw| wp(0.1, 0.5, cw))
            .collect();
        assert_eq!(
            split_arcs(&wps),
            Err(SegmentError::ShortArc { start: 3, end: 3 })
        );
        assert_eq!(
            split_arcs(&[wp(1.0, 0.0, true)]),
            Err(SegmentError::TooFewWaypoints { got: 1 })
        );
    }

    #[test]
    fn plan_total_adds_boundary_switch_time() {
        let mut wps: Vec<_> = [true, true, false, false, false, false]
            .iter()
            .map(|&cw| wp(0.3, 0.5, cw))
            .collect();
        wps[2].switch_time = 5.0;
        let limits = AxisLimits::default();
        let plan = plan_delivery(&wps, &limits, &cfg(), &mut JerkLimitedOracle::new()).unwrap();
        assert_eq!(plan.arcs.len(), 2);
        let mut expected = 5.0;
        for arc in &plan.arcs {
            let p = arc.span.problem(&wps);
            let alone = solve_with_defaults(
                &p.dwell_times,
                &p.switch_times,
                &p.distances,
                0.5,
                &limits,
                16,
            )
            .unwrap();
            assert_eq!(alone.velocities, arc.profile.velocities);
            expected += alone.total_time;
        }
        assert!((plan.total_time - expected).abs() < 1e-9);
    }

    #[test]
    fn invalid_gap_fails_before_any_span_is_searched() {
        let mut wps: Vec<_> = [true, true, false, false, false, false]
            .iter()
            .map(|&cw| wp(0.3, 0.5, cw))
            .collect();
        wps[2].switch_time = f64::NAN;
        let mut calls = 0usize;
        let mut counting = |_: &crate::oracle::MotionQuery, _: &AxisLimits| {
            calls += 1;
            Some(1.0)
        };
        let err = plan_delivery(&wps, &AxisLimits::default(), &cfg(), &mut counting).unwrap_err();
        assert_eq!(err, SegmentError::InvalidGap { index: 2 });
        // A bad switch time inside the second span is caught before the first is searched.
        wps[2].switch_time = 0.5;
        wps[4].switch_time = -1.0;
        let err = plan_delivery(&wps, &AxisLimits::default(), &cfg(), &mut counting).unwrap_err();
        assert!(matches!(
            err,
            SegmentError::Search {
                span: ArcSpan { start: 3, end: 5 },
                source: SearchError::Precondition { .. },
            }
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn span_search_errors_carry_the_span() {
        let wps: Vec<_> = (0..3).map(|_| wp(0.1, 0.5, true)).collect();
        let mut never = |_: &crate::oracle::MotionQuery, _: &AxisLimits| -> Option<f64> { None };
        let err = plan_delivery(&wps, &AxisLimits::default(), &cfg(), &mut never).unwrap_err();
        assert!(matches!(
            err,
            SegmentError::Search {
                span: ArcSpan { start: 0, end: 2 },
                source: SearchError::InfeasiblePlan { .. }
            }
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
