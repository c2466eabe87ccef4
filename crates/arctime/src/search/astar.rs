//! A* over the layered state graph with reachability and window pruning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{StateGraph, StateId};
use crate::kinematics::{reachable_velocity_bounds, AxisLimits};
use crate::oracle::{MotionOracle, MotionQuery};

use super::profile::reconstruct;
use super::types::{ArcProblem, Profile, SearchCfg, SearchError, SearchStats};

/// Open-set entry. The heap pops the “greatest” entry, so ordering is
/// reversed on `f`; ties prefer the larger velocity, then the later waypoint.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    state: StateId,
    flat: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.state.vel_idx.cmp(&other.state.vel_idx))
            .then_with(|| self.state.waypoint.cmp(&other.state.waypoint))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Per-call search tables and counters.
pub(super) struct AstarRunner<'a, O: MotionOracle + ?Sized> {
    problem: &'a ArcProblem,
    limits: &'a AxisLimits,
    max_window: f64,
    oracle: &'a mut O,
    graph: StateGraph,
    g: Vec<f64>,
    f: Vec<f64>,
    visited: Vec<bool>,
    came_from: Vec<Option<usize>>,
    open: BinaryHeap<OpenEntry>,
    stats: SearchStats,
}

impl<'a, O: MotionOracle + ?Sized> AstarRunner<'a, O> {
    pub(super) fn new(
        problem: &'a ArcProblem,
        limits: &'a AxisLimits,
        cfg: &SearchCfg,
        oracle: &'a mut O,
        graph: StateGraph,
    ) -> Self {
        let len = graph.len();
        Self {
            problem,
            limits,
            max_window: cfg.max_window,
            oracle,
            graph,
            g: vec![f64::INFINITY; len],
            f: vec![f64::INFINITY; len],
            visited: vec![false; len],
            came_from: vec![None; len],
            open: BinaryHeap::new(),
            stats: SearchStats::default(),
        }
    }

    pub(super) fn solve(mut self) -> Result<Profile, SearchError> {
        let start = self.graph.start();
        let terminal = self.graph.terminal();
        let start_flat = self.graph.flat_index(start);
        self.g[start_flat] = 0.0;
        self.f[start_flat] = self.graph.heuristic(0);
        self.open.push(OpenEntry {
            f: self.f[start_flat],
            state: start,
            flat: start_flat,
        });

        while let Some(entry) = self.open.pop() {
            // Lazy deletion: skip finalized states and superseded scores.
            if self.visited[entry.flat] || entry.f > self.f[entry.flat] {
                continue;
            }
            self.visited[entry.flat] = true;
            self.stats.expanded += 1;
            if entry.state == terminal {
                debug_assert_eq!(self.graph.heuristic(terminal.waypoint), 0.0);
                let total_time = self.g[entry.flat] + self.graph.dwell(terminal.waypoint);
                let indices = reconstruct(&self.graph, &self.came_from)?;
                tracing::debug!(
                    total_time,
                    expanded = self.stats.expanded,
                    oracle_queries = self.stats.oracle_queries,
                    "arc search finished"
                );
                let table = self.graph.table();
                return Ok(Profile {
                    total_time,
                    velocities: indices.iter().map(|&v| table.get(v)).collect(),
                    velocity_indices: indices,
                    stats: self.stats,
                });
            }
            self.relax(entry.state, entry.flat)?;
        }

        tracing::debug!(expanded = self.stats.expanded, "arc search exhausted");
        Err(SearchError::InfeasiblePlan {
            expanded: self.stats.expanded,
        })
    }

    fn relax(&mut self, current: StateId, current_flat: usize) -> Result<(), SearchError> {
        let w = current.waypoint;
        let next = w + 1;
        if next >= self.graph.num_waypoints() {
            return Ok(());
        }
        let v0 = self.graph.velocity(current);
        let bounds = reachable_velocity_bounds(
            v0,
            self.graph.half_window(current),
            self.problem.distances[w],
            self.limits,
        );
        let current_g = self.g[current_flat];
        let h_next = self.graph.heuristic(next);

        for neighbor in self.graph.layer(next) {
            let flat = self.graph.flat_index(neighbor);
            if self.visited[flat] {
                continue;
            }
            if !bounds.contains(self.graph.velocity(neighbor)) {
                self.stats.pruned_reach += 1;
                continue;
            }
            let Some(cost) = self.edge_cost(current, neighbor)? else {
                continue;
            };
            let tentative = current_g + cost;
            // Non-strict: a later equal-cost path takes over the predecessor.
            if tentative <= self.g[flat] {
                self.g[flat] = tentative;
                self.f[flat] = tentative + h_next;
                self.came_from[flat] = Some(current_flat);
                self.open.push(OpenEntry {
                    f: self.f[flat],
                    state: neighbor,
                    flat,
                });
            }
        }
        Ok(())
    }

    /// Motion time from `a` to `b` plus the dwell at `a`; `None` if infeasible.
    fn edge_cost(&mut self, a: StateId, b: StateId) -> Result<Option<f64>, SearchError> {
        if self.graph.swept_arc(a) > self.max_window || self.graph.swept_arc(b) > self.max_window
        {
            self.stats.pruned_window += 1;
            return Ok(None);
        }
        let w = a.waypoint;
        let remaining = self.problem.distances[w]
            - (self.graph.half_window(a) + self.graph.half_window(b));
        if !(remaining > 0.0) {
            return Err(SearchError::precondition(format!(
                "non-positive remaining distance {remaining} between waypoints {w} and {}",
                w + 1
            )));
        }
        let query = MotionQuery {
            v0: self.graph.velocity(a),
            v1: self.graph.velocity(b),
            remaining_distance: remaining,
            minimum_duration: self.problem.switch_times[w],
        };
        self.stats.oracle_queries += 1;
        // Non-finite answers count as infeasible.
        match self.oracle.min_duration(&query, self.limits) {
            Some(duration) if duration.is_finite() => Ok(Some(duration + self.graph.dwell(w))),
            _ => {
                self.stats.infeasible_edges += 1;
                Ok(None)
            }
        }
    }
}
