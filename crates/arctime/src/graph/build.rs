//! Arena construction and per-state derived attributes.

use crate::kinematics::{half_window, swept_arc};

use super::types::{StateId, VelocityTable};

/// Fixed-size layered state arena for one arc.
#[derive(Clone, Debug)]
pub struct StateGraph {
    table: VelocityTable,
    dwell: Vec<f64>,
    /// `offsets[w]` is the flat index of the first state in layer `w`;
    /// `offsets[n]` is the total state count.
    offsets: Vec<usize>,
    heuristic: Vec<f64>,
}

impl StateGraph {
    /// Lay out the layers for `dwell_times.len()` waypoints.
    ///
    /// Pre: `dwell_times.len() >= 2`, `switch_times.len() == dwell_times.len() - 1`.
    pub fn build(dwell_times: &[f64], switch_times: &[f64], table: VelocityTable) -> Self {
        let n = dwell_times.len();
        debug_assert!(n >= 2);
        debug_assert_eq!(switch_times.len() + 1, n);

        let mut offsets = Vec::with_capacity(n + 1);
        let mut total = 0usize;
        for w in 0..n {
            offsets.push(total);
            total += if w == 0 || w == n - 1 { 1 } else { table.len() };
        }
        offsets.push(total);

        // Suffix sums, skipping the final dwell.
        let mut heuristic = vec![0.0; n];
        let mut acc = 0.0;
        for w in (0..n - 1).rev() {
            acc += dwell_times[w] + switch_times[w];
            heuristic[w] = acc;
        }

        Self {
            table,
            dwell: dwell_times.to_vec(),
            offsets,
            heuristic,
        }
    }

    #[inline]
    pub fn num_waypoints(&self) -> usize {
        self.dwell.len()
    }

    /// Total number of states over all layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets[self.num_waypoints()]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn layer_len(&self, waypoint: usize) -> usize {
        self.offsets[waypoint + 1] - self.offsets[waypoint]
    }

    #[inline]
    pub fn table(&self) -> &VelocityTable {
        &self.table
    }

    #[inline]
    pub fn start(&self) -> StateId {
        StateId::new(0, 0)
    }

    #[inline]
    pub fn terminal(&self) -> StateId {
        StateId::new(self.num_waypoints() - 1, 0)
    }

    #[inline]
    pub fn flat_index(&self, s: StateId) -> usize {
        debug_assert!(s.vel_idx < self.layer_len(s.waypoint));
        self.offsets[s.waypoint] + s.vel_idx
    }

    pub fn state_at(&self, flat: usize) -> StateId {
        debug_assert!(flat < self.len());
        let waypoint = self.offsets.partition_point(|&o| o <= flat) - 1;
        StateId::new(waypoint, flat - self.offsets[waypoint])
    }

    /// States of layer `waypoint`, in increasing velocity order.
    pub fn layer(&self, waypoint: usize) -> impl Iterator<Item = StateId> {
        (0..self.layer_len(waypoint)).map(move |v| StateId::new(waypoint, v))
    }

    #[inline]
    pub fn velocity(&self, s: StateId) -> f64 {
        self.table.get(s.vel_idx)
    }

    #[inline]
    pub fn dwell(&self, waypoint: usize) -> f64 {
        self.dwell[waypoint]
    }

    #[inline]
    pub fn half_window(&self, s: StateId) -> f64 {
        half_window(self.velocity(s), self.dwell[s.waypoint])
    }

    #[inline]
    pub fn swept_arc(&self, s: StateId) -> f64 {
        swept_arc(self.velocity(s), self.dwell[s.waypoint])
    }

    #[inline]
    pub fn heuristic(&self, waypoint: usize) -> f64 {
        self.heuristic[waypoint]
    }
}
