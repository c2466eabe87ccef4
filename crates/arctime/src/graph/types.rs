//! Small value types shared by the graph and the search.

/// Evenly spaced velocities `0, Δ, …, v_max` with `Δ = v_max / (len - 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityTable {
    values: Vec<f64>,
}

impl VelocityTable {
    /// Panics if `vel_res < 2`; callers validate the resolution first.
    pub fn linspace(v_max: f64, vel_res: usize) -> Self {
        assert!(vel_res >= 2, "velocity table needs at least two entries");
        let denom = (vel_res - 1) as f64;
        let values = (0..vel_res)
            .map(|i| v_max * (i as f64) / denom)
            .collect();
        Self { values }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A search state: waypoint index and velocity index into the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId {
    pub waypoint: usize,
    pub vel_idx: usize,
}

impl StateId {
    #[inline]
    pub fn new(waypoint: usize, vel_idx: usize) -> Self {
        Self { waypoint, vel_idx }
    }
}
