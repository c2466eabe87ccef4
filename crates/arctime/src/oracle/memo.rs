//! Memoizing oracle wrapper.

use std::collections::HashMap;

use super::{MotionOracle, MotionQuery};
use crate::kinematics::AxisLimits;

type MemoKey = [u64; 8];

/// Caches answers of a pure oracle by the exact bit pattern of the request.
///
/// The same velocity pair is re-queried whenever a layer is reached from
/// several predecessors with equal windows, so hit rates are high for fine
/// velocity tables.
#[derive(Clone, Debug)]
pub struct MemoOracle<O> {
    inner: O,
    cache: HashMap<MemoKey, Option<f64>>,
    hits: u64,
    misses: u64,
}

impl<O: MotionOracle> MemoOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of queries forwarded to the wrapped oracle.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

fn key(q: &MotionQuery, l: &AxisLimits) -> MemoKey {
    [
        q.v0.to_bits(),
        q.v1.to_bits(),
        q.remaining_distance.to_bits(),
        q.minimum_duration.to_bits(),
        l.v_max.to_bits(),
        l.a_max.to_bits(),
        l.a_min.to_bits(),
        l.j_max.to_bits(),
    ]
}

impl<O: MotionOracle> MotionOracle for MemoOracle<O> {
    fn min_duration(&mut self, query: &MotionQuery, limits: &AxisLimits) -> Option<f64> {
        let k = key(query, limits);
        if let Some(&cached) = self.cache.get(&k) {
            self.hits += 1;
            return cached;
        }
        self.misses += 1;
        let answer = self.inner.min_duration(query, limits);
        self.cache.insert(k, answer);
        answer
    }
}
