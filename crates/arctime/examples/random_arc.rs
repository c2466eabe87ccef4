//! Delivery time of a small random arc.
//!
//! Ten waypoints one degree apart, random dwell and switch times in [0, 1),
//! the reference machine limits and a 256-entry velocity table.

use arctime::api::{solve_with_defaults, AxisLimits};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(0);
    let n = 10;
    let dwell: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let switch: Vec<f64> = (0..n - 1).map(|_| rng.gen::<f64>()).collect();
    let distances = vec![1.0; n - 1];

    let profile = solve_with_defaults(&dwell, &switch, &distances, 0.5, &AxisLimits::default(), 256)
        .expect("random arc has a feasible profile");

    println!("delivery_time_s={:.6}", profile.total_time);
    println!("velocities={:?}", profile.velocities);
    println!(
        "expanded={} oracle_queries={}",
        profile.stats.expanded, profile.stats.oracle_queries
    );
}
