//! Profile reconstruction from predecessor links.

use crate::graph::StateGraph;

use super::types::SearchError;

/// Walk `came_from` back from the terminal state; returns one velocity index
/// per waypoint, start first.
pub(super) fn reconstruct(
    graph: &StateGraph,
    came_from: &[Option<usize>],
) -> Result<Vec<usize>, SearchError> {
    let start = graph.flat_index(graph.start());
    let mut at = graph.flat_index(graph.terminal());
    let mut chain = Vec::with_capacity(graph.num_waypoints());
    chain.push(graph.state_at(at).vel_idx);
    while let Some(prev) = came_from[at] {
        chain.push(graph.state_at(prev).vel_idx);
        at = prev;
        if chain.len() > graph.num_waypoints() {
            break;
        }
    }
    if at != start || chain.len() != graph.num_waypoints() {
        let s = graph.state_at(at);
        return Err(SearchError::BrokenChain {
            waypoint: s.waypoint,
            vel_idx: s.vel_idx,
        });
    }
    chain.reverse();
    Ok(chain)
}
