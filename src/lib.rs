//! Heuristic path search over implicit graphs.
//!
//! The caller defines the graph lazily through three collaborators: a [`Distance`] between
//! adjacent nodes, a [`Heuristic`] estimate of the remaining cost, and a [`Neighbors`]
//! function. Two engines are provided: best-first search in [`bfs`] and iterative-deepening
//! A* in [`ida`].
//!
//! [`Distance`]: traits::Distance
//! [`Heuristic`]: traits::Heuristic
//! [`Neighbors`]: traits::Neighbors

use std::hash::Hash;

use idastar_core::traits::{Distance, Heuristic, Neighbors};
pub use idastar_core::*;
pub use idastar_bfs as bfs;
pub use idastar_ida as ida;

/// Finds a cheapest path from `root` to `destination` with best-first search under the default
/// configuration (cost plus heuristic ordering).
///
/// Returns `Ok(None)` when the destination cannot be reached.
pub fn find_path<N, D, H, E>(
    root: N,
    destination: &N,
    distance: D,
    heuristic: H,
    neighbors: E,
) -> Result<Option<Path<N>>, SearchError>
where
    N: Clone + Eq + Hash,
    D: Distance<N>,
    H: Heuristic<N>,
    E: Neighbors<N>,
{
    bfs::BestFirstSearch::default().find_path(root, destination, distance, heuristic, neighbors)
}

/// Finds a path from `root` to `destination` with iterative-deepening A* using
/// [`ida::DEFAULT_BOUND_FACTOR`].
///
/// Returns `Ok(None)` when the destination cannot be reached within the bound ceiling.
pub fn find_path_ida<N, D, H, E>(
    root: N,
    destination: &N,
    distance: D,
    heuristic: H,
    neighbors: E,
) -> Result<Option<Path<N>>, SearchError>
where
    N: Clone + Eq + Hash,
    D: Distance<N>,
    H: Heuristic<N>,
    E: Neighbors<N>,
{
    ida::IdaStar::default().find_path(root, destination, distance, heuristic, neighbors)
}
