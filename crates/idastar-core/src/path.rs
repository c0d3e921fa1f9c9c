use crate::entry::{EntryId, EntryPool};
use crate::error::{check_distance, SearchError};
use crate::traits::Distance;

/// A path from a root node to a destination node, both inclusive, with its accumulated cost.
///
/// A path is never empty: it holds at least the root.
#[derive(Clone, Debug, PartialEq)]
pub struct Path<N> {
    nodes: Vec<N>,
    cost: f64,
}

impl<N> Path<N> {
    /// Wraps an already ordered node sequence. `nodes` must not be empty.
    pub fn new(nodes: Vec<N>, cost: f64) -> Self {
        debug_assert!(!nodes.is_empty(), "a path contains at least its root");
        Path { nodes, cost }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&N> {
        self.nodes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// Recomputes the accumulated cost of the path by summing `distance` over consecutive
    /// pairs.
    pub fn verify_cost(&self, mut distance: impl Distance<N>) -> Result<f64, SearchError> {
        let mut total = 0.0;
        for pair in self.nodes.windows(2) {
            total += check_distance(distance.distance(&pair[0], &pair[1]))?;
        }
        Ok(total)
    }
}

impl<'a, N> IntoIterator for &'a Path<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Builds the path from `root` to `goal` by following parent links.
///
/// The walk is bounded by the number of entries in the pool. A chain that runs longer, or
/// stops at an entry other than `root`, means the bookkeeping is corrupt.
pub fn construct_path<N: Clone>(
    pool: &EntryPool<N>,
    root: EntryId,
    goal: EntryId,
) -> Result<Path<N>, SearchError> {
    let cost = pool.entry(goal).cost.unwrap_or(0.0);
    let mut nodes = vec![pool.entry(goal).node.clone()];
    let mut current = goal;
    let mut steps = 0;

    while current != root {
        let Some(parent) = pool.entry(current).parent else {
            return Err(SearchError::BrokenParentChain { steps });
        };
        steps += 1;
        if steps >= pool.len() {
            return Err(SearchError::BrokenParentChain { steps });
        }
        current = parent;
        nodes.push(pool.entry(current).node.clone());
    }

    nodes.reverse();
    Ok(Path::new(nodes, cost))
}
