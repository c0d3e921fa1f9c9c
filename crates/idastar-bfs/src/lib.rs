//! Best-first search with node re-opening.
//!
//! The frontier is ordered either by accumulated cost alone (uniform-cost search) or by
//! accumulated cost plus heuristic estimate (A*), see [`FrontierOrdering`]. Closed nodes are
//! moved back to the frontier whenever a cheaper path to them turns up, so the returned path is
//! optimal for any admissible heuristic, consistent or not.

use std::hash::Hash;

use idastar_core::traits::{Distance, Heuristic, Neighbors, OpenList};
use idastar_core::{
    check_distance, check_heuristic, construct_path, EntryPool, EntryStatus, Path,
    PriorityQueue, SearchError, SearchStatistics,
};
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

/// Key used to pick the next node to expand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrontierOrdering {
    /// Lowest accumulated cost first. The heuristic is still evaluated and checked, but does
    /// not steer the search.
    Uniform,
    /// Lowest accumulated cost plus heuristic estimate first.
    #[default]
    CostPlusHeuristic,
}

impl FrontierOrdering {
    fn priority(self, cost: f64, heuristic: f64) -> OrderedFloat<f64> {
        match self {
            FrontierOrdering::Uniform => OrderedFloat(cost),
            FrontierOrdering::CostPlusHeuristic => OrderedFloat(cost + heuristic),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestFirstConfig {
    pub ordering: FrontierOrdering,
}

impl BestFirstConfig {
    pub fn with_ordering(mut self, ordering: FrontierOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

// Ties on the ordering key go to whichever entry entered the frontier first.
type Priority = (OrderedFloat<f64>, u64);

pub struct BestFirstSearch {
    config: BestFirstConfig,
    statistics: SearchStatistics,
}

impl BestFirstSearch {
    pub fn new(config: BestFirstConfig) -> Self {
        BestFirstSearch {
            config,
            statistics: SearchStatistics::new(),
        }
    }

    pub fn config(&self) -> &BestFirstConfig {
        &self.config
    }

    /// Statistics of the most recent [`find_path`](Self::find_path) call.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Searches for a cheapest path from `root` to `destination`.
    ///
    /// Returns `Ok(None)` when the destination cannot be reached.
    pub fn find_path<N, D, H, E>(
        &mut self,
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
        self.statistics = SearchStatistics::new();
        debug!(ordering = ?self.config.ordering, "starting best-first search");
        let result = self.search(root, destination, distance, heuristic, neighbors);
        self.statistics.finalise_search();
        result
    }

    fn search<N, D, H, E>(
        &mut self,
        root: N,
        destination: &N,
        mut distance: D,
        mut heuristic: H,
        mut neighbors: E,
    ) -> Result<Option<Path<N>>, SearchError>
    where
        N: Clone + Eq + Hash,
        D: Distance<N>,
        H: Heuristic<N>,
        E: Neighbors<N>,
    {
        let ordering = self.config.ordering;
        let statistics = &mut self.statistics;
        statistics.increment_iterations();

        let mut pool = EntryPool::new();
        let mut open: PriorityQueue<Priority> = PriorityQueue::new();
        let mut sequence = 0u64;

        let root = pool.root(root);
        let root_entry = pool.entry_mut(root);
        let root_h = check_heuristic(heuristic.estimate(&root_entry.node))?;
        root_entry.heuristic = Some(root_h);
        root_entry.status = EntryStatus::Open;
        open.relaxed(root, (ordering.priority(0.0, root_h), sequence));

        while let Some(current) = open.next() {
            let entry = pool.entry_mut(current);
            if entry.node == *destination {
                let path = construct_path(&pool, root, current)?;
                debug!(cost = path.cost(), length = path.len(), "destination reached");
                return Ok(Some(path));
            }

            entry.status = EntryStatus::Closed;
            // Queued entries always carry a cost.
            let current_cost = entry.cost.unwrap_or(f64::INFINITY);
            let node = entry.node.clone();
            statistics.increment_expanded_nodes();
            trace!(entry = current.index(), cost = current_cost, "expanding");

            for successor in neighbors.neighbors(&node) {
                statistics.increment_generated_nodes();
                let new_cost = current_cost + check_distance(distance.distance(&node, &successor))?;

                let (id, fresh) = pool.generate(successor, Some(current));
                let entry = pool.entry_mut(id);

                if fresh {
                    let h = check_heuristic(heuristic.estimate(&entry.node))?;
                    entry.heuristic = Some(h);
                    entry.cost = Some(new_cost);
                    entry.status = EntryStatus::Open;
                    sequence += 1;
                    open.relaxed(id, (ordering.priority(new_cost, h), sequence));
                    continue;
                }

                if entry.cost.is_some_and(|cost| new_cost < cost) {
                    entry.parent = Some(current);
                    entry.cost = Some(new_cost);
                    let key = ordering.priority(new_cost, entry.heuristic.unwrap_or(0.0));

                    if entry.status == EntryStatus::Closed {
                        trace!(entry = id.index(), cost = new_cost, "reopening");
                        statistics.increment_reopened_nodes();
                        entry.status = EntryStatus::Open;
                        sequence += 1;
                        open.relaxed(id, (key, sequence));
                    } else if let Some((_, order)) = open.key(id) {
                        trace!(entry = id.index(), cost = new_cost, "relaxing");
                        open.relaxed(id, (key, order));
                    }
                }
            }
        }

        debug!("frontier exhausted without reaching the destination");
        Ok(None)
    }
}

impl Default for BestFirstSearch {
    fn default() -> Self {
        Self::new(BestFirstConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use idastar_core::traits::ZeroHeuristic;

    use super::*;

    type Graph = HashMap<char, Vec<(char, f64)>>;

    fn graph(edges: &[(char, char, f64)]) -> Graph {
        let mut graph = Graph::new();
        for &(from, to, cost) in edges {
            graph.entry(from).or_default().push((to, cost));
        }
        graph
    }

    fn run(
        graph: &Graph,
        ordering: FrontierOrdering,
        root: char,
        destination: char,
        heuristic: impl Heuristic<char>,
    ) -> (Result<Option<Path<char>>, SearchError>, SearchStatistics) {
        let mut search = BestFirstSearch::new(BestFirstConfig::default().with_ordering(ordering));
        let result = search.find_path(
            root,
            &destination,
            |a: &char, b: &char| {
                graph[a]
                    .iter()
                    .find(|(to, _)| to == b)
                    .map_or(f64::NAN, |&(_, cost)| cost)
            },
            heuristic,
            |n: &char| -> Vec<char> {
                graph
                    .get(n)
                    .map(|edges| edges.iter().map(|&(to, _)| to).collect())
                    .unwrap_or_default()
            },
        );
        (result, search.statistics().clone())
    }

    fn diamond() -> Graph {
        graph(&[('A', 'B', 1.0), ('A', 'C', 4.0), ('B', 'D', 1.0), ('C', 'D', 1.0)])
    }

    #[test]
    fn diamond_takes_cheap_branch() {
        for ordering in [FrontierOrdering::Uniform, FrontierOrdering::CostPlusHeuristic] {
            let (result, _) = run(&diamond(), ordering, 'A', 'D', ZeroHeuristic);
            let path = result.unwrap().unwrap();
            assert_eq!(path.nodes(), &['A', 'B', 'D']);
            assert_eq!(path.cost(), 2.0);
        }
    }

    #[test]
    fn unreachable_destination_is_not_found() {
        let mut g = diamond();
        g.insert('E', vec![('A', 1.0)]);
        let (result, statistics) = run(&g, FrontierOrdering::default(), 'A', 'E', ZeroHeuristic);
        assert_eq!(result, Ok(None));
        assert_eq!(statistics.expanded_nodes(), 4);
    }

    #[test]
    fn root_is_destination_without_expanding() {
        let calls = Cell::new(0);
        let mut search = BestFirstSearch::default();
        let path = search
            .find_path(
                7u32,
                &7,
                |_: &u32, _: &u32| 1.0,
                ZeroHeuristic,
                |n: &u32| {
                    calls.set(calls.get() + 1);
                    vec![n + 1]
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(path.nodes(), &[7]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(search.statistics().expanded_nodes(), 0);
    }

    #[test]
    fn equal_cost_ties_go_to_earlier_discovery() {
        let g = graph(&[('A', 'B', 1.0), ('A', 'C', 1.0), ('B', 'D', 1.0), ('C', 'D', 1.0)]);
        let (result, _) = run(&g, FrontierOrdering::Uniform, 'A', 'D', ZeroHeuristic);
        assert_eq!(result.unwrap().unwrap().nodes(), &['A', 'B', 'D']);
    }

    #[test]
    fn closed_node_is_reopened_on_cheaper_path() {
        // X is first closed at cost 10 straight from S, then reached at cost 3 through A and
        // B. The heuristic is admissible but inconsistent, which delays A and B.
        let g = graph(&[
            ('S', 'X', 10.0),
            ('S', 'A', 1.0),
            ('A', 'B', 1.0),
            ('B', 'X', 1.0),
            ('X', 'G', 20.0),
        ]);
        let h = |n: &char| match n {
            'A' => 22.0,
            'B' => 21.0,
            _ => 0.0,
        };
        let (result, statistics) = run(&g, FrontierOrdering::CostPlusHeuristic, 'S', 'G', h);
        let path = result.unwrap().unwrap();
        assert_eq!(path.nodes(), &['S', 'A', 'B', 'X', 'G']);
        assert_eq!(path.cost(), 23.0);
        assert_eq!(statistics.reopened_nodes(), 1);
    }

    #[test]
    fn open_node_is_relaxed_in_place() {
        // C enters the frontier at cost 4 from A and drops to 2 through B before it is expanded.
        let g = graph(&[('A', 'C', 4.0), ('A', 'B', 1.0), ('B', 'C', 1.0), ('C', 'D', 1.0)]);
        for ordering in [FrontierOrdering::Uniform, FrontierOrdering::CostPlusHeuristic] {
            let (result, statistics) = run(&g, ordering, 'A', 'D', ZeroHeuristic);
            let path = result.unwrap().unwrap();
            assert_eq!(path.nodes(), &['A', 'B', 'C', 'D']);
            assert_eq!(path.cost(), 3.0);
            assert_eq!(statistics.reopened_nodes(), 0);
            assert_eq!(statistics.expanded_nodes(), 3, "C must be expanded once");
        }
    }

    #[test]
    fn heuristic_guides_informed_ordering() {
        // A line 0..=20 with a long dead-end spur hanging off the start.
        let neighbors = |n: &i32| -> Vec<i32> {
            match *n {
                0 => vec![-1, 1],
                n if n < 0 && n > -20 => vec![n - 1],
                n if n > 0 && n < 20 => vec![n + 1],
                _ => vec![],
            }
        };
        let distance = |_: &i32, _: &i32| 1.0;
        let heuristic = |n: &i32| f64::from((20 - n).abs());

        let uniform_config = BestFirstConfig::default().with_ordering(FrontierOrdering::Uniform);
        let mut uniform = BestFirstSearch::new(uniform_config);
        let mut informed = BestFirstSearch::default();
        let a = uniform.find_path(0, &20, distance, heuristic, neighbors).unwrap().unwrap();
        let b = informed.find_path(0, &20, distance, heuristic, neighbors).unwrap().unwrap();

        assert_eq!(a, b);
        assert_eq!(b.cost(), 20.0);
        assert!(
            informed.statistics().expanded_nodes() < uniform.statistics().expanded_nodes(),
            "informed search should skip the spur"
        );
    }

    #[test]
    fn negative_edge_cost_aborts() {
        let g = graph(&[('A', 'B', -1.0)]);
        let (result, _) = run(&g, FrontierOrdering::default(), 'A', 'B', ZeroHeuristic);
        assert_eq!(result, Err(SearchError::InvalidDistance { cost: -1.0 }));
    }

    #[test]
    fn negative_heuristic_aborts() {
        let (result, _) = run(&diamond(), FrontierOrdering::Uniform, 'A', 'D', |n: &char| {
            if *n == 'C' {
                -3.0
            } else {
                0.0
            }
        });
        assert_eq!(result, Err(SearchError::InvalidHeuristic { value: -3.0 }));
    }
}
