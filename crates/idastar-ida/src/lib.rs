//! Iterative-deepening A*.
//!
//! Repeated depth-first probes from the root, each bounded by a cost threshold on
//! `g + heuristic`. A probe that fails raises the threshold to the smallest estimate that
//! exceeded it. Memory use is proportional to the depth of the path being explored; no
//! open or closed sets are kept between probes.

use std::hash::Hash;

use idastar_core::traits::{Distance, Heuristic, Neighbors};
use idastar_core::{check_distance, check_heuristic, Path, SearchError, SearchStatistics};
use tracing::{debug, trace};

/// Factor applied to the root's heuristic estimate to obtain the hard ceiling on the bound.
pub const DEFAULT_BOUND_FACTOR: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdaStarConfig {
    /// The search gives up once the bound would exceed `heuristic(root) * bound_factor`.
    ///
    /// This is a safety valve against divergence, not part of the optimality guarantee. Use
    /// `f64::INFINITY` to disable the ceiling.
    pub bound_factor: f64,
}

impl IdaStarConfig {
    pub fn with_bound_factor(mut self, bound_factor: f64) -> Self {
        self.bound_factor = bound_factor;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        // NaN fails the comparison.
        if self.bound_factor >= 1.0 {
            Ok(())
        } else {
            Err(SearchError::InvalidBoundFactor {
                factor: self.bound_factor,
            })
        }
    }

    pub fn max_bound(&self, root_estimate: f64) -> f64 {
        if self.bound_factor.is_infinite() {
            f64::INFINITY
        } else {
            root_estimate * self.bound_factor
        }
    }
}

impl Default for IdaStarConfig {
    fn default() -> Self {
        IdaStarConfig {
            bound_factor: DEFAULT_BOUND_FACTOR,
        }
    }
}

pub struct IdaStar {
    config: IdaStarConfig,
    statistics: SearchStatistics,
}

enum Probe<N> {
    Found(Path<N>),
    /// Smallest `g + h` that exceeded the bound. Infinite if nothing was pruned.
    Exceeded(f64),
}

struct Frame<N, I> {
    node: N,
    cost: f64,
    successors: I,
}

impl IdaStar {
    pub fn new(config: IdaStarConfig) -> Self {
        IdaStar {
            config,
            statistics: SearchStatistics::new(),
        }
    }

    pub fn config(&self) -> &IdaStarConfig {
        &self.config
    }

    pub fn bound_factor(&self) -> f64 {
        self.config.bound_factor
    }

    pub fn set_bound_factor(&mut self, bound_factor: f64) {
        self.config.bound_factor = bound_factor;
    }

    /// Statistics of the most recent [`find_path`](Self::find_path) call.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Searches for a path from `root` to `destination`.
    ///
    /// With an admissible heuristic the returned path is optimal. Returns `Ok(None)` when the
    /// graph is exhausted or the bound passes the ceiling set by the bound factor.
    pub fn find_path<N, D, H, E>(
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
        self.config.validate()?;
        self.statistics = SearchStatistics::new();
        let result = self.search(root, destination, &mut distance, &mut heuristic, &mut neighbors);
        self.statistics.finalise_search();
        result
    }

    fn search<N, D, H, E>(
        &mut self,
        root: N,
        destination: &N,
        distance: &mut D,
        heuristic: &mut H,
        neighbors: &mut E,
    ) -> Result<Option<Path<N>>, SearchError>
    where
        N: Clone + Eq + Hash,
        D: Distance<N>,
        H: Heuristic<N>,
        E: Neighbors<N>,
    {
        let root_estimate = check_heuristic(heuristic.estimate(&root))?;
        if root_estimate == f64::INFINITY {
            debug!("root estimate is infinite, destination unreachable");
            return Ok(None);
        }
        let max_bound = self.config.max_bound(root_estimate);
        let mut bound = root_estimate;
        debug!(bound, max_bound, "starting iterative deepening search");

        loop {
            self.statistics.increment_iterations();
            trace!(bound, "probing");
            let outcome = probe(
                &root,
                destination,
                bound,
                distance,
                heuristic,
                neighbors,
                &mut self.statistics,
            )?;

            match outcome {
                Probe::Found(path) => {
                    debug!(cost = path.cost(), length = path.len(), "destination reached");
                    return Ok(Some(path));
                }
                Probe::Exceeded(next_bound) if next_bound == f64::INFINITY => {
                    debug!("search space exhausted");
                    return Ok(None);
                }
                Probe::Exceeded(next_bound) if next_bound > max_bound => {
                    debug!(next_bound, max_bound, "bound ceiling exceeded");
                    return Ok(None);
                }
                Probe::Exceeded(next_bound) => bound = next_bound,
            }
        }
    }
}

impl Default for IdaStar {
    fn default() -> Self {
        Self::new(IdaStarConfig::default())
    }
}

fn probe<N, D, H, E>(
    root: &N,
    destination: &N,
    bound: f64,
    distance: &mut D,
    heuristic: &mut H,
    neighbors: &mut E,
    statistics: &mut SearchStatistics,
) -> Result<Probe<N>, SearchError>
where
    N: Clone + Eq,
    D: Distance<N>,
    H: Heuristic<N>,
    E: Neighbors<N>,
{
    debug_assert!(bound.is_finite());
    let mut next_bound = f64::INFINITY;
    let mut stack: Vec<Frame<N, <E::Iter as IntoIterator>::IntoIter>> = vec![];
    let mut candidate = Some((root.clone(), 0.0));

    loop {
        if let Some((node, cost)) = candidate.take() {
            let estimate = cost + check_heuristic(heuristic.estimate(&node))?;
            // The bound is finite, so infinite estimates are always pruned.
            if estimate > bound {
                next_bound = next_bound.min(estimate);
            } else if node == *destination {
                let mut nodes: Vec<N> = stack.into_iter().map(|frame| frame.node).collect();
                nodes.push(node);
                return Ok(Probe::Found(Path::new(nodes, cost)));
            } else {
                statistics.increment_expanded_nodes();
                let successors = neighbors.neighbors(&node).into_iter();
                stack.push(Frame {
                    node,
                    cost,
                    successors,
                });
            }
        }

        let Some(frame) = stack.last_mut() else {
            break;
        };
        let Some(successor) = frame.successors.next() else {
            stack.pop();
            continue;
        };
        statistics.increment_generated_nodes();

        // Never revisit a node already on the current path.
        if stack.iter().any(|frame| frame.node == successor) {
            continue;
        }

        let parent = &stack[stack.len() - 1];
        let cost = parent.cost + check_distance(distance.distance(&parent.node, &successor))?;
        candidate = Some((successor, cost));
    }

    Ok(Probe::Exceeded(next_bound))
}
