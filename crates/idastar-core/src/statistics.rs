use std::time::{Duration, Instant};

use tracing::debug;

/// Counters gathered during a single search call.
#[derive(Clone, Debug)]
pub struct SearchStatistics {
    /// Nodes whose neighbors were generated.
    expanded_nodes: u64,
    /// Neighbors produced by the neighbor function, duplicates included.
    generated_nodes: u64,
    /// Closed nodes moved back to the frontier after a cheaper path was found.
    reopened_nodes: u64,
    /// Depth-first probes started by iterative deepening. Best-first search runs one.
    iterations: u64,
    search_start_time: Instant,
    search_duration: Duration,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            reopened_nodes: 0,
            iterations: 0,
            search_start_time: Instant::now(),
            search_duration: Duration::ZERO,
        }
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
    }

    pub fn increment_generated_nodes(&mut self) {
        self.generated_nodes += 1;
    }

    pub fn increment_reopened_nodes(&mut self) {
        self.reopened_nodes += 1;
    }

    pub fn increment_iterations(&mut self) {
        self.iterations += 1;
    }

    pub fn expanded_nodes(&self) -> u64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> u64 {
        self.generated_nodes
    }

    pub fn reopened_nodes(&self) -> u64 {
        self.reopened_nodes
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn search_duration(&self) -> Duration {
        self.search_duration
    }

    pub fn finalise_search(&mut self) {
        self.search_duration = self.search_start_time.elapsed();
        debug!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            reopened_nodes = self.reopened_nodes,
            iterations = self.iterations,
            search_duration = self.search_duration.as_secs_f64(),
            "search finished"
        );
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
