//! Typed search errors.
//!
//! An unreachable destination is not an error: engines report it as `Ok(None)`. The variants
//! here abort the current search call and are never retried, since the same inputs reproduce
//! the same failure.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchError {
    /// The distance collaborator returned a negative, NaN or infinite edge cost.
    #[error("distance function returned invalid edge cost {cost}")]
    InvalidDistance { cost: f64 },

    /// The heuristic collaborator returned a negative or NaN estimate.
    #[error("heuristic function returned invalid estimate {value}")]
    InvalidHeuristic { value: f64 },

    /// The iterative-deepening bound factor is NaN or below 1.
    #[error("bound factor must be a number no smaller than 1, got {factor}")]
    InvalidBoundFactor { factor: f64 },

    /// Following parent links from the goal did not arrive at the root within the number of
    /// entries that exist. Indicates corrupted entry bookkeeping.
    #[error("parent chain did not reach the root after {steps} steps")]
    BrokenParentChain { steps: usize },
}

impl SearchError {
    /// Whether a collaborator or the caller's configuration broke its contract.
    pub fn is_contract_violation(&self) -> bool {
        !self.is_internal()
    }

    /// Whether the engine's own bookkeeping is inconsistent.
    pub fn is_internal(&self) -> bool {
        matches!(self, SearchError::BrokenParentChain { .. })
    }
}

/// Checks an edge cost returned by a distance collaborator.
pub fn check_distance(cost: f64) -> Result<f64, SearchError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(SearchError::InvalidDistance { cost })
    }
}

/// Checks an estimate returned by a heuristic collaborator.
pub fn check_heuristic(value: f64) -> Result<f64, SearchError> {
    // Rejects NaN as well, since NaN compares false.
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SearchError::InvalidHeuristic { value })
    }
}
