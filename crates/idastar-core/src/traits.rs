//! Collaborator contracts supplied by the caller, plus the open list interface used by the
//! engines.
//!
//! Every collaborator trait is implemented for the matching closure shape, so plain functions
//! and closures can be passed anywhere a collaborator is expected.

use crate::entry::EntryId;

/// Cost of the edge between two adjacent nodes.
///
/// Costs must be finite and non-negative. They may be asymmetric.
pub trait Distance<N> {
    fn distance(&mut self, from: &N, to: &N) -> f64;
}

/// Optimistic estimate of the remaining cost from a node to the destination.
///
/// The estimate must be non-negative, never exceed the true remaining cost, and be 0 at the
/// destination.
pub trait Heuristic<N> {
    fn estimate(&mut self, node: &N) -> f64;
}

/// Lazily defines the graph by producing the nodes adjacent to a node.
///
/// The produced sequence must be finite. It may be empty.
pub trait Neighbors<N> {
    type Iter: IntoIterator<Item = N>;

    fn neighbors(&mut self, node: &N) -> Self::Iter;
}

impl<N, F: FnMut(&N, &N) -> f64> Distance<N> for F {
    fn distance(&mut self, from: &N, to: &N) -> f64 {
        self(from, to)
    }
}

impl<N, F: FnMut(&N) -> f64> Heuristic<N> for F {
    fn estimate(&mut self, node: &N) -> f64 {
        self(node)
    }
}

impl<N, I, F> Neighbors<N> for F
where
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    type Iter = I;

    fn neighbors(&mut self, node: &N) -> I {
        self(node)
    }
}

/// Heuristic that estimates 0 everywhere. Turns any informed search into uniform-cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&mut self, _node: &N) -> f64 {
        0.0
    }
}

/// Frontier of a search: entries waiting to be expanded, retrieved smallest key first.
pub trait OpenList {
    type Key;

    /// Inserts `id` with `key`, or lowers its key if it is already queued.
    fn relaxed(&mut self, id: EntryId, key: Self::Key);

    fn next(&mut self) -> Option<EntryId>;

    fn contains(&self, id: EntryId) -> bool;
}
