use std::hash::Hash;

use ahash::AHashMap;

/// Index of a [`SearchEntry`] inside an [`EntryPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

impl EntryId {
    #[track_caller]
    pub fn from_index(index: usize) -> Self {
        EntryId(u32::try_from(index).expect("entry pool exceeded u32::MAX entries"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// Discovered but not yet assigned a cost.
    New,
    /// On the frontier.
    Open,
    /// Expanded.
    Closed,
}

/// Per-node bookkeeping record.
///
/// `parent` is a back-reference into the owning pool; the root has none. Once assigned, `cost`
/// is the accumulated edge cost along the parent chain.
#[derive(Clone, Debug)]
pub struct SearchEntry<N> {
    pub node: N,
    pub parent: Option<EntryId>,
    pub cost: Option<f64>,
    /// Cached heuristic estimate, evaluated once on first discovery.
    pub heuristic: Option<f64>,
    pub status: EntryStatus,
}

/// Arena of search entries indexed by node.
///
/// Each distinct node gets exactly one entry for the lifetime of the pool.
pub struct EntryPool<N> {
    entries: Vec<SearchEntry<N>>,
    index: AHashMap<N, EntryId>,
}

impl<N: Clone + Eq + Hash> EntryPool<N> {
    pub fn new() -> Self {
        EntryPool {
            entries: vec![],
            index: AHashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Creates the root entry for `node`: no parent, cost 0.
    pub fn root(&mut self, node: N) -> EntryId {
        let (id, _) = self.generate(node, None);
        let entry = &mut self.entries[id.index()];
        entry.parent = None;
        entry.cost = Some(0.0);
        id
    }

    /// Returns the entry for `node`, creating a fresh one with the given `parent` if the node
    /// has not been seen before. The flag is `true` when the entry was created.
    pub fn generate(&mut self, node: N, parent: Option<EntryId>) -> (EntryId, bool) {
        if let Some(&id) = self.index.get(&node) {
            return (id, false);
        }
        let id = EntryId::from_index(self.entries.len());
        self.index.insert(node.clone(), id);
        self.entries.push(SearchEntry {
            node,
            parent,
            cost: None,
            heuristic: None,
            status: EntryStatus::New,
        });
        (id, true)
    }

    pub fn get(&self, node: &N) -> Option<EntryId> {
        self.index.get(node).copied()
    }
}

impl<N> EntryPool<N> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> &SearchEntry<N> {
        &self.entries[id.index()]
    }

    pub fn entry_mut(&mut self, id: EntryId) -> &mut SearchEntry<N> {
        &mut self.entries[id.index()]
    }
}

impl<N: Clone + Eq + Hash> Default for EntryPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_zero_cost_and_no_parent() {
        let mut pool = EntryPool::new();
        let root = pool.root("a");
        let entry = pool.entry(root);
        assert_eq!(entry.node, "a");
        assert_eq!(entry.parent, None);
        assert_eq!(entry.cost, Some(0.0));
        assert_eq!(entry.status, EntryStatus::New);
    }

    #[test]
    fn generate_deduplicates_by_node() {
        let mut pool = EntryPool::new();
        let root = pool.root(0u32);
        let (a, fresh_a) = pool.generate(1, Some(root));
        let (b, fresh_b) = pool.generate(1, None);
        assert!(fresh_a);
        assert!(!fresh_b);
        assert_eq!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.entry(a).parent, Some(root), "existing entry keeps its parent");
        assert_eq!(pool.entry(a).cost, None);
        assert_eq!(pool.get(&1), Some(a));
        assert_eq!(pool.get(&7), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut pool = EntryPool::new();
        pool.root('x');
        pool.generate('y', None);
        pool.reset();
        assert!(pool.is_empty());
        assert_eq!(pool.get(&'x'), None);
    }
}
