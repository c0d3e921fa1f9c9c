use crate::entry::EntryId;
use crate::traits::OpenList;

const NOT_QUEUED: usize = usize::MAX;

/// Indexed binary min-heap over [`EntryId`]s.
///
/// Each queued entry remembers its slot in the heap, so a cheaper key can be applied in place
/// through [`OpenList::relaxed`] instead of pushing a duplicate.
pub struct PriorityQueue<K> {
    heap: Vec<(K, EntryId)>,
    // Indexed by entry id. `NOT_QUEUED` for entries that are not in the heap.
    slots: Vec<usize>,
}

impl<K: Ord + Copy> PriorityQueue<K> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: vec![],
            slots: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Key currently associated with `id`, if it is queued.
    pub fn key(&self, id: EntryId) -> Option<K> {
        let slot = self.slot(id)?;
        Some(self.heap[slot].0)
    }

    fn slot(&self, id: EntryId) -> Option<usize> {
        match self.slots.get(id.index()) {
            Some(&slot) if slot != NOT_QUEUED => Some(slot),
            _ => None,
        }
    }

    fn set_slot(&mut self, id: EntryId, slot: usize) {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, NOT_QUEUED);
        }
        self.slots[index] = slot;
    }

    fn sift_up(&mut self, mut index: usize) {
        let item = self.heap[index];
        while index > 0 {
            let parent_index = (index - 1) / 2;
            let parent = self.heap[parent_index];
            if parent.0 <= item.0 {
                break;
            }
            self.heap[index] = parent;
            self.set_slot(parent.1, index);
            index = parent_index;
        }
        self.heap[index] = item;
        self.set_slot(item.1, index);
    }

    fn sift_down(&mut self, mut index: usize) {
        let item = self.heap[index];
        loop {
            let child_1_index = index * 2 + 1;
            if child_1_index >= self.heap.len() {
                break;
            }

            let child_2_index = child_1_index + 1;
            let child_index = if child_2_index < self.heap.len()
                && self.heap[child_2_index].0 < self.heap[child_1_index].0
            {
                child_2_index
            } else {
                child_1_index
            };
            let child = self.heap[child_index];

            if item.0 <= child.0 {
                break;
            }

            self.heap[index] = child;
            self.set_slot(child.1, index);
            index = child_index;
        }
        self.heap[index] = item;
        self.set_slot(item.1, index);
    }
}

impl<K: Ord + Copy> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> OpenList for PriorityQueue<K> {
    type Key = K;

    fn relaxed(&mut self, id: EntryId, key: K) {
        match self.slot(id) {
            Some(slot) => {
                // Keys only ever decrease while an entry is queued.
                debug_assert!(key <= self.heap[slot].0);
                self.heap[slot].0 = key;
                self.sift_up(slot);
            }
            None => {
                self.heap.push((key, id));
                self.sift_up(self.heap.len() - 1);
            }
        }
    }

    fn next(&mut self) -> Option<EntryId> {
        if self.heap.is_empty() {
            return None;
        }
        let (_, ret) = self.heap.swap_remove(0);
        self.set_slot(ret, NOT_QUEUED);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(ret)
    }

    fn contains(&self, id: EntryId) -> bool {
        self.slot(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> EntryId {
        EntryId::from_index(index)
    }

    #[test]
    fn pops_in_key_order() {
        let mut queue = PriorityQueue::new();
        for (i, key) in [5, 3, 9, 1, 7, 2].into_iter().enumerate() {
            queue.relaxed(id(i), key);
        }

        let mut popped = vec![];
        while let Some(entry) = queue.next() {
            popped.push(entry.index());
        }
        assert_eq!(popped, vec![3, 5, 1, 0, 4, 2]);
    }

    #[test]
    fn relaxing_a_queued_entry_moves_it_forward() {
        let mut queue = PriorityQueue::new();
        queue.relaxed(id(0), 10);
        queue.relaxed(id(1), 20);
        queue.relaxed(id(2), 30);

        queue.relaxed(id(2), 5);
        assert_eq!(queue.len(), 3, "decrease-key must not duplicate the entry");
        assert_eq!(queue.key(id(2)), Some(5));
        assert_eq!(queue.next(), Some(id(2)));
        assert_eq!(queue.next(), Some(id(0)));
        assert_eq!(queue.next(), Some(id(1)));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn membership_follows_push_and_pop() {
        let mut queue = PriorityQueue::new();
        assert!(!queue.contains(id(4)));
        queue.relaxed(id(4), (1, 0));
        assert!(queue.contains(id(4)));
        assert_eq!(queue.next(), Some(id(4)));
        assert!(!queue.contains(id(4)));
        assert!(queue.is_empty());

        // A popped entry can be queued again.
        queue.relaxed(id(4), (0, 1));
        assert!(queue.contains(id(4)));
    }

    #[test]
    fn ties_fall_back_to_second_key_component() {
        let mut queue = PriorityQueue::new();
        queue.relaxed(id(0), (1, 2));
        queue.relaxed(id(1), (1, 0));
        queue.relaxed(id(2), (1, 1));
        assert_eq!(queue.next(), Some(id(1)));
        assert_eq!(queue.next(), Some(id(2)));
        assert_eq!(queue.next(), Some(id(0)));
    }
}
