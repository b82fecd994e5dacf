//! Sorted neighbor id sets

use crate::core::config::DEFAULT_NEIGHBOR_CAPACITY;
use crate::core::types::EntityId;

/// Sorted, duplicate-free set of entity ids
///
/// Backed by a Vec whose capacity doubles on growth; membership and
/// insertion use binary search. Each entity carries two of these and swaps
/// them after a scan instead of copying, so the previous snapshot is always
/// exactly the prior scan's result.
#[derive(Debug, Default)]
pub(crate) struct NeighborSet {
    ids: Vec<EntityId>,
}

impl NeighborSet {
    /// An unallocated set, used by free pool slots
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// A set pre-sized for a typical neighborhood
    pub fn with_default_capacity() -> Self {
        Self {
            ids: Vec::with_capacity(DEFAULT_NEIGHBOR_CAPACITY),
        }
    }

    pub fn insert(&mut self, id: EntityId) {
        if let Err(at) = self.ids.binary_search(&id) {
            self.ids.insert(at, id);
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
