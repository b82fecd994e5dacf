//! Object pool and entity lifecycle
//!
//! `AoiWorld` owns a fixed arena of slots. Ids are handed out by a wrapping
//! monotonic counter; a freed slot becomes eligible again once the counter
//! revisits it, and the id stored in the slot rejects stale handles in the
//! meantime. Every active entity is threaded through both axis sequences of
//! the position index.

mod axis;
mod slot;

pub(crate) use self::axis::{AXIS_X, AXIS_Y};
pub(crate) use self::slot::{AxisLink, Slot, SlotState};

use crate::core::config::{POOL_CAPACITY, POOL_MASK};
use crate::core::error::{AoiError, Result};
use crate::core::types::EntityId;
use crate::scan::AoiEvent;

/// The interest engine: slot arena, dual-axis position index, and the
/// shared event buffer
///
/// `T` is an opaque per-entity payload stored at creation and returned
/// verbatim by [`payload_of`](AoiWorld::payload_of).
///
/// All operations are synchronous and single-threaded; callers that shard
/// work across threads must serialize every call against a given instance.
pub struct AoiWorld<T> {
    pub(crate) slots: Vec<Slot<T>>,
    /// Head of each axis sequence (0 = X, 1 = Y)
    pub(crate) heads: [Option<u32>; 2],
    next_id: u32,
    /// Reusable event buffer, overwritten by every scan
    pub(crate) events: Vec<AoiEvent>,
    active: usize,
}

impl<T> AoiWorld<T> {
    pub fn new() -> Self {
        Self {
            slots: (0..POOL_CAPACITY).map(|_| Slot::vacant()).collect(),
            heads: [None; 2],
            next_id: 0,
            events: Vec::with_capacity(POOL_CAPACITY),
            active: 0,
        }
    }

    /// Number of active entities
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    pub(crate) fn slot_index(id: EntityId) -> usize {
        (id.0 & POOL_MASK) as usize
    }

    /// Resolve an id to its pool index, rejecting stale handles
    pub(crate) fn index_of(&self, id: EntityId) -> Option<u32> {
        let idx = Self::slot_index(id);
        let slot = &self.slots[idx];
        if slot.state == SlotState::Active && slot.id == id {
            Some(idx as u32)
        } else {
            None
        }
    }

    /// Create a new entity at the origin
    ///
    /// The entity starts stationary with empty neighbor snapshots and is
    /// linked into both axis sequences in sorted position, so the sort
    /// invariant holds from birth.
    pub fn create(&mut self, payload: T) -> Result<EntityId> {
        let id = self.allocate()?;
        let idx = Self::slot_index(id) as u32;
        self.slots[idx as usize].activate(id, payload);
        self.active += 1;
        self.link_sorted(AXIS_X, idx);
        self.link_sorted(AXIS_Y, idx);
        tracing::debug!(id = id.0, "entity created");
        Ok(id)
    }

    fn allocate(&mut self) -> Result<EntityId> {
        for _ in 0..POOL_CAPACITY {
            let id = EntityId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if self.slots[Self::slot_index(id)].state == SlotState::Free {
                return Ok(id);
            }
        }
        Err(AoiError::PoolExhausted(POOL_CAPACITY))
    }

    /// Destroy an entity, unlinking it from both axes and freeing its slot
    ///
    /// A stale or already-freed id is a silent no-op.
    pub fn destroy(&mut self, id: EntityId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.unlink(AXIS_X, idx);
        self.unlink(AXIS_Y, idx);
        self.slots[idx as usize].release();
        self.active -= 1;
        tracing::debug!(id = id.0, "entity destroyed");
    }

    /// The payload supplied at creation, or None for a stale id
    pub fn payload_of(&self, id: EntityId) -> Option<&T> {
        let idx = self.index_of(id)?;
        self.slots[idx as usize].payload.as_ref()
    }
}

impl<T> Default for AoiWorld<T> {
    fn default() -> Self {
        Self::new()
    }
}
