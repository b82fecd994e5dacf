//! Proximity scanning and enter/leave event generation
//!
//! A scan walks the X-ordered sequence outward from the entity in both
//! directions, pruning as soon as the axis distance alone exceeds the leave
//! radius; the sequence is sorted, so everything farther in that direction
//! is excluded too. Surviving candidates are classified by squared distance
//! against both radii, the fresh set is diffed against the previous
//! snapshot, and the snapshots are swapped.

pub(crate) mod snapshot;

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;
use crate::index::{AoiWorld, AXIS_X};
use self::snapshot::NeighborSet;

/// Kind of visibility change reported by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The entity came into sight
    Enter,
    /// The entity went out of sight
    Leave,
}

/// One visibility change around the scanned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AoiEvent {
    pub id: EntityId,
    pub kind: EventKind,
}

impl<T> AoiWorld<T> {
    /// Scan for visibility changes around `id`
    ///
    /// Candidates within `enter_radius` always become neighbors; candidates
    /// between the radii stay neighbors only if they already were, so
    /// membership cannot flicker at a single threshold; everything past
    /// `leave_radius` drops out. Ids from the previous snapshot whose entity
    /// has since been destroyed are dropped without a Leave event.
    ///
    /// Callers must keep `leave_radius > enter_radius`; the engine does not
    /// validate this outside debug builds.
    ///
    /// The returned slice borrows the engine's single event buffer and is
    /// overwritten by the next scan on any entity. A stale id yields an
    /// empty slice.
    pub fn scan(&mut self, id: EntityId, enter_radius: u32, leave_radius: u32) -> &[AoiEvent] {
        debug_assert!(
            leave_radius > enter_radius,
            "leave radius must exceed enter radius"
        );
        self.events.clear();
        let Some(idx) = self.index_of(id) else {
            return &self.events;
        };

        let mut fresh = std::mem::take(&mut self.slots[idx as usize].staging);
        fresh.clear();
        self.collect_candidates(idx, enter_radius, leave_radius, &mut fresh);

        let mut events = std::mem::take(&mut self.events);
        self.diff_snapshots(idx, &fresh, &mut events);
        self.events = events;

        let slot = &mut self.slots[idx as usize];
        slot.staging = fresh;
        std::mem::swap(&mut slot.neighbors, &mut slot.staging);

        tracing::trace!(
            id = id.0,
            neighbors = slot.neighbors.len(),
            events = self.events.len(),
            "scan"
        );
        &self.events
    }

    /// Walk the X-ordered sequence outward, filling `fresh` with the new
    /// candidate set
    fn collect_candidates(
        &self,
        idx: u32,
        enter_radius: u32,
        leave_radius: u32,
        fresh: &mut NeighborSet,
    ) {
        let origin = self.slots[idx as usize].pos;
        let previous = &self.slots[idx as usize].neighbors;
        let enter_sq = i64::from(enter_radius) * i64::from(enter_radius);
        let leave_sq = i64::from(leave_radius) * i64::from(leave_radius);

        for backward in [true, false] {
            let links = self.slots[idx as usize].links[AXIS_X];
            let mut cursor = if backward { links.prev } else { links.next };
            while let Some(c) = cursor {
                let other = &self.slots[c as usize];
                let axis_distance = (i64::from(origin.x) - i64::from(other.pos.x)).abs();
                if axis_distance > i64::from(leave_radius) {
                    break;
                }
                let d2 = origin.distance_squared(&other.pos);
                if d2 <= enter_sq || (d2 <= leave_sq && previous.contains(other.id)) {
                    fresh.insert(other.id);
                }
                let links = other.links[AXIS_X];
                cursor = if backward { links.prev } else { links.next };
            }
        }
    }

    /// Two-pointer merge over the previous and fresh sorted sets, emitting
    /// Enter for ids only in the fresh set and Leave for ids only in the
    /// previous one. Previous ids whose entity no longer exists are skipped
    /// silently.
    fn diff_snapshots(&self, idx: u32, fresh: &NeighborSet, events: &mut Vec<AoiEvent>) {
        let old = self.slots[idx as usize].neighbors.as_slice();
        let new = fresh.as_slice();
        let mut o = 0;
        let mut n = 0;
        while o < old.len() {
            if self.index_of(old[o]).is_none() {
                o += 1;
                continue;
            }
            if n >= new.len() {
                events.push(AoiEvent {
                    id: old[o],
                    kind: EventKind::Leave,
                });
                o += 1;
                continue;
            }
            match new[n].cmp(&old[o]) {
                std::cmp::Ordering::Less => {
                    events.push(AoiEvent {
                        id: new[n],
                        kind: EventKind::Enter,
                    });
                    n += 1;
                }
                std::cmp::Ordering::Equal => {
                    o += 1;
                    n += 1;
                }
                std::cmp::Ordering::Greater => {
                    events.push(AoiEvent {
                        id: old[o],
                        kind: EventKind::Leave,
                    });
                    o += 1;
                }
            }
        }
        while n < new.len() {
            events.push(AoiEvent {
                id: new[n],
                kind: EventKind::Enter,
            });
            n += 1;
        }
    }

    /// Up to `max` ids from the current (post-scan) neighbor snapshot
    ///
    /// Empty for a stale id or an entity that has never been scanned.
    pub fn neighbors_of(&self, id: EntityId, max: usize) -> &[EntityId] {
        let Some(idx) = self.index_of(id) else {
            return &[];
        };
        let ids = self.slots[idx as usize].neighbors.as_slice();
        &ids[..max.min(ids.len())]
    }
}
