//! Dual-axis ordered sequences
//!
//! Each axis is an independent doubly-linked sequence threaded through the
//! slot arena by pool index, kept sorted by that axis's coordinate.
//! Repositioning after a coordinate change walks locally from the entity's
//! current link in the direction of the change, which costs O(k) in the
//! number of entities passed. Entities move small distances per tick
//! relative to neighbor density, so this beats a full sorted reinsertion.

use super::{AoiWorld, AxisLink};

pub(crate) const AXIS_X: usize = 0;
pub(crate) const AXIS_Y: usize = 1;

impl<T> AoiWorld<T> {
    /// Coordinate of a slot on the given axis
    pub(crate) fn axis_coord(&self, axis: usize, idx: u32) -> i32 {
        let pos = self.slots[idx as usize].pos;
        if axis == AXIS_X {
            pos.x
        } else {
            pos.y
        }
    }

    /// Remove a slot from one axis sequence, clearing its links
    pub(crate) fn unlink(&mut self, axis: usize, idx: u32) {
        let AxisLink { prev, next } = self.slots[idx as usize].links[axis];
        match prev {
            Some(p) => self.slots[p as usize].links[axis].next = next,
            None => self.heads[axis] = next,
        }
        if let Some(n) = next {
            self.slots[n as usize].links[axis].prev = prev;
        }
        self.slots[idx as usize].links[axis] = AxisLink::default();
    }

    /// Link an unlinked slot directly after `at`
    fn insert_after(&mut self, axis: usize, idx: u32, at: u32) {
        let next = self.slots[at as usize].links[axis].next;
        self.slots[idx as usize].links[axis] = AxisLink {
            prev: Some(at),
            next,
        };
        if let Some(n) = next {
            self.slots[n as usize].links[axis].prev = Some(idx);
        }
        self.slots[at as usize].links[axis].next = Some(idx);
    }

    /// Link an unlinked slot directly before `at`
    fn insert_before(&mut self, axis: usize, idx: u32, at: u32) {
        let prev = self.slots[at as usize].links[axis].prev;
        self.slots[idx as usize].links[axis] = AxisLink {
            prev,
            next: Some(at),
        };
        match prev {
            Some(p) => self.slots[p as usize].links[axis].next = Some(idx),
            None => self.heads[axis] = Some(idx),
        }
        self.slots[at as usize].links[axis].prev = Some(idx);
    }

    /// Link an unlinked slot in sorted position, walking from the head
    ///
    /// Used at creation only; every later reposition is a local walk.
    pub(crate) fn link_sorted(&mut self, axis: usize, idx: u32) {
        let key = self.axis_coord(axis, idx);
        let mut cursor = self.heads[axis];
        let mut tail = None;
        while let Some(c) = cursor {
            if self.axis_coord(axis, c) >= key {
                self.insert_before(axis, idx, c);
                return;
            }
            tail = Some(c);
            cursor = self.slots[c as usize].links[axis].next;
        }
        match tail {
            Some(t) => self.insert_after(axis, idx, t),
            None => self.heads[axis] = Some(idx),
        }
    }

    /// Restore sorted order after `idx`'s coordinate changed by `delta`
    ///
    /// Walks forward for a positive delta until the next neighbor's
    /// coordinate exceeds the new one, backward symmetrically for a
    /// negative delta. A zero delta leaves the sequence untouched.
    pub(crate) fn relocate(&mut self, axis: usize, idx: u32, delta: i32) {
        if delta > 0 {
            let key = self.axis_coord(axis, idx);
            let mut at = idx;
            while let Some(n) = self.slots[at as usize].links[axis].next {
                if self.axis_coord(axis, n) > key {
                    break;
                }
                at = n;
            }
            if at != idx {
                self.unlink(axis, idx);
                self.insert_after(axis, idx, at);
            }
        } else if delta < 0 {
            let key = self.axis_coord(axis, idx);
            let mut at = idx;
            while let Some(p) = self.slots[at as usize].links[axis].prev {
                if self.axis_coord(axis, p) < key {
                    break;
                }
                at = p;
            }
            if at != idx {
                self.unlink(axis, idx);
                self.insert_before(axis, idx, at);
            }
        }
    }
}

#[cfg(test)]
impl<T> AoiWorld<T> {
    /// Axis coordinates in sequence order, for invariant checks
    pub(crate) fn axis_coords_in_order(&self, axis: usize) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = self.heads[axis];
        while let Some(c) = cursor {
            out.push(self.axis_coord(axis, c));
            cursor = self.slots[c as usize].links[axis].next;
        }
        out
    }

    /// Verify both axes are sorted, doubly-linked consistently, and hold
    /// every active entity exactly once
    pub(crate) fn assert_index_consistent(&self) {
        for axis in [AXIS_X, AXIS_Y] {
            let mut count = 0;
            let mut prev: Option<u32> = None;
            let mut cursor = self.heads[axis];
            while let Some(c) = cursor {
                let link = self.slots[c as usize].links[axis];
                assert_eq!(link.prev, prev, "prev link mismatch on axis {axis}");
                if let Some(p) = prev {
                    assert!(
                        self.axis_coord(axis, p) <= self.axis_coord(axis, c),
                        "axis {axis} out of order"
                    );
                }
                count += 1;
                prev = Some(c);
                cursor = link.next;
            }
            assert_eq!(count, self.len(), "axis {axis} entity count");
        }
    }
}
