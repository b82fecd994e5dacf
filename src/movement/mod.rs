//! Tick-based movement
//!
//! A scheduled move converts a destination and a speed into a duration in
//! whole ticks. Advancing combines linear progress along the direction
//! vector with a sin² lateral perturbation, bending the path into a shallow
//! arc rather than a perfectly straight line. Every position change feeds
//! the axis sequences the true coordinate delta, so the index stays sorted
//! even when the perturbation momentarily runs against the overall
//! direction of travel.

use std::f32::consts::PI;

use crate::core::types::{EntityId, Point, Speed, Tick};
use crate::index::{AoiWorld, AXIS_X, AXIS_Y};

impl<T> AoiWorld<T> {
    /// Set the position immediately
    ///
    /// Cancels any in-flight scheduled move: a later [`advance`] will not
    /// drag the entity back onto the old path.
    ///
    /// [`advance`]: AoiWorld::advance
    pub fn teleport(&mut self, id: EntityId, x: i32, y: i32) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let slot = &mut self.slots[idx as usize];
        let dx = x - slot.pos.x;
        let dy = y - slot.pos.y;
        slot.pos = Point::new(x, y);
        slot.remaining = 0;
        slot.elapsed = 0;
        self.relocate(AXIS_X, idx, dx);
        self.relocate(AXIS_Y, idx, dy);
    }

    /// Schedule a move toward `(x, y)` at the entity's current speed
    ///
    /// Does nothing while the speed is 0 or the destination equals the
    /// current position. A destination closer than one tick of travel also
    /// does nothing: the duration rounds down to zero ticks and the entity
    /// stays put, so callers polling [`is_moving`] issue a fresh order.
    ///
    /// [`is_moving`]: AoiWorld::is_moving
    pub fn move_to(&mut self, id: EntityId, x: i32, y: i32) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let slot = &mut self.slots[idx as usize];
        if slot.speed == 0 || (slot.pos.x == x && slot.pos.y == y) {
            return;
        }
        let dx = (x - slot.pos.x) as f32;
        let dy = (y - slot.pos.y) as f32;
        let distance = (dx * dx + dy * dy).sqrt();
        slot.move_start = slot.pos;
        slot.move_dest = Point::new(x, y);
        slot.dir = [dx / distance, dy / distance];
        slot.angular_rate = PI * slot.speed as f32 / distance;
        slot.remaining = distance as Tick / slot.speed;
        slot.elapsed = 0;
    }

    /// Update the entity's speed
    ///
    /// If a move is in flight it is recomputed toward the same destination
    /// from the current position, so the path stays continuous. Setting the
    /// speed to 0 mid-move freezes it: [`advance`] does nothing until a new
    /// speed or a teleport arrives.
    ///
    /// [`advance`]: AoiWorld::advance
    pub fn set_speed(&mut self, id: EntityId, speed: Speed) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let slot = &mut self.slots[idx as usize];
        slot.speed = speed;
        if slot.remaining > 0 {
            let dest = slot.move_dest;
            self.move_to(id, dest.x, dest.y);
        }
    }

    /// Advance a scheduled move by `ticks` elapsed ticks
    ///
    /// Clamps to the remaining duration; when the duration is exhausted the
    /// position snaps exactly to the destination. No-op while the entity is
    /// not moving or its speed is 0.
    pub fn advance(&mut self, id: EntityId, ticks: Tick) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let slot = &mut self.slots[idx as usize];
        if slot.speed == 0 || slot.remaining == 0 {
            return;
        }
        let step = ticks.min(slot.remaining);
        slot.remaining -= step;
        slot.elapsed += step;
        let before = slot.pos;
        if slot.remaining == 0 {
            slot.pos = slot.move_dest;
        } else {
            slot.pos = interpolate(
                slot.move_start,
                slot.dir,
                slot.speed,
                slot.angular_rate,
                slot.elapsed,
            );
        }
        let dx = slot.pos.x - before.x;
        let dy = slot.pos.y - before.y;
        self.relocate(AXIS_X, idx, dx);
        self.relocate(AXIS_Y, idx, dy);
    }

    /// Current position, or None for a stale id
    pub fn position_of(&self, id: EntityId) -> Option<Point> {
        let idx = self.index_of(id)?;
        Some(self.slots[idx as usize].pos)
    }

    /// True while a scheduled move has ticks remaining; false for a stale id
    pub fn is_moving(&self, id: EntityId) -> bool {
        self.index_of(id)
            .map(|idx| self.slots[idx as usize].remaining > 0)
            .unwrap_or(false)
    }
}

/// Interpolated position `elapsed` ticks into a move
///
/// Linear progress along the unit direction plus a sin² lateral term whose
/// amplitude follows the direction components: X is pushed against its
/// component, Y with it.
fn interpolate(
    start: Point,
    dir: [f32; 2],
    speed: Speed,
    angular_rate: f32,
    elapsed: Tick,
) -> Point {
    let t = elapsed as f32;
    let s = (angular_rate * t).sin().powi(2);
    Point::new(
        (start.x as f32 + dir[0] * speed as f32 * t - dir[0] * s) as i32,
        (start.y as f32 + dir[1] * speed as f32 * t + dir[1] * s) as i32,
    )
}
