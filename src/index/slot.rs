//! Pool slot records

use crate::core::types::{EntityId, Point, Speed, Tick};
use crate::scan::snapshot::NeighborSet;

/// Lifecycle tag distinguishing a free pool slot from an occupied one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Free,
    Active,
}

/// Membership links for one axis of the position index, as pool indices
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AxisLink {
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

/// One pool slot: the entity record plus the bookkeeping that threads it
/// through both axis sequences and the snapshot double-buffer
#[derive(Debug)]
pub(crate) struct Slot<T> {
    /// Id this slot was allocated under; lookups compare against it to
    /// reject stale handles after the slot is recycled
    pub id: EntityId,
    pub state: SlotState,
    pub pos: Point,
    pub move_start: Point,
    pub move_dest: Point,
    /// Unit vector toward the destination while a move is scheduled
    pub dir: [f32; 2],
    /// Phase rate of the lateral perturbation, derived from speed and
    /// travel distance
    pub angular_rate: f32,
    pub elapsed: Tick,
    pub remaining: Tick,
    pub speed: Speed,
    /// prev/next per axis (0 = X, 1 = Y)
    pub links: [AxisLink; 2],
    /// Most recent scan result; read back by `neighbors_of`
    pub neighbors: NeighborSet,
    /// Scratch set for the next scan; after the post-scan swap it holds the
    /// superseded snapshot
    pub staging: NeighborSet,
    pub payload: Option<T>,
}

impl<T> Slot<T> {
    /// A free slot with no storage attached
    pub fn vacant() -> Self {
        Self {
            id: EntityId(0),
            state: SlotState::Free,
            pos: Point::default(),
            move_start: Point::default(),
            move_dest: Point::default(),
            dir: [0.0; 2],
            angular_rate: 0.0,
            elapsed: 0,
            remaining: 0,
            speed: 0,
            links: [AxisLink::default(); 2],
            neighbors: NeighborSet::new(),
            staging: NeighborSet::new(),
            payload: None,
        }
    }

    /// Claim the slot for a new entity: fresh record at the origin with
    /// empty snapshots
    pub fn activate(&mut self, id: EntityId, payload: T) {
        self.id = id;
        self.state = SlotState::Active;
        self.pos = Point::default();
        self.move_start = Point::default();
        self.move_dest = Point::default();
        self.dir = [0.0; 2];
        self.angular_rate = 0.0;
        self.elapsed = 0;
        self.remaining = 0;
        self.speed = 0;
        self.links = [AxisLink::default(); 2];
        self.neighbors = NeighborSet::with_default_capacity();
        self.staging = NeighborSet::with_default_capacity();
        self.payload = Some(payload);
    }

    /// Return the slot to Free, releasing snapshot storage and the payload
    pub fn release(&mut self) {
        self.state = SlotState::Free;
        self.links = [AxisLink::default(); 2];
        self.neighbors = NeighborSet::new();
        self.staging = NeighborSet::new();
        self.payload = None;
    }
}
