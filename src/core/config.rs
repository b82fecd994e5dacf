//! Engine configuration constants
//!
//! All capacities are fixed at compile time; there is no runtime
//! configuration surface.

/// log2 of the pool capacity
pub const POOL_CAPACITY_BITS: u32 = 16;

/// Maximum number of simultaneously active entities
///
/// A power of two, so mapping an id to its slot reduces to a bit mask.
/// Raising this grows the slot arena and the event buffer proportionally.
pub const POOL_CAPACITY: usize = 1 << POOL_CAPACITY_BITS;

/// Mask mapping an entity id to its pool slot index
pub const POOL_MASK: u32 = (POOL_CAPACITY - 1) as u32;

/// Initial capacity of each entity's neighbor snapshot
///
/// Snapshots grow by doubling once a neighborhood outgrows this. 32 covers
/// typical crowd densities without reallocation.
pub const DEFAULT_NEIGHBOR_CAPACITY: usize = 32;
