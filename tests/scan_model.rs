//! Model-based scan tests
//!
//! Compares the engine's scan output against a brute-force O(n²) model:
//! every pair's squared distance is classified against both radii, with the
//! hysteresis band resolved from the model's own previous snapshot. The
//! engine's axis-pruned walk must produce identical events and snapshots
//! under arbitrary teleport interleavings.

use ahash::{AHashMap, AHashSet};
use proptest::prelude::*;
use sightline::core::types::EntityId;
use sightline::index::AoiWorld;
use sightline::scan::EventKind;

const ENTER: u32 = 100;
const LEAVE: u32 = 130;

/// Brute-force neighbor set for one observer from current positions and the
/// model's previous snapshot
fn model_fresh(
    positions: &AHashMap<EntityId, (i32, i32)>,
    observer: EntityId,
    previous: &AHashSet<EntityId>,
) -> AHashSet<EntityId> {
    let (ox, oy) = positions[&observer];
    let enter_sq = i64::from(ENTER) * i64::from(ENTER);
    let leave_sq = i64::from(LEAVE) * i64::from(LEAVE);
    positions
        .iter()
        .filter(|(id, _)| **id != observer)
        .filter(|(id, (x, y))| {
            let dx = i64::from(ox) - i64::from(*x);
            let dy = i64::from(oy) - i64::from(*y);
            let d2 = dx * dx + dy * dy;
            d2 <= enter_sq || (d2 <= leave_sq && previous.contains(id))
        })
        .map(|(id, _)| *id)
        .collect()
}

/// Scan one observer in the engine and check events and snapshot against
/// the model, then advance the model's snapshot
fn scan_and_check(
    world: &mut AoiWorld<()>,
    positions: &AHashMap<EntityId, (i32, i32)>,
    snapshots: &mut AHashMap<EntityId, AHashSet<EntityId>>,
    observer: EntityId,
) {
    let previous = snapshots.entry(observer).or_default().clone();
    let fresh = model_fresh(positions, observer, &previous);

    let mut expected: Vec<(EntityId, EventKind)> = fresh
        .difference(&previous)
        .map(|id| (*id, EventKind::Enter))
        .chain(
            previous
                .difference(&fresh)
                .map(|id| (*id, EventKind::Leave)),
        )
        .collect();
    expected.sort_by_key(|(id, _)| *id);

    let mut actual: Vec<(EntityId, EventKind)> = world
        .scan(observer, ENTER, LEAVE)
        .iter()
        .map(|event| (event.id, event.kind))
        .collect();
    actual.sort_by_key(|(id, _)| *id);
    assert_eq!(actual, expected, "events diverge for {observer:?}");

    let mut expected_snapshot: Vec<EntityId> = fresh.iter().copied().collect();
    expected_snapshot.sort();
    assert_eq!(
        world.neighbors_of(observer, usize::MAX),
        expected_snapshot.as_slice(),
        "snapshot diverges for {observer:?}"
    );

    snapshots.insert(observer, fresh);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scan_matches_brute_force_model(
        spawns in prop::collection::vec((-250i32..250, -250i32..250), 2..20),
        jumps in prop::collection::vec((0usize..20, -250i32..250, -250i32..250), 0..60),
    ) {
        let mut world: AoiWorld<()> = AoiWorld::new();
        let mut positions: AHashMap<EntityId, (i32, i32)> = AHashMap::new();
        let mut snapshots: AHashMap<EntityId, AHashSet<EntityId>> = AHashMap::new();

        let mut ids = Vec::new();
        for (x, y) in spawns {
            let id = world.create(()).unwrap();
            world.teleport(id, x, y);
            positions.insert(id, (x, y));
            ids.push(id);
        }
        for &id in &ids {
            scan_and_check(&mut world, &positions, &mut snapshots, id);
        }

        for (pick, x, y) in jumps {
            let moved = ids[pick % ids.len()];
            world.teleport(moved, x, y);
            positions.insert(moved, (x, y));
            // the mover and one bystander both rescan
            scan_and_check(&mut world, &positions, &mut snapshots, moved);
            let bystander = ids[(pick + 1) % ids.len()];
            scan_and_check(&mut world, &positions, &mut snapshots, bystander);
        }
    }

    #[test]
    fn destroyed_entities_never_emit_leave(
        spawns in prop::collection::vec((-150i32..150, -150i32..150), 3..12),
        victim in any::<prop::sample::Index>(),
    ) {
        let mut world: AoiWorld<()> = AoiWorld::new();
        let mut ids = Vec::new();
        for (x, y) in spawns {
            let id = world.create(()).unwrap();
            world.teleport(id, x, y);
            ids.push(id);
        }
        for &id in &ids {
            world.scan(id, ENTER, LEAVE);
        }

        let gone = ids[victim.index(ids.len())];
        world.destroy(gone);

        for &id in &ids {
            if id == gone {
                continue;
            }
            for event in world.scan(id, ENTER, LEAVE) {
                assert_ne!(event.id, gone, "destroyed entity produced an event");
            }
        }
    }
}
