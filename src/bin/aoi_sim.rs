//! Headless AOI simulation
//!
//! Random walkers on a bounded field. Each tick every entity either picks a
//! new destination or advances one tick, then scans for visibility changes.
//! Events print as text or JSON lines.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use sightline::index::AoiWorld;
use sightline::scan::EventKind;

#[derive(Parser, Debug)]
#[command(name = "aoi_sim")]
#[command(about = "Random-walker area-of-interest simulation")]
struct Args {
    /// Number of entities
    #[arg(long, default_value_t = 64)]
    entities: usize,

    /// Ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Distance at which entities come into sight
    #[arg(long, default_value_t = 100)]
    enter_radius: u32,

    /// Distance past which entities drop out of sight
    #[arg(long, default_value_t = 130)]
    leave_radius: u32,

    /// Field width
    #[arg(long, default_value_t = 1000)]
    width: i32,

    /// Field height
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON line emitted per event
#[derive(Serialize)]
struct EventLine {
    tick: u32,
    observer: u32,
    subject: u32,
    kind: &'static str,
    distance: f32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    assert!(
        args.leave_radius > args.enter_radius,
        "leave radius must exceed enter radius"
    );
    let json = args.format == "json";

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut world: AoiWorld<()> = AoiWorld::new();
    let mut ids = Vec::with_capacity(args.entities);
    for _ in 0..args.entities {
        let id = world.create(()).expect("pool has room for the demo");
        world.set_speed(id, rng.gen_range(4..14));
        world.teleport(
            id,
            rng.gen_range(0..args.width),
            rng.gen_range(0..args.height),
        );
        ids.push(id);
    }

    if !json {
        println!(
            "aoi_sim: {} entities, {} ticks, enter {} / leave {}, seed {}",
            args.entities, args.ticks, args.enter_radius, args.leave_radius, seed
        );
    }

    let mut enters = 0usize;
    let mut leaves = 0usize;
    for tick in 0..args.ticks {
        for &id in &ids {
            if world.is_moving(id) {
                world.advance(id, 1);
            } else {
                world.move_to(
                    id,
                    rng.gen_range(0..args.width),
                    rng.gen_range(0..args.height),
                );
                continue;
            }

            let origin = world.position_of(id).expect("demo entities stay alive");
            let events = world
                .scan(id, args.enter_radius, args.leave_radius)
                .to_vec();
            for event in events {
                let distance = world
                    .position_of(event.id)
                    .map(|p| origin.distance(&p))
                    .unwrap_or(0.0);
                match event.kind {
                    EventKind::Enter => enters += 1,
                    EventKind::Leave => leaves += 1,
                }
                if json {
                    let line = EventLine {
                        tick,
                        observer: id.0,
                        subject: event.id.0,
                        kind: match event.kind {
                            EventKind::Enter => "enter",
                            EventKind::Leave => "leave",
                        },
                        distance,
                    };
                    println!(
                        "{}",
                        serde_json::to_string(&line).expect("event line serializes")
                    );
                } else {
                    let subject = world.position_of(event.id).unwrap_or_default();
                    println!(
                        "[tick {:>4}] [id {:>3} ({},{})] --> [id {:>3} ({},{})] {} dist {:.0}",
                        tick,
                        id.0,
                        origin.x,
                        origin.y,
                        event.id.0,
                        subject.x,
                        subject.y,
                        match event.kind {
                            EventKind::Enter => "enter",
                            EventKind::Leave => "leave",
                        },
                        distance
                    );
                }
            }
        }
    }

    if !json {
        println!(
            "done: {} enter events, {} leave events across {} ticks",
            enters, leaves, args.ticks
        );
    }
}
