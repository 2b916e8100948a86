//! Demo battle driver — runs a short session and emits JSON telemetry
//! lines: periodic agent snapshots and a report per round.

use skirmish_harness::{Arena, ArenaConfig, MovementScript};

/// Snapshot emission cadence in ticks.
const SNAPSHOT_INTERVAL: u64 = 25;

fn main() {
    let roster = vec![
        ("Sentry".to_string(), MovementScript::Sentry),
        ("Orbiter".to_string(), MovementScript::Orbiter { radius: 200.0 }),
        ("Charger".to_string(), MovementScript::Charger),
    ];
    let mut arena = Arena::new(ArenaConfig::default(), roster);

    for round in 1..=3 {
        if round > 1 {
            arena.start_round();
        }
        while !arena.round_over() {
            arena.step();
            if arena.tick() % SNAPSHOT_INTERVAL == 0 {
                let snapshot = arena.snapshot();
                let line =
                    serde_json::to_string(&snapshot).expect("snapshot serializes to JSON");
                println!("{line}");
            }
        }
        let report = arena.report();
        let line = serde_json::to_string(&report).expect("report serializes to JSON");
        println!("{line}");
    }

    let learned = arena.agent().stats().total();
    println!("{{\"session_waves_learned\":{learned}}}");
}
