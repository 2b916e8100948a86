//! Wave bookkeeping — sweeping, resolution recording, and expiry.
//!
//! Waves are entities in the same world as the opponents they chase, tied
//! to them by name via `WaveOwner`. Resolution and expiry both use the
//! two-phase pattern: mark into the despawn buffer while iterating, then
//! remove after the query borrow ends.

use hecs::{Entity, World};

use skirmish_core::components::WaveOwner;
use skirmish_core::state::DecisionEvent;
use skirmish_core::types::Point;
use skirmish_gunnery::stats::GuessFactorStore;
use skirmish_gunnery::wave::BulletWave;

/// Spawn a new wave entity.
pub fn spawn(world: &mut World, owner: WaveOwner, wave: BulletWave) -> Entity {
    world.spawn((owner, wave))
}

/// Sweep every wave chasing `name` against the opponent's newest
/// confirmed position. A wave that catches up increments its histogram
/// row exactly once and is removed immediately.
pub fn sweep(
    world: &mut World,
    stats: &mut GuessFactorStore,
    name: &str,
    latest: Point,
    now: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<DecisionEvent>,
) {
    for (entity, (owner, wave)) in world.query_mut::<(&WaveOwner, &mut BulletWave)>() {
        if owner.name != name {
            continue;
        }
        if let Some(impact) = wave.sweep(latest, now) {
            stats.record(&owner.archetype, wave.segment, impact.bin);
            events.push(DecisionEvent::WaveResolved {
                archetype: owner.archetype.clone(),
                bin: impact.bin,
                guess_factor: impact.guess_factor,
            });
            despawn_buffer.push(entity);
        }
    }
    flush(world, despawn_buffer);
}

/// Remove waves that aged out without resolving (their opponent was never
/// sighted again, or died with the front still short).
pub fn expire(
    world: &mut World,
    now: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<DecisionEvent>,
) {
    for (entity, (_owner, wave)) in world.query_mut::<(&WaveOwner, &BulletWave)>() {
        if wave.expired(now) {
            events.push(DecisionEvent::WaveExpired {
                fire_tick: wave.fire_tick,
            });
            despawn_buffer.push(entity);
        }
    }
    flush(world, despawn_buffer);
}

fn flush(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
