//! Opponent tracking — observation intake and target selection.

use hecs::{Entity, World};

use skirmish_core::components::{ContactInfo, Opponent};
use skirmish_core::events::{Observation, SelfStatus};
use skirmish_core::types::Point;
use skirmish_gunnery::stats::GuessFactorStore;

/// Fold one sighting into the world: the opponent's record is created on
/// first contact and overwritten wholesale afterwards. Returns the entity
/// and the opponent's newly computed absolute position.
pub fn observe(world: &mut World, status: &SelfStatus, observation: &Observation) -> (Entity, Point) {
    let position = status
        .position
        .project(status.heading + observation.bearing, observation.distance);
    let contact = ContactInfo {
        name: observation.name.clone(),
        archetype: GuessFactorStore::archetype_key(&observation.name).to_string(),
        bearing: observation.bearing,
        heading: observation.heading,
        velocity: observation.velocity,
        energy: observation.energy,
        last_seen_tick: status.tick,
    };

    let mut existing = None;
    for (entity, (_opponent, info)) in world.query_mut::<(&Opponent, &ContactInfo)>() {
        if info.name == observation.name {
            existing = Some(entity);
            break;
        }
    }

    let entity = match existing {
        Some(entity) => {
            if let Ok(mut info) = world.get::<&mut ContactInfo>(entity) {
                *info = contact;
            }
            if let Ok(mut point) = world.get::<&mut Point>(entity) {
                *point = position;
            }
            entity
        }
        None => world.spawn((Opponent, contact, position)),
    };
    (entity, position)
}

/// Target selection: keep the current target unless there is none, the
/// sighting *is* the target, or the sighting is strictly closer.
///
/// Re-selecting the same opponent on every sighting — even when another
/// known opponent is nearer — makes the lock sticky but distance-
/// correcting rather than pure nearest-neighbor.
pub fn select_target(
    world: &World,
    current: Option<Entity>,
    observed: Entity,
    observed_distance: f64,
    self_position: Point,
) -> Option<Entity> {
    match current {
        None => Some(observed),
        Some(target) if target == observed => Some(observed),
        Some(target) => match world.get::<&Point>(target) {
            Ok(position) if observed_distance < self_position.distance_to(&position) => {
                Some(observed)
            }
            Ok(_) => Some(target),
            // The stored target died between callbacks; take the sighting.
            Err(_) => Some(observed),
        },
    }
}
