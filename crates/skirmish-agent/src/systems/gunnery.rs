//! The per-sighting targeting decision.
//!
//! Every sighting spawns a wave (the statistics learn from every opponent,
//! targeted or not); the gun only follows and fires when the sighting is
//! the current target and the shot cannot exhaust the agent's own energy.

use hecs::{Entity, World};

use skirmish_core::commands::ActuatorCommand;
use skirmish_core::components::WaveOwner;
use skirmish_core::enums::CombatMode;
use skirmish_core::events::{Observation, SelfStatus};
use skirmish_core::state::DecisionEvent;
use skirmish_core::types::{normalize_relative, Point};
use skirmish_gunnery::aim;
use skirmish_gunnery::stats::{distance_segment, lateral_segment, GuessFactorStore, SegmentKey};
use skirmish_gunnery::wave::BulletWave;

use crate::systems::waves;

/// Run the targeting decision for one sighting. Returns the gun/fire
/// command pair when firing conditions hold, empty otherwise.
#[allow(clippy::too_many_arguments)]
pub fn decide(
    world: &mut World,
    stats: &GuessFactorStore,
    status: &SelfStatus,
    target: Option<Entity>,
    scanned: Entity,
    opponent_position: Point,
    observation: &Observation,
    fire_direction: &mut f64,
    events: &mut Vec<DecisionEvent>,
) -> Vec<ActuatorCommand> {
    let mode = CombatMode::from_opponent_count(status.opponents_remaining);
    let power = aim::select_power(mode, observation.distance);
    let absolute_bearing = status.heading + observation.bearing;

    *fire_direction = aim::lateral_direction(
        observation.heading,
        absolute_bearing,
        observation.velocity,
        *fire_direction,
    );

    let segment = SegmentKey {
        mode,
        lateral: lateral_segment(observation.heading, absolute_bearing, observation.velocity),
        distance: distance_segment(observation.distance),
    };
    let archetype = GuessFactorStore::archetype_key(&observation.name).to_string();

    let wave = BulletWave::new(
        status.position,
        opponent_position,
        absolute_bearing,
        power,
        status.tick,
        *fire_direction,
        segment,
    );
    let max_escape_angle = wave.max_escape_angle();
    waves::spawn(
        world,
        WaveOwner {
            name: observation.name.clone(),
            archetype: archetype.clone(),
        },
        wave,
    );

    let mut commands = Vec::new();
    // Fire only at the target, and never with the agent's last reserves:
    // power strictly below energy keeps self-exhaustion impossible.
    if target == Some(scanned) && power < status.energy {
        let solution = aim::solve(stats, &archetype, segment, *fire_direction, max_escape_angle);
        let gun_turn = normalize_relative(absolute_bearing + solution.offset - status.gun_heading);
        commands.push(ActuatorCommand::TurnGun { angle: gun_turn });
        commands.push(ActuatorCommand::Fire { power });
        events.push(DecisionEvent::Fired {
            power,
            bin: solution.bin,
            offset: solution.offset,
        });
    }
    commands
}
