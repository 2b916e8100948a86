//! Radar glue — weak target lock.
//!
//! With a live target the radar swings to its last known position; with
//! none it sweeps the full circle until something turns up. Execution is
//! the host's job; this only synthesizes the rotate command.

use std::f64::consts::TAU;

use hecs::{Entity, World};

use skirmish_core::commands::ActuatorCommand;
use skirmish_core::events::SelfStatus;
use skirmish_core::types::{normalize_relative, Point};

pub fn decide(world: &World, status: &SelfStatus, target: Option<Entity>) -> ActuatorCommand {
    let target_position =
        target.and_then(|entity| world.get::<&Point>(entity).ok().map(|position| *position));
    match target_position {
        Some(position) => ActuatorCommand::TurnRadar {
            angle: normalize_relative(
                status.position.bearing_to(&position) - status.radar_heading,
            ),
        },
        None => ActuatorCommand::TurnRadar { angle: TAU },
    }
}
