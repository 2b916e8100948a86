//! Scripted opponent movement profiles.

use skirmish_core::types::{Point, Rect};

/// Linear speed of the orbit and charge scripts (units/tick).
const SCRIPT_SPEED: f64 = 8.0;

/// How close a charger will approach before holding position.
const CHARGE_STANDOFF: f64 = 60.0;

/// Deterministic movement scripts for arena opponents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementScript {
    /// Holds position for the whole round.
    Sentry,
    /// Circles the field center at a fixed radius.
    Orbiter { radius: f64 },
    /// Drives straight at the agent, stopping at a standoff range.
    Charger,
}

impl MovementScript {
    /// Next position for an opponent running this script.
    pub fn step(&self, current: Point, tick: u64, agent_position: Point, field: &Rect) -> Point {
        let next = match self {
            MovementScript::Sentry => current,
            MovementScript::Orbiter { radius } => {
                let center = Point::new(
                    field.x + field.width / 2.0,
                    field.y + field.height / 2.0,
                );
                // Constant angular rate chosen so the rim speed matches
                // the script speed.
                let angular_rate = SCRIPT_SPEED / radius.max(1.0);
                center.project(angular_rate * tick as f64, *radius)
            }
            MovementScript::Charger => {
                let range = current.distance_to(&agent_position);
                if range <= CHARGE_STANDOFF {
                    current
                } else {
                    let advance = SCRIPT_SPEED.min(range - CHARGE_STANDOFF);
                    current.project(current.bearing_to(&agent_position), advance)
                }
            }
        };
        field.clamp(next)
    }
}
