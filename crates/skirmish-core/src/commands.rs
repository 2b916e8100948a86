//! Actuator commands issued to the host simulation.
//!
//! All commands are fire-and-forget: the host executes them before the
//! next tick's callbacks. Angles are relative, in radians; distances are
//! signed (negative = reverse).

use serde::{Deserialize, Serialize};

/// One instruction for the host's actuators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActuatorCommand {
    /// Rotate the radar by a relative angle.
    TurnRadar { angle: f64 },
    /// Rotate the gun by a relative angle.
    TurnGun { angle: f64 },
    /// Fire a shot at the given power.
    Fire { power: f64 },
    /// Rotate the body by a relative angle.
    Turn { angle: f64 },
    /// Travel a signed distance along the current heading.
    Move { distance: f64 },
}
