//! ECS components for opponent and wave entities.
//!
//! Components are plain data structs with no methods; decision logic lives
//! in the agent's systems. `Point` doubles as the position component.

use serde::{Deserialize, Serialize};

/// Marks an entity as a tracked opponent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Opponent;

/// Last known state of one opponent, overwritten on every sighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full instance name as reported by the host, e.g. "Crusher (2)".
    pub name: String,
    /// Name with the instance suffix stripped; pools statistics across
    /// opponents driven by the same program.
    pub archetype: String,
    /// Relative bearing at the last sighting (radians).
    pub bearing: f64,
    /// Absolute heading at the last sighting (radians).
    pub heading: f64,
    /// Speed along the heading at the last sighting (units/tick).
    pub velocity: f64,
    pub energy: f64,
    pub last_seen_tick: u64,
}

/// Ties a bullet wave to the opponent it was fired at.
///
/// Ownership is by name, not entity handle, so in-flight waves survive the
/// opponent's elimination and keep resolving against their frozen anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveOwner {
    pub name: String,
    pub archetype: String,
}
