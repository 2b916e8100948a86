//! Agent state snapshot — a serializable view of the decision core,
//! emitted for telemetry and consumed by the harness and tests.

use serde::{Deserialize, Serialize};

use crate::enums::CombatMode;
use crate::types::Point;

/// Notable decisions taken since the last snapshot drain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionEvent {
    /// The target changed to a new opponent.
    TargetAcquired { name: String },
    /// The current target was eliminated.
    TargetLost { name: String },
    /// A wave caught up with its opponent and updated the statistics.
    WaveResolved {
        archetype: String,
        bin: usize,
        guess_factor: f64,
    },
    /// A wave aged out without resolving.
    WaveExpired { fire_tick: u64 },
    /// A shot was taken.
    Fired { power: f64, bin: usize, offset: f64 },
    /// The duel dodge direction reversed.
    DodgeFlipped { direction: f64 },
}

/// One tracked opponent, as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactView {
    pub name: String,
    pub archetype: String,
    pub position: Point,
    pub energy: f64,
    /// Range from the agent at snapshot time.
    pub distance: f64,
}

/// Complete visible state of the decision core at one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub tick: u64,
    pub mode: CombatMode,
    pub target: Option<String>,
    pub contacts: Vec<ContactView>,
    /// Waves still in flight.
    pub live_waves: usize,
    /// Movement destination, if one has been chosen.
    pub destination: Option<Point>,
    pub hits_taken: u32,
    /// Events since the previous snapshot (drained on build).
    pub events: Vec<DecisionEvent>,
}
