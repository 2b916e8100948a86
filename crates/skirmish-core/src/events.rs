//! Inputs delivered by the host simulation.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// One radar sighting of an opponent.
///
/// `bearing` is relative to the observer's body heading; `heading` is the
/// opponent's absolute heading. Angles in radians, velocity in units/tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub name: String,
    pub bearing: f64,
    pub distance: f64,
    pub heading: f64,
    pub velocity: f64,
    pub energy: f64,
}

/// The agent's own kinematic state, supplied by the host each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfStatus {
    pub position: Point,
    /// Body heading in radians (0 = north, clockwise).
    pub heading: f64,
    /// Gun heading in radians.
    pub gun_heading: f64,
    /// Radar heading in radians.
    pub radar_heading: f64,
    pub energy: f64,
    /// Opponents still alive in the battle.
    pub opponents_remaining: u32,
    /// Current battle tick.
    pub tick: u64,
}
