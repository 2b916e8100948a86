//! Aim-solution selection: bullet power, lateral direction, and the
//! best-bin angular offset.

use skirmish_core::constants::*;
use skirmish_core::enums::CombatMode;

use crate::stats::{bin_to_factor, GuessFactorStore, SegmentKey};

/// Bullet power for the current mode and target range.
///
/// Melee always shoots at full power; a duel trades power for bullet speed
/// as the range opens up. Near-zero distances are guarded before the
/// division and yield full power.
pub fn select_power(mode: CombatMode, distance: f64) -> f64 {
    match mode {
        CombatMode::Melee => MAX_BULLET_POWER,
        CombatMode::Duel => {
            if distance <= f64::EPSILON {
                return MAX_BULLET_POWER;
            }
            (POWER_DISTANCE_NUMERATOR / distance).clamp(MIN_BULLET_POWER, MAX_BULLET_POWER)
        }
    }
}

/// Lateral-direction sign of an opponent relative to the line of fire.
///
/// A standstill keeps the prior sign; movement tends to resume in the same
/// direction after a halt.
pub fn lateral_direction(heading: f64, absolute_bearing: f64, velocity: f64, prior: f64) -> f64 {
    if velocity == 0.0 {
        return prior;
    }
    if (heading - absolute_bearing).sin() * velocity < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// A firing solution read out of the statistics store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSolution {
    pub bin: usize,
    pub guess_factor: f64,
    /// Signed angular offset from the absolute bearing to aim at.
    pub offset: f64,
}

/// Pick the most-visited guess factor for the segment and convert it back
/// to an angular offset for the gun.
pub fn solve(
    store: &GuessFactorStore,
    archetype: &str,
    segment: SegmentKey,
    direction: f64,
    max_escape_angle: f64,
) -> AimSolution {
    let bin = store.best_bin(archetype, segment);
    let guess_factor = bin_to_factor(bin);
    AimSolution {
        bin,
        guess_factor,
        offset: direction * guess_factor * max_escape_angle,
    }
}
