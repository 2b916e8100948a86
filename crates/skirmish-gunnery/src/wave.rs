//! Bullet waves — expanding virtual-bullet fronts.
//!
//! A wave is created at the instant of firing and swept forward whenever
//! its opponent is sighted again. Sightings are intermittent, so the sweep
//! interpolates the opponent's position tick by tick from the last
//! confirmed anchor; the first tick where the front's radius reaches the
//! interpolated position yields the guess factor that would have hit.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;
use skirmish_core::types::{normalize_relative, Point};

use crate::stats::{factor_to_bin, SegmentKey};

/// Bullet speed for a given power.
pub fn bullet_speed(power: f64) -> f64 {
    BULLET_SPEED_INTERCEPT - BULLET_SPEED_POWER_SLOPE * power
}

/// The outcome of a wave catching up with its opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveImpact {
    /// Normalized offset in [-1, 1], lateral-direction sign applied.
    pub guess_factor: f64,
    /// Histogram bin for the factor.
    pub bin: usize,
}

/// One outgoing shot's expanding front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletWave {
    /// Where the shot was fired from.
    pub origin: Point,
    /// Interpolation anchor: the opponent's position as of `cursor_tick`.
    pub anchor: Point,
    /// Absolute bearing to the opponent at fire time.
    pub bearing: f64,
    pub power: f64,
    pub fire_tick: u64,
    /// Lateral-direction sign (+1 / -1) at fire time.
    pub direction: f64,
    /// Histogram row this wave will update on resolution.
    pub segment: SegmentKey,
    /// Tick the anchor refers to; advances as the wave is swept.
    pub cursor_tick: u64,
}

impl BulletWave {
    pub fn new(
        origin: Point,
        target: Point,
        bearing: f64,
        power: f64,
        fire_tick: u64,
        direction: f64,
        segment: SegmentKey,
    ) -> Self {
        Self {
            origin,
            anchor: target,
            bearing,
            power,
            fire_tick,
            direction,
            segment,
            // Anchor the interpolation at the tick before firing, so the
            // first sweep covers the fire tick itself.
            cursor_tick: fire_tick.saturating_sub(1),
        }
    }

    pub fn speed(&self) -> f64 {
        bullet_speed(self.power)
    }

    /// Widest angle the opponent could displace sideways before the front
    /// arrives. The ratio is clamped before `asin` even though it stays
    /// below 1 for the legal power range.
    pub fn max_escape_angle(&self) -> f64 {
        (MAX_OPPONENT_SPEED / self.speed()).clamp(-1.0, 1.0).asin()
    }

    /// Whether the wave has aged past the resolution window.
    pub fn expired(&self, now: u64) -> bool {
        now.saturating_sub(self.fire_tick) > WAVE_EXPIRY_TICKS
    }

    /// Sweep the front from the cursor to `now`, against the opponent's
    /// newest confirmed position.
    ///
    /// Returns the impact the first time the front's radius reaches the
    /// interpolated opponent position; the caller must then discard the
    /// wave — it resolves at most once. If the front never catches up in
    /// this window the anchor and cursor advance and the wave stays live.
    pub fn sweep(&mut self, latest: Point, now: u64) -> Option<WaveImpact> {
        if now <= self.cursor_tick {
            // Vanishing time delta; nothing to interpolate.
            return None;
        }
        let elapsed = (now - self.cursor_tick) as f64;
        let step_x = (latest.x - self.anchor.x) / elapsed;
        let step_y = (latest.y - self.anchor.y) / elapsed;

        while self.cursor_tick < now {
            let radius = (self.cursor_tick as i64 - self.fire_tick as i64) as f64 * self.speed();
            if radius >= self.origin.distance_to(&self.anchor) {
                let offset =
                    normalize_relative(self.origin.bearing_to(&self.anchor) - self.bearing);
                let guess_factor =
                    (offset / self.max_escape_angle()).clamp(-1.0, 1.0) * self.direction;
                return Some(WaveImpact {
                    guess_factor,
                    bin: factor_to_bin(guess_factor),
                });
            }
            self.cursor_tick += 1;
            self.anchor.x += step_x;
            self.anchor.y += step_y;
        }
        None
    }
}
