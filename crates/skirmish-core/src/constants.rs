//! Agent constants and tuning parameters.

use std::f64::consts::FRAC_PI_3;

// --- Battlefield ---

/// Default battlefield width in units.
pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;

/// Default battlefield height in units.
pub const DEFAULT_FIELD_HEIGHT: f64 = 600.0;

/// Safety margin kept from every wall. Movement destinations are confined
/// to the field inset by this amount.
pub const WALL_MARGIN: f64 = 50.0;

/// Maximum useful scan range in units; distances beyond this land in the
/// last distance segment.
pub const MAX_SCAN_RANGE: f64 = 1200.0;

// --- Ballistics ---

/// Minimum bullet power the agent will select.
pub const MIN_BULLET_POWER: f64 = 1.0;

/// Maximum bullet power the agent will select.
pub const MAX_BULLET_POWER: f64 = 3.0;

/// Bullet speed law: speed = intercept - slope * power.
pub const BULLET_SPEED_INTERCEPT: f64 = 20.0;
pub const BULLET_SPEED_POWER_SLOPE: f64 = 3.0;

/// Top speed an opponent can travel at (units/tick), bounding the escape
/// angle a bullet must cover.
pub const MAX_OPPONENT_SPEED: f64 = 8.0;

/// Duel power law numerator: power = clamp(this / distance, min, max).
pub const POWER_DISTANCE_NUMERATOR: f64 = 600.0;

// --- GuessFactor histograms ---

/// Combat modes segmenting the statistics (melee / duel).
pub const COMBAT_MODE_COUNT: usize = 2;

/// Lateral-velocity segments. The last one is reserved for "not moving".
pub const LATERAL_SEGMENTS: usize = 9;

/// Segment index recorded when the opponent is standing still.
pub const STATIONARY_SEGMENT: usize = LATERAL_SEGMENTS - 1;

/// Lateral speed covered by each moving segment (units/tick).
pub const LATERAL_SPEED_PER_SEGMENT: f64 = 3.0;

/// Distance segments, one per DISTANCE_SEGMENT_SIZE units, clamped.
pub const DISTANCE_SEGMENTS: usize = 13;
pub const DISTANCE_SEGMENT_SIZE: f64 = 100.0;

/// Guess-factor bins spanning the normalized offset range [-1, +1].
pub const GUESS_BINS: usize = 31;

/// The head-on bin; also the tie-break winner when scanning for the best.
pub const MIDDLE_BIN: usize = (GUESS_BINS - 1) / 2;

// --- Waves ---

/// Unresolved waves older than this many ticks are discarded without a
/// histogram update. Far larger than any field-diagonal flight time at the
/// slowest bullet speed, so no resolvable wave is lost.
pub const WAVE_EXPIRY_TICKS: u64 = 300;

// --- Movement: melee risk minimization ---

/// Candidate points sampled per tick.
pub const MELEE_SAMPLE_COUNT: usize = 100;

/// Candidate step length: MELEE_STEP_MIN + U[0, MELEE_STEP_SPAN).
pub const MELEE_STEP_MIN: f64 = 100.0;
pub const MELEE_STEP_SPAN: f64 = 100.0;

/// Flat energy added to every opponent when scoring its threat.
pub const ENERGY_RISK_BASE: f64 = 50.0;

/// Weight of the repulsion from the current and previous own positions.
pub const REVISIT_RISK_WEIGHT: f64 = 0.1;

/// Floor for squared distances in risk terms, keeping coincident points
/// at a large finite risk instead of infinity.
pub const RISK_DISTANCE_SQ_FLOOR: f64 = 1e-9;

// --- Movement: duel dodging ---

/// Candidate step length: DUEL_STEP_MIN + U[0, DUEL_STEP_SPAN).
pub const DUEL_STEP_MIN: f64 = 150.0;
pub const DUEL_STEP_SPAN: f64 = 100.0;

/// Probe angle off the target bearing used to test whether the current
/// dodge direction still has room.
pub const DODGE_PROBE_ANGLE: f64 = FRAC_PI_3;

/// Angular increment when nudging an out-of-bounds candidate back in.
pub const DODGE_NUDGE_STEP: f64 = 0.1;

/// Hard cap on nudge iterations; past a full circle of nudging the
/// candidate is clamped into the field instead.
pub const DODGE_NUDGE_MAX_STEPS: usize = 80;

/// A dodge-direction flip triggers when U[0, hits mod WINDOW) exceeds this.
pub const DODGE_FLIP_THRESHOLD: f64 = 0.6;
pub const DODGE_HIT_WINDOW: u32 = 5;
