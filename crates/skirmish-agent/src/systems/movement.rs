//! Movement planning — melee risk minimization and duel dodging.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::ActuatorCommand;
use skirmish_core::components::{ContactInfo, Opponent};
use skirmish_core::constants::*;
use skirmish_core::enums::CombatMode;
use skirmish_core::events::SelfStatus;
use skirmish_core::state::DecisionEvent;
use skirmish_core::types::{normalize_relative, Point, Rect};

/// A destination converted into the host's turn-then-move vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub turn: f64,
    pub distance: f64,
}

/// Smallest-turn steering: when facing the destination needs more than a
/// quarter turn, flip the heading target by half a turn and drive in
/// reverse instead.
pub fn steer(position: Point, heading: f64, destination: Point) -> Steering {
    let mut turn = normalize_relative(position.bearing_to(&destination) - heading);
    let mut distance = position.distance_to(&destination);
    if turn.abs() > FRAC_PI_2 {
        turn = normalize_relative(turn + PI);
        distance = -distance;
    }
    Steering { turn, distance }
}

/// Antigravity risk of standing at `point`: every opponent repels in
/// proportion to its energy, and the agent's own recent positions repel
/// weakly to keep it from camping. Squared distances are floored so
/// coincident points score a large finite risk.
pub fn risk_at(world: &World, point: Point, previous: Point, current: Point) -> f64 {
    let mut risk = 0.0;
    for (_entity, (_opponent, contact, position)) in
        world.query::<(&Opponent, &ContactInfo, &Point)>().iter()
    {
        risk += (contact.energy + ENERGY_RISK_BASE)
            / point.distance_sq_to(position).max(RISK_DISTANCE_SQ_FLOOR);
    }
    risk += REVISIT_RISK_WEIGHT / point.distance_sq_to(&previous).max(RISK_DISTANCE_SQ_FLOOR);
    risk += REVISIT_RISK_WEIGHT / point.distance_sq_to(&current).max(RISK_DISTANCE_SQ_FLOOR);
    risk
}

/// Choose the next destination and emit the turn/move pair. No commands
/// are issued while no target is known — the agent keeps scanning instead.
#[allow(clippy::too_many_arguments)]
pub fn decide(
    world: &World,
    rng: &mut ChaCha8Rng,
    status: &SelfStatus,
    target: Option<Entity>,
    playable: &Rect,
    destination: &mut Option<Point>,
    prev_position: &mut Point,
    dodge_direction: &mut f64,
    hits_taken: u32,
    events: &mut Vec<DecisionEvent>,
) -> Vec<ActuatorCommand> {
    let Some(target_position) = target.and_then(|entity| {
        world.get::<&Point>(entity).ok().map(|position| *position)
    }) else {
        return Vec::new();
    };

    let here = status.position;
    let next = match CombatMode::from_opponent_count(status.opponents_remaining) {
        CombatMode::Melee => {
            melee_destination(world, rng, here, playable, destination, prev_position)
        }
        CombatMode::Duel => duel_destination(
            rng,
            here,
            target_position,
            playable,
            dodge_direction,
            hits_taken,
            events,
        ),
    };
    *destination = Some(next);

    let steering = steer(here, status.heading, next);
    *prev_position = here;
    vec![
        ActuatorCommand::Turn {
            angle: steering.turn,
        },
        ActuatorCommand::Move {
            distance: steering.distance,
        },
    ]
}

/// Melee: sample candidate points around the agent and keep the lowest
/// risk one. The carried destination competes too, so standing by the
/// previous choice is possible when nothing sampled beats it.
fn melee_destination(
    world: &World,
    rng: &mut ChaCha8Rng,
    here: Point,
    playable: &Rect,
    destination: &mut Option<Point>,
    prev_position: &mut Point,
) -> Point {
    if destination.is_none() {
        *destination = Some(here);
        *prev_position = here;
    }
    let mut best = destination.unwrap_or(here);
    let mut best_risk = risk_at(world, best, *prev_position, here);

    for _ in 0..MELEE_SAMPLE_COUNT {
        let step = MELEE_STEP_MIN + rng.gen::<f64>() * MELEE_STEP_SPAN;
        let angle = rng.gen::<f64>() * TAU;
        let candidate = here.project(angle, step);
        if !playable.contains(candidate) {
            continue;
        }
        let risk = risk_at(world, candidate, *prev_position, here);
        if risk < best_risk {
            best = candidate;
            best_risk = risk;
        }
    }
    best
}

/// Duel: stay perpendicular to the target, flipping sides when the
/// current side runs out of room or pseudo-randomly as hits accumulate.
fn duel_destination(
    rng: &mut ChaCha8Rng,
    here: Point,
    target_position: Point,
    playable: &Rect,
    dodge_direction: &mut f64,
    hits_taken: u32,
    events: &mut Vec<DecisionEvent>,
) -> Point {
    let step = DUEL_STEP_MIN + rng.gen::<f64>() * DUEL_STEP_SPAN;
    let bearing = here.bearing_to(&target_position);

    let probe = here.project(bearing + DODGE_PROBE_ANGLE * *dodge_direction, step);
    let random_flip =
        rng.gen::<f64>() * f64::from(hits_taken % DODGE_HIT_WINDOW) > DODGE_FLIP_THRESHOLD;
    if !playable.contains(probe) || random_flip {
        *dodge_direction = -*dodge_direction;
        events.push(DecisionEvent::DodgeFlipped {
            direction: *dodge_direction,
        });
    }

    // Start perpendicular and nudge back toward the target bearing until
    // the candidate is inside the field. Bounded: float drift must not be
    // able to spin this forever.
    let mut angle = bearing + FRAC_PI_2 * *dodge_direction;
    let mut candidate = here.project(angle, step);
    let mut nudges = 0;
    while !playable.contains(candidate) && nudges < DODGE_NUDGE_MAX_STEPS {
        angle -= *dodge_direction * DODGE_NUDGE_STEP;
        candidate = here.project(angle, step);
        nudges += 1;
    }
    if !playable.contains(candidate) {
        candidate = playable.clamp(candidate);
    }
    candidate
}
