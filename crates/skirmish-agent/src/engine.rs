//! The combat agent engine.
//!
//! `CombatAgent` holds everything the decision core accumulates: the hecs
//! world (opponent records + in-flight waves), the statistics store, the
//! RNG, and the movement/gunnery direction state. Host callbacks arrive
//! through the `on_*` methods; `decide_movement` and `decide_radar` are
//! independently callable from the driver loop.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::ActuatorCommand;
use skirmish_core::components::{ContactInfo, Opponent, WaveOwner};
use skirmish_core::constants::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, WALL_MARGIN};
use skirmish_core::enums::CombatMode;
use skirmish_core::events::{Observation, SelfStatus};
use skirmish_core::state::{AgentSnapshot, ContactView, DecisionEvent};
use skirmish_core::types::{Point, Rect};
use skirmish_gunnery::stats::GuessFactorStore;
use skirmish_gunnery::wave::BulletWave;

use crate::systems;

/// Configuration for one battle session.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// RNG seed for determinism. Same seed + same events = same decisions.
    pub seed: u64,
    pub field_width: f64,
    pub field_height: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// The decision core. Owns all per-session and per-round agent state.
pub struct CombatAgent {
    world: World,
    stats: GuessFactorStore,
    rng: ChaCha8Rng,
    status: SelfStatus,
    /// Own position as of the previous movement decision.
    prev_position: Point,
    target: Option<hecs::Entity>,
    /// Carried melee destination; also reported in snapshots.
    destination: Option<Point>,
    /// Lateral-direction sign used when firing, retained across halts.
    fire_direction: f64,
    /// Perpendicular dodge direction for duels.
    dodge_direction: f64,
    /// Bullets taken in duel mode; scales the dodge-flip probability.
    hits_taken: u32,
    /// Battlefield inset by the wall margin.
    playable: Rect,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<DecisionEvent>,
}

impl CombatAgent {
    /// Create an agent for a new session. The statistics store starts
    /// empty and lives until the agent is dropped.
    pub fn new(config: &AgentConfig) -> Self {
        let field = Rect::new(0.0, 0.0, config.field_width, config.field_height);
        Self {
            world: World::new(),
            stats: GuessFactorStore::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            status: SelfStatus::default(),
            prev_position: Point::default(),
            target: None,
            destination: None,
            fire_direction: 1.0,
            dodge_direction: 1.0,
            hits_taken: 0,
            playable: field.inset(WALL_MARGIN),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Reset per-round state at a round boundary. The statistics store
    /// and RNG stream carry over; everything else starts fresh.
    pub fn begin_round(&mut self) {
        self.world.clear();
        self.target = None;
        self.destination = None;
        self.fire_direction = 1.0;
        self.dodge_direction = 1.0;
        self.hits_taken = 0;
        self.prev_position = Point::default();
        self.despawn_buffer.clear();
        self.events.clear();
    }

    /// Ingest the host's per-tick kinematics report. Also ages out waves
    /// whose opponent was never sighted again.
    pub fn update_status(&mut self, status: SelfStatus) {
        self.status = status;
        systems::waves::expire(
            &mut self.world,
            status.tick,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }

    /// Handle one radar sighting: update the opponent record, re-run
    /// target selection, sweep that opponent's waves, and run the
    /// targeting decision. Returns gun/fire commands when firing
    /// conditions hold.
    pub fn on_scan(&mut self, observation: &Observation) -> Vec<ActuatorCommand> {
        let (entity, position) =
            systems::tracking::observe(&mut self.world, &self.status, observation);

        let new_target = systems::tracking::select_target(
            &self.world,
            self.target,
            entity,
            observation.distance,
            self.status.position,
        );
        if new_target != self.target {
            self.target = new_target;
            self.events.push(DecisionEvent::TargetAcquired {
                name: observation.name.clone(),
            });
        }

        systems::waves::sweep(
            &mut self.world,
            &mut self.stats,
            &observation.name,
            position,
            self.status.tick,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        systems::gunnery::decide(
            &mut self.world,
            &self.stats,
            &self.status,
            self.target,
            entity,
            position,
            observation,
            &mut self.fire_direction,
            &mut self.events,
        )
    }

    /// Handle an elimination report: drop the record, clear the target if
    /// it was the victim. In-flight waves are left to resolve or expire.
    pub fn on_opponent_destroyed(&mut self, name: &str) {
        let mut victim = None;
        for (entity, (_opponent, contact)) in
            self.world.query_mut::<(&Opponent, &ContactInfo)>()
        {
            if contact.name == name {
                victim = Some(entity);
                break;
            }
        }
        if let Some(entity) = victim {
            let _ = self.world.despawn(entity);
            if self.target == Some(entity) {
                self.target = None;
                self.events.push(DecisionEvent::TargetLost {
                    name: name.to_string(),
                });
            }
        }
    }

    /// Handle taking a bullet. Only duel-mode hits feed the dodge
    /// randomization; melee movement ignores them.
    pub fn on_hit_by_bullet(&mut self) {
        if CombatMode::from_opponent_count(self.status.opponents_remaining) == CombatMode::Duel {
            self.hits_taken += 1;
        }
    }

    /// A short cosmetic flourish after winning the round.
    pub fn on_victory(&self) -> Vec<ActuatorCommand> {
        let wiggle = std::f64::consts::PI / 6.0;
        vec![
            ActuatorCommand::Turn { angle: wiggle / 2.0 },
            ActuatorCommand::Turn { angle: -wiggle },
            ActuatorCommand::Turn { angle: wiggle },
            ActuatorCommand::Turn { angle: -wiggle },
            ActuatorCommand::Turn { angle: wiggle / 2.0 },
        ]
    }

    /// Choose the next destination and emit the turn/move command pair.
    /// Does nothing while no target is known.
    pub fn decide_movement(&mut self) -> Vec<ActuatorCommand> {
        systems::movement::decide(
            &self.world,
            &mut self.rng,
            &self.status,
            self.target,
            &self.playable,
            &mut self.destination,
            &mut self.prev_position,
            &mut self.dodge_direction,
            self.hits_taken,
            &mut self.events,
        )
    }

    /// Radar glue: keep a weak lock on the target, or sweep the full
    /// circle while no target is known.
    pub fn decide_radar(&self) -> ActuatorCommand {
        systems::radar::decide(&self.world, &self.status, self.target)
    }

    /// Build a snapshot of the decision core, draining buffered events.
    pub fn snapshot(&mut self) -> AgentSnapshot {
        let contacts = {
            let mut query = self.world.query::<(&Opponent, &ContactInfo, &Point)>();
            let mut contacts: Vec<ContactView> = query
                .iter()
                .map(|(_entity, (_opponent, contact, position))| ContactView {
                    name: contact.name.clone(),
                    archetype: contact.archetype.clone(),
                    position: *position,
                    energy: contact.energy,
                    distance: self.status.position.distance_to(position),
                })
                .collect();
            contacts.sort_by(|a, b| a.name.cmp(&b.name));
            contacts
        };
        let live_waves = self
            .world
            .query::<(&WaveOwner, &BulletWave)>()
            .iter()
            .count();
        AgentSnapshot {
            tick: self.status.tick,
            mode: CombatMode::from_opponent_count(self.status.opponents_remaining),
            target: self.target_name(),
            contacts,
            live_waves,
            destination: self.destination,
            hits_taken: self.hits_taken,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Name of the current target, if one is tracked.
    pub fn target_name(&self) -> Option<String> {
        self.target.and_then(|entity| {
            self.world
                .get::<&ContactInfo>(entity)
                .ok()
                .map(|contact| contact.name.clone())
        })
    }

    /// The current movement destination, if one has been chosen.
    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// Read-only access to the learned statistics.
    pub fn stats(&self) -> &GuessFactorStore {
        &self.stats
    }

    /// Read-only access to the entity world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Bullets taken this round (duel mode only).
    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }
}
