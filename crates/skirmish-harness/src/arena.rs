//! The battle arena — a scripted host driving one persistent agent
//! through multi-round sessions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use skirmish_agent::engine::{AgentConfig, CombatAgent};
use skirmish_core::commands::ActuatorCommand;
use skirmish_core::constants::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, MAX_OPPONENT_SPEED, WALL_MARGIN,
};
use skirmish_core::events::{Observation, SelfStatus};
use skirmish_core::state::AgentSnapshot;
use skirmish_core::types::{normalize_absolute, normalize_relative, Point, Rect};
use skirmish_gunnery::wave::bullet_speed;

use crate::scripts::MovementScript;

/// Proximity at which a bullet registers a hit.
const BULLET_HIT_RADIUS: f64 = 20.0;

/// Damage dealt per point of bullet power.
const DAMAGE_PER_POWER: f64 = 4.0;

/// Starting energy for the agent each round.
const AGENT_START_ENERGY: f64 = 100.0;

/// Arena configuration.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Seeds both the agent and the arena's own layout RNG.
    pub seed: u64,
    pub field_width: f64,
    pub field_height: f64,
    /// Starting energy for every opponent.
    pub opponent_energy: f64,
    /// Tick cap per round.
    pub max_ticks: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            opponent_energy: 100.0,
            max_ticks: 2000,
        }
    }
}

/// Outcome summary of one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub ticks: u64,
    pub shots_fired: u32,
    pub bullet_hits: u32,
    pub eliminations: u32,
    pub survivors: usize,
    pub final_energy: f64,
    /// Lowest energy the agent reached during the round.
    pub min_energy: f64,
}

struct OpponentState {
    name: String,
    script: MovementScript,
    position: Point,
    previous: Point,
    heading: f64,
    energy: f64,
    alive: bool,
}

struct BulletState {
    position: Point,
    bearing: f64,
    speed: f64,
    power: f64,
}

/// The arena. Owns one agent for a whole session; rounds reset the field
/// but the agent's statistics store persists.
pub struct Arena {
    config: ArenaConfig,
    field: Rect,
    agent: CombatAgent,
    rng: ChaCha8Rng,
    opponents: Vec<OpponentState>,
    bullets: Vec<BulletState>,
    agent_position: Point,
    agent_heading: f64,
    gun_heading: f64,
    radar_heading: f64,
    agent_energy: f64,
    tick: u64,
    shots_fired: u32,
    bullet_hits: u32,
    eliminations: u32,
    min_energy: f64,
}

impl Arena {
    pub fn new(config: ArenaConfig, roster: Vec<(String, MovementScript)>) -> Self {
        let field = Rect::new(0.0, 0.0, config.field_width, config.field_height);
        let agent = CombatAgent::new(&AgentConfig {
            seed: config.seed,
            field_width: config.field_width,
            field_height: config.field_height,
        });
        let opponents = roster
            .into_iter()
            .map(|(name, script)| OpponentState {
                name,
                script,
                position: Point::default(),
                previous: Point::default(),
                heading: 0.0,
                energy: config.opponent_energy,
                alive: false,
            })
            .collect();
        let mut arena = Self {
            field,
            agent,
            // Offset stream so arena layout and agent decisions draw from
            // independent sequences even with identical seeds.
            rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1)),
            config,
            opponents,
            bullets: Vec::new(),
            agent_position: Point::default(),
            agent_heading: 0.0,
            gun_heading: 0.0,
            radar_heading: 0.0,
            agent_energy: AGENT_START_ENERGY,
            tick: 0,
            shots_fired: 0,
            bullet_hits: 0,
            eliminations: 0,
            min_energy: AGENT_START_ENERGY,
        };
        arena.start_round();
        arena
    }

    /// Reset the field for a new round. The agent keeps its learning.
    pub fn start_round(&mut self) {
        self.agent.begin_round();
        self.bullets.clear();
        self.tick = 0;
        self.shots_fired = 0;
        self.bullet_hits = 0;
        self.eliminations = 0;
        self.agent_energy = AGENT_START_ENERGY;
        self.min_energy = AGENT_START_ENERGY;
        self.agent_heading = 0.0;
        self.gun_heading = 0.0;
        self.radar_heading = 0.0;
        self.agent_position = Point::new(
            self.field.x + self.field.width / 2.0,
            self.field.y + self.field.height / 2.0,
        );

        let spawn_area = self.field.inset(WALL_MARGIN);
        for opponent in &mut self.opponents {
            let position = Point::new(
                spawn_area.x + self.rng.gen::<f64>() * spawn_area.width,
                spawn_area.y + self.rng.gen::<f64>() * spawn_area.height,
            );
            opponent.position = position;
            opponent.previous = position;
            opponent.heading = 0.0;
            opponent.energy = self.config.opponent_energy;
            opponent.alive = true;
        }
    }

    /// Whether the current round has ended.
    pub fn round_over(&self) -> bool {
        self.survivors() == 0 || self.tick >= self.config.max_ticks
    }

    /// Advance the battle by one tick.
    pub fn step(&mut self) {
        self.tick += 1;

        self.move_opponents();
        self.fly_bullets();

        let status = SelfStatus {
            position: self.agent_position,
            heading: self.agent_heading,
            gun_heading: self.gun_heading,
            radar_heading: self.radar_heading,
            energy: self.agent_energy,
            opponents_remaining: self.survivors() as u32,
            tick: self.tick,
        };
        self.agent.update_status(status);

        let radar_command = self.agent.decide_radar();
        self.apply(&[radar_command]);

        // Deliver a sighting of every living opponent, scan-callback style.
        let observations: Vec<Observation> = self
            .opponents
            .iter()
            .filter(|opponent| opponent.alive)
            .map(|opponent| Observation {
                name: opponent.name.clone(),
                bearing: normalize_relative(
                    self.agent_position.bearing_to(&opponent.position) - self.agent_heading,
                ),
                distance: self.agent_position.distance_to(&opponent.position),
                heading: opponent.heading,
                velocity: opponent.position.distance_to(&opponent.previous),
                energy: opponent.energy,
            })
            .collect();
        for observation in &observations {
            let commands = self.agent.on_scan(observation);
            self.apply(&commands);
        }

        let commands = self.agent.decide_movement();
        self.apply(&commands);

        if self.survivors() == 0 {
            let flourish = self.agent.on_victory();
            self.apply(&flourish);
        }
    }

    /// Run the current round to completion.
    pub fn run_round(&mut self) -> RoundReport {
        while !self.round_over() {
            self.step();
        }
        let report = self.report();
        // Drain buffered decision events so they cannot pile up across
        // rounds nobody snapshots.
        let _ = self.agent.snapshot();
        report
    }

    /// Run a whole session: the given number of rounds with the same
    /// agent, resetting the field between rounds.
    pub fn run_session(&mut self, rounds: u32) -> Vec<RoundReport> {
        let mut reports = Vec::new();
        for round in 0..rounds {
            if round > 0 {
                self.start_round();
            }
            reports.push(self.run_round());
        }
        reports
    }

    /// Summary of the round so far.
    pub fn report(&self) -> RoundReport {
        RoundReport {
            ticks: self.tick,
            shots_fired: self.shots_fired,
            bullet_hits: self.bullet_hits,
            eliminations: self.eliminations,
            survivors: self.survivors(),
            final_energy: self.agent_energy,
            min_energy: self.min_energy,
        }
    }

    pub fn snapshot(&mut self) -> AgentSnapshot {
        self.agent.snapshot()
    }

    pub fn agent(&self) -> &CombatAgent {
        &self.agent
    }

    pub fn agent_position(&self) -> Point {
        self.agent_position
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn survivors(&self) -> usize {
        self.opponents.iter().filter(|o| o.alive).count()
    }

    fn move_opponents(&mut self) {
        let agent_position = self.agent_position;
        let field = self.field;
        let tick = self.tick;
        for opponent in self.opponents.iter_mut().filter(|o| o.alive) {
            let next = opponent
                .script
                .step(opponent.position, tick, agent_position, &field);
            if next != opponent.position {
                opponent.heading = opponent.position.bearing_to(&next);
            }
            opponent.previous = opponent.position;
            opponent.position = next;
        }
    }

    fn fly_bullets(&mut self) {
        let field = self.field;
        let opponents = &mut self.opponents;
        let mut eliminated = Vec::new();
        let mut hits = 0;

        self.bullets.retain_mut(|bullet| {
            bullet.position = bullet.position.project(bullet.bearing, bullet.speed);
            if !field.contains(bullet.position) {
                return false;
            }
            for opponent in opponents.iter_mut().filter(|o| o.alive) {
                if bullet.position.distance_to(&opponent.position) <= BULLET_HIT_RADIUS {
                    opponent.energy -= DAMAGE_PER_POWER * bullet.power;
                    hits += 1;
                    if opponent.energy <= 0.0 {
                        opponent.alive = false;
                        eliminated.push(opponent.name.clone());
                    }
                    return false;
                }
            }
            true
        });

        self.bullet_hits += hits;
        for name in eliminated {
            self.eliminations += 1;
            self.agent.on_opponent_destroyed(&name);
        }
    }

    fn apply(&mut self, commands: &[ActuatorCommand]) {
        for command in commands {
            match command {
                ActuatorCommand::TurnRadar { angle } => {
                    self.radar_heading = normalize_absolute(self.radar_heading + angle);
                }
                ActuatorCommand::TurnGun { angle } => {
                    self.gun_heading = normalize_absolute(self.gun_heading + angle);
                }
                ActuatorCommand::Fire { power } => {
                    self.shots_fired += 1;
                    self.agent_energy -= power;
                    self.min_energy = self.min_energy.min(self.agent_energy);
                    self.bullets.push(BulletState {
                        position: self.agent_position,
                        bearing: self.gun_heading,
                        speed: bullet_speed(*power),
                        power: *power,
                    });
                }
                ActuatorCommand::Turn { angle } => {
                    self.agent_heading = normalize_absolute(self.agent_heading + angle);
                }
                ActuatorCommand::Move { distance } => {
                    let travel = distance.clamp(-MAX_OPPONENT_SPEED, MAX_OPPONENT_SPEED);
                    self.agent_position = self
                        .field
                        .clamp(self.agent_position.project(self.agent_heading, travel));
                }
            }
        }
    }
}
