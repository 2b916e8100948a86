//! Decision engine for the SKIRMISH combat agent.
//!
//! Owns the hecs world of opponent records and bullet waves, the
//! GuessFactor statistics store, and the seeded RNG. Host callbacks feed
//! observations in; the decision procedures hand actuator commands back.
//! Completely headless, enabling deterministic testing.

pub mod engine;
pub mod systems;

pub use engine::CombatAgent;
pub use skirmish_core as core;
