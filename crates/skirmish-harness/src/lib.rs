//! Headless battle harness for the SKIRMISH agent.
//!
//! A reference host: scripted opponents, simplified kinematics, real
//! bullet flight. Observations are delivered every tick regardless of the
//! radar command (an omniscient-scan simplification; radar commands are
//! still executed so the glue layer is exercised). Used by the demo
//! binary and the integration tests.

pub mod arena;
pub mod scripts;

pub use arena::{Arena, ArenaConfig, RoundReport};
pub use scripts::MovementScript;
