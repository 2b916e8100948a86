//! Core types and definitions for the SKIRMISH combat agent.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, host events, actuator commands, snapshots, and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
