//! Turn resolution engine for GRAVWELL.
//!
//! Validates one player's action batch, applies it phase by phase to a copy
//! of the game state, runs the missile pass and end-of-turn bookkeeping, and
//! hands back the next state. Also provides game setup and read-only planning
//! previews for interfaces.

pub mod engine;
pub mod preview;
pub mod systems;
pub mod validation;
pub mod world_setup;

pub use gravwell_core as core;
pub use engine::{SimConfig, TurnResolver, TurnResult};

#[cfg(test)]
mod tests;
