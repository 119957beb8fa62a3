//! Core types and definitions for the GRAVWELL turn engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the world model, ship and missile records, actions, events, errors,
//! rules configuration, and sector arithmetic. It contains no turn logic.

pub mod actions;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod types;
pub mod world;
