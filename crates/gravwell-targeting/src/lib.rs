//! Weapon targeting for GRAVWELL.
//!
//! Pure functions that compute firing solutions for spinal, broadside, and
//! turret arcs. The turn resolver validates fire actions with exactly the
//! same calls that range previews use.

pub mod firing;
pub mod roster;

pub use gravwell_core as core;

pub use firing::{firing_solution, FiringSolution, ShipPosture};
pub use roster::{candidate_roster, firing_solutions, Candidate};
