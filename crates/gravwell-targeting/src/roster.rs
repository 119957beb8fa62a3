//! Candidate roster: who a weapon may be pointed at.

use serde::{Deserialize, Serialize};

use gravwell_core::components::Player;
use gravwell_core::config::WeaponStats;
use gravwell_core::types::{PlayerId, Position};
use gravwell_core::world::GravityWell;

use crate::firing::{firing_solution, FiringSolution, ShipPosture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub player_id: PlayerId,
    pub position: Position,
}

/// Living ships in the attacker's gravity well, excluding the attacker.
pub fn candidate_roster(
    attacker_id: PlayerId,
    attacker_position: &Position,
    players: &[Player],
) -> Vec<Candidate> {
    players
        .iter()
        .filter(|p| p.id != attacker_id)
        .filter(|p| p.ship.is_alive())
        .filter(|p| p.ship.position.same_well(attacker_position))
        .map(|p| Candidate {
            player_id: p.id,
            position: p.ship.position,
        })
        .collect()
}

/// Firing solutions against every candidate, in roster order.
pub fn firing_solutions(
    stats: &WeaponStats,
    attacker: &ShipPosture,
    roster: &[Candidate],
    well: &GravityWell,
) -> Vec<FiringSolution> {
    roster
        .iter()
        .filter_map(|candidate| firing_solution(stats, attacker, candidate, well))
        .collect()
}
