//! End-of-turn housekeeping: per-turn flags, casualties, and game end.

use gravwell_core::components::{Missile, Ship};
use gravwell_core::enums::GamePhase;
use gravwell_core::state::GameState;
use gravwell_core::types::PlayerId;

/// Clear used flags and the transient transfer record; settle hull state.
pub fn reset_turn_flags(mut ship: Ship) -> Ship {
    for subsystem in &mut ship.subsystems {
        subsystem.used_this_turn = false;
    }
    ship.transfer_state = None;
    if ship.hit_points == 0 {
        ship.destroyed = true;
    }
    ship
}

pub fn clear_missile_flags(missiles: Vec<Missile>) -> Vec<Missile> {
    missiles
        .into_iter()
        .map(|m| Missile {
            skip_orbital_this_turn: false,
            ..m
        })
        .collect()
}

/// Players alive in `before` and dead in `after`, in roster order.
pub fn newly_destroyed(before: &GameState, after: &GameState) -> Vec<PlayerId> {
    after
        .players
        .iter()
        .filter(|p| !p.ship.is_alive())
        .filter(|p| before.ship(p.id).is_some_and(Ship::is_alive))
        .map(|p| p.id)
        .collect()
}

/// Finished once at most one ship of a multi-ship game survives.
pub fn game_phase(state: &GameState) -> GamePhase {
    if state.players.len() < 2 {
        return state.phase;
    }
    let alive: Vec<PlayerId> = state.alive_players().map(|p| p.id).collect();
    match alive.as_slice() {
        [] => GamePhase::Finished { winner: None },
        [only] => GamePhase::Finished {
            winner: Some(*only),
        },
        _ => state.phase,
    }
}
