//! Weapon fire: direct-fire hits and missile launches.

use gravwell_core::components::Missile;
use gravwell_core::enums::{SubsystemType, WeaponType};
use gravwell_core::errors::Fault;
use gravwell_core::state::GameState;
use gravwell_core::types::PlayerId;

use super::mark_used;

/// Resolve a validated laser or railgun shot. Damage lands immediately.
pub fn fire_direct(
    state: GameState,
    attacker_id: PlayerId,
    weapon: WeaponType,
    target_id: PlayerId,
    damage: u32,
) -> Result<GameState, Fault> {
    let attacker = state
        .ship(attacker_id)
        .cloned()
        .ok_or(Fault::MissingPlayer(attacker_id))?;
    let state = state.with_ship(attacker_id, mark_used(attacker, weapon.subsystem()));

    let target = state
        .ship(target_id)
        .cloned()
        .ok_or(Fault::MissingPlayer(target_id))?;
    Ok(state.with_ship(target_id, target.damaged(damage)))
}

/// Spawn a missile at the attacker's current position.
///
/// `after_movement` marks a missile launched once its owner already moved
/// this turn; it must not drift again before the turn ends.
pub fn launch_missile(
    state: GameState,
    attacker_id: PlayerId,
    target_id: PlayerId,
    after_movement: bool,
) -> Result<(GameState, Missile), Fault> {
    let attacker = state
        .ship(attacker_id)
        .cloned()
        .ok_or(Fault::MissingPlayer(attacker_id))?;
    let inventory = attacker.missile_inventory.checked_sub(1).ok_or_else(|| {
        Fault::CorruptState(format!("player {attacker_id} launched with an empty magazine"))
    })?;

    let missile = Missile {
        id: state.next_missile_id,
        owner_id: attacker_id,
        target_id,
        position: attacker.position,
        turn_fired: state.turn,
        turns_alive: 0,
        skip_orbital_this_turn: after_movement,
    };

    let mut attacker = mark_used(attacker, SubsystemType::Missiles);
    attacker.missile_inventory = inventory;

    let mut state = state.with_ship(attacker_id, attacker);
    state.next_missile_id += 1;
    state.missiles.push(missile);
    Ok((state, missile))
}
