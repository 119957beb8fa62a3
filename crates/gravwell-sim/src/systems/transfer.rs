//! Well transfers between the black hole and the planets.

use gravwell_core::components::{Ship, TransferState};
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::SubsystemType;
use gravwell_core::errors::Fault;
use gravwell_core::world::TransferPoint;

use super::mark_used;

/// Relocate a ship through a validated transfer point.
///
/// The ship keeps its facing. `transfer_state` records the hop until the
/// end-of-turn cleanup clears it.
pub fn apply_transfer(ship: Ship, point: &TransferPoint, rules: &RulesConfig) -> Result<Ship, Fault> {
    let remaining = ship
        .reaction_mass
        .checked_sub(rules.transfer_mass_cost)
        .ok_or_else(|| {
            Fault::CorruptState(format!(
                "transfer needs {} reaction mass but ship holds {}",
                rules.transfer_mass_cost, ship.reaction_mass
            ))
        })?;

    let mut ship = mark_used(ship, SubsystemType::Engines);
    ship.transfer_state = Some(TransferState {
        from: ship.position,
        to: point.to,
    });
    ship.reaction_mass = remaining;
    Ok(ship.with_position(point.to))
}
