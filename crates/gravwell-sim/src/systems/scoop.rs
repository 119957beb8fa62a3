//! Fuel scoop: skims reaction mass on the innermost ring.

use gravwell_core::components::Ship;
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::SubsystemType;

/// Collect mass if the scoop is powered and the ship sits on ring 1.
/// Returns the ship and the amount actually collected.
pub fn collect(ship: Ship, rules: &RulesConfig) -> (Ship, u32) {
    if ship.position.ring != 1 || !ship.is_powered(SubsystemType::Scoop) || !ship.is_alive() {
        return (ship, 0);
    }
    let room = ship.max_reaction_mass.saturating_sub(ship.reaction_mass);
    let amount = rules.scoop_mass_yield.min(room);
    let mut ship = ship;
    ship.reaction_mass += amount;
    (ship, amount)
}
