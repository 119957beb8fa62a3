//! Reactor energy transfers and vent intent.
//!
//! Energy moves between the reactor reserve and subsystem allocations, never
//! out of the ship. Every applier here preserves
//! `allocated + available == total_capacity`.

use gravwell_core::components::Ship;
use gravwell_core::enums::SubsystemType;

/// Move `amount` from the reactor into a subsystem.
pub fn allocate(ship: Ship, subsystem_type: SubsystemType, amount: u32) -> Ship {
    let Some(mut subsystem) = ship.subsystem(subsystem_type).copied() else {
        return ship;
    };
    let moved = amount.min(ship.reactor.available_energy);
    subsystem.allocated_energy += moved;
    let mut ship = ship.with_subsystem(subsystem);
    ship.reactor.available_energy -= moved;
    ship
}

/// Return `amount` from a subsystem to the reactor.
pub fn deallocate(ship: Ship, subsystem_type: SubsystemType, amount: u32) -> Ship {
    let Some(mut subsystem) = ship.subsystem(subsystem_type).copied() else {
        return ship;
    };
    let moved = amount.min(subsystem.allocated_energy);
    subsystem.allocated_energy -= moved;
    let mut ship = ship.with_subsystem(subsystem);
    ship.reactor.available_energy += moved;
    ship
}

/// Record vent intent; heat is only removed at end of turn.
pub fn queue_vent(mut ship: Ship, amount: u32) -> Ship {
    ship.heat.heat_to_vent += amount;
    ship
}
