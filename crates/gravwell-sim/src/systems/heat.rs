//! End-of-turn heat accounting.
//!
//! Order matters: the vent is taken from the heat the ship started the turn
//! with, whatever is left burns the hull, and only then does this turn's
//! overclock heat land. A ship that vents everything it carried takes no
//! damage even while overclocking.

use gravwell_core::components::{Heat, Ship};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatReport {
    pub vented: u32,
    pub damage: u32,
    pub generated: u32,
}

/// Heat generated by allocations above each subsystem's threshold.
pub fn overclock_heat(ship: &Ship) -> u32 {
    ship.subsystems.iter().map(|s| s.overclock_heat()).sum()
}

pub fn end_of_turn(ship: Ship, heat_at_turn_start: u32) -> (Ship, HeatReport) {
    let vented = ship.heat.heat_to_vent.min(heat_at_turn_start);
    let damage = heat_at_turn_start - vented;
    let generated = overclock_heat(&ship);

    let mut ship = ship.damaged(damage);
    ship.heat = Heat {
        current_heat: heat_at_turn_start - vented + generated,
        heat_to_vent: 0,
    };
    (
        ship,
        HeatReport {
            vented,
            damage,
            generated,
        },
    )
}
