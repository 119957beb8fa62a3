//! Orbital drift, coasting, burns, and rotation.
//!
//! Everything on a ring advances by the ring's angular velocity each turn.
//! A burn drifts first, then moves rings along the ship's facing, then
//! applies the optional sector adjustment on the destination ring.

use gravwell_core::components::Ship;
use gravwell_core::config::{BurnCost, RulesConfig};
use gravwell_core::enums::{BurnIntensity, Facing, SubsystemType};
use gravwell_core::errors::Fault;
use gravwell_core::types::{map_sector, wrap_sector, Position};
use gravwell_core::world::World;

use super::mark_used;

/// Advance a position by its ring's angular velocity.
pub fn drift(world: &World, position: Position) -> Result<Position, Fault> {
    let ring = world.ring_at(&position).ok_or(Fault::OffBoard(position))?;
    let sector = (position.sector + ring.angular_velocity) % ring.sector_count;
    Ok(position.with_sector(sector))
}

/// Landing cell of a burn from `position`.
///
/// Prograde climbs outward, retrograde falls inward; the ring is clamped to
/// the well. The drifted sector is mapped proportionally onto the destination
/// ring before the adjustment is added.
pub fn burn_destination(
    world: &World,
    position: Position,
    facing: Facing,
    cost: &BurnCost,
    sector_adjustment: i32,
) -> Result<Position, Fault> {
    let well = world
        .well(position.well)
        .ok_or(Fault::MissingWell(position.well))?;
    let drifted = drift(world, position)?;
    let from_ring = well.ring(drifted.ring).ok_or(Fault::OffBoard(drifted))?;

    let ring_index = match facing {
        Facing::Prograde => drifted.ring.saturating_add(cost.rings),
        Facing::Retrograde => drifted.ring.saturating_sub(cost.rings),
    }
    .clamp(1, well.ring_count());
    let to_ring = well
        .ring(ring_index)
        .ok_or(Fault::OffBoard(Position::new(position.well, ring_index, 0)))?;

    let mapped = map_sector(drifted.sector, from_ring.sector_count, to_ring.sector_count);
    let sector = wrap_sector(
        i64::from(mapped) + i64::from(sector_adjustment),
        to_ring.sector_count,
    );
    Ok(Position::new(position.well, ring_index, sector))
}

/// Reaction mass a burn consumes, including the adjustment surcharge.
pub fn burn_mass_cost(rules: &RulesConfig, intensity: BurnIntensity, sector_adjustment: i32) -> u32 {
    rules.burns.cost(intensity).mass
        + sector_adjustment.unsigned_abs() * rules.sector_adjustment_mass_cost
}

pub fn coast(world: &World, ship: Ship) -> Result<Ship, Fault> {
    let to = drift(world, ship.position)?;
    Ok(ship.with_position(to))
}

/// Apply a validated burn: move, spend mass, mark engines used.
pub fn burn(
    world: &World,
    rules: &RulesConfig,
    ship: Ship,
    intensity: BurnIntensity,
    sector_adjustment: i32,
) -> Result<Ship, Fault> {
    let cost = rules.burns.cost(intensity);
    let to = burn_destination(world, ship.position, ship.facing, &cost, sector_adjustment)?;
    let mass = burn_mass_cost(rules, intensity, sector_adjustment);
    let remaining = ship.reaction_mass.checked_sub(mass).ok_or_else(|| {
        Fault::CorruptState(format!(
            "burn needs {mass} reaction mass but ship holds {}",
            ship.reaction_mass
        ))
    })?;

    let mut ship = mark_used(ship, SubsystemType::Engines).with_position(to);
    ship.reaction_mass = remaining;
    Ok(ship)
}

pub fn rotate(ship: Ship, facing: Facing) -> Ship {
    let mut ship = mark_used(ship, SubsystemType::Rotation);
    ship.facing = facing;
    ship
}
