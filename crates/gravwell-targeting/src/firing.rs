//! Firing-solution geometry.
//!
//! Operates on plain data: weapon stats, the attacker's posture (actual or
//! projected), and one candidate. No turn state is read or written.

use serde::{Deserialize, Serialize};

use gravwell_core::components::Ship;
use gravwell_core::config::WeaponStats;
use gravwell_core::enums::{Facing, WeaponArc};
use gravwell_core::types::{forward_distance, map_sector, sector_distance, PlayerId, Position};
use gravwell_core::world::GravityWell;

use crate::roster::Candidate;

/// Where the attacker is and which way it points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPosture {
    pub position: Position,
    pub facing: Facing,
}

impl ShipPosture {
    pub fn of(ship: &Ship) -> Self {
        Self {
            position: ship.position,
            facing: ship.facing,
        }
    }
}

/// Range verdict and distance metrics for one weapon against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringSolution {
    pub target_id: PlayerId,
    pub in_range: bool,
    /// Ring plus sector distance, for display.
    pub distance: u32,
    pub sector_distance: u32,
    pub ring_distance: u32,
    /// Spinal only: the target sits in the window behind the ship.
    pub wrong_facing: bool,
    /// Firing needs powered engines to absorb recoil.
    pub requires_engines: bool,
}

/// Compute the firing solution of `stats` from `attacker` against `target`.
///
/// Both positions must lie in `well`. Returns `None` when either ring is not
/// part of the well. Sector distance is measured on the attacker's ring; a
/// target on a ring with a different sector count is mapped across first.
pub fn firing_solution(
    stats: &WeaponStats,
    attacker: &ShipPosture,
    target: &Candidate,
    well: &GravityWell,
) -> Option<FiringSolution> {
    let own_ring = well.ring(attacker.position.ring)?;
    let target_ring = well.ring(target.position.ring)?;
    let sectors = own_ring.sector_count;

    let target_sector = map_sector(target.position.sector, target_ring.sector_count, sectors);
    let own_sector = attacker.position.sector;

    let ring_distance = attacker.position.ring_distance(&target.position);
    let sector_dist = sector_distance(own_sector, target_sector, sectors);

    let (in_range, wrong_facing) = match stats.arc {
        WeaponArc::Spinal => {
            let (ahead, behind) = match attacker.facing {
                Facing::Prograde => (
                    forward_distance(own_sector, target_sector, sectors),
                    forward_distance(target_sector, own_sector, sectors),
                ),
                Facing::Retrograde => (
                    forward_distance(target_sector, own_sector, sectors),
                    forward_distance(own_sector, target_sector, sectors),
                ),
            };
            let window = 1..=stats.sector_range;
            let in_range = ring_distance == 0 && window.contains(&ahead);
            let wrong_facing = ring_distance == 0 && !in_range && window.contains(&behind);
            (in_range, wrong_facing)
        }
        WeaponArc::Broadside | WeaponArc::Turret => {
            let in_range = ring_distance > 0
                && ring_distance <= stats.ring_range
                && sector_dist <= stats.sector_range;
            (in_range, false)
        }
    };

    Some(FiringSolution {
        target_id: target.player_id,
        in_range,
        distance: ring_distance + sector_dist,
        sector_distance: sector_dist,
        ring_distance,
        wrong_facing,
        requires_engines: stats.recoil,
    })
}
