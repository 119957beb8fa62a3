//! Fundamental identifiers, board positions, and sector arithmetic.

use serde::{Deserialize, Serialize};

/// Player identifier (one ship per player).
pub type PlayerId = u32;

/// Gravity well identifier.
pub type WellId = u32;

/// Missile entity identifier.
pub type MissileId = u32;

/// A discrete board cell: gravity well, ring (1-based), sector (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub well: WellId,
    pub ring: u32,
    pub sector: u32,
}

impl Position {
    pub fn new(well: WellId, ring: u32, sector: u32) -> Self {
        Self { well, ring, sector }
    }

    /// Absolute ring difference. Only meaningful within one well.
    pub fn ring_distance(&self, other: &Position) -> u32 {
        self.ring.abs_diff(other.ring)
    }

    pub fn same_well(&self, other: &Position) -> bool {
        self.well == other.well
    }

    /// Copy of this position on another sector.
    pub fn with_sector(self, sector: u32) -> Self {
        Self { sector, ..self }
    }
}

/// Wrap a signed sector index onto `[0, sector_count)`.
pub fn wrap_sector(sector: i64, sector_count: u32) -> u32 {
    sector.rem_euclid(sector_count as i64) as u32
}

/// Sectors travelled going from `from` to `to` in the increasing-index direction.
pub fn forward_distance(from: u32, to: u32, sector_count: u32) -> u32 {
    (to % sector_count + sector_count - from % sector_count) % sector_count
}

/// Shortest wraparound-aware distance between two sectors on one ring.
pub fn sector_distance(a: u32, b: u32, sector_count: u32) -> u32 {
    let forward = forward_distance(a, b, sector_count);
    forward.min(sector_count - forward)
}

/// Signed single step (+1 / -1 / 0) that moves `from` toward `to` the short way.
/// Ties (exactly half a ring apart) go in the increasing direction.
pub fn shortest_step(from: u32, to: u32, sector_count: u32) -> i64 {
    let forward = forward_distance(from, to, sector_count);
    if forward == 0 {
        0
    } else if forward <= sector_count - forward {
        1
    } else {
        -1
    }
}

/// Map a sector proportionally from one ring onto another.
///
/// Uses the sector's angular centre, so rings with equal sector counts map
/// by identity.
pub fn map_sector(sector: u32, from_count: u32, to_count: u32) -> u32 {
    if from_count == to_count {
        return sector % to_count;
    }
    let scaled = (2 * sector as u64 + 1) * to_count as u64 / (2 * from_count as u64);
    (scaled as u32) % to_count
}
