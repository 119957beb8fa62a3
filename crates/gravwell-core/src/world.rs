//! Static world model: gravity wells, their rings, and transfer points.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::WellKind;
use crate::types::{Position, WellId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// 1-based, innermost first.
    pub index: u32,
    /// Sectors advanced per turn by anything on this ring.
    pub angular_velocity: u32,
    pub sector_count: u32,
    /// Display radius around the well centre.
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityWell {
    pub id: WellId,
    pub name: String,
    pub kind: WellKind,
    pub rings: Vec<Ring>,
    /// Fixed display position for non-central wells.
    #[serde(default)]
    pub orbital_position: Option<DVec2>,
}

impl GravityWell {
    pub fn ring_count(&self) -> u32 {
        self.rings.len() as u32
    }

    pub fn ring(&self, index: u32) -> Option<&Ring> {
        self.rings.iter().find(|r| r.index == index)
    }

    pub fn outermost_ring(&self) -> u32 {
        self.ring_count()
    }

    pub fn centre(&self) -> DVec2 {
        self.orbital_position.unwrap_or(DVec2::ZERO)
    }
}

/// A precomputed route between two wells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPoint {
    pub from: Position,
    pub to: Position,
    /// Minimum engine allocation, if any.
    #[serde(default)]
    pub required_engine_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub wells: Vec<GravityWell>,
    pub transfer_points: Vec<TransferPoint>,
}

impl World {
    pub fn well(&self, id: WellId) -> Option<&GravityWell> {
        self.wells.iter().find(|w| w.id == id)
    }

    pub fn ring_at(&self, position: &Position) -> Option<&Ring> {
        self.well(position.well)?.ring(position.ring)
    }

    /// True when the position names an existing ring and an in-range sector.
    pub fn contains(&self, position: &Position) -> bool {
        self.ring_at(position)
            .is_some_and(|ring| position.sector < ring.sector_count)
    }

    /// Transfer point leaving `from` toward `destination`, if one exists.
    pub fn transfer_from(&self, from: &Position, destination: WellId) -> Option<&TransferPoint> {
        self.transfer_points
            .iter()
            .find(|t| t.from == *from && t.to.well == destination)
    }

    /// Every transfer point leaving this exact cell.
    pub fn transfers_at<'a>(&'a self, from: &'a Position) -> impl Iterator<Item = &'a TransferPoint> + 'a {
        self.transfer_points.iter().filter(move |t| t.from == *from)
    }

    /// Display coordinates of a cell's centre for renderers.
    pub fn display_position(&self, position: &Position) -> Option<DVec2> {
        let well = self.well(position.well)?;
        let ring = well.ring(position.ring)?;
        let angle = std::f64::consts::TAU * (position.sector as f64 + 0.5) / ring.sector_count as f64;
        Some(well.centre() + DVec2::from_angle(angle) * ring.radius)
    }
}
