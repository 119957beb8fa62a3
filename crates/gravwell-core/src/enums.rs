//! Enumeration types used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// Ship orientation relative to orbital travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// With orbital travel (increasing sector index). Burns go outward.
    #[default]
    Prograde,
    /// Against orbital travel. Burns go inward.
    Retrograde,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Prograde => Facing::Retrograde,
            Facing::Retrograde => Facing::Prograde,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Facing::Prograde => "prograde",
            Facing::Retrograde => "retrograde",
        })
    }
}

/// Ship subsystem kinds. Each ship carries exactly one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemType {
    Engines,
    Rotation,
    Scoop,
    Laser,
    Railgun,
    Missiles,
    Shields,
}

/// Power thresholds for one subsystem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsystemProfile {
    /// Allocation at or above which the subsystem is powered.
    pub min_energy: u32,
    /// Hard allocation cap.
    pub max_energy: u32,
    /// Allocation above this generates one heat per excess unit each turn.
    pub overclock_threshold: u32,
}

impl SubsystemType {
    pub const ALL: [SubsystemType; 7] = [
        SubsystemType::Engines,
        SubsystemType::Rotation,
        SubsystemType::Scoop,
        SubsystemType::Laser,
        SubsystemType::Railgun,
        SubsystemType::Missiles,
        SubsystemType::Shields,
    ];

    pub fn profile(self) -> SubsystemProfile {
        let (min_energy, max_energy, overclock_threshold) = match self {
            SubsystemType::Engines => (1, 6, 3),
            SubsystemType::Rotation => (1, 2, 1),
            SubsystemType::Scoop => (1, 3, 2),
            SubsystemType::Laser => (2, 5, 3),
            SubsystemType::Railgun => (3, 6, 4),
            SubsystemType::Missiles => (2, 4, 3),
            SubsystemType::Shields => (1, 5, 3),
        };
        SubsystemProfile {
            min_energy,
            max_energy,
            overclock_threshold,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SubsystemType::Engines => "engines",
            SubsystemType::Rotation => "rotation",
            SubsystemType::Scoop => "scoop",
            SubsystemType::Laser => "laser",
            SubsystemType::Railgun => "railgun",
            SubsystemType::Missiles => "missiles",
            SubsystemType::Shields => "shields",
        }
    }
}

impl fmt::Display for SubsystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weapons that can be named in a fire action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Laser,
    Railgun,
    Missiles,
}

impl WeaponType {
    pub const ALL: [WeaponType; 3] = [WeaponType::Laser, WeaponType::Railgun, WeaponType::Missiles];

    /// The subsystem slot that powers this weapon.
    pub fn subsystem(self) -> SubsystemType {
        match self {
            WeaponType::Laser => SubsystemType::Laser,
            WeaponType::Railgun => SubsystemType::Railgun,
            WeaponType::Missiles => SubsystemType::Missiles,
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subsystem().name())
    }
}

/// Firing arc geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponArc {
    /// Same ring only, forward along facing.
    Spinal,
    /// Other rings only, facing ignored.
    Broadside,
    /// Other rings only, facing ignored.
    Turret,
}

/// Discrete burn strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnIntensity {
    Light,
    Medium,
    Heavy,
}

impl fmt::Display for BurnIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BurnIntensity::Light => "light",
            BurnIntensity::Medium => "medium",
            BurnIntensity::Heavy => "heavy",
        };
        f.write_str(name)
    }
}

/// Kind of central body owning a set of rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKind {
    BlackHole,
    Planet,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Active,
    /// At most one ship remains alive.
    Finished { winner: Option<PlayerId> },
}
