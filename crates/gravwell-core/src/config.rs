//! Rules configuration. Every field defaults to the matching constant, so a
//! rules file only needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{BurnIntensity, WeaponArc, WeaponType};

/// Failure to load or accept a rules file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rules JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// Cost and effect of one burn intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnCost {
    /// Engine allocation the burn requires.
    pub energy: u32,
    /// Reaction mass consumed.
    pub mass: u32,
    /// Rings moved along facing.
    pub rings: u32,
}

impl BurnCost {
    const fn from_tuple(t: (u32, u32, u32)) -> Self {
        Self {
            energy: t.0,
            mass: t.1,
            rings: t.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnTable {
    pub light: BurnCost,
    pub medium: BurnCost,
    pub heavy: BurnCost,
}

impl Default for BurnTable {
    fn default() -> Self {
        Self {
            light: BurnCost::from_tuple(LIGHT_BURN),
            medium: BurnCost::from_tuple(MEDIUM_BURN),
            heavy: BurnCost::from_tuple(HEAVY_BURN),
        }
    }
}

impl BurnTable {
    pub fn cost(&self, intensity: BurnIntensity) -> BurnCost {
        match intensity {
            BurnIntensity::Light => self.light,
            BurnIntensity::Medium => self.medium,
            BurnIntensity::Heavy => self.heavy,
        }
    }
}

/// Geometry and effect of a direct-fire weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub arc: WeaponArc,
    /// Ignored by spinal weapons.
    pub ring_range: u32,
    pub sector_range: u32,
    pub damage: u32,
    /// Spinal recoil needs powered engines to compensate.
    #[serde(default)]
    pub recoil: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub laser: WeaponStats,
    pub railgun: WeaponStats,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            laser: WeaponStats {
                arc: WeaponArc::Turret,
                ring_range: LASER_RING_RANGE,
                sector_range: LASER_SECTOR_RANGE,
                damage: LASER_DAMAGE,
                recoil: false,
            },
            railgun: WeaponStats {
                arc: WeaponArc::Spinal,
                ring_range: 0,
                sector_range: RAILGUN_SECTOR_RANGE,
                damage: RAILGUN_DAMAGE,
                recoil: true,
            },
        }
    }
}

impl WeaponTable {
    /// Direct-fire stats; missiles are entities and have none.
    pub fn stats(&self, weapon: WeaponType) -> Option<WeaponStats> {
        match weapon {
            WeaponType::Laser => Some(self.laser),
            WeaponType::Railgun => Some(self.railgun),
            WeaponType::Missiles => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileRules {
    pub fuel_per_turn: u32,
    pub max_lifetime: u32,
    pub damage: u32,
}

impl Default for MissileRules {
    fn default() -> Self {
        Self {
            fuel_per_turn: MISSILE_FUEL_PER_TURN,
            max_lifetime: MISSILE_MAX_LIFETIME,
            damage: MISSILE_DAMAGE,
        }
    }
}

/// Tunable rule set used by setup, the resolver, and previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub reactor_capacity: u32,
    pub max_hit_points: u32,
    pub max_reaction_mass: u32,
    pub starting_missiles: u32,
    pub min_action_amount: u32,
    pub max_action_amount: u32,
    pub burns: BurnTable,
    pub sector_adjustment_mass_cost: u32,
    pub max_sector_adjustment: u32,
    pub transfer_mass_cost: u32,
    pub weapons: WeaponTable,
    pub missiles: MissileRules,
    pub scoop_mass_yield: u32,
    pub energy_return_rate: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reactor_capacity: REACTOR_CAPACITY,
            max_hit_points: MAX_HIT_POINTS,
            max_reaction_mass: MAX_REACTION_MASS,
            starting_missiles: STARTING_MISSILES,
            min_action_amount: MIN_ACTION_AMOUNT,
            max_action_amount: MAX_ACTION_AMOUNT,
            burns: BurnTable::default(),
            sector_adjustment_mass_cost: SECTOR_ADJUSTMENT_MASS_COST,
            max_sector_adjustment: MAX_SECTOR_ADJUSTMENT,
            transfer_mass_cost: TRANSFER_MASS_COST,
            weapons: WeaponTable::default(),
            missiles: MissileRules::default(),
            scoop_mass_yield: SCOOP_MASS_YIELD,
            energy_return_rate: ENERGY_RETURN_RATE,
        }
    }
}

impl RulesConfig {
    /// Parse and check a JSON rules document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load a JSON rules file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Reject rule sets the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reactor_capacity == 0 {
            return Err(ConfigError::Invalid("reactor_capacity must be positive".into()));
        }
        if self.max_hit_points == 0 {
            return Err(ConfigError::Invalid("max_hit_points must be positive".into()));
        }
        if self.min_action_amount == 0 || self.min_action_amount > self.max_action_amount {
            return Err(ConfigError::Invalid(format!(
                "action amount range {}..={} is empty or includes zero",
                self.min_action_amount, self.max_action_amount
            )));
        }
        if self.missiles.max_lifetime == 0 {
            return Err(ConfigError::Invalid("missiles.max_lifetime must be positive".into()));
        }
        for (name, stats) in [("laser", self.weapons.laser), ("railgun", self.weapons.railgun)] {
            if stats.sector_range == 0 && stats.ring_range == 0 {
                return Err(ConfigError::Invalid(format!("{name} has no range")));
            }
        }
        Ok(())
    }
}
