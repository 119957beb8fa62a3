//! Ship, subsystem, and missile records.
//!
//! Records are plain values. Updates are replace-and-return: `with_*`
//! methods consume a value and hand back the modified copy, so no caller
//! ever holds a mutable alias into another record.

use serde::{Deserialize, Serialize};

use crate::enums::{Facing, SubsystemType};
use crate::types::{MissileId, PlayerId, Position};

/// One powered ship system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsystem {
    pub subsystem_type: SubsystemType,
    pub allocated_energy: u32,
    pub used_this_turn: bool,
}

impl Subsystem {
    pub fn new(subsystem_type: SubsystemType) -> Self {
        Self {
            subsystem_type,
            allocated_energy: 0,
            used_this_turn: false,
        }
    }

    pub fn is_powered(&self) -> bool {
        self.allocated_energy >= self.subsystem_type.profile().min_energy
    }

    /// Heat this allocation generates per turn.
    pub fn overclock_heat(&self) -> u32 {
        self.allocated_energy
            .saturating_sub(self.subsystem_type.profile().overclock_threshold)
    }

    /// Room left before the type's maximum.
    pub fn headroom(&self) -> u32 {
        self.subsystem_type
            .profile()
            .max_energy
            .saturating_sub(self.allocated_energy)
    }
}

/// Energy source. `available_energy` plus every allocation equals `total_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactor {
    pub total_capacity: u32,
    pub available_energy: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heat {
    pub current_heat: u32,
    /// Vent intent recorded this turn, applied at end of turn.
    pub heat_to_vent: u32,
}

/// Present only between a well transfer and the end of the same turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferState {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub position: Position,
    pub facing: Facing,
    pub reaction_mass: u32,
    pub max_reaction_mass: u32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    #[serde(default)]
    pub transfer_state: Option<TransferState>,
    pub subsystems: Vec<Subsystem>,
    pub reactor: Reactor,
    pub heat: Heat,
    pub missile_inventory: u32,
    #[serde(default)]
    pub destroyed: bool,
}

impl Ship {
    pub fn subsystem(&self, subsystem_type: SubsystemType) -> Option<&Subsystem> {
        self.subsystems
            .iter()
            .find(|s| s.subsystem_type == subsystem_type)
    }

    /// Replace the subsystem of the same type.
    pub fn with_subsystem(mut self, subsystem: Subsystem) -> Self {
        if let Some(slot) = self
            .subsystems
            .iter_mut()
            .find(|s| s.subsystem_type == subsystem.subsystem_type)
        {
            *slot = subsystem;
        }
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn is_powered(&self, subsystem_type: SubsystemType) -> bool {
        self.subsystem(subsystem_type)
            .is_some_and(Subsystem::is_powered)
    }

    pub fn allocated(&self, subsystem_type: SubsystemType) -> u32 {
        self.subsystem(subsystem_type)
            .map_or(0, |s| s.allocated_energy)
    }

    pub fn total_allocated(&self) -> u32 {
        self.subsystems.iter().map(|s| s.allocated_energy).sum()
    }

    /// Closed-economy check: allocations plus reactor reserve equal capacity.
    pub fn energy_balanced(&self) -> bool {
        self.total_allocated() + self.reactor.available_energy == self.reactor.total_capacity
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed && self.hit_points > 0
    }

    /// Apply hull damage, marking the ship destroyed at zero.
    pub fn damaged(mut self, amount: u32) -> Self {
        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.hit_points == 0 {
            self.destroyed = true;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub ship: Ship,
}

/// A guided missile in flight. Independent of the launcher that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Missile {
    pub id: MissileId,
    pub owner_id: PlayerId,
    pub target_id: PlayerId,
    pub position: Position,
    pub turn_fired: u64,
    pub turns_alive: u32,
    /// Fired after its owner's movement this turn: no orbital drift yet.
    #[serde(default)]
    pub skip_orbital_this_turn: bool,
}
