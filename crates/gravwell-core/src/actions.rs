//! Player actions submitted for one turn.
//!
//! A turn is a batch of actions. Energy and venting actions are unordered
//! within their phase; tactical actions carry a `sequence` that fixes their
//! order. The sequence is optional on the wire so a missing one can be
//! reported as a rule violation instead of a parse failure.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{PlayerId, WellId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // --- Energy ---
    /// Move energy from the reactor into a subsystem.
    AllocateEnergy {
        subsystem: SubsystemType,
        amount: u32,
    },
    /// Return energy from a subsystem to the reactor.
    DeallocateEnergy {
        subsystem: SubsystemType,
        amount: u32,
    },
    /// Record intent to vent heat at end of turn.
    VentHeat { amount: u32 },

    // --- Tactical ---
    /// Turn to the given facing.
    Rotate {
        facing: Facing,
        #[serde(default)]
        sequence: Option<u32>,
    },
    /// Drift with the current ring.
    Coast {
        #[serde(default)]
        sequence: Option<u32>,
    },
    /// Drift, then change ring along facing and optionally shift sectors.
    Burn {
        intensity: BurnIntensity,
        #[serde(default)]
        sector_adjustment: i32,
        #[serde(default)]
        sequence: Option<u32>,
    },
    /// Fire one weapon at another player's ship.
    FireWeapon {
        weapon: WeaponType,
        target_id: PlayerId,
        #[serde(default)]
        sequence: Option<u32>,
    },
    /// Jump to another well through the transfer point at the current cell.
    WellTransfer {
        destination_well: WellId,
        #[serde(default)]
        sequence: Option<u32>,
    },
}

/// The tactical part of an action, stripped of its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacticalAction {
    Rotate {
        facing: Facing,
    },
    Coast,
    Burn {
        intensity: BurnIntensity,
        sector_adjustment: i32,
    },
    FireWeapon {
        weapon: WeaponType,
        target_id: PlayerId,
    },
    WellTransfer {
        destination_well: WellId,
    },
}

impl TacticalAction {
    pub fn is_movement(&self) -> bool {
        matches!(self, TacticalAction::Coast | TacticalAction::Burn { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TacticalAction::Rotate { .. } => "rotate",
            TacticalAction::Coast => "coast",
            TacticalAction::Burn { .. } => "burn",
            TacticalAction::FireWeapon { .. } => "fire_weapon",
            TacticalAction::WellTransfer { .. } => "well_transfer",
        }
    }
}

/// Which macro-phase an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    Allocation {
        subsystem: SubsystemType,
        amount: u32,
    },
    Deallocation {
        subsystem: SubsystemType,
        amount: u32,
    },
    Vent {
        amount: u32,
    },
    Tactical {
        sequence: Option<u32>,
        action: TacticalAction,
    },
}

impl Action {
    pub fn classify(&self) -> ActionClass {
        match *self {
            Action::AllocateEnergy { subsystem, amount } => {
                ActionClass::Allocation { subsystem, amount }
            }
            Action::DeallocateEnergy { subsystem, amount } => {
                ActionClass::Deallocation { subsystem, amount }
            }
            Action::VentHeat { amount } => ActionClass::Vent { amount },
            Action::Rotate { facing, sequence } => ActionClass::Tactical {
                sequence,
                action: TacticalAction::Rotate { facing },
            },
            Action::Coast { sequence } => ActionClass::Tactical {
                sequence,
                action: TacticalAction::Coast,
            },
            Action::Burn {
                intensity,
                sector_adjustment,
                sequence,
            } => ActionClass::Tactical {
                sequence,
                action: TacticalAction::Burn {
                    intensity,
                    sector_adjustment,
                },
            },
            Action::FireWeapon {
                weapon,
                target_id,
                sequence,
            } => ActionClass::Tactical {
                sequence,
                action: TacticalAction::FireWeapon { weapon, target_id },
            },
            Action::WellTransfer {
                destination_well,
                sequence,
            } => ActionClass::Tactical {
                sequence,
                action: TacticalAction::WellTransfer { destination_well },
            },
        }
    }
}

/// A turn as delivered by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSubmission {
    pub game_id: String,
    pub player_id: PlayerId,
    pub actions: Vec<Action>,
}
