//! Events emitted by turn resolution, kept in the game log.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{MissileId, PlayerId, Position};

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    EnergyAllocated {
        subsystem: SubsystemType,
        amount: u32,
    },
    EnergyDeallocated {
        subsystem: SubsystemType,
        amount: u32,
    },
    VentQueued {
        amount: u32,
    },
    Rotated {
        facing: Facing,
    },
    Coasted {
        from: Position,
        to: Position,
    },
    Burned {
        intensity: BurnIntensity,
        from: Position,
        to: Position,
        mass_spent: u32,
    },
    WellTransferred {
        from: Position,
        to: Position,
        mass_spent: u32,
    },
    WeaponFired {
        weapon: WeaponType,
        target_id: PlayerId,
        damage: u32,
    },
    MissileLaunched {
        missile_id: MissileId,
        target_id: PlayerId,
        position: Position,
    },
    MissileHit {
        missile_id: MissileId,
        target_id: PlayerId,
        damage: u32,
    },
    MissileExpired {
        missile_id: MissileId,
    },
    HeatVented {
        amount: u32,
    },
    HeatDamage {
        amount: u32,
    },
    HeatGenerated {
        amount: u32,
    },
    MassScooped {
        amount: u32,
    },
    ShipDestroyed {
        player_id: PlayerId,
    },
    GameOver {
        winner: Option<PlayerId>,
    },
}

/// A logged event with the turn and acting player it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u64,
    pub player_id: PlayerId,
    pub event: TurnEvent,
}
