//! Game state snapshot: the complete world record passed into and out of
//! each turn resolution. Plain data, JSON-serializable.

use serde::{Deserialize, Serialize};

use crate::components::{Missile, Player, Ship};
use crate::enums::GamePhase;
use crate::events::LogEntry;
use crate::types::{MissileId, PlayerId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    /// Incremented once per resolved player-turn.
    pub turn: u64,
    pub phase: GamePhase,
    pub active_player: PlayerId,
    /// Roster order is turn order.
    pub players: Vec<Player>,
    pub missiles: Vec<Missile>,
    pub next_missile_id: MissileId,
    pub log: Vec<LogEntry>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn ship(&self, id: PlayerId) -> Option<&Ship> {
        self.player(id).map(|p| &p.ship)
    }

    /// Replace one player's ship, returning the new state.
    pub fn with_ship(mut self, id: PlayerId, ship: Ship) -> Self {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.ship = ship;
        }
        self
    }

    pub fn missile(&self, id: MissileId) -> Option<&Missile> {
        self.missiles.iter().find(|m| m.id == id)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.ship.is_alive())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Next living player after `current` in roster order, wrapping around.
    /// Returns `current` when nobody else is alive.
    pub fn next_active_after(&self, current: PlayerId) -> PlayerId {
        let Some(start) = self.players.iter().position(|p| p.id == current) else {
            return current;
        };
        let count = self.players.len();
        (1..=count)
            .map(|offset| &self.players[(start + offset) % count])
            .find(|p| p.ship.is_alive())
            .map_or(current, |p| p.id)
    }
}
