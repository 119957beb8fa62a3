//! Missile pass: drift, guidance, impact, and expiry.
//!
//! Every missile is stepped once per resolved turn, in ascending id order,
//! against one snapshot of ship positions. Outcomes are collected first and
//! applied afterwards, so damage from several missiles on the same ship is
//! summed and no missile sees another's effect.

use std::collections::BTreeMap;

use gravwell_core::components::{Missile, Ship};
use gravwell_core::config::RulesConfig;
use gravwell_core::errors::Fault;
use gravwell_core::events::TurnEvent;
use gravwell_core::state::GameState;
use gravwell_core::types::{map_sector, shortest_step, wrap_sector, PlayerId, Position};
use gravwell_core::world::World;

use super::movement::drift;

/// Exactly one of these per missile per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissileOutcome {
    Hit {
        missile: Missile,
        target_id: PlayerId,
        damage: u32,
    },
    Expired(Missile),
    Alive(Missile),
}

/// Close on `target` with at most `fuel` cell moves: rings first, then sectors
/// along the shorter way round. Both positions must share a well.
pub fn guide(world: &World, from: Position, target: Position, fuel: u32) -> Result<Position, Fault> {
    let well = world.well(from.well).ok_or(Fault::MissingWell(from.well))?;
    let mut position = from;
    let mut fuel = fuel;

    while fuel > 0 && position.ring != target.ring {
        let next = if target.ring > position.ring {
            position.ring + 1
        } else {
            position.ring - 1
        };
        let from_ring = well.ring(position.ring).ok_or(Fault::OffBoard(position))?;
        let to_ring = well
            .ring(next)
            .ok_or(Fault::OffBoard(Position::new(position.well, next, 0)))?;
        let sector = map_sector(position.sector, from_ring.sector_count, to_ring.sector_count);
        position = Position::new(position.well, next, sector);
        fuel -= 1;
    }

    if position.ring == target.ring {
        let ring = well.ring(position.ring).ok_or(Fault::OffBoard(position))?;
        while fuel > 0 && position.sector != target.sector {
            let step = shortest_step(position.sector, target.sector, ring.sector_count);
            position = position.with_sector(wrap_sector(
                i64::from(position.sector) + step,
                ring.sector_count,
            ));
            fuel -= 1;
        }
    }

    Ok(position)
}

/// Advance one missile by one turn.
pub fn step(
    world: &World,
    rules: &RulesConfig,
    missile: Missile,
    current_turn: u64,
    target: Option<&Ship>,
) -> Result<MissileOutcome, Fault> {
    if missile.turn_fired == current_turn {
        let position = if missile.skip_orbital_this_turn {
            missile.position
        } else {
            drift(world, missile.position)?
        };
        return Ok(MissileOutcome::Alive(Missile {
            position,
            ..missile
        }));
    }

    let mut position = drift(world, missile.position)?;

    let live_target = target.filter(|t| t.is_alive() && t.position.same_well(&position));
    if let Some(ship) = live_target {
        position = guide(world, position, ship.position, rules.missiles.fuel_per_turn)?;
        if position == ship.position {
            return Ok(MissileOutcome::Hit {
                missile: Missile {
                    position,
                    ..missile
                },
                target_id: missile.target_id,
                damage: rules.missiles.damage,
            });
        }
    }

    let turns_alive = missile.turns_alive + 1;
    let missile = Missile {
        position,
        turns_alive,
        ..missile
    };
    if turns_alive >= rules.missiles.max_lifetime {
        Ok(MissileOutcome::Expired(missile))
    } else {
        Ok(MissileOutcome::Alive(missile))
    }
}

/// Run the missile pass over the whole game.
pub fn run(
    world: &World,
    rules: &RulesConfig,
    state: GameState,
    events: &mut Vec<TurnEvent>,
) -> Result<GameState, Fault> {
    let mut missiles = state.missiles.clone();
    missiles.sort_by_key(|m| m.id);

    let mut survivors = Vec::with_capacity(missiles.len());
    let mut damage: BTreeMap<PlayerId, u32> = BTreeMap::new();

    for missile in missiles {
        let target = state.ship(missile.target_id);
        match step(world, rules, missile, state.turn, target)? {
            MissileOutcome::Hit {
                missile,
                target_id,
                damage: amount,
            } => {
                *damage.entry(target_id).or_default() += amount;
                events.push(TurnEvent::MissileHit {
                    missile_id: missile.id,
                    target_id,
                    damage: amount,
                });
            }
            MissileOutcome::Expired(missile) => {
                events.push(TurnEvent::MissileExpired {
                    missile_id: missile.id,
                });
            }
            MissileOutcome::Alive(missile) => survivors.push(missile),
        }
    }

    let mut state = state;
    state.missiles = survivors;
    for (target_id, amount) in damage {
        let ship = state
            .ship(target_id)
            .cloned()
            .ok_or(Fault::MissingPlayer(target_id))?;
        state = state.with_ship(target_id, ship.damaged(amount));
    }
    Ok(state)
}
