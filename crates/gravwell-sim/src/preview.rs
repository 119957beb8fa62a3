//! Read-only planning queries for interfaces.
//!
//! Nothing here touches game state. Projections apply the same movement
//! systems the resolver uses to a scratch copy of one ship, and range previews
//! go through the same targeting functions as fire validation.

use std::collections::VecDeque;

use gravwell_core::actions::{Action, ActionClass, TacticalAction};
use gravwell_core::components::Ship;
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::{SubsystemType, WeaponType};
use gravwell_core::errors::{Fault, ValidationError};
use gravwell_core::state::GameState;
use gravwell_core::types::{PlayerId, Position};
use gravwell_core::world::World;
use gravwell_targeting::{candidate_roster, firing_solutions, FiringSolution, ShipPosture};

use crate::systems::{energy, movement};
use crate::validation;

/// Where a movement action would leave the ship. `None` for non-movement actions.
pub fn projected_position(
    world: &World,
    rules: &RulesConfig,
    ship: &Ship,
    action: &TacticalAction,
) -> Result<Option<Position>, Fault> {
    match *action {
        TacticalAction::Coast => movement::drift(world, ship.position).map(Some),
        TacticalAction::Burn {
            intensity,
            sector_adjustment,
        } => movement::burn_destination(
            world,
            ship.position,
            ship.facing,
            &rules.burns.cost(intensity),
            sector_adjustment,
        )
        .map(Some),
        _ => Ok(None),
    }
}

/// Posture after the tactical actions numbered up to `through_sequence`.
///
/// Works on a partial batch while the player is still composing it: fire
/// actions are ignored, and rotations or transfers that could not happen are
/// skipped rather than reported.
pub fn projected_posture(
    world: &World,
    rules: &RulesConfig,
    state: &GameState,
    player_id: PlayerId,
    actions: &[Action],
    through_sequence: u32,
) -> Result<ShipPosture, Fault> {
    let ship = state.ship(player_id).ok_or(Fault::MissingPlayer(player_id))?;
    let mut posture = ShipPosture::of(ship);

    let mut steps: Vec<(u32, TacticalAction)> = actions
        .iter()
        .filter_map(|a| match a.classify() {
            ActionClass::Tactical {
                sequence: Some(sequence),
                action,
            } if sequence <= through_sequence => Some((sequence, action)),
            _ => None,
        })
        .collect();
    steps.sort_by_key(|(sequence, _)| *sequence);

    for (_, action) in steps {
        match action {
            TacticalAction::Rotate { facing } => posture.facing = facing,
            TacticalAction::WellTransfer { destination_well } => {
                if let Some(point) = world.transfer_from(&posture.position, destination_well) {
                    posture.position = point.to;
                }
            }
            TacticalAction::Coast => posture.position = movement::drift(world, posture.position)?,
            TacticalAction::Burn {
                intensity,
                sector_adjustment,
            } => {
                posture.position = movement::burn_destination(
                    world,
                    posture.position,
                    posture.facing,
                    &rules.burns.cost(intensity),
                    sector_adjustment,
                )?;
            }
            TacticalAction::FireWeapon { .. } => {}
        }
    }
    Ok(posture)
}

/// Firing solutions for `weapon` from `posture` against every candidate.
///
/// Missiles have no range geometry and yield an empty list.
pub fn range_preview(
    world: &World,
    rules: &RulesConfig,
    state: &GameState,
    player_id: PlayerId,
    weapon: WeaponType,
    posture: &ShipPosture,
) -> Result<Vec<FiringSolution>, Fault> {
    let Some(stats) = rules.weapons.stats(weapon) else {
        return Ok(Vec::new());
    };
    let well = world
        .well(posture.position.well)
        .ok_or(Fault::MissingWell(posture.position.well))?;
    let roster = candidate_roster(player_id, &posture.position, &state.players);
    Ok(firing_solutions(&stats, posture, &roster, well))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingReturn {
    Energy { subsystem: SubsystemType, amount: u32 },
    Vent { amount: u32 },
}

impl PendingReturn {
    fn amount(&self) -> u32 {
        match *self {
            PendingReturn::Energy { amount, .. } | PendingReturn::Vent { amount } => amount,
        }
    }

    fn with_amount(self, amount: u32) -> Self {
        match self {
            PendingReturn::Energy { subsystem, .. } => PendingReturn::Energy { subsystem, amount },
            PendingReturn::Vent { .. } => PendingReturn::Vent { amount },
        }
    }
}

/// Client-side model of a rate-limited energy economy.
///
/// Allocation lands immediately. Deallocation and venting share a return
/// budget that refills each turn; whatever exceeds it waits in a queue and
/// drains on later turns. The resolver does not use this model.
#[derive(Debug, Clone)]
pub struct EnergyPreview {
    ship: Ship,
    rules: RulesConfig,
    budget: u32,
    pending: VecDeque<PendingReturn>,
}

impl EnergyPreview {
    pub fn new(ship: &Ship, rules: &RulesConfig) -> Self {
        Self {
            ship: ship.clone(),
            rules: rules.clone(),
            budget: rules.energy_return_rate,
            pending: VecDeque::new(),
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn remaining_budget(&self) -> u32 {
        self.budget
    }

    /// Energy still on its way back to the reactor.
    pub fn pending_energy(&self) -> u32 {
        self.pending
            .iter()
            .filter(|p| matches!(p, PendingReturn::Energy { .. }))
            .map(PendingReturn::amount)
            .sum()
    }

    pub fn pending_vent(&self) -> u32 {
        self.pending
            .iter()
            .filter(|p| matches!(p, PendingReturn::Vent { .. }))
            .map(PendingReturn::amount)
            .sum()
    }

    pub fn allocate(&mut self, subsystem: SubsystemType, amount: u32) -> Result<(), ValidationError> {
        validation::validate_allocation(&self.ship, &self.rules, subsystem, amount)?;
        self.ship = energy::allocate(self.ship.clone(), subsystem, amount);
        Ok(())
    }

    /// Queue a return; at most the allocation not already queued can be requested.
    pub fn request_deallocation(
        &mut self,
        subsystem: SubsystemType,
        amount: u32,
    ) -> Result<(), ValidationError> {
        validation::check_amount(&self.rules, amount, "Deallocation")?;
        let queued: u32 = self
            .pending
            .iter()
            .filter_map(|p| match *p {
                PendingReturn::Energy { subsystem: s, amount } if s == subsystem => Some(amount),
                _ => None,
            })
            .sum();
        let free = self.ship.allocated(subsystem).saturating_sub(queued);
        if amount > free {
            return Err(ValidationError::resource(format!(
                "Cannot deallocate {amount} from {subsystem}: only {free} not already returning"
            )));
        }
        self.pending.push_back(PendingReturn::Energy { subsystem, amount });
        self.drain();
        Ok(())
    }

    pub fn request_vent(&mut self, amount: u32) -> Result<(), ValidationError> {
        validation::check_amount(&self.rules, amount, "Vent")?;
        self.pending.push_back(PendingReturn::Vent { amount });
        self.drain();
        Ok(())
    }

    /// Refill the return budget and keep draining the queue.
    pub fn end_turn(&mut self) {
        self.budget = self.rules.energy_return_rate;
        self.drain();
    }

    fn drain(&mut self) {
        while self.budget > 0 {
            let Some(front) = self.pending.pop_front() else {
                break;
            };
            let moved = front.amount().min(self.budget);
            match front {
                PendingReturn::Energy { subsystem, .. } => {
                    self.ship = energy::deallocate(self.ship.clone(), subsystem, moved);
                }
                PendingReturn::Vent { .. } => {
                    self.ship.heat.current_heat = self.ship.heat.current_heat.saturating_sub(moved);
                }
            }
            self.budget -= moved;
            if moved < front.amount() {
                self.pending.push_front(front.with_amount(front.amount() - moved));
            }
        }
    }
}
