//! Turn resolver: the core of the game.
//!
//! `TurnResolver` owns the static world and the rule set. `resolve` takes a
//! game state and one player's action batch and returns either the next
//! state plus the events that produced it, or the untouched state plus
//! every rule the batch broke. Completely headless and deterministic.

use serde::{Deserialize, Serialize};

use gravwell_core::actions::{Action, TacticalAction, TurnSubmission};
use gravwell_core::components::Ship;
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::GamePhase;
use gravwell_core::errors::{Fault, ValidationError};
use gravwell_core::events::{LogEntry, TurnEvent};
use gravwell_core::state::GameState;
use gravwell_core::types::PlayerId;
use gravwell_core::world::{GravityWell, World};

use crate::systems::{cleanup, energy, heat, missiles, movement, scoop, transfer, weapons};
use crate::validation::{self, FireOrder, TurnPlan};
use crate::world_setup;

/// Configuration for starting a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for setup. Same seed = same starting positions.
    pub seed: u64,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: RulesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTurn {
    pub state: GameState,
    pub events: Vec<TurnEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedTurn {
    /// The state as submitted.
    pub state: GameState,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnResult {
    Resolved(ResolvedTurn),
    Rejected(RejectedTurn),
}

impl TurnResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TurnResult::Resolved(_))
    }

    pub fn state(&self) -> &GameState {
        match self {
            TurnResult::Resolved(r) => &r.state,
            TurnResult::Rejected(r) => &r.state,
        }
    }

    pub fn into_state(self) -> GameState {
        match self {
            TurnResult::Resolved(r) => r.state,
            TurnResult::Rejected(r) => r.state,
        }
    }

    pub fn events(&self) -> &[TurnEvent] {
        match self {
            TurnResult::Resolved(r) => &r.events,
            TurnResult::Rejected(_) => &[],
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            TurnResult::Resolved(_) => &[],
            TurnResult::Rejected(r) => &r.errors,
        }
    }

    /// Errors rendered as `Kind: message` strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

/// Working copy threaded through the phases of one resolution.
struct Turn {
    player_id: PlayerId,
    state: GameState,
    events: Vec<TurnEvent>,
    errors: Vec<ValidationError>,
    moved: bool,
}

impl Turn {
    fn ship(&self) -> Result<Ship, Fault> {
        self.state
            .ship(self.player_id)
            .cloned()
            .ok_or(Fault::MissingPlayer(self.player_id))
    }

    fn replace_ship(&mut self, ship: Ship) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_ship(self.player_id, ship);
    }

    fn replace_state(&mut self, f: impl FnOnce(GameState) -> Result<GameState, Fault>) -> Result<(), Fault> {
        let state = std::mem::take(&mut self.state);
        self.state = f(state)?;
        Ok(())
    }
}

pub struct TurnResolver {
    world: World,
    rules: RulesConfig,
}

impl TurnResolver {
    pub fn new(world: World, rules: RulesConfig) -> Self {
        Self { world, rules }
    }

    /// Resolver over the canonical board.
    pub fn standard(rules: RulesConfig) -> Self {
        Self::new(world_setup::standard_world(), rules)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Resolve a submission, checking it belongs to this game first.
    pub fn resolve_submission(
        &self,
        state: &GameState,
        submission: &TurnSubmission,
    ) -> Result<TurnResult, Fault> {
        if submission.game_id != state.game_id {
            return Ok(self.reject(
                state,
                submission.player_id,
                vec![ValidationError::sequencing(format!(
                    "Submission is for game {}, not {}",
                    submission.game_id, state.game_id
                ))],
            ));
        }
        self.resolve(state, submission.player_id, &submission.actions)
    }

    /// Resolve one player's batch against `state`.
    ///
    /// Atomic: on rejection the returned state equals `state`.
    pub fn resolve(
        &self,
        state: &GameState,
        player_id: PlayerId,
        actions: &[Action],
    ) -> Result<TurnResult, Fault> {
        let player = state.player(player_id).ok_or(Fault::MissingPlayer(player_id))?;
        if !self.world.contains(&player.ship.position) {
            return Err(Fault::OffBoard(player.ship.position));
        }

        if let Err(error) = self.check_turn_order(state, player_id) {
            return Ok(self.reject(state, player_id, vec![error]));
        }

        let plan = match validation::plan_turn(actions) {
            Ok(plan) => plan,
            Err(errors) => return Ok(self.reject(state, player_id, errors)),
        };
        log::debug!(
            "turn {} player {player_id}: {} allocation(s), {} deallocation(s), {} vent(s), {} tactical",
            state.turn,
            plan.allocations.len(),
            plan.deallocations.len(),
            plan.vents.len(),
            plan.tactical.len()
        );

        let heat_at_turn_start = player.ship.heat.current_heat;
        let mut turn = Turn {
            player_id,
            state: state.clone(),
            events: Vec::new(),
            errors: Vec::new(),
            moved: false,
        };

        self.allocation_phase(&mut turn, &plan)?;
        if !turn.errors.is_empty() {
            return Ok(self.reject(state, player_id, turn.errors));
        }
        self.deallocation_phase(&mut turn, &plan)?;
        if !turn.errors.is_empty() {
            return Ok(self.reject(state, player_id, turn.errors));
        }
        self.vent_phase(&mut turn, &plan)?;
        if !turn.errors.is_empty() {
            return Ok(self.reject(state, player_id, turn.errors));
        }
        self.tactical_phase(&mut turn, &plan)?;
        if !turn.errors.is_empty() {
            return Ok(self.reject(state, player_id, turn.errors));
        }

        log::debug!("turn {}: missile pass over {} missile(s)", state.turn, turn.state.missiles.len());
        let working = std::mem::take(&mut turn.state);
        turn.state = missiles::run(&self.world, &self.rules, working, &mut turn.events)?;

        self.end_of_turn(&mut turn, state, heat_at_turn_start)?;

        let Turn {
            state: mut next,
            events,
            ..
        } = turn;
        next.log.extend(events.iter().cloned().map(|event| LogEntry {
            turn: state.turn,
            player_id,
            event,
        }));
        log::info!(
            "turn {} resolved for player {player_id}: {} event(s), next player {}",
            state.turn,
            events.len(),
            next.active_player
        );
        Ok(TurnResult::Resolved(ResolvedTurn {
            state: next,
            events,
        }))
    }

    fn reject(&self, state: &GameState, player_id: PlayerId, errors: Vec<ValidationError>) -> TurnResult {
        let summary: Vec<String> = errors.iter().map(ToString::to_string).collect();
        log::warn!(
            "turn {} rejected for player {player_id}: {}",
            state.turn,
            summary.join("; ")
        );
        TurnResult::Rejected(RejectedTurn {
            state: state.clone(),
            errors,
        })
    }

    fn current_well(&self, ship: &Ship) -> Result<&GravityWell, Fault> {
        self.world
            .well(ship.position.well)
            .ok_or(Fault::MissingWell(ship.position.well))
    }

    fn check_turn_order(&self, state: &GameState, player_id: PlayerId) -> Result<(), ValidationError> {
        if state.is_finished() {
            return Err(ValidationError::sequencing("The game is already finished"));
        }
        if state.active_player != player_id {
            return Err(ValidationError::sequencing(format!(
                "It is player {}'s turn, not player {player_id}'s",
                state.active_player
            )));
        }
        let alive = state.ship(player_id).is_some_and(|s| s.is_alive());
        if !alive {
            return Err(ValidationError::subsystem(format!(
                "Player {player_id}'s ship is destroyed"
            )));
        }
        Ok(())
    }

    fn allocation_phase(&self, turn: &mut Turn, plan: &TurnPlan) -> Result<(), Fault> {
        for &(subsystem, amount) in &plan.allocations {
            let ship = turn.ship()?;
            match validation::validate_allocation(&ship, &self.rules, subsystem, amount) {
                Ok(()) => {
                    turn.replace_ship(energy::allocate(ship, subsystem, amount));
                    turn.events.push(TurnEvent::EnergyAllocated { subsystem, amount });
                }
                Err(error) => turn.errors.push(error),
            }
        }
        Ok(())
    }

    fn deallocation_phase(&self, turn: &mut Turn, plan: &TurnPlan) -> Result<(), Fault> {
        for &(subsystem, amount) in &plan.deallocations {
            let ship = turn.ship()?;
            match validation::validate_deallocation(&ship, &self.rules, subsystem, amount) {
                Ok(()) => {
                    turn.replace_ship(energy::deallocate(ship, subsystem, amount));
                    turn.events.push(TurnEvent::EnergyDeallocated { subsystem, amount });
                }
                Err(error) => turn.errors.push(error),
            }
        }
        Ok(())
    }

    fn vent_phase(&self, turn: &mut Turn, plan: &TurnPlan) -> Result<(), Fault> {
        for &amount in &plan.vents {
            match validation::validate_vent(&self.rules, amount) {
                Ok(()) => {
                    let ship = turn.ship()?;
                    turn.replace_ship(energy::queue_vent(ship, amount));
                    turn.events.push(TurnEvent::VentQueued { amount });
                }
                Err(error) => turn.errors.push(error),
            }
        }
        Ok(())
    }

    fn tactical_phase(&self, turn: &mut Turn, plan: &TurnPlan) -> Result<(), Fault> {
        for step in &plan.tactical {
            log::debug!("turn {} #{} {}", turn.state.turn, step.sequence, step.action.name());
            if let Err(error) = self.apply_tactical(turn, step.action)? {
                turn.errors.push(error);
            }
        }
        Ok(())
    }

    /// Outer `Result` is a fault; inner is the action's verdict.
    fn apply_tactical(
        &self,
        turn: &mut Turn,
        action: TacticalAction,
    ) -> Result<Result<(), ValidationError>, Fault> {
        let ship = turn.ship()?;
        match action {
            TacticalAction::Rotate { facing } => {
                if let Err(error) = validation::validate_rotation(&ship, facing) {
                    return Ok(Err(error));
                }
                turn.replace_ship(movement::rotate(ship, facing));
                turn.events.push(TurnEvent::Rotated { facing });
            }
            TacticalAction::Coast => {
                let from = ship.position;
                let ship = movement::coast(&self.world, ship)?;
                let to = ship.position;
                turn.replace_ship(ship);
                turn.moved = true;
                turn.events.push(TurnEvent::Coasted { from, to });
            }
            TacticalAction::Burn {
                intensity,
                sector_adjustment,
            } => {
                if let Err(error) =
                    validation::validate_burn(&ship, &self.rules, intensity, sector_adjustment)
                {
                    return Ok(Err(error));
                }
                let from = ship.position;
                let mass_spent = movement::burn_mass_cost(&self.rules, intensity, sector_adjustment);
                let ship = movement::burn(&self.world, &self.rules, ship, intensity, sector_adjustment)?;
                let to = ship.position;
                turn.replace_ship(ship);
                turn.moved = true;
                turn.events.push(TurnEvent::Burned {
                    intensity,
                    from,
                    to,
                    mass_spent,
                });
            }
            TacticalAction::WellTransfer { destination_well } => {
                let well = self.current_well(&ship)?;
                let point = match validation::validate_transfer(&self.world, well, &self.rules, &ship, destination_well) {
                    Ok(point) => point,
                    Err(error) => return Ok(Err(error)),
                };
                let from = ship.position;
                turn.replace_ship(transfer::apply_transfer(ship, &point, &self.rules)?);
                turn.events.push(TurnEvent::WellTransferred {
                    from,
                    to: point.to,
                    mass_spent: self.rules.transfer_mass_cost,
                });
            }
            TacticalAction::FireWeapon { weapon, target_id } => {
                let well = self.current_well(&ship)?;
                let order = match validation::validate_fire(
                    well,
                    &self.rules,
                    &turn.state,
                    turn.player_id,
                    weapon,
                    target_id,
                ) {
                    Ok(order) => order,
                    Err(error) => return Ok(Err(error)),
                };
                let attacker_id = turn.player_id;
                match order {
                    FireOrder::Direct { damage, .. } => {
                        turn.replace_state(|state| {
                            weapons::fire_direct(state, attacker_id, weapon, target_id, damage)
                        })?;
                        turn.events.push(TurnEvent::WeaponFired {
                            weapon,
                            target_id,
                            damage,
                        });
                    }
                    FireOrder::Missile => {
                        let state = std::mem::take(&mut turn.state);
                        let (state, missile) =
                            weapons::launch_missile(state, attacker_id, target_id, turn.moved)?;
                        turn.state = state;
                        turn.events.push(TurnEvent::MissileLaunched {
                            missile_id: missile.id,
                            target_id,
                            position: missile.position,
                        });
                    }
                }
            }
        }
        Ok(Ok(()))
    }

    fn end_of_turn(&self, turn: &mut Turn, before: &GameState, heat_at_turn_start: u32) -> Result<(), Fault> {
        let ship = turn.ship()?;
        let (ship, report) = heat::end_of_turn(ship, heat_at_turn_start);
        log::debug!(
            "turn {} heat: vented {}, damage {}, generated {}",
            turn.state.turn,
            report.vented,
            report.damage,
            report.generated
        );
        if report.vented > 0 {
            turn.events.push(TurnEvent::HeatVented {
                amount: report.vented,
            });
        }
        if report.damage > 0 {
            turn.events.push(TurnEvent::HeatDamage {
                amount: report.damage,
            });
        }
        if report.generated > 0 {
            turn.events.push(TurnEvent::HeatGenerated {
                amount: report.generated,
            });
        }

        let (ship, scooped) = scoop::collect(ship, &self.rules);
        if scooped > 0 {
            turn.events.push(TurnEvent::MassScooped { amount: scooped });
        }
        turn.replace_ship(ship);

        let mut state = std::mem::take(&mut turn.state);
        for player in &mut state.players {
            player.ship = cleanup::reset_turn_flags(player.ship.clone());
        }
        state.missiles = cleanup::clear_missile_flags(std::mem::take(&mut state.missiles));

        for player_id in cleanup::newly_destroyed(before, &state) {
            log::info!("turn {}: player {player_id}'s ship destroyed", state.turn);
            turn.events.push(TurnEvent::ShipDestroyed { player_id });
        }

        state.turn += 1;
        state.active_player = state.next_active_after(turn.player_id);
        let phase = cleanup::game_phase(&state);
        if let GamePhase::Finished { winner } = phase {
            if !state.is_finished() {
                log::info!("game {} over, winner {winner:?}", state.game_id);
                turn.events.push(TurnEvent::GameOver { winner });
            }
        }
        state.phase = phase;
        turn.state = state;
        Ok(())
    }
}
