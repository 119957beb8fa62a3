//! Turn validation.
//!
//! `plan_turn` performs the structural checks over the whole batch and sorts
//! it into macro-phases. The `validate_*` functions check one action against
//! the working state at the moment the resolver is about to apply it.

use std::collections::BTreeMap;

use gravwell_core::actions::{Action, ActionClass, TacticalAction};
use gravwell_core::components::Ship;
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::{BurnIntensity, Facing, SubsystemType, WeaponType};
use gravwell_core::errors::ValidationError;
use gravwell_core::state::GameState;
use gravwell_core::types::{PlayerId, WellId};
use gravwell_core::world::{GravityWell, TransferPoint, World};
use gravwell_targeting::{candidate_roster, firing_solution, FiringSolution, ShipPosture};

use crate::systems::movement::burn_mass_cost;

/// A tactical action with its (now guaranteed) sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedAction {
    pub sequence: u32,
    pub action: TacticalAction,
}

/// A structurally valid batch, split by macro-phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnPlan {
    pub allocations: Vec<(SubsystemType, u32)>,
    pub deallocations: Vec<(SubsystemType, u32)>,
    pub vents: Vec<u32>,
    /// Sorted by sequence.
    pub tactical: Vec<SequencedAction>,
}

impl TurnPlan {
    pub fn movement_sequence(&self) -> Option<u32> {
        self.tactical
            .iter()
            .find(|a| a.action.is_movement())
            .map(|a| a.sequence)
    }
}

/// Structural checks. Every problem in the batch is reported, not just the first.
pub fn plan_turn(actions: &[Action]) -> Result<TurnPlan, Vec<ValidationError>> {
    let mut plan = TurnPlan::default();
    let mut errors = Vec::new();
    let mut unsequenced = Vec::new();

    for action in actions {
        match action.classify() {
            ActionClass::Allocation { subsystem, amount } => plan.allocations.push((subsystem, amount)),
            ActionClass::Deallocation { subsystem, amount } => {
                plan.deallocations.push((subsystem, amount))
            }
            ActionClass::Vent { amount } => plan.vents.push(amount),
            ActionClass::Tactical {
                sequence: Some(sequence),
                action,
            } => plan.tactical.push(SequencedAction { sequence, action }),
            ActionClass::Tactical {
                sequence: None,
                action,
            } => unsequenced.push(action),
        }
    }

    for action in &unsequenced {
        errors.push(ValidationError::sequencing(format!(
            "{} action is missing a sequence number",
            action.name()
        )));
    }

    plan.tactical.sort_by_key(|a| a.sequence);

    let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
    for action in &plan.tactical {
        *seen.entry(action.sequence).or_default() += 1;
    }
    let duplicates: Vec<u32> = seen
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(sequence, _)| *sequence)
        .collect();
    for sequence in &duplicates {
        errors.push(ValidationError::sequencing(format!(
            "Duplicate sequence number {sequence}"
        )));
    }
    if duplicates.is_empty() && unsequenced.is_empty() {
        let contiguous = seen.keys().copied().eq(1..=seen.len() as u32);
        if !contiguous {
            let got: Vec<u32> = seen.keys().copied().collect();
            errors.push(ValidationError::sequencing(format!(
                "Sequence numbers must be contiguous starting at 1, got {got:?}"
            )));
        }
    }

    let all_tactical = || {
        plan.tactical
            .iter()
            .map(|a| a.action)
            .chain(unsequenced.iter().copied())
    };

    let movements = all_tactical().filter(TacticalAction::is_movement).count();
    match movements {
        1 => {}
        0 => errors.push(ValidationError::sequencing(
            "Exactly one movement action (coast or burn) is required",
        )),
        n => errors.push(ValidationError::sequencing(format!(
            "Only one movement action is allowed per turn, found {n}"
        ))),
    }

    let rotations = all_tactical()
        .filter(|a| matches!(a, TacticalAction::Rotate { .. }))
        .count();
    if rotations > 1 {
        errors.push(ValidationError::sequencing(format!(
            "Only one rotation is allowed per turn, found {rotations}"
        )));
    }

    for weapon in WeaponType::ALL {
        let shots = all_tactical()
            .filter(|a| matches!(a, TacticalAction::FireWeapon { weapon: w, .. } if *w == weapon))
            .count();
        if shots > 1 {
            errors.push(ValidationError::sequencing(format!(
                "{weapon} can only fire once per turn, found {shots} fire actions"
            )));
        }
    }

    let transfers: Vec<&SequencedAction> = plan
        .tactical
        .iter()
        .filter(|a| matches!(a.action, TacticalAction::WellTransfer { .. }))
        .collect();
    let transfer_count = transfers.len()
        + unsequenced
            .iter()
            .filter(|a| matches!(a, TacticalAction::WellTransfer { .. }))
            .count();
    if transfer_count > 1 {
        errors.push(ValidationError::sequencing(format!(
            "Only one well transfer is allowed per turn, found {transfer_count}"
        )));
    }
    if transfer_count > 0 && all_tactical().any(|a| matches!(a, TacticalAction::Burn { .. })) {
        errors.push(ValidationError::sequencing(
            "A well transfer cannot be combined with a burn in the same turn",
        ));
    }
    if let (Some(transfer), Some(movement)) = (transfers.first(), plan.movement_sequence()) {
        if transfer.sequence > movement {
            errors.push(ValidationError::sequencing(format!(
                "Well transfer (sequence {}) must come before the movement action (sequence {movement})",
                transfer.sequence
            )));
        }
    }

    if errors.is_empty() {
        Ok(plan)
    } else {
        Err(errors)
    }
}

pub fn check_amount(rules: &RulesConfig, amount: u32, what: &str) -> Result<(), ValidationError> {
    if amount < rules.min_action_amount || amount > rules.max_action_amount {
        return Err(ValidationError::resource(format!(
            "{what} amount {amount} is outside {}..={}",
            rules.min_action_amount, rules.max_action_amount
        )));
    }
    Ok(())
}

fn require_subsystem(ship: &Ship, subsystem_type: SubsystemType) -> Result<(), ValidationError> {
    if ship.subsystem(subsystem_type).is_none() {
        return Err(ValidationError::subsystem(format!(
            "Ship has no {subsystem_type} subsystem"
        )));
    }
    Ok(())
}

/// Powered and not yet used this turn.
fn require_ready(ship: &Ship, subsystem_type: SubsystemType) -> Result<(), ValidationError> {
    let Some(subsystem) = ship.subsystem(subsystem_type) else {
        return Err(ValidationError::subsystem(format!(
            "Ship has no {subsystem_type} subsystem"
        )));
    };
    if !subsystem.is_powered() {
        return Err(ValidationError::subsystem(format!(
            "{subsystem_type} is not powered ({} allocated, {} required)",
            subsystem.allocated_energy,
            subsystem_type.profile().min_energy
        )));
    }
    if subsystem.used_this_turn {
        return Err(ValidationError::subsystem(format!(
            "{subsystem_type} has already been used this turn"
        )));
    }
    Ok(())
}

pub fn validate_allocation(
    ship: &Ship,
    rules: &RulesConfig,
    subsystem_type: SubsystemType,
    amount: u32,
) -> Result<(), ValidationError> {
    check_amount(rules, amount, "Allocation")?;
    require_subsystem(ship, subsystem_type)?;
    if amount > ship.reactor.available_energy {
        return Err(ValidationError::resource(format!(
            "Insufficient reactor energy for {subsystem_type}: requested {amount}, available {}",
            ship.reactor.available_energy
        )));
    }
    let profile = subsystem_type.profile();
    let allocated = ship.allocated(subsystem_type);
    if allocated + amount > profile.max_energy {
        return Err(ValidationError::resource(format!(
            "Allocation would exceed {subsystem_type} maximum of {} (allocated {allocated}, requested {amount})",
            profile.max_energy
        )));
    }
    Ok(())
}

pub fn validate_deallocation(
    ship: &Ship,
    rules: &RulesConfig,
    subsystem_type: SubsystemType,
    amount: u32,
) -> Result<(), ValidationError> {
    check_amount(rules, amount, "Deallocation")?;
    require_subsystem(ship, subsystem_type)?;
    let allocated = ship.allocated(subsystem_type);
    if amount > allocated {
        return Err(ValidationError::resource(format!(
            "Cannot deallocate {amount} from {subsystem_type}: only {allocated} allocated"
        )));
    }
    Ok(())
}

pub fn validate_vent(rules: &RulesConfig, amount: u32) -> Result<(), ValidationError> {
    check_amount(rules, amount, "Vent")
}

pub fn validate_rotation(ship: &Ship, facing: Facing) -> Result<(), ValidationError> {
    require_ready(ship, SubsystemType::Rotation)?;
    if ship.facing == facing {
        return Err(ValidationError::position(format!(
            "Ship is already facing {facing}"
        )));
    }
    Ok(())
}

pub fn validate_burn(
    ship: &Ship,
    rules: &RulesConfig,
    intensity: BurnIntensity,
    sector_adjustment: i32,
) -> Result<(), ValidationError> {
    if sector_adjustment.unsigned_abs() > rules.max_sector_adjustment {
        return Err(ValidationError::position(format!(
            "Sector adjustment {sector_adjustment} exceeds the maximum of {}",
            rules.max_sector_adjustment
        )));
    }
    require_ready(ship, SubsystemType::Engines)?;

    let cost = rules.burns.cost(intensity);
    let engines = ship.allocated(SubsystemType::Engines);
    if engines < cost.energy {
        return Err(ValidationError::resource(format!(
            "Insufficient engine energy for {intensity} burn: need {}, allocated {engines}",
            cost.energy
        )));
    }
    let mass = burn_mass_cost(rules, intensity, sector_adjustment);
    if ship.reaction_mass < mass {
        return Err(ValidationError::resource(format!(
            "Insufficient reaction mass for {intensity} burn: need {mass}, have {}",
            ship.reaction_mass
        )));
    }
    Ok(())
}

/// Returns the transfer point the ship will use. `well` is the ship's current well.
pub fn validate_transfer(
    world: &World,
    well: &GravityWell,
    rules: &RulesConfig,
    ship: &Ship,
    destination: WellId,
) -> Result<TransferPoint, ValidationError> {
    let position = ship.position;
    if destination == position.well {
        return Err(ValidationError::position(format!(
            "Ship is already in gravity well {destination}"
        )));
    }
    let outermost = well.outermost_ring();
    if position.ring != outermost {
        return Err(ValidationError::position(format!(
            "Well transfers are only possible from the outermost ring ({outermost}), ship is on ring {}",
            position.ring
        )));
    }
    if ship.facing != Facing::Prograde {
        return Err(ValidationError::position(
            "Ship must face prograde to make a well transfer",
        ));
    }
    let point = world
        .transfer_from(&position, destination)
        .copied()
        .ok_or_else(|| {
            ValidationError::position(format!(
                "No transfer point to well {destination} at ring {} sector {}",
                position.ring, position.sector
            ))
        })?;
    if let Some(level) = point.required_engine_level {
        let engines = ship.allocated(SubsystemType::Engines);
        if engines < level {
            return Err(ValidationError::resource(format!(
                "Transfer requires engine level {level}, allocated {engines}"
            )));
        }
    }
    if ship.reaction_mass < rules.transfer_mass_cost {
        return Err(ValidationError::resource(format!(
            "Insufficient reaction mass for well transfer: need {}, have {}",
            rules.transfer_mass_cost, ship.reaction_mass
        )));
    }
    Ok(point)
}

/// What a validated fire action will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOrder {
    Direct { damage: u32, solution: FiringSolution },
    Missile,
}

/// `well` is the attacker's current well.
pub fn validate_fire(
    well: &GravityWell,
    rules: &RulesConfig,
    state: &GameState,
    attacker_id: PlayerId,
    weapon: WeaponType,
    target_id: PlayerId,
) -> Result<FireOrder, ValidationError> {
    let ship = state
        .ship(attacker_id)
        .ok_or_else(|| ValidationError::target(format!("Attacker {attacker_id} not found")))?;

    if weapon == WeaponType::Missiles && ship.missile_inventory == 0 {
        return Err(ValidationError::resource("No missiles remaining"));
    }
    require_ready(ship, weapon.subsystem())?;

    if target_id == attacker_id {
        return Err(ValidationError::target("Cannot target own ship"));
    }
    let roster = candidate_roster(attacker_id, &ship.position, &state.players);
    if roster.is_empty() {
        return Err(ValidationError::target(
            "No targets available in this gravity well",
        ));
    }
    let Some(candidate) = roster.iter().find(|c| c.player_id == target_id) else {
        let reason = match state.ship(target_id) {
            None => format!("Target {target_id} not found"),
            Some(target) if !target.is_alive() => format!("Target {target_id} is already destroyed"),
            Some(_) => format!("Target {target_id} is not in this gravity well"),
        };
        return Err(ValidationError::target(reason));
    };

    let Some(stats) = rules.weapons.stats(weapon) else {
        return Ok(FireOrder::Missile);
    };
    let solution = firing_solution(&stats, &ShipPosture::of(ship), candidate, well).ok_or_else(|| {
        ValidationError::position(format!("No firing solution from ring {}", ship.position.ring))
    })?;

    if !solution.in_range {
        if solution.wrong_facing {
            return Err(ValidationError::position(format!(
                "Target {target_id} is behind the {weapon}'s firing arc; rotate to engage"
            )));
        }
        return Err(ValidationError::target(format!(
            "Target {target_id} is out of range for {weapon} (ring distance {}, sector distance {})",
            solution.ring_distance, solution.sector_distance
        )));
    }
    if solution.requires_engines && !ship.is_powered(SubsystemType::Engines) {
        return Err(ValidationError::subsystem(format!(
            "{weapon} recoil requires powered engines"
        )));
    }
    Ok(FireOrder::Direct {
        damage: stats.damage,
        solution,
    })
}
