//! Tests for turn resolution, movement, weapons, missiles, heat, and previews.

use pretty_assertions::assert_eq;

use gravwell_core::actions::{Action, TacticalAction, TurnSubmission};
use gravwell_core::components::{Missile, Player, Ship};
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::*;
use gravwell_core::errors::{ErrorKind, Fault};
use gravwell_core::events::TurnEvent;
use gravwell_core::state::GameState;
use gravwell_core::types::Position;

use crate::engine::{RejectedTurn, ResolvedTurn, SimConfig, TurnResolver, TurnResult};
use crate::preview::{self, EnergyPreview};
use crate::systems::{energy, heat, missiles, movement};
use crate::validation;
use crate::world_setup::{new_ship, setup_game, standard_world};

// ---- Helpers ----

fn resolver() -> TurnResolver {
    TurnResolver::standard(RulesConfig::default())
}

fn state_with(a: Ship, b: Ship) -> GameState {
    GameState {
        game_id: "test".into(),
        turn: 0,
        phase: GamePhase::Active,
        active_player: 1,
        players: vec![
            Player {
                id: 1,
                name: "Alpha".into(),
                ship: a,
            },
            Player {
                id: 2,
                name: "Bravo".into(),
                ship: b,
            },
        ],
        missiles: Vec::new(),
        next_missile_id: 1,
        log: Vec::new(),
    }
}

fn ship_at(well: u32, ring: u32, sector: u32) -> Ship {
    new_ship(&RulesConfig::default(), Position::new(well, ring, sector))
}

fn powered(ship: Ship, allocations: &[(SubsystemType, u32)]) -> Ship {
    allocations
        .iter()
        .fold(ship, |ship, &(t, amount)| energy::allocate(ship, t, amount))
}

fn coast(sequence: u32) -> Action {
    Action::Coast {
        sequence: Some(sequence),
    }
}

fn fire(weapon: WeaponType, target_id: u32, sequence: u32) -> Action {
    Action::FireWeapon {
        weapon,
        target_id,
        sequence: Some(sequence),
    }
}

fn allocate(subsystem: SubsystemType, amount: u32) -> Action {
    Action::AllocateEnergy { subsystem, amount }
}

fn resolved(result: TurnResult) -> ResolvedTurn {
    match result {
        TurnResult::Resolved(turn) => turn,
        TurnResult::Rejected(r) => panic!("expected resolution, got {:?}", r.errors),
    }
}

fn rejected(result: TurnResult) -> RejectedTurn {
    match result {
        TurnResult::Rejected(turn) => turn,
        TurnResult::Resolved(r) => panic!("expected rejection, got events {:?}", r.events),
    }
}

/// Resolve for player 1 and expect a rejection of `kind` with the state untouched.
fn expect_rejected(state: &GameState, actions: &[Action], kind: ErrorKind) -> RejectedTurn {
    let turn = rejected(resolver().resolve(state, 1, actions).unwrap());
    assert_eq!(turn.state, *state, "rejected turn must not change state");
    assert!(
        turn.errors.iter().any(|e| e.kind == kind),
        "expected {kind}, got {:?}",
        turn.errors
    );
    turn
}

fn ship(state: &GameState, id: u32) -> &Ship {
    state.ship(id).unwrap()
}

// ---- Movement ----

#[test]
fn test_coast_on_ring_three_advances_two_sectors() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());

    assert_eq!(ship(&turn.state, 1).position, Position::new(0, 3, 2));
    assert_eq!(turn.state.turn, 1);
    assert_eq!(turn.state.active_player, 2);
    assert!(turn.events.contains(&TurnEvent::Coasted {
        from: Position::new(0, 3, 0),
        to: Position::new(0, 3, 2),
    }));
    // Only the active ship moves.
    assert_eq!(ship(&turn.state, 2).position, Position::new(0, 1, 12));
}

#[test]
fn test_drift_wraps_sector() {
    let world = standard_world();
    let from = Position::new(0, 1, 20);
    assert_eq!(movement::drift(&world, from).unwrap(), Position::new(0, 1, 4));
    assert!(movement::drift(&world, Position::new(0, 7, 0)).is_err());
}

#[test]
fn test_prograde_burn_moves_outward() {
    let own = powered(ship_at(0, 2, 5), &[(SubsystemType::Engines, 2)]);
    let state = state_with(own, ship_at(0, 1, 12));
    let actions = [Action::Burn {
        intensity: BurnIntensity::Light,
        sector_adjustment: 0,
        sequence: Some(1),
    }];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);

    assert_eq!(after.position, Position::new(0, 3, 9));
    assert_eq!(after.reaction_mass, 9);
    assert!(!after.subsystem(SubsystemType::Engines).unwrap().used_this_turn);
    assert!(turn.events.contains(&TurnEvent::Burned {
        intensity: BurnIntensity::Light,
        from: Position::new(0, 2, 5),
        to: Position::new(0, 3, 9),
        mass_spent: 1,
    }));
}

#[test]
fn test_retrograde_heavy_burn_clamps_and_adjusts() {
    let mut own = powered(ship_at(0, 2, 0), &[(SubsystemType::Engines, 3)]);
    own.facing = Facing::Retrograde;
    let state = state_with(own, ship_at(0, 4, 12));
    let actions = [Action::Burn {
        intensity: BurnIntensity::Heavy,
        sector_adjustment: -2,
        sequence: Some(1),
    }];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);

    assert_eq!(after.position, Position::new(0, 1, 2));
    assert_eq!(after.reaction_mass, 10 - 3 - 2);
}

/// Medium burn with 1 reaction mass is a resource error and changes nothing.
#[test]
fn test_medium_burn_without_mass_rejected() {
    let mut own = powered(ship_at(0, 3, 0), &[(SubsystemType::Engines, 2)]);
    own.reaction_mass = 1;
    let state = state_with(own, ship_at(0, 1, 12));
    let actions = [Action::Burn {
        intensity: BurnIntensity::Medium,
        sector_adjustment: 0,
        sequence: Some(1),
    }];
    let turn = expect_rejected(&state, &actions, ErrorKind::Resource);
    assert_eq!(turn.errors.len(), 1);
}

#[test]
fn test_burn_checks() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let burn = |adjustment| Action::Burn {
        intensity: BurnIntensity::Light,
        sector_adjustment: adjustment,
        sequence: Some(1),
    };
    // Engines unpowered.
    expect_rejected(&state, &[burn(0)], ErrorKind::SubsystemState);

    let engines = state_with(
        powered(ship_at(0, 3, 0), &[(SubsystemType::Engines, 1)]),
        ship_at(0, 1, 12),
    );
    expect_rejected(&engines, &[burn(4)], ErrorKind::Position);
    let medium = [Action::Burn {
        intensity: BurnIntensity::Medium,
        sector_adjustment: 0,
        sequence: Some(1),
    }];
    expect_rejected(&engines, &medium, ErrorKind::Resource);
    resolved(resolver().resolve(&engines, 1, &[burn(3)]).unwrap());
}

#[test]
fn test_allocation_then_burn_same_turn() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Engines, 2),
        Action::Burn {
            intensity: BurnIntensity::Medium,
            sector_adjustment: 1,
            sequence: Some(1),
        },
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);
    // Drift 2, ring 3 -> 4 (clamped), +1 adjustment.
    assert_eq!(after.position, Position::new(0, 4, 3));
    assert_eq!(after.reaction_mass, 7);
    assert_eq!(after.allocated(SubsystemType::Engines), 2);
    assert!(after.energy_balanced());
}

#[test]
fn test_rotation() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let rotate = Action::Rotate {
        facing: Facing::Retrograde,
        sequence: Some(1),
    };
    expect_rejected(&state, &[rotate.clone(), coast(2)], ErrorKind::SubsystemState);

    let actions = [allocate(SubsystemType::Rotation, 1), rotate, coast(2)];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);
    assert_eq!(after.facing, Facing::Retrograde);
    assert!(!after.subsystem(SubsystemType::Rotation).unwrap().used_this_turn);

    let same = [
        allocate(SubsystemType::Rotation, 1),
        Action::Rotate {
            facing: Facing::Prograde,
            sequence: Some(1),
        },
        coast(2),
    ];
    expect_rejected(&state, &same, ErrorKind::Position);
}

// ---- Sequencing ----

#[test]
fn test_missing_sequence_is_sequencing_error() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let turn = expect_rejected(&state, &[Action::Coast { sequence: None }], ErrorKind::Sequencing);
    assert!(turn.errors[0].message.contains("coast"), "{:?}", turn.errors);
}

#[test]
fn test_structural_sequencing_rules() {
    let state = state_with(ship_at(0, 4, 0), ship_at(0, 1, 12));
    let cases: Vec<Vec<Action>> = vec![
        // Duplicate sequence.
        vec![coast(1), fire(WeaponType::Laser, 2, 1)],
        // Gap.
        vec![coast(1), fire(WeaponType::Laser, 2, 3)],
        // Not starting at 1.
        vec![coast(2)],
        // No movement.
        vec![fire(WeaponType::Laser, 2, 1)],
        Vec::new(),
        // Two movements.
        vec![coast(1), coast(2)],
        // Same weapon twice.
        vec![
            fire(WeaponType::Laser, 2, 1),
            fire(WeaponType::Laser, 2, 2),
            coast(3),
        ],
        // Transfer after movement.
        vec![
            coast(1),
            Action::WellTransfer {
                destination_well: 1,
                sequence: Some(2),
            },
        ],
        // Transfer with a burn.
        vec![
            Action::WellTransfer {
                destination_well: 1,
                sequence: Some(1),
            },
            Action::Burn {
                intensity: BurnIntensity::Light,
                sector_adjustment: 0,
                sequence: Some(2),
            },
        ],
        // Two rotations.
        vec![
            Action::Rotate {
                facing: Facing::Retrograde,
                sequence: Some(1),
            },
            Action::Rotate {
                facing: Facing::Prograde,
                sequence: Some(2),
            },
            coast(3),
        ],
    ];
    for actions in &cases {
        let turn = expect_rejected(&state, actions, ErrorKind::Sequencing);
        assert!(
            turn.errors.iter().all(|e| e.kind == ErrorKind::Sequencing),
            "{actions:?} -> {:?}",
            turn.errors
        );
    }
}

#[test]
fn test_plan_orders_tactical_by_sequence() {
    let actions = [
        fire(WeaponType::Railgun, 2, 3),
        Action::VentHeat { amount: 1 },
        coast(2),
        allocate(SubsystemType::Railgun, 3),
        Action::Rotate {
            facing: Facing::Retrograde,
            sequence: Some(1),
        },
    ];
    let plan = validation::plan_turn(&actions).unwrap();
    let order: Vec<u32> = plan.tactical.iter().map(|a| a.sequence).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(plan.movement_sequence(), Some(2));
    assert_eq!(plan.allocations, vec![(SubsystemType::Railgun, 3)]);
    assert_eq!(plan.vents, vec![1]);
    assert_eq!(plan.tactical[1].action, TacticalAction::Coast);
}

#[test]
fn test_turn_order_preconditions() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let turn = rejected(resolver().resolve(&state, 2, &[coast(1)]).unwrap());
    assert_eq!(turn.errors[0].kind, ErrorKind::Sequencing);

    let mut finished = state.clone();
    finished.phase = GamePhase::Finished { winner: Some(1) };
    expect_rejected(&finished, &[coast(1)], ErrorKind::Sequencing);

    let dead = ship_at(0, 3, 0).damaged(100);
    let wrecked = state_with(dead, ship_at(0, 1, 12));
    expect_rejected(&wrecked, &[coast(1)], ErrorKind::SubsystemState);

    assert!(resolver().resolve(&state, 9, &[coast(1)]).is_err());
}

#[test]
fn test_submission_game_id_checked() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let wrong = TurnSubmission {
        game_id: "other".into(),
        player_id: 1,
        actions: vec![coast(1)],
    };
    let turn = rejected(resolver().resolve_submission(&state, &wrong).unwrap());
    assert_eq!(turn.errors[0].kind, ErrorKind::Sequencing);

    let right = TurnSubmission {
        game_id: "test".into(),
        ..wrong
    };
    assert!(resolver().resolve_submission(&state, &right).unwrap().is_resolved());
}

#[test]
fn test_later_phase_failure_rolls_back_earlier_phases() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Engines, 3),
        allocate(SubsystemType::Laser, 3),
        fire(WeaponType::Laser, 2, 1),
        coast(2),
    ];
    let turn = expect_rejected(&state, &actions, ErrorKind::Target);
    assert_eq!(ship(&turn.state, 1).allocated(SubsystemType::Engines), 0);
    assert_eq!(turn.state.turn, 0);
}

// ---- Energy ----

#[test]
fn test_allocation_limits() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    // Above the railgun maximum of 6.
    expect_rejected(&state, &[allocate(SubsystemType::Railgun, 7), coast(1)], ErrorKind::Resource);
    // Reactor exhausted.
    let actions = [
        allocate(SubsystemType::Engines, 6),
        allocate(SubsystemType::Laser, 5),
        coast(1),
    ];
    expect_rejected(&state, &actions, ErrorKind::Resource);
    // Amount outside 1..=10.
    expect_rejected(&state, &[allocate(SubsystemType::Engines, 0), coast(1)], ErrorKind::Resource);
    expect_rejected(&state, &[Action::VentHeat { amount: 11 }, coast(1)], ErrorKind::Resource);
    // Returning more than is allocated.
    let dealloc = Action::DeallocateEnergy {
        subsystem: SubsystemType::Shields,
        amount: 1,
    };
    expect_rejected(&state, &[dealloc, coast(1)], ErrorKind::Resource);
}

#[test]
fn test_deallocation_runs_after_allocation() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let actions = [
        Action::DeallocateEnergy {
            subsystem: SubsystemType::Shields,
            amount: 2,
        },
        allocate(SubsystemType::Shields, 5),
        coast(1),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);
    assert_eq!(after.allocated(SubsystemType::Shields), 3);
    assert_eq!(after.reactor.available_energy, 7);
    assert!(after.energy_balanced());
}

// ---- Weapons ----

#[test]
fn test_railgun_spinal_hit() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 3, 4));
    let actions = [
        allocate(SubsystemType::Railgun, 3),
        allocate(SubsystemType::Engines, 1),
        fire(WeaponType::Railgun, 2, 1),
        coast(2),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    assert_eq!(ship(&turn.state, 2).hit_points, 26);
    assert!(turn.events.contains(&TurnEvent::WeaponFired {
        weapon: WeaponType::Railgun,
        target_id: 2,
        damage: 4,
    }));
}

#[test]
fn test_railgun_recoil_needs_engines() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 3, 4));
    let actions = [
        allocate(SubsystemType::Railgun, 3),
        fire(WeaponType::Railgun, 2, 1),
        coast(2),
    ];
    let turn = expect_rejected(&state, &actions, ErrorKind::SubsystemState);
    assert!(turn.errors[0].message.contains("recoil"));
}

#[test]
fn test_railgun_behind_is_position_error() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 3, 20));
    let actions = [
        allocate(SubsystemType::Railgun, 3),
        allocate(SubsystemType::Engines, 1),
        fire(WeaponType::Railgun, 2, 1),
        coast(2),
    ];
    expect_rejected(&state, &actions, ErrorKind::Position);
}

#[test]
fn test_fire_uses_position_at_its_sequence() {
    // Target 7 sectors ahead: out of the railgun window before the coast,
    // 5 ahead after it.
    let base = [
        allocate(SubsystemType::Railgun, 3),
        allocate(SubsystemType::Engines, 1),
    ];
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 3, 7));

    let mut early = base.to_vec();
    early.extend([fire(WeaponType::Railgun, 2, 1), coast(2)]);
    expect_rejected(&state, &early, ErrorKind::Target);

    let mut late = base.to_vec();
    late.extend([coast(1), fire(WeaponType::Railgun, 2, 2)]);
    let turn = resolved(resolver().resolve(&state, 1, &late).unwrap());
    assert_eq!(ship(&turn.state, 2).hit_points, 26);
}

#[test]
fn test_laser_turret_range() {
    let in_range = state_with(ship_at(0, 2, 0), ship_at(0, 3, 2));
    let actions = [
        allocate(SubsystemType::Laser, 2),
        fire(WeaponType::Laser, 2, 1),
        coast(2),
    ];
    let turn = resolved(resolver().resolve(&in_range, 1, &actions).unwrap());
    assert_eq!(ship(&turn.state, 2).hit_points, 28);

    let same_ring = state_with(ship_at(0, 2, 0), ship_at(0, 2, 2));
    expect_rejected(&same_ring, &actions, ErrorKind::Target);

    let too_far = state_with(ship_at(0, 2, 0), ship_at(0, 3, 4));
    expect_rejected(&too_far, &actions, ErrorKind::Target);

    let unpowered = [fire(WeaponType::Laser, 2, 1), coast(2)];
    expect_rejected(&in_range, &unpowered, ErrorKind::SubsystemState);
}

#[test]
fn test_target_validation() {
    let actions = |target| {
        [
            allocate(SubsystemType::Laser, 2),
            fire(WeaponType::Laser, target, 1),
            coast(2),
        ]
    };
    let state = state_with(ship_at(0, 2, 0), ship_at(0, 3, 2));
    expect_rejected(&state, &actions(1), ErrorKind::Target);
    expect_rejected(&state, &actions(9), ErrorKind::Target);

    let elsewhere = state_with(ship_at(0, 2, 0), ship_at(1, 2, 2));
    let turn = expect_rejected(&elsewhere, &actions(2), ErrorKind::Target);
    assert!(turn.errors[0].message.contains("No targets"), "{:?}", turn.errors);
}

// ---- Missiles ----

#[test]
fn test_missile_launch_before_movement_drifts() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Missiles, 2),
        fire(WeaponType::Missiles, 2, 1),
        coast(2),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let missile = turn.state.missile(1).unwrap();
    assert_eq!(missile.position, Position::new(0, 3, 2));
    assert_eq!(missile.turns_alive, 0);
    assert_eq!(missile.owner_id, 1);
    assert!(!missile.skip_orbital_this_turn);
    assert_eq!(ship(&turn.state, 1).missile_inventory, 3);
    assert_eq!(turn.state.next_missile_id, 2);
    assert_eq!(ship(&turn.state, 2).hit_points, 30);
}

#[test]
fn test_missile_launch_after_movement_skips_drift() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Missiles, 2),
        coast(1),
        fire(WeaponType::Missiles, 2, 2),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let missile = turn.state.missile(1).unwrap();
    assert_eq!(missile.position, Position::new(0, 3, 2));
    assert!(!missile.skip_orbital_this_turn, "flag cleared at end of turn");
    assert!(turn.events.contains(&TurnEvent::MissileLaunched {
        missile_id: 1,
        target_id: 2,
        position: Position::new(0, 3, 2),
    }));
}

#[test]
fn test_missile_needs_ammunition() {
    let mut empty = ship_at(0, 3, 0);
    empty.missile_inventory = 0;
    let state = state_with(empty, ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Missiles, 2),
        fire(WeaponType::Missiles, 2, 1),
        coast(2),
    ];
    expect_rejected(&state, &actions, ErrorKind::Resource);
}

fn in_flight(id: u32, position: Position, turns_alive: u32) -> Missile {
    Missile {
        id,
        owner_id: 2,
        target_id: 1,
        position,
        turn_fired: 0,
        turns_alive,
        skip_orbital_this_turn: false,
    }
}

fn missile_state(missiles: Vec<Missile>) -> GameState {
    let mut state = state_with(ship_at(0, 4, 10), ship_at(0, 1, 0));
    state.turn = 1;
    state.next_missile_id = 10;
    state.missiles = missiles;
    state
}

#[test]
fn test_missile_guides_onto_target_and_hits() {
    let state = missile_state(vec![in_flight(1, Position::new(0, 4, 7), 2)]);
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());
    assert!(turn.state.missiles.is_empty());
    assert_eq!(ship(&turn.state, 1).hit_points, 25);
    assert!(turn.events.contains(&TurnEvent::MissileHit {
        missile_id: 1,
        target_id: 1,
        damage: 5,
    }));
}

#[test]
fn test_missile_damage_is_summed() {
    let state = missile_state(vec![
        in_flight(2, Position::new(0, 4, 7), 0),
        in_flight(1, Position::new(0, 4, 8), 0),
    ]);
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());
    assert!(turn.state.missiles.is_empty());
    assert_eq!(ship(&turn.state, 1).hit_points, 20);
}

#[test]
fn test_missile_closes_rings_before_sectors() {
    let state = missile_state(vec![in_flight(1, Position::new(0, 2, 0), 0)]);
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());
    let missile = turn.state.missile(1).unwrap();
    assert_eq!(missile.position, Position::new(0, 4, 5));
    assert_eq!(missile.turns_alive, 1);
}

#[test]
fn test_missile_expires_without_damage() {
    let mut state = missile_state(vec![in_flight(1, Position::new(0, 2, 0), 9)]);
    state.players[0].ship.position = Position::new(1, 2, 0);
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());
    assert!(turn.state.missiles.is_empty());
    assert!(turn.events.contains(&TurnEvent::MissileExpired { missile_id: 1 }));
    assert_eq!(ship(&turn.state, 1).hit_points, 30);
}

#[test]
fn test_missile_step_has_one_outcome() {
    let world = standard_world();
    let rules = RulesConfig::default();
    let target = ship_at(0, 4, 11);
    let missile = in_flight(1, Position::new(0, 1, 0), 3);

    let outcome = missiles::step(&world, &rules, missile, 1, Some(&target)).unwrap();
    assert!(matches!(outcome, missiles::MissileOutcome::Alive(m) if m.turns_alive == 4));

    // Fired this turn: drift only, no ageing.
    let fresh = Missile {
        turn_fired: 1,
        ..missile
    };
    let outcome = missiles::step(&world, &rules, fresh, 1, Some(&target)).unwrap();
    assert_eq!(
        outcome,
        missiles::MissileOutcome::Alive(Missile {
            position: Position::new(0, 1, 8),
            ..fresh
        })
    );

    // Dead target: drift, no guidance.
    let wreck = ship_at(0, 1, 9).damaged(100);
    let outcome = missiles::step(&world, &rules, missile, 1, Some(&wreck)).unwrap();
    assert_eq!(
        outcome,
        missiles::MissileOutcome::Alive(Missile {
            position: Position::new(0, 1, 8),
            turns_alive: 4,
            ..missile
        })
    );
}

// ---- Heat ----

#[test]
fn test_heat_damage_vent_and_overclock() {
    let mut hot = ship_at(0, 3, 0);
    hot.heat.current_heat = 4;
    let state = state_with(hot, ship_at(0, 1, 12));
    let actions = [
        allocate(SubsystemType::Railgun, 6),
        Action::VentHeat { amount: 3 },
        coast(1),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);
    assert_eq!(after.hit_points, 29);
    assert_eq!(after.heat.current_heat, 1 + 2);
    assert_eq!(after.heat.heat_to_vent, 0);
    for event in [
        TurnEvent::HeatVented { amount: 3 },
        TurnEvent::HeatDamage { amount: 1 },
        TurnEvent::HeatGenerated { amount: 2 },
    ] {
        assert!(turn.events.contains(&event), "missing {event:?}");
    }
}

#[test]
fn test_overclock_heat_lands_next_turn() {
    let cool = ship_at(0, 3, 0);
    let (cooled, report) = heat::end_of_turn(
        powered(cool, &[(SubsystemType::Engines, 5)]),
        0,
    );
    assert_eq!(report.damage, 0);
    assert_eq!(report.generated, 2);
    assert_eq!(cooled.hit_points, 30);
    assert_eq!(cooled.heat.current_heat, 2);

    let mut venting = ship_at(0, 3, 0);
    venting.heat.heat_to_vent = 5;
    let (cooled, report) = heat::end_of_turn(venting, 2);
    assert_eq!(report.vented, 2);
    assert_eq!(cooled.heat.current_heat, 0);
}

// ---- Transfers ----

fn transfer(destination_well: u32, sequence: u32) -> Action {
    Action::WellTransfer {
        destination_well,
        sequence: Some(sequence),
    }
}

#[test]
fn test_transfer_black_hole_to_planet() {
    let state = state_with(ship_at(0, 4, 0), ship_at(0, 1, 12));
    let actions = [allocate(SubsystemType::Engines, 2), transfer(1, 1), coast(2)];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    let after = ship(&turn.state, 1);
    assert_eq!(after.position, Position::new(1, 3, 13));
    assert_eq!(after.reaction_mass, 8);
    assert_eq!(after.transfer_state, None);
    assert!(turn.events.contains(&TurnEvent::WellTransferred {
        from: Position::new(0, 4, 0),
        to: Position::new(1, 3, 12),
        mass_spent: 2,
    }));
}

#[test]
fn test_transfer_planet_to_black_hole_needs_no_engines() {
    let state = state_with(ship_at(1, 3, 12), ship_at(0, 1, 12));
    let turn = resolved(resolver().resolve(&state, 1, &[transfer(0, 1), coast(2)]).unwrap());
    assert_eq!(ship(&turn.state, 1).position, Position::new(0, 4, 1));
}

#[test]
fn test_transfer_checks() {
    let engines = [allocate(SubsystemType::Engines, 2), transfer(1, 1), coast(2)];

    // Escape needs engine level 2.
    let state = state_with(ship_at(0, 4, 0), ship_at(0, 1, 12));
    expect_rejected(&state, &[transfer(1, 1), coast(2)], ErrorKind::Resource);

    // Wrong ring.
    let inner = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    expect_rejected(&inner, &engines, ErrorKind::Position);

    // Wrong sector.
    let off = state_with(ship_at(0, 4, 1), ship_at(0, 1, 12));
    expect_rejected(&off, &engines, ErrorKind::Position);

    // Facing retrograde.
    let mut backwards = ship_at(0, 4, 0);
    backwards.facing = Facing::Retrograde;
    expect_rejected(&state_with(backwards, ship_at(0, 1, 12)), &engines, ErrorKind::Position);

    // Not enough mass.
    let mut dry = ship_at(0, 4, 0);
    dry.reaction_mass = 1;
    expect_rejected(&state_with(dry, ship_at(0, 1, 12)), &engines, ErrorKind::Resource);
}

#[test]
fn test_transfer_validation_against_current_well() {
    let world = standard_world();
    let rules = RulesConfig::default();
    let planet = world.well(1).unwrap();

    let inner = ship_at(1, 2, 12);
    let err = validation::validate_transfer(&world, planet, &rules, &inner, 0).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Position);

    let outer = ship_at(1, 3, 12);
    let point = validation::validate_transfer(&world, planet, &rules, &outer, 0).unwrap();
    assert_eq!(point.to, Position::new(0, 4, 0));
}

#[test]
fn test_missing_well_is_fault_not_rejection() {
    let mut world = standard_world();
    world.wells.retain(|w| w.id != 0);
    let resolver = TurnResolver::new(world, RulesConfig::default());
    let state = state_with(ship_at(0, 4, 0), ship_at(0, 1, 12));
    let actions = [allocate(SubsystemType::Engines, 2), transfer(1, 1), coast(2)];
    let result = resolver.resolve(&state, 1, &actions);
    assert_eq!(result, Err(Fault::OffBoard(Position::new(0, 4, 0))));
}

// ---- End of turn ----

#[test]
fn test_scoop_collects_on_innermost_ring() {
    let mut low = ship_at(0, 1, 0);
    low.reaction_mass = 5;
    let state = state_with(low, ship_at(0, 4, 12));
    let actions = [allocate(SubsystemType::Scoop, 1), coast(1)];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    assert_eq!(ship(&turn.state, 1).reaction_mass, 6);
    assert!(turn.events.contains(&TurnEvent::MassScooped { amount: 1 }));

    let full = state_with(ship_at(0, 1, 0), ship_at(0, 4, 12));
    let turn = resolved(resolver().resolve(&full, 1, &actions).unwrap());
    assert_eq!(ship(&turn.state, 1).reaction_mass, 10);
}

#[test]
fn test_kill_ends_game() {
    let mut fragile = ship_at(0, 3, 2);
    fragile.hit_points = 2;
    let state = state_with(ship_at(0, 2, 0), fragile);
    let actions = [
        allocate(SubsystemType::Laser, 2),
        fire(WeaponType::Laser, 2, 1),
        coast(2),
    ];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    assert!(ship(&turn.state, 2).destroyed);
    assert_eq!(turn.state.phase, GamePhase::Finished { winner: Some(1) });
    assert!(turn.events.contains(&TurnEvent::ShipDestroyed { player_id: 2 }));
    assert!(turn.events.contains(&TurnEvent::GameOver { winner: Some(1) }));
    assert_eq!(turn.state.active_player, 1);

    let again = rejected(resolver().resolve(&turn.state, 1, &[coast(1)]).unwrap());
    assert_eq!(again.errors[0].kind, ErrorKind::Sequencing);
}

#[test]
fn test_events_are_logged() {
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 1, 12));
    let turn = resolved(resolver().resolve(&state, 1, &[coast(1)]).unwrap());
    assert_eq!(turn.state.log.len(), turn.events.len());
    assert!(turn.state.log.iter().all(|e| e.turn == 0 && e.player_id == 1));
}

// ---- Setup & determinism ----

fn roster() -> Vec<(u32, String)> {
    (1..=4).map(|i| (i, format!("Player {i}"))).collect()
}

#[test]
fn test_setup_places_ships_on_outer_ring() {
    let world = standard_world();
    let state = setup_game(&world, &SimConfig::default(), "g", &roster()).unwrap();
    assert_eq!(state.active_player, 1);
    let mut sectors: Vec<u32> = state.players.iter().map(|p| p.ship.position.sector).collect();
    for player in &state.players {
        assert_eq!(player.ship.position.well, 0);
        assert_eq!(player.ship.position.ring, 4);
        assert_eq!(player.ship.facing, Facing::Prograde);
        assert!(player.ship.energy_balanced());
    }
    sectors.sort_unstable();
    sectors.dedup();
    assert_eq!(sectors.len(), 4);

    assert!(setup_game(&world, &SimConfig::default(), "g", &[]).is_err());
}

#[test]
fn test_determinism_same_seed() {
    let world = standard_world();
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let a = setup_game(&world, &config, "g", &roster()).unwrap();
    let b = setup_game(&world, &config, "g", &roster()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );

    let other = setup_game(
        &world,
        &SimConfig {
            seed: 54321,
            ..Default::default()
        },
        "g",
        &roster(),
    )
    .unwrap();
    assert_ne!(a, other, "different seeds should place ships differently");
}

#[test]
fn test_standard_world_layout() {
    let world = standard_world();
    assert_eq!(world.wells.len(), 4);
    assert_eq!(world.transfer_points.len(), 6);
    let planet = world.well(2).unwrap();
    assert_eq!(planet.ring_count(), 3);
    assert!((planet.centre().length() - 450.0).abs() < 1e-9);
    let escape = world.transfer_from(&Position::new(0, 4, 8), 2).unwrap();
    assert_eq!(escape.to, Position::new(2, 3, 20));
    assert_eq!(escape.required_engine_level, Some(2));
}

// ---- Previews ----

#[test]
fn test_projected_position_matches_resolution() {
    let world = standard_world();
    let rules = RulesConfig::default();
    let burner = powered(ship_at(0, 2, 5), &[(SubsystemType::Engines, 2)]);
    let burn = TacticalAction::Burn {
        intensity: BurnIntensity::Medium,
        sector_adjustment: -1,
    };
    let projected = preview::projected_position(&world, &rules, &burner, &burn)
        .unwrap()
        .unwrap();

    let state = state_with(burner.clone(), ship_at(0, 1, 12));
    let actions = [Action::Burn {
        intensity: BurnIntensity::Medium,
        sector_adjustment: -1,
        sequence: Some(1),
    }];
    let turn = resolved(resolver().resolve(&state, 1, &actions).unwrap());
    assert_eq!(ship(&turn.state, 1).position, projected);

    let rotate = TacticalAction::Rotate {
        facing: Facing::Retrograde,
    };
    assert_eq!(preview::projected_position(&world, &rules, &burner, &rotate).unwrap(), None);
}

#[test]
fn test_range_preview_after_projected_posture() {
    let world = standard_world();
    let rules = RulesConfig::default();
    let state = state_with(ship_at(0, 3, 0), ship_at(0, 3, 7));
    let actions = [coast(1), fire(WeaponType::Railgun, 2, 2)];

    let now = preview::projected_posture(&world, &rules, &state, 1, &actions, 0).unwrap();
    let before = preview::range_preview(&world, &rules, &state, 1, WeaponType::Railgun, &now).unwrap();
    assert!(!before[0].in_range);

    let later = preview::projected_posture(&world, &rules, &state, 1, &actions, 1).unwrap();
    assert_eq!(later.position, Position::new(0, 3, 2));
    let after = preview::range_preview(&world, &rules, &state, 1, WeaponType::Railgun, &later).unwrap();
    assert!(after[0].in_range);
    assert!(after[0].requires_engines);

    let missiles = preview::range_preview(&world, &rules, &state, 1, WeaponType::Missiles, &later).unwrap();
    assert!(missiles.is_empty());
}

#[test]
fn test_energy_preview_rate_limits_returns() {
    let rules = RulesConfig::default();
    let mut preview = EnergyPreview::new(&ship_at(0, 3, 0), &rules);
    preview.allocate(SubsystemType::Laser, 5).unwrap();
    assert_eq!(preview.ship().reactor.available_energy, 5);

    preview.request_deallocation(SubsystemType::Laser, 5).unwrap();
    assert_eq!(preview.ship().allocated(SubsystemType::Laser), 2);
    assert_eq!(preview.pending_energy(), 2);
    assert_eq!(preview.remaining_budget(), 0);
    assert!(preview.request_deallocation(SubsystemType::Laser, 1).is_err());

    preview.request_vent(2).unwrap();
    assert_eq!(preview.pending_vent(), 2);

    preview.end_turn();
    assert_eq!(preview.ship().allocated(SubsystemType::Laser), 0);
    assert_eq!(preview.pending_energy(), 0);
    assert_eq!(preview.pending_vent(), 1);
    assert!(preview.ship().energy_balanced());
}
