//! Board and ship factories for setting up a game.
//!
//! Builds the canonical board (one black hole, three planets) and places
//! freshly fitted ships on it.

use glam::DVec2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gravwell_core::components::*;
use gravwell_core::config::RulesConfig;
use gravwell_core::constants::*;
use gravwell_core::enums::*;
use gravwell_core::errors::Fault;
use gravwell_core::state::GameState;
use gravwell_core::types::{PlayerId, Position};
use gravwell_core::world::{GravityWell, Ring, TransferPoint, World};

use crate::engine::SimConfig;

fn rings(velocities: &[u32], radii: &[f64]) -> Vec<Ring> {
    velocities
        .iter()
        .zip(radii)
        .enumerate()
        .map(|(i, (&angular_velocity, &radius))| Ring {
            index: i as u32 + 1,
            angular_velocity,
            sector_count: SECTORS_PER_RING,
            radius,
        })
        .collect()
}

/// Black-hole sector that faces a planet at `bearing_deg`.
fn facing_sector(bearing_deg: f64) -> u32 {
    let width = 360.0 / SECTORS_PER_RING as f64;
    (bearing_deg.rem_euclid(360.0) / width).floor() as u32 % SECTORS_PER_RING
}

/// The canonical board.
///
/// Each planet is linked to the black hole by a pair of transfer points: the
/// black hole's outermost ring at the sector facing the planet, and the
/// planet's outermost ring at the sector facing back. Climbing out of the
/// black hole needs engine power; falling in does not.
pub fn standard_world() -> World {
    let mut wells = vec![GravityWell {
        id: BLACK_HOLE_ID,
        name: "Black Hole".into(),
        kind: WellKind::BlackHole,
        rings: rings(&BLACK_HOLE_RING_VELOCITIES, &BLACK_HOLE_RING_RADII),
        orbital_position: None,
    }];
    let mut transfer_points = Vec::new();

    let black_hole_outer = BLACK_HOLE_RING_VELOCITIES.len() as u32;
    let planet_outer = PLANET_RING_VELOCITIES.len() as u32;

    for (i, &bearing) in PLANET_BEARINGS_DEG.iter().enumerate() {
        let id = BLACK_HOLE_ID + 1 + i as u32;
        wells.push(GravityWell {
            id,
            name: format!("Planet {}", i + 1),
            kind: WellKind::Planet,
            rings: rings(&PLANET_RING_VELOCITIES, &PLANET_RING_RADII),
            orbital_position: Some(DVec2::from_angle(bearing.to_radians()) * PLANET_ORBIT_RADIUS),
        });

        let outbound = facing_sector(bearing);
        let inbound = (outbound + SECTORS_PER_RING / 2) % SECTORS_PER_RING;
        let black_hole_side = Position::new(BLACK_HOLE_ID, black_hole_outer, outbound);
        let planet_side = Position::new(id, planet_outer, inbound);

        transfer_points.push(TransferPoint {
            from: black_hole_side,
            to: planet_side,
            required_engine_level: Some(BLACK_HOLE_ESCAPE_ENGINE_LEVEL),
        });
        transfer_points.push(TransferPoint {
            from: planet_side,
            to: black_hole_side,
            required_engine_level: None,
        });
    }

    World {
        wells,
        transfer_points,
    }
}

/// A fresh ship: nothing allocated, full reactor, tanks, hull and magazine.
pub fn new_ship(rules: &RulesConfig, position: Position) -> Ship {
    Ship {
        position,
        facing: Facing::Prograde,
        reaction_mass: rules.max_reaction_mass,
        max_reaction_mass: rules.max_reaction_mass,
        hit_points: rules.max_hit_points,
        max_hit_points: rules.max_hit_points,
        transfer_state: None,
        subsystems: SubsystemType::ALL.iter().map(|t| Subsystem::new(*t)).collect(),
        reactor: Reactor {
            total_capacity: rules.reactor_capacity,
            available_energy: rules.reactor_capacity,
        },
        heat: Heat::default(),
        missile_inventory: rules.starting_missiles,
        destroyed: false,
    }
}

/// Start a game: every ship on the black hole's outermost ring, each at a
/// distinct sector drawn from the seeded RNG. Roster order is turn order.
pub fn setup_game(
    world: &World,
    config: &SimConfig,
    game_id: &str,
    players: &[(PlayerId, String)],
) -> Result<GameState, Fault> {
    let well = world
        .well(BLACK_HOLE_ID)
        .ok_or(Fault::MissingWell(BLACK_HOLE_ID))?;
    let ring_index = well.outermost_ring();
    let ring = well
        .ring(ring_index)
        .ok_or(Fault::OffBoard(Position::new(BLACK_HOLE_ID, ring_index, 0)))?;

    let Some((first, _)) = players.first() else {
        return Err(Fault::CorruptState("a game needs at least one player".into()));
    };
    if players.len() > ring.sector_count as usize {
        return Err(Fault::CorruptState(format!(
            "{} players do not fit on a ring of {} sectors",
            players.len(),
            ring.sector_count
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut sectors: Vec<u32> = (0..ring.sector_count).collect();
    sectors.shuffle(&mut rng);

    let players = players
        .iter()
        .zip(sectors)
        .map(|((id, name), sector)| Player {
            id: *id,
            name: name.clone(),
            ship: new_ship(&config.rules, Position::new(BLACK_HOLE_ID, ring_index, sector)),
        })
        .collect();

    Ok(GameState {
        game_id: game_id.to_string(),
        turn: 0,
        phase: GamePhase::Active,
        active_player: *first,
        players,
        missiles: Vec::new(),
        next_missile_id: 1,
        log: Vec::new(),
    })
}
