//! Rule constants and tuning parameters.
//!
//! These are the defaults behind `RulesConfig`; a rules file may override any
//! of them except the board geometry.

// --- Board geometry ---

/// Well id of the central black hole; planets follow from 1.
pub const BLACK_HOLE_ID: u32 = 0;

/// Sectors on every ring (uniform design).
pub const SECTORS_PER_RING: u32 = 24;

/// Black hole ring velocities, innermost first (sectors per turn).
pub const BLACK_HOLE_RING_VELOCITIES: [u32; 4] = [8, 4, 2, 1];

/// Black hole ring display radii, innermost first.
pub const BLACK_HOLE_RING_RADII: [f64; 4] = [120.0, 190.0, 260.0, 330.0];

/// Planet ring velocities, innermost first.
pub const PLANET_RING_VELOCITIES: [u32; 3] = [4, 2, 1];

/// Planet ring display radii, innermost first.
pub const PLANET_RING_RADII: [f64; 3] = [25.0, 45.0, 65.0];

/// Distance from the black hole to each planet (display units).
pub const PLANET_ORBIT_RADIUS: f64 = 450.0;

/// Planet bearings around the black hole in degrees.
pub const PLANET_BEARINGS_DEG: [f64; 3] = [0.0, 120.0, 240.0];

/// Engine allocation needed to climb out of the black hole through a transfer point.
pub const BLACK_HOLE_ESCAPE_ENGINE_LEVEL: u32 = 2;

// --- Ship defaults ---

/// Reactor capacity for a new ship.
pub const REACTOR_CAPACITY: u32 = 10;

/// Hull points for a new ship.
pub const MAX_HIT_POINTS: u32 = 30;

/// Reaction mass tank size; new ships start full.
pub const MAX_REACTION_MASS: u32 = 10;

/// Missiles carried at game start.
pub const STARTING_MISSILES: u32 = 4;

// --- Actions ---

/// Smallest energy / vent amount an action may carry.
pub const MIN_ACTION_AMOUNT: u32 = 1;

/// Largest energy / vent amount an action may carry.
pub const MAX_ACTION_AMOUNT: u32 = 10;

// --- Burns ---

/// Light burn: energy, mass, rings.
pub const LIGHT_BURN: (u32, u32, u32) = (1, 1, 1);

/// Medium burn: energy, mass, rings.
pub const MEDIUM_BURN: (u32, u32, u32) = (2, 2, 2);

/// Heavy burn: energy, mass, rings.
pub const HEAVY_BURN: (u32, u32, u32) = (3, 3, 3);

/// Extra reaction mass per sector of requested adjustment.
pub const SECTOR_ADJUSTMENT_MASS_COST: u32 = 1;

/// Largest sector adjustment a burn may request (either direction).
pub const MAX_SECTOR_ADJUSTMENT: u32 = 3;

// --- Well transfer ---

/// Reaction mass consumed by a well transfer.
pub const TRANSFER_MASS_COST: u32 = 2;

// --- Weapons ---

/// Laser: turret arc.
pub const LASER_RING_RANGE: u32 = 2;
pub const LASER_SECTOR_RANGE: u32 = 3;
pub const LASER_DAMAGE: u32 = 2;

/// Railgun: spinal arc with recoil.
pub const RAILGUN_SECTOR_RANGE: u32 = 6;
pub const RAILGUN_DAMAGE: u32 = 4;

// --- Missiles ---

/// Guidance fuel spent per turn (1 per ring or sector closed).
pub const MISSILE_FUEL_PER_TURN: u32 = 3;

/// Turns after which an unspent missile is removed.
pub const MISSILE_MAX_LIFETIME: u32 = 10;

/// Hull damage on a missile hit.
pub const MISSILE_DAMAGE: u32 = 5;

// --- Scoop ---

/// Reaction mass collected per turn by a powered scoop on an innermost ring.
pub const SCOOP_MASS_YIELD: u32 = 1;

// --- Preview ---

/// Energy + heat the preview model lets return to the reactor per turn.
pub const ENERGY_RETURN_RATE: u32 = 3;
