//! Turn systems: the appliers the resolver runs phase by phase.
//!
//! Systems are pure functions over values. They take the records they need
//! and hand back replacements. None of them validate; an applier assumes its
//! action already passed `crate::validation`.

pub mod cleanup;
pub mod energy;
pub mod heat;
pub mod missiles;
pub mod movement;
pub mod scoop;
pub mod transfer;
pub mod weapons;

use gravwell_core::components::Ship;
use gravwell_core::enums::SubsystemType;

/// Flag a subsystem as spent for the rest of the turn.
pub(crate) fn mark_used(ship: Ship, subsystem_type: SubsystemType) -> Ship {
    match ship.subsystem(subsystem_type).copied() {
        Some(mut subsystem) => {
            subsystem.used_this_turn = true;
            ship.with_subsystem(subsystem)
        }
        None => ship,
    }
}
