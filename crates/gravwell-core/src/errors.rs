//! Rule violations and faults.
//!
//! A `ValidationError` is an expected outcome: the batch broke a rule and
//! is rejected. A `Fault` means the state itself is unusable and the caller
//! has a bug.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PlayerId, Position, WellId};

/// Category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, duplicate, or non-contiguous sequence numbers; illegal ordering.
    Sequencing,
    /// Not enough energy, reaction mass, or ammunition.
    Resource,
    /// Subsystem unpowered or already used; ship destroyed.
    SubsystemState,
    /// Wrong ring, wrong facing, no transfer point.
    Position,
    /// No targets, unknown target, self-targeting, out of range.
    Target,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Sequencing => "SequencingError",
            ErrorKind::Resource => "ResourceError",
            ErrorKind::SubsystemState => "SubsystemStateError",
            ErrorKind::Position => "PositionError",
            ErrorKind::Target => "TargetError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn sequencing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Sequencing, message)
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resource, message)
    }

    pub fn subsystem(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SubsystemState, message)
    }

    pub fn position(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Position, message)
    }

    pub fn target(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Target, message)
    }
}

/// Structural corruption. Never produced by a well-formed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("player {0} has no record in this game")]
    MissingPlayer(PlayerId),
    #[error("gravity well {0} does not exist")]
    MissingWell(WellId),
    #[error("position {0:?} is not on the board")]
    OffBoard(Position),
    #[error("corrupt state: {0}")]
    CorruptState(String),
}
