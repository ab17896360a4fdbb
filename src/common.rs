//! Errors shared by the match engine.

use alloc::string::String;
use thiserror::Error;

use crate::board::Coordinate;
use crate::ship::{ShipKind, Side};

/// Errors returned by engine operations. Every one of them leaves the
/// board, fleet and move log exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Coordinate, or some square of a ship, lies outside the 10x10 grid.
    #[error("({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },
    /// Ship name is not part of the catalogue.
    #[error("unknown ship {0}")]
    UnknownShip(String),
    /// Ship kind already has a placement in this fleet.
    #[error("ship {0} invalid or already placed")]
    AlreadyPlaced(ShipKind),
    /// Proposed squares collide with a placed ship.
    #[error("overlaps with {ship} at {at}")]
    Overlap { ship: ShipKind, at: Coordinate },
    /// Random placement found no free spot for the ship.
    #[error("unable to place {0}")]
    UnableToPlaceShip(ShipKind),
    /// Shot at a cell already marked hit or miss.
    #[error("already a move at {0}")]
    RepeatedMove(Coordinate),
    /// The match has a winner; no more moves are accepted.
    #[error("match is already over")]
    MatchOver,
    /// A side fired out of turn.
    #[error("it is not the {0} side's turn")]
    NotYourTurn(Side),
    /// A side tried to fire before both fleets were complete.
    #[error("{0} fleet is not fully placed")]
    FleetIncomplete(Side),
    /// Placement attempted after shots have been exchanged.
    #[error("{0} fleet can no longer be changed")]
    PlacementLocked(Side),
}

impl EngineError {
    /// `true` for both flavours of the unknown-ship error: a name outside the
    /// catalogue, or a kind that has already been placed.
    pub fn is_unknown_ship(&self) -> bool {
        matches!(self, EngineError::UnknownShip(_) | EngineError::AlreadyPlaced(_))
    }
}
