//! Shot resolution and the per-board move history.

use alloc::vec::Vec;

use log::debug;

use crate::board::{Board, CellState, Coordinate};
use crate::common::EngineError;
use crate::fleet::Fleet;
use crate::ship::{ShipKind, ShipPlacement, Side};

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub coordinate: Coordinate,
    pub state: CellState,
    /// Ship struck by the shot, `None` on a miss.
    pub ship: Option<ShipKind>,
}

impl MoveRecord {
    pub fn is_hit(&self) -> bool {
        self.state == CellState::Hit
    }
}

/// Append-only, chronological record of the shots taken at one side's board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveLog {
    target: Side,
    records: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new(target: Side) -> Self {
        Self {
            target,
            records: Vec::new(),
        }
    }

    /// Side whose board these shots landed on.
    pub fn target(&self) -> Side {
        self.target
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last `n` shots, oldest first and newest last.
    pub fn last_n(&self, n: usize) -> &[MoveRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn latest(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// Number of recorded hits on `kind`.
    pub fn hits_on(&self, kind: ShipKind) -> usize {
        self.records
            .iter()
            .filter(|r| r.is_hit() && r.ship == Some(kind))
            .count()
    }

    /// Whether the log alone shows `kind` as sunk.
    pub fn is_sunk(&self, kind: ShipKind) -> bool {
        self.hits_on(kind) >= kind.length()
    }

    fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }
}

/// What a shot will do, computed before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub coordinate: Coordinate,
    pub state: CellState,
    /// The struck ship with its hit counter already advanced.
    pub ship: Option<ShipPlacement>,
}

impl MoveOutcome {
    pub fn record(&self) -> MoveRecord {
        MoveRecord {
            coordinate: self.coordinate,
            state: self.state,
            ship: self.ship.map(|p| p.kind()),
        }
    }

    /// Commit the outcome: one cell update, at most one hit counter, one log entry.
    pub fn apply(&self, board: &mut Board, fleet: &mut Fleet, log: &mut MoveLog) -> Result<(), EngineError> {
        board.set_cell(self.coordinate, self.state)?;
        if let Some(hit) = self.ship {
            if let Some(placement) = fleet.get_mut(hit.kind()) {
                *placement = hit;
            }
        }
        log.push(self.record());
        Ok(())
    }
}

/// Work out the effect of a shot at `coord` without touching any state.
pub fn evaluate_move(coord: Coordinate, board: &Board, fleet: &Fleet) -> Result<MoveOutcome, EngineError> {
    if board.cell_at(coord)? != CellState::Empty {
        return Err(EngineError::RepeatedMove(coord));
    }
    // placements are disjoint, so at most one can match
    let outcome = match fleet.ship_at(coord) {
        Some(struck) => {
            let mut hit = *struck;
            hit.register_hit();
            MoveOutcome {
                coordinate: coord,
                state: CellState::Hit,
                ship: Some(hit),
            }
        }
        None => MoveOutcome {
            coordinate: coord,
            state: CellState::Miss,
            ship: None,
        },
    };
    Ok(outcome)
}

/// Apply one shot against the defending side. Returns the struck ship, or
/// `None` on a miss. Either everything is updated or nothing is.
pub fn resolve_move(
    coord: Coordinate,
    board: &mut Board,
    fleet: &mut Fleet,
    log: &mut MoveLog,
) -> Result<Option<ShipPlacement>, EngineError> {
    let outcome = evaluate_move(coord, board, fleet)?;
    outcome.apply(board, fleet, log)?;
    debug!(
        "shot at {} on {} board: {:?} {:?}",
        coord,
        fleet.side(),
        outcome.state,
        outcome.ship.map(|p| p.kind())
    );
    Ok(outcome.ship)
}
