// Opponent targeting. Both strategies are pure functions of the target board
// and the log of shots already taken at it; nothing is remembered between calls.

use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use log::debug;
use rand::{Rng, RngCore};

use crate::{
    board::{Board, CellState, Coordinate},
    config::CELL_COUNT,
    moves::MoveLog,
};

/// Neighbour probe order around a lone hit: +x, -x, +y, -y.
const PROBE_ORDER: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Capability shared by every opponent: pick the next shot.
///
/// Implementations must only return coordinates that are `Empty` on `board`.
/// `None` means the board has no empty cell left.
pub trait ChooseMove {
    fn choose_move(&self, board: &Board, log: &MoveLog, rng: &mut dyn RngCore) -> Option<Coordinate>;
}

/// Draw uniformly random cells until an empty one turns up.
pub fn random_empty<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Coordinate> {
    if board.count(CellState::Empty) == 0 {
        return None;
    }
    loop {
        let idx = rng.random_range(0..CELL_COUNT);
        if board.cells()[idx] == CellState::Empty {
            return Coordinate::from_index(idx);
        }
    }
}

/// Random opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scan;

impl ChooseMove for Scan {
    fn choose_move(&self, board: &Board, _log: &MoveLog, rng: &mut dyn RngCore) -> Option<Coordinate> {
        random_empty(board, rng)
    }
}

/// Conceptual mode of the hunt-and-target opponent for a given log tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hunting,
    Targeting(Coordinate),
}

/// Hunt randomly; after a hit, work around it or along the line it forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuntAndTarget {
    corrected_axis: bool,
}

impl HuntAndTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant whose line extension follows the detected axis. The default
    /// always steps along x, which misses vertical ships.
    pub fn with_corrected_axis() -> Self {
        Self { corrected_axis: true }
    }

    /// Decide the mode from the two newest log entries.
    pub fn mode(&self, board: &Board, log: &MoveLog) -> Mode {
        let [previous, newest] = log.last_n(2) else {
            return Mode::Hunting;
        };
        if !newest.is_hit() {
            return Mode::Hunting;
        }
        let Some(struck) = newest.ship else {
            return Mode::Hunting;
        };
        if log.is_sunk(struck) {
            return Mode::Hunting;
        }

        let from = newest.coordinate;
        if previous.is_hit() && previous.ship == Some(struck) {
            let (px, py) = (previous.coordinate.x, previous.coordinate.y);
            // stored logs are not trusted to hold in-range coordinates
            if u64::from(from.x.abs_diff(px)) + u64::from(from.y.abs_diff(py)) == 1 {
                let next = self.extend_line(from, from.x - px, from.y - py);
                return if board.is_empty_at(next) {
                    Mode::Targeting(next)
                } else {
                    Mode::Hunting
                };
            }
        }

        PROBE_ORDER
            .iter()
            .map(|&(dx, dy)| from.offset(dx, dy))
            .find(|&c| board.is_empty_at(c))
            .map_or(Mode::Hunting, Mode::Targeting)
    }

    fn extend_line(&self, from: Coordinate, dx: i32, dy: i32) -> Coordinate {
        if self.corrected_axis {
            from.offset(dx, dy)
        } else {
            // observable opponent behaviour: the step is applied to x even
            // when the line runs along y
            from.offset(dx + dy, 0)
        }
    }
}

impl ChooseMove for HuntAndTarget {
    fn choose_move(&self, board: &Board, log: &MoveLog, rng: &mut dyn RngCore) -> Option<Coordinate> {
        match self.mode(board, log) {
            Mode::Targeting(next) => {
                debug!("targeting {}", next);
                Some(next)
            }
            Mode::Hunting => random_empty(board, rng),
        }
    }
}

/// Opponent type tag stored with a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum OpponentKind {
    #[default]
    Scan,
    HuntTarget,
}

impl OpponentKind {
    pub fn tag(self) -> &'static str {
        match self {
            OpponentKind::Scan => "scan",
            OpponentKind::HuntTarget => "hunt-target",
        }
    }
}

impl ChooseMove for OpponentKind {
    fn choose_move(&self, board: &Board, log: &MoveLog, rng: &mut dyn RngCore) -> Option<Coordinate> {
        match self {
            OpponentKind::Scan => Scan.choose_move(board, log, rng),
            OpponentKind::HuntTarget => HuntAndTarget::new().choose_move(board, log, rng),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OpponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "fry" is the tag older matches were stored with
            "scan" | "fry" => Ok(OpponentKind::Scan),
            "hunt-target" => Ok(OpponentKind::HuntTarget),
            other => Err(other.to_string()),
        }
    }
}
