//! Shots received by one side, stored as 100 cell states.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::common::EngineError;
use crate::config::{BOARD_SIZE, CELL_COUNT};

const SIZE: i32 = BOARD_SIZE as i32;

/// A square on the grid. Values outside `[0, 9]` are representable so that
/// callers can ask about them and get `OutOfBounds` back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate for a linear index `y * 10 + x`.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= CELL_COUNT {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self::new((idx % size) as i32, (idx / size) as i32))
    }

    /// Linear index of this coordinate, failing when it is off the board.
    pub fn index(self) -> Result<usize, EngineError> {
        if self.in_bounds() {
            Ok((self.y * SIZE + self.x) as usize)
        } else {
            Err(EngineError::OutOfBounds {
                x: self.x,
                y: self.y,
            })
        }
    }

    pub fn in_bounds(self) -> bool {
        (0..SIZE).contains(&self.x) && (0..SIZE).contains(&self.y)
    }

    /// Neighbouring coordinate. Saturates instead of wrapping, so the result
    /// of an extreme step is simply off the board.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Miss,
    Hit,
}

impl CellState {
    /// Character used by the board string encoding.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Miss => 'o',
            CellState::Hit => 'x',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellState::Empty),
            'o' => Some(CellState::Miss),
            'x' => Some(CellState::Hit),
            _ => None,
        }
    }
}

/// Errors from parsing the `.`/`o`/`x` board encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 100 cells, found {0}")]
    Length(usize),
    #[error("unknown cell symbol {symbol:?} at index {index}")]
    Symbol { index: usize, symbol: char },
}

/// One side's board: a fixed 100-cell sequence, all `Empty` at match start.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; CELL_COUNT],
        }
    }

    pub fn cell_at(&self, coord: Coordinate) -> Result<CellState, EngineError> {
        Ok(self.cells[coord.index()?])
    }

    pub fn set_cell(&mut self, coord: Coordinate, state: CellState) -> Result<(), EngineError> {
        let idx = coord.index()?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Copy of this board with one cell replaced.
    pub fn with_cell(&self, coord: Coordinate, state: CellState) -> Result<Self, EngineError> {
        let mut next = *self;
        next.set_cell(coord, state)?;
        Ok(next)
    }

    /// Cells in linear-index order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == CellState::Empty)
            .filter_map(|(i, _)| Coordinate::from_index(i))
    }

    pub fn is_empty_at(&self, coord: Coordinate) -> bool {
        matches!(self.cell_at(coord), Ok(CellState::Empty))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.iter() {
            fmt::Write::write_char(f, cell.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != CELL_COUNT {
            return Err(ParseBoardError::Length(len));
        }
        let mut board = Board::new();
        for (index, symbol) in s.chars().enumerate() {
            board.cells[index] =
                CellState::from_symbol(symbol).ok_or(ParseBoardError::Symbol { index, symbol })?;
        }
        Ok(board)
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for Board {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
        encoded.parse().map_err(serde::de::Error::custom)
    }
}
