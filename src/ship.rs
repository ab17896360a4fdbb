//! Ship kinds and placements.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::board::Coordinate;
use crate::common::EngineError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step from one square of a ship to the next.
    pub fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// The two sides of a match, from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The human player.
    Human,
    /// The scripted opponent.
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => f.write_str("human"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

/// Catalogue entry. Each side owns exactly one ship of every kind, so a kind
/// also identifies a ship within its fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Submarine,
    Cruiser,
    Destroyer,
}

impl ShipKind {
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Submarine => 3,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Submarine => "Submarine",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::config::CATALOGUE
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::UnknownShip(s.to_string()))
    }
}

/// A ship placed by one side, with its damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    side: Side,
    kind: ShipKind,
    origin: Coordinate,
    orientation: Orientation,
    hits: usize,
}

impl ShipPlacement {
    /// Build an unhit placement, checking that every square fits on the board.
    pub fn new(
        side: Side,
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, EngineError> {
        // origin itself first, then the far end
        origin.index()?;
        let (dx, dy) = orientation.step();
        let last = (kind.length() - 1) as i32;
        let end = origin.offset(dx * last, dy * last);
        if !end.in_bounds() {
            return Err(EngineError::OutOfBounds { x: end.x, y: end.y });
        }
        Ok(Self {
            side,
            kind,
            origin,
            orientation,
            hits: 0,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.kind.length()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Squares covered by the ship, starting at the origin.
    pub fn squares(&self) -> impl Iterator<Item = Coordinate> {
        let (dx, dy) = self.orientation.step();
        let origin = self.origin;
        (0..self.kind.length() as i32).map(move |i| origin.offset(dx * i, dy * i))
    }

    pub fn occupied_squares(&self) -> Vec<Coordinate> {
        self.squares().collect()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.squares().any(|sq| sq == coord)
    }

    pub fn is_sunk(&self) -> bool {
        self.hits == self.kind.length()
    }

    /// Count one more hit. Saturates at the ship length.
    pub(crate) fn register_hit(&mut self) {
        if self.hits < self.kind.length() {
            self.hits += 1;
        }
    }

    /// Restore a stored hit counter.
    pub fn with_hits(mut self, hits: usize) -> Self {
        self.hits = hits.min(self.kind.length());
        self
    }
}
