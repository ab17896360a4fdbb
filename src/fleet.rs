//! One side's ships and the placement validator.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::Coordinate;
use crate::common::EngineError;
use crate::config::{BOARD_SIZE, CATALOGUE, RANDOM_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, ShipKind, ShipPlacement, Side};

/// Ship placements for one side. At most one per kind, pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "FleetRecord", into = "FleetRecord"))]
pub struct Fleet {
    side: Side,
    placements: Vec<ShipPlacement>,
}

/// Stored form of a fleet: its side and the ordered placements.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetRecord {
    pub side: Side,
    pub placements: Vec<ShipPlacement>,
}

impl TryFrom<FleetRecord> for Fleet {
    type Error = EngineError;

    fn try_from(record: FleetRecord) -> Result<Self, Self::Error> {
        Fleet::from_placements(record.side, record.placements)
    }
}

impl From<Fleet> for FleetRecord {
    fn from(fleet: Fleet) -> Self {
        FleetRecord {
            side: fleet.side,
            placements: fleet.placements,
        }
    }
}

impl Fleet {
    /// Create an empty fleet (no ships placed).
    pub fn new(side: Side) -> Self {
        Self {
            side,
            placements: Vec::new(),
        }
    }

    /// Rebuild a fleet from stored placements, re-running the same
    /// validation as `place_ship` and keeping each hit counter.
    pub fn from_placements<I>(side: Side, placements: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = ShipPlacement>,
    {
        let mut fleet = Fleet::new(side);
        for stored in placements {
            fleet.place_ship(stored.kind(), stored.origin(), stored.orientation())?;
            if let Some(last) = fleet.placements.last_mut() {
                *last = last.with_hits(stored.hits());
            }
        }
        Ok(fleet)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Placements in the order they were made.
    pub fn placements(&self) -> &[ShipPlacement] {
        &self.placements
    }

    pub fn get(&self, kind: ShipKind) -> Option<&ShipPlacement> {
        self.placements.iter().find(|p| p.kind() == kind)
    }

    /// Ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&ShipPlacement> {
        self.placements.iter().find(|p| p.contains(coord))
    }

    pub(crate) fn get_mut(&mut self, kind: ShipKind) -> Option<&mut ShipPlacement> {
        self.placements.iter_mut().find(|p| p.kind() == kind)
    }

    /// Catalogue entries not yet placed, in catalogue order.
    pub fn unplaced_ships(&self) -> Vec<ShipKind> {
        CATALOGUE
            .iter()
            .copied()
            .filter(|&kind| self.get(kind).is_none())
            .collect()
    }

    /// `true` once every catalogue entry has a placement.
    pub fn is_complete(&self) -> bool {
        CATALOGUE.iter().all(|&kind| self.get(kind).is_some())
    }

    /// Check a placement against this fleet without committing it.
    pub fn validate(
        &self,
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipPlacement, EngineError> {
        if self.get(kind).is_some() {
            return Err(EngineError::AlreadyPlaced(kind));
        }
        let candidate = ShipPlacement::new(self.side, kind, origin, orientation)?;
        for square in candidate.squares() {
            if let Some(existing) = self.ship_at(square) {
                return Err(EngineError::Overlap {
                    ship: existing.kind(),
                    at: square,
                });
            }
        }
        Ok(candidate)
    }

    /// Validate and commit a placement. On error the fleet is unchanged.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipPlacement, EngineError> {
        let placement = self.validate(kind, origin, orientation).map_err(|e| {
            debug!("{} placement of {} at {} rejected: {}", self.side, kind, origin, e);
            e
        })?;
        self.placements.push(placement);
        debug!("{} placed {} at {} {:?}", self.side, kind, origin, orientation);
        Ok(placement)
    }

    /// Returns a random non-overlapping (origin, orientation) for `kind`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(Coordinate, Orientation), EngineError> {
        if self.get(kind).is_some() {
            return Err(EngineError::AlreadyPlaced(kind));
        }
        let size = BOARD_SIZE as i32;
        let len = kind.length() as i32;
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            let (max_x, max_y) = match orientation {
                Orientation::Vertical => (size, size - len + 1),
                Orientation::Horizontal => (size - len + 1, size),
            };
            let origin = Coordinate::new(rng.random_range(0..max_x), rng.random_range(0..max_y));
            if self.validate(kind, origin, orientation).is_ok() {
                return Ok((origin, orientation));
            }
        }
        Err(EngineError::UnableToPlaceShip(kind))
    }

    /// Randomly place every ship still missing from the fleet.
    pub fn place_remaining_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        for kind in self.unplaced_ships() {
            let (origin, orientation) = self.random_placement(rng, kind)?;
            self.place_ship(kind, origin, orientation)?;
        }
        Ok(())
    }
}
