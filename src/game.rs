use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use log::info;
use rand::RngCore;

use crate::{
    ai::OpponentKind,
    board::{Board, CellState, Coordinate},
    common::EngineError,
    fleet::Fleet,
    moves::{resolve_move, MoveLog},
    player::Player,
    ship::{Orientation, ShipKind, ShipPlacement, Side},
};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Identifier of a stored match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identifier of the human player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.into())
    }
}

/// `true` iff every placement in `fleet` is sunk.
pub fn check_win(fleet: &Fleet) -> bool {
    fleet.placements().iter().all(ShipPlacement::is_sunk)
}

/// Everything belonging to one side: its ships, the shots it received and
/// the order they arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    pub fleet: Fleet,
    pub board: Board,
    pub log: MoveLog,
}

impl SideState {
    pub fn new(side: Side) -> Self {
        Self {
            fleet: Fleet::new(side),
            board: Board::new(),
            log: MoveLog::new(side),
        }
    }
}

/// Result of one shot, as reported to front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub attacker: Side,
    pub coordinate: Coordinate,
    pub state: CellState,
    /// The struck ship after this hit was counted.
    pub ship: Option<ShipPlacement>,
    /// Set when this shot ended the match.
    pub winner: Option<Side>,
}

impl MoveReport {
    pub fn sunk(&self) -> Option<ShipKind> {
        self.ship.filter(ShipPlacement::is_sunk).map(|p| p.kind())
    }
}

/// A single game between a human and a scripted opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    id: MatchId,
    player: PlayerId,
    opponent: OpponentKind,
    human: SideState,
    ai: SideState,
    next: Side,
    started_at: Timestamp,
    ended_at: Option<Timestamp>,
    ai_win: Option<bool>,
}

impl Match {
    /// New match with empty boards and fleets.
    pub fn new(id: MatchId, player: PlayerId, opponent: OpponentKind, started_at: Timestamp) -> Self {
        Self {
            id,
            player,
            opponent,
            human: SideState::new(Side::Human),
            ai: SideState::new(Side::Opponent),
            next: Side::Human,
            started_at,
            ended_at: None,
            ai_win: None,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn opponent(&self) -> OpponentKind {
        self.opponent
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    /// Side whose shot is accepted next. The human always opens.
    pub fn next_turn(&self) -> Side {
        self.next
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Winning side once the match is over.
    pub fn winner(&self) -> Option<Side> {
        self.ai_win
            .map(|ai| if ai { Side::Opponent } else { Side::Human })
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.ai,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Human => &mut self.human,
            Side::Opponent => &mut self.ai,
        }
    }

    pub fn unplaced_ships(&self, side: Side) -> Vec<ShipKind> {
        self.side(side).fleet.unplaced_ships()
    }

    /// Place a ship for `side`. Not allowed once shots have been fired.
    pub fn place_ship(
        &mut self,
        side: Side,
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipPlacement, EngineError> {
        self.ensure_placement_open(side)?;
        self.side_mut(side).fleet.place_ship(kind, origin, orientation)
    }

    /// Let `player` place whatever `side` still has to place.
    pub fn place_with(&mut self, side: Side, player: &mut dyn Player, rng: &mut dyn RngCore) -> Result<(), EngineError> {
        if self.side(side).fleet.is_complete() {
            return Ok(());
        }
        self.ensure_placement_open(side)?;
        // work on a copy so a failed layout leaves the fleet untouched
        let mut fleet = self.side(side).fleet.clone();
        player.place_ships(rng, &mut fleet)?;
        self.side_mut(side).fleet = fleet;
        Ok(())
    }

    fn ensure_placement_open(&self, side: Side) -> Result<(), EngineError> {
        if !self.is_active() {
            return Err(EngineError::MatchOver);
        }
        if !self.human.log.is_empty() || !self.ai.log.is_empty() {
            return Err(EngineError::PlacementLocked(side));
        }
        Ok(())
    }

    /// Fire a shot from `attacker` at the other side's board. Sides alternate,
    /// human first. The first shot that sinks a whole fleet ends the match.
    pub fn fire(&mut self, attacker: Side, coord: Coordinate, now: Timestamp) -> Result<MoveReport, EngineError> {
        if !self.is_active() {
            return Err(EngineError::MatchOver);
        }
        for side in [Side::Human, Side::Opponent] {
            if !self.side(side).fleet.is_complete() {
                return Err(EngineError::FleetIncomplete(side));
            }
        }
        if attacker != self.next {
            return Err(EngineError::NotYourTurn(attacker));
        }

        let defender = self.side_mut(attacker.other());
        let ship = resolve_move(coord, &mut defender.board, &mut defender.fleet, &mut defender.log)?;
        let won = check_win(&defender.fleet);
        self.next = attacker.other();

        let mut report = MoveReport {
            attacker,
            coordinate: coord,
            state: if ship.is_some() { CellState::Hit } else { CellState::Miss },
            ship,
            winner: None,
        };
        if won {
            self.finish(attacker, now);
            report.winner = Some(attacker);
        }
        Ok(report)
    }

    fn finish(&mut self, winner: Side, now: Timestamp) {
        if self.ended_at.is_some() {
            return;
        }
        self.ended_at = Some(now);
        self.ai_win = Some(winner == Side::Opponent);
        info!("match {} won by {}", self.id, winner);
    }
}
