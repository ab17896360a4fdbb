use rand::RngCore;

use crate::{
    ai::{ChooseMove, OpponentKind},
    board::{Board, Coordinate},
    common::EngineError,
    fleet::Fleet,
    moves::MoveLog,
};

/// Interface implemented by scripted sides.
pub trait Player {
    /// Place every ship still missing from `fleet`.
    fn place_ships(&mut self, rng: &mut dyn RngCore, fleet: &mut Fleet) -> Result<(), EngineError>;

    /// Choose the next target on `board`, given the shots already taken at it.
    fn select_target(&mut self, rng: &mut dyn RngCore, board: &Board, log: &MoveLog) -> Option<Coordinate>;
}

/// Scripted player: random fleet layout plus one of the targeting strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiPlayer {
    kind: OpponentKind,
}

impl AiPlayer {
    pub fn new(kind: OpponentKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> OpponentKind {
        self.kind
    }
}

impl Player for AiPlayer {
    fn place_ships(&mut self, rng: &mut dyn RngCore, fleet: &mut Fleet) -> Result<(), EngineError> {
        fleet.place_remaining_randomly(rng)
    }

    fn select_target(&mut self, rng: &mut dyn RngCore, board: &Board, log: &MoveLog) -> Option<Coordinate> {
        self.kind.choose_move(board, log, rng)
    }
}
