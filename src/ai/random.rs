use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::ai::Agent;
use crate::ai::turns::{self, FullTurn};
use crate::board::Board;
use crate::error::RulesResult;
use crate::evaluator::TurnClock;
use crate::movegen;
use crate::types::{Position, Side};

/// Plays a uniformly random legal turn, preferring pieces that can capture.
pub struct RandomAgent {
    side: Side,
    rng: StdRng,
    pieces: Vec<Position>,
}

impl RandomAgent {
    pub const NAME: &'static str = "random";

    pub fn new(side: Side) -> Self {
        Self::with_rng(side, StdRng::from_entropy())
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self::with_rng(side, StdRng::seed_from_u64(seed))
    }

    fn with_rng(side: Side, rng: StdRng) -> Self {
        Self {
            side,
            rng,
            pieces: Vec::new(),
        }
    }

    /// Refreshes the list of pieces the agent owns on `board`.
    pub fn update_info(&mut self, board: &Board) {
        self.pieces = board.piece_positions(self.side);
    }

    pub fn pieces(&self) -> &[Position] {
        &self.pieces
    }

    /// Picks a piece, then one of its destinations, both uniformly at random.
    ///
    /// If any piece can capture only capturing pieces are drawn from. A piece
    /// with no destination is never drawn. Capture chains are finished with the
    /// first further capture rather than another random draw.
    pub fn select_from_pieces(&mut self, board: &Board) -> RulesResult<FullTurn> {
        let side = self.side;
        let capturing: Vec<Position> = self
            .pieces
            .iter()
            .copied()
            .filter(|&pos| movegen::has_capture(pos, board, side))
            .collect();
        let pool: Vec<Position> = if capturing.is_empty() {
            self.pieces
                .iter()
                .copied()
                .filter(|&pos| !movegen::legal_destinations(pos, board, side).is_empty())
                .collect()
        } else {
            capturing
        };

        let Some(&origin) = pool.choose(&mut self.rng) else {
            debug!("{} has no piece to move", side.label());
            return Ok(FullTurn::pass(board));
        };
        let destinations = movegen::legal_destinations(origin, board, side);
        let Some(&dest) = destinations.choose(&mut self.rng) else {
            return Ok(FullTurn::pass(board));
        };

        turns::play_out(board, origin, dest, side)
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn side(&self) -> Side {
        self.side
    }

    fn select_turn(&mut self, board: &Board, _clock: TurnClock) -> RulesResult<FullTurn> {
        self.update_info(board);
        self.select_from_pieces(board)
    }
}
