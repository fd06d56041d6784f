use crate::board::Board;
use crate::error::RulesResult;
use crate::executor;
use crate::movegen;
use crate::types::{Position, Side};

/// A complete turn: one slide, or a whole capture chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullTurn {
    pub board: Board,
    pub king_made: bool,
    pub capture_made: bool,
}

impl FullTurn {
    /// The "no move" turn handed back by agents that cannot play.
    pub fn pass(board: &Board) -> Self {
        Self {
            board: *board,
            king_made: false,
            capture_made: false,
        }
    }
}

/// Plays `origin -> dest` and then finishes any capture chain on its own.
///
/// Continuation jumps always take the first capture in direction order; they are
/// never sampled or searched.
pub fn play_out(
    board: &Board,
    origin: Position,
    dest: Position,
    side: Side,
) -> RulesResult<FullTurn> {
    let mut step = executor::execute_step(board, origin, dest, side)?;
    let mut king_made = step.king_made;
    let mut capture_made = step.capture_made;

    while step.has_another_jump {
        let from = step.destination;
        let Some(&next) = movegen::legal_destinations(from, &step.board, side).first() else {
            break;
        };
        step = executor::execute_step(&step.board, from, next, side)?;
        king_made |= step.king_made;
        capture_made |= step.capture_made;
    }

    Ok(FullTurn {
        board: step.board,
        king_made,
        capture_made,
    })
}

/// Pieces of `side` allowed to start a turn: the capturing ones if any exist,
/// otherwise all of them.
pub fn turn_origins(board: &Board, side: Side) -> Vec<Position> {
    let forced = movegen::forced_capture_origins(board, side);
    if forced.is_forced() {
        forced.origins
    } else {
        board.piece_positions(side)
    }
}

/// Every full turn `side` can play, one per (origin, first destination) pair,
/// ordered by origin in row-major order and then by destination in direction order.
pub fn all_full_turns(board: &Board, side: Side) -> RulesResult<Vec<FullTurn>> {
    let mut turns = Vec::new();
    for origin in turn_origins(board, side) {
        for dest in movegen::legal_destinations(origin, board, side) {
            turns.push(play_out(board, origin, dest, side)?);
        }
    }
    Ok(turns)
}
