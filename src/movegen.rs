//! Legal-move generation: directionality, capture dominance and forced captures.

use crate::board::{Board, offset};
use crate::types::{Position, Side};

pub type Direction = (i32, i32);

const TOWARD_FIRST_ROW: [Direction; 2] = [(-1, -1), (-1, 1)];
const TOWARD_LAST_ROW: [Direction; 2] = [(1, -1), (1, 1)];

/// Directions the piece on `pos` may travel in, forward first.
///
/// Men of the south side only move toward row 0, men of the north side only
/// toward the last row. Kings get the backward pair appended.
pub fn directions(pos: Position, board: &Board, side: Side) -> Vec<Direction> {
    let (forward, backward) = if side.is_south() {
        (TOWARD_FIRST_ROW, TOWARD_LAST_ROW)
    } else {
        (TOWARD_LAST_ROW, TOWARD_FIRST_ROW)
    };

    let mut out = forward.to_vec();
    if board.is_king(pos) {
        out.extend_from_slice(&backward);
    }
    out
}

/// Landing squares of every single jump from `pos` along `directions`.
pub fn capture_moves(
    pos: Position,
    board: &Board,
    directions: &[Direction],
    side: Side,
) -> Vec<Position> {
    directions
        .iter()
        .filter_map(|&dir| {
            let middle = offset(pos, dir, 1)?;
            let landing = offset(pos, dir, 2)?;
            (board.owner(middle).is_enemy_of(side) && board.is_empty(landing)).then_some(landing)
        })
        .collect()
}

fn adjacent_moves(pos: Position, board: &Board, directions: &[Direction]) -> Vec<Position> {
    directions
        .iter()
        .filter_map(|&dir| offset(pos, dir, 1))
        .filter(|&dest| board.is_empty(dest))
        .collect()
}

/// Destinations for the piece on `pos`. A piece that can capture may only capture.
pub fn legal_destinations(pos: Position, board: &Board, side: Side) -> Vec<Position> {
    let directions = directions(pos, board, side);
    let captures = capture_moves(pos, board, &directions, side);
    if !captures.is_empty() {
        return captures;
    }
    adjacent_moves(pos, board, &directions)
}

/// Every capture available to `side`, and the pieces that can make them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedCaptures {
    pub destinations: Vec<Position>,
    pub origins: Vec<Position>,
}

impl ForcedCaptures {
    /// When true, `side` must capture this turn.
    pub fn is_forced(&self) -> bool {
        !self.destinations.is_empty()
    }
}

pub fn forced_capture_origins(board: &Board, side: Side) -> ForcedCaptures {
    let mut forced = ForcedCaptures::default();
    for pos in board.piece_positions(side) {
        let captures = capture_moves(pos, board, &directions(pos, board, side), side);
        if !captures.is_empty() {
            forced.origins.push(pos);
            forced.destinations.extend(captures);
        }
    }
    forced
}

/// Shorthand for "`pos` has at least one capture".
pub fn has_capture(pos: Position, board: &Board, side: Side) -> bool {
    !capture_moves(pos, board, &directions(pos, board, side), side).is_empty()
}

/// True if any piece of `side` can move at all.
pub fn has_any_move(board: &Board, side: Side) -> bool {
    board
        .piece_positions(side)
        .into_iter()
        .any(|pos| !legal_destinations(pos, board, side).is_empty())
}
