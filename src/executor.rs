use log::debug;

use crate::board::{Board, crowning_row, offset};
use crate::error::{RulesError, RulesResult};
use crate::movegen::{self, Direction};
use crate::types::{Position, Side};

/// Result of one atomic step: a slide or a single jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub board: Board,
    pub destination: Position,
    /// The same piece must jump again before the turn ends.
    pub has_another_jump: bool,
    pub king_made: bool,
    pub capture_made: bool,
}

/// Moves the piece on `origin` to `dest` and reports how the turn continues.
///
/// Caller contract: `dest` must be one of `movegen::legal_destinations(origin, ..)`.
/// Anything else is rejected with `RulesError::UnreachableDestination` and the
/// input board is left as it was.
pub fn execute_step(
    board: &Board,
    origin: Position,
    dest: Position,
    side: Side,
) -> RulesResult<StepOutcome> {
    let unreachable = || RulesError::UnreachableDestination {
        from: origin,
        to: dest,
    };
    if board.owner(origin) != side
        || !movegen::legal_destinations(origin, board, side).contains(&dest)
    {
        return Err(unreachable());
    }
    let (dir, distance) = find_direction(origin, dest, board, side).ok_or_else(unreachable)?;

    let mut next = *board;
    let was_king = board.is_king(origin);
    next.clear(origin);
    next.set(dest, side, was_king);

    let capture_made = distance == 2;
    if capture_made {
        let middle = offset(origin, dir, 1).ok_or_else(unreachable)?;
        next.clear(middle);
    }

    next.promote_back_rows();
    let king_made = dest.row == crowning_row(side);

    // Reaching the crowning row ends the turn, for men and kings alike.
    let has_another_jump = !king_made && capture_made && movegen::has_capture(dest, &next, side);

    debug!(
        "{} moved ({}, {}) -> ({}, {}) capture={} king={} continues={}",
        side.label(),
        origin.row,
        origin.col,
        dest.row,
        dest.col,
        capture_made,
        king_made,
        has_another_jump
    );

    Ok(StepOutcome {
        board: next,
        destination: dest,
        has_another_jump,
        king_made,
        capture_made,
    })
}

fn find_direction(
    origin: Position,
    dest: Position,
    board: &Board,
    side: Side,
) -> Option<(Direction, i32)> {
    movegen::directions(origin, board, side)
        .into_iter()
        .flat_map(|dir| [(dir, 1), (dir, 2)])
        .find(|&(dir, distance)| offset(origin, dir, distance) == Some(dest))
}
