//! Interactive turn state machine driven by one click at a time.

use log::debug;

use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::executor::{self, StepOutcome};
use crate::movegen;
use crate::overlay::SelectionOverlay;
use crate::types::{Position, Side};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    /// A piece is selected and its destinations are highlighted.
    Selected(Position),
    /// The piece must capture again before the turn can end.
    ForcedContinuation(Position),
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub board: Board,
    pub accepted: bool,
    pub turn_completed: bool,
    pub king_made: bool,
    pub capture_made: bool,
}

impl SelectionOutcome {
    fn rejected(board: &Board) -> Self {
        Self {
            board: *board,
            accepted: false,
            turn_completed: false,
            king_made: false,
            capture_made: false,
        }
    }

    fn highlighted(board: &Board) -> Self {
        Self {
            accepted: true,
            ..Self::rejected(board)
        }
    }
}

/// Turns a sequence of cell selections into one legal turn.
///
/// The controller never touches the caller's board; every accepted move comes
/// back as a new board in the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnController {
    overlay: SelectionOverlay,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &SelectionOverlay {
        &self.overlay
    }

    pub fn phase(&self) -> TurnPhase {
        if let Some(piece) = self.overlay.chain_piece() {
            TurnPhase::ForcedContinuation(piece)
        } else if let Some(origin) = self.overlay.active() {
            TurnPhase::Selected(origin)
        } else {
            TurnPhase::Idle
        }
    }

    /// Forgets any selection, e.g. when the other side takes over.
    pub fn reset(&mut self) {
        self.overlay.reset();
    }

    /// Handles a click on `pos` by `side`.
    pub fn apply_selection(
        &mut self,
        board: &Board,
        side: Side,
        pos: Position,
    ) -> RulesResult<SelectionOutcome> {
        let owner = board.owner(pos);

        if owner == Side::Empty && !self.overlay.is_valid_next_move(pos) {
            return Ok(SelectionOutcome::rejected(board));
        }
        if owner.is_enemy_of(side) {
            return Ok(SelectionOutcome::rejected(board));
        }

        let forced = movegen::forced_capture_origins(board, side);
        if forced.is_forced() {
            if let Some(piece) = self.overlay.chain_piece() {
                if board.owner(piece) != side {
                    // Left over from a turn that is no longer ours.
                    self.overlay.reset();
                } else {
                    let captures = movegen::capture_moves(
                        piece,
                        board,
                        &movegen::directions(piece, board, side),
                        side,
                    );
                    return if captures.contains(&pos) {
                        self.execute(board, piece, pos, side)
                    } else if pos == piece {
                        self.overlay.highlight(board, pos, side);
                        Ok(SelectionOutcome::highlighted(board))
                    } else {
                        Ok(SelectionOutcome::rejected(board))
                    };
                }
            }

            if forced.destinations.contains(&pos) {
                return match self.overlay.active() {
                    Some(origin) => self.execute(board, origin, pos, side),
                    None => Ok(SelectionOutcome::rejected(board)),
                };
            }
            if forced.origins.contains(&pos) {
                self.overlay.highlight(board, pos, side);
                return Ok(SelectionOutcome::highlighted(board));
            }
            return Ok(SelectionOutcome::rejected(board));
        }

        if self.overlay.is_valid_next_move(pos) {
            let origin = self.overlay.active().ok_or(RulesError::NoActivePiece)?;
            return self.execute(board, origin, pos, side);
        }

        self.overlay.highlight(board, pos, side);
        Ok(SelectionOutcome::highlighted(board))
    }

    fn execute(
        &mut self,
        board: &Board,
        origin: Position,
        dest: Position,
        side: Side,
    ) -> RulesResult<SelectionOutcome> {
        let StepOutcome {
            board: next,
            has_another_jump,
            king_made,
            capture_made,
            ..
        } = executor::execute_step(board, origin, dest, side)?;

        self.overlay.reset();
        if has_another_jump {
            self.overlay.set_another_jump(dest);
            debug!("{} must keep jumping from ({}, {})", side.label(), dest.row, dest.col);
        }

        Ok(SelectionOutcome {
            board: next,
            accepted: true,
            turn_completed: !has_another_jump,
            king_made,
            capture_made,
        })
    }
}
