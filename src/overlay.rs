use crate::board::{Board, bit, bitmask_to_positions, square};
use crate::movegen;
use crate::types::{CellView, Position, Side};

/// Interaction flags layered over a [`Board`], one bitmask per flag.
///
/// `active`, `valid_next_move` and `possible_capture` only live until the next
/// click. `another_jump` marks the piece in the middle of a capture chain and has
/// to survive until that chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionOverlay {
    active: u64,
    valid_next_move: u64,
    possible_capture: u64,
    another_jump: u64,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the per-click flags and keeps the chain marker.
    pub fn clean(&mut self) {
        self.active = 0;
        self.valid_next_move = 0;
        self.possible_capture = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Makes `pos` the selected piece and highlights its legal destinations.
    pub fn highlight(&mut self, board: &Board, pos: Position, side: Side) {
        self.clean();
        self.active = bit(square(pos));
        for dest in movegen::legal_destinations(pos, board, side) {
            self.valid_next_move |= bit(square(dest));
        }
    }

    /// Flags every piece of `side` that has a capture available.
    pub fn mark_forced_origins(&mut self, board: &Board, side: Side) {
        self.possible_capture = 0;
        for origin in movegen::forced_capture_origins(board, side).origins {
            self.possible_capture |= bit(square(origin));
        }
    }

    pub fn set_another_jump(&mut self, pos: Position) {
        self.another_jump = bit(square(pos));
    }

    pub fn active(&self) -> Option<Position> {
        bitmask_to_positions(self.active).first().copied()
    }

    /// The piece that must keep capturing, if a chain is in progress.
    pub fn chain_piece(&self) -> Option<Position> {
        bitmask_to_positions(self.another_jump).first().copied()
    }

    pub fn is_valid_next_move(&self, pos: Position) -> bool {
        (self.valid_next_move & bit(square(pos))) != 0
    }

    pub fn cell_view(&self, board: &Board, pos: Position) -> CellView {
        let mask = bit(square(pos));
        CellView {
            owner: board.owner(pos) as u8,
            is_king: board.is_king(pos),
            is_active: (self.active & mask) != 0,
            is_valid_next_move: (self.valid_next_move & mask) != 0,
            has_possible_capture: (self.possible_capture & mask) != 0,
            has_another_jump: (self.another_jump & mask) != 0,
        }
    }
}
