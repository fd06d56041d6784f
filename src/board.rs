use crate::config::{BOARD_SIZE, HOME_ROWS, NUM_SQUARES};
use crate::types::{Position, Side};

const LAST_ROW: usize = BOARD_SIZE - 1;
const ROW_MASK: u64 = 0xff;
const FIRST_ROW_MASK: u64 = ROW_MASK;
const LAST_ROW_MASK: u64 = ROW_MASK << (LAST_ROW * BOARD_SIZE);

/// Checkers position represented by one bitboard per owner plus a king mask.
///
/// Square index is `row * 8 + col`, so ascending bit order is row-major order.
/// The board is a plain value: callers copy it (`let mut next = *board;`) before
/// changing anything, and nobody else ever observes the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    player1: u64,
    player2: u64,
    computer: u64,
    kings: u64,
}

impl Board {
    /// Creates the initial board:
    /// `opponent` on the dark squares of rows 0..3, `Player1` on rows 5..8.
    pub fn new(opponent: Side) -> Self {
        let mut board = Self::empty();
        for pos in 0..NUM_SQUARES {
            let (row, col) = pos_to_row_col(pos);
            if (row + col) % 2 != 0 {
                continue;
            }
            if row < HOME_ROWS {
                board.put(pos, opponent, false);
            } else if row >= BOARD_SIZE - HOME_ROWS {
                board.put(pos, Side::Player1, false);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a board from a diagram, one string per row starting at row 0.
    ///
    /// `x`/`X` Player1 man/king, `o`/`O` Player2, `c`/`C` Computer; any other
    /// character is an empty square.
    pub fn from_rows(rows: &[&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                let (side, king) = match ch {
                    'x' => (Side::Player1, false),
                    'X' => (Side::Player1, true),
                    'o' => (Side::Player2, false),
                    'O' => (Side::Player2, true),
                    'c' => (Side::Computer, false),
                    'C' => (Side::Computer, true),
                    _ => continue,
                };
                board.put(row * BOARD_SIZE + col, side, king);
            }
        }
        board
    }

    pub fn owner(&self, pos: Position) -> Side {
        self.owner_at(square(pos))
    }

    pub fn is_king(&self, pos: Position) -> bool {
        (self.kings & bit(square(pos))) != 0
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.owner(pos) == Side::Empty
    }

    /// Puts a piece on `pos`, replacing whatever was there.
    pub fn set(&mut self, pos: Position, side: Side, king: bool) {
        self.put(square(pos), side, king);
    }

    /// Empties `pos`. The king flag goes with the piece.
    pub fn clear(&mut self, pos: Position) {
        let mask = !bit(square(pos));
        self.player1 &= mask;
        self.player2 &= mask;
        self.computer &= mask;
        self.kings &= mask;
    }

    /// Returns the squares owned by `side` in row-major order.
    pub fn piece_positions(&self, side: Side) -> Vec<Position> {
        bitmask_to_positions(self.pieces_of(side))
    }

    pub fn count(&self, side: Side) -> u32 {
        self.pieces_of(side).count_ones()
    }

    pub fn count_kings(&self, side: Side) -> u32 {
        (self.pieces_of(side) & self.kings).count_ones()
    }

    /// Crowns every south piece on row 0 and every north piece on the last row.
    pub fn promote_back_rows(&mut self) {
        let north = self.player2 | self.computer;
        self.kings |= (self.player1 & FIRST_ROW_MASK) | (north & LAST_ROW_MASK);
    }

    pub(crate) fn pieces_of(&self, side: Side) -> u64 {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
            Side::Computer => self.computer,
            Side::Empty => !(self.player1 | self.player2 | self.computer),
        }
    }

    fn owner_at(&self, pos: usize) -> Side {
        let square = bit(pos);
        if (self.player1 & square) != 0 {
            Side::Player1
        } else if (self.player2 & square) != 0 {
            Side::Player2
        } else if (self.computer & square) != 0 {
            Side::Computer
        } else {
            Side::Empty
        }
    }

    fn put(&mut self, pos: usize, side: Side, king: bool) {
        let square = bit(pos);
        self.player1 &= !square;
        self.player2 &= !square;
        self.computer &= !square;
        self.kings &= !square;

        match side {
            Side::Player1 => self.player1 |= square,
            Side::Player2 => self.player2 |= square,
            Side::Computer => self.computer |= square,
            Side::Empty => return,
        }
        if king {
            self.kings |= square;
        }
    }
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

pub(crate) fn square(pos: Position) -> usize {
    pos.row as usize * BOARD_SIZE + pos.col as usize
}

fn pos_to_row_col(pos: usize) -> (usize, usize) {
    (pos / BOARD_SIZE, pos % BOARD_SIZE)
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Row on which pieces of `side` are crowned.
pub fn crowning_row(side: Side) -> u8 {
    if side.is_south() { 0 } else { LAST_ROW as u8 }
}

/// Steps `distance` squares from `pos` along `(dr, dc)`, or `None` off the board.
pub(crate) fn offset(pos: Position, (dr, dc): (i32, i32), distance: i32) -> Option<Position> {
    let row = pos.row as i32 + dr * distance;
    let col = pos.col as i32 + dc * distance;
    in_bounds(row, col).then(|| Position::new(row as u8, col as u8))
}

pub(crate) fn bitmask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut out = Vec::new();
    while mask != 0 {
        let (row, col) = pos_to_row_col(mask.trailing_zeros() as usize);
        out.push(Position::new(row as u8, col as u8));
        mask &= mask - 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PIECES_PER_SIDE;

    #[test]
    fn initial_board_places_twelve_pieces_per_side_on_dark_squares() {
        let board = Board::new(Side::Computer);

        assert_eq!(board.count(Side::Player1), PIECES_PER_SIDE);
        assert_eq!(board.count(Side::Computer), PIECES_PER_SIDE);
        assert_eq!(board.count(Side::Player2), 0);
        assert_eq!(board.count_kings(Side::Player1), 0);

        for pos in board.piece_positions(Side::Player1) {
            assert!(pos.row >= 5);
            assert_eq!((pos.row + pos.col) % 2, 0);
        }
        for pos in board.piece_positions(Side::Computer) {
            assert!(pos.row < 3);
            assert_eq!((pos.row + pos.col) % 2, 0);
        }
    }

    #[test]
    fn piece_positions_are_row_major() {
        let board = Board::new(Side::Player2);
        let positions = board.piece_positions(Side::Player2);

        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(0, 2));
        assert_eq!(positions[4], Position::new(1, 1));
        assert!(positions.windows(2).all(|w| square(w[0]) < square(w[1])));
    }

    #[test]
    fn clear_drops_the_king_flag_with_the_piece() {
        let mut board = Board::from_rows(&[
            "........", "........", "...X....", "........", "........", "........", "........",
            "........",
        ]);
        let pos = Position::new(2, 3);
        assert!(board.is_king(pos));

        board.clear(pos);

        assert!(board.is_empty(pos));
        assert!(!board.is_king(pos));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn copies_are_independent() {
        let board = Board::new(Side::Computer);
        let mut next = board;

        next.clear(Position::new(5, 1));

        assert_eq!(board.owner(Position::new(5, 1)), Side::Player1);
        assert!(next.is_empty(Position::new(5, 1)));
    }

    #[test]
    fn promote_back_rows_crowns_pieces_on_their_far_row() {
        let mut board = Board::from_rows(&[
            "x.X.c...", "........", "........", "........", "........", "........", "........",
            ".c.o.x..",
        ]);

        board.promote_back_rows();

        assert_eq!(board.count_kings(Side::Player1), 2);
        assert!(board.is_king(Position::new(0, 0)));
        assert!(board.is_king(Position::new(0, 2)));
        assert!(!board.is_king(Position::new(0, 4)));
        assert!(board.is_king(Position::new(7, 1)));
        assert!(board.is_king(Position::new(7, 3)));
        assert!(!board.is_king(Position::new(7, 5)));
    }

    #[test]
    fn crowning_rows_are_the_far_back_rows() {
        assert_eq!(crowning_row(Side::Player1), 0);
        assert_eq!(crowning_row(Side::Player2), 7);
        assert_eq!(crowning_row(Side::Computer), 7);
    }
}
