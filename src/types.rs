use serde::Serialize;

use crate::evaluator::Evaluation;

/// Owner of a square.
///
/// `Player1` is the south player and always moves toward row 0. `Player2` and
/// `Computer` are the two possible identities of the north player; exactly one of
/// them takes part in a given game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum Side {
    #[default]
    Empty = 0,
    Player1 = 1,
    Player2 = 2,
    Computer = 3,
}

impl Side {
    /// True when `self` holds a piece that `side` may capture.
    pub fn is_enemy_of(self, side: Side) -> bool {
        self != Side::Empty && self != side
    }

    /// The south player promotes on row 0, everybody else on the last row.
    pub fn is_south(self) -> bool {
        self == Side::Player1
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Empty => "Nobody",
            Side::Player1 => "Player 1",
            Side::Player2 => "Player 2",
            Side::Computer => "Computer",
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Everything a renderer needs to draw one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub owner: u8,
    pub is_king: bool,
    pub is_active: bool,
    pub is_valid_next_move: bool,
    pub has_possible_capture: bool,
    pub has_another_jump: bool,
}

/// Public game snapshot returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Row-major, 64 entries.
    pub cells: Vec<CellView>,
    pub turn_count: u32,
    pub whose_turn: Side,
    pub opponent: Side,
    pub last_king_made_at: u32,
    pub last_capture_made_at: u32,
    pub evaluation: Evaluation,
    pub is_game_over: bool,
}

/// Result of one click, as seen by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub accepted: bool,
    pub turn_completed: bool,
    pub king_made: bool,
    pub capture_made: bool,
    pub view: GameView,
}
