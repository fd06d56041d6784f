use serde::Serialize;

use crate::board::Board;
use crate::config::DRAW_TURN_LIMIT;
use crate::movegen;
use crate::types::Side;

/// Piece counts and game status for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub player_one_count: u32,
    pub opponent_count: u32,
    pub is_won: bool,
    /// `Side::Empty` unless `is_won`.
    pub winner: Side,
    pub is_draw: bool,
}

impl Evaluation {
    pub fn is_over(&self) -> bool {
        self.is_won || self.is_draw
    }
}

/// Turn counters that drive the draw rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnClock {
    pub turn_count: u32,
    pub last_king_made_at: u32,
    pub last_capture_made_at: u32,
}

impl TurnClock {
    /// Counts one completed turn, stamping promotions and captures made during it.
    pub fn advance(self, king_made: bool, capture_made: bool) -> Self {
        Self {
            turn_count: self.turn_count + 1,
            last_king_made_at: if king_made {
                self.turn_count
            } else {
                self.last_king_made_at
            },
            last_capture_made_at: if capture_made {
                self.turn_count
            } else {
                self.last_capture_made_at
            },
        }
    }

    /// The two quiet-turn counters are checked independently.
    pub fn is_draw(&self) -> bool {
        self.turn_count.saturating_sub(self.last_capture_made_at) >= DRAW_TURN_LIMIT
            || self.turn_count.saturating_sub(self.last_king_made_at) >= DRAW_TURN_LIMIT
    }
}

/// Decides whether the game is won, drawn, or still going.
///
/// Wins are checked first, in this order: player 1 wiped out, opponent wiped out,
/// player 1 unable to move, opponent unable to move.
pub fn evaluate(board: &Board, opponent: Side, clock: TurnClock) -> Evaluation {
    let player_one_count = board.count(Side::Player1);
    let opponent_count = board.count(opponent);

    let winner = if player_one_count == 0 {
        Some(opponent)
    } else if opponent_count == 0 {
        Some(Side::Player1)
    } else if !movegen::has_any_move(board, Side::Player1) {
        Some(opponent)
    } else if !movegen::has_any_move(board, opponent) {
        Some(Side::Player1)
    } else {
        None
    };

    Evaluation {
        player_one_count,
        opponent_count,
        is_won: winner.is_some(),
        winner: winner.unwrap_or(Side::Empty),
        is_draw: winner.is_none() && clock.is_draw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(turn_count: u32, last_king_made_at: u32, last_capture_made_at: u32) -> TurnClock {
        TurnClock {
            turn_count,
            last_king_made_at,
            last_capture_made_at,
        }
    }

    #[test]
    fn initial_position_continues() {
        let eval = evaluate(&Board::new(Side::Computer), Side::Computer, TurnClock::default());

        assert_eq!(eval.player_one_count, 12);
        assert_eq!(eval.opponent_count, 12);
        assert!(!eval.is_won);
        assert_eq!(eval.winner, Side::Empty);
        assert!(!eval.is_draw);
        assert!(!eval.is_over());
    }

    #[test]
    fn side_without_pieces_loses() {
        let board = Board::from_rows(&[
            "........", "........", "........", "...o....", "........", "........", "........",
            "........",
        ]);

        let eval = evaluate(&board, Side::Player2, TurnClock::default());
        assert!(eval.is_won);
        assert_eq!(eval.winner, Side::Player2);

        let board = Board::from_rows(&[
            "........", "........", "........", "...x....", "........", "........", "........",
            "........",
        ]);
        let eval = evaluate(&board, Side::Computer, TurnClock::default());
        assert!(eval.is_won);
        assert_eq!(eval.winner, Side::Player1);
        assert_eq!(eval.opponent_count, 0);
    }

    #[test]
    fn opponent_count_follows_the_active_opponent_identity() {
        // Player2 pieces do not count when the computer is the opponent.
        let board = Board::from_rows(&[
            "o.......", "........", "........", "........", "........", "........", "........",
            "x.......",
        ]);

        let eval = evaluate(&board, Side::Computer, TurnClock::default());

        assert_eq!(eval.opponent_count, 0);
        assert_eq!(eval.winner, Side::Player1);
    }

    #[test]
    fn blocked_side_loses() {
        let board = Board::from_rows(&[
            "........", "........", "........", "........", "........", "..c.....", ".c......",
            "x.......",
        ]);

        let eval = evaluate(&board, Side::Computer, TurnClock::default());

        assert!(eval.is_won);
        assert_eq!(eval.winner, Side::Computer);
    }

    #[test]
    fn blocked_opponent_loses() {
        let board = Board::from_rows(&[
            "c.......", ".x......", "..x.....", "........", "........", "........", "........",
            "........",
        ]);

        let eval = evaluate(&board, Side::Computer, TurnClock::default());

        assert!(eval.is_won);
        assert_eq!(eval.winner, Side::Player1);
    }

    #[test]
    fn fifty_quiet_turns_draw() {
        let board = Board::new(Side::Computer);

        assert!(!evaluate(&board, Side::Computer, clock(49, 0, 0)).is_draw);
        assert!(evaluate(&board, Side::Computer, clock(50, 0, 0)).is_draw);
    }

    #[test]
    fn either_counter_alone_triggers_the_draw() {
        let board = Board::new(Side::Computer);

        assert!(evaluate(&board, Side::Computer, clock(60, 5, 40)).is_draw);
        assert!(evaluate(&board, Side::Computer, clock(60, 40, 5)).is_draw);
        assert!(!evaluate(&board, Side::Computer, clock(60, 40, 40)).is_draw);
    }

    #[test]
    fn a_win_is_never_reported_as_a_draw() {
        let board = Board::from_rows(&[
            "........", "........", "........", "...x....", "........", "........", "........",
            "........",
        ]);

        let eval = evaluate(&board, Side::Computer, clock(100, 0, 0));

        assert!(eval.is_won);
        assert!(!eval.is_draw);
    }

    #[test]
    fn advance_stamps_the_turn_the_event_happened_on() {
        let start = clock(7, 2, 3);

        assert_eq!(start.advance(false, false), clock(8, 2, 3));
        assert_eq!(start.advance(true, false), clock(8, 7, 3));
        assert_eq!(start.advance(false, true), clock(8, 2, 7));
    }
}
