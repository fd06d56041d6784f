use log::debug;
use web_time::Instant;

use crate::ai::Agent;
use crate::ai::turns::{self, FullTurn};
use crate::board::Board;
use crate::error::RulesResult;
use crate::evaluator::{self, TurnClock};
use crate::types::Side;

/// One searched position, seen from the agent's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub utility: i32,
    /// Position after the chosen turn, or the searched position itself at a leaf.
    pub board: Board,
    /// `turn_count` is the searched node's own; the stamps are those of the chosen turn.
    pub clock: TurnClock,
    pub king_made: bool,
    pub capture_made: bool,
}

/// Fixed-depth minimax over full turns with a material evaluation.
pub struct MinimaxAgent {
    side: Side,
    enemy: Side,
    depth: u8,
}

impl MinimaxAgent {
    pub const NAME: &'static str = "minimax";

    /// `side` is the opponent identity the agent plays; its enemy is always player 1.
    pub fn new(side: Side, depth: u8) -> Self {
        Self {
            side,
            enemy: Side::Player1,
            depth,
        }
    }

    /// Kings count double. Always from the agent's side, whoever is to move.
    pub fn evaluate(&self, board: &Board) -> i32 {
        let own_kings = board.count_kings(self.side) as i32;
        let enemy_kings = board.count_kings(self.enemy) as i32;
        let own_discs = board.count(self.side) as i32 - own_kings;
        let enemy_discs = board.count(self.enemy) as i32 - enemy_kings;

        2 * (own_kings - enemy_kings) + (own_discs - enemy_discs)
    }

    /// Searches `depth` full turns ahead.
    ///
    /// The agent moves on maximizing nodes and its enemy on minimizing ones, so
    /// the root call passes `minimizing = false`. Among candidates with equal
    /// utility the one enumerated last wins.
    pub fn search(
        &self,
        board: &Board,
        depth: u8,
        minimizing: bool,
        clock: TurnClock,
    ) -> RulesResult<SearchNode> {
        let leaf = SearchNode {
            utility: self.evaluate(board),
            board: *board,
            clock,
            king_made: false,
            capture_made: false,
        };
        if depth == 0 || evaluator::evaluate(board, self.side, clock).is_over() {
            return Ok(leaf);
        }

        let side_to_move = if minimizing { self.enemy } else { self.side };
        let mut best: Option<SearchNode> = None;

        for candidate in turns::all_full_turns(board, side_to_move)? {
            let next_clock = clock.advance(candidate.king_made, candidate.capture_made);
            let utility = self
                .search(&candidate.board, depth - 1, !minimizing, next_clock)?
                .utility;

            let replaces = match best {
                None => true,
                Some(current) if minimizing => utility <= current.utility,
                Some(current) => utility >= current.utility,
            };
            if replaces {
                best = Some(SearchNode {
                    utility,
                    board: candidate.board,
                    clock: TurnClock {
                        turn_count: clock.turn_count,
                        ..next_clock
                    },
                    king_made: candidate.king_made,
                    capture_made: candidate.capture_made,
                });
            }
        }

        Ok(best.unwrap_or(leaf))
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn side(&self) -> Side {
        self.side
    }

    fn select_turn(&mut self, board: &Board, clock: TurnClock) -> RulesResult<FullTurn> {
        let started = Instant::now();
        let node = self.search(board, self.depth, false, clock)?;
        debug!(
            "minimax depth {} picked utility {} in {:?}",
            self.depth,
            node.utility,
            started.elapsed()
        );

        Ok(FullTurn {
            board: node.board,
            king_made: node.king_made,
            capture_made: node.capture_made,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn evaluation_counts_kings_double_from_the_agent_side() {
        let board = Board::from_rows(&[
            "C.c.....", "........", "........", "........", "........", "........", "........",
            "x.x.X.X.",
        ]);
        let agent = MinimaxAgent::new(Side::Computer, 1);

        // kings 1 vs 2, discs 1 vs 2
        assert_eq!(agent.evaluate(&board), 2 * (1 - 2) + (1 - 2));
        assert_eq!(agent.evaluate(&Board::new(Side::Computer)), 0);
    }

    #[test]
    fn single_available_turn_is_returned_with_its_evaluation() {
        let board = Board::from_rows(&[
            "c.......", "........", "........", "........", "........", "........", "........",
            ".......x",
        ]);
        let agent = MinimaxAgent::new(Side::Computer, 1);

        let node = agent.search(&board, 1, false, TurnClock::default()).unwrap();

        let only = turns::all_full_turns(&board, Side::Computer).unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(node.board, only[0].board);
        assert_eq!(node.board.owner(p(1, 1)), Side::Computer);
        assert_eq!(node.utility, agent.evaluate(&only[0].board));
    }

    #[test]
    fn equal_utilities_resolve_to_the_last_candidate() {
        let board = Board::from_rows(&[
            "c...c...", "........", "........", "........", "........", "........", "........",
            ".......x",
        ]);
        let mut agent = MinimaxAgent::new(Side::Computer, 1);

        let turn = agent.select_turn(&board, TurnClock::default()).unwrap();

        // Candidates: (0,0)->(1,1), (0,4)->(1,3), (0,4)->(1,5); all evaluate to 1.
        assert_eq!(turn.board.owner(p(1, 5)), Side::Computer);
        assert!(turn.board.is_empty(p(0, 4)));
        assert_eq!(turn.board.owner(p(0, 0)), Side::Computer);
    }

    #[test]
    fn depth_two_avoids_a_move_that_loses_the_piece() {
        let board = Board::from_rows(&[
            "........", "........", "..c.....", "........", "....x...", "........", "........",
            "........",
        ]);
        let mut agent = MinimaxAgent::new(Side::Computer, 2);

        let node = agent.search(&board, 2, false, TurnClock::default()).unwrap();
        assert_eq!(node.utility, 0);

        let turn = agent.select_turn(&board, TurnClock::default()).unwrap();
        assert_eq!(turn.board.owner(p(3, 1)), Side::Computer);
    }

    #[test]
    fn depth_one_takes_the_capture_and_reports_it() {
        let board = Board::from_rows(&[
            "........", "........", "..c.....", "...x....", "........", "........", "........",
            "x.......",
        ]);
        let mut agent = MinimaxAgent::new(Side::Computer, 1);

        let turn = agent.select_turn(&board, TurnClock::default()).unwrap();

        assert!(turn.capture_made);
        assert!(!turn.king_made);
        assert_eq!(turn.board.owner(p(4, 4)), Side::Computer);
        assert_eq!(turn.board.count(Side::Player1), 1);
    }

    #[test]
    fn promotion_is_reported_and_stamped() {
        let board = Board::from_rows(&[
            "........", "........", "........", "........", "........", "........", "..c.....",
            "x.......",
        ]);
        let agent = MinimaxAgent::new(Side::Computer, 1);
        let clock = TurnClock {
            turn_count: 9,
            last_king_made_at: 0,
            last_capture_made_at: 4,
        };

        let node = agent.search(&board, 1, false, clock).unwrap();

        assert!(node.king_made);
        assert_eq!(node.clock.turn_count, 9);
        assert_eq!(node.clock.last_king_made_at, 9);
        assert_eq!(node.clock.last_capture_made_at, 4);
    }

    #[test]
    fn finished_games_and_depth_zero_are_leaves() {
        let agent = MinimaxAgent::new(Side::Computer, 3);

        let won = Board::from_rows(&[
            "c.......", "........", "........", "........", "........", "........", "........",
            "........",
        ]);
        let node = agent.search(&won, 3, false, TurnClock::default()).unwrap();
        assert_eq!(node.board, won);
        assert_eq!(node.utility, 1);

        let start = Board::new(Side::Computer);
        let node = agent.search(&start, 0, false, TurnClock::default()).unwrap();
        assert_eq!(node.board, start);
        assert!(!node.king_made && !node.capture_made);
    }

    #[test]
    fn opening_search_returns_a_legal_turn() {
        let board = Board::new(Side::Computer);
        let mut agent = MinimaxAgent::new(Side::Computer, 3);

        let turn = agent.select_turn(&board, TurnClock::default()).unwrap();

        let legal = turns::all_full_turns(&board, Side::Computer).unwrap();
        assert!(legal.contains(&turn));
    }
}
