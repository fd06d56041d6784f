use log::{debug, info};

use crate::ai::{Agent, FullTurn, MinimaxAgent, RandomAgent};
use crate::board::Board;
use crate::config::{BOARD_SIZE, GameConfig, OpponentKind};
use crate::controller::{SelectionOutcome, TurnController};
use crate::error::{RulesError, RulesResult};
use crate::evaluator::{self, Evaluation, TurnClock};
use crate::types::{GameView, Position, Side};

/// One game between player 1 and an opponent.
///
/// `board` only changes when a full turn completes. While a human is in the
/// middle of a capture chain the partly played board lives in `in_progress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    in_progress: Option<Board>,
    clock: TurnClock,
    whose_turn: Side,
    opponent: Side,
    controller: TurnController,
}

impl GameState {
    pub fn new(opponent: OpponentKind) -> Self {
        let opponent = opponent.side();
        Self {
            board: Board::new(opponent),
            in_progress: None,
            clock: TurnClock::default(),
            whose_turn: Side::Player1,
            opponent,
            controller: TurnController::new(),
        }
    }

    /// Last committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// What the player sees: the committed board or the chain being played.
    pub fn current_board(&self) -> &Board {
        self.in_progress.as_ref().unwrap_or(&self.board)
    }

    pub fn clock(&self) -> TurnClock {
        self.clock
    }

    pub fn turn_count(&self) -> u32 {
        self.clock.turn_count
    }

    pub fn whose_turn(&self) -> Side {
        self.whose_turn
    }

    pub fn opponent(&self) -> Side {
        self.opponent
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Feeds one click into the turn controller for the side to move.
    pub fn apply_selection(&mut self, row: u8, col: u8) -> RulesResult<SelectionOutcome> {
        let pos = row_col_to_pos(row, col)?;
        if self.whose_turn == Side::Computer {
            return Err(RulesError::NotYourTurn {
                side: Side::Player1,
            });
        }

        let board = *self.current_board();
        let outcome = self
            .controller
            .apply_selection(&board, self.whose_turn, pos)?;

        if outcome.turn_completed {
            self.commit(outcome.board, outcome.king_made, outcome.capture_made);
        } else if outcome.board != board {
            self.in_progress = Some(outcome.board);
        }
        Ok(outcome)
    }

    /// Lets `agent` play the side to move.
    pub fn agent_move(&mut self, agent: &mut dyn Agent) -> RulesResult<FullTurn> {
        if agent.side() != self.whose_turn {
            return Err(RulesError::NotYourTurn { side: agent.side() });
        }

        let turn = agent.select_turn(&self.board, self.clock)?;
        self.commit(turn.board, turn.king_made, turn.capture_made);
        Ok(turn)
    }

    pub fn evaluate(&self) -> Evaluation {
        evaluator::evaluate(&self.board, self.opponent, self.clock)
    }

    fn commit(&mut self, board: Board, king_made: bool, capture_made: bool) {
        debug!(
            "turn {} done by {} (king={}, capture={})",
            self.clock.turn_count,
            self.whose_turn.label(),
            king_made,
            capture_made
        );
        self.board = board;
        self.in_progress = None;
        self.clock = self.clock.advance(king_made, capture_made);
        self.whose_turn = if self.whose_turn == Side::Player1 {
            self.opponent
        } else {
            Side::Player1
        };
        self.controller.reset();
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, whose_turn: Side) {
        self.board = board;
        self.in_progress = None;
        self.whose_turn = whose_turn;
        self.controller.reset();
    }
}

/// Starts a game against `opponent`.
pub fn new_game(opponent: OpponentKind) -> GameState {
    GameState::new(opponent)
}

/// A game together with the agent that plays the computer side, if any.
pub struct GameInstance {
    state: GameState,
    agent: Option<Box<dyn Agent>>,
    result: Option<Evaluation>,
}

impl GameInstance {
    pub fn new(config: GameConfig) -> Self {
        let agent: Option<Box<dyn Agent>> = match config.opponent {
            OpponentKind::Player2 => None,
            OpponentKind::Random => Some(Box::new(match config.seed {
                Some(seed) => RandomAgent::with_seed(Side::Computer, seed),
                None => RandomAgent::new(Side::Computer),
            })),
            OpponentKind::Minimax => {
                Some(Box::new(MinimaxAgent::new(
                    Side::Computer,
                    config.clamped_search_depth(),
                )))
            }
        };
        info!(
            "new game against {}",
            agent.as_ref().map_or("player 2", |a| a.name())
        );

        Self {
            state: GameState::new(config.opponent),
            agent,
            result: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.state.whose_turn() == Side::Computer
    }

    pub fn select_cell(&mut self, row: u8, col: u8) -> RulesResult<SelectionOutcome> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }
        let outcome = self.state.apply_selection(row, col)?;
        if outcome.turn_completed {
            self.refresh_result();
        }
        Ok(outcome)
    }

    pub fn do_ai_move(&mut self) -> RulesResult<FullTurn> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }
        let agent = self.agent.as_deref_mut().ok_or(RulesError::NoAgent)?;
        let turn = self.state.agent_move(agent)?;
        self.refresh_result();
        Ok(turn)
    }

    pub fn evaluation(&self) -> Evaluation {
        self.result.unwrap_or_else(|| self.state.evaluate())
    }

    pub fn to_view(&self) -> GameView {
        let board = self.state.current_board();
        let mut overlay = *self.state.controller().overlay();
        overlay.mark_forced_origins(board, self.state.whose_turn());

        let cells = (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position::new(row, col)))
            .map(|pos| overlay.cell_view(board, pos))
            .collect();
        let clock = self.state.clock();

        GameView {
            cells,
            turn_count: clock.turn_count,
            whose_turn: self.state.whose_turn(),
            opponent: self.state.opponent(),
            last_king_made_at: clock.last_king_made_at,
            last_capture_made_at: clock.last_capture_made_at,
            evaluation: self.evaluation(),
            is_game_over: self.is_game_over(),
        }
    }

    fn refresh_result(&mut self) {
        let eval = self.state.evaluate();
        if eval.is_won {
            info!("{} wins after {} turns", eval.winner.label(), self.state.turn_count());
            self.result = Some(eval);
        } else if eval.is_draw {
            info!("draw after {} turns", self.state.turn_count());
            self.result = Some(eval);
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, whose_turn: Side) {
        self.state.set_board_for_test(board, whose_turn);
        self.result = None;
    }
}

fn row_col_to_pos(row: u8, col: u8) -> RulesResult<Position> {
    if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
        return Err(RulesError::OutOfRange { row, col });
    }
    Ok(Position::new(row, col))
}
