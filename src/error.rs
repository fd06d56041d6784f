use thiserror::Error;

use crate::types::{Position, Side};

/// Errors surfaced by the rules engine.
///
/// An illegal click is not an error: the controller answers it with
/// `accepted = false`. These variants cover bad input coordinates, calls made
/// out of turn, and broken caller contracts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    /// The executor was asked to move to a square the move generator never offered.
    #[error("destination ({}, {}) is not reachable from ({}, {})", to.row, to.col, from.row, from.col)]
    UnreachableDestination { from: Position, to: Position },

    #[error("no active piece selected")]
    NoActivePiece,

    #[error("it is not {}'s turn", side.label())]
    NotYourTurn { side: Side },

    #[error("game is already over")]
    GameOver,

    #[error("no game has been started")]
    NoGame,

    #[error("opponent is not driven by an agent")]
    NoAgent,

    #[error("unknown opponent kind: {0}")]
    UnknownOpponent(String),
}

pub type RulesResult<T> = Result<T, RulesError>;
