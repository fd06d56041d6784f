use std::str::FromStr;

use serde::Deserialize;

use crate::error::RulesError;
use crate::types::Side;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const HOME_ROWS: usize = 3;
pub const PIECES_PER_SIDE: u32 = 12;
/// Turns without a capture (or without a promotion) after which the game is drawn.
pub const DRAW_TURN_LIMIT: u32 = 50;
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
/// Deepest search a host may ask for; the tree grows as branching^depth.
pub const MAX_SEARCH_DEPTH: u8 = 6;

/// Who sits on the north side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// A second human sharing the same board.
    Player2,
    Random,
    #[default]
    Minimax,
}

impl OpponentKind {
    pub fn side(self) -> Side {
        match self {
            OpponentKind::Player2 => Side::Player2,
            OpponentKind::Random | OpponentKind::Minimax => Side::Computer,
        }
    }
}

impl FromStr for OpponentKind {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player2" => Ok(OpponentKind::Player2),
            "random" => Ok(OpponentKind::Random),
            "minimax" => Ok(OpponentKind::Minimax),
            other => Err(RulesError::UnknownOpponent(other.to_string())),
        }
    }
}

/// Options the host passes when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub opponent: OpponentKind,
    pub search_depth: u8,
    /// Fixes the random agent's choices; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: OpponentKind::default(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_opponent(opponent: OpponentKind) -> Self {
        Self {
            opponent,
            ..Self::default()
        }
    }

    /// `search_depth` limited to `1..=MAX_SEARCH_DEPTH`.
    pub fn clamped_search_depth(&self) -> u8 {
        self.search_depth.clamp(1, MAX_SEARCH_DEPTH)
    }
}
