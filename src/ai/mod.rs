pub mod minimax;
pub mod random;
pub mod turns;

use crate::board::Board;
use crate::error::RulesResult;
use crate::evaluator::TurnClock;
use crate::types::Side;

pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use turns::FullTurn;

/// A computer opponent that plays whole turns.
pub trait Agent: Send {
    fn name(&self) -> &'static str;

    fn side(&self) -> Side;

    /// Chooses and plays one full turn for `self.side()`.
    /// An agent with nothing to play returns `FullTurn::pass`.
    fn select_turn(&mut self, board: &Board, clock: TurnClock) -> RulesResult<FullTurn>;
}
