//! Engine error types.

use derive_more::{Display, Error};

use crate::position::Position;
use crate::topology::Topology;
use crate::types::Player;

/// Failure of a single engine call. A rejected call never mutates the game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The position is not a key of the board.
    #[display("position {position} is not on the board")]
    InvalidPosition { position: Position },

    #[display("game has not been started")]
    NotStarted,

    #[display("game has already been started")]
    AlreadyStarted,

    #[display("it is {expected}'s turn, not {actual}'s")]
    WrongTurn { expected: Player, actual: Player },

    /// Target is occupied or captures nothing.
    #[display("illegal move at {position}")]
    IllegalMove { position: Position },

    #[display("width {width} is not valid for a {topology} board")]
    InvalidWidth { topology: Topology, width: usize },
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
