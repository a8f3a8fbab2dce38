//! Reversi rules engine for hexagonal and square boards.
//!
//! - [`position`]: axial and Cartesian coordinates
//! - [`topology`]: ray directions, key sets, corners and opening layouts
//! - [`board`]: the position-to-cell map and the capture algorithm
//! - [`game`]: turn, pass and game-over state machine
//! - [`strategy`]: computer move selection
//! - [`wasm`]: bindings for a JS front end
//!
//! ```
//! use hexsquare_reversi::{CaptureMostPieces, Game, Topology};
//!
//! let mut game = Game::new(Topology::Hex, 7).unwrap();
//! game.start_game().unwrap();
//! while !game.is_game_over() {
//!     game.play_turn(&CaptureMostPieces).unwrap();
//! }
//! println!("{} wins", game.winner());
//! ```

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod position;
pub mod strategy;
pub mod topology;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{GameConfig, PlayerKind};
pub use error::{GameError, Result};
pub use game::{Game, TurnListener, TurnOutcome};
pub use position::{Axial, Cartesian, Direction, Position};
pub use strategy::{
    AvoidCellsNextToCorner, CaptureCellsInCorner, CaptureMostPieces, Compose,
    MinimizeNextOpponentMove, Strategy, StrategyKind,
};
pub use topology::Topology;
pub use types::{Cell, CellKind, CellState, GameResult, GameState, Outcome, Player};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
