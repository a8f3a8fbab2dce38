use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::topology::Topology;

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Display token handed to views.
    pub fn token(self) -> &'static str {
        match self {
            Player::Black => "X",
            Player::White => "O",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// Whether a cell is occupied at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Empty,
    Occupied,
}

/// A board slot. An occupied cell always carries its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn kind(self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Occupied(_) => CellKind::Occupied,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_owned_by(self, player: Player) -> bool {
        self == Cell::Occupied(player)
    }

    pub fn token(self) -> &'static str {
        match self {
            Cell::Empty => ".",
            Cell::Occupied(player) => player.token(),
        }
    }
}

/// Final standing of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "player")]
pub enum Outcome {
    Won(Player),
    Tie,
}

impl Outcome {
    /// The player reported as winner. White is reported on an exact tie.
    pub fn reported_winner(self) -> Player {
        match self {
            Outcome::Won(player) => player,
            Outcome::Tie => Player::White,
        }
    }
}

/// One entry of a serialized board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellState {
    pub position: Position,
    pub kind: CellKind,
    pub owner: Option<Player>,
}

/// Public game state returned to views and the WASM layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub topology: Topology,
    pub width: usize,
    /// Cells in reading order.
    pub cells: Vec<CellState>,
    pub current_player: Player,
    pub black_count: usize,
    pub white_count: usize,
    pub consecutive_passes: u32,
    pub has_started: bool,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a placement or nothing happened yet.
    pub is_pass: bool,
    /// Contract:
    /// - Placement: the positions flipped by it, in reading order.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
}

/// Score summary, available at any point of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub winner: Player,
    pub black_count: usize,
    pub white_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().opponent(), Player::White);
    }

    #[test]
    fn occupied_cell_always_reports_owner() {
        let cell = Cell::Occupied(Player::White);

        assert_eq!(cell.kind(), CellKind::Occupied);
        assert_eq!(cell.owner(), Some(Player::White));
        assert!(cell.is_owned_by(Player::White));
        assert!(!cell.is_owned_by(Player::Black));
        assert_eq!(Cell::Empty.owner(), None);
        assert_eq!(Cell::Empty.kind(), CellKind::Empty);
    }

    #[test]
    fn tie_is_reported_as_white() {
        assert_eq!(Outcome::Tie.reported_winner(), Player::White);
        assert_eq!(Outcome::Won(Player::Black).reported_winner(), Player::Black);
    }
}
