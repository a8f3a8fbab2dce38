//! Move selection heuristics for computer players.
//!
//! Every strategy is a pure function of a board snapshot and the player to
//! move. `None` is the pass sentinel: the strategy found no move it is willing
//! to play. Ties between equally good moves always go to the upper-leftmost
//! position (see [`Position::reading_order`]).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::position::Position;
use crate::types::Player;

pub trait Strategy: Send + Sync {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        (**self).select_move(board, player)
    }
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        (**self).select_move(board, player)
    }
}

/// Plays the move that flips the most cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureMostPieces;

impl Strategy for CaptureMostPieces {
    #[instrument(skip(self, board))]
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        let choice = most_captures(board, player, board.positions_in_reading_order());
        debug!(?choice, "capture most pieces");
        choice
    }
}

/// Like [`CaptureMostPieces`] but refuses cells touching a corner, unless
/// nothing else is legal.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvoidCellsNextToCorner;

impl Strategy for AvoidCellsNextToCorner {
    #[instrument(skip(self, board))]
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        let candidates = board
            .positions_in_reading_order()
            .into_iter()
            .filter(|&pos| !board.is_next_to_corner(pos));

        most_captures(board, player, candidates)
            .or_else(|| CaptureMostPieces.select_move(board, player))
    }
}

/// Takes a corner when one is legal, otherwise captures the most pieces.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureCellsInCorner;

impl Strategy for CaptureCellsInCorner {
    #[instrument(skip(self, board))]
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        most_captures(board, player, board.corners())
            .or_else(|| CaptureMostPieces.select_move(board, player))
    }
}

/// One-ply lookahead: plays the move after which the opponent's best reply
/// captures the fewest cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimizeNextOpponentMove;

impl Strategy for MinimizeNextOpponentMove {
    #[instrument(skip(self, board))]
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        let opponent = player.opponent();
        let mut best: Option<(Position, usize)> = None;

        for pos in board.legal_moves(player) {
            let mut next = board.clone();
            next.place(pos, player);
            let reply = next
                .legal_moves(opponent)
                .into_iter()
                .map(|reply| next.captures_for(reply, opponent).len())
                .max()
                .unwrap_or(0);

            let better = match best {
                None => true,
                Some((best_pos, best_reply)) => {
                    reply < best_reply
                        || (reply == best_reply && pos.reading_order(&best_pos) == Ordering::Less)
                }
            };
            if better {
                best = Some((pos, reply));
            }
        }

        debug!(?best, "minimize next opponent move");
        best.map(|(pos, _)| pos)
    }
}

/// Tries `first`; when it passes, defers to `second`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<A, B> Compose<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Strategy, B: Strategy> Strategy for Compose<A, B> {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        self.first
            .select_move(board, player)
            .or_else(|| self.second.select_move(board, player))
    }
}

/// Named strategies, as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    CaptureMostPieces,
    AvoidCellsNextToCorner,
    CaptureCellsInCorner,
    MinimizeNextOpponentMove,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::CaptureMostPieces => Box::new(CaptureMostPieces),
            StrategyKind::AvoidCellsNextToCorner => Box::new(AvoidCellsNextToCorner),
            StrategyKind::CaptureCellsInCorner => Box::new(CaptureCellsInCorner),
            StrategyKind::MinimizeNextOpponentMove => Box::new(MinimizeNextOpponentMove),
        }
    }

    /// Composes `kinds` into one preference chain, first entry tried first.
    /// An empty list yields [`CaptureMostPieces`].
    pub fn chain(kinds: &[StrategyKind]) -> Box<dyn Strategy> {
        match kinds.split_last() {
            None => Box::new(CaptureMostPieces),
            Some((last, rest)) => {
                rest.iter()
                    .rev()
                    .fold(last.build(), |tail, kind| -> Box<dyn Strategy> {
                        Box::new(Compose::new(kind.build(), tail))
                    })
            }
        }
    }
}

/// Highest capture count among `candidates`, ties to the upper-leftmost.
fn most_captures(
    board: &Board,
    player: Player,
    candidates: impl IntoIterator<Item = Position>,
) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;

    for pos in candidates {
        let captures = board.captures_for(pos, player).len();
        if captures == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_pos, best_captures)) => {
                captures > best_captures
                    || (captures == best_captures && pos.reading_order(&best_pos) == Ordering::Less)
            }
        };
        if better {
            best = Some((pos, captures));
        }
    }

    best.map(|(pos, _)| pos)
}
