//! Turn, pass and game-over state machine over a [`Board`].

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::position::Position;
use crate::strategy::Strategy;
use crate::topology::Topology;
use crate::types::{Cell, CellState, GameResult, GameState, Outcome, Player};

/// Receives the current player's display token after every successful
/// `start_game`, `place_piece` and `pass`.
pub trait TurnListener {
    fn turn_changed(&mut self, token: &str);
}

impl<F> TurnListener for F
where
    F: FnMut(&str),
{
    fn turn_changed(&mut self, token: &str) {
        self(token)
    }
}

/// What a driven turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Placed {
        position: Position,
        flipped: Vec<Position>,
    },
    Passed,
}

/// Rules engine for one game.
///
/// Every command validates fully before mutating, so a rejected call leaves
/// the board, the turn and the pass counter untouched. The engine never ends
/// the game by itself; callers check [`Game::is_game_over`].
pub struct Game {
    board: Board,
    current_player: Player,
    consecutive_passes: u32,
    started: bool,
    is_pass: bool,
    flipped: Vec<Position>,
    listeners: Vec<Box<dyn TurnListener>>,
}

impl Game {
    pub fn new(topology: Topology, width: usize) -> Result<Self> {
        Ok(Self::with_board(Board::new(topology, width)?, Player::Black))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.topology, config.width)
    }

    /// Builds an unstarted game around a pre-seeded board.
    pub fn with_board(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
            consecutive_passes: 0,
            started: false,
            is_pass: false,
            flipped: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: impl TurnListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<()> {
        if self.started {
            warn!("start requested twice");
            return Err(GameError::AlreadyStarted);
        }

        self.started = true;
        info!(
            topology = %self.board.topology(),
            width = self.board.width(),
            "game started"
        );
        self.notify();
        Ok(())
    }

    /// Places a mark for `player` and returns the flipped positions.
    ///
    /// Placements are still accepted after two consecutive passes; a legal
    /// one resets the pass counter, so `is_game_over` turns false again.
    /// Drivers stop issuing commands once the game reports over.
    #[instrument(skip(self))]
    pub fn place_piece(&mut self, pos: Position, player: Player) -> Result<Vec<Position>> {
        self.check_turn(player)?;

        let cell = self.board.get(pos).inspect_err(|_| {
            warn!(%pos, "placement off the board");
        })?;
        if !cell.is_empty() {
            warn!(%pos, "placement on occupied cell");
            return Err(GameError::IllegalMove { position: pos });
        }

        let flipped = self.board.place(pos, player);
        if flipped.is_empty() {
            warn!(%pos, "placement captures nothing");
            return Err(GameError::IllegalMove { position: pos });
        }

        debug!(%pos, %player, flipped = flipped.len(), "piece placed");
        self.current_player = player.opponent();
        self.consecutive_passes = 0;
        self.is_pass = false;
        self.flipped = flipped.clone();
        self.after_turn();
        Ok(flipped)
    }

    #[instrument(skip(self))]
    pub fn pass(&mut self, player: Player) -> Result<()> {
        self.check_turn(player)?;

        self.consecutive_passes += 1;
        self.current_player = player.opponent();
        self.is_pass = true;
        self.flipped.clear();
        debug!(%player, passes = self.consecutive_passes, "turn passed");
        self.after_turn();
        Ok(())
    }

    /// Asks `strategy` for the current player's move and applies it, passing
    /// when the strategy finds nothing.
    #[instrument(skip(self, strategy))]
    pub fn play_turn(&mut self, strategy: &dyn Strategy) -> Result<TurnOutcome> {
        if !self.started {
            return Err(GameError::NotStarted);
        }

        let player = self.current_player;
        match strategy.select_move(&self.board, player) {
            Some(position) => {
                let flipped = self.place_piece(position, player)?;
                Ok(TurnOutcome::Placed { position, flipped })
            }
            None => {
                self.pass(player)?;
                Ok(TurnOutcome::Passed)
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Deep copy of the board for views and strategies.
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn board_width(&self) -> usize {
        self.board.width()
    }

    /// Number of cells on the board.
    pub fn board_size(&self) -> usize {
        self.board.len()
    }

    pub fn topology(&self) -> Topology {
        self.board.topology()
    }

    pub fn cell_at(&self, pos: Position) -> Result<Cell> {
        self.board.get(pos)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// True after two consecutive passes, or when neither side can move.
    pub fn is_game_over(&self) -> bool {
        self.consecutive_passes >= 2
            || (!self.board.has_legal_move(Player::Black)
                && !self.board.has_legal_move(Player::White))
    }

    pub fn score(&self, player: Player) -> usize {
        self.board.count(player)
    }

    pub fn outcome(&self) -> Outcome {
        let black = self.score(Player::Black);
        let white = self.score(Player::White);
        if black > white {
            Outcome::Won(Player::Black)
        } else if white > black {
            Outcome::Won(Player::White)
        } else {
            Outcome::Tie
        }
    }

    /// Player with the strictly higher score; White on a tie.
    pub fn winner(&self) -> Player {
        self.outcome().reported_winner()
    }

    /// Capture count if the current player moved at `pos` now.
    pub fn score_for_move(&self, pos: Position) -> Result<usize> {
        self.board.get(pos)?;
        Ok(self.board.captures_for(pos, self.current_player).len())
    }

    pub fn has_legal_move(&self, pos: Position, player: Player) -> Result<bool> {
        self.board.get(pos)?;
        Ok(self.board.is_legal(pos, player))
    }

    pub fn captures_for(&self, pos: Position, player: Player) -> Vec<Position> {
        self.board.captures_for(pos, player)
    }

    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        self.board.legal_moves(player)
    }

    pub fn state(&self) -> GameState {
        let cells = self
            .board
            .positions_in_reading_order()
            .into_iter()
            .map(|position| {
                let cell = self.board.get(position).unwrap_or_default();
                CellState {
                    position,
                    kind: cell.kind(),
                    owner: cell.owner(),
                }
            })
            .collect();

        GameState {
            topology: self.board.topology(),
            width: self.board.width(),
            cells,
            current_player: self.current_player,
            black_count: self.score(Player::Black),
            white_count: self.score(Player::White),
            consecutive_passes: self.consecutive_passes,
            has_started: self.started,
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn result(&self) -> GameResult {
        let outcome = self.outcome();
        GameResult {
            outcome,
            winner: outcome.reported_winner(),
            black_count: self.score(Player::Black),
            white_count: self.score(Player::White),
        }
    }

    fn check_turn(&self, player: Player) -> Result<()> {
        if !self.started {
            warn!("command before start");
            return Err(GameError::NotStarted);
        }
        if player != self.current_player {
            warn!(expected = %self.current_player, actual = %player, "out of turn");
            return Err(GameError::WrongTurn {
                expected: self.current_player,
                actual: player,
            });
        }
        Ok(())
    }

    fn after_turn(&mut self) {
        if self.is_game_over() {
            let result = self.result();
            info!(
                black = result.black_count,
                white = result.white_count,
                winner = %result.winner,
                "game over"
            );
        }
        self.notify();
    }

    fn notify(&mut self) {
        let token = self.current_player.token();
        for listener in &mut self.listeners {
            listener.turn_changed(token);
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("current_player", &self.current_player)
            .field("consecutive_passes", &self.consecutive_passes)
            .field("started", &self.started)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
