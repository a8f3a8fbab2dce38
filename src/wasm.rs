//! JS-facing command and query surface. Holds no rules of its own.

use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{Game, TurnOutcome};
use crate::logging;
use crate::position::Position;
use crate::strategy::StrategyKind;
use crate::types::Player;

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    config: GameConfig,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` may be `undefined` for the default hex game.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        logging::init();

        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))?
        };
        let game = Game::from_config(&config)?;
        debug!(?config, "wasm game created");

        Ok(Self { game, config })
    }

    pub fn start(&mut self) -> Result<(), JsError> {
        self.game.start_game()?;
        Ok(())
    }

    /// Places a piece for the player to move and returns the flipped cells.
    pub fn place(&mut self, position: JsValue) -> Result<JsValue, JsError> {
        let position = parse_position(position)?;
        let player = self.game.current_player();
        let flipped = self.game.place_piece(position, player)?;
        to_js(&flipped)
    }

    pub fn pass(&mut self) -> Result<(), JsError> {
        self.game.pass(self.game.current_player())?;
        Ok(())
    }

    /// Plays one turn for a computer side; fails when a human is to move.
    #[wasm_bindgen(js_name = playComputerTurn)]
    pub fn play_computer_turn(&mut self) -> Result<JsValue, JsError> {
        let player = self.game.current_player();
        let strategy = self
            .config
            .player(player)
            .strategy()
            .ok_or_else(|| JsError::new(&format!("{player} is a human player")))?;

        match self.game.play_turn(&strategy)? {
            TurnOutcome::Placed { position, .. } => to_js(&position),
            TurnOutcome::Passed => to_js(&self.game.board().pass_sentinel()),
        }
    }

    /// Move the given strategies would pick for the player to move, or the
    /// pass sentinel.
    #[wasm_bindgen(js_name = suggestMove)]
    pub fn suggest_move(&self, strategies: JsValue) -> Result<JsValue, JsError> {
        let kinds: Vec<StrategyKind> = if strategies.is_undefined() || strategies.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(strategies)
                .map_err(|err| JsError::new(&err.to_string()))?
        };
        let board = self.game.board_snapshot();
        let choice = StrategyKind::chain(&kinds)
            .select_move(&board, self.game.current_player())
            .unwrap_or_else(|| board.pass_sentinel());
        to_js(&choice)
    }

    #[wasm_bindgen(js_name = scoreForMove)]
    pub fn score_for_move(&self, position: JsValue) -> Result<usize, JsError> {
        Ok(self.game.score_for_move(parse_position(position)?)?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.legal_moves(self.game.current_player()))
    }

    #[wasm_bindgen(js_name = cellAt)]
    pub fn cell_at(&self, position: JsValue) -> Result<JsValue, JsError> {
        let cell = self.game.cell_at(parse_position(position)?)?;
        to_js(&cell.owner())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.state())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.result())
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[wasm_bindgen(js_name = currentToken)]
    pub fn current_token(&self) -> String {
        self.game.current_player().token().to_string()
    }

    #[wasm_bindgen(js_name = isComputerTurn)]
    pub fn is_computer_turn(&self) -> bool {
        self.config
            .player(self.game.current_player())
            .strategy()
            .is_some()
    }

    /// Registers a JS callback invoked with the token of the player to move.
    #[wasm_bindgen(js_name = onTurn)]
    pub fn on_turn(&mut self, callback: js_sys::Function) {
        self.game.add_listener(move |token: &str| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(token)) {
                warn!(?err, token, "turn listener threw");
            }
        });
    }

    pub fn score(&self, black: bool) -> usize {
        let player = if black { Player::Black } else { Player::White };
        self.game.score(player)
    }
}

fn parse_position(value: JsValue) -> Result<Position, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
