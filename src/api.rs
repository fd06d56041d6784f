//! Browser-facing entry points. One game lives behind a global lock.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{GameConfig, OpponentKind};
use crate::error::RulesError;
use crate::game::GameInstance;
use crate::types::SelectionView;

static GAME: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Starts a new game. `config` may be `undefined` for the defaults.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    start_game(config)
}

/// Starts a new game from the opponent picker's value ("player2", "random", "minimax").
#[wasm_bindgen]
pub fn new_game_against(kind: &str) -> Result<JsValue, JsValue> {
    let opponent: OpponentKind = kind.parse().map_err(js_error)?;
    start_game(GameConfig::with_opponent(opponent))
}

#[wasm_bindgen]
pub fn select_cell(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let mut guard = lock()?;
    let game = guard.as_mut().ok_or_else(|| js_error(RulesError::NoGame))?;

    let outcome = game.select_cell(row, col).map_err(js_error)?;
    to_js(&SelectionView {
        accepted: outcome.accepted,
        turn_completed: outcome.turn_completed,
        king_made: outcome.king_made,
        capture_made: outcome.capture_made,
        view: game.to_view(),
    })
}

/// Plays the computer's turn.
#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    let mut guard = lock()?;
    let game = guard.as_mut().ok_or_else(|| js_error(RulesError::NoGame))?;

    game.do_ai_move().map_err(js_error)?;
    to_js(&game.to_view())
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let guard = lock()?;
    let game = guard.as_ref().ok_or_else(|| js_error(RulesError::NoGame))?;
    to_js(&game.to_view())
}

fn start_game(config: GameConfig) -> Result<JsValue, JsValue> {
    let game = GameInstance::new(config);
    let view = game.to_view();
    *lock()? = Some(game);
    to_js(&view)
}

fn lock() -> Result<MutexGuard<'static, Option<GameInstance>>, JsValue> {
    GAME.lock()
        .map_err(|_| JsValue::from_str("game state lock poisoned"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn js_error(err: RulesError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
