use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod game;
pub mod movegen;
pub mod overlay;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
