//! Browser bindings for the board and solution editors.

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

use crate::config::ValidationConfig;
use crate::payload::{check_board_json, check_solution_json, CheckError};

fn throw(error: CheckError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Validate a board payload, throwing an `Error` describing the first problem.
#[wasm_bindgen(js_name = validateBoard)]
pub fn validate_board(board: &str) -> Result<(), JsValue> {
    check_board_json(board, &ValidationConfig::default())
        .map(drop)
        .map_err(throw)
}

/// Validate a solution payload against a board payload, throwing an `Error` describing the first problem.
#[wasm_bindgen(js_name = validateSolution)]
pub fn validate_solution(board: &str, solution: &str) -> Result<(), JsValue> {
    check_solution_json(board, solution, &ValidationConfig::default())
        .map(drop)
        .map_err(throw)
}
