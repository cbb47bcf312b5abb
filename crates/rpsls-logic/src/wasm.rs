//! WASM bindings for browser match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{simulate_match, MatchConfig, Roster};

/// Replay a persona-vs-persona match with full round-by-round details
///
/// # Arguments
/// * `persona_a` - Name of the side A persona
/// * `persona_b` - Name of the side B persona
/// * `config_json` - JSON serialized MatchConfig, e.g. `{"variant":"five-move","wins_limit":3}`
/// * `seed` - 32-byte randomness seed
/// * `match_index` - Index of this match
///
/// # Returns
/// JSON serialized MatchSummary
#[wasm_bindgen]
pub fn replay_match(
    persona_a: &str,
    persona_b: &str,
    config_json: &str,
    seed: &[u8],
    match_index: u32,
) -> Result<JsValue, JsError> {
    let config: MatchConfig = serde_json::from_str(config_json)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    config.validate()?;
    let catalog = config.catalog()?;

    let a = Roster::get(persona_a)?;
    let b = Roster::get(persona_b)?;

    let seed_arr: [u8; 32] = seed
        .try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;

    let summary = simulate_match(&catalog, a, b, &seed_arr, match_index, config.wins_limit)?;

    serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// All built-in personas with their weight tables
#[wasm_bindgen]
pub fn get_personas() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(Roster::all())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Flavor text for a persona
#[wasm_bindgen]
pub fn describe_persona(name: &str) -> Result<String, JsError> {
    Ok(Roster::get(name)?.description.to_string())
}
