//! WASM bindings for tomlet-core.
//!
//! Exposes the two directions the browser editing surface needs as
//! `#[wasm_bindgen]` functions: `render` fills the text area from a JSON
//! payload, `parse` turns the edited text back into a JSON payload for the
//! save request. Build with `wasm-bindgen-cli`:
//!
//! ```sh
//! cargo build -p tomlet-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/tomlet_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Render a JSON configuration document as editable text.
///
/// Throws a JS error if the input is not valid JSON or contains values the
/// text format cannot express.
#[wasm_bindgen]
pub fn render(json: &str) -> std::result::Result<String, JsValue> {
    tomlet_core::encode(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse an edited text document back into a compact JSON string.
///
/// The parser itself never rejects a document; an error here only means
/// the reconstructed table could not be re-serialized as JSON.
#[wasm_bindgen]
pub fn parse(text: &str) -> std::result::Result<String, JsValue> {
    tomlet_core::decode(text).map_err(|e| JsValue::from_str(&e.to_string()))
}
