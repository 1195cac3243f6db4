//! xlplay - marquee player for spreadsheet data
//!
//! Plays imported tabular data as a continuously scrolling table in the
//! browser via WebAssembly and Canvas 2D:
//! - Seamless wrap-around looping of the row sequence
//! - Per-cell styling (font, fill, alignment) reconciled with theme colors
//! - Independent inline and fullscreen playback surfaces
//! - Editable, per-dataset persisted display title
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlPlay } from 'xlplay';
//! await init();
//! const player = new XlPlay(canvas, devicePixelRatio);
//! player.load_json(file.name, parsedSheetJson);
//! player.play(false);
//! ```

// Core modules
pub mod analyzer;
pub mod color;
pub mod error;
pub mod importer;
pub mod layout;
pub mod persist;
pub mod playback;
pub mod player;
pub mod styles;
pub mod surface;
pub mod title;
pub mod types;

// Rendering and browser glue
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main player struct
pub use viewer::XlPlay;

pub use types::*;

/// Decode and validate a host-parsed dataset JSON payload.
///
/// Returns the canonical dataset as a JS object. Useful for hosts that want
/// the validated shape without constructing a player.
///
/// # Errors
/// Returns an error if the payload cannot be decoded or fails validation.
#[wasm_bindgen]
pub fn decode_dataset(source_id: &str, json: &str) -> Result<JsValue, JsValue> {
    let dataset = importer::from_json(source_id, json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&dataset)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
