//! Render directive preparation and (on wasm) Canvas 2D painting.

mod frame;

pub use frame::{BodyRow, CellPaint, RenderFrame};

#[cfg(target_arch = "wasm32")]
pub mod canvas;
