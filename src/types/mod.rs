//! Core data model shared between the native core and the wasm viewer glue.

mod dataset;
mod settings;

pub use dataset::{CellStyle, Dataset, HAlign, VAlign};
pub use settings::{
    AppConfig, PlaybackSettings, BACKGROUND_PRESETS, CONFIG_SCHEMA_VERSION, FRAME_COLOR_PRESETS,
    TEXT_COLOR_PRESETS,
};
