//! Structured error types for xlplay.
//!
//! Everything here is local and recoverable; nothing in the core is fatal
//! to the process.

/// All errors that can occur while importing, configuring, or playing data.
#[derive(Debug, thiserror::Error)]
pub enum XlplayError {
    /// Dataset JSON from the host could not be decoded.
    #[error("Dataset decoding: {0}")]
    Json(#[from] serde_json::Error),

    /// Imported data failed validation.
    #[error("Invalid dataset: {0}")]
    Dataset(String),

    /// Playback settings rejected at the input boundary.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Key/value persistence failure (quota, unavailable storage).
    #[error("Persistence: {0}")]
    Persist(String),

    /// I/O error (CLI file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlplayError>;

impl From<String> for XlplayError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlplayError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlplayError> for wasm_bindgen::JsValue {
    fn from(e: XlplayError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
