//! Key/value persistence for titles and app config.
//!
//! The browser build persists to `localStorage`; native builds and tests use
//! an in-memory map. Failures are surfaced as errors so callers can decide
//! to degrade (title saves ignore them; the in-memory state always wins).

use std::collections::HashMap;

use crate::error::Result;

/// Fixed key for the global [`crate::types::AppConfig`] record.
pub const CONFIG_KEY: &str = "xlplay-config";

/// Persistence key for a dataset's committed title.
pub fn title_key(source_id: &str) -> String {
    format!("title_{source_id}")
}

/// Minimal key/value store the player persists through.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// Count of successful writes, for tests asserting notification counts.
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// `localStorage`-backed store for the browser build.
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Bind to the window's local storage. Storage may be unavailable
    /// (privacy mode); the store then reads as empty and writes fail.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Store for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| crate::error::XlplayError::Persist("storage unavailable".to_string()))?;
        storage.set_item(key, value).map_err(|_| {
            crate::error::XlplayError::Persist(format!("set_item failed for {key}"))
        })
    }
}
