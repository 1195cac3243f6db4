//! Playback settings and persisted application config.
//!
//! `PlaybackSettings` is a value object: each playback surface holds its own
//! copy, and handing it from the preview to the fullscreen surface clones it
//! so edits on one side never leak into the other.

use serde::{Deserialize, Serialize};

use crate::color::normalize_hex;

/// Legal range for scroll speed (px advanced per frame).
pub const SPEED_RANGE: (f32, f32) = (0.1, 5.0);
/// Legal range for body font size (px).
pub const FONT_SIZE_RANGE: (u32, u32) = (12, 28);
/// Legal range for row height (px).
pub const ROW_HEIGHT_RANGE: (u32, u32) = (40, 100);
/// Legal range for title font size (px).
pub const TITLE_FONT_SIZE_RANGE: (u32, u32) = (20, 56);

/// Preset swatches offered for the background color.
pub const BACKGROUND_PRESETS: [&str; 10] = [
    "#0a0a0a", "#1a1a1a", "#2a2a2a", "#1e293b", "#334155", "#1f2937", "#374151", "#4b5563",
    "#6b7280", "#9ca3af",
];

/// Preset swatches offered for the table frame color.
pub const FRAME_COLOR_PRESETS: [&str; 10] = [
    "#ff6b35", "#00e5cc", "#a855f7", "#ef4444", "#f97316", "#eab308", "#22c55e", "#10b981",
    "#06b6d4", "#3b82f6",
];

/// Preset swatches offered for the text color.
pub const TEXT_COLOR_PRESETS: [&str; 10] = [
    "#ffffff", "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
    "#334155", "#1e293b",
];

/// Visual and motion settings for one playback surface.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackSettings {
    /// Scroll speed in pixels per frame. Always positive and finite.
    pub speed: f32,
    /// Body cell font size in pixels.
    pub font_size: u32,
    /// Row height in pixels.
    pub row_height: u32,
    /// Title font size in pixels.
    pub title_font_size: u32,
    /// Page/table background color (`#rrggbb`).
    pub background_color: String,
    /// Table frame and header background color (`#rrggbb`).
    pub frame_color: String,
    /// Default text color (`#rrggbb`).
    pub text_color: String,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: 0.5,
            font_size: 16,
            row_height: 52,
            title_font_size: 28,
            background_color: "#1a1a1a".to_string(),
            frame_color: "#ff6b35".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

impl PlaybackSettings {
    /// Clamp every field into its legal range and normalize colors.
    ///
    /// Total for all inputs: NaN or non-finite speed falls back to the
    /// default, out-of-range values clamp, unparseable colors revert to the
    /// default palette. The playback engine never observes an illegal value.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let speed = if self.speed.is_finite() {
            self.speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1)
        } else {
            defaults.speed
        };
        Self {
            speed,
            font_size: self.font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
            row_height: self.row_height.clamp(ROW_HEIGHT_RANGE.0, ROW_HEIGHT_RANGE.1),
            title_font_size: self
                .title_font_size
                .clamp(TITLE_FONT_SIZE_RANGE.0, TITLE_FONT_SIZE_RANGE.1),
            background_color: normalize_hex(&self.background_color)
                .unwrap_or(defaults.background_color),
            frame_color: normalize_hex(&self.frame_color).unwrap_or(defaults.frame_color),
            text_color: normalize_hex(&self.text_color).unwrap_or(defaults.text_color),
        }
    }
}

/// Version of the persisted [`AppConfig`] schema.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Global application config persisted under one fixed key.
///
/// A typed record with an explicit schema version; decoding anything that
/// does not match falls back to the default rather than erroring, so a
/// corrupt or stale store never blocks startup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub schema_version: u32,
    /// Credential for the external analyzer; unused by the core.
    #[serde(default)]
    pub api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            api_key: String::new(),
        }
    }
}

impl AppConfig {
    /// Decode a stored config value, falling back to defaults on any
    /// mismatch (unknown schema version, corrupt JSON, absent value).
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| serde_json::from_str::<Self>(v).ok())
            .filter(|c| c.schema_version == CONFIG_SCHEMA_VERSION)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_ranges() {
        let s = PlaybackSettings {
            speed: 99.0,
            font_size: 4,
            row_height: 1000,
            title_font_size: 0,
            ..PlaybackSettings::default()
        }
        .sanitized();
        assert_eq!(s.speed, SPEED_RANGE.1);
        assert_eq!(s.font_size, FONT_SIZE_RANGE.0);
        assert_eq!(s.row_height, ROW_HEIGHT_RANGE.1);
        assert_eq!(s.title_font_size, TITLE_FONT_SIZE_RANGE.0);
    }

    #[test]
    fn test_sanitize_rejects_non_finite_speed() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let s = PlaybackSettings {
                speed: bad,
                ..PlaybackSettings::default()
            }
            .sanitized();
            assert_eq!(s.speed, PlaybackSettings::default().speed);
        }
    }

    #[test]
    fn test_sanitize_normalizes_colors() {
        let s = PlaybackSettings {
            background_color: "1E293B".to_string(),
            frame_color: "nonsense".to_string(),
            ..PlaybackSettings::default()
        }
        .sanitized();
        assert_eq!(s.background_color, "#1e293b");
        assert_eq!(s.frame_color, PlaybackSettings::default().frame_color);
    }

    #[test]
    fn test_config_decode_fallback() {
        assert_eq!(AppConfig::from_stored(None), AppConfig::default());
        assert_eq!(AppConfig::from_stored(Some("garbage")), AppConfig::default());
        // Future schema versions are ignored, not misread
        let future = r#"{"schemaVersion":2,"apiKey":"sk-x"}"#;
        assert_eq!(AppConfig::from_stored(Some(future)), AppConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let cfg = AppConfig {
            schema_version: CONFIG_SCHEMA_VERSION,
            api_key: "sk-test".to_string(),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(AppConfig::from_stored(Some(&json)), cfg);
    }
}
