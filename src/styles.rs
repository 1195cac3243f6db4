//! Cell style resolution.
//!
//! Turns raw imported cell formatting plus the user-chosen theme colors into
//! a final, render-ready style. Pure and total: same inputs always produce
//! the same [`ResolvedStyle`], and no input combination errors.

use serde::Serialize;

use crate::color::normalize_hex;
use crate::types::{CellStyle, HAlign, PlaybackSettings, VAlign};

/// Theme colors a cell style is reconciled against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Default text color (`#rrggbb`).
    pub text_color: String,
    /// Frame/header background color (`#rrggbb`).
    pub frame_color: String,
}

impl From<&PlaybackSettings> for Theme {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            text_color: settings.text_color.clone(),
            frame_color: settings.frame_color.clone(),
        }
    }
}

/// Whether a cell renders in the header row or the scrolling body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Header,
    Body,
}

/// Final render directive for one cell.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub bold: bool,
    pub italic: bool,
    /// Text color, always concrete.
    pub text_color: String,
    /// Explicit background, or `None` when the caller applies row striping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub align_h: HAlign,
    pub align_v: VAlign,
}

/// Header text defaults to white; the frame color behind it is dark.
const HEADER_TEXT_COLOR: &str = "#ffffff";

/// Resolve a cell's raw formatting against the theme.
///
/// Explicit cell colors override theme defaults; absent fields inherit them.
/// For header cells the background is always the theme frame color: header
/// background is a theme property, not a per-cell one, and a cell fill must
/// not override it.
pub fn resolve_cell_style(
    cell: Option<&CellStyle>,
    theme: &Theme,
    role: CellRole,
) -> ResolvedStyle {
    let (default_text, background) = match role {
        CellRole::Header => (
            HEADER_TEXT_COLOR.to_string(),
            Some(theme.frame_color.clone()),
        ),
        CellRole::Body => (theme.text_color.clone(), None),
    };

    let Some(cell) = cell else {
        return ResolvedStyle {
            bold: matches!(role, CellRole::Header),
            italic: false,
            text_color: default_text,
            background,
            align_h: HAlign::Left,
            align_v: VAlign::Top,
        };
    };

    let text_color = cell
        .text_color
        .as_deref()
        .and_then(normalize_hex)
        .unwrap_or(default_text);

    let background = match role {
        // Theme frame color wins regardless of any cell fill.
        CellRole::Header => background,
        CellRole::Body => cell.fill_color.as_deref().and_then(normalize_hex),
    };

    ResolvedStyle {
        bold: cell.bold || matches!(role, CellRole::Header),
        italic: cell.italic,
        text_color,
        background,
        align_h: cell.align_h.unwrap_or(HAlign::Left),
        align_v: cell.align_v.unwrap_or(VAlign::Top),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme {
            text_color: "#ffffff".to_string(),
            frame_color: "#ff6b35".to_string(),
        }
    }

    #[test]
    fn test_absent_cell_header_defaults() {
        let resolved = resolve_cell_style(None, &theme(), CellRole::Header);
        assert!(resolved.bold);
        assert_eq!(resolved.text_color, "#ffffff");
        assert_eq!(resolved.background.as_deref(), Some("#ff6b35"));
    }

    #[test]
    fn test_absent_cell_body_defaults() {
        let resolved = resolve_cell_style(None, &theme(), CellRole::Body);
        assert!(!resolved.bold);
        assert_eq!(resolved.text_color, "#ffffff");
        // No explicit background: the caller applies zebra striping
        assert_eq!(resolved.background, None);
    }

    #[test]
    fn test_header_fill_never_overrides_frame_color() {
        let cell = CellStyle {
            fill_color: Some("#00ff00".to_string()),
            ..CellStyle::default()
        };
        let resolved = resolve_cell_style(Some(&cell), &theme(), CellRole::Header);
        assert_eq!(resolved.background.as_deref(), Some("#ff6b35"));
    }
}
