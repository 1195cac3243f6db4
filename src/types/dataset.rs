//! Imported tabular data.
//!
//! A [`Dataset`] is the validated output of the import step: an ordered
//! header row, body rows all padded to the header width, and (when the
//! source format carried formatting) a per-cell style table. It is immutable
//! once produced; a new import replaces it wholesale.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment carried by imported cell formatting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment carried by imported cell formatting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Raw per-cell formatting from the imported sheet.
///
/// Absent fields mean "inherit the theme default", never "explicit none".
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,
}

impl CellStyle {
    /// True when no field deviates from the inherit-everything default.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated table of headers and rows, plus optional per-cell styling.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Ordered column headers. Length defines the column count.
    pub headers: Vec<String>,
    /// Body rows; every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
    /// Identity of the imported source (file name), used as persistence key.
    pub source_id: String,
    /// Per-cell styles indexed `[row_including_header][col]`.
    /// Row 0 styles the header; row `r + 1` styles body row `r`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<Vec<Option<CellStyle>>>>,
}

impl Dataset {
    /// Number of columns (header width).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to scroll.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Style for a cell, addressed with the header included as row 0.
    ///
    /// Missing table, short rows, and plain entries all resolve to `None`
    /// so callers fall back to theme defaults.
    pub fn style_at(&self, row_including_header: usize, col: usize) -> Option<&CellStyle> {
        self.styles
            .as_ref()?
            .get(row_including_header)?
            .get(col)?
            .as_ref()
            .filter(|s| !s.is_plain())
    }

    /// Style for a body row cell (row 0 = first data row).
    pub fn body_style_at(&self, row: usize, col: usize) -> Option<&CellStyle> {
        self.style_at(row + 1, col)
    }

    /// Style for a header cell.
    pub fn header_style_at(&self, col: usize) -> Option<&CellStyle> {
        self.style_at(0, col)
    }
}
