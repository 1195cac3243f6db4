//! Per-frame render directives.
//!
//! Resolves the visible band of the marquee into draw-ready rows: each cell
//! carries its final [`ResolvedStyle`], each row its y position and zebra
//! shade. Pure data: the Canvas 2D painter (wasm) and any native consumer
//! read the same structure.

use crate::color::shade_toward_black;
use crate::layout::MarqueeLayout;
use crate::styles::{resolve_cell_style, CellRole, ResolvedStyle, Theme};
use crate::types::{Dataset, PlaybackSettings};

/// Zebra rows composite the background 13% toward black.
const ZEBRA_SHADE: f32 = 0.13;

/// One draw-ready cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPaint<'a> {
    pub text: &'a str,
    pub style: ResolvedStyle,
}

/// One visible body row.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow<'a> {
    /// Y position of the row's top edge, relative to the scroll viewport.
    pub y: f32,
    /// Row background before any per-cell fill (zebra striping).
    pub background: String,
    pub cells: Vec<CellPaint<'a>>,
}

/// Draw directives for one frame of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub background: String,
    pub frame_color: String,
    pub row_height: f32,
    pub header: Vec<CellPaint<'a>>,
    pub rows: Vec<BodyRow<'a>>,
}

impl<'a> RenderFrame<'a> {
    /// Resolve the band of rows visible at `offset` into draw directives.
    pub fn build(
        dataset: &'a Dataset,
        settings: &PlaybackSettings,
        offset: f32,
        viewport_height: f32,
    ) -> Self {
        let theme = Theme::from(settings);
        let layout = MarqueeLayout::new(dataset.row_count(), settings.row_height);
        let zebra = shade_toward_black(&settings.background_color, ZEBRA_SHADE);

        let header = dataset
            .headers
            .iter()
            .enumerate()
            .map(|(col, text)| CellPaint {
                text: text.as_str(),
                style: resolve_cell_style(dataset.header_style_at(col), &theme, CellRole::Header),
            })
            .collect();

        let (band, first_y) = layout.visible_band(offset, viewport_height);
        let rows = band
            .iter()
            .enumerate()
            .map(|(i, visible)| {
                let background = if visible.rendered_index % 2 == 0 {
                    settings.background_color.clone()
                } else {
                    zebra.clone()
                };
                #[allow(clippy::cast_precision_loss)]
                let y = first_y + i as f32 * layout.row_height();
                let cells = dataset
                    .headers
                    .iter()
                    .enumerate()
                    .map(|(col, _)| CellPaint {
                        text: dataset
                            .rows
                            .get(visible.source_row)
                            .and_then(|r| r.get(col))
                            .map_or("", String::as_str),
                        style: resolve_cell_style(
                            dataset.body_style_at(visible.source_row, col),
                            &theme,
                            CellRole::Body,
                        ),
                    })
                    .collect();
                BodyRow {
                    y,
                    background,
                    cells,
                }
            })
            .collect();

        Self {
            background: settings.background_color.clone(),
            frame_color: settings.frame_color.clone(),
            row_height: layout.row_height(),
            header,
            rows,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::CellStyle;

    fn dataset() -> Dataset {
        Dataset {
            headers: vec!["h1".to_string(), "h2".to_string()],
            rows: vec![
                vec!["a1".to_string(), "a2".to_string()],
                vec!["b1".to_string(), "b2".to_string()],
                vec!["c1".to_string(), "c2".to_string()],
            ],
            source_id: "t.xlsx".to_string(),
            styles: None,
        }
    }

    #[test]
    fn test_band_is_viewport_bounded() {
        let settings = PlaybackSettings {
            row_height: 50,
            ..PlaybackSettings::default()
        };
        let ds = dataset();
        let frame = RenderFrame::build(&ds, &settings, 0.0, 200.0);
        // 200px viewport over 50px rows: at most 5 rows (4 + partial edge)
        assert!(frame.rows.len() <= 5);
        assert_eq!(frame.header.len(), 2);
    }

    #[test]
    fn test_source_rows_wrap_modulo_row_count() {
        let settings = PlaybackSettings {
            row_height: 50,
            ..PlaybackSettings::default()
        };
        // Offset into the second repetition: rendered rows 4.. map to source 1..
        let ds = dataset();
        let frame = RenderFrame::build(&ds, &settings, 200.0, 100.0);
        assert_eq!(frame.rows[0].cells[0].text, "b1");
    }

    #[test]
    fn test_zebra_follows_rendered_parity() {
        let settings = PlaybackSettings {
            row_height: 50,
            ..PlaybackSettings::default()
        };
        let ds = dataset();
        let frame = RenderFrame::build(&ds, &settings, 0.0, 200.0);
        assert_eq!(frame.rows[0].background, settings.background_color);
        assert_ne!(frame.rows[1].background, settings.background_color);
    }

    #[test]
    fn test_header_background_is_frame_color() {
        let mut ds = dataset();
        ds.styles = Some(vec![vec![
            Some(CellStyle {
                fill_color: Some("#00ff00".to_string()),
                ..CellStyle::default()
            }),
            None,
        ]]);
        let settings = PlaybackSettings::default();
        let frame = RenderFrame::build(&ds, &settings, 0.0, 200.0);
        for cell in &frame.header {
            assert_eq!(cell.style.background.as_deref(), Some("#ff6b35"));
        }
    }
}
