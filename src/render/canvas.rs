//! Canvas 2D painter for the marquee (wasm only).
//!
//! Paints one [`RenderFrame`] plus the title band onto a
//! `CanvasRenderingContext2d`. Device-pixel-ratio aware: the backing store
//! is scaled once and all drawing happens in logical pixels.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Result, XlplayError};
use crate::render::RenderFrame;
use crate::types::{HAlign, VAlign};

/// Horizontal padding inside a cell (logical pixels).
const CELL_PADDING: f64 = 12.0;
/// Vertical padding around the title text.
const TITLE_PADDING: f64 = 8.0;
/// Width of the frame border around the table.
const FRAME_BORDER: f64 = 2.0;

const FONT_FAMILY: &str = "system-ui, sans-serif";

/// Painter bound to one canvas element.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| XlplayError::Other("canvas 2d context unavailable".to_string()))?
            .ok_or_else(|| XlplayError::Other("canvas 2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| XlplayError::Other("unexpected context type".to_string()))?;
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        let mut painter = Self {
            ctx,
            width: 0.0,
            height: 0.0,
            dpr,
        };
        // The element's attribute size is in device pixels; work in logical.
        painter.resize(
            canvas,
            f64::from(canvas.width()) / dpr,
            f64::from(canvas.height()) / dpr,
        );
        Ok(painter)
    }

    /// Logical width in CSS pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height in CSS pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resize the backing store for the logical size and rescale once.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, canvas: &HtmlCanvasElement, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        canvas.set_width((self.width * self.dpr) as u32);
        canvas.set_height((self.height * self.dpr) as u32);
        let _ = self
            .ctx
            .reset_transform()
            .and_then(|()| self.ctx.scale(self.dpr, self.dpr));
    }

    /// Height consumed above the scrolling body (title band + header row).
    pub fn chrome_height(&self, title_font_size: u32, row_height: f32) -> f64 {
        self.title_band_height(title_font_size) + f64::from(row_height)
    }

    fn title_band_height(&self, title_font_size: u32) -> f64 {
        f64::from(title_font_size) * 1.4 + TITLE_PADDING * 2.0
    }

    /// Paint a full frame: background, title band, header row, body rows.
    pub fn paint(
        &self,
        frame: &RenderFrame<'_>,
        title: &str,
        title_font_size: u32,
        font_size: u32,
        text_color: &str,
    ) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&frame.background);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let title_h = self.title_band_height(title_font_size);
        let row_h = f64::from(frame.row_height);
        let col_count = frame.header.len().max(1);
        #[allow(clippy::cast_precision_loss)]
        let col_w = self.width / col_count as f64;

        // Title band
        ctx.set_font(&format!("bold {title_font_size}px {FONT_FAMILY}"));
        ctx.set_fill_style_str(text_color);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let _ = ctx.fill_text(title, self.width / 2.0, title_h / 2.0);
        ctx.set_fill_style_str(&frame.frame_color);
        ctx.fill_rect(0.0, title_h - FRAME_BORDER, self.width, FRAME_BORDER);

        // Header row (sticky above the scroll area)
        for (col, cell) in frame.header.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = col as f64 * col_w;
            if let Some(bg) = &cell.style.background {
                ctx.set_fill_style_str(bg);
                ctx.fill_rect(x, title_h, col_w, row_h);
            }
            self.paint_cell_text(cell, x, title_h, col_w, row_h, font_size);
        }

        // Body rows, clipped to the viewport below the chrome
        let body_top = title_h + row_h;
        ctx.save();
        ctx.begin_path();
        ctx.rect(0.0, body_top, self.width, (self.height - body_top).max(0.0));
        ctx.clip();
        for row in &frame.rows {
            let y = body_top + f64::from(row.y);
            ctx.set_fill_style_str(&row.background);
            ctx.fill_rect(0.0, y, self.width, row_h);
            for (col, cell) in row.cells.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let x = col as f64 * col_w;
                if let Some(bg) = &cell.style.background {
                    ctx.set_fill_style_str(bg);
                    ctx.fill_rect(x, y, col_w, row_h);
                }
                self.paint_cell_text(cell, x, y, col_w, row_h, font_size);
            }
            // Row separator in the frame color
            ctx.set_fill_style_str(&frame.frame_color);
            ctx.fill_rect(0.0, y + row_h - 1.0, self.width, 1.0);
        }
        ctx.restore();

        // Outer frame border
        ctx.set_stroke_style_str(&frame.frame_color);
        ctx.set_line_width(FRAME_BORDER);
        ctx.stroke_rect(
            FRAME_BORDER / 2.0,
            FRAME_BORDER / 2.0,
            self.width - FRAME_BORDER,
            self.height - FRAME_BORDER,
        );
    }

    fn paint_cell_text(
        &self,
        cell: &crate::render::CellPaint<'_>,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        font_size: u32,
    ) {
        if cell.text.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        let weight = if cell.style.bold { "bold " } else { "" };
        let slant = if cell.style.italic { "italic " } else { "" };
        ctx.set_font(&format!("{slant}{weight}{font_size}px {FONT_FAMILY}"));
        ctx.set_fill_style_str(&cell.style.text_color);

        let text_x = match cell.style.align_h {
            HAlign::Left => {
                ctx.set_text_align("left");
                x + CELL_PADDING
            }
            HAlign::Center => {
                ctx.set_text_align("center");
                x + w / 2.0
            }
            HAlign::Right => {
                ctx.set_text_align("right");
                x + w - CELL_PADDING
            }
        };
        let text_y = match cell.style.align_v {
            VAlign::Top => {
                ctx.set_text_baseline("top");
                y + CELL_PADDING / 2.0
            }
            VAlign::Middle => {
                ctx.set_text_baseline("middle");
                y + h / 2.0
            }
            VAlign::Bottom => {
                ctx.set_text_baseline("bottom");
                y + h - CELL_PADDING / 2.0
            }
        };
        let _ = ctx.fill_text(cell.text, text_x, text_y);
    }
}
