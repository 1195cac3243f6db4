//! Main `XlPlay` struct - the browser-facing entry point for the marquee
//! player.
//!
//! The wasm build owns a shared state cell (player + canvas bindings) and an
//! animation-frame scheduler per surface. Every scheduled callback is held
//! as a cancellable handle by the owning engine, and every exit path (pause,
//! reset, dataset change, fullscreen exit, drop) cancels it - a stale tick
//! can never mutate a stopped engine.
//!
//! A headless variant of the same struct exists off-wasm for the CLI and
//! tests.

mod events;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlCanvasElement;

#[cfg(target_arch = "wasm32")]
use crate::persist::{LocalStore, CONFIG_KEY};
#[cfg(target_arch = "wasm32")]
use crate::render::{canvas::CanvasPainter, RenderFrame};
#[cfg(target_arch = "wasm32")]
use crate::types::AppConfig;

use crate::importer;
use crate::player::{Player, SurfaceId};
#[cfg(target_arch = "wasm32")]
use crate::playback::{FrameHandle, FrameScheduler, PlaybackStatus};
#[cfg(target_arch = "wasm32")]
use crate::types::PlaybackSettings;

#[cfg(not(target_arch = "wasm32"))]
use crate::persist::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
use crate::playback::CountingScheduler;

/// Current time from the browser's performance clock.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Animation-frame scheduler for one surface.
///
/// Holds one reusable closure (created when the surface is wired to the
/// shared state) and maps handles 1:1 onto `requestAnimationFrame` ids.
#[cfg(target_arch = "wasm32")]
pub(crate) struct RafScheduler {
    closure: Option<Closure<dyn FnMut()>>,
}

#[cfg(target_arch = "wasm32")]
impl RafScheduler {
    fn new() -> Self {
        Self { closure: None }
    }

    fn wire(&mut self, state: &Rc<RefCell<SharedState>>, id: SurfaceId) {
        let weak = Rc::downgrade(state);
        self.closure = Some(Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                XlPlay::handle_frame(&state, id);
            }
        }) as Box<dyn FnMut()>));
    }
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let id = web_sys::window()
            .zip(self.closure.as_ref())
            .and_then(|(window, cb)| {
                window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok()
            })
            .unwrap_or(0);
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if handle.0 == 0 {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}

/// One surface's canvas, painter, and frame scheduler.
#[cfg(target_arch = "wasm32")]
pub(crate) struct SurfaceBinding {
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) painter: CanvasPainter,
    pub(crate) sched: RafScheduler,
}

/// Shared state reachable from frame callbacks (wasm32 only).
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) player: Player<LocalStore>,
    pub(crate) preview: SurfaceBinding,
    pub(crate) fullscreen: Option<SurfaceBinding>,
}

/// The main player struct exported to JavaScript.
#[wasm_bindgen]
pub struct XlPlay {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,

    // Non-wasm32 fields (headless player for CLI and tests)
    #[cfg(not(target_arch = "wasm32"))]
    player: Player<MemoryStore>,
    #[cfg(not(target_arch = "wasm32"))]
    sched: CountingScheduler,
}

#[cfg(target_arch = "wasm32")]
fn surface_id(fullscreen: bool) -> SurfaceId {
    if fullscreen {
        SurfaceId::Fullscreen
    } else {
        SurfaceId::Preview
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl XlPlay {
    /// Create a player bound to the preview canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<XlPlay, JsValue> {
        console_error_panic_hook::set_once();
        let painter = CanvasPainter::new(&canvas, dpr)?;
        let state = Rc::new(RefCell::new(SharedState {
            player: Player::new(LocalStore::new()),
            preview: SurfaceBinding {
                canvas,
                painter,
                sched: RafScheduler::new(),
            },
            fullscreen: None,
        }));
        state
            .borrow_mut()
            .preview
            .sched
            .wire(&state, SurfaceId::Preview);
        Ok(XlPlay { state })
    }

    /// Load a host-parsed dataset (`{headers, rows, styles?}` JSON).
    ///
    /// Replaces any previous dataset, dismisses fullscreen, stops playback,
    /// and reloads the persisted title for the new source.
    pub fn load_json(&self, source_id: &str, json: &str) -> Result<(), JsValue> {
        let dataset = importer::from_json(source_id, json)?;
        let s = &mut *self.state.borrow_mut();
        if let Some(mut binding) = s.fullscreen.take() {
            s.player.exit_fullscreen(&mut binding.sched);
        }
        s.player.set_dataset(Some(dataset), &mut s.preview.sched);
        Self::paint_surface(s, SurfaceId::Preview);
        Ok(())
    }

    /// Clear the loaded dataset.
    pub fn clear(&self) {
        let s = &mut *self.state.borrow_mut();
        if let Some(mut binding) = s.fullscreen.take() {
            s.player.exit_fullscreen(&mut binding.sched);
        }
        s.player.set_dataset(None, &mut s.preview.sched);
    }

    pub fn play(&self, fullscreen: bool) {
        let s = &mut *self.state.borrow_mut();
        Self::sync_viewport(s, surface_id(fullscreen));
        match surface_id(fullscreen) {
            SurfaceId::Preview => s.player.play(SurfaceId::Preview, &mut s.preview.sched),
            SurfaceId::Fullscreen => {
                if let Some(binding) = s.fullscreen.as_mut() {
                    s.player.play(SurfaceId::Fullscreen, &mut binding.sched);
                }
            }
        }
    }

    pub fn pause(&self, fullscreen: bool) {
        let s = &mut *self.state.borrow_mut();
        match surface_id(fullscreen) {
            SurfaceId::Preview => s.player.pause(SurfaceId::Preview, &mut s.preview.sched),
            SurfaceId::Fullscreen => {
                if let Some(binding) = s.fullscreen.as_mut() {
                    s.player.pause(SurfaceId::Fullscreen, &mut binding.sched);
                }
            }
        }
    }

    pub fn reset(&self, fullscreen: bool) {
        let s = &mut *self.state.borrow_mut();
        match surface_id(fullscreen) {
            SurfaceId::Preview => s.player.reset(SurfaceId::Preview, &mut s.preview.sched),
            SurfaceId::Fullscreen => {
                if let Some(binding) = s.fullscreen.as_mut() {
                    s.player.reset(SurfaceId::Fullscreen, &mut binding.sched);
                }
            }
        }
        Self::paint_surface(s, surface_id(fullscreen));
    }

    pub fn toggle(&self, fullscreen: bool) {
        let playing = self.is_playing(fullscreen);
        if playing {
            self.pause(fullscreen);
        } else {
            self.play(fullscreen);
        }
    }

    pub fn is_playing(&self, fullscreen: bool) -> bool {
        self.state
            .borrow()
            .player
            .surface(surface_id(fullscreen))
            .map(|surface| surface.status() == PlaybackStatus::Playing)
            .unwrap_or(false)
    }

    pub fn scroll_offset(&self, fullscreen: bool) -> f32 {
        self.state
            .borrow()
            .player
            .surface(surface_id(fullscreen))
            .map(|surface| surface.scroll_offset())
            .unwrap_or(0.0)
    }

    pub fn panel_visible(&self, fullscreen: bool) -> bool {
        self.state
            .borrow()
            .player
            .surface(surface_id(fullscreen))
            .map(|surface| surface.panel_visible())
            .unwrap_or(true)
    }

    /// Show or hide a surface's settings panel. Ignored while that surface
    /// is playing (the panel is forced hidden for the duration).
    pub fn set_panel_visible(&self, fullscreen: bool, visible: bool) {
        self.state
            .borrow_mut()
            .player
            .set_panel_visible(surface_id(fullscreen), visible);
    }

    /// Current settings of a surface as a JS object.
    pub fn settings(&self, fullscreen: bool) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let surface = state
            .player
            .surface(surface_id(fullscreen))
            .ok_or_else(|| JsValue::from_str("no such surface"))?;
        serde_wasm_bindgen::to_value(surface.settings()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace a surface's settings. Sanitized at this boundary; effective
    /// on the next frame without resetting the scroll position.
    pub fn apply_settings(&self, fullscreen: bool, settings: JsValue) -> Result<(), JsValue> {
        let settings: PlaybackSettings = serde_wasm_bindgen::from_value(settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let s = &mut *self.state.borrow_mut();
        let id = surface_id(fullscreen);
        s.player.update_settings(id, &settings);
        Self::sync_viewport(s, id);
        Self::paint_surface(s, id);
        Ok(())
    }

    /// Resize a surface's canvas (logical pixels).
    pub fn resize(&self, fullscreen: bool, width: f64, height: f64) {
        let s = &mut *self.state.borrow_mut();
        let id = surface_id(fullscreen);
        match id {
            SurfaceId::Preview => {
                let binding = &mut s.preview;
                binding.painter.resize(&binding.canvas, width, height);
            }
            SurfaceId::Fullscreen => {
                if let Some(binding) = s.fullscreen.as_mut() {
                    binding.painter.resize(&binding.canvas, width, height);
                }
            }
        }
        Self::sync_viewport(s, id);
        Self::paint_surface(s, id);
    }

    /// Enter fullscreen playback on a second canvas.
    ///
    /// The fullscreen surface receives a snapshot of the preview's current
    /// settings and its own stopped engine; the preview keeps playing (or
    /// not) untouched.
    pub fn enter_fullscreen(&self, canvas: HtmlCanvasElement, dpr: f64) -> Result<(), JsValue> {
        {
            let s = &mut *self.state.borrow_mut();
            if let Some(mut old) = s.fullscreen.take() {
                s.player.exit_fullscreen(&mut old.sched);
            }
            let painter = CanvasPainter::new(&canvas, dpr)?;
            let mut binding = SurfaceBinding {
                canvas,
                painter,
                sched: RafScheduler::new(),
            };
            s.player.enter_fullscreen(&mut binding.sched);
            s.fullscreen = Some(binding);
        }
        // Wire outside the borrow: the closure captures a weak state ref.
        let state = Rc::clone(&self.state);
        if let Some(binding) = self.state.borrow_mut().fullscreen.as_mut() {
            binding.sched.wire(&state, SurfaceId::Fullscreen);
        }
        let s = &mut *self.state.borrow_mut();
        Self::sync_viewport(s, SurfaceId::Fullscreen);
        Self::paint_surface(s, SurfaceId::Fullscreen);
        Ok(())
    }

    /// Exit fullscreen, discarding its engine and settings. Nothing is
    /// written back to the preview surface.
    pub fn exit_fullscreen(&self) {
        let s = &mut *self.state.borrow_mut();
        if let Some(mut binding) = s.fullscreen.take() {
            s.player.exit_fullscreen(&mut binding.sched);
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().fullscreen.is_some()
    }

    // ------------------------------------------------------------------
    // Title editing
    // ------------------------------------------------------------------

    pub fn title(&self) -> String {
        self.state.borrow().player.title().committed().to_string()
    }

    pub fn title_draft(&self) -> String {
        self.state.borrow().player.title().draft().to_string()
    }

    pub fn is_editing_title(&self) -> bool {
        self.state.borrow().player.title().is_editing()
    }

    pub fn title_saved_ack(&self) -> bool {
        self.state.borrow().player.title().saved_ack()
    }

    pub fn begin_title_edit(&self) {
        self.state.borrow_mut().player.title_mut().begin_edit();
    }

    pub fn set_title_draft(&self, draft: &str) {
        self.state.borrow_mut().player.title_mut().set_draft(draft);
    }

    /// Commit the draft; persists under `title_<source_id>`.
    pub fn save_title(&self) {
        let s = &mut *self.state.borrow_mut();
        s.player.save_title(now_ms());
        Self::paint_surface(s, SurfaceId::Preview);
        if s.fullscreen.is_some() {
            Self::paint_surface(s, SurfaceId::Fullscreen);
        }
    }

    pub fn cancel_title_edit(&self) {
        self.state.borrow_mut().player.title_mut().cancel();
    }

    /// Keyboard dispatch; returns true when the key was handled.
    pub fn handle_key(&self, key: &str) -> bool {
        Self::internal_key(&self.state, key)
    }

    // ------------------------------------------------------------------
    // App config / analyzer handoff
    // ------------------------------------------------------------------

    pub fn api_key(&self) -> String {
        let state = self.state.borrow();
        AppConfig::from_stored(state.player.store().get(CONFIG_KEY).as_deref()).api_key
    }

    pub fn set_api_key(&self, api_key: &str) {
        let s = &mut *self.state.borrow_mut();
        let mut config = AppConfig::from_stored(s.player.store().get(CONFIG_KEY).as_deref());
        config.api_key = api_key.to_string();
        if let Ok(json) = serde_json::to_string(&config) {
            let _ = s.player.store_mut().set(CONFIG_KEY, &json);
        }
    }

    /// Build the analyzer request body (headers + first 10 rows + key).
    pub fn analyze_request(&self) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let dataset = state
            .player
            .dataset()
            .ok_or_else(|| JsValue::from_str("no dataset loaded"))?;
        let api_key = AppConfig::from_stored(state.player.store().get(CONFIG_KEY).as_deref()).api_key;
        let request = crate::analyzer::AnalyzeRequest::sample(dataset, &api_key);
        serde_wasm_bindgen::to_value(&request).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl XlPlay {
    /// Entry point for fired frame callbacks.
    pub(crate) fn handle_frame(state: &Rc<RefCell<SharedState>>, id: SurfaceId) {
        let s = &mut *state.borrow_mut();
        Self::sync_viewport(s, id);
        let outcome = match id {
            SurfaceId::Preview => s.player.on_frame(id, &mut s.preview.sched),
            SurfaceId::Fullscreen => match s.fullscreen.as_mut() {
                Some(binding) => s.player.on_frame(id, &mut binding.sched),
                None => return,
            },
        };
        s.player.title_mut().tick(now_ms());
        if outcome.is_some() {
            Self::paint_surface(s, id);
        }
    }

    /// Recompute the scroll viewport height from the canvas and chrome.
    fn sync_viewport(s: &mut SharedState, id: SurfaceId) {
        let dims = match id {
            SurfaceId::Preview => Some(&s.preview),
            SurfaceId::Fullscreen => s.fullscreen.as_ref(),
        }
        .zip(s.player.surface(id))
        .map(|(binding, surface)| {
            let settings = surface.settings();
            let chrome = binding
                .painter
                .chrome_height(settings.title_font_size, settings.row_height as f32);
            (binding.painter.height() - chrome).max(0.0)
        });
        if let Some(height) = dims {
            #[allow(clippy::cast_possible_truncation)]
            s.player.set_viewport_height(id, height as f32);
        }
    }

    /// Paint a surface's current frame.
    pub(crate) fn paint_surface(s: &mut SharedState, id: SurfaceId) {
        let Some(dataset) = s.player.dataset() else {
            return;
        };
        let (surface, binding) = match id {
            SurfaceId::Preview => match s.player.surface(id) {
                Some(surface) => (surface, &s.preview),
                None => return,
            },
            SurfaceId::Fullscreen => match (s.player.surface(id), s.fullscreen.as_ref()) {
                (Some(surface), Some(binding)) => (surface, binding),
                _ => return,
            },
        };
        let settings = surface.settings();
        let frame = RenderFrame::build(
            dataset,
            settings,
            surface.scroll_offset(),
            surface.viewport_height(),
        );
        binding.painter.paint(
            &frame,
            s.player.title().committed(),
            settings.title_font_size,
            settings.font_size,
            &settings.text_color,
        );
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for XlPlay {
    fn drop(&mut self) {
        // Component teardown must cancel every pending frame callback.
        let s = &mut *self.state.borrow_mut();
        if let Some(mut binding) = s.fullscreen.take() {
            s.player.exit_fullscreen(&mut binding.sched);
        }
        s.player.teardown(&mut s.preview.sched);
    }
}

// ============================================================================
// Non-WASM32 Implementation (headless, for CLI and tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl XlPlay {
    /// Create a headless player with an in-memory store.
    pub fn new_headless() -> Self {
        Self {
            player: Player::new(MemoryStore::new()),
            sched: CountingScheduler::new(),
        }
    }

    pub fn player(&self) -> &Player<MemoryStore> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player<MemoryStore> {
        &mut self.player
    }

    pub fn scheduler(&self) -> &CountingScheduler {
        &self.sched
    }

    /// Replace the loaded dataset through the player's own scheduler.
    pub fn set_dataset(&mut self, dataset: Option<crate::types::Dataset>) {
        self.player.set_dataset(dataset, &mut self.sched);
    }

    /// Load a dataset from CSV/TSV bytes.
    pub fn load_delimited(
        &mut self,
        source_id: &str,
        data: &[u8],
        delim: importer::Delimiter,
    ) -> crate::error::Result<()> {
        let dataset = importer::from_delimited(source_id, data, delim)?;
        self.player.set_dataset(Some(dataset), &mut self.sched);
        Ok(())
    }

    /// Start preview playback with the given viewport height.
    pub fn play(&mut self, viewport_height: f32) {
        self.player
            .set_viewport_height(SurfaceId::Preview, viewport_height);
        self.player.play(SurfaceId::Preview, &mut self.sched);
    }

    /// Pause preview playback.
    pub fn pause(&mut self) {
        self.player.pause(SurfaceId::Preview, &mut self.sched);
    }

    /// Drive `frames` scheduled callbacks, as the browser's render loop
    /// would. Returns the scroll offset after the last one.
    pub fn step(&mut self, frames: u32) -> f32 {
        for _ in 0..frames {
            if self.sched.fire().is_none() {
                break;
            }
            let _ = self.player.on_frame(SurfaceId::Preview, &mut self.sched);
        }
        self.player
            .surface(SurfaceId::Preview)
            .map(|surface| surface.scroll_offset())
            .unwrap_or(0.0)
    }
}
