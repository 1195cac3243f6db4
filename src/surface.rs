//! One playback surface: settings, engine, and panel state.
//!
//! The preview and fullscreen views are both instances of
//! [`PlaybackSurface`]; each owns its settings copy and its engine, so the
//! two never share mutable state.

use crate::layout::MarqueeLayout;
use crate::playback::{FrameOutcome, FrameScheduler, PlaybackEngine, PlaybackStatus};
use crate::types::{Dataset, PlaybackSettings};

/// A self-contained playback viewport.
#[derive(Debug)]
pub struct PlaybackSurface {
    settings: PlaybackSettings,
    engine: PlaybackEngine,
    panel_visible: bool,
    viewport_height: f32,
}

impl PlaybackSurface {
    /// Create a surface with sanitized settings and a stopped engine.
    ///
    /// The settings panel starts visible, matching the stopped state.
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            engine: PlaybackEngine::new(),
            panel_visible: true,
            viewport_height: 0.0,
        }
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn status(&self) -> PlaybackStatus {
        self.engine.status()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.engine.scroll_offset()
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Record the laid-out viewport height (0 until layout happens).
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }

    /// Replace this surface's settings (sanitized at the boundary).
    ///
    /// Takes effect on the next frame; the scroll offset is untouched.
    pub fn update_settings(&mut self, settings: &PlaybackSettings) {
        self.settings = settings.sanitized();
    }

    /// Geometry for the current dataset and row height.
    pub fn layout(&self, dataset: &Dataset) -> MarqueeLayout {
        MarqueeLayout::new(dataset.row_count(), self.settings.row_height)
    }

    /// Start (or resume) playback.
    ///
    /// Entering `Playing` forces the settings panel hidden, a UX policy
    /// invariant, not a side effect of rendering.
    pub fn play(&mut self, dataset: &Dataset, sched: &mut dyn FrameScheduler) {
        let layout = self.layout(dataset);
        self.engine.play(&layout, sched);
        if self.engine.is_playing() {
            self.panel_visible = false;
        }
    }

    /// Pause playback; the panel becomes visible again.
    pub fn pause(&mut self, sched: &mut dyn FrameScheduler) {
        let was_playing = self.engine.is_playing();
        self.engine.pause(sched);
        if was_playing {
            self.panel_visible = true;
        }
    }

    /// Stop and rewind to the top; the panel becomes visible again.
    pub fn reset(&mut self, sched: &mut dyn FrameScheduler) {
        self.engine.reset(sched);
        self.panel_visible = true;
    }

    /// Toggle between `Playing` and `Paused`/`Stopped`.
    pub fn toggle(&mut self, dataset: &Dataset, sched: &mut dyn FrameScheduler) {
        if self.engine.is_playing() {
            self.pause(sched);
        } else {
            self.play(dataset, sched);
        }
    }

    /// Show or hide the settings panel. Ignored while playing (the panel is
    /// forced hidden for the duration).
    pub fn set_panel_visible(&mut self, visible: bool) {
        if !self.engine.is_playing() {
            self.panel_visible = visible;
        }
    }

    /// Advance one frame; called when this surface's scheduled callback
    /// fires.
    pub fn on_frame(&mut self, dataset: &Dataset, sched: &mut dyn FrameScheduler) -> FrameOutcome {
        let layout = self.layout(dataset);
        self.engine
            .on_frame(&layout, self.settings.speed, self.viewport_height, sched)
    }

    /// Cancel any scheduled callback before the surface is dropped or its
    /// dataset is replaced.
    pub fn teardown(&mut self, sched: &mut dyn FrameScheduler) {
        self.engine.teardown(sched);
    }
}
