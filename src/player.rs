//! Top-level player: dataset lifecycle, preview/fullscreen surfaces, title.
//!
//! Owns the single authoritative settings value per surface and mediates the
//! one-directional handoff into fullscreen: entering fullscreen clones the
//! preview's current settings into a fresh surface with its own stopped
//! engine; exiting discards that surface without writing anything back.

use crate::persist::{title_key, Store};
use crate::playback::{FrameOutcome, FrameScheduler};
use crate::surface::PlaybackSurface;
use crate::title::TitleEditor;
use crate::types::{Dataset, PlaybackSettings};

/// Which playback surface an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    Preview,
    Fullscreen,
}

/// The player behind both the inline preview and the fullscreen view.
pub struct Player<S: Store> {
    store: S,
    dataset: Option<Dataset>,
    preview: PlaybackSurface,
    fullscreen: Option<PlaybackSurface>,
    title: TitleEditor,
}

impl<S: Store> Player<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            dataset: None,
            preview: PlaybackSurface::new(PlaybackSettings::default()),
            fullscreen: None,
            title: TitleEditor::new(),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn preview(&self) -> &PlaybackSurface {
        &self.preview
    }

    pub fn fullscreen(&self) -> Option<&PlaybackSurface> {
        self.fullscreen.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    pub fn title(&self) -> &TitleEditor {
        &self.title
    }

    pub fn title_mut(&mut self) -> &mut TitleEditor {
        &mut self.title
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut PlaybackSurface> {
        match id {
            SurfaceId::Preview => Some(&mut self.preview),
            SurfaceId::Fullscreen => self.fullscreen.as_mut(),
        }
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&PlaybackSurface> {
        match id {
            SurfaceId::Preview => Some(&self.preview),
            SurfaceId::Fullscreen => self.fullscreen.as_ref(),
        }
    }

    /// Replace the dataset (new import) or clear it.
    ///
    /// Both engines are torn down (pending callbacks cancelled), fullscreen
    /// is dismissed, and the title editor reloads the committed title for
    /// the new source (persisted value if present, default otherwise).
    pub fn set_dataset(&mut self, dataset: Option<Dataset>, sched: &mut dyn FrameScheduler) {
        self.preview.teardown(sched);
        self.preview.reset(sched);
        if let Some(mut fs) = self.fullscreen.take() {
            fs.teardown(sched);
        }
        match &dataset {
            Some(ds) => {
                let persisted = self.store.get(&title_key(&ds.source_id));
                self.title.load(persisted);
            }
            None => self.title.clear(),
        }
        self.dataset = dataset;
    }

    /// Start playback on a surface. Entering playback also abandons an
    /// in-progress title edit.
    pub fn play(&mut self, id: SurfaceId, sched: &mut dyn FrameScheduler) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        self.title.cancel();
        match id {
            SurfaceId::Preview => self.preview.play(dataset, sched),
            SurfaceId::Fullscreen => {
                if let Some(fs) = self.fullscreen.as_mut() {
                    fs.play(dataset, sched);
                }
            }
        }
    }

    pub fn pause(&mut self, id: SurfaceId, sched: &mut dyn FrameScheduler) {
        if let Some(surface) = self.surface_mut(id) {
            surface.pause(sched);
        }
    }

    pub fn reset(&mut self, id: SurfaceId, sched: &mut dyn FrameScheduler) {
        if let Some(surface) = self.surface_mut(id) {
            surface.reset(sched);
        }
    }

    pub fn toggle(&mut self, id: SurfaceId, sched: &mut dyn FrameScheduler) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        self.title.cancel();
        match id {
            SurfaceId::Preview => self.preview.toggle(dataset, sched),
            SurfaceId::Fullscreen => {
                if let Some(fs) = self.fullscreen.as_mut() {
                    fs.toggle(dataset, sched);
                }
            }
        }
    }

    /// Update a surface's settings (sanitized; effective next frame).
    pub fn update_settings(&mut self, id: SurfaceId, settings: &PlaybackSettings) {
        if let Some(surface) = self.surface_mut(id) {
            surface.update_settings(settings);
        }
    }

    pub fn set_viewport_height(&mut self, id: SurfaceId, height: f32) {
        if let Some(surface) = self.surface_mut(id) {
            surface.set_viewport_height(height);
        }
    }

    /// Show or hide a surface's settings panel (no-op while playing).
    pub fn set_panel_visible(&mut self, id: SurfaceId, visible: bool) {
        if let Some(surface) = self.surface_mut(id) {
            surface.set_panel_visible(visible);
        }
    }

    /// Advance a surface by one frame. Returns what the frame did, or
    /// `None` when there is no dataset or no such surface.
    pub fn on_frame(
        &mut self,
        id: SurfaceId,
        sched: &mut dyn FrameScheduler,
    ) -> Option<FrameOutcome> {
        let dataset = self.dataset.as_ref()?;
        match id {
            SurfaceId::Preview => Some(self.preview.on_frame(dataset, sched)),
            SurfaceId::Fullscreen => self
                .fullscreen
                .as_mut()
                .map(|fs| fs.on_frame(dataset, sched)),
        }
    }

    /// Enter fullscreen with a snapshot of the preview's current settings.
    ///
    /// The fullscreen surface gets a deep copy and a fresh stopped engine;
    /// the preview's settings and playback state continue independently.
    /// Re-entering while already fullscreen replaces the old surface (after
    /// tearing it down).
    pub fn enter_fullscreen(&mut self, sched: &mut dyn FrameScheduler) {
        if let Some(mut old) = self.fullscreen.take() {
            old.teardown(sched);
        }
        self.fullscreen = Some(PlaybackSurface::new(self.preview.settings().clone()));
    }

    /// Discard the fullscreen surface. Nothing is written back to preview.
    pub fn exit_fullscreen(&mut self, sched: &mut dyn FrameScheduler) {
        if let Some(mut fs) = self.fullscreen.take() {
            fs.teardown(sched);
        }
    }

    /// Commit the title draft and persist it under the dataset's key.
    ///
    /// The in-memory commit always succeeds; a store failure is degraded
    /// silently (the title just is not remembered across sessions).
    pub fn save_title(&mut self, now_ms: f64) {
        let Some(committed) = self.title.save(now_ms) else {
            return;
        };
        if let Some(key) = self.dataset.as_ref().map(|ds| title_key(&ds.source_id)) {
            let _ = self.store.set(&key, &committed);
        }
    }

    /// Cancel any pending callbacks on both surfaces (component teardown).
    pub fn teardown(&mut self, sched: &mut dyn FrameScheduler) {
        self.preview.teardown(sched);
        if let Some(mut fs) = self.fullscreen.take() {
            fs.teardown(sched);
        }
    }
}
