//! Playback engine: the play/pause/reset state machine that owns one
//! viewport's scroll position.
//!
//! One engine per visible surface. The preview and fullscreen surfaces each
//! own an independent engine over the same dataset; they never touch each
//! other's state.

mod scheduler;

pub use scheduler::{CountingScheduler, FrameHandle, FrameScheduler};

use crate::layout::MarqueeLayout;

/// Playback lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What a fired frame callback did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Offset advanced (possibly wrapping); the next frame is scheduled.
    Advanced { offset: f32, wrapped: bool },
    /// Viewport not ready this frame; offset untouched, retry scheduled.
    Skipped,
    /// Engine is no longer playing; nothing scheduled.
    Idle,
}

/// Scroll state machine for one marquee viewport.
///
/// The engine holds at most one pending frame handle at a time, and every
/// path out of `Playing` (pause, reset, teardown) cancels it, so no stale
/// callback can mutate the offset after the engine has logically stopped.
#[derive(Debug, Default)]
pub struct PlaybackEngine {
    status: PlaybackStatus,
    scroll_offset: f32,
    pending: Option<FrameHandle>,
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Handle of the currently scheduled frame callback, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Transition to `Playing` and request the first frame.
    ///
    /// Refused for an empty row sequence: there is nothing to scroll, so
    /// the engine stays `Stopped`. Calling `play` while already playing is
    /// a no-op.
    pub fn play(&mut self, layout: &MarqueeLayout, sched: &mut dyn FrameScheduler) {
        if self.status == PlaybackStatus::Playing || layout.row_count() == 0 {
            return;
        }
        self.status = PlaybackStatus::Playing;
        // Leaving Playing always cancels, so no handle can be pending here.
        self.pending = Some(sched.request_frame());
    }

    /// Transition to `Paused` and cancel the pending frame.
    ///
    /// Idempotent: pausing while already paused (or stopped) changes
    /// nothing. The scroll offset is retained for resume.
    pub fn pause(&mut self, sched: &mut dyn FrameScheduler) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        self.status = PlaybackStatus::Paused;
        self.cancel_pending(sched);
    }

    /// Force `Stopped` with the scroll position back at the top.
    pub fn reset(&mut self, sched: &mut dyn FrameScheduler) {
        self.status = PlaybackStatus::Stopped;
        self.scroll_offset = 0.0;
        self.cancel_pending(sched);
    }

    /// Cancel any pending callback without touching status or offset.
    ///
    /// Called on teardown (surface discarded, dataset replaced) so a stale
    /// tick can never fire into a dead engine.
    pub fn teardown(&mut self, sched: &mut dyn FrameScheduler) {
        self.cancel_pending(sched);
    }

    fn cancel_pending(&mut self, sched: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            sched.cancel_frame(handle);
        }
    }

    /// Advance by one frame. Called by the host when the scheduled callback
    /// fires.
    ///
    /// While `Playing`, the offset grows by `speed` px and wraps once it
    /// reaches the repeated content height plus one viewport, back to
    /// `-viewport_height`, never 0, so the loop shows no seam. A zero or
    /// non-finite viewport height skips the advance for this frame and
    /// retries on the next one. Speed and row height are read fresh each
    /// call, so settings changes take effect on the next frame without
    /// resetting the offset.
    pub fn on_frame(
        &mut self,
        layout: &MarqueeLayout,
        speed: f32,
        viewport_height: f32,
        sched: &mut dyn FrameScheduler,
    ) -> FrameOutcome {
        // The fired callback is spent whether or not we advance.
        self.pending = None;

        if self.status != PlaybackStatus::Playing {
            return FrameOutcome::Idle;
        }

        if viewport_height <= 0.0 || !viewport_height.is_finite() {
            // Not laid out yet; try again next frame.
            self.pending = Some(sched.request_frame());
            return FrameOutcome::Skipped;
        }

        let mut wrapped = false;
        self.scroll_offset += speed;
        if self.scroll_offset >= layout.wrap_threshold(viewport_height) {
            self.scroll_offset = MarqueeLayout::wrap_to(viewport_height);
            wrapped = true;
        }

        self.pending = Some(sched.request_frame());
        FrameOutcome::Advanced {
            offset: self.scroll_offset,
            wrapped,
        }
    }
}
