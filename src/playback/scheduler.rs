//! Frame callback scheduling.
//!
//! The engine never chains callbacks implicitly: every scheduled frame is an
//! explicit cancellable handle owned by exactly one engine instance, so
//! cancellation on pause/reset/teardown is a checkable invariant rather than
//! a convention. The wasm viewer implements [`FrameScheduler`] over
//! `requestAnimationFrame`; native tests use [`CountingScheduler`].

/// Cancellable handle to one scheduled frame callback.
///
/// Matches the id type `requestAnimationFrame` hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host-provided scheduling of per-frame callbacks.
pub trait FrameScheduler {
    /// Request one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested callback that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Test scheduler that tracks outstanding handles.
///
/// Lives in the library (not `tests/`) so the CLI's headless simulation can
/// reuse it.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    pub requested: u32,
    pub cancelled: u32,
}

impl CountingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks scheduled but not yet fired or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Consume the oldest pending handle, simulating its callback firing.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled += 1;
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_scheduler_tracks_pending() {
        let mut sched = CountingScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_eq!(sched.pending_count(), 2);
        sched.cancel_frame(a);
        assert_eq!(sched.pending_count(), 1);
        assert_eq!(sched.fire(), Some(b));
        assert_eq!(sched.pending_count(), 0);
    }
}
