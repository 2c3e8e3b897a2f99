use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Token for one outstanding "next frame" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host per-frame clock consumed by [`AnimationEngine`](super::AnimationEngine).
///
/// The engine keeps at most one request outstanding. When a requested frame
/// arrives the host calls `AnimationEngine::on_frame` with the frame
/// timestamp; the engine then requests the next one. Timestamps must be
/// monotonic milliseconds on the same clock as [`now_ms`](Self::now_ms).
pub trait FrameSource {
    /// Current clock reading in milliseconds.
    fn now_ms(&self) -> f64;

    /// Asks the host to deliver one more frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraws a request made with [`request_frame`](Self::request_frame).
    ///
    /// Also called with the just-delivered handle when processing that frame
    /// failed, so the source stops reporting it as outstanding.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame source with an externally driven clock.
///
/// Used by tests and headless hosts: the caller sets the clock and feeds
/// frame timestamps to the engine directly.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManualFrameSource {
    now_ms: f64,
    next_handle: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn set_now_ms(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// Request currently waiting for delivery, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    #[must_use]
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    #[must_use]
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameSource for ManualFrameSource {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.requested += 1;
        let handle = FrameHandle::new(self.next_handle);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

/// Frame source backed by the process monotonic clock.
///
/// Suitable for native event loops that pump frames on their own vsync
/// signal: the loop checks [`has_pending`](Self::has_pending) and feeds
/// `now_ms()` to the engine.
#[derive(Debug, Clone)]
pub struct InstantFrameSource {
    origin: Instant,
    next_handle: u64,
    pending: Option<FrameHandle>,
}

impl InstantFrameSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_handle: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for InstantFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for InstantFrameSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle::new(self.next_handle);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
