mod recording_renderer;

pub use recording_renderer::{RecordedFrames, RecordingRenderer};

use serde::{Deserialize, Serialize};

use crate::error::TempoResult;

/// Progress of one animation as observed on an accepted engine tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Logical animation frame, `0..=limit`.
    pub frame: u64,
    /// Wall-clock time since the animation (re)started, in milliseconds.
    pub elapsed_ms: f64,
    /// Accepted callbacks per second measured over the last window.
    pub fps: u32,
    /// Raw host callbacks per second measured over the last window.
    pub max_fps: u32,
}

/// Contract implemented by anything that draws animation progress.
///
/// Renderers are invoked once per accepted tick, including ticks where the
/// animation is frozen on its last frame, so a consumer can keep redrawing
/// the final state. Errors are not caught by the engine; they propagate to
/// whoever delivered the frame.
pub trait FrameRenderer {
    fn render_frame(&mut self, frame: &AnimationFrame) -> TempoResult<()>;
}

impl<F> FrameRenderer for F
where
    F: FnMut(&AnimationFrame) -> TempoResult<()>,
{
    fn render_frame(&mut self, frame: &AnimationFrame) -> TempoResult<()> {
        self(frame)
    }
}
