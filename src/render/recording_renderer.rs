use std::cell::RefCell;
use std::rc::Rc;

use crate::error::TempoResult;
use crate::render::{AnimationFrame, FrameRenderer};

/// Headless renderer that records every frame it is handed.
///
/// Used by tests and by hosts that want to inspect animation progress
/// without drawing. The recorded frames stay readable through a
/// [`RecordedFrames`] handle after the renderer has been moved into a unit.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<AnimationFrame>>>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> RecordedFrames {
        RecordedFrames {
            frames: Rc::clone(&self.frames),
        }
    }
}

impl FrameRenderer for RecordingRenderer {
    fn render_frame(&mut self, frame: &AnimationFrame) -> TempoResult<()> {
        self.frames.borrow_mut().push(*frame);
        Ok(())
    }
}

/// Shared read handle onto a [`RecordingRenderer`]'s frames.
#[derive(Debug, Clone)]
pub struct RecordedFrames {
    frames: Rc<RefCell<Vec<AnimationFrame>>>,
}

impl RecordedFrames {
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<AnimationFrame> {
        self.frames.borrow().last().copied()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<AnimationFrame> {
        self.frames.borrow().clone()
    }

    /// Logical frame indices in presentation order.
    #[must_use]
    pub fn frame_indices(&self) -> Vec<u64> {
        self.frames.borrow().iter().map(|frame| frame.frame).collect()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}
