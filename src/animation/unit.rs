use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{TempoError, TempoResult};
use crate::render::{AnimationFrame, FrameRenderer};

use super::FrameLimit;

/// Mutable progress of one animation.
///
/// All transitions take clock readings as arguments, so the state can be
/// driven by synthetic timestamps in tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UnitState {
    start_time_ms: Option<f64>,
    current_frame: u64,
    presented_frame: u64,
    is_done: bool,
}

impl UnitState {
    pub fn start(&mut self, now_ms: f64) {
        self.start_time_ms = Some(now_ms);
        self.current_frame = 0;
        self.presented_frame = 0;
        self.is_done = false;
    }

    pub fn reset(&mut self) {
        self.start_time_ms = None;
        self.current_frame = 0;
        self.presented_frame = 0;
        self.is_done = false;
    }

    /// Resolves completion for the tick at `timestamp_ms` and returns the
    /// elapsed time to present, or `None` when the unit is not started.
    ///
    /// On reaching `limit` the unit either wraps to frame 0 and restarts its
    /// clock (`auto_reset`) or freezes on the limit. A limit that shrank
    /// below the current frame is clamped here.
    pub fn settle(&mut self, timestamp_ms: f64, limit: Option<u64>, auto_reset: bool) -> Option<f64> {
        let start_time_ms = self.start_time_ms?;
        let elapsed_ms = (timestamp_ms - start_time_ms).max(0.0);

        match limit {
            Some(limit) if !self.is_done && self.current_frame >= limit => {
                if auto_reset {
                    self.current_frame = 0;
                    self.start_time_ms = Some(timestamp_ms);
                } else {
                    self.current_frame = limit;
                    self.is_done = true;
                }
            }
            _ => {}
        }

        Some(elapsed_ms)
    }

    /// Marks the current frame as handed to the renderer.
    pub fn present(&mut self) -> u64 {
        self.presented_frame = self.current_frame;
        self.presented_frame
    }

    /// Time-gated advance: over `expected_duration_ms` exactly `limit`
    /// advances happen, spaced by elapsed wall time rather than tick count.
    /// Without a duration (or without a limit) every call advances.
    pub fn advance(&mut self, elapsed_ms: f64, limit: Option<u64>, expected_duration_ms: Option<f64>) {
        if self.is_done {
            return;
        }

        let Some(limit) = limit else {
            self.current_frame = self.current_frame.saturating_add(1);
            return;
        };

        let time_per_frame_ms = match expected_duration_ms {
            Some(duration_ms) if limit > 0 => duration_ms / limit as f64,
            _ => 0.0,
        };

        if self.current_frame < limit && elapsed_ms >= time_per_frame_ms * self.current_frame as f64 {
            self.current_frame += 1;
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_time_ms.is_some()
    }

    #[must_use]
    pub fn start_time_ms(&self) -> Option<f64> {
        self.start_time_ms
    }

    #[must_use]
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    #[must_use]
    pub fn presented_frame(&self) -> u64 {
        self.presented_frame
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.is_done
    }
}

/// One timed, steppable animation driven by engine ticks.
///
/// Configuration is fixed at construction through the `with_*` builders;
/// afterwards the unit only changes through [`start`](Self::start),
/// [`reset`](Self::reset) and [`tick`](Self::tick).
pub struct AnimationUnit {
    id: String,
    renderer: Box<dyn FrameRenderer>,
    expected_duration_ms: Option<f64>,
    limit: FrameLimit,
    auto_reset: bool,
    state: UnitState,
}

impl AnimationUnit {
    /// Creates an unbounded, non-looping unit without time gating.
    pub fn new(id: impl Into<String>, renderer: impl FrameRenderer + 'static) -> Self {
        Self {
            id: id.into(),
            renderer: Box::new(renderer),
            expected_duration_ms: None,
            limit: FrameLimit::Unbounded,
            auto_reset: false,
            state: UnitState::default(),
        }
    }

    /// Sets the wall-clock time budgeted for the whole frame range.
    #[must_use]
    pub fn with_expected_duration_ms(mut self, duration_ms: f64) -> Self {
        self.expected_duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_total_frames(mut self, total_frames: u64) -> Self {
        self.limit = FrameLimit::Fixed(total_frames);
        self
    }

    /// Uses a limit recomputed on every tick.
    #[must_use]
    pub fn with_dynamic_total_frames(mut self, total_frames: impl Fn() -> u64 + 'static) -> Self {
        self.limit = FrameLimit::dynamic(total_frames);
        self
    }

    #[must_use]
    pub fn with_frame_limit(mut self, limit: FrameLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Loops back to frame 0 on completion instead of freezing.
    #[must_use]
    pub fn with_auto_reset(mut self, auto_reset: bool) -> Self {
        self.auto_reset = auto_reset;
        self
    }

    pub(crate) fn validate(&self) -> TempoResult<()> {
        if self.id.is_empty() {
            return Err(TempoError::InvalidConfig(
                "animation id must not be empty".to_owned(),
            ));
        }
        if self
            .expected_duration_ms
            .is_some_and(|duration_ms| !duration_ms.is_finite() || duration_ms < 0.0)
        {
            return Err(TempoError::InvalidConfig(format!(
                "animation `{}` expected duration must be finite and >= 0",
                self.id
            )));
        }
        Ok(())
    }

    pub fn start(&mut self, now_ms: f64) {
        trace!(id = %self.id, now_ms, "start animation");
        self.state.start(now_ms);
    }

    /// Stops the unit and rewinds it to frame 0.
    ///
    /// `total_frames` replaces the limit only when the limit is supplied
    /// from outside; a dynamic limit keeps its own computation.
    pub fn reset(&mut self, total_frames: Option<u64>) {
        self.state.reset();
        if let Some(total_frames) = total_frames {
            if self.limit.is_external() {
                self.limit = FrameLimit::Fixed(total_frames);
            } else {
                trace!(id = %self.id, total_frames, "ignoring limit override for dynamic animation");
            }
        }
    }

    /// Steps the animation for an accepted engine tick.
    ///
    /// Returns `Ok(false)` without touching the renderer when the unit has
    /// not been started. Renderer errors propagate and skip the advance.
    pub fn tick(&mut self, timestamp_ms: f64, fps: u32, max_fps: u32) -> TempoResult<bool> {
        let limit = self.limit.resolve();
        let Some(elapsed_ms) = self.state.settle(timestamp_ms, limit, self.auto_reset) else {
            return Ok(false);
        };

        let frame = AnimationFrame {
            frame: self.state.present(),
            elapsed_ms,
            fps,
            max_fps,
        };
        self.renderer.render_frame(&frame)?;

        self.state.advance(elapsed_ms, limit, self.expected_duration_ms);
        Ok(true)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Frame most recently handed to the renderer (0 before the first tick).
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.state.presented_frame()
    }

    /// Frame the next tick will present, before any completion handling.
    #[must_use]
    pub fn next_frame(&self) -> u64 {
        self.state.current_frame()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    #[must_use]
    pub fn is_auto_reset(&self) -> bool {
        self.auto_reset
    }

    #[must_use]
    pub fn expected_duration_ms(&self) -> Option<f64> {
        self.expected_duration_ms
    }

    /// Resolves the frame limit now (evaluates dynamic limits).
    #[must_use]
    pub fn total_frames(&self) -> Option<u64> {
        self.limit.resolve()
    }

    #[must_use]
    pub fn state(&self) -> UnitState {
        self.state
    }
}

impl fmt::Debug for AnimationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationUnit")
            .field("id", &self.id)
            .field("expected_duration_ms", &self.expected_duration_ms)
            .field("limit", &self.limit)
            .field("auto_reset", &self.auto_reset)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationUnit, UnitState};
    use crate::error::TempoError;
    use crate::render::{AnimationFrame, RecordingRenderer};

    #[test]
    fn state_settle_is_noop_before_start() {
        let mut state = UnitState::default();
        assert_eq!(state.settle(100.0, Some(10), false), None);
        assert_eq!(state.current_frame(), 0);
    }

    #[test]
    fn state_clamps_shrunken_limit_when_freezing() {
        let mut state = UnitState::default();
        state.start(0.0);
        for step in 0..8 {
            state.settle(f64::from(step), None, false);
            state.advance(f64::from(step), None, None);
        }
        assert_eq!(state.current_frame(), 8);

        state.settle(10.0, Some(5), false);
        assert!(state.is_done());
        assert_eq!(state.current_frame(), 5);
        assert_eq!(state.present(), 5);
    }

    #[test]
    fn state_wrap_restarts_clock_at_tick_timestamp() {
        let mut state = UnitState::default();
        state.start(0.0);
        state.advance(0.0, Some(1), None);
        assert_eq!(state.current_frame(), 1);

        let elapsed = state.settle(250.0, Some(1), true);
        assert_eq!(elapsed, Some(250.0));
        assert_eq!(state.current_frame(), 0);
        assert_eq!(state.start_time_ms(), Some(250.0));
        assert!(!state.is_done());
    }

    #[test]
    fn unbounded_unit_advances_every_tick() {
        let recorder = RecordingRenderer::new();
        let frames = recorder.handle();
        let mut unit = AnimationUnit::new("spinner", recorder);
        unit.start(0.0);
        for tick in 0..5 {
            assert!(unit.tick(f64::from(tick), 60, 60).expect("tick"));
        }
        assert_eq!(frames.frame_indices(), vec![0, 1, 2, 3, 4]);
        assert_eq!(unit.next_frame(), 5);
        assert!(!unit.is_done());
    }

    #[test]
    fn renderer_error_skips_advance() {
        let mut unit = AnimationUnit::new("broken", |frame: &AnimationFrame| {
            if frame.frame == 2 {
                Err(TempoError::render("broken", "canvas lost"))
            } else {
                Ok(())
            }
        });
        unit.start(0.0);
        unit.tick(0.0, 60, 60).expect("frame 0");
        unit.tick(1.0, 60, 60).expect("frame 1");
        assert!(unit.tick(2.0, 60, 60).is_err());
        assert_eq!(unit.next_frame(), 2);
    }

    #[test]
    fn reset_replaces_fixed_limit_but_not_dynamic() {
        let mut fixed = AnimationUnit::new("fixed", RecordingRenderer::new()).with_total_frames(4);
        fixed.reset(Some(9));
        assert_eq!(fixed.total_frames(), Some(9));

        let mut unbounded = AnimationUnit::new("open", RecordingRenderer::new());
        unbounded.reset(Some(3));
        assert_eq!(unbounded.total_frames(), Some(3));

        let mut dynamic =
            AnimationUnit::new("dynamic", RecordingRenderer::new()).with_dynamic_total_frames(|| 6);
        dynamic.reset(Some(2));
        assert_eq!(dynamic.total_frames(), Some(6));
    }

    #[test]
    fn validate_rejects_empty_id_and_bad_duration() {
        assert!(AnimationUnit::new("", RecordingRenderer::new()).validate().is_err());
        assert!(
            AnimationUnit::new("a", RecordingRenderer::new())
                .with_expected_duration_ms(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            AnimationUnit::new("a", RecordingRenderer::new())
                .with_expected_duration_ms(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            AnimationUnit::new("a", RecordingRenderer::new())
                .with_expected_duration_ms(500.0)
                .validate()
                .is_ok()
        );
    }
}
