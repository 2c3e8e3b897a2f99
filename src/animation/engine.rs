use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace, warn};

use crate::error::{TempoError, TempoResult};

use super::{AnimationEngineConfig, AnimationUnit, FrameHandle, FrameSource, RateGovernor};

/// Single driving loop shared by every animation of one chart.
///
/// The engine owns its frame source, a [`RateGovernor`] and a registry of
/// [`AnimationUnit`]s. Each host frame passes through the governor; accepted
/// frames tick every registered unit in registration order.
///
/// Units must be registered before [`start_all`](Self::start_all).
/// Registering while the loop runs is not guarded against: the new unit is
/// ticked from the next accepted frame but stays unstarted until
/// [`start`](Self::start) is called for it.
pub struct AnimationEngine<S: FrameSource> {
    source: S,
    config: AnimationEngineConfig,
    governor: RateGovernor,
    registry: IndexMap<String, AnimationUnit>,
    pending_frame: Option<FrameHandle>,
}

impl<S: FrameSource> AnimationEngine<S> {
    pub fn new(source: S, config: AnimationEngineConfig) -> TempoResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            source,
            governor: RateGovernor::new(config.target_fps, config.measurement_window_ms),
            config,
            registry: IndexMap::new(),
            pending_frame: None,
        })
    }

    /// Registers a unit. A duplicate id is rejected and leaves the registry
    /// unchanged.
    pub fn add_animate(&mut self, unit: AnimationUnit) -> TempoResult<()> {
        unit.validate()?;
        match self.registry.entry(unit.id().to_owned()) {
            Entry::Occupied(entry) => Err(TempoError::DuplicateAnimation {
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(id = %entry.key(), "register animation");
                entry.insert(unit);
                Ok(())
            }
        }
    }

    /// Starts every unit and subscribes to host frames. No-op while running.
    pub fn start_all(&mut self) {
        if self.pending_frame.is_some() {
            trace!("start_all ignored: engine already running");
            return;
        }

        let now_ms = self.source.now_ms();
        for unit in self.registry.values_mut() {
            unit.start(now_ms);
        }
        self.governor.restart_window();
        self.pending_frame = Some(self.source.request_frame());
        debug!(units = self.registry.len(), now_ms, "animation engine started");
    }

    /// Restarts one unit from frame 0. Unknown ids are ignored.
    pub fn start(&mut self, id: &str) {
        let now_ms = self.source.now_ms();
        match self.registry.get_mut(id) {
            Some(unit) => unit.start(now_ms),
            None => debug!(id, "start ignored: unknown animation"),
        }
    }

    /// Stops one unit and rewinds it; see [`AnimationUnit::reset`].
    /// Unknown ids are ignored.
    pub fn reset(&mut self, id: &str, total_frames: Option<u64>) {
        match self.registry.get_mut(id) {
            Some(unit) => unit.reset(total_frames),
            None => debug!(id, "reset ignored: unknown animation"),
        }
    }

    /// Cancels the frame subscription. Units keep their state.
    pub fn stop_all(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.source.cancel_frame(handle);
            debug!("animation engine stopped");
        }
    }

    /// Loop step for a host frame delivered at `timestamp_ms`.
    ///
    /// Returns `Ok(true)` when the governor accepted the frame and units were
    /// ticked. Frames delivered while stopped are ignored. A renderer error
    /// aborts the step: the delivered handle is withdrawn from the source,
    /// no next frame is requested and the engine stays stopped until
    /// [`start_all`](Self::start_all).
    pub fn on_frame(&mut self, timestamp_ms: f64) -> TempoResult<bool> {
        let Some(handle) = self.pending_frame.take() else {
            trace!(timestamp_ms, "frame ignored: engine not running");
            return Ok(false);
        };

        let decision = self.governor.observe(timestamp_ms);
        if decision.accepted {
            for unit in self.registry.values_mut() {
                if let Err(err) = unit.tick(timestamp_ms, decision.actual_fps, decision.max_fps) {
                    warn!(id = unit.id(), error = %err, "animation tick failed; engine stopped");
                    self.source.cancel_frame(handle);
                    return Err(err);
                }
            }
        }

        self.pending_frame = Some(self.source.request_frame());
        Ok(decision.accepted)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    #[must_use]
    pub fn config(&self) -> AnimationEngineConfig {
        self.config
    }

    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.config.target_fps
    }

    /// Raw host callbacks in the last measured window.
    #[must_use]
    pub fn max_fps(&self) -> u32 {
        self.governor.max_fps()
    }

    /// Accepted callbacks in the last measured window.
    #[must_use]
    pub fn actual_fps(&self) -> u32 {
        self.governor.actual_fps()
    }

    #[must_use]
    pub fn governor(&self) -> &RateGovernor {
        &self.governor
    }

    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&AnimationUnit> {
        self.registry.get(id)
    }

    /// Frame last presented by the unit with `id`.
    #[must_use]
    pub fn frame(&self, id: &str) -> Option<u64> {
        self.registry.get(id).map(AnimationUnit::frame)
    }

    /// Registered units in dispatch order.
    pub fn units(&self) -> impl Iterator<Item = &AnimationUnit> {
        self.registry.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }
}
