use serde::{Deserialize, Serialize};
use tracing::debug;

/// Measurement state of the [`RateGovernor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GovernorPhase {
    /// No full window measured yet; the host is assumed to run at the target
    /// rate, so every callback is accepted.
    #[default]
    Calibrating,
    /// Applying the skip divisor derived from the last measured window.
    Throttling,
}

/// Outcome of feeding one raw host callback to the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorDecision {
    pub accepted: bool,
    /// Accepted callbacks per second in the last completed window.
    pub actual_fps: u32,
    /// Raw host callbacks per second in the last completed window.
    pub max_fps: u32,
    /// `true` when this callback closed a measurement window.
    pub window_rolled: bool,
}

/// Adaptive accept/skip filter that throttles a fast host down toward a
/// target callback rate.
///
/// Each measurement window (1 s by default) counts raw host callbacks and
/// the subset accepted for dispatch. At window end both counts are scaled to
/// per-second rates; the raw rate becomes the host's `max_fps`, and subsequent callbacks are accepted when
/// `raw % max(1, max_fps / target_fps) == 0`. The governor never tries to
/// exceed the host's native rate: a host slower than the target gets every
/// callback accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateGovernor {
    target_fps: u32,
    window_ms: f64,
    window_start_ms: Option<f64>,
    raw_in_window: u32,
    accepted_in_window: u32,
    max_fps: u32,
    actual_fps: u32,
    phase: GovernorPhase,
}

impl RateGovernor {
    /// `target_fps` must be non-zero and `window_ms` positive; the engine
    /// config validates both before constructing a governor.
    #[must_use]
    pub fn new(target_fps: u32, window_ms: f64) -> Self {
        Self {
            target_fps,
            window_ms,
            window_start_ms: None,
            raw_in_window: 0,
            accepted_in_window: 0,
            max_fps: target_fps,
            actual_fps: target_fps,
            phase: GovernorPhase::Calibrating,
        }
    }

    /// Feeds one raw host callback and decides whether it is dispatched.
    pub fn observe(&mut self, timestamp_ms: f64) -> GovernorDecision {
        let window_start_ms = *self.window_start_ms.get_or_insert(timestamp_ms);
        let mut window_rolled = false;

        if timestamp_ms - window_start_ms >= self.window_ms {
            self.max_fps = self.per_second(self.raw_in_window);
            self.actual_fps = self.per_second(self.accepted_in_window);
            self.raw_in_window = 0;
            self.accepted_in_window = 0;
            self.window_start_ms = Some(timestamp_ms);
            self.phase = GovernorPhase::Throttling;
            window_rolled = true;
            debug!(
                max_fps = self.max_fps,
                actual_fps = self.actual_fps,
                divisor = self.divisor(),
                "frame rate window rolled"
            );
        }

        let accepted = self.raw_in_window % self.divisor() == 0;
        if accepted {
            self.accepted_in_window = self.accepted_in_window.saturating_add(1);
        }
        self.raw_in_window = self.raw_in_window.saturating_add(1);

        GovernorDecision {
            accepted,
            actual_fps: self.actual_fps,
            max_fps: self.max_fps,
            window_rolled,
        }
    }

    /// Starts a fresh measurement window on the next callback, keeping the
    /// last measured rates so throttling resumes immediately.
    pub fn restart_window(&mut self) {
        self.window_start_ms = None;
        self.raw_in_window = 0;
        self.accepted_in_window = 0;
    }

    /// Normalizes a per-window count to callbacks per second.
    fn per_second(&self, count_in_window: u32) -> u32 {
        (f64::from(count_in_window) * 1000.0 / self.window_ms).round() as u32
    }

    /// Raw callbacks per accepted callback, never below 1.
    #[must_use]
    pub fn divisor(&self) -> u32 {
        (self.max_fps / self.target_fps.max(1)).max(1)
    }

    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    #[must_use]
    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    #[must_use]
    pub fn actual_fps(&self) -> u32 {
        self.actual_fps
    }

    #[must_use]
    pub fn phase(&self) -> GovernorPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::{GovernorPhase, RateGovernor};

    fn feed(governor: &mut RateGovernor, host_hz: u32, from_callback: u32, callbacks: u32) -> u32 {
        (from_callback..from_callback + callbacks)
            .filter(|&i| {
                let timestamp_ms = f64::from(i) * 1000.0 / f64::from(host_hz);
                governor.observe(timestamp_ms).accepted
            })
            .count() as u32
    }

    #[test]
    fn calibrating_window_accepts_every_callback() {
        let mut governor = RateGovernor::new(30, 1000.0);
        assert_eq!(feed(&mut governor, 60, 0, 60), 60);
        assert_eq!(governor.phase(), GovernorPhase::Calibrating);
        assert_eq!(governor.divisor(), 1);
    }

    #[test]
    fn throttles_sixty_hz_host_to_thirty() {
        let mut governor = RateGovernor::new(30, 1000.0);
        feed(&mut governor, 60, 0, 60);

        let accepted = feed(&mut governor, 60, 60, 60);
        assert_eq!(governor.phase(), GovernorPhase::Throttling);
        assert_eq!(governor.max_fps(), 60);
        assert_eq!(governor.divisor(), 2);
        assert!((28..=32).contains(&accepted), "accepted {accepted}");
    }

    #[test]
    fn slow_host_clamps_divisor_to_one() {
        let mut governor = RateGovernor::new(60, 1000.0);
        feed(&mut governor, 24, 0, 48);
        assert_eq!(governor.max_fps(), 24);
        assert_eq!(governor.divisor(), 1);
        assert_eq!(feed(&mut governor, 24, 48, 24), 24);
    }

    #[test]
    fn short_window_rates_are_reported_per_second() {
        let mut governor = RateGovernor::new(30, 500.0);
        feed(&mut governor, 60, 0, 30);
        assert_eq!(governor.phase(), GovernorPhase::Calibrating);

        let accepted = feed(&mut governor, 60, 30, 120);
        assert_eq!(governor.max_fps(), 60);
        assert_eq!(governor.divisor(), 2);
        assert_eq!(governor.actual_fps(), 30);
        // 120 callbacks span two seconds of host time.
        assert_eq!(accepted, 60);
    }

    #[test]
    fn restart_window_keeps_measured_rates() {
        let mut governor = RateGovernor::new(30, 1000.0);
        feed(&mut governor, 120, 0, 121);
        assert_eq!(governor.max_fps(), 120);

        governor.restart_window();
        assert_eq!(governor.divisor(), 4);
        let decision = governor.observe(50_000.0);
        assert!(decision.accepted);
        assert!(!decision.window_rolled);
        assert_eq!(decision.max_fps, 120);
    }
}
