use serde::{Deserialize, Serialize};

use crate::error::{TempoError, TempoResult};

/// Public animation engine bootstrap configuration.
///
/// This type is serializable so host applications can keep it alongside
/// their own settings without inventing an ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationEngineConfig {
    /// Desired render callback rate.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Length of the host rate measurement window.
    #[serde(default = "default_measurement_window_ms")]
    pub measurement_window_ms: f64,
}

impl AnimationEngineConfig {
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            measurement_window_ms: default_measurement_window_ms(),
        }
    }

    #[must_use]
    pub fn with_measurement_window_ms(mut self, window_ms: f64) -> Self {
        self.measurement_window_ms = window_ms;
        self
    }

    pub fn validate(self) -> TempoResult<Self> {
        if self.target_fps == 0 {
            return Err(TempoError::InvalidConfig(
                "target fps must be > 0".to_owned(),
            ));
        }
        if !self.measurement_window_ms.is_finite() || self.measurement_window_ms <= 0.0 {
            return Err(TempoError::InvalidConfig(
                "measurement window must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl Default for AnimationEngineConfig {
    fn default() -> Self {
        Self::new(default_target_fps())
    }
}

fn default_target_fps() -> u32 {
    60
}

fn default_measurement_window_ms() -> f64 {
    1000.0
}
