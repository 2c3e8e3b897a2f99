use serde::{Deserialize, Serialize};

use crate::error::{TempoError, TempoResult};

use super::{AnimationEngine, AnimationUnit, FrameSource, GovernorPhase};

/// Serializable per-unit state used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: String,
    pub frame: u64,
    pub next_frame: u64,
    pub started: bool,
    pub done: bool,
    pub auto_reset: bool,
    pub total_frames: Option<u64>,
    pub expected_duration_ms: Option<f64>,
}

impl From<&AnimationUnit> for UnitSnapshot {
    fn from(unit: &AnimationUnit) -> Self {
        Self {
            id: unit.id().to_owned(),
            frame: unit.frame(),
            next_frame: unit.next_frame(),
            started: unit.is_started(),
            done: unit.is_done(),
            auto_reset: unit.is_auto_reset(),
            total_frames: unit.total_frames(),
            expected_duration_ms: unit.expected_duration_ms(),
        }
    }
}

/// Deterministic engine state snapshot. Units appear in dispatch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub running: bool,
    pub target_fps: u32,
    pub max_fps: u32,
    pub actual_fps: u32,
    pub governor_phase: GovernorPhase,
    pub units: Vec<UnitSnapshot>,
}

impl<S: FrameSource> AnimationEngine<S> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            running: self.is_running(),
            target_fps: self.target_fps(),
            max_fps: self.max_fps(),
            actual_fps: self.actual_fps(),
            governor_phase: self.governor().phase(),
            units: self.units().map(UnitSnapshot::from).collect(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> TempoResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| TempoError::Serialization(format!("failed to serialize snapshot: {e}")))
    }
}
