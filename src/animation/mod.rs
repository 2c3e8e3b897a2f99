//! Frame-rate governed animation scheduling.
//!
//! One [`AnimationEngine`] per chart multiplexes many [`AnimationUnit`]s over a
//! single host frame subscription. Units pace themselves against wall-clock
//! time, so they progress identically whether the host delivers 30 or 144
//! frames per second.

mod engine;
mod engine_config;
mod frame_limit;
mod frame_source;
mod governor;
pub mod reveal;
mod snapshot;
mod unit;

pub use engine::AnimationEngine;
pub use engine_config::AnimationEngineConfig;
pub use frame_limit::FrameLimit;
pub use frame_source::{FrameHandle, FrameSource, InstantFrameSource, ManualFrameSource};
pub use governor::{GovernorDecision, GovernorPhase, RateGovernor};
pub use reveal::{candle_reveal_unit, loading_text_prefix, loading_text_unit};
pub use snapshot::{EngineSnapshot, UnitSnapshot};
pub use unit::{AnimationUnit, UnitState};
