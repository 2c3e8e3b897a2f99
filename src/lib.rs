//! chart-tempo: animation scheduling for price prediction charts.
//!
//! A single [`AnimationEngine`] multiplexes independently timed animations
//! over one host frame clock and throttles itself to a target frame rate.
//! The `core` module holds the pure pixel <-> day/price mapping that render
//! callbacks use to draw what the animations reveal.

pub mod animation;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use animation::{AnimationEngine, AnimationEngineConfig, AnimationUnit};
pub use error::{TempoError, TempoResult};
