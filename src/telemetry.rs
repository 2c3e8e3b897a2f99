//! Telemetry helpers for hosts embedding `chart-tempo`.
//!
//! The engine only emits `tracing` events: window rollovers and lifecycle
//! changes at `debug`, per-unit transitions at `trace`, renderer failures at
//! `warn`. Installing a subscriber is left to the host; `init_default_tracing`
//! covers the common case behind the `telemetry` feature.

/// Filter used when `RUST_LOG` is unset: warnings from everything, engine
/// lifecycle and frame-rate windows from this crate.
pub const DEFAULT_FILTER: &str = "warn,chart_tempo=debug";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when a global subscriber is already installed.
#[cfg(feature = "telemetry")]
#[must_use]
pub fn init_default_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

/// Without the `telemetry` feature there is no subscriber to install.
#[cfg(not(feature = "telemetry"))]
#[must_use]
pub fn init_default_tracing() -> bool {
    false
}
