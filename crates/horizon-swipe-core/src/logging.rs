//! Logging facilities for Horizon Swipe.
//!
//! Horizon Swipe uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_swipe::controller=debug")
//!     .init();
//! ```
//!
//! Phase transitions are logged at `debug`, per-sample drag updates at
//! `trace`, and misuse that is tolerated (unknown rows, empty button
//! factories) at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Swipe controller state machine.
    pub const CONTROLLER: &str = "horizon_swipe::controller";
    /// Pointer sample classification.
    pub const GESTURE: &str = "horizon_swipe::gesture";
    /// Host list adapter (reuse, single-open policy).
    pub const TABLE: &str = "horizon_swipe::table";
    /// Offset animations.
    pub const ANIMATION: &str = "horizon_swipe::animation";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_swipe::config";
    /// Action sheet requests.
    pub const ACTION_SHEET: &str = "horizon_swipe::action_sheet";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_swipe_core::signal";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure per-frame work such as layout computation.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_swipe::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
