//! Logging facilities for drilldown.
//!
//! drilldown uses the `tracing` crate for instrumentation. Library code only
//! emits events; to see them, install a subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("drilldown=debug"))
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout drilldown for tracing.
pub mod span_names {
    /// Column stack mutation span.
    pub const COLUMN_STACK: &str = "drilldown::column_stack";
    /// Deferred scroll span.
    pub const SCROLL: &str = "drilldown::scroll";
    /// Scheduler processing span.
    pub const SCHEDULER: &str = "drilldown_core::scheduler";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "drilldown_core";
    /// Deferred task scheduler target.
    pub const SCHEDULER: &str = "drilldown_core::scheduler";
    /// Navigation crate target.
    pub const DRILLDOWN: &str = "drilldown";
    /// Column stack target.
    pub const COLUMN_STACK: &str = "drilldown::column_stack";
    /// Deferred scroll target.
    pub const SCROLL: &str = "drilldown::scroll";
    /// Mind-map model target.
    pub const MINDMAP: &str = "drilldown::mindmap";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Useful for measuring how long a navigation step takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "drilldown::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with a consistent target.
#[macro_export]
macro_rules! drill_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "drilldown", $($arg)*)
    };
}

#[macro_export]
macro_rules! drill_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "drilldown", $($arg)*)
    };
}

#[macro_export]
macro_rules! drill_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "drilldown", $($arg)*)
    };
}
