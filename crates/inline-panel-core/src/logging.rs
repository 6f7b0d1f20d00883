//! Logging and tracing facilities for Inline Panel.
//!
//! Inline Panel uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the embedding application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("inline_panel=debug")
//!     .init();
//! ```
//!
//! The [`targets`] constants name each subsystem so that filters such as
//! `inline_panel::reorder=trace` can narrow output to one concern.

/// Span names used throughout Inline Panel for tracing.
pub mod span_names {
    /// Full refresh pass (labels, move buttons, add affordance).
    pub const REFRESH: &str = "inline_panel::refresh";
    /// Performance measurement span.
    pub const PERF: &str = "inline_panel::perf";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "inline_panel_core::signal";
    /// Controller lifecycle target (add, delete, refresh).
    pub const PANEL: &str = "inline_panel::panel";
    /// Per-record initialization and field bookkeeping target.
    pub const RECORD: &str = "inline_panel::record";
    /// Reorder planning target.
    pub const REORDER: &str = "inline_panel::reorder";
    /// Cosmetic animation target.
    pub const ANIMATION: &str = "inline_panel::animation";
    /// Configuration validation target.
    pub const CONFIG: &str = "inline_panel::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure the duration of refresh passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new(span_names::REFRESH);
    }

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("inline_panel=trace")
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::debug!(target: targets::PANEL, "inside span");
        });
    }
}
