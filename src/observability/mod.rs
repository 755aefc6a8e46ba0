//! Observability: tracing setup, secret redaction and generation metrics.

mod logging;
mod metrics;

pub use logging::{init_tracing, redact, LogConfig, LogLevel};
pub use metrics::{DefaultMetricsCollector, GenerationMetrics, MetricsCollector};

use std::time::{Duration, Instant};

/// Request timer for measuring operation duration.
#[derive(Debug)]
pub struct RequestTimer {
    start: Instant,
    operation: &'static str,
}

impl RequestTimer {
    /// Starts a timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Returns the elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}
