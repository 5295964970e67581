//! Failure log capability for the checker.

use tracing::error;

/// Sink for error messages raised when the service gives no verdict.
pub trait FailureLog: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards failures to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl FailureLog for TracingLog {
    fn error(&self, message: &str) {
        error!("{}", message);
    }
}
