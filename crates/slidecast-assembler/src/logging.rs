//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for assembly runs with
//! contextual information (run ID, operation).

use tracing::{error, info, warn};
use uuid::Uuid;

/// Run logger for structured logging with consistent formatting.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    operation: String,
}

impl RunLogger {
    /// Create a logger for a fresh run of the given operation
    /// (e.g. "slideshow", "shorts", "trim").
    pub fn new(operation: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            operation: operation.to_string(),
        }
    }

    /// The generated run identifier.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Log the start of an assembly run.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run started: {}", message
        );
    }

    /// Log a progress update.
    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run progress: {}", message
        );
    }

    /// Log a warning.
    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run warning: {}", message
        );
    }

    /// Log successful completion with the artifact's location and size.
    pub fn log_complete(&self, output: &std::path::Path, bytes: u64) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            output = %output.display(),
            size_mb = format!("{:.1}", bytes as f64 / 1024.0 / 1024.0),
            "Run complete"
        );
    }

    /// Log a failed run.
    pub fn log_failure(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run failed: {}", message
        );
    }
}
