//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during slideshow assembly.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("no image assets: {0}")]
    NoAssets(String),

    #[error("invalid media duration: {0}s")]
    InvalidDuration(f64),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("render failed: {message}")]
    RenderFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    ProbeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("composition graph inconsistency: {0}")]
    GraphConsistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a render failure error carrying the renderer's diagnostics.
    pub fn render_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::RenderFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a graph consistency error.
    pub fn graph(message: impl Into<String>) -> Self {
        Self::GraphConsistency(message.into())
    }

    /// Full diagnostic text for a render failure, if any was captured.
    pub fn render_diagnostics(&self) -> Option<&str> {
        match self {
            Self::RenderFailed { stderr, .. } => stderr.as_deref(),
            Self::ProbeFailed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_failed_carries_diagnostics() {
        let err = MediaError::render_failed(
            "FFmpeg exited with non-zero status",
            Some("codec not found".to_string()),
            Some(1),
        );
        assert_eq!(err.render_diagnostics(), Some("codec not found"));
        assert!(err.to_string().contains("render failed"));
    }
}
