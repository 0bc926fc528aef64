//! FFprobe media information.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Measured information about a media file.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

/// Probe a media file for duration and size.
///
/// Fails fast with `InvalidDuration` when the container reports no
/// usable duration, so timing arithmetic never runs on a zero default.
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ProbeFailed {
            message: format!("FFprobe failed for {}", path.display()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::InvalidDuration(duration));
    }

    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    Ok(MediaInfo { duration, size })
}

/// Get media duration in seconds.
pub async fn get_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let info = probe_media(path).await?;
    Ok(info.duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{"format": {"duration": "45.5", "size": "1024"}}"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(probe.format.duration.as_deref(), Some("45.5"));
        assert_eq!(probe.format.size.as_deref(), Some("1024"));
    }

    #[test]
    fn test_parse_probe_output_missing_duration() {
        let json = r#"{"format": {}}"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(probe.format.duration.is_none());
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_media("/nonexistent/audio.wav").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
