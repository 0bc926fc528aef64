//! Video encoding configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset for long-form slideshows
pub const DEFAULT_PRESET: &str = "ultrafast";
/// Default CRF (Constant Rate Factor) for long-form slideshows
pub const DEFAULT_CRF: u8 = 18;
/// Default audio bitrate for long-form slideshows
pub const DEFAULT_AUDIO_BITRATE: &str = "192k";
/// Default pixel format (broad player compatibility)
pub const DEFAULT_PIX_FMT: &str = "yuv420p";
/// Default frame rate
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Landscape output resolution (16:9)
pub const LANDSCAPE_WIDTH: u32 = 1920;
pub const LANDSCAPE_HEIGHT: u32 = 1080;
/// Portrait output resolution for shorts (9:16)
pub const PORTRAIT_WIDTH: u32 = 1080;
pub const PORTRAIT_HEIGHT: u32 = 1920;

/// Target output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 1920x1080 landscape.
    pub const fn landscape() -> Self {
        Self::new(LANDSCAPE_WIDTH, LANDSCAPE_HEIGHT)
    }

    /// 1080x1920 portrait (shorts).
    pub const fn portrait() -> Self {
        Self::new(PORTRAIT_WIDTH, PORTRAIT_HEIGHT)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::landscape()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    /// Parse "WIDTHxHEIGHT" (e.g. "1920x1080").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| format!("invalid resolution: {s}"))?;
        let width = w.parse().map_err(|_| format!("invalid width: {w}"))?;
        let height = h.parse().map_err(|_| format!("invalid height: {h}"))?;
        Ok(Self { width, height })
    }
}

/// Video encoding configuration.
///
/// One render driver, many presets: the fast / ultrafast / shorts
/// variants differ only in the values carried here, never in code paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Target output resolution
    #[serde(default)]
    pub resolution: Resolution,

    /// Output frame rate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Video codec (e.g., "libx264")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g., "ultrafast", "veryfast", "medium")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant Rate Factor (quality, 0-51, lower is better)
    #[serde(default = "default_crf")]
    pub crf: u8,

    /// Pixel format
    #[serde(default = "default_pix_fmt")]
    pub pix_fmt: String,

    /// Encoder tune (e.g., "stillimage" for slideshow frames)
    #[serde(default)]
    pub tune: Option<String>,

    /// Audio codec
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Relocate container metadata for progressive playback
    #[serde(default = "default_true")]
    pub faststart: bool,

    /// Stop at the end of the shortest stream (reconciles slideshow
    /// length with audio length for fixed-per-image timing)
    #[serde(default)]
    pub shortest: bool,

    /// Additional FFmpeg output arguments
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_crf() -> u8 {
    DEFAULT_CRF
}
fn default_pix_fmt() -> String {
    DEFAULT_PIX_FMT.to_string()
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}
fn default_audio_bitrate() -> String {
    DEFAULT_AUDIO_BITRATE.to_string()
}
fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}
fn default_true() -> bool {
    true
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::landscape(),
            frame_rate: DEFAULT_FRAME_RATE,
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            pix_fmt: DEFAULT_PIX_FMT.to_string(),
            tune: None,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            faststart: true,
            shortest: false,
            extra_args: Vec::new(),
        }
    }
}

impl EncodingConfig {
    /// Create a new encoding configuration with long-form defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Speed-over-quality configuration for quick turnaround renders.
    pub fn fast() -> Self {
        Self {
            preset: "veryfast".to_string(),
            crf: 23,
            audio_bitrate: "128k".to_string(),
            shortest: true,
            ..Default::default()
        }
    }

    /// Lowest-fidelity configuration for draft renders (720p, 15 fps).
    pub fn ultrafast() -> Self {
        Self {
            resolution: Resolution::new(1280, 720),
            frame_rate: 15,
            preset: "ultrafast".to_string(),
            crf: 28,
            tune: Some("stillimage".to_string()),
            audio_bitrate: "96k".to_string(),
            shortest: true,
            ..Default::default()
        }
    }

    /// Vertical 9:16 configuration for shorts.
    pub fn shorts() -> Self {
        Self {
            resolution: Resolution::portrait(),
            preset: "medium".to_string(),
            crf: 23,
            audio_bitrate: "128k".to_string(),
            shortest: true,
            ..Default::default()
        }
    }

    /// Returns a new config with updated CRF.
    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf;
        self
    }

    /// Returns a new config with updated resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Returns a new config with updated frame rate.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Convert to FFmpeg output arguments.
    ///
    /// Resolution and frame rate are not emitted here; they belong to the
    /// filter graph (zoompan / scale / fps stages), not the encoder.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
        ];

        if let Some(tune) = &self.tune {
            args.extend_from_slice(&["-tune".to_string(), tune.clone()]);
        }

        args.extend_from_slice(&[
            "-crf".to_string(),
            self.crf.to_string(),
            "-pix_fmt".to_string(),
            self.pix_fmt.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]);

        if self.shortest {
            args.push("-shortest".to_string());
        }

        if self.faststart {
            args.extend_from_slice(&["-movflags".to_string(), "+faststart".to_string()]);
        }

        args.extend(self.extra_args.clone());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncodingConfig::default();
        assert_eq!(config.codec, "libx264");
        assert_eq!(config.crf, 18);
        assert_eq!(config.resolution.to_string(), "1920x1080");
        assert!(config.faststart);
        assert!(!config.shortest);
    }

    #[test]
    fn test_ffmpeg_args() {
        let config = EncodingConfig::default();
        let args = config.to_ffmpeg_args();
        assert!(args.contains(&"-c:v".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"18".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
    }

    #[test]
    fn test_ultrafast_preset() {
        let config = EncodingConfig::ultrafast();
        assert_eq!(config.resolution, Resolution::new(1280, 720));
        assert_eq!(config.frame_rate, 15);
        let args = config.to_ffmpeg_args();
        assert!(args.contains(&"-tune".to_string()));
        assert!(args.contains(&"stillimage".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
    }

    #[test]
    fn test_shorts_preset() {
        let config = EncodingConfig::shorts();
        assert_eq!(config.resolution, Resolution::portrait());
        assert_eq!(config.resolution.to_string(), "1080x1920");
    }

    #[test]
    fn test_resolution_parse() {
        let r: Resolution = "1920x1080".parse().unwrap();
        assert_eq!(r, Resolution::landscape());
        assert!("1920".parse::<Resolution>().is_err());
        assert!("ax b".parse::<Resolution>().is_err());
    }
}
