//! Assembler configuration.

use std::path::PathBuf;
use std::str::FromStr;

use slidecast_media::GraphSettings;
use slidecast_models::{EncodingConfig, Resolution};

use crate::error::{AssemblerError, AssemblerResult};

/// Which assembly operation a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyMode {
    /// Long-form Ken Burns slideshow via the composition graph.
    #[default]
    Slideshow,
    /// Concat-demuxer slideshow with fixed per-image timing.
    Fast,
    /// Draft-quality concat slideshow (720p, 15 fps, stillimage tune).
    Ultrafast,
    /// Vertical 9:16 short with exact-fit timing.
    Shorts,
    /// Stream-copy trim of an existing video.
    Trim,
}

impl FromStr for AssemblyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slideshow" => Ok(Self::Slideshow),
            "fast" => Ok(Self::Fast),
            "ultrafast" => Ok(Self::Ultrafast),
            "shorts" => Ok(Self::Shorts),
            "trim" => Ok(Self::Trim),
            other => Err(format!("unknown assembly mode: {other}")),
        }
    }
}

/// Assembler configuration.
///
/// Every default lives here, never inside the timing or graph code; the
/// engine only ever sees explicit values.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Which assembly operation to run
    pub mode: AssemblyMode,
    /// Directory holding the ordered image set
    pub image_dir: PathBuf,
    /// Narration audio file
    pub narration_path: PathBuf,
    /// Background music file (silence is mixed when absent)
    pub background_music: Option<PathBuf>,
    /// Output video path
    pub output_path: PathBuf,
    /// Per-image display duration for fixed timing, seconds
    pub image_duration_secs: f64,
    /// Source video for trim mode
    pub trim_input: PathBuf,
    /// Trim length for trim mode, seconds
    pub trim_secs: f64,
    /// Zoom/mix tunables for graph construction
    pub graph: GraphSettings,
    /// Encoding parameters for the render driver
    pub encoding: EncodingConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            mode: AssemblyMode::Slideshow,
            image_dir: PathBuf::from("output/images"),
            narration_path: PathBuf::from("output/audio.wav"),
            background_music: Some(PathBuf::from("assets/background.mp3")),
            output_path: PathBuf::from("output/final_video.mp4"),
            image_duration_secs: 3.0,
            trim_input: PathBuf::from("output/final_video.mp4"),
            trim_secs: 900.0,
            graph: GraphSettings::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl AssemblerConfig {
    /// Create config from environment variables.
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are
    /// configuration errors rather than silent fallbacks.
    pub fn from_env() -> AssemblerResult<Self> {
        let defaults = Self::default();

        let mode = match std::env::var("SLIDECAST_MODE") {
            Ok(value) => value.parse().map_err(AssemblerError::ConfigError)?,
            Err(_) => defaults.mode,
        };

        let mut encoding = default_encoding(mode);

        if let Ok(value) = std::env::var("SLIDECAST_RESOLUTION") {
            let resolution: Resolution = value.parse().map_err(AssemblerError::ConfigError)?;
            encoding = encoding.with_resolution(resolution);
        }
        if let Ok(value) = std::env::var("SLIDECAST_FPS") {
            let fps = value
                .parse()
                .map_err(|_| AssemblerError::config(format!("invalid SLIDECAST_FPS: {value}")))?;
            encoding = encoding.with_frame_rate(fps);
        }

        let mut graph = GraphSettings::default();
        if let Ok(value) = std::env::var("SLIDECAST_MAX_ZOOM") {
            graph.max_zoom = value.parse().map_err(|_| {
                AssemblerError::config(format!("invalid SLIDECAST_MAX_ZOOM: {value}"))
            })?;
        }
        if let Ok(value) = std::env::var("SLIDECAST_BGM_VOLUME") {
            graph.bgm_volume = value.parse().map_err(|_| {
                AssemblerError::config(format!("invalid SLIDECAST_BGM_VOLUME: {value}"))
            })?;
        }

        Ok(Self {
            mode,
            image_dir: env_path("SLIDECAST_IMAGE_DIR", defaults.image_dir),
            narration_path: env_path("SLIDECAST_NARRATION", defaults.narration_path),
            background_music: match std::env::var("BACKGROUND_MUSIC_PATH") {
                Ok(value) if value.is_empty() => None,
                Ok(value) => Some(PathBuf::from(value)),
                Err(_) => defaults.background_music,
            },
            output_path: env_path("SLIDECAST_OUTPUT", defaults.output_path),
            image_duration_secs: env_f64("SLIDECAST_IMAGE_SECONDS", defaults.image_duration_secs)?,
            trim_input: env_path("SLIDECAST_TRIM_INPUT", defaults.trim_input),
            trim_secs: env_f64("SLIDECAST_TRIM_SECONDS", defaults.trim_secs)?,
            graph,
            encoding,
        })
    }
}

/// Encoding preset each mode starts from, before env overrides.
fn default_encoding(mode: AssemblyMode) -> EncodingConfig {
    match mode {
        AssemblyMode::Slideshow => EncodingConfig::default(),
        AssemblyMode::Fast => EncodingConfig::fast(),
        AssemblyMode::Ultrafast => EncodingConfig::ultrafast(),
        AssemblyMode::Shorts => EncodingConfig::shorts(),
        AssemblyMode::Trim => EncodingConfig::default(),
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key).map(PathBuf::from).unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> AssemblerResult<f64> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| AssemblerError::config(format!("invalid {key}: {value}"))),
        Err(_) => Ok(default),
    }
}
