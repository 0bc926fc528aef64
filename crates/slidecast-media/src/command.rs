//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// One external input to an FFmpeg invocation.
///
/// `pre_args` are emitted before this input's `-i` flag, which is where
/// FFmpeg expects per-input options (`-loop`, `-t`, `-f lavfi`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct FfmpegInput {
    pre_args: Vec<String>,
    target: String,
}

impl FfmpegInput {
    /// A plain file input.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            pre_args: Vec::new(),
            target: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// A still image held as a video source for `duration` seconds.
    pub fn looped_image(path: impl AsRef<Path>, duration: f64) -> Self {
        Self {
            pre_args: vec![
                "-loop".to_string(),
                "1".to_string(),
                "-t".to_string(),
                format!("{:.3}", duration),
            ],
            target: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// A generated lavfi source (e.g. `anullsrc` silence).
    pub fn lavfi(source: impl Into<String>) -> Self {
        Self {
            pre_args: vec!["-f".to_string(), "lavfi".to_string()],
            target: source.into(),
        }
    }

    /// A concat demuxer manifest input.
    pub fn concat_manifest(path: impl AsRef<Path>) -> Self {
        Self {
            pre_args: vec![
                "-f".to_string(),
                "concat".to_string(),
                "-safe".to_string(),
                "0".to_string(),
            ],
            target: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Arguments emitted before `-i` for this input.
    pub fn pre_args(&self) -> &[String] {
        &self.pre_args
    }

    /// The input target (file path or lavfi source description).
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    inputs: Vec<FfmpegInput>,
    output: PathBuf,
    output_args: Vec<String>,
    overwrite: bool,
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command writing to `output`.
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Append an input; inputs keep the order they are added in.
    pub fn input(mut self, input: FfmpegInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Append multiple inputs.
    pub fn inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = FfmpegInput>,
    {
        self.inputs.extend(inputs);
        self
    }

    /// Add an output argument (after all inputs).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set filter complex.
    pub fn filter_complex(self, filter: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(filter)
    }

    /// Set video filter.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Map a stream or filter label into the output.
    pub fn map(self, label: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(label)
    }

    /// Limit output duration.
    pub fn duration(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format!("{:.3}", seconds))
    }

    /// Stream copy without re-encoding.
    pub fn codec_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Output path this command writes to.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        for input in &self.inputs {
            args.extend(input.pre_args.iter().cloned());
            args.push("-i".to_string());
            args.push(input.target.clone());
        }

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands.
///
/// Runs FFmpeg as a single blocking subprocess and maps a non-zero exit
/// into `RenderFailed` with the captured stderr text; the raw process
/// failure never reaches callers.
#[derive(Debug, Default)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self
    }

    /// Run an FFmpeg command to completion.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::render_failed(
                "FFmpeg exited with non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ))
        }
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}
