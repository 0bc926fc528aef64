//! Render driver: turn a composition graph into an FFmpeg invocation.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use slidecast_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::graph::CompositionGraph;

/// One render invocation: graph, destination, encoding parameters.
///
/// Constructed per assembly run, executed once, then discarded; the
/// driver never retries. Callers that want a fallback (e.g. a faster,
/// lower-quality profile) build a new job with a different
/// `EncodingConfig`.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub graph: CompositionGraph,
    pub output: PathBuf,
    pub encoding: EncodingConfig,
}

impl RenderJob {
    pub fn new(graph: CompositionGraph, output: impl Into<PathBuf>, encoding: EncodingConfig) -> Self {
        Self {
            graph,
            output: output.into(),
            encoding,
        }
    }
}

/// The finished artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Where the rendered file was written.
    pub output_path: PathBuf,
    /// Size of the artifact in bytes.
    pub bytes: u64,
}

/// Serialize a job into an FFmpeg command.
pub fn build_render_command(job: &RenderJob) -> FfmpegCommand {
    FfmpegCommand::new(&job.output)
        .inputs(job.graph.ffmpeg_inputs())
        .filter_complex(job.graph.filter_complex())
        .map(format!("[{}]", job.graph.video_out))
        .map(format!("[{}]", job.graph.audio_out))
        .output_args(job.encoding.to_ffmpeg_args())
}

/// Execute a render job to completion.
///
/// A non-zero renderer exit surfaces as `RenderFailed` with the captured
/// diagnostic text. On success the artifact's size is reported.
pub async fn render(job: &RenderJob) -> MediaResult<RenderResult> {
    job.graph.validate()?;

    if let Some(parent) = job.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let cmd = build_render_command(job);
    FfmpegRunner::new().run(&cmd).await?;

    finish(&job.output).await
}

/// Stat a finished artifact and report it.
pub(crate) async fn finish(output: &Path) -> MediaResult<RenderResult> {
    let bytes = fs::metadata(output).await?.len();
    info!(
        "Rendered {} ({:.1} MB)",
        output.display(),
        bytes as f64 / 1024.0 / 1024.0
    );
    Ok(RenderResult {
        output_path: output.to_path_buf(),
        bytes,
    })
}
