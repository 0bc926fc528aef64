//! Slideshow assembly operations.
//!
//! # Architecture
//!
//! Three assembly entry points share one render driver and differ only
//! in timing policy and encoding preset:
//!
//! ## 1. `assemble_slideshow()` - Long-form Ken Burns
//! Builds the full composition graph: per-image zoompan, concat, and
//! narration/background amix. Timing is exact-fit against the measured
//! narration duration.
//!
//! ## 2. `assemble_slideshow_fast()` - Concat slideshow
//! Skips the filter graph in favor of a concat demuxer manifest with a
//! fixed per-image duration; output length is reconciled with the
//! narration via the encoder's shortest-stream option.
//!
//! ## 3. `assemble_shorts()` - Vertical shorts
//! Concat demuxer manifest with exact-fit timing and a 9:16 scale/pad
//! filter.
//!
//! `trim_copy()` is the stream-copy trim used to cut a finished video to
//! a fixed length without re-encoding.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use slidecast_models::{AudioTrack, EncodingConfig, ImageAsset};

use crate::command::{FfmpegCommand, FfmpegInput, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::graph::{build_graph, GraphSettings};
use crate::manifest::ConcatManifest;
use crate::probe;
use crate::render::{finish, render, RenderJob, RenderResult};
use crate::timing::{allocate, TimingPlan, TimingPolicy};

/// Collect the ordered image set from a directory.
///
/// Images play in lexical filename order; the fetch step names files so
/// that this matches the script order.
pub fn collect_images(dir: &Path) -> MediaResult<Vec<ImageAsset>> {
    if !dir.is_dir() {
        return Err(MediaError::FileNotFound(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image(path))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(MediaError::NoAssets(dir.display().to_string()));
    }

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| ImageAsset::new(index, path))
        .collect())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "jpg" || ext == "jpeg" || ext == "png"
        })
        .unwrap_or(false)
}

/// Assemble the long-form slideshow with zoom/pan effects.
///
/// A configured background track that is missing on disk degrades to the
/// generated silence placeholder rather than failing the run.
pub async fn assemble_slideshow(
    image_dir: &Path,
    narration_path: &Path,
    background_path: Option<&Path>,
    output: &Path,
    settings: &GraphSettings,
    encoding: &EncodingConfig,
) -> MediaResult<RenderResult> {
    let images = collect_images(image_dir)?;
    if !narration_path.exists() {
        return Err(MediaError::FileNotFound(narration_path.to_path_buf()));
    }

    let duration = probe::get_duration(narration_path).await?;
    info!(
        "Assembling slideshow: {} images over {:.1}s of narration",
        images.len(),
        duration
    );

    let plan = TimingPlan::build(duration, images.len(), TimingPolicy::ExactFit)?;

    let background = match background_path {
        Some(path) if path.exists() => Some(AudioTrack::new(path)),
        Some(path) => {
            warn!(
                "Background music {} not found, mixing silence instead",
                path.display()
            );
            None
        }
        None => None,
    };

    let narration = AudioTrack::new(narration_path);
    let graph = build_graph(
        &images,
        &narration,
        background.as_ref(),
        &plan,
        settings,
        encoding,
    )?;

    render(&RenderJob::new(graph, output, encoding.clone())).await
}

/// Assemble a slideshow quickly via the concat demuxer.
///
/// Each image is shown for a fixed `per_image_secs`; the encoder's
/// shortest-stream option trims or pads the result against the
/// narration.
pub async fn assemble_slideshow_fast(
    image_dir: &Path,
    narration_path: &Path,
    output: &Path,
    per_image_secs: f64,
    encoding: &EncodingConfig,
) -> MediaResult<RenderResult> {
    let images = collect_images(image_dir)?;
    if !narration_path.exists() {
        return Err(MediaError::FileNotFound(narration_path.to_path_buf()));
    }

    let durations = allocate(
        per_image_secs * images.len() as f64,
        images.len(),
        TimingPolicy::FixedPerImage(per_image_secs),
    )?;

    info!(
        "Assembling fast slideshow: {} images at {:.1}s each",
        images.len(),
        per_image_secs
    );

    render_concat_slideshow(&images, &durations, narration_path, output, encoding).await
}

/// Assemble a vertical (9:16) short.
///
/// Timing is exact-fit against the measured narration duration; the
/// scale/pad filter letterboxes portrait images into the target frame.
pub async fn assemble_shorts(
    image_dir: &Path,
    narration_path: &Path,
    output: &Path,
    encoding: &EncodingConfig,
) -> MediaResult<RenderResult> {
    let images = collect_images(image_dir)?;
    if !narration_path.exists() {
        return Err(MediaError::FileNotFound(narration_path.to_path_buf()));
    }

    let duration = probe::get_duration(narration_path).await?;
    let durations = allocate(duration, images.len(), TimingPolicy::ExactFit)?;

    info!(
        "Assembling short: {} images over {:.1}s of narration",
        images.len(),
        duration
    );

    render_concat_slideshow(&images, &durations, narration_path, output, encoding).await
}

/// Trim a finished video to `seconds` via stream copy (no re-encoding).
pub async fn trim_copy(input: &Path, output: &Path, seconds: f64) -> MediaResult<RenderResult> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(MediaError::InvalidDuration(seconds));
    }

    ensure_parent(output).await?;

    let cmd = FfmpegCommand::new(output)
        .input(FfmpegInput::file(input))
        .duration(seconds)
        .codec_copy()
        .output_arg("-avoid_negative_ts")
        .output_arg("make_zero");

    FfmpegRunner::new().run(&cmd).await?;
    finish(output).await
}

/// Shared concat-demuxer render path.
///
/// The manifest is removed on both exit paths; a render failure still
/// cleans up before the error is surfaced.
async fn render_concat_slideshow(
    images: &[ImageAsset],
    durations: &[f64],
    narration_path: &Path,
    output: &Path,
    encoding: &EncodingConfig,
) -> MediaResult<RenderResult> {
    ensure_parent(output).await?;
    let manifest_dir = parent_or_cwd(output);
    let manifest = ConcatManifest::write(manifest_dir, images, durations)?;

    let cmd = FfmpegCommand::new(output)
        .input(FfmpegInput::concat_manifest(manifest.path()))
        .input(FfmpegInput::file(narration_path))
        .video_filter(scale_pad_filter(encoding))
        .output_args(encoding.to_ffmpeg_args());

    let run_result = FfmpegRunner::new().run(&cmd).await;
    manifest.remove();
    run_result?;

    finish(output).await
}

/// Letterbox filter: fit into the target frame, pad with black, fix fps.
fn scale_pad_filter(encoding: &EncodingConfig) -> String {
    let r = encoding.resolution;
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:black,fps={fps}",
        w = r.width,
        h = r.height,
        fps = encoding.frame_rate,
    )
}

async fn ensure_parent(output: &Path) -> MediaResult<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

fn parent_or_cwd(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["img_002.jpg", "img_000.jpg", "img_001.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = collect_images(dir.path()).unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].index, 0);
        assert!(images[0].path.ends_with("img_000.jpg"));
        assert!(images[1].path.ends_with("img_001.png"));
        assert!(images[2].path.ends_with("img_002.jpg"));
    }

    #[test]
    fn test_collect_images_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_images(dir.path()).unwrap_err();
        assert!(matches!(err, MediaError::NoAssets(_)));
    }

    #[test]
    fn test_collect_images_missing_dir() {
        let err = collect_images(Path::new("/nonexistent/images")).unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_assemble_fails_before_probe_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = assemble_slideshow(
            dir.path(),
            Path::new("missing-audio.wav"),
            None,
            Path::new("out.mp4"),
            &GraphSettings::default(),
            &EncodingConfig::default(),
        )
        .await
        .unwrap_err();
        // The empty image set is rejected before narration is touched.
        assert!(matches!(err, MediaError::NoAssets(_)));
    }

    #[tokio::test]
    async fn test_assemble_fast_missing_narration() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("img_000.jpg"), b"x").unwrap();

        let err = assemble_slideshow_fast(
            dir.path(),
            Path::new("missing-audio.wav"),
            Path::new("out.mp4"),
            3.0,
            &EncodingConfig::fast(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_render_still_removes_manifest() {
        let image_dir = tempfile::tempdir().unwrap();
        std::fs::write(image_dir.path().join("img_000.jpg"), b"not a real jpeg").unwrap();
        let narration = image_dir.path().join("audio.wav");
        std::fs::write(&narration, b"not real audio").unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("out.mp4");

        let err = assemble_slideshow_fast(
            image_dir.path(),
            &narration,
            &output,
            3.0,
            &EncodingConfig::fast(),
        )
        .await
        .unwrap_err();

        // Garbage inputs make the renderer exit non-zero; that surfaces
        // as RenderFailed carrying the captured diagnostics. On hosts
        // without ffmpeg the eager binary check fires instead.
        match err {
            MediaError::RenderFailed { stderr, .. } => assert!(stderr.is_some()),
            MediaError::FfmpegNotFound => {}
            other => panic!("unexpected error: {other}"),
        }

        // The transient manifest is removed on the failure path too.
        let leftovers: Vec<_> = std::fs::read_dir(out_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("slideshow-")
            })
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_trim_copy_rejects_bad_duration() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"x").unwrap();

        let err = trim_copy(&input, &dir.path().join("out.mp4"), 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidDuration(_)));
    }

    #[test]
    fn test_scale_pad_filter_uses_encoding() {
        let filter = scale_pad_filter(&EncodingConfig::shorts());
        assert!(filter.contains("scale=1080:1920"));
        assert!(filter.contains("pad=1080:1920"));
        assert!(filter.contains("fps=30"));
    }
}
