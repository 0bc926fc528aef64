//! End-to-end assembly runs.

use slidecast_media::{
    assemble_shorts, assemble_slideshow, assemble_slideshow_fast, trim_copy, RenderResult,
};

use crate::config::{AssemblerConfig, AssemblyMode};
use crate::error::AssemblerResult;
use crate::logging::RunLogger;

/// Execute one assembly run for the configured mode.
///
/// Runs are sequential and self-contained: measurement, graph
/// construction, and the render invocation happen in order, and nothing
/// is shared with other runs.
pub async fn run(config: &AssemblerConfig) -> AssemblerResult<RenderResult> {
    let logger = RunLogger::new(operation_name(config.mode));
    logger.log_start(&format!(
        "{} -> {}",
        config.image_dir.display(),
        config.output_path.display()
    ));

    let result = execute(config).await;

    match &result {
        Ok(rendered) => logger.log_complete(&rendered.output_path, rendered.bytes),
        Err(e) => logger.log_failure(&e.to_string()),
    }

    result
}

async fn execute(config: &AssemblerConfig) -> AssemblerResult<RenderResult> {
    let rendered = match config.mode {
        AssemblyMode::Slideshow => {
            assemble_slideshow(
                &config.image_dir,
                &config.narration_path,
                config.background_music.as_deref(),
                &config.output_path,
                &config.graph,
                &config.encoding,
            )
            .await?
        }
        AssemblyMode::Fast | AssemblyMode::Ultrafast => {
            assemble_slideshow_fast(
                &config.image_dir,
                &config.narration_path,
                &config.output_path,
                config.image_duration_secs,
                &config.encoding,
            )
            .await?
        }
        AssemblyMode::Shorts => {
            assemble_shorts(
                &config.image_dir,
                &config.narration_path,
                &config.output_path,
                &config.encoding,
            )
            .await?
        }
        AssemblyMode::Trim => {
            trim_copy(&config.trim_input, &config.output_path, config.trim_secs).await?
        }
    };

    Ok(rendered)
}

fn operation_name(mode: AssemblyMode) -> &'static str {
    match mode {
        AssemblyMode::Slideshow => "slideshow",
        AssemblyMode::Fast => "slideshow_fast",
        AssemblyMode::Ultrafast => "slideshow_ultrafast",
        AssemblyMode::Shorts => "shorts",
        AssemblyMode::Trim => "trim",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecast_media::MediaError;
    use crate::error::AssemblerError;

    #[tokio::test]
    async fn test_run_surfaces_missing_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssemblerConfig {
            image_dir: dir.path().to_path_buf(),
            ..AssemblerConfig::default()
        };

        let err = run(&config).await.unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::Media(MediaError::NoAssets(_))
        ));
    }
}
