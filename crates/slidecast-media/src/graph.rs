//! Composition graph construction.
//!
//! The slideshow is described as a typed graph of named filter stages
//! over an ordered list of external inputs. The graph is serialized to
//! FFmpeg's filter_complex syntax only at the invocation boundary, so
//! construction stays testable without spawning a renderer.

use std::collections::HashSet;
use std::path::PathBuf;

use slidecast_models::{AudioTrack, EncodingConfig, ImageAsset};

use crate::command::FfmpegInput;
use crate::effect::effect_for;
use crate::error::{MediaError, MediaResult};
use crate::timing::TimingPlan;

/// Generated silence, stands in for background music when none is
/// configured so input index arithmetic stays uniform.
pub const SILENCE_SOURCE: &str = "anullsrc=channel_layout=stereo:sample_rate=44100";

/// Label of the final concatenated video stream.
pub const VIDEO_OUT: &str = "video";
/// Label of the final mixed audio stream.
pub const AUDIO_OUT: &str = "aout";
/// Label of the attenuated background music stream.
const BGM_LABEL: &str = "bgm";

/// Default background music mix level (fraction of original amplitude).
pub const DEFAULT_BGM_VOLUME: f64 = 0.2;
/// Default dropout transition when one mixed source ends early, seconds.
pub const DEFAULT_DROPOUT_TRANSITION: u32 = 2;

/// Tunables for graph construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSettings {
    /// Zoom factor at the start of each segment.
    pub start_zoom: f64,
    /// Zoom bound reached at the end of each segment.
    pub max_zoom: f64,
    /// Background music mix level.
    pub bgm_volume: f64,
    /// Cross-fade length when a mixed audio source runs out.
    pub dropout_transition: u32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            start_zoom: 1.0,
            max_zoom: 1.1,
            bgm_volume: DEFAULT_BGM_VOLUME,
            dropout_transition: DEFAULT_DROPOUT_TRANSITION,
        }
    }
}

/// One external media input of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphInput {
    /// A file input (narration, background music).
    File(PathBuf),
    /// A still image held for a fixed duration.
    LoopedImage { path: PathBuf, duration: f64 },
    /// A generated lavfi source.
    Generated(String),
}

impl GraphInput {
    /// Convert into the invocation-boundary input form.
    pub fn to_ffmpeg_input(&self) -> FfmpegInput {
        match self {
            Self::File(path) => FfmpegInput::file(path),
            Self::LoopedImage { path, duration } => FfmpegInput::looped_image(path, *duration),
            Self::Generated(source) => FfmpegInput::lavfi(source.clone()),
        }
    }
}

/// Ordered registry assigning positional input indices.
///
/// Index arithmetic lives here and nowhere else; stages reference inputs
/// only through indices handed out by `register`.
#[derive(Debug, Default)]
pub struct InputRegistry {
    inputs: Vec<GraphInput>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input and return its positional index.
    pub fn register(&mut self, input: GraphInput) -> usize {
        self.inputs.push(input);
        self.inputs.len() - 1
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    fn into_inputs(self) -> Vec<GraphInput> {
        self.inputs
    }
}

/// One named filter stage.
///
/// Input labels are either stream references into the external input
/// list ("2:v") or labels produced by an earlier stage ("zp0").
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    pub inputs: Vec<String>,
    pub filter: String,
    pub outputs: Vec<String>,
}

impl FilterStage {
    pub fn new(
        inputs: Vec<String>,
        filter: impl Into<String>,
        outputs: Vec<String>,
    ) -> Self {
        Self {
            inputs,
            filter: filter.into(),
            outputs,
        }
    }

    /// Serialize to filter_complex stage syntax.
    fn render(&self) -> String {
        let mut out = String::new();
        for label in &self.inputs {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        out.push_str(&self.filter);
        for label in &self.outputs {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        out
    }
}

/// A complete slideshow composition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionGraph {
    pub inputs: Vec<GraphInput>,
    pub stages: Vec<FilterStage>,
    pub video_out: String,
    pub audio_out: String,
}

impl CompositionGraph {
    /// Serialize all stages to FFmpeg filter_complex syntax.
    pub fn filter_complex(&self) -> String {
        self.stages
            .iter()
            .map(FilterStage::render)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// External inputs in invocation-boundary form, preserving order.
    pub fn ffmpeg_inputs(&self) -> Vec<FfmpegInput> {
        self.inputs.iter().map(GraphInput::to_ffmpeg_input).collect()
    }

    /// Check that every referenced label was produced by an earlier
    /// stage or refers to a registered external input.
    ///
    /// A failure here is a construction defect, never a property of
    /// valid user input.
    pub fn validate(&self) -> MediaResult<()> {
        let mut produced: HashSet<&str> = HashSet::new();

        for stage in &self.stages {
            for label in &stage.inputs {
                if let Some((index, _stream)) = label.split_once(':') {
                    let index: usize = index.parse().map_err(|_| {
                        MediaError::graph(format!("malformed stream reference [{label}]"))
                    })?;
                    if index >= self.inputs.len() {
                        return Err(MediaError::graph(format!(
                            "stream reference [{label}] has no matching external input"
                        )));
                    }
                } else if !produced.contains(label.as_str()) {
                    return Err(MediaError::graph(format!(
                        "label [{label}] consumed before being produced"
                    )));
                }
            }
            for label in &stage.outputs {
                if !produced.insert(label) {
                    return Err(MediaError::graph(format!(
                        "label [{label}] produced by more than one stage"
                    )));
                }
            }
        }

        for label in [&self.video_out, &self.audio_out] {
            if !produced.contains(label.as_str()) {
                return Err(MediaError::graph(format!(
                    "output label [{label}] is never produced"
                )));
            }
        }

        Ok(())
    }
}

/// Build the slideshow composition graph.
///
/// Input index 0 is reserved for narration and index 1 for background
/// music (or generated silence when none is supplied); images follow at
/// indices 2 and up. Labels are derived from position, so identical
/// inputs always produce an identical graph.
pub fn build_graph(
    images: &[ImageAsset],
    narration: &AudioTrack,
    background: Option<&AudioTrack>,
    plan: &TimingPlan,
    settings: &GraphSettings,
    encoding: &EncodingConfig,
) -> MediaResult<CompositionGraph> {
    if images.is_empty() {
        return Err(MediaError::NoAssets("empty image sequence".to_string()));
    }
    if plan.len() != images.len() {
        return Err(MediaError::graph(format!(
            "timing plan covers {} segments for {} images",
            plan.len(),
            images.len()
        )));
    }

    let mut registry = InputRegistry::new();
    let narration_index = registry.register(GraphInput::File(narration.path.clone()));
    let background_index = registry.register(match background {
        Some(track) => GraphInput::File(track.path.clone()),
        None => GraphInput::Generated(SILENCE_SOURCE.to_string()),
    });

    let mut stages = Vec::with_capacity(images.len() + 3);
    let mut segment_labels = Vec::with_capacity(images.len());

    for (image, segment) in images.iter().zip(plan.segments()) {
        let index = registry.register(GraphInput::LoopedImage {
            path: image.path.clone(),
            duration: segment.duration,
        });

        let fx = effect_for(
            segment.duration,
            encoding.frame_rate,
            settings.start_zoom,
            settings.max_zoom,
        );
        let label = format!("zp{}", image.index);
        stages.push(FilterStage::new(
            vec![format!("{index}:v")],
            fx.zoompan_filter(encoding.resolution),
            vec![label.clone()],
        ));
        segment_labels.push(label);
    }

    stages.push(FilterStage::new(
        segment_labels,
        format!("concat=n={}:v=1:a=0", images.len()),
        vec![VIDEO_OUT.to_string()],
    ));

    stages.push(FilterStage::new(
        vec![format!("{background_index}:a")],
        format!("volume={}", settings.bgm_volume),
        vec![BGM_LABEL.to_string()],
    ));

    stages.push(FilterStage::new(
        vec![format!("{narration_index}:a"), BGM_LABEL.to_string()],
        format!(
            "amix=inputs=2:duration=first:dropout_transition={}",
            settings.dropout_transition
        ),
        vec![AUDIO_OUT.to_string()],
    ));

    let graph = CompositionGraph {
        inputs: registry.into_inputs(),
        stages,
        video_out: VIDEO_OUT.to_string(),
        audio_out: AUDIO_OUT.to_string(),
    };

    graph.validate()?;
    Ok(graph)
}
