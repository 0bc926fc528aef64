#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for slideshow video assembly.
//!
//! This crate provides:
//! - Per-segment display timing derived from measured audio duration
//! - Continuous zoom (Ken Burns) effect parameterization
//! - Typed composition graph construction with positional input indexing
//! - A render driver that executes FFmpeg and maps failures into
//!   structured errors
//! - Concat-demuxer fast paths and stream-copy trimming

pub mod assemble;
pub mod command;
pub mod effect;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod probe;
pub mod render;
pub mod timing;

pub use assemble::{
    assemble_shorts, assemble_slideshow, assemble_slideshow_fast, collect_images, trim_copy,
};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegInput, FfmpegRunner};
pub use effect::{effect_for, EffectParameters};
pub use error::{MediaError, MediaResult};
pub use graph::{build_graph, CompositionGraph, FilterStage, GraphSettings, InputRegistry};
pub use manifest::ConcatManifest;
pub use probe::{get_duration, probe_media, MediaInfo};
pub use render::{render, RenderJob, RenderResult};
pub use timing::{allocate, Segment, TimingPlan, TimingPolicy};
