//! Shared data models for the slidecast assembly engine.
//!
//! This crate holds the plain data types passed between the media engine
//! and the assembler binary: media assets, target resolutions, and the
//! FFmpeg encoding configuration with its named presets.

pub mod asset;
pub mod encoding;

pub use asset::{AudioTrack, ImageAsset};
pub use encoding::{EncodingConfig, Resolution};
