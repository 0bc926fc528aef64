//! Slideshow assembly orchestration.
//!
//! This crate provides:
//! - Environment-driven configuration for assembly runs
//! - Structured run logging
//! - The end-to-end run: collect assets, measure narration, build the
//!   composition graph, and drive the renderer

pub mod config;
pub mod error;
pub mod logging;
pub mod run;

pub use config::{AssemblerConfig, AssemblyMode};
pub use error::{AssemblerError, AssemblerResult};
pub use logging::RunLogger;
pub use run::run;
