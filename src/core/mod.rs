//! Core building blocks of the redaction pipeline.
//!
//! This module contains:
//! - Error handling shared by every stage
//! - Configuration structs with defaults
//! - Capability traits and the process-wide capability provider
//!
//! It also re-exports the commonly used types for convenience.

pub mod capabilities;
pub mod config;
pub mod errors;

pub use capabilities::{
    BlockRecognizer, Capabilities, EntityRecognizer, NerSpan, TextDetector,
};
pub use config::{EngineConfig, NormalizerConfig, PipelineConfig};
pub use errors::PipelineError;
