//! # Blackout
//!
//! A Rust pipeline that finds and redacts personally identifiable
//! information in document images.
//!
//! ## Features
//!
//! - Document normalization (denoise, deskew, adaptive binarization)
//! - Hybrid text extraction: a primary detection engine with a CLI fallback
//! - PII detection from regex patterns plus an ONNX named-entity model
//! - Entity-to-region resolution and opaque rectangle redaction
//! - Structured JSON output of every token and entity
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, and the capability provider
//! * [`domain`] - Tokens, entities, and the structured result
//! * [`engines`] - The real extraction and recognition engines
//! * [`pii`] - Pattern and statistical entity detection
//! * [`pipeline`] - Region resolution, redaction, and the run loop
//! * [`processors`] - Geometry, normalization, and text cleanup
//! * [`utils`] - Image loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blackout::core::{Capabilities, PipelineConfig};
//! use blackout::pipeline::{Pipeline, RunOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::from_model_dir("models");
//! let capabilities = Capabilities::global(&config.engines)?;
//! let pipeline = Pipeline::new(capabilities, &config);
//!
//! let options = RunOptions {
//!     redact: true,
//!     ..RunOptions::default()
//! };
//! let result = pipeline.run(Path::new("document.jpg"), &options)?;
//! println!("{} tokens, {} entities", result.tokens.len(), result.entities.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod engines;
pub mod pii;
pub mod pipeline;
pub mod processors;
pub mod utils;

pub use crate::core::PipelineError;
pub use crate::utils::init_tracing;
