//! Pipeline orchestration: region resolution, redaction, and the run loop.
//!
//! # Modules
//!
//! * `resolver` - Maps detected entities back to token bounding boxes
//! * `redactor` - Paints opaque rectangles over resolved regions
//! * `orchestrator` - Drives one image through every stage

mod orchestrator;
mod redactor;
mod resolver;

pub use orchestrator::{Pipeline, RunOptions};
pub use redactor::{normalize_region, redact, REDACTION_COLOR};
pub use resolver::resolve;
