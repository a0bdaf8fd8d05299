//! Domain types of the redaction pipeline.
//!
//! Tokens are positioned text units from the extraction engines, entities
//! are classified sensitive spans of the joined text, and the pipeline
//! result bundles both into the canonical serializable output of one run.

mod entity;
mod result;
mod token;

pub use entity::{Entity, EntityKind};
pub use result::PipelineResult;
pub use token::Token;
