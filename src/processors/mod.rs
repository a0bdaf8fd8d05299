//! Deterministic processing stages of the pipeline.
//!
//! # Modules
//!
//! * `geometry` - Points, bounding boxes, min-area rectangles, region shapes
//! * `normalize` - Image normalization for text detection
//! * `text_clean` - Cleanup of raw recognized token text

mod geometry;
mod normalize;
mod text_clean;

pub use geometry::{BoundingBox, MinAreaRect, Point, Rect, RegionShape};
pub use normalize::Normalizer;
pub use text_clean::clean;
