//! Painting opaque rectangles over resolved regions.

use crate::core::PipelineError;
use crate::processors::{Rect, RegionShape};
use crate::utils::load_image;
use image::Rgb;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;
use std::path::{Path, PathBuf};
use tracing::info;

/// The fill color painted over every redacted region.
pub const REDACTION_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Reduces a region to an axis-aligned rectangle.
///
/// A quad must carry exactly four points; anything else is rejected before
/// any painting happens, so a bad region never yields a partial artifact.
pub fn normalize_region(region: &RegionShape) -> Result<Rect, PipelineError> {
    match region {
        RegionShape::Quad(bbox) if bbox.points.len() == 4 => Ok(bbox.to_rect()),
        RegionShape::Quad(bbox) => Err(PipelineError::UnsupportedRegion {
            detail: format!("polygon with {} points", bbox.points.len()),
        }),
        RegionShape::Xywh { x, y, w, h } => Ok(Rect {
            x1: *x as i32,
            y1: *y as i32,
            x2: (x + w) as i32,
            y2: (y + h) as i32,
        }),
    }
}

/// Loads the image at `image_path`, paints every region with
/// [`REDACTION_COLOR`], and writes the result to `output_path`.
///
/// All regions are normalized up front; a single unsupported region aborts
/// the whole invocation with nothing written. Pixels outside the painted
/// rectangles are copied through untouched.
pub fn redact(
    image_path: &Path,
    regions: &[RegionShape],
    output_path: &Path,
) -> Result<PathBuf, PipelineError> {
    let rects = regions
        .iter()
        .map(normalize_region)
        .collect::<Result<Vec<_>, _>>()?;

    let mut image = load_image(image_path)?;
    for rect in rects {
        if rect.width() <= 0 || rect.height() <= 0 {
            continue;
        }
        draw_filled_rect_mut(
            &mut image,
            PixelRect::at(rect.x1, rect.y1).of_size(rect.width() as u32, rect.height() as u32),
            REDACTION_COLOR,
        );
    }
    image.save(output_path).map_err(PipelineError::ImageSave)?;
    info!(regions = regions.len(), path = %output_path.display(), "wrote redacted image");
    Ok(output_path.to_path_buf())
}
