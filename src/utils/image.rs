//! Image loading helpers shared by the pipeline stages.

use crate::core::PipelineError;
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Converts a DynamicImage to a GrayImage.
pub fn dynamic_to_gray(img: DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns [`PipelineError::ImageLoad`] if the file is missing or cannot be
/// decoded.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbImage, PipelineError> {
    let img = image::open(path.as_ref()).map_err(PipelineError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Loads an image as 8-bit grayscale.
///
/// # Errors
///
/// Returns [`PipelineError::ImageLoad`] if the file is missing or cannot be
/// decoded.
pub fn load_gray_image(path: impl AsRef<Path>) -> Result<GrayImage, PipelineError> {
    let img = image::open(path.as_ref()).map_err(PipelineError::ImageLoad)?;
    Ok(dynamic_to_gray(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_image_reports_missing_file() {
        let err = load_image("/nonexistent/input.png").unwrap_err();
        assert!(matches!(err, PipelineError::ImageLoad(_)));
    }

    #[test]
    fn load_image_round_trips_rgb_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("px.png");
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(1, 1, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.get_pixel(1, 1), &image::Rgb([10, 20, 30]));
    }
}
