//! Image normalization for text detection.
//!
//! Produces a binarized, deskewed image optimized for OCR. The stages run in
//! a fixed order: grayscale conversion, median denoising, deskew, adaptive
//! Gaussian thresholding, and an optional morphological opening.

use crate::core::{NormalizerConfig, PipelineError};
use crate::processors::{BoundingBox, Point};
use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::{gaussian_blur_f32, median_filter};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;
use std::path::Path;
use tracing::debug;

/// The image normalizer.
///
/// Stateless apart from its configuration; one instance can serve any number
/// of runs.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Creates a normalizer with the given parameters.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Loads the image at `path`, normalizes it, and optionally persists the
    /// result at `save_path`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ImageLoad`] if the source image is missing
    /// or cannot be decoded, and [`PipelineError::ImageSave`] if persisting
    /// the normalized copy fails.
    pub fn normalize_file(
        &self,
        path: &Path,
        save_path: Option<&Path>,
    ) -> Result<GrayImage, PipelineError> {
        let image = crate::utils::load_image(path)?;
        let normalized = self.normalize(&image);
        if let Some(out) = save_path {
            normalized.save(out).map_err(PipelineError::ImageSave)?;
            debug!(path = %out.display(), "persisted normalized image");
        }
        Ok(normalized)
    }

    /// Runs the full normalization pipeline over an in-memory image.
    pub fn normalize(&self, image: &RgbImage) -> GrayImage {
        let gray = image::imageops::grayscale(image);
        let denoised = median_filter(&gray, self.config.median_radius, self.config.median_radius);
        let deskewed = self.deskew(&denoised);
        let binary = adaptive_threshold_gaussian(
            &deskewed,
            self.config.threshold_block_size,
            self.config.threshold_offset,
        );
        if self.config.opening_radius > 0 {
            open(&binary, Norm::LInf, self.config.opening_radius)
        } else {
            binary
        }
    }

    /// Estimates the skew angle from the minimum-area rectangle of all
    /// non-background pixels and rotates the image to correct it.
    ///
    /// An image with no non-background pixels is returned unchanged.
    fn deskew(&self, gray: &GrayImage) -> GrayImage {
        let coords: Vec<Point> = gray
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 255)
            .map(|(x, y, _)| Point::new(x as f32, y as f32))
            .collect();

        if coords.is_empty() {
            debug!("no non-background pixels, skipping deskew");
            return gray.clone();
        }

        let raw = BoundingBox::new(coords).min_area_rect().normalized_angle();
        let angle = if raw < -45.0 { -(90.0 + raw) } else { -raw };
        debug!(raw, angle, "estimated skew");

        if angle.abs() < f32::EPSILON {
            return gray.clone();
        }

        // Positive angle rotates counter-clockwise.
        rotate_replicated(gray, -angle.to_radians())
    }
}

/// Rotates about the image center, filling uncovered pixels by replicating
/// the nearest edge instead of a constant color.
///
/// The image is padded symmetrically with clamped edge pixels so the rotated
/// crop never samples outside real content, then rotated and cropped back to
/// its original size.
fn rotate_replicated(gray: &GrayImage, angle_rad: f32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }
    let (sin, cos) = (angle_rad.sin().abs(), angle_rad.cos().abs());
    let (w, h) = (width as f32, height as f32);
    // The extra margin keeps bicubic sampling inside the replicated band.
    let pad_x = ((w * cos + h * sin - w) / 2.0).ceil().max(0.0) as u32 + 2;
    let pad_y = ((w * sin + h * cos - h) / 2.0).ceil().max(0.0) as u32 + 2;

    let padded = GrayImage::from_fn(width + 2 * pad_x, height + 2 * pad_y, |x, y| {
        let sx = x.saturating_sub(pad_x).min(width - 1);
        let sy = y.saturating_sub(pad_y).min(height - 1);
        *gray.get_pixel(sx, sy)
    });

    // Padding is symmetric, so the padded center coincides with the
    // original center and the central crop is the rotated original.
    let rotated = rotate_about_center(&padded, angle_rad, Interpolation::Bicubic, Luma([255u8]));
    image::imageops::crop_imm(&rotated, pad_x, pad_y, width, height).to_image()
}

/// Binarizes a grayscale image against a Gaussian-weighted local mean.
///
/// A pixel becomes foreground (255) when it exceeds the blurred neighborhood
/// value minus `offset`, and background (0) otherwise. `block_size` maps to
/// the blur sigma with the usual `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule.
fn adaptive_threshold_gaussian(gray: &GrayImage, block_size: u32, offset: f32) -> GrayImage {
    let sigma = 0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let weighted = gaussian_blur_f32(gray, sigma);

    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let threshold = weighted.get_pixel(x, y).0[0] as f32 - offset;
        let value = if pixel.0[0] as f32 > threshold { 255 } else { 0 };
        out.put_pixel(x, y, Luma([value]));
    }
    out
}
