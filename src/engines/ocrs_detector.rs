//! Primary text-detection capability backed by the `ocrs` engine.
//!
//! `ocrs` is a pure-Rust OCR engine running neural models through `rten`.
//! The adapter loads the detection and recognition models once at
//! construction (the expensive step) and then serves any number of images:
//! detect word boxes, group them into lines, recognize each line.

use crate::core::{PipelineError, TextDetector};
use crate::domain::Token;
use crate::processors::{BoundingBox, Point};
use image::RgbImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use std::path::Path;
use tracing::{debug, info};

/// Text detector backed by the `ocrs` engine.
pub struct OcrsDetector {
    engine: OcrEngine,
}

impl OcrsDetector {
    /// Loads the detection and recognition models and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ConfigError`] if either model file is
    /// missing or cannot be loaded. This is raised here, at initialization,
    /// never on first use.
    pub fn new(detection_model: &Path, recognition_model: &Path) -> Result<Self, PipelineError> {
        for (role, path) in [
            ("detection", detection_model),
            ("recognition", recognition_model),
        ] {
            if !path.exists() {
                return Err(PipelineError::config(format!(
                    "{role} model not found at {}",
                    path.display()
                )));
            }
        }

        info!(path = %detection_model.display(), "loading text-detection model");
        let detection = Model::load_file(detection_model).map_err(|err| {
            PipelineError::config(format!(
                "failed to load detection model from {}: {err}",
                detection_model.display()
            ))
        })?;

        info!(path = %recognition_model.display(), "loading text-recognition model");
        let recognition = Model::load_file(recognition_model).map_err(|err| {
            PipelineError::config(format!(
                "failed to load recognition model from {}: {err}",
                recognition_model.display()
            ))
        })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection),
            recognition_model: Some(recognition),
            ..Default::default()
        })
        .map_err(|err| PipelineError::config(format!("failed to build OCR engine: {err}")))?;

        Ok(Self { engine })
    }
}

impl TextDetector for OcrsDetector {
    fn detect_text(&self, image: &RgbImage) -> Result<Vec<Token>, PipelineError> {
        let (width, height) = image.dimensions();
        let source = ImageSource::from_bytes(image.as_raw(), (width, height)).map_err(|err| {
            PipelineError::inference_msg(format!(
                "failed to build image source ({width}x{height}): {err}"
            ))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| PipelineError::inference_msg(format!("OCR preprocessing: {err}")))?;

        let words = self
            .engine
            .detect_words(&input)
            .map_err(|err| PipelineError::inference_msg(format!("word detection: {err}")))?;
        let lines = self.engine.find_text_lines(&input, &words);
        let recognized = self
            .engine
            .recognize_text(&input, &lines)
            .map_err(|err| PipelineError::inference_msg(format!("line recognition: {err}")))?;

        let mut tokens = Vec::new();
        for line in recognized.iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }
            let corners = line.rotated_rect().corners();
            let bbox = BoundingBox::new(
                corners.iter().map(|c| Point::new(c.x, c.y)).collect(),
            );
            // ocrs does not expose a per-line confidence.
            tokens.push(Token::new(bbox, text, None));
        }

        debug!(tokens = tokens.len(), "primary extraction complete");
        Ok(tokens)
    }
}
