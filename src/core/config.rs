//! Configuration for the redaction pipeline.
//!
//! All tunables live in plain structs with sensible defaults so a pipeline
//! can be built with `PipelineConfig::default()` and adjusted field by field.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for the image normalization stage.
///
/// The defaults reproduce the standard document-cleanup recipe: a 3x3 median
/// filter, a 15-pixel Gaussian threshold block with an offset of 11, and a
/// morphological opening that is disabled (radius 0) unless configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Radius of the median filter window. A radius of 1 gives the usual
    /// 3x3 neighborhood for salt-and-pepper suppression.
    pub median_radius: u32,
    /// Side length of the Gaussian-weighted neighborhood used by adaptive
    /// thresholding. Must be odd.
    pub threshold_block_size: u32,
    /// Constant subtracted from the weighted neighborhood mean before
    /// comparing against each pixel.
    pub threshold_offset: f32,
    /// Radius of the morphological opening applied to the binary output.
    /// Zero disables the opening entirely.
    pub opening_radius: u8,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            median_radius: 1,
            threshold_block_size: 15,
            threshold_offset: 11.0,
            opening_radius: 0,
        }
    }
}

/// Locations of the model artifacts backing the extraction and NER
/// capabilities.
///
/// Every path is validated when the corresponding engine is constructed; a
/// missing artifact surfaces as a configuration error at initialization,
/// never on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the text-detection model file for the primary OCR engine.
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file for the primary OCR engine.
    pub recognition_model_path: PathBuf,
    /// Command used to invoke the fallback block recognizer. `None` disables
    /// the fallback, in which case hybrid extraction returns the primary
    /// engine's output even when empty.
    pub fallback_command: Option<String>,
    /// Path to the NER token-classification model (ONNX).
    pub ner_model_path: PathBuf,
    /// Path to the tokenizer definition used by the NER model.
    pub ner_tokenizer_path: PathBuf,
    /// Path to the label inventory for the NER model, one tag per line in
    /// output-index order.
    pub ner_labels_path: PathBuf,
}

impl EngineConfig {
    /// Builds a config pointing at a single directory containing all model
    /// artifacts under their well-known names.
    pub fn from_model_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            detection_model_path: dir.join("text-detection.rten"),
            recognition_model_path: dir.join("text-recognition.rten"),
            fallback_command: Some("tesseract".to_string()),
            ner_model_path: dir.join("ner.onnx"),
            ner_tokenizer_path: dir.join("tokenizer.json"),
            ner_labels_path: dir.join("ner-labels.txt"),
        }
    }
}

/// Top-level configuration for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Normalization stage parameters.
    pub normalizer: NormalizerConfig,
    /// Capability model locations.
    pub engines: EngineConfig,
}

impl PipelineConfig {
    /// Builds a config with default normalization parameters and models
    /// resolved under `dir`.
    pub fn from_model_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            engines: EngineConfig::from_model_dir(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.median_radius, 1);
        assert_eq!(config.threshold_block_size, 15);
        assert_eq!(config.threshold_offset, 11.0);
        assert_eq!(config.opening_radius, 0);
    }

    #[test]
    fn engine_config_from_dir() {
        let config = EngineConfig::from_model_dir("/opt/models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/opt/models/text-detection.rten")
        );
        assert_eq!(
            config.ner_labels_path,
            PathBuf::from("/opt/models/ner-labels.txt")
        );
        assert_eq!(config.fallback_command.as_deref(), Some("tesseract"));
    }
}
