//! Capability traits and the process-wide capability provider.
//!
//! The pipeline treats text detection and named-entity recognition as
//! external capabilities behind trait objects. The real engines are expensive
//! to construct (model weights are loaded from disk), so they are built once
//! per process inside a [`Capabilities`] provider and injected into the
//! orchestrator. Tests substitute deterministic fakes through the same
//! traits.
//!
//! All handles are read-only after construction and safe to share across
//! threads when a surrounding service dispatches independent runs
//! concurrently.

use crate::core::{EngineConfig, PipelineError};
use crate::domain::Token;
use image::RgbImage;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

/// A raw span produced by a named-entity-recognition capability.
///
/// The label is the model's own tag vocabulary; the allow-list that decides
/// which labels count as sensitive is applied by the entity detector, not by
/// the capability.
#[derive(Debug, Clone, PartialEq)]
pub struct NerSpan {
    /// The predicted category label, e.g. `PERSON`.
    pub label: String,
    /// The matched text, sliced from the input.
    pub text: String,
    /// Byte offsets of the match in the input text.
    pub span: (usize, usize),
}

/// Primary text-detection capability.
///
/// Implementations return positioned tokens with 4-point polygon bounding
/// boxes and confidence in `[0, 1]` when the engine reports one.
pub trait TextDetector: Send + Sync {
    /// Detects and recognizes text regions in the image.
    fn detect_text(&self, image: &RgbImage) -> Result<Vec<Token>, PipelineError>;
}

/// Fallback text-recognition capability.
///
/// Implementations treat the whole image as one uniform text block and
/// return word-level tokens with axis-aligned boxes and confidence in
/// `[0, 100]`. Entries with empty recognized text are discarded before they
/// reach the caller.
pub trait BlockRecognizer: Send + Sync {
    /// Recognizes text in the image as a single uniform block.
    fn recognize_block(&self, image: &RgbImage) -> Result<Vec<Token>, PipelineError>;
}

/// Named-entity-recognition capability.
pub trait EntityRecognizer: Send + Sync {
    /// Predicts entity spans over the given text.
    fn recognize_entities(&self, text: &str) -> Result<Vec<NerSpan>, PipelineError>;
}

/// The set of capability handles one pipeline run depends on.
///
/// Constructed once, never mutated afterwards. Cloning is cheap (`Arc`
/// handles).
#[derive(Clone)]
pub struct Capabilities {
    /// Primary text detector.
    pub detector: Arc<dyn TextDetector>,
    /// Fallback block recognizer, if one is configured.
    pub fallback: Option<Arc<dyn BlockRecognizer>>,
    /// Named-entity recognizer.
    pub ner: Arc<dyn EntityRecognizer>,
}

static INSTANCE: OnceCell<Capabilities> = OnceCell::new();

impl Capabilities {
    /// Builds a provider from explicit handles.
    ///
    /// This is the injection seam used by tests and by callers that manage
    /// engine lifetimes themselves.
    pub fn new(
        detector: Arc<dyn TextDetector>,
        fallback: Option<Arc<dyn BlockRecognizer>>,
        ner: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self {
            detector,
            fallback,
            ner,
        }
    }

    /// Constructs the real engines from the given configuration.
    ///
    /// Model loading happens here, eagerly. A missing or unreadable artifact
    /// surfaces as [`PipelineError::ConfigError`] from this call rather than
    /// from the first run that needs the engine.
    pub fn initialize(config: &EngineConfig) -> Result<Self, PipelineError> {
        use crate::engines::{NerRecognizer, OcrsDetector, TesseractFallback};

        info!("initializing capability engines");
        let detector: Arc<dyn TextDetector> = Arc::new(OcrsDetector::new(
            &config.detection_model_path,
            &config.recognition_model_path,
        )?);

        let fallback: Option<Arc<dyn BlockRecognizer>> = match &config.fallback_command {
            Some(cmd) => Some(Arc::new(TesseractFallback::new(cmd)?)),
            None => None,
        };

        let ner: Arc<dyn EntityRecognizer> = Arc::new(NerRecognizer::new(
            &config.ner_model_path,
            &config.ner_tokenizer_path,
            &config.ner_labels_path,
        )?);

        info!("capability engines ready");
        Ok(Self::new(detector, fallback, ner))
    }

    /// Returns the process-wide provider, constructing it on first call.
    ///
    /// Later calls ignore `config` and return the already-built handles.
    pub fn global(config: &EngineConfig) -> Result<Capabilities, PipelineError> {
        INSTANCE
            .get_or_try_init(|| Self::initialize(config))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Token;
    use crate::processors::BoundingBox;

    struct NullDetector;

    impl TextDetector for NullDetector {
        fn detect_text(&self, _image: &RgbImage) -> Result<Vec<Token>, PipelineError> {
            Ok(Vec::new())
        }
    }

    struct NullNer;

    impl EntityRecognizer for NullNer {
        fn recognize_entities(&self, _text: &str) -> Result<Vec<NerSpan>, PipelineError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn capabilities_are_injectable() {
        let caps = Capabilities::new(Arc::new(NullDetector), None, Arc::new(NullNer));
        let image = RgbImage::new(4, 4);
        let tokens = caps.detector.detect_text(&image).unwrap();
        assert!(tokens.is_empty());
        assert!(caps.fallback.is_none());
        let _ = BoundingBox::from_coords(0.0, 0.0, 1.0, 1.0);
    }
}
