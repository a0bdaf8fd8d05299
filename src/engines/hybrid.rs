//! Hybrid text extraction: primary engine first, fallback on empty.

use crate::core::{Capabilities, PipelineError};
use crate::domain::Token;
use image::RgbImage;
use tracing::{debug, info, warn};

/// Runs the primary detector and, only if it returns zero tokens, the
/// fallback recognizer.
///
/// The primary engine's output is returned verbatim whenever it is
/// non-empty; the two outputs are never merged. With no fallback configured,
/// an empty primary result is returned as-is — a valid outcome, not an
/// error.
pub fn hybrid_extract(
    capabilities: &Capabilities,
    image: &RgbImage,
) -> Result<Vec<Token>, PipelineError> {
    let primary = capabilities.detector.detect_text(image)?;
    if !primary.is_empty() {
        debug!(tokens = primary.len(), "primary engine produced tokens");
        return Ok(primary);
    }

    match &capabilities.fallback {
        Some(fallback) => {
            info!("primary engine found no text, trying block recognizer");
            fallback.recognize_block(image)
        }
        None => {
            warn!("primary engine found no text and no fallback is configured");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockRecognizer, EntityRecognizer, NerSpan, TextDetector};
    use crate::processors::BoundingBox;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedDetector(Vec<Token>);

    impl TextDetector for FixedDetector {
        fn detect_text(&self, _image: &RgbImage) -> Result<Vec<Token>, PipelineError> {
            Ok(self.0.clone())
        }
    }

    struct CountingFallback {
        calls: Arc<AtomicUsize>,
        tokens: Vec<Token>,
    }

    impl BlockRecognizer for CountingFallback {
        fn recognize_block(&self, _image: &RgbImage) -> Result<Vec<Token>, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tokens.clone())
        }
    }

    struct NullNer;

    impl EntityRecognizer for NullNer {
        fn recognize_entities(&self, _text: &str) -> Result<Vec<NerSpan>, PipelineError> {
            Ok(Vec::new())
        }
    }

    fn token(text: &str) -> Token {
        Token::new(BoundingBox::from_coords(0.0, 0.0, 10.0, 5.0), text, Some(0.8))
    }

    #[test]
    fn primary_output_wins_and_fallback_never_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let caps = Capabilities::new(
            Arc::new(FixedDetector(vec![token("hello")])),
            Some(Arc::new(CountingFallback {
                calls: calls.clone(),
                tokens: vec![token("ignored")],
            })),
            Arc::new(NullNer),
        );

        let tokens = hybrid_extract(&caps, &RgbImage::new(8, 8)).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fallback_runs_when_primary_is_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let caps = Capabilities::new(
            Arc::new(FixedDetector(Vec::new())),
            Some(Arc::new(CountingFallback {
                calls: calls.clone(),
                tokens: vec![token("rescued")],
            })),
            Arc::new(NullNer),
        );

        let tokens = hybrid_extract(&caps, &RgbImage::new(8, 8)).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "rescued");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_fallback_output_is_valid() {
        let caps = Capabilities::new(
            Arc::new(FixedDetector(Vec::new())),
            Some(Arc::new(CountingFallback {
                calls: Arc::new(AtomicUsize::new(0)),
                tokens: Vec::new(),
            })),
            Arc::new(NullNer),
        );
        assert!(hybrid_extract(&caps, &RgbImage::new(8, 8)).unwrap().is_empty());
    }

    #[test]
    fn no_fallback_returns_empty() {
        let caps = Capabilities::new(Arc::new(FixedDetector(Vec::new())), None, Arc::new(NullNer));
        assert!(hybrid_extract(&caps, &RgbImage::new(8, 8)).unwrap().is_empty());
    }
}
