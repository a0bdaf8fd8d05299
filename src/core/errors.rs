//! Error types for the redaction pipeline.
//!
//! This module defines the error enum shared by every pipeline stage, from
//! image loading through entity detection to redaction, together with utility
//! constructors for wrapping capability failures with context.

use thiserror::Error;

/// Errors raised by the redaction pipeline.
///
/// A run aborts on the first error; no partial JSON result or redacted
/// artifact is written once a stage has failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The source image is missing or could not be decoded.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// A produced image could not be encoded or written.
    #[error("image save")]
    ImageSave(#[source] image::ImageError),

    /// A required capability (OCR engine or NER model) could not be
    /// initialized. Raised at construction time, never on first use.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration problem.
        message: String,
    },

    /// A region handed to the redactor matched no known bounding-box shape.
    ///
    /// This aborts the whole redaction invocation; no partial artifact is
    /// produced.
    #[error("unsupported region shape: {detail}")]
    UnsupportedRegion {
        /// What made the region shape unusable.
        detail: String,
    },

    /// Error returned by an extraction or recognition capability.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error serializing the structured result.
    #[error("result serialization")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Creates a configuration error with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Wraps a capability failure as an inference error.
    pub fn inference(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates an inference error from a plain message.
    ///
    /// Some capability crates report failures as strings rather than error
    /// types; this keeps those on the same propagation path.
    pub fn inference_msg(message: impl Into<String>) -> Self {
        Self::Inference(Box::new(SimpleError::new(message)))
    }
}

/// A minimal string-backed error for wrapping message-only failures.
#[derive(Debug)]
pub(crate) struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message() {
        let err = PipelineError::config("ner model missing");
        assert_eq!(err.to_string(), "configuration: ner model missing");
    }

    #[test]
    fn inference_msg_preserves_the_message() {
        let err = PipelineError::inference_msg("OCR preprocessing: bad stride");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "OCR preprocessing: bad stride");
    }

    #[test]
    fn unsupported_region_message() {
        let err = PipelineError::UnsupportedRegion {
            detail: "polygon with 3 points".to_string(),
        };
        assert!(err.to_string().contains("unsupported region shape"));
    }
}
