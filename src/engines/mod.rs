//! Capability adapters: the real extraction and recognition engines.
//!
//! # Modules
//!
//! * `ocrs_detector` - Primary text detection via the `ocrs` engine
//! * `tesseract_fallback` - Block recognition via the `tesseract` CLI
//! * `hybrid` - Primary-then-fallback extraction policy
//! * `ner` - Named-entity recognition via an ONNX token classifier

mod hybrid;
mod ner;
mod ocrs_detector;
mod tesseract_fallback;

pub use hybrid::hybrid_extract;
pub use ner::NerRecognizer;
pub use ocrs_detector::OcrsDetector;
pub use tesseract_fallback::TesseractFallback;
