//! The end-to-end run: normalize, extract, detect, resolve, redact.

use crate::core::{Capabilities, PipelineConfig, PipelineError};
use crate::domain::PipelineResult;
use crate::engines::hybrid_extract;
use crate::pii;
use crate::pipeline::{redact, resolve};
use crate::processors::{clean, Normalizer, RegionShape};
use crate::utils::load_image;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-run output options.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where the structured JSON result is written. Always produced.
    pub out_json: PathBuf,
    /// Whether to produce a redacted copy of the original image.
    pub redact: bool,
    /// Where the redacted image is written when redaction is requested.
    pub redact_out: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out_json: PathBuf::from("output.json"),
            redact: false,
            redact_out: PathBuf::from("redacted.jpg"),
        }
    }
}

/// The pipeline orchestrator.
///
/// Owns no engine state of its own; everything heavyweight lives behind the
/// injected [`Capabilities`] handles, so one orchestrator serves any number
/// of runs.
pub struct Pipeline {
    capabilities: Capabilities,
    normalizer: Normalizer,
}

impl Pipeline {
    /// Creates an orchestrator over the given capability handles.
    pub fn new(capabilities: Capabilities, config: &PipelineConfig) -> Self {
        Self {
            capabilities,
            normalizer: Normalizer::new(config.normalizer.clone()),
        }
    }

    /// Processes one image end to end.
    ///
    /// The stages run in a fixed order: normalization (the normalized copy
    /// is persisted next to the original), hybrid text extraction over the
    /// original image with one retry over the normalized copy when the
    /// original yields nothing, text assembly and cleaning, entity
    /// detection, region resolution, and finally the JSON result. Redaction
    /// runs only when requested and at least one region resolved, and always
    /// paints over the original image, never the normalized copy.
    ///
    /// The first failing stage aborts the run; nothing downstream of it is
    /// written.
    pub fn run(
        &self,
        image_path: &Path,
        options: &RunOptions,
    ) -> Result<PipelineResult, PipelineError> {
        info!(image = %image_path.display(), "starting pipeline run");
        let proc_path = normalized_copy_path(image_path);
        let normalized = self
            .normalizer
            .normalize_file(image_path, Some(&proc_path))?;

        let original = load_image(image_path)?;
        let mut tokens = hybrid_extract(&self.capabilities, &original)?;
        if tokens.is_empty() {
            info!("no text on the original image, retrying on the normalized copy");
            let normalized_rgb = DynamicImage::ImageLuma8(normalized).to_rgb8();
            tokens = hybrid_extract(&self.capabilities, &normalized_rgb)?;
        }
        info!(tokens = tokens.len(), "text extraction complete");

        let full_text = tokens
            .iter()
            .map(|token| clean(&token.text))
            .collect::<Vec<_>>()
            .join(" ");

        let entities = pii::detect(&full_text, self.capabilities.ner.as_ref())?;
        let regions = resolve(&tokens, &entities);

        let result = PipelineResult::new(tokens, entities);
        result.save_json(&options.out_json)?;
        info!(path = %options.out_json.display(), "wrote structured result");

        if options.redact && !regions.is_empty() {
            let shapes: Vec<RegionShape> =
                regions.into_iter().map(RegionShape::Quad).collect();
            redact(image_path, &shapes, &options.redact_out)?;
        }

        Ok(result)
    }
}

/// Path of the persisted normalized copy, derived from the input path.
fn normalized_copy_path(image_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.proc.png", image_path.display()))
}
