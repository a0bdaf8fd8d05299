//! Fallback block recognizer backed by the `tesseract` command-line tool.
//!
//! The fallback treats the whole image as one uniform text block
//! (page-segmentation mode 6) and asks for TSV output, which carries
//! word-level boxes and confidences in `[0, 100]`. Rows with empty
//! recognized text are discarded before they reach the caller.

use crate::core::{BlockRecognizer, PipelineError};
use crate::domain::Token;
use crate::processors::BoundingBox;
use image::RgbImage;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// TSV column layout emitted by `tesseract ... tsv`.
const TSV_COLUMNS: usize = 12;
/// The TSV level value that marks a word row.
const WORD_LEVEL: &str = "5";

/// Block recognizer that shells out to a `tesseract` binary.
#[derive(Debug)]
pub struct TesseractFallback {
    command: String,
}

impl TesseractFallback {
    /// Verifies the binary is invocable and builds the recognizer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ConfigError`] when the command cannot be
    /// executed, so a misconfigured deployment fails at initialization
    /// rather than on the first image that needs the fallback.
    pub fn new(command: &str) -> Result<Self, PipelineError> {
        let probe = Command::new(command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match probe {
            Ok(status) if status.success() => Ok(Self {
                command: command.to_string(),
            }),
            Ok(status) => Err(PipelineError::config(format!(
                "fallback OCR command `{command}` exited with {status}"
            ))),
            Err(err) => Err(PipelineError::config(format!(
                "fallback OCR command `{command}` is not available: {err}"
            ))),
        }
    }

    fn run_tsv(&self, image_path: &Path) -> Result<String, PipelineError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["--psm", "6", "tsv"])
            .output()?;
        if !output.status.success() {
            return Err(PipelineError::inference_msg(format!(
                "fallback OCR failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Parses word rows out of tesseract's TSV output.
    ///
    /// Rows whose text is empty after trimming are dropped. A negative
    /// confidence sentinel maps to `None`.
    fn parse_tsv(tsv: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for line in tsv.lines().skip(1) {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < TSV_COLUMNS || fields[0] != WORD_LEVEL {
                continue;
            }
            let text = fields[11].trim();
            if text.is_empty() {
                continue;
            }
            let (Ok(x), Ok(y), Ok(w), Ok(h)) = (
                fields[6].parse::<f32>(),
                fields[7].parse::<f32>(),
                fields[8].parse::<f32>(),
                fields[9].parse::<f32>(),
            ) else {
                continue;
            };
            let conf = match fields[10].parse::<f32>() {
                Ok(c) if c >= 0.0 => Some(c),
                _ => None,
            };
            tokens.push(Token::new(
                BoundingBox::from_coords(x, y, x + w, y + h),
                text,
                conf,
            ));
        }
        tokens
    }
}

impl BlockRecognizer for TesseractFallback {
    fn recognize_block(&self, image: &RgbImage) -> Result<Vec<Token>, PipelineError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("block.png");
        image.save(&path).map_err(PipelineError::ImageSave)?;

        let tsv = self.run_tsv(&path)?;
        let tokens = Self::parse_tsv(&tsv);
        debug!(tokens = tokens.len(), "fallback extraction complete");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn parses_word_rows() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t100\t50\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t20\t30\t12\t91.5\tHello\n\
             5\t1\t1\t1\t1\t2\t45\t20\t28\t12\t88.0\tworld"
        );
        let tokens = TesseractFallback::parse_tsv(&tsv);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Hello");
        assert_eq!(tokens[0].conf, Some(91.5));
        let rect = tokens[0].bbox.to_rect();
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (10, 20, 40, 32));
    }

    #[test]
    fn drops_empty_text_rows() {
        let tsv = format!(
            "{HEADER}\n\
             5\t1\t1\t1\t1\t1\t10\t20\t30\t12\t95\t \n\
             5\t1\t1\t1\t1\t2\t45\t20\t28\t12\t-1\tword"
        );
        let tokens = TesseractFallback::parse_tsv(&tsv);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "word");
        assert_eq!(tokens[0].conf, None);
    }

    #[test]
    fn ignores_non_word_levels() {
        let tsv = format!(
            "{HEADER}\n\
             4\t1\t1\t1\t1\t0\t0\t0\t100\t12\t-1\tline-text"
        );
        assert!(TesseractFallback::parse_tsv(&tsv).is_empty());
    }

    #[test]
    fn missing_binary_is_a_config_error() {
        let err = TesseractFallback::new("definitely-not-a-real-ocr-binary").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigError { .. }));
    }
}
