//! The canonical structured result of one pipeline run.

use crate::core::PipelineError;
use crate::domain::{Entity, Token};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Everything one pipeline run produced: the positioned tokens and the
/// classified sensitive spans.
///
/// Serialized as `{"ocr": [...], "pii": [...]}`. Tokens keep the engine's
/// emission order; entities are sorted ascending by span start. A result is
/// built fresh per run and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Extracted tokens in engine emission order.
    #[serde(rename = "ocr")]
    pub tokens: Vec<Token>,
    /// Detected entities sorted by span start.
    #[serde(rename = "pii")]
    pub entities: Vec<Entity>,
}

impl PipelineResult {
    /// Creates a result from its two parts.
    pub fn new(tokens: Vec<Token>, entities: Vec<Entity>) -> Self {
        Self { tokens, entities }
    }

    /// Returns true if the run produced neither tokens nor entities.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.entities.is_empty()
    }

    /// Writes the result as pretty-printed JSON at `path`.
    pub fn save_json(&self, path: &Path) -> Result<(), PipelineError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKind;
    use crate::processors::BoundingBox;

    #[test]
    fn result_wire_keys() {
        let result = PipelineResult::new(
            vec![Token::new(
                BoundingBox::from_coords(0.0, 0.0, 4.0, 2.0),
                "hi",
                Some(0.5),
            )],
            vec![Entity::new(EntityKind::Date, "01/02/2023", (0, 10))],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("ocr").is_some());
        assert!(json.get("pii").is_some());
        assert_eq!(json["ocr"].as_array().unwrap().len(), 1);
        assert_eq!(json["pii"][0]["type"], "DATE");
    }

    #[test]
    fn empty_result() {
        let result = PipelineResult::default();
        assert!(result.is_empty());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ocr"].as_array().unwrap().len(), 0);
        assert_eq!(json["pii"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn save_json_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        PipelineResult::default().save_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: PipelineResult = serde_json::from_str(&text).unwrap();
        assert!(back.is_empty());
    }
}
