//! Named-entity recognition backed by an ONNX token-classification model.
//!
//! The recognizer encodes text with a `tokenizers` tokenizer, runs the
//! model through ONNX Runtime, takes the argmax tag per token, and merges
//! contiguous B-/I- tags into entity spans. The label inventory is read
//! from a plain text file beside the model, one tag per output index.
//!
//! The recognizer reports every predicted span with the model's own label;
//! deciding which labels count as sensitive is the entity detector's job.

use crate::core::{EntityRecognizer, NerSpan, PipelineError};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// Standard BERT-family sequence limit.
const MAX_SEQUENCE_LEN: usize = 512;

/// ONNX-backed named-entity recognizer.
#[derive(Debug)]
pub struct NerRecognizer {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    needs_token_type_ids: bool,
    output_name: String,
}

impl NerRecognizer {
    /// Loads the model, tokenizer and label inventory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ConfigError`] if any of the three artifacts
    /// is missing or unreadable. Raised at initialization, never deferred
    /// to the first text that needs recognition.
    pub fn new(
        model_path: &Path,
        tokenizer_path: &Path,
        labels_path: &Path,
    ) -> Result<Self, PipelineError> {
        for (role, path) in [
            ("NER model", model_path),
            ("NER tokenizer", tokenizer_path),
            ("NER labels", labels_path),
        ] {
            if !path.exists() {
                return Err(PipelineError::config(format!(
                    "{role} not found at {}",
                    path.display()
                )));
            }
        }

        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|err| {
            PipelineError::config(format!(
                "failed to load tokenizer from {}: {err}",
                tokenizer_path.display()
            ))
        })?;

        let labels: Vec<String> = std::fs::read_to_string(labels_path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if labels.is_empty() {
            return Err(PipelineError::config(format!(
                "label file {} is empty",
                labels_path.display()
            )));
        }

        info!(path = %model_path.display(), "loading NER model");
        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(model_path))
            .map_err(|err| {
                PipelineError::config(format!(
                    "failed to load NER model from {}: {err}",
                    model_path.display()
                ))
            })?;

        let needs_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");
        let output_name = session
            .outputs()
            .first()
            .map(|output| output.name().to_string())
            .ok_or_else(|| PipelineError::config("NER model has no outputs".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
            needs_token_type_ids,
            output_name,
        })
    }
}

impl EntityRecognizer for NerRecognizer {
    fn recognize_entities(&self, text: &str) -> Result<Vec<NerSpan>, PipelineError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|err| PipelineError::inference_msg(format!("tokenization: {err}")))?;

        let len = encoding.get_ids().len().min(MAX_SEQUENCE_LEN);
        let ids: Vec<i64> = encoding.get_ids()[..len].iter().map(|&v| v as i64).collect();
        let mask: Vec<i64> = encoding.get_attention_mask()[..len]
            .iter()
            .map(|&v| v as i64)
            .collect();
        let offsets = &encoding.get_offsets()[..len];

        let ids_arr = Array2::from_shape_vec((1, len), ids)
            .map_err(|err| PipelineError::inference_msg(format!("input shape: {err}")))?;
        let mask_arr = Array2::from_shape_vec((1, len), mask)
            .map_err(|err| PipelineError::inference_msg(format!("input shape: {err}")))?;
        let type_arr = Array2::<i64>::zeros((1, len));

        let mut session = self
            .session
            .lock()
            .map_err(|_| PipelineError::inference_msg("NER session lock poisoned"))?;

        let ids_tensor = TensorRef::from_array_view(ids_arr.view())?;
        let mask_tensor = TensorRef::from_array_view(mask_arr.view())?;
        let outputs = if self.needs_token_type_ids {
            let type_tensor = TensorRef::from_array_view(type_arr.view())?;
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])?
        } else {
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])?
        };

        let (shape, logits) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        if shape.len() != 3 {
            return Err(PipelineError::inference_msg(format!(
                "unexpected NER output rank {} (want 3)",
                shape.len()
            )));
        }
        let seq_len = (shape[1] as usize).min(len);
        let num_labels = shape[2] as usize;

        // Argmax tag per token.
        let mut tags: Vec<&str> = Vec::with_capacity(seq_len);
        for i in 0..seq_len {
            let row = &logits[i * num_labels..(i + 1) * num_labels];
            let best = row
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            tags.push(self.labels.get(best).map(String::as_str).unwrap_or("O"));
        }

        let merged = merge_bio_spans(&tags, &offsets[..seq_len]);
        debug!(spans = merged.len(), "NER prediction complete");

        Ok(spans_from_merged(text, merged))
    }
}

/// Converts merged `(label, start, end)` triples into spans over `text`.
///
/// The offsets come from the tokenizer encoding and are byte offsets into
/// the input, so they slice the text directly. A span that does not land on
/// character boundaries is dropped rather than allowed to panic.
fn spans_from_merged(text: &str, merged: Vec<(String, usize, usize)>) -> Vec<NerSpan> {
    let mut spans = Vec::with_capacity(merged.len());
    for (label, start, end) in merged {
        let Some(slice) = text.get(start..end) else {
            continue;
        };
        spans.push(NerSpan {
            label,
            text: slice.to_string(),
            span: (start, end),
        });
    }
    spans
}

/// Merges per-token BIO tags into `(label, start, end)` byte spans.
///
/// Tokens with a `(0, 0)` offset (special tokens) are skipped. An `I-` tag
/// extends the open span only when its label matches; otherwise it opens a
/// new span, which tolerates the stray `I-` starts real models emit.
fn merge_bio_spans(tags: &[&str], offsets: &[(usize, usize)]) -> Vec<(String, usize, usize)> {
    let mut spans: Vec<(String, usize, usize)> = Vec::new();
    let mut current: Option<(String, usize, usize)> = None;

    for (tag, &(start, end)) in tags.iter().zip(offsets) {
        if start == 0 && end == 0 {
            continue;
        }
        if *tag == "O" {
            if let Some(span) = current.take() {
                spans.push(span);
            }
            continue;
        }
        let (prefix, base) = tag.split_once('-').unwrap_or(("B", tag));
        match current.as_mut() {
            Some((label, _, open_end)) if prefix == "I" && label == base => {
                *open_end = end;
            }
            _ => {
                if let Some(span) = current.take() {
                    spans.push(span);
                }
                current = Some((base.to_string(), start, end));
            }
        }
    }
    if let Some(span) = current.take() {
        spans.push(span);
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_contiguous_bio_tags() {
        let tags = ["O", "B-PERSON", "I-PERSON", "O", "B-GPE"];
        let offsets = [(0, 4), (5, 9), (10, 13), (14, 16), (17, 23)];
        let spans = merge_bio_spans(&tags, &offsets);
        assert_eq!(
            spans,
            vec![
                ("PERSON".to_string(), 5, 13),
                ("GPE".to_string(), 17, 23)
            ]
        );
    }

    #[test]
    fn label_change_splits_spans() {
        let tags = ["B-PERSON", "I-ORG"];
        let offsets = [(0, 4), (5, 9)];
        let spans = merge_bio_spans(&tags, &offsets);
        assert_eq!(
            spans,
            vec![("PERSON".to_string(), 0, 4), ("ORG".to_string(), 5, 9)]
        );
    }

    #[test]
    fn special_token_offsets_are_skipped() {
        let tags = ["B-PERSON", "B-PERSON"];
        let offsets = [(0, 0), (3, 7)];
        let spans = merge_bio_spans(&tags, &offsets);
        assert_eq!(spans, vec![("PERSON".to_string(), 3, 7)]);
    }

    #[test]
    fn byte_offsets_slice_multibyte_text_directly() {
        // "José" is five bytes, so every span after it sits one byte past
        // its character index.
        let text = "José lives in Berlin";
        let spans = spans_from_merged(text, vec![("GPE".to_string(), 15, 21)]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Berlin");
        assert_eq!(spans[0].span, (15, 21));
        assert_eq!(&text[spans[0].span.0..spans[0].span.1], spans[0].text);
    }

    #[test]
    fn span_off_a_character_boundary_is_dropped() {
        // Byte 4 falls inside the two-byte "é".
        let text = "José lives in Berlin";
        let spans = spans_from_merged(text, vec![("PERSON".to_string(), 0, 4)]);
        assert!(spans.is_empty());
    }

    #[test]
    fn missing_artifacts_fail_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.onnx");
        let err = NerRecognizer::new(&missing, &missing, &missing).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigError { .. }));
    }
}
