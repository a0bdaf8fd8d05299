//! Entity detection over the joined extraction text.
//!
//! Merges the deterministic pattern matchers with the statistical
//! named-entity capability. The statistical source is filtered to the
//! sensitive allow-list (PERSON, GPE, ORG, NORP); nothing else is filtered,
//! deduplicated or overlap-resolved.

use crate::core::{EntityRecognizer, PipelineError};
use crate::domain::{Entity, EntityKind};
use crate::pii::pattern_entities;
use tracing::debug;

/// Detects sensitive entities in the full text.
///
/// The result is the concatenation of both sources, stable-sorted ascending
/// by span start, so equal starts keep pattern matches ahead of statistical
/// ones.
pub fn detect(
    full_text: &str,
    ner: &dyn EntityRecognizer,
) -> Result<Vec<Entity>, PipelineError> {
    let mut entities = pattern_entities(full_text);
    let pattern_count = entities.len();

    for span in ner.recognize_entities(full_text)? {
        if let Some(kind) = EntityKind::from_ner_label(&span.label) {
            entities.push(Entity::new(kind, span.text, span.span));
        }
    }
    debug!(
        pattern = pattern_count,
        statistical = entities.len() - pattern_count,
        "entity detection complete"
    );

    entities.sort_by_key(|entity| entity.span.0);
    Ok(entities)
}
