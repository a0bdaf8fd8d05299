//! Mapping detected entities back to token bounding boxes.

use crate::domain::{Entity, Token};
use crate::processors::{clean, BoundingBox};
use tracing::debug;

/// Collects the bounding box of every token whose cleaned, lower-cased text
/// contains an entity's trimmed, lower-cased text as a substring.
///
/// This is a deliberate containment rule, not an exact match. An unrelated
/// token that happens to contain the entity substring produces a false
/// positive; an entity whose text spans multiple tokens produces no region
/// at all. The output is a flat list in entity-major order, and the same
/// box appears once per entity that resolves to it.
pub fn resolve(tokens: &[Token], entities: &[Entity]) -> Vec<BoundingBox> {
    let mut regions = Vec::new();
    for entity in entities {
        let needle = entity.text.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        for token in tokens {
            let haystack = clean(&token.text).to_lowercase();
            if haystack.contains(&needle) {
                regions.push(token.bbox.clone());
            }
        }
    }
    debug!(
        entities = entities.len(),
        regions = regions.len(),
        "region resolution complete"
    );
    regions
}
