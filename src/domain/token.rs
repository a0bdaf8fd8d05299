//! Positioned text tokens produced by the extraction engines.

use crate::processors::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// A recognized text unit with its image-space bounding polygon.
///
/// The confidence scale depends on the producing engine (the primary
/// detector reports `[0, 1]`, the fallback recognizer `[0, 100]`) and is
/// deliberately never normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The 4-point bounding polygon of the token in image coordinates.
    #[serde(with = "bbox_points")]
    pub bbox: BoundingBox,
    /// The recognized text, exactly as the engine emitted it.
    pub text: String,
    /// Engine-native confidence, if the engine reports one.
    pub conf: Option<f32>,
}

impl Token {
    /// Creates a new token.
    pub fn new(bbox: BoundingBox, text: impl Into<String>, conf: Option<f32>) -> Self {
        Self {
            bbox,
            text: text.into(),
            conf,
        }
    }
}

/// Serializes a bounding box as a flat list of `[x, y]` pairs, the wire
/// format consumed by downstream tooling.
mod bbox_points {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(bbox: &BoundingBox, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<[f32; 2]> = bbox.points.iter().map(|p| [p.x, p.y]).collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BoundingBox, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<[f32; 2]>::deserialize(deserializer)?;
        Ok(BoundingBox::new(
            pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_serializes_bbox_as_point_pairs() {
        let token = Token::new(
            BoundingBox::from_coords(1.0, 2.0, 3.0, 4.0),
            "hello",
            Some(0.9),
        );
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json["bbox"],
            serde_json::json!([[1.0, 2.0], [3.0, 2.0], [3.0, 4.0], [1.0, 4.0]])
        );
        assert_eq!(json["text"], "hello");
        assert_eq!(json["conf"], 0.9);
    }

    #[test]
    fn token_without_confidence_serializes_null() {
        let token = Token::new(BoundingBox::from_coords(0.0, 0.0, 1.0, 1.0), "x", None);
        let json = serde_json::to_value(&token).unwrap();
        assert!(json["conf"].is_null());
    }

    #[test]
    fn token_round_trips() {
        let token = Token::new(
            BoundingBox::from_coords(0.0, 0.0, 10.0, 5.0),
            "word",
            Some(87.0),
        );
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text, "word");
        assert_eq!(back.bbox.points.len(), 4);
        assert_eq!(back.conf, Some(87.0));
    }
}
