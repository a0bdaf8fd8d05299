//! Classified sensitive spans of the extracted text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a detected sensitive span.
///
/// `Email`, `Phone`, `Ssn` and `Date` come from the deterministic pattern
/// matchers; `Person`, `Gpe`, `Org` and `Norp` come from the statistical
/// named-entity capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// A US social security number.
    Ssn,
    /// A numeric or ISO calendar date.
    Date,
    /// A person's name.
    Person,
    /// A geopolitical entity (country, city, state).
    Gpe,
    /// An organization.
    Org,
    /// A nationality, religious or political group.
    Norp,
}

impl EntityKind {
    /// Maps a statistical model label onto a kind, returning `None` for
    /// labels outside the sensitive allow-list.
    pub fn from_ner_label(label: &str) -> Option<Self> {
        match label {
            "PERSON" => Some(Self::Person),
            "GPE" => Some(Self::Gpe),
            "ORG" => Some(Self::Org),
            "NORP" => Some(Self::Norp),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Ssn => "SSN",
            Self::Date => "DATE",
            Self::Person => "PERSON",
            Self::Gpe => "GPE",
            Self::Org => "ORG",
            Self::Norp => "NORP",
        };
        f.write_str(name)
    }
}

/// A classified span of the joined extraction text.
///
/// `span` holds byte offsets into the full text; slicing the full text with
/// them always reproduces `text`. Overlapping entities from different
/// sources are permitted and never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity category.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// The matched text.
    pub text: String,
    /// Start and end offsets of the match in the full text.
    pub span: (usize, usize),
}

impl Entity {
    /// Creates a new entity.
    pub fn new(kind: EntityKind, text: impl Into<String>, span: (usize, usize)) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}
