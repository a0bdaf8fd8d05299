//! Deterministic pattern matchers for sensitive spans.
//!
//! Each matcher is a fixed regular expression compiled once per process.
//! Every match becomes one entity; overlapping matches across pattern types
//! are all retained, with no suppression between them.

use crate::domain::{Entity, EntityKind};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").expect("valid regex"));

/// Tolerant of country-code prefixes, parenthesized groups and mixed
/// separators.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\(?\d{2,4}\)?[-.\s]?){1,3}\d{3,4}").expect("valid regex")
});

/// Strict US social security number form.
static SSN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("valid regex"));

/// Slash/dash/dot-delimited numeric date, or ISO `YYYY-MM-DD`.
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{4}-\d{1,2}-\d{1,2})\b")
        .expect("valid regex")
});

/// Runs every pattern matcher over the text.
///
/// Output order is per-pattern (email, phone, SSN, date), each in match
/// order; the caller is responsible for the final sort.
pub fn pattern_entities(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    for (kind, regex) in [
        (EntityKind::Email, &*EMAIL),
        (EntityKind::Phone, &*PHONE),
        (EntityKind::Ssn, &*SSN),
        (EntityKind::Date, &*DATE),
    ] {
        for m in regex.find_iter(text) {
            entities.push(Entity::new(kind, m.as_str(), (m.start(), m.end())));
        }
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<EntityKind> {
        pattern_entities(text).into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn matches_email() {
        let entities = pattern_entities("contact: jane.doe+tag@example.co.uk please");
        let email: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Email)
            .collect();
        assert_eq!(email.len(), 1);
        assert_eq!(email[0].text, "jane.doe+tag@example.co.uk");
    }

    #[test]
    fn matches_phone_with_country_code() {
        let entities = pattern_entities("Phone: +1-555-123-4567");
        let phones: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Phone)
            .collect();
        assert!(!phones.is_empty());
        assert!(phones[0].text.contains("555"));
        assert!(!kinds("Phone: +1-555-123-4567").contains(&EntityKind::Email));
    }

    #[test]
    fn matches_strict_ssn() {
        let entities = pattern_entities("SSN: 123-45-6789");
        let ssn: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Ssn)
            .collect();
        assert_eq!(ssn.len(), 1);
        assert_eq!(ssn[0].text, "123-45-6789");
    }

    #[test]
    fn matches_numeric_and_iso_dates() {
        assert!(kinds("born 01/02/1993").contains(&EntityKind::Date));
        assert!(kinds("issued 2023-01-15").contains(&EntityKind::Date));
        assert!(kinds("issued 3.4.21").contains(&EntityKind::Date));
    }

    #[test]
    fn overlapping_matches_are_all_retained() {
        // The SSN digits also satisfy the tolerant phone pattern.
        let entities = pattern_entities("123-45-6789");
        assert!(entities.iter().any(|e| e.kind == EntityKind::Ssn));
        assert!(entities.iter().any(|e| e.kind == EntityKind::Phone));
    }

    #[test]
    fn spans_index_the_source_text() {
        let text = "mail a@b.io on 01/02/2023";
        for entity in pattern_entities(text) {
            assert_eq!(&text[entity.span.0..entity.span.1], entity.text);
        }
    }
}
