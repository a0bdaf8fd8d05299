//! Textual cleanup of raw recognized tokens.
//!
//! OCR output carries a handful of recurring character confusions and
//! irregular whitespace. The cleaner applies a fixed, ordered set of
//! substitutions and then collapses whitespace, and is applied to each
//! token's text before tokens are joined into the full text consumed by
//! entity detection.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Cleans one piece of recognized text.
///
/// Substitutions, in order: vertical bar to `I`, curly double quotes to a
/// straight quote, em-dash to hyphen, bullet to hyphen. Whitespace runs are
/// then collapsed to a single space and the result is trimmed.
pub fn clean(text: &str) -> String {
    let substituted = text
        .replace('|', "I")
        .replace('\u{201d}', "\"")
        .replace('\u{201c}', "\"")
        .replace('\u{2014}', "-")
        .replace('\u{2022}', "-");
    WHITESPACE.replace_all(&substituted, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_common_confusions() {
        assert_eq!(clean("|nvoice"), "Invoice");
        assert_eq!(clean("\u{201c}quoted\u{201d}"), "\"quoted\"");
        assert_eq!(clean("a\u{2014}b"), "a-b");
        assert_eq!(clean("\u{2022} item"), "- item");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(clean("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean("John Doe 123-45-6789"), "John Doe 123-45-6789");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }
}
