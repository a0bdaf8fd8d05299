//! Sensitive-entity detection.
//!
//! # Modules
//!
//! * `patterns` - Deterministic regex matchers (email, phone, SSN, date)
//! * `detector` - Merge of pattern and statistical sources

mod detector;
mod patterns;

pub use detector::detect;
pub use patterns::pattern_entities;
