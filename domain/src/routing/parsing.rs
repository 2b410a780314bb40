//! Classifier output parsing for the router's generative pass.
//!
//! The generative classifier is instructed to emit a single discriminator
//! digit, or a structured payload naming one to three tags. Its output is
//! parsed defensively; callers fall back to `{conversational}` on any error.
//!
//! # Supported Formats
//!
//! 1. **Digit** (preferred): `3`
//! 2. **JSON object**: `{"tags": ["group-coordination", "credit-advisory"]}`
//! 3. **JSON array**: `["credit-advisory"]`
//!
//! Code fences and surrounding quotes are tolerated.

use crate::core::capability::CapabilityTag;
use thiserror::Error;

/// Why a classifier output could not be turned into tags
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationParseError {
    #[error("classifier returned an empty result")]
    Empty,

    #[error("unrecognized discriminator: {0}")]
    Unrecognized(String),

    #[error("unknown capability tag: {0}")]
    UnknownTag(String),

    #[error("payload named no tags")]
    NoTags,
}

fn strip_wrapping(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop an optional language hint on the fence line
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        s = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim()
}

fn tags_from_values(values: &[serde_json::Value]) -> Result<Vec<CapabilityTag>, ClassificationParseError> {
    if values.is_empty() {
        return Err(ClassificationParseError::NoTags);
    }

    values
        .iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s
                .parse::<CapabilityTag>()
                .map_err(|_| ClassificationParseError::UnknownTag(s.clone())),
            serde_json::Value::Number(n) => n
                .to_string()
                .parse::<CapabilityTag>()
                .map_err(|_| ClassificationParseError::UnknownTag(n.to_string())),
            other => Err(ClassificationParseError::UnknownTag(other.to_string())),
        })
        .collect()
}

fn parse_payload(s: &str) -> Result<Vec<CapabilityTag>, ClassificationParseError> {
    let parsed: serde_json::Value = serde_json::from_str(s)
        .map_err(|_| ClassificationParseError::Unrecognized(s.to_string()))?;

    match parsed {
        serde_json::Value::Array(values) => tags_from_values(&values),
        serde_json::Value::Object(map) => match map.get("tags").or_else(|| map.get("tag")) {
            Some(serde_json::Value::Array(values)) => tags_from_values(values),
            Some(single) => tags_from_values(std::slice::from_ref(single)),
            None => Err(ClassificationParseError::NoTags),
        },
        _ => Err(ClassificationParseError::Unrecognized(s.to_string())),
    }
}

/// Parse the raw classifier output into capability tags.
///
/// Duplicates and ordering are left untouched; the caller builds a
/// [`RoutingDecision`](super::decision::RoutingDecision), which enforces them.
///
/// # Examples
///
/// ```
/// use lattice_domain::routing::parsing::parse_classifier_output;
/// use lattice_domain::CapabilityTag;
///
/// assert_eq!(parse_classifier_output("3").unwrap(), vec![CapabilityTag::GroupCoordination]);
/// assert!(parse_classifier_output("maybe group?").is_err());
/// ```
pub fn parse_classifier_output(raw: &str) -> Result<Vec<CapabilityTag>, ClassificationParseError> {
    let s = strip_wrapping(raw);
    if s.is_empty() {
        return Err(ClassificationParseError::Empty);
    }

    // Exact discriminator: a single digit
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return CapabilityTag::from_digit(c)
            .map(|tag| vec![tag])
            .ok_or_else(|| ClassificationParseError::Unrecognized(s.to_string()));
    }

    // Structured payload, possibly embedded in surrounding prose
    if let Some(start) = s.find(['{', '['])
        && let Some(end) = s.rfind(['}', ']'])
        && end > start
    {
        return parse_payload(&s[start..=end]);
    }

    Err(ClassificationParseError::Unrecognized(s.to_string()))
}
