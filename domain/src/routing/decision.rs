//! Routing decision value object

use crate::core::capability::CapabilityTag;
use serde::{Deserialize, Serialize};

/// Maximum number of capabilities selected for one query
pub const MAX_ROUTED_TAGS: usize = 3;

/// How a routing decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingSource {
    /// Curated keyword sets matched the query
    Keywords,
    /// The generative classifier produced a recognized discriminator
    Classifier,
    /// Nothing matched, or the classifier output was unusable
    Default,
}

impl RoutingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingSource::Keywords => "keywords",
            RoutingSource::Classifier => "classifier",
            RoutingSource::Default => "default",
        }
    }
}

impl std::fmt::Display for RoutingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered, deduplicated set of capabilities selected for one query
///
/// Invariant: `1 <= tags.len() <= 3`, no duplicates. Construction always
/// goes through [`RoutingDecision::new`], which enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    tags: Vec<CapabilityTag>,
    rationale: String,
    source: RoutingSource,
}

impl RoutingDecision {
    /// Build a decision, deduplicating in first-seen order and truncating
    /// to [`MAX_ROUTED_TAGS`]. An empty tag list yields the default.
    pub fn new(
        tags: impl IntoIterator<Item = CapabilityTag>,
        rationale: impl Into<String>,
        source: RoutingSource,
    ) -> Self {
        let mut unique: Vec<CapabilityTag> = Vec::with_capacity(MAX_ROUTED_TAGS);
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
            if unique.len() == MAX_ROUTED_TAGS {
                break;
            }
        }

        if unique.is_empty() {
            return Self::conversational(rationale);
        }

        Self {
            tags: unique,
            rationale: rationale.into(),
            source,
        }
    }

    /// The default decision: `{conversational}`
    pub fn conversational(rationale: impl Into<String>) -> Self {
        Self {
            tags: vec![CapabilityTag::Conversational],
            rationale: rationale.into(),
            source: RoutingSource::Default,
        }
    }

    pub fn tags(&self) -> &[CapabilityTag] {
        &self.tags
    }

    /// The highest-priority tag
    pub fn primary(&self) -> CapabilityTag {
        self.tags[0]
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn source(&self) -> RoutingSource {
        self.source
    }

    pub fn contains(&self, tag: CapabilityTag) -> bool {
        self.tags.contains(&tag)
    }
}
