//! Composite response assembly (the Aggregator).
//!
//! Capabilities complete in arbitrary order. The aggregator buffers every
//! result by tag and renders them in routing-decision order, so display
//! order never depends on completion order.

use crate::core::capability::CapabilityTag;
use crate::execution::result::{HandlerErrorKind, HandlerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rendered when no section produced an answer of its own
pub const GENERIC_APOLOGY: &str =
    "Sorry, I wasn't able to put an answer together right now. Please try again in a moment.";

/// Ordered sequence of per-capability results, one labeled section each
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResponse {
    sections: Vec<HandlerResult>,
}

impl CompositeResponse {
    /// Assemble sections in `tags` order.
    ///
    /// A tag with no entry in `results` gets an apology section marked
    /// [`HandlerErrorKind::Missing`]; results for tags outside `tags` are
    /// dropped.
    pub fn aggregate(
        tags: &[CapabilityTag],
        mut results: HashMap<CapabilityTag, HandlerResult>,
    ) -> Self {
        let sections = tags
            .iter()
            .map(|tag| {
                results
                    .remove(tag)
                    .unwrap_or_else(|| HandlerResult::failure(*tag, HandlerErrorKind::Missing))
            })
            .collect();

        Self { sections }
    }

    pub fn sections(&self) -> &[HandlerResult] {
        &self.sections
    }

    /// True when no section succeeded (including the empty response)
    pub fn all_failed(&self) -> bool {
        self.sections.iter().all(|s| !s.succeeded)
    }

    /// Render the labeled sections joined by a blank line
    pub fn render(&self) -> String {
        if self.all_failed() {
            return GENERIC_APOLOGY.to_string();
        }

        self.sections
            .iter()
            .map(|section| format!("**{}**\n{}", section.tag.label(), section.text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::invocation::Tier;
    use CapabilityTag::*;

    fn ok(tag: CapabilityTag, text: &str) -> HandlerResult {
        HandlerResult::success(tag, text, Tier::Deterministic)
    }

    #[test]
    fn test_renders_in_decision_order_not_insertion_order() {
        let tags = [GroupCoordination, CreditAdvisory, PersonalFinance];
        // Simulate completions arriving in reverse order
        let mut results = HashMap::new();
        results.insert(PersonalFinance, ok(PersonalFinance, "wait a week"));
        results.insert(CreditAdvisory, ok(CreditAdvisory, "use the gold card"));
        results.insert(GroupCoordination, ok(GroupCoordination, "$40.00 each"));

        let response = CompositeResponse::aggregate(&tags, results);
        let order: Vec<_> = response.sections().iter().map(|s| s.tag).collect();
        assert_eq!(order, tags.to_vec());

        let rendered = response.render();
        assert_eq!(
            rendered,
            "**Group Coordination**\n$40.00 each\n\n\
             **Credit Advisory**\nuse the gold card\n\n\
             **Personal Finance**\nwait a week"
        );
    }

    #[test]
    fn test_missing_result_becomes_apology_section() {
        let mut results = HashMap::new();
        results.insert(GroupCoordination, ok(GroupCoordination, "split it"));

        let response = CompositeResponse::aggregate(&[GroupCoordination, CreditAdvisory], results);
        assert_eq!(response.sections().len(), 2);
        let missing = &response.sections()[1];
        assert!(!missing.succeeded);
        assert_eq!(missing.error, Some(HandlerErrorKind::Missing));
        assert!(response.render().contains("**Credit Advisory**\nSorry"));
    }

    #[test]
    fn test_all_failed_renders_generic_apology() {
        let mut results = HashMap::new();
        results.insert(
            Conversational,
            HandlerResult::failure(Conversational, HandlerErrorKind::Panicked),
        );
        let response = CompositeResponse::aggregate(&[Conversational], results);
        assert!(response.all_failed());
        assert_eq!(response.render(), GENERIC_APOLOGY);
    }

    #[test]
    fn test_extra_results_are_ignored() {
        let mut results = HashMap::new();
        results.insert(Conversational, ok(Conversational, "hello"));
        results.insert(CreditAdvisory, ok(CreditAdvisory, "unused"));
        let response = CompositeResponse::aggregate(&[Conversational], results);
        assert_eq!(response.sections().len(), 1);
        assert!(!response.render().contains("unused"));
    }
}
